//! `docnav show` command implementation.

use clap::Args;
use docnav_site::Site;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Show the merged configuration for this locale.
    #[arg(short, long)]
    locale: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ShowArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.config.load()?;
        let site = Site::new(&config);

        output.json(site.config(self.locale.as_deref())?)
    }
}
