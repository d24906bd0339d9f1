//! `docnav resolve` command implementation.

use clap::Args;
use docnav_site::Site;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Site-relative route, optionally prefixed with a locale (e.g. /zh/guide/).
    path: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ResolveArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.config.load()?;
        let site = Site::new(&config);

        output.json(&site.navigation(&self.path))
    }
}
