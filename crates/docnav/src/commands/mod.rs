//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;
pub(crate) mod show;

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use show::ShowArgs;

/// Options shared by every command for locating and adjusting the config.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    src_dir: Option<PathBuf>,

    /// URL root the site is served under (overrides config).
    #[arg(long)]
    root: Option<String>,
}

impl ConfigArgs {
    /// Load and validate the configuration.
    pub(crate) fn load(self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            src_dir: self.src_dir,
            root: self.root,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
