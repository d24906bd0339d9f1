//! CLI error types.

use docnav_config::ConfigError;
use docnav_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
