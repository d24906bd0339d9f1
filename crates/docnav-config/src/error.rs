//! Configuration error.

use std::path::PathBuf;

use docnav_storage::StorageError;

/// Configuration error.
///
/// Validation variants carry the dotted field path of the offending value
/// (e.g. `nav[1].link`, `locales.zh.sidebar["/docs/"][0]`).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Source directory cannot be used for document lookups.
    #[error("Source directory error: {0}")]
    Storage(#[from] StorageError),
    /// Required field absent or empty.
    #[error("Configuration error: {field} is required")]
    MissingField {
        /// Field path.
        field: String,
    },
    /// Plugin identifier listed more than once.
    #[error("Configuration error: duplicate plugin \"{plugin}\" at {field}")]
    DuplicatePlugin {
        /// Field path of the repeated occurrence.
        field: String,
        /// Plugin identifier.
        plugin: String,
    },
    /// Sidebar route key is invalid, or the `"/"` fallback is missing.
    #[error("Configuration error: invalid route \"{route}\" in {field}: {reason}")]
    InvalidRoute {
        /// Field path.
        field: String,
        /// Offending route key.
        route: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Referenced document does not exist in the source directory.
    #[error("Configuration error: {field} references missing document \"{path}\"")]
    DanglingReference {
        /// Field path.
        field: String,
        /// Document path as written.
        path: String,
    },
    /// Link or repository URL is not well formed.
    #[error("Configuration error: {field} is not a valid URL or path: \"{value}\"")]
    MalformedUrl {
        /// Field path.
        field: String,
        /// Value as written.
        value: String,
    },
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`github`").
        field: String,
        /// Error message (e.g., "${`DOCS_REPO`} not set").
        message: String,
    },
}
