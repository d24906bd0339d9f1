//! Site configuration for docnav.
//!
//! Parses a declarative site configuration (title, theme, plugins, nav links,
//! sidebar tree, locale overrides) into an immutable, validated
//! [`SiteConfig`], and answers which sidebar applies to a requested route.
//!
//! The three operations the rendering engine relies on:
//!
//! - [`SiteConfig::parse`] validates a raw [`SiteDocument`]
//! - [`SiteConfig::merge`] applies a locale [`ConfigOverride`]
//! - [`SiteConfig::resolve`] picks the sidebar for a route by longest prefix
//!
//! [`Config::load`] wraps these for a configuration file on disk, with
//! auto-discovery of `docnav.toml` in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields (in the base document and in every locale):
//! - `root`
//! - `github`
//! - `nav[].link`

mod document;
mod error;
mod expand;
mod merge;
mod model;
mod parse;

use std::path::{Path, PathBuf};

use docnav_storage::{FsStorage, Storage};
use indexmap::IndexMap;

pub use document::{ConfigDocument, Format, LocaleDocument, NavLinkDocument, SiteDocument};
pub use error::ConfigError;
pub use merge::ConfigOverride;
pub use model::{Align, FALLBACK_ROUTE, GroupEntry, NavLink, Sidebar, SidebarEntry, SiteConfig};

use parse::Validator;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override source directory.
    pub src_dir: Option<PathBuf>,
    /// Override the base `root` URL prefix.
    pub root: Option<String>,
}

/// A declared locale and its override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    /// Locale code, also used as the route prefix (e.g. `zh` for `/zh/`).
    pub code: String,
    /// Human-readable name; defaults to the code.
    pub label: String,
    /// Fields this locale overrides.
    pub overrides: ConfigOverride,
}

impl Locale {
    /// Merge this locale's override onto a base configuration.
    #[must_use]
    pub fn apply(&self, base: &SiteConfig) -> SiteConfig {
        base.merge(&self.overrides)
    }
}

/// Loaded configuration file.
#[derive(Debug)]
pub struct Config {
    /// Validated base site configuration.
    pub site: SiteConfig,
    /// Locales in declaration order, keyed by code.
    pub locales: IndexMap<String, Locale>,
    /// Directory document paths are resolved against.
    pub source_dir: PathBuf,
    /// Path to the config file (set after loading from disk).
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied to the document before validation, so an
    /// overridden `root` is checked like one written in the file.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, the source directory is
    /// unusable, or parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        } else {
            Self::discover_config()
                .ok_or_else(|| ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)))?
        };

        Self::load_from_file(&path, cli_settings)
    }

    /// Build from an already-deserialized document.
    ///
    /// `source_dir` is recorded for callers; document existence is checked
    /// against `storage`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure in the base document, then in
    /// each locale in declaration order.
    pub fn from_document(
        document: ConfigDocument,
        source_dir: PathBuf,
        storage: &dyn Storage,
    ) -> Result<Self, ConfigError> {
        let site = SiteConfig::parse(document.site, storage)?;

        let mut locales = IndexMap::with_capacity(document.locales.len());
        for (code, locale) in document.locales {
            if code.is_empty() || code.contains('/') {
                return Err(ConfigError::InvalidRoute {
                    field: format!("locales.{code}"),
                    route: format!("/{code}/"),
                    reason: "locale code must be a single non-empty path segment",
                });
            }

            let overrides = Validator::new(format!("locales.{code}."), storage).overlay(locale.site)?;
            let label = locale.label.unwrap_or_else(|| code.clone());
            locales.insert(
                code.clone(),
                Locale {
                    code,
                    label,
                    overrides,
                },
            );
        }

        Ok(Self {
            site,
            locales,
            source_dir,
            config_path: None,
        })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(
        path: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut document = ConfigDocument::parse_str(&content, Format::from_path(path))?;

        // Expand environment variables before CLI overrides and validation
        document.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        let source_dir = Self::resolve_source_dir(&document, config_dir, cli_settings);

        if let Some(root) = cli_settings.and_then(|s| s.root.as_ref()) {
            document.site.root = Some(root.clone());
        }

        let storage = FsStorage::open(source_dir.clone())?;
        let mut config = Self::from_document(document, source_dir, &storage)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            source_dir = %config.source_dir.display(),
            locales = config.locales.len(),
            routes = config.site.sidebar().len(),
            "Loaded site configuration"
        );

        Ok(config)
    }

    /// CLI `src_dir` wins; otherwise `src_dir` from the file relative to its
    /// directory; otherwise the config directory itself.
    fn resolve_source_dir(
        document: &ConfigDocument,
        config_dir: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> PathBuf {
        if let Some(dir) = cli_settings.and_then(|s| s.src_dir.as_ref()) {
            return dir.clone();
        }
        config_dir.join(document.src_dir.as_deref().unwrap_or("."))
    }
}
