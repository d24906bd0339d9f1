//! Raw configuration document shapes as deserialized from TOML, JSON or YAML.
//!
//! Every field is optional here. Presence and format are checked when the
//! document is parsed into a [`SiteConfig`](crate::SiteConfig) or a
//! [`ConfigOverride`](crate::ConfigOverride).

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::ConfigError;
use crate::expand::{expand_env, expand_opt};
use crate::model::{Align, SidebarEntry};

/// Raw site fields, shared by the base document and locale overrides.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteDocument {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub root: Option<String>,
    pub plugins: Option<Vec<String>>,
    pub nav: Option<Vec<NavLinkDocument>>,
    pub sidebar: Option<IndexMap<String, Vec<SidebarEntry>>>,
    pub github: Option<String>,
}

impl SiteDocument {
    /// Expand environment variables in `root`, `github` and nav links.
    pub(crate) fn expand_env_vars(&mut self, prefix: &str) -> Result<(), ConfigError> {
        expand_opt(&mut self.root, &format!("{prefix}root"))?;
        expand_opt(&mut self.github, &format!("{prefix}github"))?;

        for (i, link) in self.nav.iter_mut().flatten().enumerate() {
            if let Some(ref mut value) = link.link {
                *value = expand_env(value, &format!("{prefix}nav[{i}].link"))?;
            }
        }

        Ok(())
    }
}

/// Raw nav link.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavLinkDocument {
    pub text: Option<String>,
    pub link: Option<String>,
    pub align: Option<Align>,
}

/// Raw locale entry: display label plus overridden site fields.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LocaleDocument {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub site: SiteDocument,
}

/// Whole configuration file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConfigDocument {
    /// Source directory relative to the config file.
    #[serde(default)]
    pub src_dir: Option<String>,
    #[serde(flatten)]
    pub site: SiteDocument,
    /// Locale overrides keyed by locale code, in declaration order.
    #[serde(default)]
    pub locales: IndexMap<String, LocaleDocument>,
}

impl ConfigDocument {
    /// Deserialize a document in the given format.
    ///
    /// # Errors
    ///
    /// Returns the format's parse error variant if the content is malformed.
    pub fn parse_str(content: &str, format: Format) -> Result<Self, ConfigError> {
        let document = match format {
            Format::Toml => toml::from_str(content)?,
            Format::Json => serde_json::from_str(content)?,
            Format::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(document)
    }

    /// Expand environment variable references in the base and every locale.
    pub(crate) fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.expand_env_vars("")?;
        for (code, locale) in &mut self.locales {
            locale.site.expand_env_vars(&format!("locales.{code}."))?;
        }
        Ok(())
    }
}

/// Configuration file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension, defaulting to TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }
}
