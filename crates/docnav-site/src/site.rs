//! Site with all locales resolved.
//!
//! Each locale override is merged onto the base configuration once, when the
//! [`Site`] is built. Merges are independent of each other, so they run in
//! parallel; the resulting configurations are immutable and shared read-only.

use docnav_config::{Config, SiteConfig};
use indexmap::IndexMap;
use rayon::prelude::*;

/// Error returned for lookups against a [`Site`].
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Locale code is not declared in the configuration.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

/// One locale's merged configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleSite {
    /// Locale code, also the route prefix.
    pub code: String,
    /// Display name.
    pub label: String,
    /// Base configuration with this locale's override applied.
    pub config: SiteConfig,
}

/// Base configuration plus every locale's merged configuration.
#[derive(Debug)]
pub struct Site {
    base: SiteConfig,
    locales: IndexMap<String, LocaleSite>,
}

impl Site {
    /// Build the site, merging every locale override onto the base.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let locales: Vec<_> = config.locales.values().collect();

        let merged: Vec<LocaleSite> = locales
            .par_iter()
            .map(|locale| LocaleSite {
                code: locale.code.clone(),
                label: locale.label.clone(),
                config: locale.apply(&config.site),
            })
            .collect();

        tracing::info!(
            title = config.site.title(),
            locales = merged.len(),
            "Built site navigation"
        );

        Self {
            base: config.site.clone(),
            locales: merged
                .into_iter()
                .map(|locale| (locale.code.clone(), locale))
                .collect(),
        }
    }

    /// Base configuration.
    pub fn base(&self) -> &SiteConfig {
        &self.base
    }

    /// Locales in declaration order.
    pub fn locales(&self) -> impl Iterator<Item = &LocaleSite> {
        self.locales.values()
    }

    /// Configuration for a locale, or the base configuration for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownLocale`] if `locale` is not declared.
    pub fn config(&self, locale: Option<&str>) -> Result<&SiteConfig, SiteError> {
        match locale {
            None => Ok(&self.base),
            Some(code) => self
                .locales
                .get(code)
                .map(|l| &l.config)
                .ok_or_else(|| SiteError::UnknownLocale(code.to_owned())),
        }
    }

    /// Split a leading locale segment off a route.
    ///
    /// `/zh/docs/intro` becomes (`Some("zh")`, `/docs/intro`) when `zh` is a
    /// declared locale; any other route is returned unchanged with `None`.
    pub fn split_locale(&self, path: &str) -> (Option<&str>, String) {
        let trimmed = path.trim_start_matches('/');
        let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

        match self.locales.get_key_value(first) {
            Some((code, _)) => (Some(code.as_str()), format!("/{rest}")),
            None => (None, format!("/{trimmed}")),
        }
    }
}
