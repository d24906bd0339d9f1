//! Locale overrides.
//!
//! Collection-valued fields are replaced, never merged element by element:
//! `plugins` and `nav` swap out wholesale, and `sidebar` swaps per route key.

use crate::model::{NavLink, Sidebar, SiteConfig};

/// Validated partial configuration applied on top of a base [`SiteConfig`].
///
/// Built with [`ConfigOverride::parse`]. An absent field inherits the base
/// value. The default value overrides nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverride {
    pub(crate) title: Option<String>,
    pub(crate) theme: Option<String>,
    pub(crate) root: Option<String>,
    pub(crate) plugins: Option<Vec<String>>,
    pub(crate) nav: Option<Vec<NavLink>>,
    pub(crate) sidebar: Sidebar,
    pub(crate) github: Option<String>,
}

impl ConfigOverride {
    /// True if applying this override changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn plugins(&self) -> Option<&[String]> {
        self.plugins.as_deref()
    }

    pub fn nav(&self) -> Option<&[NavLink]> {
        self.nav.as_deref()
    }

    /// Overridden sidebar routes. Routes not listed here are inherited.
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn github(&self) -> Option<&str> {
        self.github.as_deref()
    }
}

impl SiteConfig {
    /// Apply an override and return the combined configuration.
    ///
    /// Scalars in `overlay` replace the base value when present. `plugins` and
    /// `nav` are replaced as a whole. Sidebar routes present in `overlay`
    /// replace the base entry sequence for that route; new routes are appended
    /// after the inherited ones, and inherited routes keep their position.
    #[must_use]
    pub fn merge(&self, overlay: &ConfigOverride) -> SiteConfig {
        let mut sidebar = self.sidebar.clone();
        for (route, entries) in &overlay.sidebar {
            sidebar.insert(route.clone(), entries.clone());
        }

        SiteConfig {
            title: overlay.title.as_ref().unwrap_or(&self.title).clone(),
            theme: overlay.theme.as_ref().unwrap_or(&self.theme).clone(),
            root: overlay.root.as_ref().unwrap_or(&self.root).clone(),
            plugins: overlay.plugins.as_ref().unwrap_or(&self.plugins).clone(),
            nav: overlay.nav.as_ref().unwrap_or(&self.nav).clone(),
            sidebar,
            github: overlay.github.clone().or_else(|| self.github.clone()),
        }
    }
}
