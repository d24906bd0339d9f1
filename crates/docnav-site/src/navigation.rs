//! Render-ready navigation for a single route.

use docnav_config::{Align, NavLink, SidebarEntry, SiteConfig};
use serde::Serialize;

use crate::site::Site;

/// Locale switcher entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocaleLink {
    /// Locale code.
    pub code: String,
    /// Display name.
    pub label: String,
    /// The requested page under this locale.
    pub link: String,
    /// True for the locale being rendered.
    pub active: bool,
}

/// Everything the rendering engine needs to draw navigation for a route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub title: String,
    pub theme: String,
    pub root: String,
    pub plugins: Vec<String>,
    /// Left-aligned nav links in declaration order.
    #[serde(rename = "navLeft")]
    pub nav_left: Vec<NavLink>,
    /// Right-aligned nav links in declaration order.
    #[serde(rename = "navRight")]
    pub nav_right: Vec<NavLink>,
    /// Sidebar entries for the route.
    pub sidebar: Vec<SidebarEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    /// Active locale code (`None` for the base site).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Locale switcher, empty when no locales are declared.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<LocaleLink>,
}

impl Site {
    /// Build navigation for a site-relative route.
    ///
    /// A leading locale segment (e.g. `/zh/`) selects that locale's
    /// configuration; the sidebar is then resolved against the remainder of
    /// the route. Switcher links are `{base root}{code}{page}`, the form
    /// [`Site::split_locale`] accepts once the base root is stripped.
    pub fn navigation(&self, path: &str) -> Navigation {
        let (locale, page) = self.split_locale(path);
        let root = self.base().root();
        let config = self
            .locales()
            .find(|l| Some(l.code.as_str()) == locale)
            .map_or(self.base(), |l| &l.config);

        let locales = self
            .locales()
            .map(|l| LocaleLink {
                code: l.code.clone(),
                label: l.label.clone(),
                link: format!("{root}{}{page}", l.code),
                active: Some(l.code.as_str()) == locale,
            })
            .collect();

        tracing::debug!(path, locale, "Resolved navigation");

        Navigation {
            locale: locale.map(str::to_owned),
            locales,
            ..Navigation::from_config(config, &page)
        }
    }
}

impl Navigation {
    /// Navigation for a route of a single configuration, without locales.
    pub fn from_config(config: &SiteConfig, path: &str) -> Self {
        Self {
            title: config.title().to_owned(),
            theme: config.theme().to_owned(),
            root: config.root().to_owned(),
            plugins: config.plugins().to_vec(),
            nav_left: config.nav_aligned(Align::Left).cloned().collect(),
            nav_right: config.nav_aligned(Align::Right).cloned().collect(),
            sidebar: config.resolve(path).to_vec(),
            github: config.github().map(str::to_owned),
            locale: None,
            locales: Vec::new(),
        }
    }
}
