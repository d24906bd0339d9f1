//! Normalized site model.
//!
//! A [`SiteConfig`] is only ever produced by [`SiteConfig::parse`] or
//! [`SiteConfig::merge`], so holding one means every invariant has been
//! checked: required fields are set, plugins are unique, the `"/"` fallback
//! route exists, and every referenced document was found.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sidebar tree keyed by route prefix, in declaration order.
pub type Sidebar = IndexMap<String, Vec<SidebarEntry>>;

/// Route used when no longer sidebar prefix matches.
pub const FALLBACK_ROUTE: &str = "/";

/// Validated, immutable site configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub(crate) title: String,
    pub(crate) theme: String,
    pub(crate) root: String,
    pub(crate) plugins: Vec<String>,
    pub(crate) nav: Vec<NavLink>,
    pub(crate) sidebar: Sidebar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) github: Option<String>,
}

impl SiteConfig {
    /// Site title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Theme identifier.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// URL path prefix the site is served under. Always starts and ends with `/`.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Plugin identifiers in execution order.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Navigation links in rendered order (`left` group, then `right` group).
    pub fn nav(&self) -> &[NavLink] {
        &self.nav
    }

    /// Navigation links with the given alignment, in rendered order.
    pub fn nav_aligned(&self, align: Align) -> impl Iterator<Item = &NavLink> {
        self.nav.iter().filter(move |link| link.align == align)
    }

    /// Sidebar tree keyed by route prefix.
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Repository URL.
    pub fn github(&self) -> Option<&str> {
        self.github.as_deref()
    }

    /// Select the sidebar entries for a requested route.
    ///
    /// Picks the longest sidebar key that is a prefix of `requested`. Keys of
    /// equal length keep the one declared first. The `"/"` key matches every
    /// route, so the result is never empty for a parsed config.
    pub fn resolve(&self, requested: &str) -> &[SidebarEntry] {
        let requested = normalize_route(requested);

        let mut best: Option<(&str, &[SidebarEntry])> = None;
        for (route, entries) in &self.sidebar {
            if !requested.starts_with(route.as_str()) {
                continue;
            }
            if best.is_none_or(|(current, _)| route.len() > current.len()) {
                best = Some((route.as_str(), entries.as_slice()));
            }
        }

        best.map(|(_, entries)| entries).unwrap_or_default()
    }
}

/// Prefix a route with `/` when the caller left it off.
pub(crate) fn normalize_route(route: &str) -> Cow<'_, str> {
    if route.starts_with('/') {
        Cow::Borrowed(route)
    } else {
        Cow::Owned(format!("/{route}"))
    }
}

/// Horizontal placement of a nav link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Rendered first.
    #[default]
    Left,
    /// Rendered after every left-aligned link.
    Right,
}

/// Top navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display label.
    pub text: String,
    /// URL or site path.
    pub link: String,
    /// Placement in the navigation bar.
    pub align: Align,
}

/// Sidebar entry: a bare document path or a group with a landing page.
///
/// Serialized untagged, so a plain string is a leaf and a table is a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Path to a source document relative to the source root.
    Leaf(String),
    /// Landing page with optional one-level children.
    Group(GroupEntry),
}

impl SidebarEntry {
    /// Path of the page this entry links to.
    pub fn link(&self) -> &str {
        match self {
            Self::Leaf(path) => path,
            Self::Group(group) => &group.link,
        }
    }

    /// Child paths (empty for leaves).
    pub fn children(&self) -> &[String] {
        match self {
            Self::Leaf(_) => &[],
            Self::Group(group) => &group.children,
        }
    }
}

/// Sidebar group.
///
/// Children are bare paths; groups do not nest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    /// Path to the group's landing page.
    pub link: String,
    /// Optional display label overriding the landing page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child document paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}
