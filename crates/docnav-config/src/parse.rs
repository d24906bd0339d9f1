//! Validation and normalization of raw documents.
//!
//! [`SiteConfig::parse`] and [`ConfigOverride::parse`] share one [`Validator`]
//! so a locale override is held to the same rules as the base document. Checks
//! run in a fixed order (`title`, `theme`, `root`, `plugins`, `nav`,
//! `sidebar`, `github`) and stop at the first failure; no partial result is
//! ever returned.

use std::collections::HashSet;

use docnav_storage::Storage;
use indexmap::IndexMap;

use crate::ConfigError;
use crate::document::{NavLinkDocument, SiteDocument};
use crate::merge::ConfigOverride;
use crate::model::{Align, FALLBACK_ROUTE, NavLink, Sidebar, SidebarEntry, SiteConfig};

impl SiteConfig {
    /// Validate a raw document and build a normalized site configuration.
    ///
    /// Applies defaults (`root` becomes `/`, nav `align` becomes `left`) and
    /// sorts nav links into rendered order. Every document path referenced by
    /// the sidebar, and every nav link ending in `.md`, must exist in `storage`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: [`ConfigError::MissingField`],
    /// [`ConfigError::DuplicatePlugin`], [`ConfigError::InvalidRoute`],
    /// [`ConfigError::DanglingReference`] or [`ConfigError::MalformedUrl`].
    pub fn parse(document: SiteDocument, storage: &dyn Storage) -> Result<Self, ConfigError> {
        Validator::new(String::new(), storage).site(document)
    }
}

impl ConfigOverride {
    /// Validate a partial document for use with [`SiteConfig::merge`].
    ///
    /// Absent fields stay absent. Present fields follow the same rules as
    /// [`SiteConfig::parse`], except that the sidebar need not contain `"/"`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, as for [`SiteConfig::parse`].
    pub fn parse(document: SiteDocument, storage: &dyn Storage) -> Result<Self, ConfigError> {
        Validator::new(String::new(), storage).overlay(document)
    }
}

/// Field-path aware validator.
pub(crate) struct Validator<'a> {
    /// Prepended to every field path in errors (e.g. `locales.zh.`).
    prefix: String,
    storage: &'a dyn Storage,
}

impl<'a> Validator<'a> {
    pub(crate) fn new(prefix: String, storage: &'a dyn Storage) -> Self {
        Self { prefix, storage }
    }

    fn field(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    pub(crate) fn site(&self, document: SiteDocument) -> Result<SiteConfig, ConfigError> {
        let title = self.required(document.title, "title")?;
        let theme = self.required(document.theme, "theme")?;
        let root = self.root(document.root)?.unwrap_or_else(|| "/".to_owned());
        let plugins = self.plugins(document.plugins.unwrap_or_default())?;
        let nav = self.nav(document.nav.unwrap_or_default())?;
        let sidebar = self.sidebar(document.sidebar.unwrap_or_default(), true)?;
        let github = self.github(document.github)?;

        Ok(SiteConfig {
            title,
            theme,
            root,
            plugins,
            nav,
            sidebar,
            github,
        })
    }

    pub(crate) fn overlay(&self, document: SiteDocument) -> Result<ConfigOverride, ConfigError> {
        let title = document
            .title
            .map(|t| self.required(Some(t), "title"))
            .transpose()?;
        let theme = document
            .theme
            .map(|t| self.required(Some(t), "theme"))
            .transpose()?;
        let root = self.root(document.root)?;
        let plugins = document.plugins.map(|p| self.plugins(p)).transpose()?;
        let nav = document.nav.map(|n| self.nav(n)).transpose()?;
        let sidebar = document
            .sidebar
            .map(|s| self.sidebar(s, false))
            .transpose()?
            .unwrap_or_default();
        let github = self.github(document.github)?;

        Ok(ConfigOverride {
            title,
            theme,
            root,
            plugins,
            nav,
            sidebar,
            github,
        })
    }

    /// Require a string field to be present and non-blank.
    fn required(&self, value: Option<String>, name: &str) -> Result<String, ConfigError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingField {
                field: self.field(name),
            }),
        }
    }

    /// Normalize `root` to start and end with `/`.
    fn root(&self, value: Option<String>) -> Result<Option<String>, ConfigError> {
        let Some(root) = value else {
            return Ok(None);
        };

        if !root.starts_with('/') || root.chars().any(char::is_whitespace) {
            return Err(ConfigError::MalformedUrl {
                field: self.field("root"),
                value: root,
            });
        }

        if root.ends_with('/') {
            Ok(Some(root))
        } else {
            Ok(Some(format!("{root}/")))
        }
    }

    fn plugins(&self, plugins: Vec<String>) -> Result<Vec<String>, ConfigError> {
        let mut seen = HashSet::with_capacity(plugins.len());

        for (i, plugin) in plugins.iter().enumerate() {
            if plugin.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: self.field(&format!("plugins[{i}]")),
                });
            }
            if !seen.insert(plugin.as_str()) {
                return Err(ConfigError::DuplicatePlugin {
                    field: self.field(&format!("plugins[{i}]")),
                    plugin: plugin.clone(),
                });
            }
        }

        Ok(plugins)
    }

    /// Validate nav links and return them in rendered order.
    fn nav(&self, links: Vec<NavLinkDocument>) -> Result<Vec<NavLink>, ConfigError> {
        let mut left = Vec::with_capacity(links.len());
        let mut right = Vec::new();

        for (i, link) in links.into_iter().enumerate() {
            let text = self.required(link.text, &format!("nav[{i}].text"))?;
            let name = format!("nav[{i}].link");
            let target = self.required(link.link, &name)?;

            if !is_valid_link(&target) {
                return Err(ConfigError::MalformedUrl {
                    field: self.field(&name),
                    value: target,
                });
            }
            if let Some(path) = document_path(&target) {
                self.document_exists(path, &name)?;
            }

            let align = link.align.unwrap_or_default();
            let link = NavLink {
                text,
                link: target,
                align,
            };
            match align {
                Align::Left => left.push(link),
                Align::Right => right.push(link),
            }
        }

        left.append(&mut right);
        Ok(left)
    }

    fn sidebar(
        &self,
        sidebar: IndexMap<String, Vec<SidebarEntry>>,
        require_fallback: bool,
    ) -> Result<Sidebar, ConfigError> {
        for (route, entries) in &sidebar {
            let name = format!("sidebar[\"{route}\"]");

            if !route.starts_with('/') {
                return Err(self.invalid_route(&name, route, "route must start with '/'"));
            }
            if entries.is_empty() {
                return Err(self.invalid_route(&name, route, "route has no entries"));
            }

            for (i, entry) in entries.iter().enumerate() {
                self.entry(entry, &format!("{name}[{i}]"))?;
            }
        }

        if require_fallback && !sidebar.contains_key(FALLBACK_ROUTE) {
            return Err(self.invalid_route(
                "sidebar",
                FALLBACK_ROUTE,
                "fallback route is missing",
            ));
        }

        Ok(sidebar)
    }

    fn entry(&self, entry: &SidebarEntry, name: &str) -> Result<(), ConfigError> {
        match entry {
            SidebarEntry::Leaf(path) => self.sidebar_path(path, name),
            SidebarEntry::Group(group) => {
                let link_name = format!("{name}.link");
                self.sidebar_path(&group.link, &link_name)?;
                if let Some(text) = &group.text {
                    self.required(Some(text.clone()), &format!("{name}.text"))?;
                }
                for (i, child) in group.children.iter().enumerate() {
                    self.sidebar_path(child, &format!("{name}.children[{i}]"))?;
                }
                Ok(())
            }
        }
    }

    /// Sidebar paths are documents unless they are external URLs.
    fn sidebar_path(&self, path: &str, name: &str) -> Result<(), ConfigError> {
        if path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: self.field(name),
            });
        }

        if strip_http_scheme(path).is_some() {
            if !is_valid_link(path) {
                return Err(ConfigError::MalformedUrl {
                    field: self.field(name),
                    value: path.to_owned(),
                });
            }
            return Ok(());
        }

        self.document_exists(path, name)
    }

    fn document_exists(&self, path: &str, name: &str) -> Result<(), ConfigError> {
        if self.storage.exists(path) {
            Ok(())
        } else {
            Err(ConfigError::DanglingReference {
                field: self.field(name),
                path: path.to_owned(),
            })
        }
    }

    /// Require `http(s)://host/owner[/repo]`.
    fn github(&self, value: Option<String>) -> Result<Option<String>, ConfigError> {
        let Some(url) = value else {
            return Ok(None);
        };

        if is_repository_url(&url) {
            Ok(Some(url))
        } else {
            Err(ConfigError::MalformedUrl {
                field: self.field("github"),
                value: url,
            })
        }
    }

    fn invalid_route(&self, name: &str, route: &str, reason: &'static str) -> ConfigError {
        ConfigError::InvalidRoute {
            field: self.field(name),
            route: route.to_owned(),
            reason,
        }
    }
}

/// Return the part after `http://` or `https://`.
fn strip_http_scheme(value: &str) -> Option<&str> {
    value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
}

/// Host portion of a URL with the scheme already stripped.
fn host(rest: &str) -> &str {
    rest.split(['/', '?', '#']).next().unwrap_or_default()
}

/// Accept `http(s)` URLs with a host, `mailto:` addresses, and plain paths.
fn is_valid_link(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    if let Some(rest) = strip_http_scheme(value) {
        return !host(rest).is_empty();
    }

    if let Some(address) = value.strip_prefix("mailto:") {
        return address.contains('@');
    }

    // Any other scheme is not something the site can link to.
    !value.contains("://")
}

/// Markdown source file a link points at, without its query or fragment.
fn document_path(value: &str) -> Option<&str> {
    if strip_http_scheme(value).is_some() || value.starts_with("mailto:") {
        return None;
    }
    value
        .split(['?', '#'])
        .next()
        .filter(|path| path.ends_with(".md"))
}

fn is_repository_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(rest) = strip_http_scheme(value) else {
        return false;
    };

    let mut parts = rest.split('/');
    let host = parts.next().unwrap_or_default();
    let segments = parts.filter(|s| !s.is_empty()).count();

    !host.is_empty() && (1..=2).contains(&segments)
}

#[cfg(test)]
mod tests {
    use docnav_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn storage() -> MockStorage {
        MockStorage::new().with_documents([
            "README.md",
            "installation.md",
            "connection.md",
            "client.md",
            "guide/index.md",
            "guide/setup.md",
        ])
    }

    fn document(json: &str) -> SiteDocument {
        serde_json::from_str(json).unwrap()
    }

    fn minimal() -> SiteDocument {
        document(r#"{"title": "Docs", "theme": "docs", "sidebar": {"/": ["README.md"]}}"#)
    }

    fn parse(json: &str) -> Result<SiteConfig, ConfigError> {
        SiteConfig::parse(document(json), &storage())
    }

    #[test]
    fn test_parse_minimal_applies_defaults() {
        let config = SiteConfig::parse(minimal(), &storage()).unwrap();

        assert_eq!(config.title(), "Docs");
        assert_eq!(config.theme(), "docs");
        assert_eq!(config.root(), "/");
        assert!(config.plugins().is_empty());
        assert!(config.nav().is_empty());
        assert!(config.github().is_none());
    }

    #[test]
    fn test_parse_full_document() {
        let config = parse(
            r#"{
                "title": "Dorea DB Docs",
                "theme": "docs",
                "root": "/Dorea",
                "plugins": ["i18n", "sidebar", "prev_next"],
                "nav": [{"text": "Team", "link": "https://github.com/doreadb/", "align": "right"}],
                "sidebar": {"/": [
                    "README.md",
                    {"link": "installation.md"},
                    {"link": "guide/index.md", "text": "Guide", "children": ["guide/setup.md"]}
                ]},
                "github": "https://github.com/mrxiaozhuox/Dorea"
            }"#,
        )
        .unwrap();

        assert_eq!(config.root(), "/Dorea/");
        assert_eq!(config.plugins(), &["i18n", "sidebar", "prev_next"]);
        assert_eq!(config.nav()[0].align, Align::Right);
        assert_eq!(config.sidebar()["/"].len(), 3);
        assert_eq!(
            config.github(),
            Some("https://github.com/mrxiaozhuox/Dorea")
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(
            r#"{
                "title": "Docs",
                "theme": "docs",
                "root": "/base",
                "plugins": ["sidebar"],
                "nav": [
                    {"text": "A", "link": "/a/", "align": "left"},
                    {"text": "B", "link": "https://example.com", "align": "right"},
                    {"text": "C", "link": "/c/"}
                ],
                "sidebar": {
                    "/": ["README.md"],
                    "/guide/": [{"link": "guide/index.md", "children": ["guide/setup.md"]}]
                },
                "github": "https://github.com/doreadb/Dorea"
            }"#,
        )
        .unwrap();

        let serialized = serde_json::to_string(&first).unwrap();
        let second = SiteConfig::parse(document(&serialized), &storage()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_title() {
        let err = parse(r#"{"theme": "docs", "sidebar": {"/": ["README.md"]}}"#).unwrap_err();

        assert!(
            matches!(&err, ConfigError::MissingField { field } if field == "title"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_blank_theme() {
        let err = parse(r#"{"title": "Docs", "theme": "  ", "sidebar": {"/": ["README.md"]}}"#)
            .unwrap_err();

        assert!(matches!(&err, ConfigError::MissingField { field } if field == "theme"));
    }

    #[test]
    fn test_duplicate_plugin() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs",
                "plugins": ["i18n", "sidebar", "i18n"],
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap_err();

        match err {
            ConfigError::DuplicatePlugin { field, plugin } => {
                assert_eq!(plugin, "i18n");
                assert_eq!(field, "plugins[2]");
            }
            other => panic!("Expected DuplicatePlugin, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_plugin_id() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs", "plugins": [""],
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap_err();

        assert!(matches!(&err, ConfigError::MissingField { field } if field == "plugins[0]"));
    }

    #[test]
    fn test_missing_fallback_route() {
        let err = parse(r#"{"title": "Docs", "theme": "docs", "sidebar": {"/docs/": ["README.md"]}}"#)
            .unwrap_err();

        assert!(
            matches!(&err, ConfigError::InvalidRoute { route, .. } if route == "/"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_missing_sidebar_is_invalid_route() {
        let err = parse(r#"{"title": "Docs", "theme": "docs"}"#).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidRoute { .. }));
    }

    #[test]
    fn test_route_without_leading_slash() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs",
                "sidebar": {"/": ["README.md"], "docs/": ["client.md"]}}"#,
        )
        .unwrap_err();

        match err {
            ConfigError::InvalidRoute { field, route, .. } => {
                assert_eq!(route, "docs/");
                assert_eq!(field, "sidebar[\"docs/\"]");
            }
            other => panic!("Expected InvalidRoute, got {other:?}"),
        }
    }

    #[test]
    fn test_route_with_no_entries() {
        let err = parse(r#"{"title": "Docs", "theme": "docs", "sidebar": {"/": []}}"#).unwrap_err();

        assert!(err.to_string().contains("no entries"));
    }

    #[test]
    fn test_dangling_leaf() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs", "sidebar": {"/": ["README.md", "missing.md"]}}"#,
        )
        .unwrap_err();

        match err {
            ConfigError::DanglingReference { field, path } => {
                assert_eq!(field, "sidebar[\"/\"][1]");
                assert_eq!(path, "missing.md");
            }
            other => panic!("Expected DanglingReference, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_group_child() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs",
                "sidebar": {"/": [{"link": "guide/index.md", "children": ["guide/gone.md"]}]}}"#,
        )
        .unwrap_err();

        assert!(
            matches!(&err, ConfigError::DanglingReference { field, .. }
                if field == "sidebar[\"/\"][0].children[0]"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_sidebar_external_link_not_checked() {
        let config = parse(
            r#"{"title": "Docs", "theme": "docs",
                "sidebar": {"/": ["README.md", "https://crates.io/crates/dorea"]}}"#,
        )
        .unwrap();

        assert_eq!(config.sidebar()["/"].len(), 2);
    }

    #[test]
    fn test_nav_alignment_order() {
        let config = parse(
            r#"{"title": "Docs", "theme": "docs",
                "nav": [
                    {"text": "A", "link": "/a/", "align": "left"},
                    {"text": "B", "link": "/b/", "align": "right"},
                    {"text": "C", "link": "/c/", "align": "left"}
                ],
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap();

        let order: Vec<_> = config.nav().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(order, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_nav_missing_text() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs", "nav": [{"link": "/a/"}],
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap_err();

        assert!(matches!(&err, ConfigError::MissingField { field } if field == "nav[0].text"));
    }

    #[test]
    fn test_nav_malformed_link() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs",
                "nav": [{"text": "Bad", "link": "https:// spaced out"}],
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap_err();

        assert!(
            matches!(&err, ConfigError::MalformedUrl { field, .. } if field == "nav[0].link"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_nav_document_link_checked() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs",
                "nav": [{"text": "FAQ", "link": "/faq.md"}],
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::DanglingReference { .. }));
    }

    #[test]
    fn test_nav_document_link_with_fragment() {
        let config = parse(
            r#"{"title": "Docs", "theme": "docs",
                "nav": [{"text": "Setup", "link": "/guide/setup.md#install"}],
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap();

        assert_eq!(config.nav()[0].link, "/guide/setup.md#install");
    }

    #[test]
    fn test_nav_dangling_link_with_fragment() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs",
                "nav": [{"text": "FAQ", "link": "/faq.md#top"}],
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap_err();

        match err {
            ConfigError::DanglingReference { field, path } => {
                assert_eq!(field, "nav[0].link");
                assert_eq!(path, "/faq.md");
            }
            other => panic!("Expected DanglingReference, got {other:?}"),
        }
    }

    #[test]
    fn test_root_without_leading_slash() {
        let err = parse(
            r#"{"title": "Docs", "theme": "docs", "root": "Dorea/",
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap_err();

        assert!(matches!(&err, ConfigError::MalformedUrl { field, .. } if field == "root"));
    }

    #[test]
    fn test_github_malformed() {
        for url in [
            "github.com/doreadb/Dorea",
            "https://",
            "https://github.com",
            "https://github.com/a/b/c",
            "ftp://github.com/doreadb",
        ] {
            let json = format!(
                r#"{{"title": "Docs", "theme": "docs", "github": "{url}",
                    "sidebar": {{"/": ["README.md"]}}}}"#
            );
            let err = parse(&json).unwrap_err();
            assert!(
                matches!(&err, ConfigError::MalformedUrl { field, .. } if field == "github"),
                "Expected MalformedUrl for {url}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_github_owner_only_is_valid() {
        let config = parse(
            r#"{"title": "Docs", "theme": "docs", "github": "https://github.com/doreadb/",
                "sidebar": {"/": ["README.md"]}}"#,
        )
        .unwrap();

        assert_eq!(config.github(), Some("https://github.com/doreadb/"));
    }

    #[test]
    fn test_validation_order_reports_title_first() {
        let err = parse(r#"{"plugins": ["a", "a"], "sidebar": {}}"#).unwrap_err();

        assert!(matches!(&err, ConfigError::MissingField { field } if field == "title"));
    }

    #[test]
    fn test_prefixed_field_paths() {
        let empty = MockStorage::new();
        let validator = Validator::new("locales.zh.".to_owned(), &empty);
        let err = validator
            .overlay(document(r#"{"sidebar": {"/": ["README.md"]}}"#))
            .unwrap_err();

        assert!(
            matches!(&err, ConfigError::DanglingReference { field, .. }
                if field == "locales.zh.sidebar[\"/\"][0]"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_override_does_not_require_fallback() {
        let overlay = ConfigOverride::parse(
            document(r#"{"sidebar": {"/guide/": ["guide/setup.md"]}}"#),
            &storage(),
        )
        .unwrap();

        assert!(overlay.sidebar().contains_key("/guide/"));
        assert!(overlay.title().is_none());
    }

    #[test]
    fn test_override_validates_present_fields() {
        let err = ConfigOverride::parse(document(r#"{"plugins": ["x", "x"]}"#), &storage())
            .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicatePlugin { .. }));
    }

    #[test]
    fn test_is_valid_link() {
        assert!(is_valid_link("https://github.com/doreadb/"));
        assert!(is_valid_link("/docs/"));
        assert!(is_valid_link("installation.md"));
        assert!(is_valid_link("mailto:team@dorea.dev"));
        assert!(!is_valid_link("https://"));
        assert!(!is_valid_link("ftp://example.com"));
        assert!(!is_valid_link("mailto:nobody"));
        assert!(!is_valid_link("/with space/"));
    }

    #[test]
    fn test_document_path() {
        assert_eq!(document_path("client.md"), Some("client.md"));
        assert_eq!(
            document_path("/guide/setup.md#install"),
            Some("/guide/setup.md")
        );
        assert_eq!(document_path("client.md?tab=rust"), Some("client.md"));
        assert_eq!(document_path("/guide/"), None);
        assert_eq!(document_path("https://example.com/README.md"), None);
    }
}
