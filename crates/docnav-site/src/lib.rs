//! Locale-aware site navigation for docnav.
//!
//! This crate provides:
//! - [`Site`]: the base configuration plus every locale's merged configuration
//! - [`Navigation`]: the render-ready view of one route
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_config::Config;
//! use docnav_site::Site;
//!
//! let config = Config::load(None, None)?;
//! let site = Site::new(&config);
//!
//! // Sidebar, nav bar and locale switcher for a page
//! let nav = site.navigation("/zh/installation");
//! # Ok(())
//! # }
//! ```

mod navigation;
mod site;

pub use navigation::{LocaleLink, Navigation};
pub use site::{LocaleSite, Site, SiteError};
