//! `[build]` section configuration.
//!
//! Paths and output options for the build step.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in vitae.toml.
///
/// All paths are relative to the project root until
/// [`SiteConfig::update_with_cli`](super::SiteConfig::update_with_cli)
/// rebases them.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"
/// output = "public"
/// catalog = "catalog.toml"
/// base_path = "portfolio"   # site served from /portfolio/
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Root directory path
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// URL path prefix for every generated link, e.g.: "portfolio"
    #[serde(default = "defaults::build::base_path")]
    #[educe(Default = defaults::build::base_path())]
    pub base_path: PathBuf,

    /// Markdown documents directory (relative to root)
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory path (relative to root)
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets copied verbatim into the output (relative to root)
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Catalog file listing every project, experience, education and achievement
    #[serde(default = "defaults::build::catalog")]
    #[educe(Default = defaults::build::catalog())]
    pub catalog: PathBuf,

    /// Minify HTML output
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Clear output directory before building
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,
}
