//! `[serve]` section configuration.
//!
//! Settings for `vitae serve`. Each field can be overridden on the command
//! line (`-i`, `-p`, `-w`).

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in vitae.toml.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"
/// port = 8080
/// watch = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Address to bind, `127.0.0.1` unless exposed on the LAN.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// First port tried; the next free one is used when taken.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Rebuild when content, catalog, assets or config change.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}
