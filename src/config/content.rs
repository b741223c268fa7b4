//! `[content]` section configuration.
//!
//! Controls what a page shows when its markdown document is missing.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[content]` section in vitae.toml.
///
/// The fallback is one literal applied to every category. An empty string
/// renders the page with no body.
///
/// # Example
/// ```toml
/// [content]
/// fallback = "Write-up coming soon."
/// log_fallbacks = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Body used for entries without `content/<category>/<id>.md`.
    #[serde(default = "defaults::content::fallback")]
    #[educe(Default = defaults::content::fallback())]
    pub fallback: String,

    /// Log every entry that fell back during a build.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub log_fallbacks: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_content_config_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
        "#,
        )
        .unwrap();

        assert_eq!(config.content.fallback, "Page not found");
        assert!(config.content.log_fallbacks);
    }

    #[test]
    fn test_content_config_empty_fallback() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [content]
            fallback = ""
            log_fallbacks = false
        "#,
        )
        .unwrap();

        assert_eq!(config.content.fallback, "");
        assert!(!config.content.log_fallbacks);
    }
}
