//! `[base]` section configuration.
//!
//! Contains the site owner's identity: name, description, contact links.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in vitae.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Jane Doe"
/// description = "Engineer building GPU kernels and open-source tools."
/// author = "Jane Doe"
///
/// [[base.links]]
/// label = "GitHub"
/// url = "https://github.com/janedoe"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in browser tab and header.
    pub title: String,

    /// Author name, shown as the hero heading.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Contact email, rendered as a `mailto:` link in the header.
    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    /// Short introduction shown below the author name.
    pub description: String,

    /// Public URL of the deployed site.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code (e.g., "en", "it-IT").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Copyright notice for site footer.
    #[serde(default)]
    pub copyright: String,

    /// Social/profile links shown in the header.
    #[serde(default)]
    pub links: Vec<SocialLink>,
}

/// A labelled external profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Alessandro"
            description = "Portfolio"
            url = "https://example.dev"
            language = "it-IT"
            copyright = "2025 Alessandro"

            [[base.links]]
            label = "GitHub"
            url = "https://github.com/example"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Alessandro");
        assert_eq!(config.base.description, "Portfolio");
        assert_eq!(config.base.url, Some("https://example.dev".to_string()));
        assert_eq!(config.base.language, "it-IT");
        assert_eq!(config.base.copyright, "2025 Alessandro");
        assert_eq!(config.base.links.len(), 1);
        assert_eq!(config.base.links[0].label, "GitHub");
    }

    #[test]
    fn test_base_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test portfolio"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.author, "<YOUR_NAME>");
        assert_eq!(config.base.email, "user@noreply.vitae");
        assert_eq!(config.base.language, "en");
        assert_eq!(config.base.url, None);
        assert_eq!(config.base.copyright, "");
        assert!(config.base.links.is_empty());
    }

    #[test]
    fn test_unknown_field_rejection_in_base() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }
}
