//! Errors raised while loading `vitae.toml`.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid vitae.toml")]
    Parse(#[from] toml::de::Error),

    /// A value that parsed but cannot be built with.
    #[error("invalid config [{key}]: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vitae.toml");

        let err = SiteConfig::from_path(&path).unwrap_err();
        let err = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(err, ConfigError::Read { path: p, .. } if *p == path));
        assert!(err.to_string().starts_with("cannot read config `"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = SiteConfig::from_str("[base").unwrap_err();
        let err = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert_eq!(err.to_string(), "invalid vitae.toml");
    }

    #[test]
    fn test_invalid_names_the_key() {
        let err = ConfigError::invalid("build.base_path", "must be relative");
        assert_eq!(err.to_string(), "invalid config [build.base_path]: must be relative");
    }
}
