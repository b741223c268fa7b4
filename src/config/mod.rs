//! Site configuration management for `vitae.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site owner metadata (title, author, links)       |
//! | `[build]`   | Content, catalog, output paths and minification  |
//! | `[content]` | Fallback body for entries without a document     |
//! | `[serve]`   | Development server (port, interface, watch)      |
//! | `[extra]`   | User-defined custom fields                       |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Jane Doe"
//! description = "Engineer and researcher"
//!
//! [build]
//! content = "content"
//! output = "public"
//! catalog = "catalog.toml"
//!
//! [content]
//! fallback = "Page not found"
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
mod content;
pub mod defaults;
mod error;
mod serve;

use base::BaseConfig;
use build::BuildConfig;
use content::ContentConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Component, Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing vitae.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Missing-document behavior
    #[serde(default)]
    pub content: ContentConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Read the config file named on the command line and apply CLI overrides.
    ///
    /// A missing file yields the defaults; callers decide whether that is an error.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Directory that receives the generated pages, including `base_path`.
    pub fn output_dir(&self) -> PathBuf {
        self.build.output.join(&self.build.base_path)
    }

    /// URL prefix prepended to every internal link.
    ///
    /// `""` → `/`, `portfolio` → `/portfolio/`
    pub fn url_prefix(&self) -> String {
        let base = self.build.base_path.to_string_lossy().replace('\\', "/");
        let base = base.trim_matches('/');
        if base.is_empty() {
            "/".to_owned()
        } else {
            format!("/{base}/")
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        self.update_path_with_root(&root);

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.base_path, args.base_path.as_ref());
            self.build.clean |= args.clean;
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let Some(cli) = self.cli else {
            self.rebase_paths(root);
            return;
        };

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        self.rebase_paths(root);
        self.config_path = Self::normalize_path(&self.get_root().join(&cli.config));
    }

    /// Join every configured directory onto `root`.
    pub fn rebase_paths(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.catalog = Self::normalize_path(&root.join(&self.build.catalog));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::invalid(
                "base.url",
                "must start with http:// or https://"
            ));
        }

        let escapes_output = self
            .build
            .base_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes_output {
            bail!(ConfigError::invalid(
                "build.base_path",
                "must be a relative path without `..`"
            ));
        }

        if !self.build.catalog.is_file() {
            bail!(ConfigError::invalid(
                "build.catalog",
                format!("`{}` not found", self.build.catalog.display())
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
