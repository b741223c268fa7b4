//! Site initialization.
//!
//! `vitae init [NAME]` writes a ready-to-build site:
//!
//! ```text
//! <root>/
//! ├── vitae.toml          serialized defaults
//! ├── catalog.toml        sample entries
//! ├── content/
//! │   ├── projects/agentrial.md
//! │   ├── experiences/
//! │   ├── education/
//! │   └── achievements/
//! ├── assets/
//! ├── .gitignore
//! └── .ignore
//! ```

use crate::{catalog::Category, config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Sample catalog with one entry per category
const SAMPLE_CATALOG: &str = include_str!("embed/init/catalog.toml");

/// Sample document for the `agentrial` project
const SAMPLE_DOCUMENT: &str = include_str!("embed/init/agentrial.md");

/// Create a new site at the configured root.
///
/// Without a name the current directory must be empty.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `vitae init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(config)?;
    init_default_config(&config.config_path)?;
    write_new(&config.build.catalog, SAMPLE_CATALOG)?;
    write_new(
        &config
            .build
            .content
            .join(Category::Projects.dir_name())
            .join("agentrial.md"),
        SAMPLE_DOCUMENT,
    )?;
    init_ignored_files(root, &[config.build.output.as_path()])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    write_new(path, &content)
}

/// Create the content category directories and the assets directory.
fn init_site_structure(config: &SiteConfig) -> Result<()> {
    let content = &config.build.content;
    let dirs = Category::ALL
        .iter()
        .map(|c| content.join(c.dir_name()))
        .chain([config.build.assets.clone()]);

    for path in dirs {
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `vitae init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write `content` to `path`, refusing to overwrite.
fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        bail!("`{}` already exists", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write ignore files listing `paths` relative to `root`.
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .map(|&p| p.strip_prefix(root).unwrap_or(p))
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{p}/"))
        .collect::<Vec<_>>()
        .join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, format!("{content}\n"))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::Catalog, resolver::ContentResolver};
    use tempfile::TempDir;

    fn config(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.rebase_paths(root);
        config.config_path = config.get_root().join("vitae.toml");
        config
    }

    #[test]
    fn test_new_site_layout() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path());
        new_site(&config, false).unwrap();

        let root = dir.path();
        assert!(root.join("vitae.toml").is_file());
        assert!(root.join("catalog.toml").is_file());
        assert!(root.join("assets").is_dir());
        for category in Category::ALL {
            assert!(root.join("content").join(category.dir_name()).is_dir());
        }
        assert_eq!(fs::read_to_string(root.join(".gitignore")).unwrap(), "/public/\n");
    }

    #[test]
    fn test_scaffold_is_consistent() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path());
        new_site(&config, false).unwrap();

        let written = SiteConfig::from_path(&dir.path().join("vitae.toml")).unwrap();
        assert_eq!(written.content.fallback, "Page not found");

        let catalog = Catalog::load(&dir.path().join("catalog.toml")).unwrap();
        assert!(catalog.find(Category::Projects, "agentrial").is_some());

        let resolver = ContentResolver::new(&catalog, &config.build.content, "");
        assert!(resolver.has_document(Category::Projects, "agentrial"));
        assert!(!resolver.has_document(Category::Education, "msc-computer-engineering"));
    }

    #[test]
    fn test_refuses_non_empty_dir_without_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let err = new_site(&config(dir.path()), false).unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }

    #[test]
    fn test_refuses_existing_content_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("content/projects")).unwrap();

        assert!(new_site(&config(dir.path()), true).is_err());
    }
}
