//! `vitae check`: report which entries have documents.
//!
//! Loads the catalog, computes the presence map and lists every id that
//! would fall back. Documents that no catalog entry refers to are reported
//! as orphans.

use crate::{
    assets::collect_all_files,
    catalog::{Catalog, Category},
    config::SiteConfig,
    log,
    resolver::{ContentResolver, PresenceRow},
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything `check` knows about the content directory.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub entries: Vec<PresenceRow<'a>>,
    /// `.md` files under a category directory with no catalog entry
    pub orphans: Vec<PathBuf>,
}

impl<'a> CheckReport<'a> {
    pub fn fallbacks(&self) -> impl Iterator<Item = &PresenceRow<'a>> {
        self.entries.iter().filter(|row| !row.document)
    }
}

/// Build the report for `catalog` against `content_dir`.
pub fn report<'a>(resolver: &ContentResolver<'a>, content_dir: &Path) -> CheckReport<'a> {
    let catalog = resolver.catalog();
    let entries = catalog
        .all_entries()
        .map(|entry| PresenceRow {
            category: entry.category(),
            id: entry.id(),
            document: resolver.has_document(entry.category(), entry.id()),
        })
        .collect();

    let mut orphans: Vec<PathBuf> = Category::ALL
        .into_iter()
        .flat_map(|category| {
            collect_all_files(&content_dir.join(category.dir_name()))
                .into_iter()
                .filter(move |path| is_orphan(catalog, category, content_dir, path))
        })
        .collect();
    orphans.sort();

    CheckReport { entries, orphans }
}

/// A markdown file whose stem is not an id of `category`.
fn is_orphan(catalog: &Catalog, category: Category, content_dir: &Path, path: &Path) -> bool {
    if path.extension().is_none_or(|ext| ext != "md") {
        return false;
    }
    // Nested files can never be resolved
    if path.parent() != Some(content_dir.join(category.dir_name()).as_path()) {
        return true;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_none_or(|id| catalog.find(category, id).is_none())
}

/// Run `vitae check`.
pub fn check_site(config: &SiteConfig, json: bool) -> Result<()> {
    let catalog = Catalog::load(&config.build.catalog)
        .with_context(|| format!("Failed to load {}", config.build.catalog.display()))?;
    let resolver = ContentResolver::from_config(&catalog, config);
    let report = report(&resolver, &config.build.content);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for category in Category::ALL {
        let rows: Vec<_> = report
            .entries
            .iter()
            .filter(|row| row.category == category)
            .collect();
        if rows.is_empty() {
            continue;
        }
        let documented = rows.iter().filter(|row| row.document).count();
        log!("check"; "{}: {}/{} with documents", category, documented, rows.len());
    }

    for row in report.fallbacks() {
        log!("fallback"; "{}/{}", row.category, row.id);
    }

    let root = config.get_root();
    for orphan in &report.orphans {
        log!("warn"; "orphan document {}", orphan.strip_prefix(root).unwrap_or(orphan).display());
    }

    log!(
        "check";
        "{} entries, {} fallbacks, {} orphans",
        report.entries.len(),
        report.fallbacks().count(),
        report.orphans.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
        [[projects]]
        id = "agentrial"
        title = "Agentrial"
        description = "Statistical evaluation harness for LLM agents"
        period = "2025"

        [[education]]
        id = "msc-computer-engineering"
        degree = "M.Sc. Computer Engineering"
        institution = "Politecnico di Milano"
        period = "2024 - 2026"
        description = "AI and HPC track"
    "#;

    fn content_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let projects = dir.path().join("projects");
        fs::create_dir_all(projects.join("drafts")).unwrap();
        fs::write(projects.join("agentrial.md"), "# Agentrial\n\nDetails.").unwrap();
        fs::write(projects.join("old-project.md"), "# Old").unwrap();
        fs::write(projects.join("drafts").join("agentrial.md"), "# Draft").unwrap();
        fs::write(projects.join("cover.png"), b"png").unwrap();
        dir
    }

    #[test]
    fn test_report_presence() {
        let dir = content_dir();
        let catalog = Catalog::from_str(CATALOG).unwrap();
        let resolver = ContentResolver::new(&catalog, dir.path(), "Page not found");

        let report = report(&resolver, dir.path());
        assert_eq!(report.entries.len(), 2);

        let fallbacks: Vec<_> = report.fallbacks().map(|r| r.id).collect();
        assert_eq!(fallbacks, vec!["msc-computer-engineering"]);
    }

    #[test]
    fn test_report_orphans() {
        let dir = content_dir();
        let catalog = Catalog::from_str(CATALOG).unwrap();
        let resolver = ContentResolver::new(&catalog, dir.path(), "Page not found");

        let report = report(&resolver, dir.path());
        let projects = dir.path().join("projects");
        assert_eq!(
            report.orphans,
            vec![
                projects.join("drafts").join("agentrial.md"),
                projects.join("old-project.md"),
            ]
        );
    }

    #[test]
    fn test_report_json_shape() {
        let dir = content_dir();
        let catalog = Catalog::from_str(CATALOG).unwrap();
        let resolver = ContentResolver::new(&catalog, dir.path(), "");

        let report = report(&resolver, dir.path());
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["entries"][0]["category"], "projects");
        assert_eq!(value["entries"][0]["id"], "agentrial");
        assert_eq!(value["entries"][0]["document"], true);
        assert_eq!(value["entries"][1]["document"], false);
    }

    #[test]
    fn test_report_without_content_dir() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::from_str(CATALOG).unwrap();
        let missing = dir.path().join("content");
        let resolver = ContentResolver::new(&catalog, &missing, "");

        let report = report(&resolver, &missing);
        assert_eq!(report.fallbacks().count(), 2);
        assert!(report.orphans.is_empty());
    }
}
