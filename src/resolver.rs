//! Content resolution.
//!
//! Maps `(category, id)` to the long-form body of a detail page:
//!
//! ```text
//! resolve(category, id)
//!     │
//!     ├── id not a slug ───────────────► Err(InvalidId)
//!     ├── id not in catalog ───────────► NotFound
//!     ├── content/<dir>/<id>.md exists ► FromFile(raw text)
//!     └── otherwise ───────────────────► FromFallback(config fallback)
//! ```
//!
//! A present-but-unreadable document is an error, never a fallback, so the
//! presence predicate and the resolver always agree.

use crate::{
    catalog::{Catalog, Category, Entry},
    config::SiteConfig,
    utils::slug::{has_path_chars, is_slug},
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Extension of content documents.
const DOCUMENT_EXT: &str = "md";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid {category} id `{id}`: {reason}")]
    InvalidId {
        category: Category,
        id: String,
        reason: &'static str,
    },

    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A catalog entry together with its page body.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    pub entry: Entry<'a>,
    pub content: String,
}

/// Result of resolving one identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOutcome<'a> {
    /// Body is the verbatim text of the markdown document.
    FromFile(Resolved<'a>),
    /// No document exists, body is the configured fallback.
    FromFallback(Resolved<'a>),
    /// The id is not in the catalog.
    NotFound,
}

impl<'a> ContentOutcome<'a> {
    pub fn into_resolved(self) -> Option<Resolved<'a>> {
        match self {
            Self::FromFile(r) | Self::FromFallback(r) => Some(r),
            Self::NotFound => None,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::FromFallback(_))
    }
}

#[cfg(test)]
impl<'a> ContentOutcome<'a> {
    fn resolved(&self) -> Option<&Resolved<'a>> {
        match self {
            Self::FromFile(r) | Self::FromFallback(r) => Some(r),
            Self::NotFound => None,
        }
    }

    const fn is_from_file(&self) -> bool {
        matches!(self, Self::FromFile(_))
    }
}

/// Per-category map of id → "has a markdown document".
pub type PresenceMap = BTreeMap<Category, BTreeMap<String, bool>>;

/// Resolves catalog ids against the content directory.
///
/// Holds only borrowed, immutable state; resolving is safe from any thread.
#[derive(Debug, Clone, Copy)]
pub struct ContentResolver<'a> {
    catalog: &'a Catalog,
    content_dir: &'a Path,
    fallback: &'a str,
}

impl<'a> ContentResolver<'a> {
    pub const fn new(catalog: &'a Catalog, content_dir: &'a Path, fallback: &'a str) -> Self {
        Self {
            catalog,
            content_dir,
            fallback,
        }
    }

    /// Resolver using the content directory and fallback from `config`.
    pub fn from_config(catalog: &'a Catalog, config: &'a SiteConfig) -> Self {
        Self::new(catalog, &config.build.content, &config.content.fallback)
    }

    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Location of the document for `id`, after rejecting malformed ids.
    pub fn document_path(&self, category: Category, id: &str) -> Result<PathBuf, ResolveError> {
        check_id(category, id)?;
        Ok(self
            .content_dir
            .join(category.dir_name())
            .join(format!("{id}.{DOCUMENT_EXT}")))
    }

    /// Whether a markdown document exists for `id`, without reading it.
    ///
    /// Malformed ids answer `false`.
    pub fn has_document(&self, category: Category, id: &str) -> bool {
        self.document_path(category, id)
            .is_ok_and(|path| path.is_file())
    }

    /// Resolve `id` into its page body.
    pub fn resolve(&self, category: Category, id: &str) -> Result<ContentOutcome<'a>, ResolveError> {
        let path = self.document_path(category, id)?;

        let Some(entry) = self.catalog.find(category, id) else {
            return Ok(ContentOutcome::NotFound);
        };

        if !path.is_file() {
            return Ok(ContentOutcome::FromFallback(Resolved {
                entry,
                content: self.fallback.to_owned(),
            }));
        }

        let content = fs::read_to_string(&path).map_err(|source| ResolveError::Read {
            path: path.clone(),
            source,
        })?;

        Ok(ContentOutcome::FromFile(Resolved { entry, content }))
    }

    /// Presence of a document for every catalog entry.
    pub fn presence(&self) -> PresenceMap {
        Category::ALL
            .into_iter()
            .map(|category| {
                let ids = self
                    .catalog
                    .entries(category)
                    .map(|e| (e.id().to_owned(), self.has_document(category, e.id())))
                    .collect();
                (category, ids)
            })
            .collect()
    }
}

/// Reject ids that are not slugs before they reach the filesystem.
fn check_id(category: Category, id: &str) -> Result<(), ResolveError> {
    let reason = if id.is_empty() {
        "empty identifier"
    } else if has_path_chars(id) {
        "path characters are not allowed"
    } else if !is_slug(id) {
        "not a lowercase slug"
    } else {
        return Ok(());
    };

    Err(ResolveError::InvalidId {
        category,
        id: id.to_owned(),
        reason,
    })
}

/// Whether `id` has a document, looked up in a precomputed presence map.
pub fn is_present(presence: &PresenceMap, category: Category, id: &str) -> bool {
    presence
        .get(&category)
        .and_then(|ids| ids.get(id))
        .copied()
        .unwrap_or(false)
}

/// Serializable summary of one entry, for `vitae check --json`.
#[derive(Debug, Serialize)]
pub struct PresenceRow<'a> {
    pub category: Category,
    pub id: &'a str,
    pub document: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
        [[projects]]
        id = "agentrial"
        title = "Agentrial"
        description = "Statistical evaluation harness for LLM agents"
        period = "2025"

        [[experiences]]
        id = "book-author"
        title = "Technical Book Author"
        company = "Neldiritto Editore"
        period = "2025 - Present"
        description = "Textbook"

        [[education]]
        id = "msc-computer-engineering"
        degree = "M.Sc. Computer Engineering"
        institution = "Politecnico di Milano"
        period = "2024 - 2026"
        description = "AI and HPC track"
    "#;

    const FALLBACK: &str = "Page not found";

    fn fixture() -> (TempDir, Catalog) {
        let dir = TempDir::new().unwrap();
        let projects = dir.path().join("projects");
        fs::create_dir_all(&projects).unwrap();
        fs::write(projects.join("agentrial.md"), "# Agentrial\n\nDetails.").unwrap();
        (dir, Catalog::from_str(CATALOG).unwrap())
    }

    #[test]
    fn test_resolves_existing_document_verbatim() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        let outcome = resolver.resolve(Category::Projects, "agentrial").unwrap();
        assert!(outcome.is_from_file());
        let resolved = outcome.into_resolved().unwrap();
        assert_eq!(resolved.content, "# Agentrial\n\nDetails.");
        assert_eq!(resolved.entry.title(), "Agentrial");
        assert!(resolver.has_document(Category::Projects, "agentrial"));
    }

    #[test]
    fn test_missing_document_uses_fallback() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        let outcome = resolver
            .resolve(Category::Education, "msc-computer-engineering")
            .unwrap();
        assert!(outcome.is_fallback());
        assert_eq!(outcome.resolved().unwrap().content, FALLBACK);
        assert!(!resolver.has_document(Category::Education, "msc-computer-engineering"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), "");

        let first = resolver.resolve(Category::Experiences, "book-author").unwrap();
        let second = resolver.resolve(Category::Experiences, "book-author").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.resolved().unwrap().content, "");
    }

    #[test]
    fn test_empty_document_is_not_a_fallback() {
        let (dir, catalog) = fixture();
        let dir_path = dir.path().join("experiences");
        fs::create_dir_all(&dir_path).unwrap();
        fs::write(dir_path.join("book-author.md"), "").unwrap();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        let outcome = resolver.resolve(Category::Experiences, "book-author").unwrap();
        assert!(outcome.is_from_file());
        assert_eq!(outcome.resolved().unwrap().content, "");
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        let outcome = resolver.resolve(Category::Projects, "does-not-exist").unwrap();
        assert_eq!(outcome, ContentOutcome::NotFound);
        assert!(outcome.resolved().is_none());
    }

    #[test]
    fn test_document_without_catalog_entry_is_not_found() {
        let (dir, catalog) = fixture();
        fs::write(dir.path().join("projects").join("orphan.md"), "# Orphan").unwrap();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        let outcome = resolver.resolve(Category::Projects, "orphan").unwrap();
        assert_eq!(outcome, ContentOutcome::NotFound);
    }

    #[test]
    fn test_category_is_part_of_the_key() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        let outcome = resolver.resolve(Category::Education, "agentrial").unwrap();
        assert_eq!(outcome, ContentOutcome::NotFound);
        assert!(!resolver.has_document(Category::Education, "agentrial"));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        for id in ["../projects/agentrial", "..", "a/b", "agentrial.md", ""] {
            let err = resolver.resolve(Category::Projects, id).unwrap_err();
            assert!(matches!(err, ResolveError::InvalidId { .. }), "{id}");
            assert!(!resolver.has_document(Category::Projects, id), "{id}");
        }
    }

    #[test]
    fn test_rejects_uppercase_id() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        let err = resolver.resolve(Category::Projects, "Agentrial").unwrap_err();
        assert!(err.to_string().contains("not a lowercase slug"));
    }

    #[test]
    fn test_directory_named_like_document_is_absent() {
        let (dir, catalog) = fixture();
        fs::create_dir_all(dir.path().join("education").join("msc-computer-engineering.md"))
            .unwrap();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        assert!(!resolver.has_document(Category::Education, "msc-computer-engineering"));
        let outcome = resolver
            .resolve(Category::Education, "msc-computer-engineering")
            .unwrap();
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_invalid_utf8_document_is_an_error() {
        let (dir, catalog) = fixture();
        fs::write(dir.path().join("projects").join("agentrial.md"), [0xff, 0xfe, 0x00]).unwrap();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);

        let err = resolver.resolve(Category::Projects, "agentrial").unwrap_err();
        assert!(matches!(err, ResolveError::Read { .. }));
    }

    #[test]
    fn test_presence_agrees_with_resolver() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);
        let presence = resolver.presence();

        for entry in catalog.all_entries() {
            let category = entry.category();
            let outcome = resolver.resolve(category, entry.id()).unwrap();
            assert_eq!(
                is_present(&presence, category, entry.id()),
                outcome.is_from_file(),
                "{category}/{}",
                entry.id()
            );
        }
    }

    #[test]
    fn test_presence_map_shape() {
        let (dir, catalog) = fixture();
        let resolver = ContentResolver::new(&catalog, dir.path(), FALLBACK);
        let presence = resolver.presence();

        assert_eq!(presence.len(), Category::ALL.len());
        assert_eq!(presence[&Category::Projects]["agentrial"], true);
        assert_eq!(presence[&Category::Education]["msc-computer-engineering"], false);
        assert!(presence[&Category::Achievements].is_empty());
        assert!(!is_present(&presence, Category::Projects, "unknown"));
    }
}
