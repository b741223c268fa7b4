//! The content catalog.
//!
//! Every project, experience, education entry and achievement the site knows
//! about, loaded once from `catalog.toml` and shared by reference for the rest
//! of the build. The catalog is the only source of truth for which detail
//! pages exist.
//!
//! # Example
//!
//! ```toml
//! [[projects]]
//! id = "agentrial"
//! title = "Agentrial"
//! description = "Statistical evaluation harness for LLM agents"
//! technologies = ["Python", "pytest"]
//! period = "2025"
//! category = "ai-ml"
//! featured = true
//!
//! [[education]]
//! id = "msc-computer-engineering"
//! degree = "M.Sc. Computer Engineering"
//! institution = "Politecnico di Milano"
//! period = "2024 - 2026"
//! description = "AI and HPC track"
//! ```

mod category;
mod types;

pub use category::Category;
pub use types::{
    Achievement, ChartPoint, Education, Entry, Experience, Highlight, Project, SkillGroup,
};

use crate::utils::slug::{is_slug, suggest_slug};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid catalog")]
    Toml(#[from] toml::de::Error),

    #[error("{category} id `{id}` is not a URL-safe slug (try `{suggestion}`)")]
    InvalidId {
        category: Category,
        id: String,
        suggestion: String,
    },

    #[error("{category} id `{id}` is defined more than once")]
    DuplicateId { category: Category, id: String },
}

/// Immutable list of all site entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl Catalog {
    /// Parse and validate a catalog from TOML text.
    pub fn from_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate `catalog.toml`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content =
            fs::read_to_string(path).map_err(|err| CatalogError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Check that ids are slugs and unique within their category.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for category in Category::ALL {
            let mut seen = FxHashSet::default();
            for entry in self.entries(category) {
                let id = entry.id();
                if !is_slug(id) {
                    return Err(CatalogError::InvalidId {
                        category,
                        id: id.to_owned(),
                        suggestion: suggest_slug(id),
                    });
                }
                if !seen.insert(id) {
                    return Err(CatalogError::DuplicateId {
                        category,
                        id: id.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }

    /// All entries of one category, in authoring order.
    pub fn entries(&self, category: Category) -> Box<dyn Iterator<Item = Entry<'_>> + '_> {
        match category {
            Category::Projects => Box::new(self.projects.iter().map(Entry::Project)),
            Category::Experiences => Box::new(self.experiences.iter().map(Entry::Experience)),
            Category::Education => Box::new(self.education.iter().map(Entry::Education)),
            Category::Achievements => Box::new(self.achievements.iter().map(Entry::Achievement)),
        }
    }

    /// All entries across every category.
    pub fn all_entries(&self) -> impl Iterator<Item = Entry<'_>> {
        Category::ALL.into_iter().flat_map(|c| self.entries(c))
    }

    /// Find one entry by category and id.
    pub fn find(&self, category: Category, id: &str) -> Option<Entry<'_>> {
        self.entries(category).find(|e| e.id() == id)
    }

    /// Total number of entries, i.e. the number of detail pages.
    pub fn len(&self) -> usize {
        self.projects.len() + self.experiences.len() + self.education.len() + self.achievements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
