//! Content categories.
//!
//! Each category owns one markdown directory under `content/` and one route
//! segment in the generated site. The two differ only for experiences:
//! documents live in `content/experiences/`, pages under `/experience/`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Projects,
    Experiences,
    Education,
    Achievements,
}

impl Category {
    /// All categories, in home page order.
    pub const ALL: [Self; 4] = [
        Self::Projects,
        Self::Experiences,
        Self::Education,
        Self::Achievements,
    ];

    /// Directory under the content root holding this category's documents.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Experiences => "experiences",
            Self::Education => "education",
            Self::Achievements => "achievements",
        }
    }

    /// First URL path segment of this category's detail pages.
    pub const fn route(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Experiences => "experience",
            Self::Education => "education",
            Self::Achievements => "achievements",
        }
    }

    /// Heading used on the home page.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Experiences => "Experience",
            Self::Education => "Education",
            Self::Achievements => "Achievements",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_dir_and_route_differ() {
        assert_eq!(Category::Experiences.dir_name(), "experiences");
        assert_eq!(Category::Experiences.route(), "experience");
    }

    #[test]
    fn test_routes_are_unique() {
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                assert_ne!(a.route(), b.route());
            }
        }
    }

    #[test]
    fn test_serde_names_match_dir_names() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.dir_name()));
        }
    }
}
