//! Catalog record types.
//!
//! Plain data deserialized from `catalog.toml`. Nothing here is mutated after
//! [`Catalog::load`](super::Catalog::load) returns.

use super::Category;
use serde::{Deserialize, Serialize};

// ============================================================================
// Projects
// ============================================================================

/// Project area, shown as a tag on cards and detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectCategory {
    AiMl,
    Systems,
    #[default]
    Web,
    Research,
}

impl ProjectCategory {
    /// Short label for cards.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AiMl => "AI/ML",
            Self::Systems => "Systems",
            Self::Web => "Web",
            Self::Research => "Research",
        }
    }

    /// Long label for detail pages.
    pub const fn full_label(self) -> &'static str {
        match self {
            Self::AiMl => "AI / Machine Learning",
            Self::Systems => "Systems / GPU",
            Self::Web => "Web Development",
            Self::Research => "Research",
        }
    }

    /// CSS modifier class.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::AiMl => "tag-ai-ml",
            Self::Systems => "tag-systems",
            Self::Web => "tag-web",
            Self::Research => "tag-research",
        }
    }
}

/// Headline number shown as a card on a project page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One tile of a project's feature grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

/// One row of a project's chart dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub period: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub category: ProjectCategory,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
    #[serde(default)]
    pub chart_label: Option<String>,
}

impl Project {
    /// Chart dataset and its label, only when both are present.
    pub fn chart(&self) -> Option<(&str, &[ChartPoint])> {
        match (&self.chart_label, self.chart_data.is_empty()) {
            (Some(label), false) => Some((label.as_str(), self.chart_data.as_slice())),
            _ => None,
        }
    }
}

// ============================================================================
// Experience / Education / Achievements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub period: String,
    pub description: String,
}

/// Icon shown beside an achievement.
///
/// Accepts `"trophy"` as well as the component name `"Trophy"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    #[default]
    #[serde(alias = "Award")]
    Award,
    #[serde(alias = "Trophy")]
    Trophy,
    #[serde(alias = "Globe")]
    Globe,
}

impl Icon {
    /// Inline glyph rendered in the icon badge.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Award => "\u{1F3C5}",
            Self::Trophy => "\u{1F3C6}",
            Self::Globe => "\u{1F310}",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Award => "award",
            Self::Trophy => "trophy",
            Self::Globe => "globe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub icon: Icon,
}

// ============================================================================
// Home page extras
// ============================================================================

/// Hero stat, e.g. `{ value = "800+", label = "Hours Mentoring" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Highlight {
    pub value: String,
    pub label: String,
}

/// Named group of skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

// ============================================================================
// Entry view
// ============================================================================

/// Borrowed view over any catalog record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    Project(&'a Project),
    Experience(&'a Experience),
    Education(&'a Education),
    Achievement(&'a Achievement),
}

impl<'a> Entry<'a> {
    pub const fn category(&self) -> Category {
        match self {
            Self::Project(_) => Category::Projects,
            Self::Experience(_) => Category::Experiences,
            Self::Education(_) => Category::Education,
            Self::Achievement(_) => Category::Achievements,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            Self::Project(p) => &p.id,
            Self::Experience(e) => &e.id,
            Self::Education(e) => &e.id,
            Self::Achievement(a) => &a.id,
        }
    }

    /// Page heading.
    pub fn title(&self) -> &'a str {
        match self {
            Self::Project(p) => &p.title,
            Self::Experience(e) => &e.title,
            Self::Education(e) => &e.degree,
            Self::Achievement(a) => &a.title,
        }
    }

    /// Line under the heading: `organization • period` (projects show only the period).
    pub fn subtitle(&self) -> String {
        match self {
            Self::Project(p) => p.period.clone(),
            Self::Experience(e) => format!("{} \u{2022} {}", e.company, e.period),
            Self::Education(e) => format!("{} \u{2022} {}", e.institution, e.period),
            Self::Achievement(a) => format!("{} \u{2022} {}", a.organization, a.date),
        }
    }

    /// One-paragraph summary from the catalog.
    pub fn description(&self) -> &'a str {
        match self {
            Self::Project(p) => &p.description,
            Self::Experience(e) => &e.description,
            Self::Education(e) => &e.description,
            Self::Achievement(a) => &a.description,
        }
    }
}
