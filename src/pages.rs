//! Static page materialization.
//!
//! Turns every catalog entry into exactly one HTML file:
//!
//! ```text
//! static_routes(catalog)          one PageRoute per (category, id)
//!     │
//!     ├── page_for() ──► Detail ──► <output>/<route>/<id>/index.html
//!     │
//!     ├── home()     ──────────────► <output>/index.html
//!     └── not_found() ─────────────► <output>/404.html
//! ```
//!
//! The catalog is the only source of pages. Ids outside it never reach the
//! resolver; they render the generic not-found page instead.

use crate::{
    catalog::{Catalog, Category},
    config::SiteConfig,
    render,
    resolver::{ContentResolver, Resolved},
    utils::{
        minify::{MinifyType, minify},
        slug::is_slug,
    },
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File name every page directory receives.
const INDEX_FILE: &str = "index.html";

/// File served for unknown routes.
pub const NOT_FOUND_FILE: &str = "404.html";

// ============================================================================
// Routes
// ============================================================================

/// One detail page to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRoute<'a> {
    pub category: Category,
    pub id: &'a str,
}

impl PageRoute<'_> {
    /// Public URL, e.g. `/experience/book-author/`.
    pub fn url(&self, config: &SiteConfig) -> String {
        render::href(config, self.category, self.id)
    }

    /// Location of the generated file below `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir
            .join(self.category.route())
            .join(self.id)
            .join(INDEX_FILE)
    }
}

/// Every detail page the catalog defines, enumerated up front.
pub fn static_routes(catalog: &Catalog) -> Vec<PageRoute<'_>> {
    catalog
        .all_entries()
        .map(|entry| PageRoute {
            category: entry.category(),
            id: entry.id(),
        })
        .collect()
}

// ============================================================================
// Page outcome
// ============================================================================

/// What a request for `(category, id)` turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<'a> {
    /// A catalog entry; `fallback` is set when the body is the fallback text.
    Detail {
        resolved: Resolved<'a>,
        fallback: bool,
    },
    /// Unknown or malformed id.
    NotFound,
}

impl PageOutcome<'_> {
    /// Render the final HTML for this outcome.
    pub fn render(&self, config: &SiteConfig) -> String {
        match self {
            Self::Detail { resolved, .. } => render::detail(config, resolved),
            Self::NotFound => render::not_found(config),
        }
    }
}

/// Decide the page for `(category, id)`.
///
/// Content resolution only runs for ids present in the catalog; anything
/// else is [`PageOutcome::NotFound`]. Only a present-but-unreadable document
/// is an error.
pub fn page_for<'a>(
    resolver: &ContentResolver<'a>,
    category: Category,
    id: &str,
) -> Result<PageOutcome<'a>> {
    if !is_slug(id) || resolver.catalog().find(category, id).is_none() {
        return Ok(PageOutcome::NotFound);
    }

    let outcome = resolver
        .resolve(category, id)
        .with_context(|| format!("Failed to resolve {category}/{id}"))?;

    let fallback = outcome.is_fallback();
    Ok(match outcome.into_resolved() {
        Some(resolved) => PageOutcome::Detail { resolved, fallback },
        None => PageOutcome::NotFound,
    })
}

// ============================================================================
// Materialization
// ============================================================================

/// A written detail page.
#[derive(Debug, Clone)]
pub struct Page {
    pub category: Category,
    pub id: String,
    /// Public URL
    pub url: String,
    /// Body came from the fallback, not a document
    pub fallback: bool,
}

/// Result of a full materialization.
#[derive(Debug, Default)]
pub struct Pages {
    pub items: Vec<Page>,
}

impl Pages {
    /// Pages whose body is the fallback text.
    pub fn fallbacks(&self) -> impl Iterator<Item = &Page> {
        self.items.iter().filter(|p| p.fallback)
    }
}

/// Write every detail page plus `index.html` and `404.html`.
///
/// Detail pages render in parallel. `on_progress` is called once per detail
/// page.
pub fn materialize(
    config: &SiteConfig,
    catalog: &Catalog,
    on_progress: impl Fn() + Sync,
) -> Result<Pages> {
    let resolver = ContentResolver::from_config(catalog, config);
    let output = config.output_dir();

    let results: Vec<Result<Page>> = static_routes(catalog)
        .par_iter()
        .map(|route| {
            let outcome = page_for(&resolver, route.category, route.id)?;
            write_page(&route.output_path(&output), &outcome.render(config), config)?;
            on_progress();

            Ok(Page {
                category: route.category,
                id: route.id.to_owned(),
                url: route.url(config),
                fallback: matches!(outcome, PageOutcome::Detail { fallback: true, .. }),
            })
        })
        .collect();

    let mut items = Vec::with_capacity(results.len());
    for result in results {
        items.push(result?);
    }

    let presence = resolver.presence();
    write_page(
        &output.join(INDEX_FILE),
        &render::home(config, catalog, &presence),
        config,
    )?;
    write_page(&output.join(NOT_FOUND_FILE), &render::not_found(config), config)?;

    Ok(Pages { items })
}

/// Minify (if enabled) and write one HTML file, creating parent directories.
fn write_page(path: &Path, html: &str, config: &SiteConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let html = minify(MinifyType::Html(html.as_bytes()), config);
    fs::write(path, &*html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
