//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── Catalog::load()          catalog.toml → Catalog
//!     │
//!     ├── rayon::join
//!     │       ├── materialize()    detail pages, index.html, 404.html
//!     │       └── copy_asset()     assets/ → output
//!     │
//!     └── log fallbacks + summary
//! ```

use crate::{
    assets::{collect_all_files, copy_asset},
    catalog::Catalog,
    config::SiteConfig,
    log,
    logger::ProgressBars,
    pages::{Pages, materialize},
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    sync::atomic::{AtomicBool, Ordering},
};

/// Build the whole site into the output directory.
///
/// When `config.build.clean` is set the output directory is removed first.
pub fn build_site(config: &SiteConfig) -> Result<Pages> {
    let catalog = Catalog::load(&config.build.catalog)
        .with_context(|| format!("Failed to load {}", config.build.catalog.display()))?;

    prepare_output(config)?;

    if catalog.is_empty() {
        log!("warn"; "catalog is empty, only the home page will be generated");
    }

    if !config.build.content.is_dir() {
        log!(
            "warn";
            "content dir `{}` not found, every entry uses the fallback",
            config.build.content.display()
        );
    }

    let asset_files = collect_all_files(&config.build.assets);
    let progress =
        ProgressBars::new_filtered(&[("pages", catalog.len()), ("assets", asset_files.len())]);
    let inc = |name: &str| {
        if let Some(progress) = &progress {
            progress.inc_by_name(name);
        }
    };

    let has_error = AtomicBool::new(false);
    let clean = config.build.clean;

    let (pages_result, assets_result) = rayon::join(
        || {
            materialize(config, &catalog, || inc("pages")).inspect_err(|_| {
                has_error.store(true, Ordering::Relaxed);
            })
        },
        || {
            asset_files.par_iter().try_for_each(|path| {
                if has_error.load(Ordering::Relaxed) {
                    return Err(anyhow!("Aborted"));
                }
                copy_asset(path, config, clean, false).inspect_err(|_| {
                    has_error.store(true, Ordering::Relaxed);
                })?;
                inc("assets");
                Ok(())
            })
        },
    );

    if let Some(progress) = &progress {
        progress.finish();
    }

    let pages = pages_result?;
    assets_result?;

    if config.content.log_fallbacks {
        for page in pages.fallbacks() {
            log!("fallback"; "{}/{} at {}", page.category, page.id, page.url);
        }
    }

    log_build_result(&pages, asset_files.len());
    Ok(pages)
}

/// Create the output directory, clearing it first on a clean build.
fn prepare_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }

    fs::create_dir_all(config.output_dir())
        .with_context(|| format!("Failed to create {}", output.display()))
}

fn log_build_result(pages: &Pages, assets: usize) {
    let fallbacks = pages.fallbacks().count();
    let documents = pages.items.len() - fallbacks;
    log!(
        "build";
        "{} pages ({} documents, {} fallbacks), {} assets",
        pages.items.len(),
        documents,
        fallbacks,
        assets
    );
}
