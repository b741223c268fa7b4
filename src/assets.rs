//! Static asset copying.
//!
//! Files under `assets/` are copied verbatim into the output directory,
//! keeping their relative layout. Unchanged files are skipped unless the
//! build is clean.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files never copied
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Every file below `dir`, recursively. Missing directories yield nothing.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Whether `dst` exists and is at least as new as `src`.
pub fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let modified = |p: &Path| p.metadata().and_then(|m| m.modified()).ok();
    match (modified(src), modified(dst)) {
        (Some(src_time), Some(dst_time)) => src_time <= dst_time,
        _ => false,
    }
}

/// Output location of an asset file.
pub fn asset_dest(path: &Path, config: &SiteConfig) -> Result<PathBuf> {
    let rel = path.strip_prefix(&config.build.assets).with_context(|| {
        format!(
            "{} is not inside {}",
            path.display(),
            config.build.assets.display()
        )
    })?;
    Ok(config.output_dir().join(rel))
}

/// Copy one asset into the output. Returns `false` when it was up to date.
pub fn copy_asset(path: &Path, config: &SiteConfig, clean: bool, log_file: bool) -> Result<bool> {
    let dest = asset_dest(path, config)?;

    if !clean && is_up_to_date(path, &dest) {
        return Ok(false);
    }

    if log_file {
        log!("assets"; "{}", path.strip_prefix(&config.build.assets).unwrap_or(path).display());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(path, &dest)
        .with_context(|| format!("Failed to copy {} to {}", path.display(), dest.display()))?;
    Ok(true)
}
