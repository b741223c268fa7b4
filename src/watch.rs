//! File watcher for `vitae serve`.
//!
//! ```text
//! notify events ──► Debouncer (300ms) ──► handle_changes()
//!                                             │
//!                    config changed ──────────┼──► reload config + full rebuild
//!                    content / catalog ───────┼──► full rebuild
//!                    assets only ─────────────┴──► copy changed assets
//! ```
//!
//! Every page depends on the catalog and on which documents exist, so any
//! content change rebuilds all pages.

use crate::{assets::copy_asset, build::build_site, config::SiteConfig, log};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::RecvTimeoutError,
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Watch Targets
// =============================================================================

/// What a changed path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum WatchTarget {
    Config,
    Catalog,
    Content,
    Assets,
}

impl WatchTarget {
    const ALL: [Self; 4] = [Self::Config, Self::Catalog, Self::Content, Self::Assets];

    const fn name(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Catalog => "catalog",
            Self::Content => "content",
            Self::Assets => "assets",
        }
    }

    fn path(self, config: &SiteConfig) -> &Path {
        match self {
            Self::Config => &config.config_path,
            Self::Catalog => &config.build.catalog,
            Self::Content => &config.build.content,
            Self::Assets => &config.build.assets,
        }
    }

    const fn is_directory(self) -> bool {
        matches!(self, Self::Content | Self::Assets)
    }

    /// Classify `path`. Files are matched exactly, directories by prefix.
    fn of(path: &Path, config: &SiteConfig) -> Option<Self> {
        Self::ALL.into_iter().find(|target| {
            let watched = target.path(config);
            if target.is_directory() {
                path.starts_with(watched)
            } else {
                path == watched
            }
        })
    }
}

/// Editor swap and backup files.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches bursts of events and enforces a cooldown after each rebuild.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        self.pending
            .extend(event.paths.into_iter().filter(|p| !is_temp_file(p)));
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Rebuild
// =============================================================================

/// Re-read the config file, applying the same CLI overrides.
fn reload_config(current: &SiteConfig) -> Result<&'static SiteConfig> {
    let cli = current.cli.context("Config was not loaded from the command line")?;
    let config = SiteConfig::load(cli)?;
    config.validate()?;

    if WatchTarget::ALL
        .into_iter()
        .any(|t| t.path(&config) != t.path(current))
        || config.serve.port != current.serve.port
    {
        log!("warn"; "paths or port changed, restart `vitae serve` to apply them");
    }

    // Lives for the rest of the process, like the config loaded in main
    Ok(Box::leak(Box::new(config)))
}

fn full_rebuild(config: &SiteConfig, reason: &str) -> bool {
    log!("watch"; "{reason}, rebuilding...");
    match build_site(config) {
        Ok(_) => true,
        Err(e) => {
            log!("error"; "build failed: {e:#}");
            false
        }
    }
}

/// Apply a batch of changes. Returns `true` when something was rebuilt.
fn handle_changes(paths: &[PathBuf], config: &mut &'static SiteConfig) -> bool {
    let mut targets = FxHashSet::default();
    let mut assets = Vec::new();

    for path in paths {
        if let Some(target) = WatchTarget::of(path, config) {
            targets.insert(target);
            if target == WatchTarget::Assets && path.is_file() {
                assets.push(path);
            }
        }
    }

    if targets.contains(&WatchTarget::Config) {
        match reload_config(config) {
            Ok(reloaded) => *config = reloaded,
            Err(e) => {
                log!("error"; "config reload failed: {e:#}");
                return false;
            }
        }
        return full_rebuild(config, "config changed");
    }

    if let Some(target) = [WatchTarget::Catalog, WatchTarget::Content]
        .into_iter()
        .find(|t| targets.contains(t))
    {
        return full_rebuild(config, &format!("{} changed", target.name()));
    }

    let mut copied = 0;
    for path in assets {
        match copy_asset(path, config, true, true) {
            Ok(_) => copied += 1,
            Err(e) => log!("error"; "{e:#}"),
        }
    }
    copied > 0
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Register every target that exists and return the ones that do not.
///
/// A missing target is not picked up later; `vitae serve` has to be restarted.
fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<Vec<WatchTarget>> {
    let root = config.get_root();
    let mut watched = Vec::new();
    let mut missing = Vec::new();

    for target in WatchTarget::ALL {
        let path = target.path(config);
        if !path.exists() {
            log!(
                "warn";
                "{} `{}` does not exist, not watched until restart",
                target.name(),
                path.strip_prefix(root).unwrap_or(path).display()
            );
            missing.push(target);
            continue;
        }

        let mode = if target.is_directory() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(path, mode)
            .with_context(|| format!("Failed to watch {}: {}", target.name(), path.display()))?;

        watched.push(path.strip_prefix(root).unwrap_or(path).display().to_string());
    }

    log!("watch"; "watching {}", watched.join(", "));
    Ok(missing)
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Watch content, assets, catalog and config; rebuild until the channel closes.
pub fn watch_for_changes_blocking(config: &'static SiteConfig) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config)?;

    let mut config = config;
    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut config) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.rebase_paths(root);
        config.config_path = config.get_root().join("vitae.toml");
        config
    }

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("content/projects/agentrial.md.swp")));
        assert!(is_temp_file(Path::new("content/projects/agentrial.md~")));
        assert!(is_temp_file(Path::new("content/projects/.agentrial.md")));
        assert!(!is_temp_file(Path::new("content/projects/agentrial.md")));
    }

    #[test]
    fn test_setup_watchers_reports_missing_dirs() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path());
        fs::write(dir.path().join("vitae.toml"), "").unwrap();
        fs::write(dir.path().join("catalog.toml"), "").unwrap();

        let mut watcher = notify::recommended_watcher(|_: notify::Result<Event>| {}).unwrap();
        let missing = setup_watchers(&mut watcher, &config).unwrap();
        assert_eq!(missing, [WatchTarget::Content, WatchTarget::Assets]);

        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        let missing = setup_watchers(&mut watcher, &config).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_classify_paths() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path());
        let root = config.get_root().to_path_buf();

        assert_eq!(
            WatchTarget::of(&root.join("content/projects/agentrial.md"), &config),
            Some(WatchTarget::Content)
        );
        assert_eq!(
            WatchTarget::of(&root.join("assets/img/avatar.png"), &config),
            Some(WatchTarget::Assets)
        );
        assert_eq!(
            WatchTarget::of(&root.join("catalog.toml"), &config),
            Some(WatchTarget::Catalog)
        );
        assert_eq!(
            WatchTarget::of(&root.join("vitae.toml"), &config),
            Some(WatchTarget::Config)
        );
        assert_eq!(WatchTarget::of(&root.join("public/index.html"), &config), None);
    }

    #[test]
    fn test_debouncer_filters_temp_files() {
        let mut debouncer = Debouncer::new();
        let event = Event::new(EventKind::Create(notify::event::CreateKind::File))
            .add_path(PathBuf::from("content/projects/a.md"))
            .add_path(PathBuf::from("content/projects/a.md.swp"));
        debouncer.add(event);

        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_millis(DEBOUNCE_MS));
        assert_eq!(debouncer.take(), vec![PathBuf::from("content/projects/a.md")]);
        assert_eq!(debouncer.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_cooldown_after_rebuild() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.in_cooldown());
        debouncer.mark_rebuild();
        assert!(debouncer.in_cooldown());
    }

    #[test]
    fn test_asset_change_copies_only_assets() {
        let dir = TempDir::new().unwrap();
        let mut site: &'static SiteConfig = Box::leak(Box::new(config(dir.path())));
        let asset = site.build.assets.join("cv.pdf");
        fs::create_dir_all(&site.build.assets).unwrap();
        fs::write(&asset, b"pdf").unwrap();

        assert!(handle_changes(&[asset], &mut site));
        assert!(site.build.output.join("cv.pdf").is_file());
        assert!(!site.build.output.join("index.html").exists());
    }

    #[test]
    fn test_content_change_rebuilds_site() {
        let dir = TempDir::new().unwrap();
        let mut site: &'static SiteConfig = Box::leak(Box::new(config(dir.path())));
        fs::write(&site.build.catalog, "").unwrap();
        let doc = site.build.content.join("projects/agentrial.md");
        fs::create_dir_all(doc.parent().unwrap()).unwrap();
        fs::write(&doc, "# Agentrial").unwrap();

        assert!(handle_changes(&[doc], &mut site));
        assert!(site.build.output.join("index.html").is_file());
    }
}
