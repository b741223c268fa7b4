//! Terminal output: prefixed log lines and progress bars.
//!
//! ```ignore
//! log!("build"; "{} pages", count);
//!
//! let progress = ProgressBars::new(&[("pages", 12), ("assets", 40)]);
//! progress.inc_by_name("pages");
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Terminal width, detected once.
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Number of progress bar rows currently reserved below the log area.
static BAR_COUNT: AtomicUsize = AtomicUsize::new(0);

// Bar line layout: "[pages] [████░░░░] 3/12"

/// `[` and `]` around the module name
const BRACKET_LEN: usize = 2;
/// Space after the prefix
const SPACE_AFTER_PREFIX: usize = 1;
/// ` [` and `]` around the bar itself
const BAR_WRAPPER_LEN: usize = 3;
/// Space before `3/12`
const SPACE_BEFORE_COUNT: usize = 1;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

/// Display width of `[module] `.
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Print a line with a colored `[module]` prefix.
///
/// ```ignore
/// log!("fallback"; "{}/{}", category, id);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print one log line, keeping any active progress bars below it.
///
/// Single-line messages are truncated to the terminal width.
#[allow(clippy::cast_possible_truncation)] // bar count is tiny
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let width = get_terminal_width() as usize;
    let bar_count = BAR_COUNT.load(Ordering::SeqCst);

    let mut stdout = stdout().lock();

    if bar_count > 0 {
        execute!(stdout, cursor::MoveUp(bar_count as u16)).ok();
        execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
    } else {
        execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    }

    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, width.saturating_sub(calc_prefix_len(module.len())))
    };
    writeln!(stdout, "{prefix} {message}").ok();

    // Re-reserve the rows the bars will redraw into
    for _ in 0..bar_count {
        writeln!(stdout).ok();
    }

    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "fallback" => prefix.cyan(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress Bars
// ============================================================================

/// Several progress bars, one terminal row each, redrawn in place.
///
/// Safe to update from rayon workers; drawing is serialized by a mutex.
pub struct ProgressBars {
    bars: Vec<ProgressBar>,
    lock: Mutex<()>,
}

struct ProgressBar {
    name: &'static str,
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    current: AtomicUsize,
    /// Row within the bar area, 0 = top
    row: usize,
}

impl ProgressBars {
    /// Reserve one row per `(name, total)` pair.
    pub fn new(modules: &[(&'static str, usize)]) -> Self {
        let mut stdout = stdout().lock();
        for _ in modules {
            writeln!(stdout).ok();
        }
        stdout.flush().ok();

        BAR_COUNT.store(modules.len(), Ordering::SeqCst);

        let bars = modules
            .iter()
            .enumerate()
            .map(|(row, &(name, total))| ProgressBar {
                name,
                prefix: colorize_prefix(name),
                prefix_len: calc_prefix_len(name.len()),
                total,
                current: AtomicUsize::new(0),
                row,
            })
            .collect();

        Self {
            bars,
            lock: Mutex::new(()),
        }
    }

    /// Like [`new`](Self::new), but skips empty bars.
    ///
    /// Returns `None` when there is at most one item in total.
    pub fn new_filtered(modules: &[(&'static str, usize)]) -> Option<Self> {
        let filtered: Vec<_> = modules.iter().filter(|(_, n)| *n > 0).copied().collect();
        let total: usize = filtered.iter().map(|(_, n)| n).sum();
        (total > 1).then(|| Self::new(&filtered))
    }

    /// Advance the bar called `name` by one.
    pub fn inc_by_name(&self, name: &str) {
        if let Some(bar) = self.bars.iter().find(|b| b.name == name) {
            let current = bar.current.fetch_add(1, Ordering::Relaxed) + 1;
            self.display(bar, current);
        }
    }

    fn display(&self, bar: &ProgressBar, current: usize) {
        let _guard = self.lock.lock().ok();

        let count = format!("{current}/{}", bar.total);
        let overhead = bar.prefix_len + BAR_WRAPPER_LEN + SPACE_BEFORE_COUNT + count.len();
        let width = (get_terminal_width() as usize)
            .saturating_sub(overhead)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
        let filled = (current * width).checked_div(bar.total).unwrap_or(0).min(width);
        let line = "█".repeat(filled) + &"░".repeat(width - filled);

        let mut stdout = stdout().lock();
        #[allow(clippy::cast_possible_truncation)]
        let up = (self.bars.len() - bar.row) as u16;
        execute!(stdout, cursor::MoveUp(up), Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "{} [{line}] {count}", bar.prefix).ok();
        execute!(stdout, cursor::MoveDown(up)).ok();
        write!(stdout, "\r").ok();
        stdout.flush().ok();
    }

    /// Erase the bar rows and release them.
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish(&self) {
        if BAR_COUNT.swap(0, Ordering::SeqCst) == 0 {
            return;
        }
        let _guard = self.lock.lock().ok();

        let mut stdout = stdout().lock();
        let rows = self.bars.len() as u16;
        execute!(stdout, cursor::MoveUp(rows)).ok();
        for _ in &self.bars {
            execute!(stdout, Clear(ClearType::CurrentLine), cursor::MoveDown(1)).ok();
        }
        execute!(stdout, cursor::MoveUp(rows)).ok();
        stdout.flush().ok();
    }
}

impl Drop for ProgressBars {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_prefix_len() {
        // "[pages] "
        assert_eq!(calc_prefix_len(5), 8);
        // "[] "
        assert_eq!(calc_prefix_len(0), 3);
    }

    #[test]
    fn test_truncate_str_ascii() {
        assert_eq!(truncate_str("fallback", 20), "fallback");
        assert_eq!(truncate_str("fallback", 4), "fall");
        assert_eq!(truncate_str("fallback", 0), "");
        assert_eq!(truncate_str("", 3), "");
    }

    #[test]
    fn test_truncate_str_keeps_char_boundary() {
        // "•" is 3 bytes
        let s = "a•b";
        assert_eq!(truncate_str(s, 5), "a•b");
        assert_eq!(truncate_str(s, 4), "a•");
        assert_eq!(truncate_str(s, 3), "a");
        assert_eq!(truncate_str(s, 1), "a");
    }

    #[test]
    fn test_bar_width_bounds() {
        assert!(MIN_BAR_WIDTH < MAX_BAR_WIDTH);
    }

    #[test]
    fn test_prefix_contains_module() {
        colored::control::set_override(false);
        assert_eq!(colorize_prefix("fallback").to_string(), "[fallback]");
        assert_eq!(colorize_prefix("serve").to_string(), "[serve]");
    }
}
