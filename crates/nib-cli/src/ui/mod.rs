//! Terminal output helpers.

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{info, success, warning};

static COLOR_DISABLED: AtomicBool = AtomicBool::new(false);

/// Whether output to stderr should be colored.
///
/// `--no-color` and `NO_COLOR` turn colors off, `FORCE_COLOR` turns them on
/// for non-terminals. Otherwise colors follow whether stderr is a terminal.
pub fn should_use_color() -> bool {
    if COLOR_DISABLED.load(Ordering::Relaxed) || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Apply the `--no-color` flag. Call once from `main`.
pub fn init_colors(no_color: bool) {
    COLOR_DISABLED.store(no_color, Ordering::Relaxed);
    console::set_colors_enabled_stderr(should_use_color());
}
