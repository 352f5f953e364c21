//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: names, hints
//! - Bold: headers
//! - Dimmed: secondary info

use console::{style, StyledObject};

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint<D>(styled: StyledObject<D>) -> StyledObject<D> {
    if colors_enabled() {
        styled
    } else {
        styled.force_styling(false)
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ imported 4 variables into api/prod`
pub fn success(msg: &str) {
    println!("{} {}", paint(style("✓").green()), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ vault not found: ops`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint(style("✗").red()), msg);
}

/// Print a warning message to stderr (yellow).
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint(style("⚠").yellow()), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ check --vault and --item`
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint(style("→").cyan()), paint(style(msg).cyan()));
}

/// Print a bold header.
pub fn header(title: &str) {
    println!("{}", paint(style(title).bold()));
}

/// Print a list item with bullet.
///
/// Example: `  • DATABASE_URL`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", paint(style(msg).dim()));
}

/// Format a vault, item or section name in cyan.
pub fn name(n: &str) -> String {
    paint(style(n).cyan()).to_string()
}
