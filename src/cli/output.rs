//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use console::style;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Mask a secret for display without revealing its exact length.
pub fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count().clamp(4, 12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_hides_content_and_bounds_length() {
        assert_eq!(mask("ab"), "****");
        assert_eq!(mask("tok_abc123"), "**********");
        assert_eq!(mask(&"x".repeat(40)), "*".repeat(12));
    }
}
