//! Pure formatting functions for terminal output.
//!
//! Warnings and notices from the bump workflow all flow through here so
//! presentation stays in one place.

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Format and print a non-fatal warning.
pub fn display_warning(message: &str) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", message);
}
