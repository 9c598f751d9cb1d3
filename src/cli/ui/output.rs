use console::style;

use crate::types::GenerationResult;

/// Styled terminal lines for notifications and results
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress informational lines; warnings, errors and results still print
    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Task title as a section heading, then the body verbatim
    pub fn result(&self, result: &GenerationResult) {
        self.section(&result.title);
        println!("{}", result.body);
    }

    /// `label: value` with a dimmed placeholder for empty values
    pub fn field(&self, label: &str, value: &str) {
        if value.is_empty() {
            println!("  {:<16} {}", style(label).cyan(), style("(empty)").dim());
        } else {
            println!("  {:<16} {}", style(label).cyan(), value);
        }
    }
}
