//! Terminal color palette.
//!
//! Colors are applied only when enabled, so renderers can write plain text
//! when stdout is not a terminal.

use colored::Colorize;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    use_colors: bool,
}

impl Palette {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, text: &str, f: impl FnOnce(&str) -> colored::ColoredString) -> String {
        if self.use_colors {
            f(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Section headers and the query time label.
    pub fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().bold())
    }

    /// Field labels.
    pub fn label(&self, text: &str) -> String {
        self.paint(text, |t| t.green().bold())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red().bold())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_leaves_text_alone() {
        let palette = Palette::new(false);
        assert_eq!(palette.header("REGISTRAR"), "REGISTRAR");
        assert_eq!(palette.error("ERROR:"), "ERROR:");
    }

    #[test]
    fn test_colored_palette_wraps_text() {
        colored::control::set_override(true);
        let painted = Palette::new(true).warning("WARNING:");
        assert!(painted.contains("WARNING:"));
        assert!(painted.starts_with("\u{1b}["));
    }
}
