//! Terminal rendering for rich markdown output.
//!
//! Board output is markdown; this renders it with termimad when color is
//! enabled and falls back to plain text otherwise.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Keep hash symbols visible for headers; termimad would swallow
            // them.
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[36m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_renderer_disables_rich_output() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
