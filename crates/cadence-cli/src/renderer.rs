//! Terminal rendering for markdown output.
//!
//! Rich mode styles headings, checkboxes and inline code with termimad;
//! plain mode prints the markdown unchanged.

use anyhow::Result;
use termimad::{MadSkin, crossterm::style::Color};

/// Prints markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_fg(Color::AnsiValue(245));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                // Keep the hashes visible so day boundaries stand out
                println!("\x1b[36m{line}\x1b[0m");
            } else if let Some(rest) = line.strip_prefix("- [x] ") {
                print!("\x1b[32m✓\x1b[0m ");
                self.skin.print_inline(rest);
                println!();
            } else if let Some(rest) = line.strip_prefix("- [ ] ") {
                print!("○ ");
                self.skin.print_inline(rest);
                println!();
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}
