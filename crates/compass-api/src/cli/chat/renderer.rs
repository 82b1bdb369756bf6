//! Terminal markdown rendering for advisor replies.
//!
//! Tokens are printed raw while streaming; the finished reply is then
//! rendered once through `termimad`.

use std::io::Write;

use termimad::crossterm::style::Color;
use termimad::MadSkin;

pub struct ChatRenderer {
    skin: MadSkin,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render a complete markdown reply.
    pub fn render_final(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print a single streaming token (raw, no formatting).
    pub fn print_streaming_token(&self, token: &str) {
        print!("{token}");
        let _ = std::io::stdout().flush();
    }

    /// Print the footer after a reply: "| {chars} chars . {time}s . {model}".
    pub fn print_stats_footer(&self, chars: usize, response_ms: u64, model: &str) {
        let seconds = response_ms as f64 / 1000.0;
        println!(
            "\n  {} {} chars {} {:.1}s {} {}",
            console::style("|").dim(),
            console::style(chars).dim(),
            console::style("\u{00b7}").dim(),
            console::style(seconds).dim(),
            console::style("\u{00b7}").dim(),
            console::style(model).dim(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_text() {
        let rendered = ChatRenderer::new().render_final("Consider **data science** next.");
        assert!(rendered.contains("data science"));
        assert!(!rendered.contains("**"));
    }
}
