//! On-screen text display model.

use crate::store::{text_len, WriteMode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Write};

/// Status line shown before anything arrives.
pub const WAITING_STATUS: &str = "Server running - waiting for text...";

/// What the viewer window shows: the received text and a status line.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    text: String,
    status: String,
    dirty: bool,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self {
            text: String::new(),
            status: WAITING_STATUS.to_string(),
            dirty: true,
        }
    }
}

impl TextDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the display changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Applies one queued producer write.
    pub fn apply(&mut self, mode: WriteMode, text: &str) {
        match mode {
            WriteMode::Set => text.clone_into(&mut self.text),
            WriteMode::Append => self.text.push_str(text),
        }
        self.status = format!("Text received ({} chars)", text_len(&self.text));
        self.dirty = true;
    }

    /// Empties the display. Local only, the relay's text is untouched.
    pub fn clear(&mut self) {
        self.text.clear();
        self.status = "Cleared".to_string();
        self.dirty = true;
    }

    /// OSC 52 escape that asks the terminal to put the text on the clipboard.
    pub fn copy_sequence(&mut self) -> String {
        let payload = STANDARD.encode(self.text.as_bytes());
        self.status = "Copied!".to_string();
        self.dirty = true;
        format!("\x1b]52;c;{payload}\x07")
    }

    /// Writes the status line and text, then marks the display clean.
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "────────────────────────────────────────")?;
        writeln!(out, "📋 {}", self.status)?;
        writeln!(out, "────────────────────────────────────────")?;
        if !self.text.is_empty() {
            writeln!(out, "{}", self.text)?;
        }
        out.flush()?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_display_is_waiting() {
        let display = TextDisplay::new();
        assert_eq!(display.text(), "");
        assert_eq!(display.status(), WAITING_STATUS);
        assert!(display.is_dirty());
    }

    #[test]
    fn test_apply_set_and_append() {
        let mut display = TextDisplay::new();
        display.apply(WriteMode::Set, "ab");
        display.apply(WriteMode::Append, "cd");

        assert_eq!(display.text(), "abcd");
        assert_eq!(display.status(), "Text received (4 chars)");

        display.apply(WriteMode::Set, "z");
        assert_eq!(display.text(), "z");
    }

    #[test]
    fn test_clear() {
        let mut display = TextDisplay::new();
        display.apply(WriteMode::Set, "something");
        display.clear();

        assert_eq!(display.text(), "");
        assert_eq!(display.status(), "Cleared");
    }

    #[test]
    fn test_copy_sequence_is_osc52() {
        let mut display = TextDisplay::new();
        display.apply(WriteMode::Set, "hi");

        assert_eq!(display.copy_sequence(), "\x1b]52;c;aGk=\x07");
        assert_eq!(display.status(), "Copied!");
    }

    #[test]
    fn test_render_marks_clean() {
        let mut display = TextDisplay::new();
        display.apply(WriteMode::Set, "hello");

        let mut out = Vec::new();
        display.render(&mut out).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Text received (5 chars)"));
        assert!(rendered.contains("hello"));
        assert!(!display.is_dirty());
    }
}
