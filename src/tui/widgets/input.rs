//! Single-line text input used by the form dialogs
//!
//! The cursor counts characters, not bytes, so currency symbols and
//! accented names edit correctly.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::tui::theme::Palette;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    placeholder: &'static str,
}

impl TextInput {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            ..Self::default()
        }
    }

    /// Replace the content and put the cursor at the end
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.cursor = self.len();
        self
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Styled spans for the value; a focused input shows a block cursor
    pub fn spans(&self, focused: bool, palette: &Palette) -> Vec<Span<'static>> {
        if !focused {
            return if self.content.is_empty() {
                vec![Span::styled(self.placeholder, Style::default().fg(palette.muted))]
            } else {
                vec![Span::styled(self.content.clone(), Style::default().fg(palette.text))]
            };
        }

        let text = Style::default().fg(palette.text);
        let split = self.byte_index(self.cursor);
        let (before, rest) = self.content.split_at(split);
        let mut after = rest.chars();
        let under = after.next().unwrap_or(' ');

        vec![
            Span::styled(before.to_string(), text),
            Span::styled(
                under.to_string(),
                Style::default()
                    .fg(palette.text)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(after.as_str().to_string(), text),
        ]
    }
}
