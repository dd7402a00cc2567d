//! Single-line text field used by the customer form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

/// Single-line text input widget
pub struct TextInputWidget<'a> {
    state: &'a TextInputState,
    /// Placeholder text when empty
    placeholder: &'a str,
    title: &'a str,
    focused: bool,
}

impl<'a> TextInputWidget<'a> {
    /// Create a new text input widget
    pub fn new(state: &'a TextInputState) -> Self {
        Self {
            state,
            placeholder: "",
            title: "Input",
            focused: true,
        }
    }

    /// Set placeholder text
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set focused state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let value = self.state.value();
        if value.is_empty() {
            let mut x = inner.x;
            if self.focused {
                buf.set_string(x, inner.y, " ", cursor_style());
                x += 1;
            }
            buf.set_stringn(
                x,
                inner.y,
                self.placeholder,
                inner.right().saturating_sub(x) as usize,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        if !self.focused {
            buf.set_stringn(inner.x, inner.y, value, inner.width as usize, Style::default());
            return;
        }

        let before: String = value.chars().take(self.state.cursor).collect();
        let at: String = value.chars().skip(self.state.cursor).take(1).collect();
        let after: String = value.chars().skip(self.state.cursor + 1).collect();

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(if at.is_empty() { " ".to_string() } else { at }, cursor_style()),
            Span::raw(after),
        ]);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}

fn cursor_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::White)
}

/// State for text input
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInputState {
    /// Current value
    pub value: String,
    /// Cursor position (character index)
    pub cursor: usize,
}

impl TextInputState {
    /// Create a new text input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial value, cursor at the end
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return TextInputAction::None;
                }
                let idx = self.byte_index(self.cursor);
                self.value.insert(idx, c);
                self.cursor += 1;
                TextInputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return TextInputAction::None;
                }
                self.cursor -= 1;
                let idx = self.byte_index(self.cursor);
                self.value.remove(idx);
                TextInputAction::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_count() {
                    return TextInputAction::None;
                }
                let idx = self.byte_index(self.cursor);
                self.value.remove(idx);
                TextInputAction::Changed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                TextInputAction::None
            }
            KeyCode::Right => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
                TextInputAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                TextInputAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                TextInputAction::None
            }
            KeyCode::Enter => TextInputAction::Submit,
            KeyCode::Esc => TextInputAction::Cancel,
            _ => TextInputAction::None,
        }
    }

    /// Get the current value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Actions that can result from text input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    None,
    Changed,
    /// User submitted (Enter)
    Submit,
    /// User cancelled (Esc)
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.handle_key(key(KeyCode::Char('3')));
        state.handle_key(key(KeyCode::Char('2')));
        assert_eq!(state.value(), "32");
        assert_eq!(state.cursor, 2);

        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.value(), "3");
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = TextInputState::with_value("Zoë");
        assert_eq!(state.cursor, 3);

        state.handle_key(key(KeyCode::Left));
        state.handle_key(key(KeyCode::Char('x')));
        assert_eq!(state.value(), "Zoxë");

        state.handle_key(key(KeyCode::Delete));
        assert_eq!(state.value(), "Zox");
    }

    #[test]
    fn test_navigation() {
        let mut state = TextInputState::with_value("hello");
        state.handle_key(key(KeyCode::Home));
        assert_eq!(state.cursor, 0);
        state.handle_key(key(KeyCode::Left));
        assert_eq!(state.cursor, 0);
        state.handle_key(key(KeyCode::End));
        assert_eq!(state.cursor, 5);
    }

    #[test]
    fn test_submit_and_cancel() {
        let mut state = TextInputState::new();
        assert_eq!(state.handle_key(key(KeyCode::Enter)), TextInputAction::Submit);
        assert_eq!(state.handle_key(key(KeyCode::Esc)), TextInputAction::Cancel);
    }
}
