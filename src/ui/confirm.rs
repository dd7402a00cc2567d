//! Blocking yes/no confirmation.
//!
//! Widgets that need the user's go-ahead ask through [`Confirm`] so the
//! terminal prompt can be swapped for a fixed answer in tests.

use crate::ui::layout::centered_rect;
use crate::ui::widgets::confirm_dialog::ConfirmDialog;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{buffer::Buffer, prelude::*};
use std::io;

/// Synchronous confirmation capability
pub trait Confirm {
    /// Ask the user `message`; returns true only on an explicit yes
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Selection state of an open confirmation prompt
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmState {
    /// Confirmation dialog selection (true = yes)
    pub yes_selected: bool,
}

impl ConfirmState {
    /// Create new state, defaulting to "No"
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle confirmation selection
    pub fn toggle(&mut self) {
        self.yes_selected = !self.yes_selected;
    }

    /// Feed a key press; returns the answer once the user has decided
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            KeyCode::Char('q') => Some(false),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle();
                None
            }
            KeyCode::Char('h') | KeyCode::Char('l') => {
                self.toggle();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.yes_selected),
            _ => None,
        }
    }
}

/// Modal prompt drawn over the last rendered frame.
///
/// `confirm` blocks on terminal input until the user answers.
pub struct TerminalConfirm<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    backdrop: Option<Buffer>,
    title: &'static str,
}

impl<'t, B: Backend> TerminalConfirm<'t, B> {
    /// Create a prompt that redraws `backdrop` beneath the dialog
    pub fn new(terminal: &'t mut Terminal<B>, backdrop: Option<Buffer>) -> Self {
        Self {
            terminal,
            backdrop,
            title: "Confirm",
        }
    }

    fn draw(&mut self, message: &str, state: ConfirmState) -> io::Result<()> {
        let backdrop = &self.backdrop;
        let title = self.title;
        self.terminal.draw(|frame| {
            if let Some(backdrop) = backdrop {
                let buf = frame.buffer_mut();
                if buf.area == backdrop.area {
                    buf.content.clone_from(&backdrop.content);
                }
            }
            let popup_area = centered_rect(50, 30, frame.area());
            let dialog = ConfirmDialog::new(title, message).yes_selected(state.yes_selected);
            frame.render_widget(dialog, popup_area);
        })?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> io::Result<bool> {
        let mut state = ConfirmState::new();
        loop {
            self.draw(message, state)?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(answer) = state.handle_key(key) {
                    return Ok(answer);
                }
            }
        }
    }
}

impl<B: Backend> Confirm for TerminalConfirm<'_, B> {
    fn confirm(&mut self, message: &str) -> bool {
        match self.prompt(message) {
            Ok(answer) => {
                tracing::debug!("Confirmation {:?} answered {}", message, answer);
                answer
            }
            Err(e) => {
                tracing::warn!("Confirmation prompt failed, treating as declined: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_defaults_to_no() {
        let mut state = ConfirmState::new();
        assert_eq!(state.handle_key(press(KeyCode::Enter)), Some(false));
    }

    #[test]
    fn test_toggle_then_enter_confirms() {
        let mut state = ConfirmState::new();
        assert_eq!(state.handle_key(press(KeyCode::Left)), None);
        assert!(state.yes_selected);
        assert_eq!(state.handle_key(press(KeyCode::Enter)), Some(true));
    }

    #[test]
    fn test_shortcut_answers() {
        let mut state = ConfirmState::new();
        assert_eq!(state.handle_key(press(KeyCode::Char('y'))), Some(true));
        assert_eq!(state.handle_key(press(KeyCode::Char('n'))), Some(false));
        assert_eq!(state.handle_key(press(KeyCode::Esc)), Some(false));
        assert_eq!(state.handle_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_closure_as_confirm() {
        let mut asked = Vec::new();
        let mut stub = |message: &str| {
            asked.push(message.to_string());
            true
        };
        assert!(stub.confirm("Proceed?"));
        drop(stub);
        assert_eq!(asked, vec!["Proceed?".to_string()]);
    }
}
