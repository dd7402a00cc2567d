//! Keyboard input handling with vim-style navigation support.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Standard navigation mode
    #[default]
    Normal,
    /// Text editing mode (customer form)
    Insert,
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Home,
    End,

    // Customer actions
    View,
    Edit,
    Delete,

    // Misc
    ToggleLayout,
    Reload,
    Back,
    Quit,
}

/// Keyboard bindings configuration
pub struct KeyBindings {
    pub vim_navigation: bool,
}

/// Input handler for processing keyboard events
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new(vim_navigation: bool) -> Self {
        Self {
            bindings: KeyBindings { vim_navigation },
        }
    }

    /// Handle a key event and return the corresponding action
    pub fn handle_key(&self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        match mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => Self::handle_insert_key(key),
        }
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Right => Some(Action::MoveRight),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),

            KeyCode::Char('j') if self.bindings.vim_navigation => Some(Action::MoveDown),
            KeyCode::Char('k') if self.bindings.vim_navigation => Some(Action::MoveUp),
            KeyCode::Char('h') if self.bindings.vim_navigation => Some(Action::MoveLeft),
            KeyCode::Char('l') if self.bindings.vim_navigation => Some(Action::MoveRight),
            KeyCode::Char('g') if self.bindings.vim_navigation => Some(Action::Home),
            KeyCode::Char('G') if self.bindings.vim_navigation => Some(Action::End),

            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('v') => Some(Action::View),
            KeyCode::Char('e') => Some(Action::Edit),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::Delete),

            KeyCode::Char('m') => Some(Action::ToggleLayout),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Reload),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),

            _ => None,
        }
    }

    /// Only leaving the form or the app is an action; everything else goes to the text field
    fn handle_insert_key(key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Esc {
            return Some(Action::Back);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vim_navigation() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('j')), InputMode::Normal), Some(Action::MoveDown));
        assert_eq!(handler.handle_key(key(KeyCode::Char('k')), InputMode::Normal), Some(Action::MoveUp));
    }

    #[test]
    fn test_vim_disabled() {
        let handler = InputHandler::new(false);
        assert_eq!(handler.handle_key(key(KeyCode::Char('j')), InputMode::Normal), None);
        assert_eq!(handler.handle_key(key(KeyCode::Down), InputMode::Normal), Some(Action::MoveDown));
    }

    #[test]
    fn test_customer_action_keys() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Enter), InputMode::Normal), Some(Action::View));
        assert_eq!(handler.handle_key(key(KeyCode::Char('e')), InputMode::Normal), Some(Action::Edit));
        assert_eq!(handler.handle_key(key(KeyCode::Char('d')), InputMode::Normal), Some(Action::Delete));
        assert_eq!(handler.handle_key(key(KeyCode::Char('m')), InputMode::Normal), Some(Action::ToggleLayout));
    }

    #[test]
    fn test_insert_mode_passes_text_through() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('d')), InputMode::Insert), None);
        assert_eq!(handler.handle_key(key(KeyCode::Esc), InputMode::Insert), Some(Action::Back));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key(ctrl_c, InputMode::Insert), Some(Action::Quit));
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('q')), InputMode::Normal), Some(Action::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key(ctrl_c, InputMode::Normal), Some(Action::Quit));
    }
}
