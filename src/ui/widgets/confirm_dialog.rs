//! Yes/No confirmation dialog widget.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Confirmation dialog widget
pub struct ConfirmDialog<'a> {
    /// Title of the dialog
    title: &'a str,
    /// Message to display
    message: &'a str,
    /// Whether "Yes" is selected (vs "No")
    yes_selected: bool,
}

impl<'a> ConfirmDialog<'a> {
    /// Create a new confirmation dialog
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            yes_selected: false,
        }
    }

    /// Set whether yes is selected
    pub fn yes_selected(mut self, selected: bool) -> Self {
        self.yes_selected = selected;
        self
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);

        let message_area = Rect {
            x: inner.x + 1,
            y: inner.y + 1,
            width: inner.width.saturating_sub(2),
            height: inner.height.saturating_sub(3),
        };
        Paragraph::new(self.message)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        let buttons_y = inner.y + inner.height.saturating_sub(1);
        let button_width = 8u16;
        let total_buttons_width = button_width * 2 + 2;
        let start_x = inner.x + inner.width.saturating_sub(total_buttons_width) / 2;

        // Destructive answer in red, safe answer in green
        let yes_style = if self.yes_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let yes_text = if self.yes_selected { "[ Yes  ]" } else { "  Yes   " };
        buf.set_string(start_x, buttons_y, yes_text, yes_style);

        let no_style = if self.yes_selected {
            Style::default().fg(Color::White)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        let no_text = if self.yes_selected { "   No   " } else { "[  No  ]" };
        buf.set_string(start_x + button_width + 2, buttons_y, no_text, no_style);
    }
}
