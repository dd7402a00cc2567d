//! Main layout rendering for the TUI.

use crate::app::{App, AppView};
use crate::ui::widgets::customer_detail::CustomerDetailWidget;
use crate::ui::widgets::customer_form::CustomerFormDialog;
use crate::ui::widgets::customer_list::Control;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::rc::Rc;

fn main_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Customer list
            Constraint::Length(3), // Footer
        ])
        .split(area)
}

/// Area the customer list is drawn into for a frame of size `area`
pub fn list_area(area: Rect) -> Rect {
    main_chunks(area)[1]
}

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = main_chunks(area);

    draw_header(frame, app, chunks[0]);
    frame.render_widget(app.customer_list(), chunks[1]);
    draw_footer(frame, app, chunks[2]);

    match &app.view {
        AppView::List => {}
        AppView::Detail(_) => {
            if let Some(customer) = app.viewed_customer() {
                let popup_area = centered_rect(60, 50, area);
                frame.render_widget(CustomerDetailWidget::new(customer), popup_area);
            }
        }
        AppView::Edit => {
            if let Some(form) = &app.edit_form {
                let popup_area = centered_rect(70, 90, area);
                frame.render_widget(CustomerFormDialog::new(form), popup_area);
            }
        }
    }

    if let Some(ref error) = app.error_message {
        draw_error_overlay(frame, error, area);
    } else if let Some(ref msg) = app.status_message {
        draw_status_message(frame, msg, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let layout_name = if app.is_mobile() { "cards" } else { "table" };
    let header = Line::from(vec![
        Span::styled(
            "Customers",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ({})", app.customers.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  [{} · {}]", layout_name, app.layout_mode.label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer_text = match app.view {
        AppView::Edit => " Tab: Next field | Ctrl+S: Save | Esc: Cancel ".to_string(),
        _ => format!(
            " j/k: Navigate | Enter: {} | e: {} | d: {} | m: Layout | r: Reload | q: Quit ",
            Control::Body.label(),
            Control::Edit.label(),
            Control::Delete.label(),
        ),
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

/// Draw a status message at the bottom of the screen
fn draw_status_message(frame: &mut Frame, message: &str, area: Rect) {
    let text_width = u16::try_from(Line::raw(message).width()).unwrap_or(u16::MAX);
    let msg_area = Rect {
        x: area.x + 2,
        y: area.y + area.height.saturating_sub(4),
        width: area.width.saturating_sub(4).min(text_width.saturating_add(4)),
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, msg_area);
    let status = Paragraph::new(message)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(status, msg_area);
}

/// Draw error overlay
fn draw_error_overlay(frame: &mut Frame, error: &str, area: Rect) {
    let popup_area = centered_rect(60, 20, area);
    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(error_widget, popup_area);
}

/// Create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
