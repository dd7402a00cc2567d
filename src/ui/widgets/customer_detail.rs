//! Read-only popup showing one customer in full.

use crate::domain::Customer;
use crate::ui::widgets::customer_list::PHONE_ICON;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Widget for viewing a single customer record
pub struct CustomerDetailWidget<'a> {
    customer: &'a Customer,
}

impl<'a> CustomerDetailWidget<'a> {
    pub fn new(customer: &'a Customer) -> Self {
        Self { customer }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let customer = self.customer;
        let label = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let value = Style::default().fg(Color::Gray);
        let field = |name: &'static str, text: &'a str| {
            Line::from(vec![
                Span::styled(format!("{:<7}", name), label),
                Span::styled(text, value),
            ])
        };

        vec![
            Line::from(vec![
                Span::styled(PHONE_ICON, value),
                Span::raw(" "),
                Span::styled(customer.phone.as_str(), value),
            ]),
            Line::default(),
            field("Shirt:", customer.shirt.as_str()),
            field("Pants:", customer.pants.as_str()),
            field("Other:", customer.other().unwrap_or("-")),
            Line::default(),
            Line::styled(
                format!("Customer #{}", customer.id),
                Style::default().fg(Color::DarkGray),
            ),
        ]
    }
}

impl Widget for CustomerDetailWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.customer.name))
            .title_bottom(Line::from(" e: Edit | d: Delete | Esc: Back ").right_aligned());

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_shows_all_fields() {
        let customer = Customer::new("4", "Eve", "555-0104", "XS", "26x28").with_other("Wrist 6");
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        CustomerDetailWidget::new(&customer).render(area, &mut buf);

        let text = text(&buf);
        assert!(text.contains(" Eve "));
        assert!(text.contains("555-0104"));
        assert!(text.contains("Shirt: XS"));
        assert!(text.contains("Pants: 26x28"));
        assert!(text.contains("Other: Wrist 6"));
        assert!(text.contains("Customer #4"));
    }

    #[test]
    fn test_missing_other_shows_dash() {
        let customer = Customer::new("5", "Fay", "555-0105", "M", "30x30");
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        CustomerDetailWidget::new(&customer).render(area, &mut buf);

        assert!(text(&buf).contains("Other: -"));
    }
}
