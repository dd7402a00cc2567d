//! Edit form for a single customer.

use crate::domain::{Customer, CustomerId};
use crate::ui::widgets::text_input::{TextInputAction, TextInputState, TextInputWidget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear},
};

/// Editable fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Shirt,
    Pants,
    Other,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Phone,
        FormField::Shirt,
        FormField::Pants,
        FormField::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Phone => "Phone",
            FormField::Shirt => "Shirt",
            FormField::Pants => "Pants",
            FormField::Other => "Other",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Full name",
            FormField::Phone => "555-0100",
            FormField::Shirt => "Size, neck, sleeve",
            FormField::Pants => "Waist x inseam",
            FormField::Other => "Optional",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// What the owner should do after a key reached the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Save,
    Cancel,
}

/// Form state seeded from an existing customer
#[derive(Debug, Clone)]
pub struct CustomerForm {
    id: CustomerId,
    fields: [TextInputState; 5],
    focus: usize,
}

impl CustomerForm {
    /// Start editing `customer`
    pub fn edit(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            fields: [
                TextInputState::with_value(customer.name.as_str()),
                TextInputState::with_value(customer.phone.as_str()),
                TextInputState::with_value(customer.shirt.as_str()),
                TextInputState::with_value(customer.pants.as_str()),
                TextInputState::with_value(customer.other_measurements.as_deref().unwrap_or("")),
            ],
            focus: 0,
        }
    }

    /// Id of the customer being edited
    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn focused(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn field(&self, field: FormField) -> &TextInputState {
        &self.fields[field.index()]
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn focus_previous(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return FormAction::Save;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                FormAction::None
            }
            _ => match self.fields[self.focus].handle_key(key) {
                TextInputAction::Submit if self.focus + 1 == self.fields.len() => FormAction::Save,
                TextInputAction::Submit => {
                    self.focus_next();
                    FormAction::None
                }
                TextInputAction::Cancel => FormAction::Cancel,
                TextInputAction::Changed | TextInputAction::None => FormAction::None,
            },
        }
    }

    /// The edited record; a blank "other" field clears it
    pub fn to_customer(&self) -> Customer {
        let value = |field: FormField| self.field(field).value().to_string();
        let other = value(FormField::Other);
        Customer {
            id: self.id.clone(),
            name: value(FormField::Name),
            phone: value(FormField::Phone),
            shirt: value(FormField::Shirt),
            pants: value(FormField::Pants),
            other_measurements: if other.is_empty() { None } else { Some(other) },
        }
    }
}

/// Popup rendering a [`CustomerForm`]
pub struct CustomerFormDialog<'a> {
    form: &'a CustomerForm,
}

impl<'a> CustomerFormDialog<'a> {
    pub fn new(form: &'a CustomerForm) -> Self {
        Self { form }
    }
}

impl Widget for CustomerFormDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Edit Customer ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints = vec![Constraint::Length(3); FormField::ALL.len()];
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
            TextInputWidget::new(self.form.field(*field))
                .title(field.label())
                .placeholder(field.placeholder())
                .focused(self.form.focused() == *field)
                .render(*row, buf);
        }

        let help = rows[rows.len() - 1];
        buf.set_stringn(
            help.x + 1,
            help.y,
            "Tab: Next field | Ctrl+S: Save | Esc: Cancel",
            help.width.saturating_sub(1) as usize,
            Style::default().fg(Color::DarkGray),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn customer() -> Customer {
        Customer::new("9", "Dana", "555-0109", "M", "30x32").with_other("Cuff 9")
    }

    #[test]
    fn test_seeded_from_customer() {
        let form = CustomerForm::edit(&customer());
        assert_eq!(form.id().as_str(), "9");
        assert_eq!(form.field(FormField::Other).value(), "Cuff 9");
        assert_eq!(form.focused(), FormField::Name);
        assert_eq!(form.to_customer(), customer());
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut form = CustomerForm::edit(&customer());
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focused(), FormField::Phone);
        form.handle_key(key(KeyCode::BackTab));
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused(), FormField::Other);
    }

    #[test]
    fn test_enter_advances_then_saves_on_last_field() {
        let mut form = CustomerForm::edit(&customer());
        for _ in 0..4 {
            assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::None);
        }
        assert_eq!(form.focused(), FormField::Other);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Save);
    }

    #[test]
    fn test_clearing_other_drops_it() {
        let mut form = CustomerForm::edit(&customer());
        form.handle_key(key(KeyCode::BackTab));
        for _ in 0..6 {
            form.handle_key(key(KeyCode::Backspace));
        }
        let edited = form.to_customer();
        assert_eq!(edited.other_measurements, None);
    }

    #[test]
    fn test_ctrl_s_and_esc() {
        let mut form = CustomerForm::edit(&customer());
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(form.handle_key(save), FormAction::Save);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel);
    }
}
