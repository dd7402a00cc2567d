//! Customer list widget: a card grid for narrow terminals, a table otherwise.
//!
//! The widget holds no state of its own. It draws the customers it is given
//! and turns an activation (a click or key press resolved to a [`Target`])
//! into exactly one call on the [`CustomerListHandler`] owned by whoever
//! holds the records. Edit and delete buttons sit inside the clickable
//! card or row, so hit-testing resolves buttons before the body and a
//! button activation never reaches `on_view`.

use crate::domain::{Customer, CustomerId};
use crate::ui::confirm::Confirm;
use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, BorderType, Borders},
};
use std::rc::Rc;

/// Prompt shown before a delete is handed to the owner
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this customer?";

/// Marker drawn in front of phone numbers in both layouts
pub const PHONE_ICON: &str = "☎";

const EDIT_ICON: &str = "[✎]";
const DELETE_ICON: &str = "[✗]";
const BUTTON_WIDTH: u16 = 3;
const BUTTON_GAP: u16 = 1;
const EMPTY_CELL: &str = "-";
const DEFAULT_TWO_COLUMN_WIDTH: u16 = 72;

/// Borders, name, phone, divider, shirt, pants
const CARD_BASE_HEIGHT: u16 = 7;

/// Receiver for list interactions.
///
/// The list never mutates customers itself; every change goes through here.
pub trait CustomerListHandler {
    fn on_edit(&mut self, customer: &Customer);
    fn on_delete(&mut self, id: &CustomerId);
    fn on_view(&mut self, customer: &Customer);
}

/// Which part of a card or row was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Anywhere on the card/row outside the buttons
    Body,
    Edit,
    Delete,
}

impl Control {
    /// Accessible label for the control
    pub fn label(self) -> &'static str {
        match self {
            Control::Body => "View customer",
            Control::Edit => "Edit customer",
            Control::Delete => "Delete customer",
        }
    }
}

/// An activation resolved to a customer position and control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Index into the customer slice
    pub index: usize,
    pub control: Control,
}

impl Target {
    pub fn new(index: usize, control: Control) -> Self {
        Self { index, control }
    }
}

/// Screen regions of one rendered customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRegions {
    /// Index into the customer slice
    pub index: usize,
    /// Whole card or row
    pub body: Rect,
    pub edit: Rect,
    pub delete: Rect,
}

impl ItemRegions {
    /// Innermost control under `position`
    pub fn control_at(&self, position: Position) -> Option<Control> {
        if self.edit.contains(position) {
            Some(Control::Edit)
        } else if self.delete.contains(position) {
            Some(Control::Delete)
        } else if self.body.contains(position) {
            Some(Control::Body)
        } else {
            None
        }
    }
}

/// Columns of the desktop table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Name,
    Shirt,
    Pants,
    Other,
    Phone,
    Actions,
}

impl TableColumn {
    pub const ALL: [TableColumn; 6] = [
        TableColumn::Name,
        TableColumn::Shirt,
        TableColumn::Pants,
        TableColumn::Other,
        TableColumn::Phone,
        TableColumn::Actions,
    ];

    /// Column title
    pub fn title(self) -> &'static str {
        match self {
            TableColumn::Name => "Name",
            TableColumn::Shirt => "Shirt Measurements",
            TableColumn::Pants => "Pants Measurements",
            TableColumn::Other => "Other Measurements",
            TableColumn::Phone => "Phone",
            TableColumn::Actions => "Actions",
        }
    }

    /// Titled for screen readers only; the header cell stays blank
    pub fn visually_hidden(self) -> bool {
        matches!(self, TableColumn::Actions)
    }

    fn constraint(self) -> Constraint {
        match self {
            TableColumn::Name => Constraint::Fill(3),
            TableColumn::Shirt => Constraint::Fill(3),
            TableColumn::Pants => Constraint::Fill(2),
            TableColumn::Other => Constraint::Fill(3),
            TableColumn::Phone => Constraint::Length(14),
            TableColumn::Actions => Constraint::Length(BUTTON_WIDTH * 2 + BUTTON_GAP),
        }
    }
}

/// Widget listing customers as cards (mobile) or table rows (desktop)
pub struct CustomerList<'a> {
    customers: &'a [Customer],
    is_mobile: bool,
    selected: Option<usize>,
    two_column_width: u16,
}

impl<'a> CustomerList<'a> {
    /// Create a new customer list widget
    pub fn new(customers: &'a [Customer], is_mobile: bool) -> Self {
        Self {
            customers,
            is_mobile,
            selected: None,
            two_column_width: DEFAULT_TWO_COLUMN_WIDTH,
        }
    }

    /// Highlight (and keep visible) the customer at `selected`
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Minimum width at which the card grid uses two columns
    pub fn two_column_width(mut self, width: u16) -> Self {
        self.two_column_width = width;
        self
    }

    /// Number of cards per grid row; always 1 for the table
    pub fn columns(&self, area: Rect) -> usize {
        if self.is_mobile && area.width >= self.two_column_width {
            2
        } else {
            1
        }
    }

    /// Regions of every customer visible in `area`, in input order
    pub fn regions(&self, area: Rect) -> Vec<ItemRegions> {
        if self.is_mobile {
            self.card_regions(area)
        } else {
            self.table_regions(area)
        }
    }

    /// Resolve a screen position to the control under it
    pub fn target_at(&self, area: Rect, column: u16, row: u16) -> Option<Target> {
        let position = Position::new(column, row);
        self.regions(area).iter().find_map(|region| {
            region
                .control_at(position)
                .map(|control| Target::new(region.index, control))
        })
    }

    /// Dispatch an activation to `handler`.
    ///
    /// Delete asks `confirm` first and does nothing unless the answer is yes.
    pub fn activate<H, C>(&self, target: Target, handler: &mut H, confirm: &mut C)
    where
        H: CustomerListHandler + ?Sized,
        C: Confirm + ?Sized,
    {
        let customer = match self.customers.get(target.index) {
            Some(customer) => customer,
            None => {
                tracing::debug!("Ignoring activation of missing customer {}", target.index);
                return;
            }
        };

        match target.control {
            Control::Body => handler.on_view(customer),
            Control::Edit => handler.on_edit(customer),
            Control::Delete => {
                if confirm.confirm(DELETE_CONFIRMATION) {
                    handler.on_delete(&customer.id);
                } else {
                    tracing::debug!("Delete of customer {} declined", customer.id);
                }
            }
        }
    }

    fn table_block() -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
    }

    fn table_cells(row: Rect) -> Rc<[Rect]> {
        Layout::horizontal(TableColumn::ALL.map(TableColumn::constraint))
            .spacing(1)
            .split(row)
    }

    fn table_regions(&self, area: Rect) -> Vec<ItemRegions> {
        let inner = Self::table_block().inner(area);
        let visible = inner.height.saturating_sub(1) as usize;
        let offset = match self.selected {
            Some(selected) if selected < self.customers.len() && selected >= visible => {
                selected + 1 - visible
            }
            _ => 0,
        };

        (offset..self.customers.len())
            .take(visible)
            .map(|index| {
                let y = inner.y + 1 + (index - offset) as u16;
                let body = Rect::new(inner.x, y, inner.width, 1);
                let cells = Self::table_cells(body);
                let (edit, delete) = action_buttons(cells[cells.len() - 1]);
                ItemRegions {
                    index,
                    body,
                    edit,
                    delete,
                }
            })
            .collect()
    }

    fn card_regions(&self, area: Rect) -> Vec<ItemRegions> {
        if self.customers.is_empty() || area.is_empty() {
            return Vec::new();
        }

        let columns = self.columns(area);
        let slots = Layout::horizontal(vec![Constraint::Fill(1); columns])
            .spacing(1)
            .split(area);

        // Cards in a grid row stretch to the tallest one
        let heights: Vec<u16> = self
            .customers
            .chunks(columns)
            .map(|row| row.iter().map(card_height).max().unwrap_or(0))
            .collect();
        let first_row = self.first_card_row(&heights, columns, area.height);

        let mut regions = Vec::new();
        let mut y = area.y;
        for (row_index, row) in self.customers.chunks(columns).enumerate().skip(first_row) {
            if y >= area.bottom() {
                break;
            }
            let height = heights[row_index].min(area.bottom() - y);
            for (column, _) in row.iter().enumerate() {
                let slot = slots[column];
                let body = Rect::new(slot.x, y, slot.width, height);
                let button_row =
                    Rect::new(body.x + 1, body.y + 1, body.width.saturating_sub(2), 1)
                        .intersection(body);
                let (edit, delete) = action_buttons(button_row);
                regions.push(ItemRegions {
                    index: row_index * columns + column,
                    body,
                    edit,
                    delete,
                });
            }
            y = y.saturating_add(heights[row_index]);
        }
        regions
    }

    /// First grid row to draw so the selected card fits on screen
    fn first_card_row(&self, heights: &[u16], columns: usize, available: u16) -> usize {
        let selected_row = match self.selected {
            Some(selected) if selected < self.customers.len() => selected / columns,
            _ => return 0,
        };

        let mut first = 0;
        while first < selected_row
            && heights[first..=selected_row]
                .iter()
                .map(|h| u32::from(*h))
                .sum::<u32>()
                > u32::from(available)
        {
            first += 1;
        }
        first
    }

    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let block = Self::table_block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let header = Rect::new(inner.x, inner.y, inner.width, 1);
        let header_style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        for (column, cell) in TableColumn::ALL.iter().zip(Self::table_cells(header).iter()) {
            if column.visually_hidden() {
                continue;
            }
            buf.set_stringn(
                cell.x,
                cell.y,
                column.title().to_uppercase(),
                cell.width as usize,
                header_style,
            );
        }

        let text_style = Style::default().fg(Color::Gray);
        for region in self.table_regions(area) {
            let customer = &self.customers[region.index];
            let is_selected = self.selected == Some(region.index);
            if is_selected {
                buf.set_style(region.body, Style::default().bg(Color::DarkGray));
            }

            let cells = Self::table_cells(region.body);
            let name_style = if is_selected {
                Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let values = [
                (customer.name.as_str(), name_style),
                (customer.shirt.as_str(), text_style),
                (customer.pants.as_str(), text_style),
                (customer.other().unwrap_or(EMPTY_CELL), text_style),
            ];
            for ((value, style), cell) in values.iter().zip(cells.iter()) {
                buf.set_stringn(cell.x, cell.y, value, cell.width as usize, *style);
            }

            let phone_cell = cells[4];
            buf.set_line(
                phone_cell.x,
                phone_cell.y,
                &phone_line(&customer.phone),
                phone_cell.width,
            );

            render_buttons(&region, buf);
        }
    }

    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        for region in self.card_regions(area) {
            let customer = &self.customers[region.index];
            render_card(
                customer,
                &region,
                self.selected == Some(region.index),
                buf,
            );
        }
    }
}

impl Widget for CustomerList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.is_mobile {
            self.render_cards(area, buf);
        } else {
            self.render_table(area, buf);
        }
    }
}

fn card_height(customer: &Customer) -> u16 {
    CARD_BASE_HEIGHT + u16::from(customer.other().is_some())
}

/// Edit and delete buttons packed against the right edge of `area`
fn action_buttons(area: Rect) -> (Rect, Rect) {
    let delete_x = area.right().saturating_sub(BUTTON_WIDTH).max(area.x);
    let edit_x = delete_x
        .saturating_sub(BUTTON_GAP + BUTTON_WIDTH)
        .max(area.x);
    let delete = Rect::new(delete_x, area.y, BUTTON_WIDTH, 1).intersection(area);
    let edit = Rect::new(edit_x, area.y, BUTTON_WIDTH, 1).intersection(area);
    (edit, delete)
}

fn render_buttons(region: &ItemRegions, buf: &mut Buffer) {
    if !region.edit.is_empty() {
        buf.set_stringn(
            region.edit.x,
            region.edit.y,
            EDIT_ICON,
            region.edit.width as usize,
            Style::default().fg(Color::Blue),
        );
    }
    if !region.delete.is_empty() {
        buf.set_stringn(
            region.delete.x,
            region.delete.y,
            DELETE_ICON,
            region.delete.width as usize,
            Style::default().fg(Color::Red),
        );
    }
}

fn phone_line(phone: &str) -> Line<'_> {
    let style = Style::default().fg(Color::Gray);
    Line::from(vec![
        Span::styled(PHONE_ICON, style),
        Span::raw(" "),
        Span::styled(phone, style),
    ])
}

fn labelled<'a>(label: &'static str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            label,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(value, Style::default().fg(Color::Gray)),
    ])
}

fn render_card(customer: &Customer, region: &ItemRegions, is_selected: bool, buf: &mut Buffer) {
    let border_style = if is_selected {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = block.inner(region.body);
    block.render(region.body, buf);
    if inner.is_empty() {
        return;
    }

    let name_style = if is_selected {
        Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    // Name stops one cell short of the buttons
    let name_width = if region.edit.is_empty() {
        inner.width
    } else {
        region.edit.x.saturating_sub(inner.x + 1)
    };

    let mut lines = vec![
        Line::styled(customer.name.as_str(), name_style),
        phone_line(&customer.phone),
        Line::styled(
            "─".repeat(inner.width as usize),
            Style::default().fg(Color::DarkGray),
        ),
        labelled("Shirt:", &customer.shirt),
        labelled("Pants:", &customer.pants),
    ];
    if let Some(other) = customer.other() {
        lines.push(labelled("Other:", other));
    }

    for (offset, line) in lines.iter().enumerate() {
        let y = inner.y + offset as u16;
        if y >= inner.bottom() {
            break;
        }
        let width = if offset == 0 { name_width } else { inner.width };
        buf.set_line(inner.x, y, line, width);
    }

    render_buttons(region, buf);
}
