//! Application state and main event loop.
//!
//! The app owns the customer records. The list widget only reports what the
//! user activated; the app decides what an edit, delete or view means.

use crate::config::AppConfig;
use crate::domain::{Customer, CustomerId};
use crate::error::{AppError, CustomerError, Result};
use crate::services::CustomerService;
use crate::ui::confirm::{Confirm, TerminalConfirm};
use crate::ui::input::{Action, InputHandler, InputMode};
use crate::ui::layout;
use crate::ui::widgets::customer_form::{CustomerForm, FormAction};
use crate::ui::widgets::customer_list::{Control, CustomerList, CustomerListHandler, Target};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{buffer::Buffer, prelude::*};
use std::time::{Duration, Instant};

/// Application view state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppView {
    /// Customer list
    #[default]
    List,
    /// Viewing one customer
    Detail(CustomerId),
    /// Editing one customer
    Edit,
}

/// How the list picks between cards and table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Cards below the configured breakpoint, table above it
    #[default]
    Auto,
    Cards,
    Table,
}

impl LayoutMode {
    /// Next mode in the toggle cycle
    pub fn next(self) -> Self {
        match self {
            LayoutMode::Auto => LayoutMode::Cards,
            LayoutMode::Cards => LayoutMode::Table,
            LayoutMode::Table => LayoutMode::Auto,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayoutMode::Auto => "auto",
            LayoutMode::Cards => "cards",
            LayoutMode::Table => "table",
        }
    }
}

/// A list callback, queued until the list borrow ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    Edit(Customer),
    Delete(CustomerId),
    View(Customer),
}

#[derive(Debug, Default)]
struct PendingIntents(Vec<ListIntent>);

impl CustomerListHandler for PendingIntents {
    fn on_edit(&mut self, customer: &Customer) {
        self.0.push(ListIntent::Edit(customer.clone()));
    }

    fn on_delete(&mut self, id: &CustomerId) {
        self.0.push(ListIntent::Delete(id.clone()));
    }

    fn on_view(&mut self, customer: &Customer) {
        self.0.push(ListIntent::View(customer.clone()));
    }
}

/// Main application state
pub struct App {
    /// Loaded configuration
    pub config: AppConfig,
    /// Customers in display order
    pub customers: Vec<Customer>,
    /// Selected customer index in list
    pub selected_index: usize,
    /// Current view
    pub view: AppView,
    /// Card/table selection policy
    pub layout_mode: LayoutMode,
    /// Size of the last drawn frame
    pub viewport: Rect,
    /// Current input mode
    pub input_mode: InputMode,
    /// Error message to display
    pub error_message: Option<String>,
    /// Non-blocking status message
    pub status_message: Option<String>,
    /// Form state while editing
    pub edit_form: Option<CustomerForm>,

    service: Option<CustomerService>,
    input_handler: InputHandler,
    /// Last rendered frame, redrawn under confirmation prompts
    backdrop: Option<Buffer>,
}

impl App {
    /// Create an app that loads customers from `service`
    pub fn new(config: AppConfig, service: CustomerService) -> Self {
        let mut app = Self::with_customers(config, Vec::new());
        app.service = Some(service);
        app
    }

    /// Create an app over an in-memory customer list
    pub fn with_customers(config: AppConfig, customers: Vec<Customer>) -> Self {
        let input_handler = InputHandler::new(config.ui.vim_navigation);
        Self {
            config,
            customers,
            selected_index: 0,
            view: AppView::List,
            layout_mode: LayoutMode::Auto,
            viewport: Rect::new(0, 0, 120, 40),
            input_mode: InputMode::Normal,
            error_message: None,
            status_message: None,
            edit_form: None,
            service: None,
            input_handler,
            backdrop: None,
        }
    }

    /// Force a layout instead of following the terminal width
    pub fn layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    /// Load customers from the backing file, if any, keeping the selected customer selected
    pub fn load(&mut self) -> Result<()> {
        let service = match &self.service {
            Some(service) => service,
            None => return Ok(()),
        };

        let customers = service.load()?;
        let selected = self.selected_customer().map(|c| c.id.clone());
        self.customers = customers;
        if let Some(idx) = selected.and_then(|id| self.position_of(&id)) {
            self.selected_index = idx;
        }
        self.clamp_selection();
        Ok(())
    }

    /// Reload customers, reporting the outcome in the status line
    pub fn reload(&mut self) {
        match self.load() {
            Ok(()) => {
                self.status_message = Some(format!("Loaded {} customers", self.customers.len()));
            }
            Err(e) => {
                tracing::warn!("Reload failed: {}", e);
                self.error_message = Some(format!("Failed to load customers: {}", e));
            }
        }
    }

    /// Whether the list renders as cards
    pub fn is_mobile(&self) -> bool {
        match self.layout_mode {
            LayoutMode::Cards => true,
            LayoutMode::Table => false,
            LayoutMode::Auto => self.viewport.width < self.config.ui.mobile_breakpoint,
        }
    }

    /// The list widget for the current state
    pub fn customer_list(&self) -> CustomerList<'_> {
        let selected = if self.customers.is_empty() {
            None
        } else {
            Some(self.selected_index)
        };
        CustomerList::new(&self.customers, self.is_mobile())
            .selected(selected)
            .two_column_width(self.config.ui.two_column_width)
    }

    /// Screen area the list occupies
    pub fn list_area(&self) -> Rect {
        layout::list_area(self.viewport)
    }

    /// Get the currently selected customer
    pub fn selected_customer(&self) -> Option<&Customer> {
        self.customers.get(self.selected_index)
    }

    fn position_of(&self, id: &CustomerId) -> Option<usize> {
        self.customers.iter().position(|c| &c.id == id)
    }

    /// Customer shown in the detail view
    pub fn viewed_customer(&self) -> Option<&Customer> {
        match &self.view {
            AppView::Detail(id) => self.position_of(id).map(|idx| &self.customers[idx]),
            _ => None,
        }
    }

    /// Run a list activation through the widget and apply what it reports
    pub fn activate<C: Confirm + ?Sized>(&mut self, target: Target, confirm: &mut C) {
        let mut pending = PendingIntents::default();
        self.customer_list().activate(target, &mut pending, confirm);
        for intent in pending.0 {
            self.apply(intent);
        }
    }

    fn apply(&mut self, intent: ListIntent) {
        match intent {
            ListIntent::View(customer) => {
                tracing::debug!("Viewing customer {}", customer.id);
                self.view = AppView::Detail(customer.id);
            }
            ListIntent::Edit(customer) => {
                tracing::debug!("Editing customer {}", customer.id);
                self.edit_form = Some(CustomerForm::edit(&customer));
                self.input_mode = InputMode::Insert;
                self.view = AppView::Edit;
            }
            ListIntent::Delete(id) => self.delete_customer(&id),
        }
    }

    fn delete_customer(&mut self, id: &CustomerId) {
        let idx = match self.position_of(id) {
            Some(idx) => idx,
            None => {
                self.error_message = Some(CustomerError::UnknownId(id.to_string()).to_string());
                return;
            }
        };

        let removed = self.customers.remove(idx);
        tracing::info!("Deleted customer {} ({})", removed.id, removed.name);
        if self.view == AppView::Detail(removed.id.clone()) {
            self.view = AppView::List;
        }
        self.clamp_selection();
        self.status_message = Some(format!("Deleted {}", removed.name));
    }

    /// Write the open form back into the list
    pub fn save_form(&mut self) {
        let form = match self.edit_form.take() {
            Some(form) => form,
            None => return,
        };
        self.input_mode = InputMode::Normal;
        self.view = AppView::List;

        let edited = form.to_customer();
        match self.position_of(&edited.id) {
            Some(idx) => {
                tracing::info!("Updated customer {}", edited.id);
                self.status_message = Some(format!("Saved {}", edited.name));
                self.customers[idx] = edited;
                self.selected_index = idx;
            }
            None => {
                self.error_message =
                    Some(CustomerError::UnknownId(edited.id.to_string()).to_string());
            }
        }
    }

    /// Close the form without saving
    pub fn cancel_form(&mut self) {
        self.edit_form = None;
        self.input_mode = InputMode::Normal;
        self.view = AppView::List;
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.customers.len() {
            self.selected_index = self.customers.len().saturating_sub(1);
        }
    }

    /// Selection step for vertical movement (a full grid row in card mode)
    fn row_step(&self) -> usize {
        self.customer_list().columns(self.list_area())
    }

    /// Move selection back by `step`
    pub fn select_previous(&mut self, step: usize) {
        if self.selected_index >= step {
            self.selected_index -= step;
        }
    }

    /// Move selection forward by `step`
    pub fn select_next(&mut self, step: usize) {
        if self.selected_index + step < self.customers.len() {
            self.selected_index += step;
        }
    }

    /// Record a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        let was_mobile = self.is_mobile();
        self.viewport = Rect::new(0, 0, width, height);
        if was_mobile != self.is_mobile() {
            tracing::debug!("Layout switched, cards = {}", self.is_mobile());
        }
    }

    /// Handle a key event, returns true when the app should quit
    pub fn handle_key<C: Confirm + ?Sized>(&mut self, key: KeyEvent, confirm: &mut C) -> bool {
        // Clear messages on any key press
        self.error_message = None;
        self.status_message = None;

        match self.view {
            AppView::List => self.handle_list_key(key, confirm),
            AppView::Detail(_) => self.handle_detail_key(key, confirm),
            AppView::Edit => self.handle_edit_key(key),
        }
    }

    fn handle_list_key<C: Confirm + ?Sized>(&mut self, key: KeyEvent, confirm: &mut C) -> bool {
        let action = match self.input_handler.handle_key(key, self.input_mode) {
            Some(action) => action,
            None => return false,
        };

        match action {
            Action::MoveUp => self.select_previous(self.row_step()),
            Action::MoveDown => self.select_next(self.row_step()),
            Action::MoveLeft if self.row_step() > 1 => self.select_previous(1),
            Action::MoveRight if self.row_step() > 1 => self.select_next(1),
            Action::Home => self.selected_index = 0,
            Action::End => self.selected_index = self.customers.len().saturating_sub(1),
            Action::View => self.activate_selected(Control::Body, confirm),
            Action::Edit => self.activate_selected(Control::Edit, confirm),
            Action::Delete => self.activate_selected(Control::Delete, confirm),
            Action::ToggleLayout => {
                self.layout_mode = self.layout_mode.next();
                self.status_message = Some(format!("Layout: {}", self.layout_mode.label()));
            }
            Action::Reload => self.reload(),
            Action::Quit | Action::Back => return true,
            Action::MoveLeft | Action::MoveRight => {}
        }
        false
    }

    fn activate_selected<C: Confirm + ?Sized>(&mut self, control: Control, confirm: &mut C) {
        if self.selected_customer().is_some() {
            self.activate(Target::new(self.selected_index, control), confirm);
        }
    }

    fn handle_detail_key<C: Confirm + ?Sized>(&mut self, key: KeyEvent, confirm: &mut C) -> bool {
        let index = match self.viewed_customer().and_then(|c| self.position_of(&c.id)) {
            Some(index) => index,
            None => {
                self.view = AppView::List;
                return false;
            }
        };

        match self.input_handler.handle_key(key, self.input_mode) {
            Some(Action::Edit) => self.activate(Target::new(index, Control::Edit), confirm),
            Some(Action::Delete) => self.activate(Target::new(index, Control::Delete), confirm),
            Some(Action::Back) | Some(Action::View) => self.view = AppView::List,
            Some(Action::Quit) => return true,
            _ => {}
        }
        false
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> bool {
        match self.input_handler.handle_key(key, self.input_mode) {
            Some(Action::Quit) => return true,
            Some(Action::Back) => {
                self.cancel_form();
                return false;
            }
            _ => {}
        }

        let action = match self.edit_form.as_mut() {
            Some(form) => form.handle_key(key),
            None => FormAction::Cancel,
        };
        match action {
            FormAction::Save => self.save_form(),
            FormAction::Cancel => self.cancel_form(),
            FormAction::None => {}
        }
        false
    }

    /// Handle a mouse event over the list
    pub fn handle_mouse<C: Confirm + ?Sized>(&mut self, mouse: MouseEvent, confirm: &mut C) {
        if self.view != AppView::List {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.list_area();
                let target = self.customer_list().target_at(area, mouse.column, mouse.row);
                if let Some(target) = target {
                    self.error_message = None;
                    self.status_message = None;
                    self.selected_index = target.index;
                    self.activate(target, confirm);
                }
            }
            MouseEventKind::ScrollDown => self.select_next(1),
            MouseEventKind::ScrollUp => self.select_previous(1),
            _ => {}
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let completed = terminal.draw(|f| layout::draw(f, self))?;
        self.viewport = completed.area;
        self.backdrop = Some(completed.buffer.clone());
        Ok(())
    }

    /// Run the main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        let mut last_tick = Instant::now();

        loop {
            self.draw(terminal)?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).map_err(|e| AppError::Terminal(e.to_string()))? {
                match event::read().map_err(|e| AppError::Terminal(e.to_string()))? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let mut confirm = TerminalConfirm::new(terminal, self.backdrop.take());
                        if self.handle_key(key, &mut confirm) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => {
                        let mut confirm = TerminalConfirm::new(terminal, self.backdrop.take());
                        self.handle_mouse(mouse, &mut confirm);
                    }
                    Event::Resize(width, height) => {
                        tracing::debug!("Terminal resized to {}x{}", width, height);
                        self.resize(width, height);
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }

            // Let the caller's shutdown signal run between events
            tokio::task::yield_now().await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn customers() -> Vec<Customer> {
        vec![
            Customer::new("1", "Alice", "555-0100", "M", "32x34").with_other(""),
            Customer::new("2", "Bongani", "555-0142", "L", "36x32"),
            Customer::new("3", "Chen", "555-0177", "S", "30x30"),
        ]
    }

    fn app() -> App {
        App::with_customers(AppConfig::default(), customers())
    }

    fn yes(_: &str) -> bool {
        true
    }

    fn no(_: &str) -> bool {
        false
    }

    #[test]
    fn test_auto_layout_follows_width() {
        let mut app = app();
        app.resize(150, 40);
        assert!(!app.is_mobile());
        app.resize(60, 40);
        assert!(app.is_mobile());

        let forced = App::with_customers(AppConfig::default(), customers())
            .layout_mode(LayoutMode::Table);
        assert!(!forced.is_mobile());
    }

    #[test]
    fn test_toggle_layout_cycles_modes() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('m')), &mut yes);
        assert_eq!(app.layout_mode, LayoutMode::Cards);
        app.handle_key(key(KeyCode::Char('m')), &mut yes);
        assert_eq!(app.layout_mode, LayoutMode::Table);
        app.handle_key(key(KeyCode::Char('m')), &mut yes);
        assert_eq!(app.layout_mode, LayoutMode::Auto);
    }

    #[test]
    fn test_confirmed_delete_removes_customer() {
        let mut app = app();
        app.selected_index = 2;
        app.handle_key(key(KeyCode::Char('d')), &mut yes);

        let ids: Vec<&str> = app.customers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.view, AppView::List);
    }

    #[test]
    fn test_declined_delete_keeps_customer() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('d')), &mut no);
        assert_eq!(app.customers.len(), 3);
        assert_eq!(app.view, AppView::List);
    }

    #[test]
    fn test_enter_opens_detail() {
        let mut app = app();
        app.handle_key(key(KeyCode::Down), &mut yes);
        app.handle_key(key(KeyCode::Enter), &mut yes);
        assert_eq!(app.view, AppView::Detail(CustomerId::new("2")));
        assert_eq!(app.viewed_customer().map(|c| c.name.as_str()), Some("Bongani"));

        app.handle_key(key(KeyCode::Esc), &mut yes);
        assert_eq!(app.view, AppView::List);
    }

    #[test]
    fn test_delete_from_detail_returns_to_list() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter), &mut yes);
        app.handle_key(key(KeyCode::Char('d')), &mut yes);
        assert_eq!(app.view, AppView::List);
        assert_eq!(app.customers.len(), 2);
        assert_eq!(app.customers[0].id.as_str(), "2");
    }

    #[test]
    fn test_edit_and_save() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('e')), &mut no);
        assert_eq!(app.view, AppView::Edit);
        assert_eq!(app.input_mode, InputMode::Insert);

        // Append to the name, then save
        app.handle_key(key(KeyCode::Char('!')), &mut no);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &mut no);

        assert_eq!(app.view, AppView::List);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.customers[0].name, "Alice!");
        assert_eq!(app.customers[0].other_measurements, None);
    }

    #[test]
    fn test_edit_cancel_keeps_record() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('e')), &mut no);
        app.handle_key(key(KeyCode::Char('x')), &mut no);
        app.handle_key(key(KeyCode::Esc), &mut no);

        assert_eq!(app.view, AppView::List);
        assert!(app.edit_form.is_none());
        assert_eq!(app.customers[0].name, "Alice");
    }

    #[test]
    fn test_mouse_click_on_row_views_customer() {
        let mut app = app().layout_mode(LayoutMode::Table);
        app.resize(150, 30);
        let region = app.customer_list().regions(app.list_area())[1];

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: region.body.x + 1,
            row: region.body.y,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(click, &mut no);

        assert_eq!(app.selected_index, 1);
        assert_eq!(app.view, AppView::Detail(CustomerId::new("2")));
    }

    #[test]
    fn test_mouse_click_on_delete_confirms_without_viewing() {
        let mut app = app().layout_mode(LayoutMode::Cards);
        app.resize(60, 40);
        let region = app.customer_list().regions(app.list_area())[0];

        let mut prompts = Vec::new();
        let mut confirm = |message: &str| {
            prompts.push(message.to_string());
            true
        };
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: region.delete.x,
            row: region.delete.y,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(click, &mut confirm);

        assert_eq!(prompts.len(), 1);
        assert_eq!(app.view, AppView::List);
        assert_eq!(app.customers.len(), 2);
        assert!(app.customers.iter().all(|c| c.id.as_str() != "1"));
    }

    #[test]
    fn test_card_grid_moves_by_row() {
        let mut app = app().layout_mode(LayoutMode::Cards);
        app.resize(90, 40);
        assert_eq!(app.row_step(), 2);

        app.handle_key(key(KeyCode::Down), &mut yes);
        assert_eq!(app.selected_index, 2);
        app.handle_key(key(KeyCode::Left), &mut yes);
        assert_eq!(app.selected_index, 1);
        // No full row below index 1
        app.handle_key(key(KeyCode::Down), &mut yes);
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_ctrl_c_quits_from_edit_form() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('e')), &mut no);
        assert_eq!(app.view, AppView::Edit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(ctrl_c, &mut no));
        assert_eq!(app.customers[0].name, "Alice");
    }

    #[test]
    fn test_reload_keeps_selected_customer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("customers.json");
        fs::write(
            &path,
            r#"[{"id":"a","name":"Abe","phone":"1","shirt":"S","pants":"30"},
                {"id":"b","name":"Bea","phone":"2","shirt":"M","pants":"32"}]"#,
        )
        .unwrap();

        let mut app = App::new(AppConfig::default(), CustomerService::new(path.clone()));
        app.load().unwrap();
        app.selected_index = 1;

        fs::write(
            &path,
            r#"[{"id":"c","name":"Cy","phone":"3","shirt":"L","pants":"34"},
                {"id":"a","name":"Abe","phone":"1","shirt":"S","pants":"30"},
                {"id":"b","name":"Bea","phone":"2","shirt":"M","pants":"32"}]"#,
        )
        .unwrap();
        app.reload();

        assert_eq!(app.customers.len(), 3);
        assert_eq!(app.selected_index, 2);
        assert_eq!(app.selected_customer().map(|c| c.id.as_str()), Some("b"));
    }

    #[test]
    fn test_load_missing_file_is_customer_error() {
        let temp = TempDir::new().unwrap();
        let service = CustomerService::new(temp.path().join("missing.json"));
        let mut app = App::new(AppConfig::default(), service);

        assert!(matches!(
            app.load(),
            Err(AppError::Customer(CustomerError::NotFound(_)))
        ));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(app.handle_key(key(KeyCode::Char('q')), &mut yes));
    }
}
