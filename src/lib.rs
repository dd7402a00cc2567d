//! customer-tui: Terminal UI for tailoring customer records
//!
//! This crate renders a customer list as a card grid on narrow terminals
//! and as a table on wide ones, with view, edit and confirmed delete actions.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::AppConfig;
pub use domain::{Customer, CustomerId};
pub use error::{AppError, Result};
pub use ui::confirm::Confirm;
pub use ui::widgets::customer_list::{CustomerList, CustomerListHandler};
