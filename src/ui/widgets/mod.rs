//! Reusable UI widgets for customer-tui.

pub mod confirm_dialog;
pub mod customer_detail;
pub mod customer_form;
pub mod customer_list;
pub mod text_input;
