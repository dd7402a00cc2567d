//! Infrastructure services for customer-tui.
//!
//! This module contains:
//! - CustomerService: Loading customer records from a JSON file

mod customer;

pub use customer::CustomerService;
