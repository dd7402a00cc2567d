//! Domain entities for customer-tui.
//!
//! - Customer: a tailoring client with contact info and measurement summaries

mod customer;

pub use customer::{Customer, CustomerId};
