//! UI components for customer-tui.
//!
//! This module contains:
//! - layout: Main layout rendering
//! - input: Keyboard input handling
//! - confirm: Blocking yes/no prompts
//! - widgets: Reusable UI widgets

pub mod confirm;
pub mod input;
pub mod layout;
pub mod widgets;
