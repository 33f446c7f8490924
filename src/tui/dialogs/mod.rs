//! Dialog modules for the TUI
//!
//! Modal overlays drawn on top of the active view

pub mod budget;
pub mod confirm;
pub mod help;
pub mod transaction;
