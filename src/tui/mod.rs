//! Terminal User Interface module
//!
//! A ratatui front end with dashboard, transactions, budgets and analytics
//! views. It is started only for a user whose profile is ready.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
