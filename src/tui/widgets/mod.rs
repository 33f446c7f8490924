//! Reusable widgets for the TUI dialogs

pub mod input;

pub use input::TextInput;
