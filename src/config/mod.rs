//! Configuration module for Spendwise
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Assistant (LLM) connection settings

pub mod paths;
pub mod settings;

pub use paths::SpendwisePaths;
pub use settings::{AdvisorSettings, Settings};
