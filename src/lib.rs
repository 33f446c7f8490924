//! Spendwise - terminal personal-finance tracker
//!
//! This library provides the core functionality for the Spendwise
//! application: recording income and expenses, monthly category budgets,
//! spending analytics, data export and an AI financial coach, behind a
//! local sign-in and profile gate.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, categories, profiles)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `auth`: Local accounts and sessions
//! - `gate`: Sign-in and profile gate run before protected commands
//! - `services`: Business logic layer
//! - `reports`: Aggregation, dashboard and analytics
//! - `export`: CSV, text, JSON and YAML exports
//! - `advisor`: LLM-backed coach and budget recommendations
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise::config::{paths::SpendwisePaths, settings::Settings};
//!
//! let paths = SpendwisePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod advisor;
pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod gate;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{SpendwiseError, SpendwiseResult};
