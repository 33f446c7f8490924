//! Export module for Spendwise
//!
//! Provides data export in multiple formats:
//! - CSV: transaction listing (spreadsheet-compatible)
//! - Text: printable transaction report
//! - JSON: machine-readable full export of one user's data
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod text;
pub mod yaml;

pub use self::csv::{export_transactions_csv, TRANSACTIONS_CSV_HEADER};
pub use json::{export_full_json, read_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use text::export_transactions_text;
pub use yaml::{export_full_yaml, read_full_yaml};

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Txt,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// What the export contains, used in default filenames
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Csv | Self::Txt => "transactions",
            Self::Json | Self::Yaml => "export",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "txt" | "text" => Ok(Self::Txt),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("Unknown export format '{}'", other)),
        }
    }
}

/// File name used when no output path is given
/// (`spendwise-transactions-2025-03-15.csv`)
pub fn default_export_filename(kind: &str, extension: &str, date: NaiveDate) -> String {
    format!("spendwise-{}-{}.{}", kind, date.format("%Y-%m-%d"), extension)
}
