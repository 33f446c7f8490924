//! CSV Export functionality
//!
//! Spreadsheet-friendly transaction export. The description column is always
//! quoted; other text columns are quoted only when they need it.

use std::io::Write;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Transaction;

/// Column header of the transaction export
pub const TRANSACTIONS_CSV_HEADER: &str = "Date,Type,Category,Amount,Description";

/// Export transactions to CSV, one row per transaction in the order given
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> SpendwiseResult<()> {
    writeln!(writer, "{}", TRANSACTIONS_CSV_HEADER)
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;

    for txn in transactions {
        writeln!(
            writer,
            "{},{},{},{:.2},{}",
            txn.date.format("%Y-%m-%d"),
            txn.kind,
            escape_csv(txn.category.name()),
            txn.amount.as_f64(),
            quote_csv(&txn.description)
        )
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    Ok(())
}

/// Escape a string for CSV (handle commas, quotes, newlines)
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        quote_csv(s)
    } else {
        s.to_string()
    }
}

/// Wrap in quotes, doubling any embedded quotes
fn quote_csv(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
