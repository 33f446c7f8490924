//! Plain-text report export
//!
//! A printable listing of transactions, one labelled block per record.

use std::io::Write;

use chrono::NaiveDateTime;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Transaction;

const RULE: &str = "-----------------------------------------------------------";

/// Write a titled plain-text listing of `transactions`, stamped with `generated_at`
pub fn export_transactions_text<W: Write>(
    transactions: &[Transaction],
    title: &str,
    generated_at: NaiveDateTime,
    writer: &mut W,
) -> SpendwiseResult<()> {
    let io_err = |e: std::io::Error| SpendwiseError::Export(e.to_string());

    writeln!(writer, "{}", title).map_err(io_err)?;
    writeln!(writer, "Generated on: {}", generated_at.format("%Y-%m-%d %H:%M")).map_err(io_err)?;
    writeln!(writer, "{}", RULE).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    for txn in transactions {
        writeln!(writer, "Date:        {}", txn.date.format("%Y-%m-%d")).map_err(io_err)?;
        writeln!(writer, "Type:        {}", txn.kind).map_err(io_err)?;
        writeln!(writer, "Category:    {}", txn.category).map_err(io_err)?;
        writeln!(writer, "Amount:      {}", txn.amount.format_with_symbol("$")).map_err(io_err)?;
        writeln!(writer, "Description: {}", txn.description).map_err(io_err)?;
        writeln!(writer, "{}", RULE).map_err(io_err)?;
    }

    writer.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionType, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_text_layout() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionType::Expense,
            Money::from_cents(1999),
            Category::new("Entertainment"),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        )
        .with_description("Concert");
        let now = NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();

        let mut buf = Vec::new();
        export_transactions_text(&[txn], "Transaction Report", now, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = format!(
            "Transaction Report\n\
             Generated on: 2025-03-15 09:05\n\
             {rule}\n\
             \n\
             Date:        2025-03-14\n\
             Type:        expense\n\
             Category:    Entertainment\n\
             Amount:      $19.99\n\
             Description: Concert\n\
             {rule}\n",
            rule = RULE
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_listing_keeps_header() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut buf = Vec::new();
        export_transactions_text(&[], "Empty", now, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 4);
    }
}
