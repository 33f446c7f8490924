//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_kind, parse_month, today};
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::SpendwiseResult;
use crate::reports::dashboard::user_currency;
use crate::services::{
    CategoryService, CreateTransactionInput, TransactionFilter, TransactionService,
    UpdateTransactionInput,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Transaction type: income or expense
        kind: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name (ignored for income)
        #[arg(short, long)]
        category: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Link to a receipt
        #[arg(long)]
        receipt: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Filter by category name
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Only transactions in this month (YYYY-MM)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        month: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Search descriptions and categories
        #[arg(short, long)]
        search: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New date
        #[arg(long)]
        date: Option<String>,
        /// New receipt link
        #[arg(long, conflicts_with = "clear_receipt")]
        receipt: Option<String>,
        /// Remove the receipt link
        #[arg(long)]
        clear_receipt: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    cmd: TransactionCommands,
) -> SpendwiseResult<()> {
    let service = TransactionService::new(storage);
    let currency = user_currency(storage)?;

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            description,
            date,
            receipt,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };

            let txn = service.create(CreateTransactionInput {
                kind: parse_kind(&kind)?,
                amount: parse_amount(&amount)?,
                category,
                description,
                date,
                receipt_url: receipt,
            })?;

            println!("Created transaction:");
            println!("  ID:       {}", txn.id);
            println!("  Date:     {}", txn.date);
            println!("  Type:     {}", txn.kind);
            println!("  Category: {}", txn.category);
            println!("  Amount:   {}", currency.format(txn.amount));
            if !txn.description.is_empty() {
                println!("  Note:     {}", txn.description);
            }
        }

        TransactionCommands::List {
            kind,
            category,
            month,
            from,
            to,
            search,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(name) = category {
                filter = filter.category(CategoryService::new(storage).resolve(&name)?);
            }
            if month.is_some() {
                let month = parse_month(month.as_deref())?;
                filter = filter.date_range(month.start_date(), month.end_date());
            }
            if let Some(from) = from {
                filter.start_date = Some(parse_date(&from)?);
            }
            if let Some(to) = to {
                filter.end_date = Some(parse_date(&to)?);
            }
            if let Some(text) = search {
                filter = filter.search(text);
            }

            let transactions = service.list(filter)?;
            print!("{}", format_transaction_register(&transactions, currency));
        }

        TransactionCommands::Show { id } => {
            let txn = service.require(&id)?;
            print!("{}", format_transaction_details(&txn, currency));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            description,
            date,
            receipt,
            clear_receipt,
        } => {
            let txn = service.require(&id)?;

            let receipt_url = if clear_receipt {
                Some(None)
            } else {
                receipt.map(Some)
            };

            let input = UpdateTransactionInput {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category,
                description,
                date: date.as_deref().map(parse_date).transpose()?,
                receipt_url,
            };

            let updated = service.update(txn.id, input)?;

            println!("Updated transaction: {}", updated.id);
            println!("  Date:     {}", updated.date);
            println!("  Type:     {}", updated.kind);
            println!("  Category: {}", updated.category);
            println!("  Amount:   {}", currency.format(updated.amount));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service.require(&id)?;

            if !force {
                println!("About to delete transaction:");
                println!("  Date:     {}", txn.date);
                println!("  Category: {}", txn.category);
                println!("  Amount:   {}", currency.format(txn.amount));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction: {} ({} {})",
                deleted.id,
                deleted.date,
                currency.format(deleted.amount)
            );
        }
    }

    Ok(())
}
