//! CLI commands for reports
//!
//! Dashboard, spending analytics and a month-over-month comparison.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use super::{parse_month, today};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::reports::dashboard::user_currency;
use crate::reports::{month_comparison, monthly_sums, AnalyticsReport, ChangeType, DashboardReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Monthly summary: totals, weekly breakdown, recent transactions, budgets
    Dashboard {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Number of recent transactions to show
        #[arg(short, long)]
        recent: Option<usize>,
    },

    /// Daily spending trend and category breakdown
    Analytics {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare spending with previous months
    Compare {
        /// Month to compare (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Number of months of history to show
        #[arg(long, default_value = "6")]
        months: usize,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    default_recent: usize,
    cmd: ReportCommands,
) -> SpendwiseResult<()> {
    match cmd {
        ReportCommands::Dashboard { month, recent } => {
            let month = parse_month(month.as_deref())?;
            let report = DashboardReport::generate(storage, month, recent.unwrap_or(default_recent))?;
            print!("{}", report.format_terminal());
        }

        ReportCommands::Analytics { output } => {
            let report = AnalyticsReport::generate(storage, today())?;

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    SpendwiseError::Export(format!("Failed to create file {}: {}", path.display(), e))
                })?;
                report.export_csv(BufWriter::new(file))?;
                println!("Analytics exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal());
            }
        }

        ReportCommands::Compare { month, months } => {
            let month = parse_month(month.as_deref())?;
            handle_compare(storage, month, months)?;
        }
    }

    Ok(())
}

fn handle_compare(storage: &Storage, month: crate::models::MonthKey, months: usize) -> SpendwiseResult<()> {
    let currency = user_currency(storage)?;
    let all = storage.transactions.get_all()?;
    let comparison = month_comparison(&all, month);

    println!("Spending: {} vs {}", month.friendly(), month.prev().friendly());
    println!("{}", "=".repeat(50));
    println!("  This month: {}", currency.format(comparison.current));
    println!("  Last month: {}", currency.format(comparison.previous));

    let arrow = match comparison.change_type {
        ChangeType::Increase => "up",
        ChangeType::Decrease => "down",
        ChangeType::Same => "unchanged",
    };
    println!(
        "  Change:     {:+.1}% ({})",
        comparison.change_pct, arrow
    );

    if months > 0 {
        println!();
        println!("{:<10} {:>14} {:>14} {:>14}", "Month", "Income", "Expenses", "Net");
        println!("{}", "-".repeat(55));
        for sum in monthly_sums(&all, month, months) {
            println!(
                "{:<10} {:>14} {:>14} {:>14}",
                sum.month.to_string(),
                currency.format(sum.income),
                currency.format(sum.expenses),
                currency.format(sum.net())
            );
        }
    }

    Ok(())
}
