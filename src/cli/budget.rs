//! Budget CLI commands
//!
//! Implements CLI commands for monthly category budgets.

use clap::Subcommand;

use super::{parse_amount, parse_month};
use crate::display::budget::format_budget_list;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::reports::dashboard::user_currency;
use crate::services::{BudgetService, CreateBudgetInput};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set a budget for a category
    Set {
        /// Category name
        category: String,
        /// Monthly limit (e.g., "400" or "250.50")
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Change the amount of a budget
    Edit {
        /// Budget ID
        id: String,
        /// New monthly limit
        amount: String,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// List budgets with spending progress
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show categories that have no budget yet
    Available {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> SpendwiseResult<()> {
    let service = BudgetService::new(storage);
    let currency = user_currency(storage)?;

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let budget = service.set(CreateBudgetInput {
                category,
                amount: parse_amount(&amount)?,
                month: parse_month(month.as_deref())?,
            })?;

            println!(
                "Set budget of {} for {} in {}",
                currency.format(budget.amount),
                budget.category,
                budget.month.friendly()
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::Edit { id, amount } => {
            let budget = service
                .find(&id)?
                .ok_or_else(|| SpendwiseError::budget_not_found(&id))?;
            let before = budget.amount;
            let updated = service.update_amount(budget.id, parse_amount(&amount)?)?;

            println!(
                "Updated {} budget for {}: {} -> {}",
                updated.category,
                updated.month.friendly(),
                currency.format(before),
                currency.format(updated.amount)
            );
        }

        BudgetCommands::Delete { id, force } => {
            let budget = service
                .find(&id)?
                .ok_or_else(|| SpendwiseError::budget_not_found(&id))?;

            if !force {
                println!("About to delete budget:");
                println!("  Category: {}", budget.category);
                println!("  Month:    {}", budget.month.friendly());
                println!("  Amount:   {}", currency.format(budget.amount));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(budget.id)?;
            println!(
                "Deleted budget: {} for {}",
                deleted.category,
                deleted.month.friendly()
            );
        }

        BudgetCommands::List { month } => {
            let month = parse_month(month.as_deref())?;
            let progress = service.progress_for_month(month)?;
            print!("{}", format_budget_list(month, &progress, currency));
        }

        BudgetCommands::Available { month } => {
            let month = parse_month(month.as_deref())?;
            let available = service.available_categories(month)?;

            if available.is_empty() {
                println!("Every category has a budget for {}.", month.friendly());
            } else {
                println!("Categories without a budget for {}:", month.friendly());
                for category in available {
                    println!("  {}", category);
                }
            }
        }
    }

    Ok(())
}
