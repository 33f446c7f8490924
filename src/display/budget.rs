//! Budget display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Currency, MonthKey};
use crate::reports::BudgetProgress;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Format budgets for a month with their progress
pub fn format_budget_list(month: MonthKey, progress: &[BudgetProgress], currency: Currency) -> String {
    if progress.is_empty() {
        return format!(
            "No budgets set for {}.\n\nUse 'spendwise budget set <CATEGORY> <AMOUNT>' to add one.\n",
            month.friendly()
        );
    }

    let rows: Vec<BudgetRow> = progress
        .iter()
        .map(|p| BudgetRow {
            id: p.budget.id.to_string(),
            category: p.budget.category.to_string(),
            budget: currency.format(p.budget.amount),
            spent: currency.format(p.spent),
            remaining: currency.format(p.remaining),
            used: if p.over_budget {
                format!("{:.0}% OVER", p.percent)
            } else {
                format!("{:.0}%", p.percent)
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()));

    let total_budget: crate::models::Money = progress.iter().map(|p| p.budget.amount).sum();
    let total_spent: crate::models::Money = progress.iter().map(|p| p.spent).sum();
    let over = progress.iter().filter(|p| p.over_budget).count();

    let mut output = format!("Budgets for {}\n\n{}\n\n", month.friendly(), table);
    output.push_str(&format!(
        "Total budgeted: {}  Spent: {}\n",
        currency.format(total_budget),
        currency.format(total_spent)
    ));
    if over > 0 {
        output.push_str(&format!("{} categor{} over budget\n", over, if over == 1 { "y" } else { "ies" }));
    }
    output
}

/// Format a single budget's progress
pub fn format_budget_details(progress: &BudgetProgress, currency: Currency) -> String {
    let budget = &progress.budget;
    let mut output = String::new();

    output.push_str(&format!("Budget: {} ({})\n", budget.category, budget.month.friendly()));
    output.push_str(&format!("  ID:        {}\n", budget.id));
    output.push_str(&format!("  Amount:    {}\n", currency.format(budget.amount)));
    output.push_str(&format!("  Spent:     {}\n", currency.format(progress.spent)));
    output.push_str(&format!("  Remaining: {}\n", currency.format(progress.remaining)));
    output.push_str(&format!("  Progress:  {}\n", progress_bar(progress.display_percent(), 20)));

    if progress.over_budget {
        output.push_str(&format!(
            "\n  Over budget by {}\n",
            currency.format(-progress.remaining)
        ));
    }

    output
}

/// Text progress bar, e.g. `[#####.....]  50%`
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        percent
    )
}
