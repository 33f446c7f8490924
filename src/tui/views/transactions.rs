//! Transactions view
//!
//! Table of the selected month's transactions, newest first

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::transaction::truncate;
use crate::tui::app::App;

use super::view_block;

/// Render the transactions view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let p = app.palette;
    let transactions = app.month_transactions();
    let block = view_block(
        format!(
            " Transactions - {} ({}) ",
            app.current_month.friendly(),
            transactions.len()
        ),
        &p,
    );

    if transactions.is_empty() {
        let text = Paragraph::new("No transactions this month. Press a to add one, [ and ] to change month.")
            .block(block)
            .style(Style::default().fg(p.muted));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Length(8),  // Type
        Constraint::Length(16), // Category
        Constraint::Length(14), // Amount
        Constraint::Min(10),    // Description
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Type").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Amount").style(bold),
        Cell::from("Description").style(bold),
    ])
    .style(Style::default().fg(p.key))
    .height(1);

    let currency = app.profile.currency();
    let rows: Vec<Row> = transactions
        .iter()
        .map(|txn| {
            let (amount, style) = if txn.is_expense() {
                (-txn.amount, Style::default().fg(p.expense))
            } else {
                (txn.amount, Style::default().fg(p.income))
            };
            Row::new(vec![
                Cell::from(txn.date.format("%Y-%m-%d").to_string()),
                Cell::from(txn.kind.to_string()),
                Cell::from(truncate(&txn.category.to_string(), 16)),
                Cell::from(currency.format(amount)).style(style),
                Cell::from(truncate(&txn.description, 40)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(p.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
