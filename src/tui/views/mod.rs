//! TUI Views module
//!
//! Contains the main views (dashboard, transactions, budgets, analytics)
//! as well as the sidebar and status bar.

pub mod analytics;
pub mod budgets;
pub mod dashboard;
pub mod sidebar;
pub mod status_bar;
pub mod transactions;

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;
use super::theme::Palette;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, layout.main),
        ActiveView::Transactions => transactions::render(frame, app, layout.main),
        ActiveView::Budgets => budgets::render(frame, app, layout.main),
        ActiveView::Analytics => analytics::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::ConfirmDelete(id) => {
            let txn = app.storage.transactions.get(*id).ok().flatten();
            dialogs::confirm::render(frame, txn.as_ref(), app.profile.currency(), &app.palette);
        }
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            dialogs::transaction::render(frame, app)
        }
        ActiveDialog::AddBudget | ActiveDialog::EditBudget(_) => dialogs::budget::render(frame, app),
        ActiveDialog::None => {}
    }
}

/// Bordered block used by every main view
pub(crate) fn view_block(title: String, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
}

/// Show an error in place of a view that failed to load
pub(crate) fn render_error(frame: &mut Frame, app: &App, area: Rect, title: String, error: &dyn std::fmt::Display) {
    let text = Paragraph::new(format!("Could not load data: {}", error))
        .block(view_block(title, &app.palette))
        .style(Style::default().fg(app.palette.expense));
    frame.render_widget(text, area);
}
