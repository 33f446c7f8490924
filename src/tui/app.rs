//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use crate::config::settings::Settings;
use crate::models::{Budget, BudgetId, MonthKey, Transaction, TransactionId, UserProfile};
use crate::services::{BudgetService, TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::dialogs::budget::BudgetForm;
use super::dialogs::transaction::TransactionForm;
use super::theme::Palette;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Transactions,
    Budgets,
    Analytics,
}

impl ActiveView {
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Dashboard,
        ActiveView::Transactions,
        ActiveView::Budgets,
        ActiveView::Analytics,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Budgets => "Budgets",
            Self::Analytics => "Analytics",
        }
    }

    /// The view after this one, wrapping around
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    ConfirmDelete(TransactionId),
    AddTransaction,
    EditTransaction(TransactionId),
    AddBudget,
    EditBudget(BudgetId),
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Profile of the signed-in user
    pub profile: UserProfile,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Month shown by the dashboard, transactions and budgets views
    pub current_month: MonthKey,

    /// Selected row in the current list
    pub selected_index: usize,

    /// Status message to display
    pub status_message: Option<String>,

    /// Colours picked from the profile's theme preference
    pub palette: Palette,

    /// State of the add/edit transaction dialog
    pub transaction_form: TransactionForm,

    /// State of the set/edit budget dialog
    pub budget_form: BudgetForm,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a Storage, settings: &'a Settings, profile: UserProfile) -> Self {
        let palette = Palette::for_theme(profile.preferences.theme);
        Self {
            storage,
            settings,
            profile,
            should_quit: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            current_month: MonthKey::current(),
            selected_index: 0,
            status_message: None,
            palette,
            transaction_form: TransactionForm::default(),
            budget_form: BudgetForm::default(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.selected_index = 0;
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Transactions of the current month, newest first
    pub fn month_transactions(&self) -> Vec<Transaction> {
        let filter = TransactionFilter::new()
            .date_range(self.current_month.start_date(), self.current_month.end_date());
        TransactionService::new(self.storage)
            .list(filter)
            .unwrap_or_default()
    }

    /// Number of rows in the list of the active view
    pub fn row_count(&self) -> usize {
        match self.active_view {
            ActiveView::Transactions => self.month_transactions().len(),
            ActiveView::Budgets => self
                .storage
                .budgets
                .get_by_month(self.current_month)
                .map(|b| b.len())
                .unwrap_or(0),
            ActiveView::Dashboard | ActiveView::Analytics => 0,
        }
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self, max: usize) {
        if self.selected_index < max.saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    pub fn prev_month(&mut self) {
        self.current_month = self.current_month.prev();
        self.selected_index = 0;
    }

    pub fn next_month(&mut self) {
        self.current_month = self.current_month.next();
        self.selected_index = 0;
    }

    /// The transaction under the cursor in the transactions view
    pub fn selected_transaction(&self) -> Option<Transaction> {
        if self.active_view != ActiveView::Transactions {
            return None;
        }
        self.month_transactions().into_iter().nth(self.selected_index)
    }

    /// Ask for confirmation before deleting the selected transaction
    pub fn request_delete(&mut self) {
        match self.selected_transaction() {
            Some(txn) => self.open_dialog(ActiveDialog::ConfirmDelete(txn.id)),
            None => self.set_status("No transaction selected"),
        }
    }

    /// Delete the transaction named by the open confirmation dialog
    pub fn confirm_delete(&mut self) {
        let ActiveDialog::ConfirmDelete(id) = self.active_dialog.clone() else {
            return;
        };
        self.close_dialog();

        match TransactionService::new(self.storage).delete(id) {
            Ok(deleted) => {
                self.set_status(format!(
                    "Deleted {} {} on {}",
                    deleted.category,
                    self.profile.currency().format(deleted.amount),
                    deleted.date
                ));
                let remaining = self.row_count();
                if self.selected_index >= remaining {
                    self.selected_index = remaining.saturating_sub(1);
                }
            }
            Err(e) => self.set_status(format!("Error: {}", e)),
        }
    }

    /// Open an empty transaction form dated today, or the first of the
    /// shown month when today falls outside it
    pub fn open_add_transaction(&mut self) {
        let today = chrono::Local::now().date_naive();
        let date = if self.current_month.contains(today) {
            today
        } else {
            self.current_month.start_date()
        };
        self.transaction_form = TransactionForm::new(date);
        self.open_dialog(ActiveDialog::AddTransaction);
    }

    pub fn open_edit_transaction(&mut self) {
        match self.selected_transaction() {
            Some(txn) => {
                self.transaction_form = TransactionForm::from_transaction(&txn);
                self.open_dialog(ActiveDialog::EditTransaction(txn.id));
            }
            None => self.set_status("No transaction selected"),
        }
    }

    /// Save the transaction form; errors stay in the dialog
    pub fn submit_transaction_form(&mut self) {
        let service = TransactionService::new(self.storage);
        let result = match self.active_dialog {
            ActiveDialog::AddTransaction => self
                .transaction_form
                .create_input()
                .map(|input| service.create(input).map(|t| ("Added", t))),
            ActiveDialog::EditTransaction(id) => self
                .transaction_form
                .update_input()
                .map(|input| service.update(id, input).map(|t| ("Updated", t))),
            _ => return,
        };

        match result {
            Ok(Ok((verb, txn))) => {
                self.close_dialog();
                self.set_status(format!(
                    "{} {} {} on {}",
                    verb,
                    txn.category,
                    self.profile.currency().format(txn.amount),
                    txn.date
                ));
            }
            Ok(Err(e)) => self.transaction_form.error = Some(e.to_string()),
            Err(message) => self.transaction_form.error = Some(message),
        }
    }

    /// The budget under the cursor in the budgets view
    pub fn selected_budget(&self) -> Option<Budget> {
        if self.active_view != ActiveView::Budgets {
            return None;
        }
        BudgetService::new(self.storage)
            .list_for_month(self.current_month)
            .ok()?
            .into_iter()
            .nth(self.selected_index)
    }

    pub fn open_add_budget(&mut self) {
        self.budget_form = BudgetForm::new();
        self.open_dialog(ActiveDialog::AddBudget);
    }

    pub fn open_edit_budget(&mut self) {
        match self.selected_budget() {
            Some(budget) => {
                self.budget_form = BudgetForm::from_budget(&budget);
                self.open_dialog(ActiveDialog::EditBudget(budget.id));
            }
            None => self.set_status("No budget selected"),
        }
    }

    /// Save the budget form for the shown month; errors stay in the dialog
    pub fn submit_budget_form(&mut self) {
        let service = BudgetService::new(self.storage);
        let result = match self.active_dialog {
            ActiveDialog::AddBudget => self
                .budget_form
                .create_input(self.current_month)
                .map(|input| service.set(input)),
            ActiveDialog::EditBudget(id) => self
                .budget_form
                .amount()
                .map(|amount| service.update_amount(id, amount)),
            _ => return,
        };

        match result {
            Ok(Ok(budget)) => {
                self.close_dialog();
                self.set_status(format!(
                    "Budget for {} is {}",
                    budget.category,
                    self.profile.currency().format(budget.amount)
                ));
            }
            Ok(Err(e)) => self.budget_form.error = Some(e.to_string()),
            Err(message) => self.budget_form.error = Some(message),
        }
    }
}
