//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers
//! based on the current application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::app::{ActiveDialog, ActiveView, App};
use super::event::Event;
use super::widgets::TextInput;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(_) | Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    handle_normal_key(app, key);
    Ok(())
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog.clone() {
        ActiveDialog::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.close_dialog();
                app.set_status("Delete cancelled");
            }
            _ => {}
        },
        ActiveDialog::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.close_dialog();
            }
        }
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            handle_transaction_form_key(app, key)
        }
        ActiveDialog::AddBudget | ActiveDialog::EditBudget(_) => handle_budget_form_key(app, key),
        ActiveDialog::None => {}
    }
}

fn handle_transaction_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_transaction_form(),
        KeyCode::Tab | KeyCode::Down => app.transaction_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.transaction_form.prev_field(),
        code => {
            app.transaction_form.error = None;
            edit_input(app.transaction_form.focused_input(), code);
        }
    }
}

fn handle_budget_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_budget_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => app.budget_form.next_field(),
        code => {
            app.budget_form.error = None;
            edit_input(app.budget_form.focused_input(), code);
        }
    }
}

/// Apply a text-editing key to the focused input
fn edit_input(input: &mut TextInput, code: KeyCode) {
    match code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        // View switching
        KeyCode::Char('1') => app.switch_view(ActiveView::Dashboard),
        KeyCode::Char('2') => app.switch_view(ActiveView::Transactions),
        KeyCode::Char('3') => app.switch_view(ActiveView::Budgets),
        KeyCode::Char('4') => app.switch_view(ActiveView::Analytics),
        KeyCode::Tab => app.switch_view(app.active_view.next()),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            let max = app.row_count();
            app.move_down(max);
        }
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('[') => app.prev_month(),
        KeyCode::Char(']') => app.next_month(),

        // Records
        KeyCode::Char('a') => match app.active_view {
            ActiveView::Budgets => app.open_add_budget(),
            _ => app.open_add_transaction(),
        },
        KeyCode::Char('e') => match app.active_view {
            ActiveView::Transactions => app.open_edit_transaction(),
            ActiveView::Budgets => app.open_edit_budget(),
            _ => {}
        },
        KeyCode::Char('d') if app.active_view == ActiveView::Transactions => app.request_delete(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendwisePaths;
    use crate::config::settings::Settings;
    use crate::models::{Money, TransactionType, UserId, UserProfile};
    use crate::services::{CreateTransactionInput, TransactionService};
    use crate::storage::Storage;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        text.chars().for_each(|c| press(app, KeyCode::Char(c)));
    }

    fn clear_field(app: &mut App) {
        press(app, KeyCode::End);
        for _ in 0..20 {
            press(app, KeyCode::Backspace);
        }
    }

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, UserId::new()).unwrap();
        let service = TransactionService::new(&storage);
        for cents in [1200, 3400] {
            service
                .create(CreateTransactionInput {
                    kind: TransactionType::Expense,
                    amount: Money::from_cents(cents),
                    category: Some("Food".into()),
                    description: None,
                    date: chrono::Local::now().date_naive(),
                    receipt_url: None,
                })
                .unwrap();
        }
        (temp_dir, storage)
    }

    fn app<'a>(storage: &'a Storage, settings: &'a Settings) -> App<'a> {
        let profile = UserProfile::new(storage.user_id(), "ana@example.com", "Ana");
        App::new(storage, settings, profile)
    }

    #[test]
    fn test_view_switching() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_view, ActiveView::Budgets);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_view, ActiveView::Analytics);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_view, ActiveView::Dashboard);
    }

    #[test]
    fn test_month_navigation() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);
        let start = app.current_month;

        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.current_month, start.prev());
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.current_month, start.next());
    }

    #[test]
    fn test_selection_is_bounded() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('2'));
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.selected_index, 1);
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.active_dialog, ActiveDialog::ConfirmDelete(_)));

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.has_dialog());
        assert_eq!(storage.transactions.count().unwrap(), 2);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(storage.transactions.count().unwrap(), 1);
        assert!(app.status_message.as_deref().unwrap().starts_with("Deleted Food"));
    }

    #[test]
    fn test_delete_ignored_outside_transactions() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('d'));
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_add_transaction_from_form() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.active_dialog, ActiveDialog::AddTransaction);

        type_text(&mut app, "19.99");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Transport");
        press(&mut app, KeyCode::Enter);

        assert!(!app.has_dialog());
        assert_eq!(storage.transactions.count().unwrap(), 3);
        assert!(app.status_message.as_deref().unwrap().starts_with("Added Transport"));
        assert_eq!(app.row_count(), 3);
    }

    #[test]
    fn test_form_keeps_typed_keys_and_shows_errors() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert!(app.has_dialog());

        press(&mut app, KeyCode::Enter);
        assert!(app.has_dialog());
        assert!(app.transaction_form.error.is_some());

        press(&mut app, KeyCode::Backspace);
        assert!(app.transaction_form.error.is_none());
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Enter);
        assert!(app
            .transaction_form
            .error
            .as_deref()
            .unwrap()
            .contains("category"));

        press(&mut app, KeyCode::Esc);
        assert!(!app.has_dialog());
        assert!(!app.should_quit);
        assert_eq!(storage.transactions.count().unwrap(), 2);
    }

    #[test]
    fn test_edit_transaction_from_form() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('2'));
        let selected = app.selected_transaction().unwrap();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.active_dialog, ActiveDialog::EditTransaction(selected.id));

        clear_field(&mut app);
        type_text(&mut app, "50");
        press(&mut app, KeyCode::Enter);

        assert!(!app.has_dialog());
        let updated = storage.transactions.get(selected.id).unwrap().unwrap();
        assert_eq!(updated.amount, Money::from_cents(5_000));
        assert_eq!(updated.category.name(), "Food");
        assert_eq!(storage.transactions.count().unwrap(), 2);
    }

    #[test]
    fn test_set_and_edit_budget_from_form() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('e'));
        assert!(!app.has_dialog());
        assert_eq!(app.status_message.as_deref(), Some("No budget selected"));

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.active_dialog, ActiveDialog::AddBudget);
        type_text(&mut app, "Food");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "300");
        press(&mut app, KeyCode::Enter);
        assert!(!app.has_dialog());

        let budgets = storage.budgets.get_by_month(app.current_month).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount, Money::from_cents(30_000));

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.active_dialog, ActiveDialog::EditBudget(budgets[0].id));
        clear_field(&mut app);
        type_text(&mut app, "450");
        press(&mut app, KeyCode::Enter);

        let budgets = storage.budgets.get_by_month(app.current_month).unwrap();
        assert_eq!(budgets[0].amount, Money::from_cents(45_000));
        assert!(app.status_message.as_deref().unwrap().starts_with("Budget for Food"));
    }

    #[test]
    fn test_quit() {
        let (_dir, storage) = setup();
        let settings = Settings::default();
        let mut app = app(&storage, &settings);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
