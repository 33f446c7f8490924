//! Set/edit budget dialog
//!
//! New budgets take a category and an amount for the month shown in the
//! sidebar. Editing only changes the amount.

use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Budget, Money, MonthKey};
use crate::services::CreateBudgetInput;
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

use super::transaction::{form_hints, form_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetField {
    #[default]
    Category,
    Amount,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetForm {
    pub focused: BudgetField,
    category: TextInput,
    amount: TextInput,
    /// Editing locks the category
    locked: bool,
    pub error: Option<String>,
}

impl BudgetForm {
    pub fn new() -> Self {
        Self {
            focused: BudgetField::Category,
            category: TextInput::new("e.g. Food"),
            amount: TextInput::new("0.00"),
            locked: false,
            error: None,
        }
    }

    pub fn from_budget(budget: &Budget) -> Self {
        Self {
            focused: BudgetField::Amount,
            category: TextInput::new("").with_content(budget.category.name()),
            amount: TextInput::new("0.00").with_content(budget.amount.to_string()),
            locked: true,
            error: None,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused {
            BudgetField::Category => &mut self.category,
            BudgetField::Amount => &mut self.amount,
        }
    }

    /// Toggle between the two fields; a locked category cannot take focus
    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            BudgetField::Category => BudgetField::Amount,
            BudgetField::Amount if self.locked => BudgetField::Amount,
            BudgetField::Amount => BudgetField::Category,
        };
    }

    pub fn amount(&self) -> Result<Money, String> {
        Money::parse(self.amount.value()).map_err(|e| e.to_string())
    }

    pub fn create_input(&self, month: MonthKey) -> Result<CreateBudgetInput, String> {
        let category = self.category.value().trim();
        if category.is_empty() {
            return Err("Enter a category".into());
        }
        Ok(CreateBudgetInput {
            category: category.to_string(),
            amount: self.amount()?,
            month,
        })
    }
}

/// Render the budget form
pub fn render(frame: &mut Frame, app: &App) {
    let p = app.palette;
    let form = &app.budget_form;
    let area = centered_rect_fixed(56, 9, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.active_dialog {
        ActiveDialog::EditBudget(_) => format!(" Edit Budget - {} ", app.current_month),
        _ => format!(" Set Budget - {} ", app.current_month),
    };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(p.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Category
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner.inner(Margin::new(1, 0)));

    let category_focused = form.focused == BudgetField::Category && !form.locked;
    frame.render_widget(form_line("Category", &form.category, category_focused, &p), rows[0]);
    frame.render_widget(
        form_line("Amount", &form.amount, form.focused == BudgetField::Amount, &p),
        rows[1],
    );

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.clone(), Style::default().fg(p.expense))),
            rows[3],
        );
    }
    frame.render_widget(Paragraph::new(form_hints(&p)), rows[4]);
}
