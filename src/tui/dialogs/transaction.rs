//! Add/edit transaction dialog
//!
//! A modal form with one line per field. Tab and Shift+Tab move between
//! fields, Enter saves and Esc cancels. Parsing happens here; the service
//! applies the usual validation on save.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Money, Transaction, TransactionType};
use crate::services::{CreateTransactionInput, UpdateTransactionInput};
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme::Palette;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    Kind,
    #[default]
    Amount,
    Category,
    Date,
    Description,
}

impl TransactionField {
    const ORDER: [TransactionField; 5] = [
        Self::Kind,
        Self::Amount,
        Self::Category,
        Self::Date,
        Self::Description,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Date => "Date",
            Self::Description => "Note",
        }
    }

    fn offset(self, by: usize) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + by) % Self::ORDER.len()]
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn prev(self) -> Self {
        self.offset(Self::ORDER.len() - 1)
    }
}

/// Parsed form values shared by the add and edit paths
struct Parsed {
    kind: TransactionType,
    amount: Money,
    category: Option<String>,
    date: NaiveDate,
    description: String,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub focused: TransactionField,
    kind: TextInput,
    amount: TextInput,
    category: TextInput,
    date: TextInput,
    description: TextInput,
    pub error: Option<String>,
}

impl TransactionForm {
    /// Blank expense form dated `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            focused: TransactionField::Amount,
            kind: TextInput::new("expense or income").with_content("expense"),
            amount: TextInput::new("0.00"),
            category: TextInput::new("e.g. Food"),
            date: TextInput::new("YYYY-MM-DD").with_content(date.format("%Y-%m-%d").to_string()),
            description: TextInput::new("optional"),
            error: None,
        }
    }

    /// Form pre-filled from an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        let mut form = Self::new(txn.date);
        form.kind = form.kind.with_content(txn.kind.as_str());
        form.amount = form.amount.with_content(txn.amount.to_string());
        if txn.is_expense() {
            form.category = form.category.with_content(txn.category.name());
        }
        form.description = form.description.with_content(txn.description.clone());
        form
    }

    pub fn input(&self, field: TransactionField) -> &TextInput {
        match field {
            TransactionField::Kind => &self.kind,
            TransactionField::Amount => &self.amount,
            TransactionField::Category => &self.category,
            TransactionField::Date => &self.date,
            TransactionField::Description => &self.description,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused {
            TransactionField::Kind => &mut self.kind,
            TransactionField::Amount => &mut self.amount,
            TransactionField::Category => &mut self.category,
            TransactionField::Date => &mut self.date,
            TransactionField::Description => &mut self.description,
        }
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.prev();
    }

    fn parse(&self) -> Result<Parsed, String> {
        let kind = self.kind.value().parse::<TransactionType>()?;
        let amount = Money::parse(self.amount.value()).map_err(|e| e.to_string())?;
        let date = NaiveDate::parse_from_str(self.date.value().trim(), "%Y-%m-%d")
            .map_err(|_| "Invalid date. Use YYYY-MM-DD".to_string())?;
        let category = Some(self.category.value().trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(Parsed {
            kind,
            amount,
            category,
            date,
            description: self.description.value().to_string(),
        })
    }

    pub fn create_input(&self) -> Result<CreateTransactionInput, String> {
        let parsed = self.parse()?;
        Ok(CreateTransactionInput {
            kind: parsed.kind,
            amount: parsed.amount,
            category: parsed.category,
            description: Some(parsed.description).filter(|d| !d.trim().is_empty()),
            date: parsed.date,
            receipt_url: None,
        })
    }

    /// Every field is sent, so clearing the note in the form clears it on save
    pub fn update_input(&self) -> Result<UpdateTransactionInput, String> {
        let parsed = self.parse()?;
        Ok(UpdateTransactionInput {
            kind: Some(parsed.kind),
            amount: Some(parsed.amount),
            category: parsed.category,
            description: Some(parsed.description),
            date: Some(parsed.date),
            receipt_url: None,
        })
    }
}

/// Render the transaction form
pub fn render(frame: &mut Frame, app: &App) {
    let p = app.palette;
    let form = &app.transaction_form;
    let area = centered_rect_fixed(60, 13, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.active_dialog {
        ActiveDialog::EditTransaction(_) => " Edit Transaction ",
        _ => " Add Transaction ",
    };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(p.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1); TransactionField::ORDER.len()];
    constraints.extend([
        Constraint::Length(1), // Spacer
        Constraint::Length(1), // Error
        Constraint::Length(1), // Hints
        Constraint::Min(0),
    ]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner.inner(Margin::new(1, 0)));

    for (field, row) in TransactionField::ORDER.iter().zip(rows.iter()) {
        let focused = *field == form.focused;
        frame.render_widget(
            form_line(field.label(), form.input(*field), focused, &p),
            *row,
        );
    }

    let n = TransactionField::ORDER.len();
    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.clone(), Style::default().fg(p.expense))),
            rows[n + 1],
        );
    }
    frame.render_widget(Paragraph::new(form_hints(&p)), rows[n + 2]);
}

/// One labelled input line, shared with the budget form
pub(crate) fn form_line(label: &str, input: &TextInput, focused: bool, p: &Palette) -> Paragraph<'static> {
    let label_style = if focused {
        Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.muted)
    };
    let mut spans = vec![Span::styled(format!("{:>9}: ", label), label_style)];
    spans.extend(input.spans(focused, p));
    Paragraph::new(Line::from(spans))
}

pub(crate) fn form_hints(p: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(p.key)),
        Span::raw(" Next  "),
        Span::styled("[Enter]", Style::default().fg(p.income)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(p.expense)),
        Span::raw(" Cancel"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, UserId};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn type_into(form: &mut TransactionForm, text: &str) {
        text.chars().for_each(|c| form.focused_input().insert(c));
    }

    #[test]
    fn test_field_cycle() {
        let mut form = TransactionForm::new(day());
        assert_eq!(form.focused, TransactionField::Amount);
        form.prev_field();
        assert_eq!(form.focused, TransactionField::Kind);
        form.prev_field();
        assert_eq!(form.focused, TransactionField::Description);
        form.next_field();
        form.next_field();
        assert_eq!(form.focused, TransactionField::Amount);
    }

    #[test]
    fn test_create_input_from_typed_values() {
        let mut form = TransactionForm::new(day());
        type_into(&mut form, "$12.50");
        form.next_field();
        type_into(&mut form, "Food");

        let input = form.create_input().unwrap();
        assert_eq!(input.kind, TransactionType::Expense);
        assert_eq!(input.amount, Money::from_cents(1250));
        assert_eq!(input.category.as_deref(), Some("Food"));
        assert_eq!(input.date, day());
        assert!(input.description.is_none());
    }

    #[test]
    fn test_parse_errors_are_reported() {
        let mut form = TransactionForm::new(day());
        type_into(&mut form, "abc12");
        assert!(form.create_input().unwrap_err().contains("Invalid money format"));

        let mut form = TransactionForm::new(day());
        type_into(&mut form, "5");
        form.focused = TransactionField::Date;
        form.focused_input().insert('x');
        assert!(form.create_input().unwrap_err().contains("Invalid date"));
    }

    #[test]
    fn test_prefilled_from_transaction() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionType::Expense,
            Money::from_cents(4_200),
            Category::new("Transport"),
            day(),
        )
        .with_description("Train");
        let form = TransactionForm::from_transaction(&txn);

        let update = form.update_input().unwrap();
        assert_eq!(update.amount, Some(Money::from_cents(4_200)));
        assert_eq!(update.category.as_deref(), Some("Transport"));
        assert_eq!(update.description.as_deref(), Some("Train"));
        assert_eq!(update.date, Some(day()));
    }
}
