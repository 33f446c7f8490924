//! Budgets view
//!
//! One gauge per budget of the selected month

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::reports::aggregate::BudgetProgress;
use crate::services::BudgetService;
use crate::tui::app::App;

use super::{render_error, view_block};

const GAUGE_HEIGHT: u16 = 3;

/// Render the budgets view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Budgets - {} ", app.current_month.friendly());
    let progress = match BudgetService::new(app.storage).progress_for_month(app.current_month) {
        Ok(progress) => progress,
        Err(e) => return render_error(frame, app, area, title, &e),
    };

    let block = view_block(title, &app.palette);
    if progress.is_empty() {
        let text = Paragraph::new("No budgets this month. Press a to set one.")
            .block(block)
            .style(Style::default().fg(app.palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = (inner.height / GAUGE_HEIGHT).max(1) as usize;
    let first = app.selected_index.saturating_sub(visible - 1);
    let shown: Vec<&BudgetProgress> = progress.iter().skip(first).take(visible).collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            shown
                .iter()
                .map(|_| Constraint::Length(GAUGE_HEIGHT))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (offset, (item, row)) in shown.iter().zip(rows.iter()).enumerate() {
        let selected = first + offset == app.selected_index;
        render_gauge(frame, app, item, *row, selected);
    }
}

fn render_gauge(frame: &mut Frame, app: &App, item: &BudgetProgress, area: Rect, selected: bool) {
    let c = app.profile.currency();
    let p = app.palette;
    let color = if item.over_budget {
        p.expense
    } else if item.percent >= 80.0 {
        p.warning
    } else {
        p.income
    };

    let border = if selected {
        Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.muted)
    };

    let block = Block::default()
        .title(format!(" {} ", item.budget.category))
        .borders(Borders::ALL)
        .border_style(border);

    let label = format!(
        "{} of {} ({:.0}%)",
        c.format(item.spent),
        c.format(item.budget.amount),
        item.percent
    );

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color))
        .ratio((item.display_percent() / 100.0).clamp(0.0, 1.0))
        .label(label);

    frame.render_widget(gauge, area);
}
