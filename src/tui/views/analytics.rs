//! Analytics view
//!
//! Thirty-day spending sparkline, month-over-month comparison and the
//! current month's top categories.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Sparkline},
    Frame,
};

use crate::reports::aggregate::ChangeType;
use crate::reports::AnalyticsReport;
use crate::tui::app::App;
use crate::tui::theme::Palette;

use super::{render_error, view_block};

/// Render the analytics view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let today = chrono::Local::now().date_naive();
    let title = format!(" Analytics - as of {} ", today);
    let report = match AnalyticsReport::generate(app.storage, today) {
        Ok(report) => report,
        Err(e) => return render_error(frame, app, area, title, &e),
    };

    let p = app.palette;
    let block = view_block(title, &p);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Trend
            Constraint::Length(5), // Comparison
            Constraint::Min(3),    // Categories
        ])
        .split(inner);

    render_trend(frame, &p, &report, rows[0]);
    render_comparison(frame, &p, &report, rows[1]);
    render_categories(frame, &p, &report, rows[2]);
}

fn render_trend(frame: &mut Frame, p: &Palette, report: &AnalyticsReport, area: Rect) {
    let peak = report
        .peak_day()
        .map(|p| format!(" peak {} on {} ", report.currency.format(p.expenses), p.date))
        .unwrap_or_default();

    let data: Vec<u64> = report
        .trend
        .iter()
        .map(|p| p.expenses.cents().max(0) as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .title(format!(" Daily Spending{}", peak))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.muted)),
        )
        .data(&data)
        .style(Style::default().fg(p.chart));

    frame.render_widget(sparkline, area);
}

fn render_comparison(frame: &mut Frame, p: &Palette, report: &AnalyticsReport, area: Rect) {
    let c = report.currency;
    let cmp = &report.comparison;
    let color = match cmp.change_type {
        ChangeType::Increase => p.expense,
        ChangeType::Decrease => p.income,
        ChangeType::Same => p.text,
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("This month: "),
            Span::styled(c.format(cmp.current), Style::default().fg(p.text)),
            Span::raw("   Last month: "),
            Span::styled(c.format(cmp.previous), Style::default().fg(p.text)),
        ]),
        Line::from(Span::styled(
            format!("{:.1}% {}", cmp.change_pct.abs(), cmp.change_type),
            Style::default().fg(color),
        )),
    ];

    let block = Block::default()
        .title(" Month over Month ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_categories(frame: &mut Frame, p: &Palette, report: &AnalyticsReport, area: Rect) {
    let block = Block::default()
        .title(" Spending by Category ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));

    if report.categories.is_empty() {
        let text = Paragraph::new("No spending this month")
            .block(block)
            .style(Style::default().fg(p.muted));
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = report
        .categories
        .iter()
        .map(|sum| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", sum.category.to_string()), Style::default().fg(p.text)),
                Span::styled(
                    format!("{:>14}", report.currency.format(sum.amount)),
                    Style::default().fg(p.expense),
                ),
                Span::styled(format!("  {:>5.1}%", sum.percent), Style::default().fg(p.muted)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
