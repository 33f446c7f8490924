//! Dashboard view
//!
//! Balance, income and expense cards, a weekly bar chart and the most
//! recent transactions.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{Currency, Money};
use crate::reports::DashboardReport;
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;
use crate::tui::theme::Palette;

use super::{render_error, view_block};

/// Render the dashboard view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Dashboard - {} ", app.current_month.friendly());
    let report = match DashboardReport::generate(
        app.storage,
        app.current_month,
        app.settings.recent_transactions,
    ) {
        Ok(report) => report,
        Err(e) => return render_error(frame, app, area, title, &e),
    };

    let p = app.palette;
    let block = view_block(title, &p);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = DashboardLayout::new(inner);
    let c = report.currency;
    let balance_color = if report.totals.balance.is_negative() {
        p.expense
    } else {
        p.income
    };

    render_card(frame, &p, layout.cards[0], "Balance", c.format(report.totals.balance), balance_color);
    render_card(frame, &p, layout.cards[1], "Income", c.format(report.totals.income), p.income);
    render_card(frame, &p, layout.cards[2], "Expenses", c.format(report.totals.expenses), p.expense);

    render_weekly_chart(frame, &p, &report, layout.chart);
    render_recent(frame, &p, &report, layout.recent);
}

fn render_card(frame: &mut Frame, p: &Palette, area: Rect, label: &str, value: String, color: Color) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));

    let text = Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(block);

    frame.render_widget(text, area);
}

fn render_weekly_chart(frame: &mut Frame, p: &Palette, report: &DashboardReport, area: Rect) {
    let block = Block::default()
        .title(" Weekly Income vs Expenses ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(5)
        .bar_gap(1)
        .group_gap(3);

    for week in &report.weekly {
        let group = BarGroup::default()
            .label(Line::from(week.label()))
            .bars(&[
                bar(week.income, report.currency, p.income),
                bar(week.expenses, report.currency, p.expense),
            ]);
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}

fn bar(amount: Money, currency: Currency, color: Color) -> Bar<'static> {
    Bar::default()
        .value(amount.cents().max(0) as u64)
        .text_value(currency.format_short(amount))
        .style(Style::default().fg(color))
}

fn render_recent(frame: &mut Frame, p: &Palette, report: &DashboardReport, area: Rect) {
    let block = Block::default()
        .title(" Recent Transactions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));

    if report.recent.is_empty() {
        let text = Paragraph::new("No transactions yet. Add one with `spendwise txn add`.")
            .block(block)
            .style(Style::default().fg(p.muted));
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = report
        .recent
        .iter()
        .map(|txn| {
            let (amount, color) = if txn.is_expense() {
                (-txn.amount, p.expense)
            } else {
                (txn.amount, p.income)
            };
            ListItem::new(Line::from(vec![
                Span::styled(txn.date.to_string(), Style::default().fg(p.muted)),
                Span::raw("  "),
                Span::styled(format!("{:<16}", txn.category.to_string()), Style::default().fg(p.text)),
                Span::styled(
                    format!("{:>14}", report.currency.format(amount)),
                    Style::default().fg(color),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
