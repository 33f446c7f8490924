//! Status bar view
//!
//! Shows the month's balance, the status message and key hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::reports::aggregate::totals;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let p = app.palette;
    let balance = totals(&app.month_transactions()).balance;
    let balance_color = if balance.is_negative() {
        p.expense
    } else {
        p.income
    };

    let mut spans = vec![
        Span::styled(" Balance: ", Style::default().fg(p.text)),
        Span::styled(
            app.profile.currency().format(balance),
            Style::default()
                .fg(balance_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(app.current_month.to_string(), Style::default().fg(p.accent)),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(p.warning),
        ));
    }

    let hints = " q:Quit  ?:Help  a:Add  1-4:Views ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(p.text)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
