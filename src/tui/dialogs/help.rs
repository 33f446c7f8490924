//! Help dialog
//!
//! Shows the global keys plus the keys of the active view

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme::Palette;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let p = app.palette;
    let area = centered_rect_fixed(52, 22, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(p.accent)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.accent));

    let paragraph = Paragraph::new(help_lines(app.active_view, &p))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(view: ActiveView, p: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        section(p, "Global Keys"),
        Line::from(""),
        key_line(p, "q/Esc", "Quit"),
        key_line(p, "?", "Show/hide help"),
        key_line(p, "1-4", "Dashboard, Transactions, Budgets, Analytics"),
        key_line(p, "Tab", "Next view"),
        key_line(p, "[ / ]", "Previous/next month"),
        Line::from(""),
    ];

    match view {
        ActiveView::Transactions => {
            lines.push(section(p, "Transactions"));
            lines.push(Line::from(""));
            lines.push(key_line(p, "j/k", "Move selection"));
            lines.push(key_line(p, "a", "Add transaction"));
            lines.push(key_line(p, "e", "Edit selected transaction"));
            lines.push(key_line(p, "d", "Delete selected transaction"));
        }
        ActiveView::Budgets => {
            lines.push(section(p, "Budgets"));
            lines.push(Line::from(""));
            lines.push(key_line(p, "j/k", "Move selection"));
            lines.push(key_line(p, "a", "Set a budget for this month"));
            lines.push(key_line(p, "e", "Change selected budget"));
        }
        ActiveView::Analytics => {
            lines.push(section(p, "Analytics"));
            lines.push(Line::from(""));
            lines.push(Line::from("  Trend covers the last 30 days"));
        }
        ActiveView::Dashboard => {
            lines.push(section(p, "Dashboard"));
            lines.push(Line::from(""));
            lines.push(key_line(p, "a", "Add transaction"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc or ? to close",
        Style::default().fg(p.muted),
    )));

    lines
}

fn section(p: &Palette, title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD).fg(p.key),
    ))
}

fn key_line(p: &Palette, key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<8}", key), Style::default().fg(p.accent)),
        Span::raw(description),
    ])
}
