//! Delete confirmation dialog

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::{Currency, Transaction};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme::Palette;

/// Ask before deleting `txn`; a `None` transaction has already gone away
pub fn render(frame: &mut Frame, txn: Option<&Transaction>, currency: Currency, p: &Palette) {
    let area = centered_rect_fixed(52, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Delete transaction? ")
        .title_style(
            Style::default()
                .fg(p.warning)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.warning));

    let mut lines = vec![Line::from("")];
    match txn {
        Some(txn) => {
            lines.push(detail(p, "Date", txn.date.to_string()));
            lines.push(detail(p, "Category", txn.category.to_string()));
            lines.push(detail(p, "Amount", format!("{} ({})", currency.format(txn.amount), txn.kind)));
        }
        None => lines.push(Line::from(Span::styled(
            "Transaction no longer exists",
            Style::default().fg(p.muted),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[y]", Style::default().fg(p.expense)),
        Span::raw(" Delete  "),
        Span::styled("[n/Esc]", Style::default().fg(p.income)),
        Span::raw(" Keep"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail(p: &Palette, label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", label), Style::default().fg(p.muted)),
        Span::styled(value, Style::default().fg(p.text)),
    ])
}
