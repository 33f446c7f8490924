//! Sidebar view
//!
//! Shows the signed-in user, the view switcher and the selected month

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::SidebarLayout;

/// Render the sidebar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = SidebarLayout::new(area);

    render_header(frame, app, layout.header);
    render_view_switcher(frame, app, layout.view_switcher);
    render_month(frame, app, layout.month);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let p = app.palette;
    let block = Block::default()
        .title(" Spendwise ")
        .title_style(
            Style::default()
                .fg(p.accent)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));

    let lines = vec![
        Line::from(Span::styled(
            app.profile.name.clone(),
            Style::default().fg(p.text),
        )),
        Line::from(Span::styled(
            app.profile.email.clone(),
            Style::default().fg(p.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_view_switcher(frame: &mut Frame, app: &App, area: Rect) {
    let p = app.palette;
    let block = Block::default()
        .title(" Views ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));

    let items: Vec<ListItem> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let style = if *view == app.active_view {
                Style::default()
                    .fg(p.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(p.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), Style::default().fg(p.key)),
                Span::styled(view.title(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_month(frame: &mut Frame, app: &App, area: Rect) {
    let p = app.palette;
    let block = Block::default()
        .title(" Month ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            app.current_month.friendly(),
            Style::default().fg(p.accent),
        )),
        Line::from(Span::styled("[ prev  ] next", Style::default().fg(p.muted))),
    ])
    .block(block);

    frame.render_widget(text, area);
}
