//! Public events listing.

use super::helpers::{
    format_display_date, list_layout, render_filter_bar, render_pager, render_suggestions,
    truncate,
};
use crate::state::App;
use crate::theme::event_date_color;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let view = &app.public_events;
    let areas = list_layout(area);
    render_filter_bar(f, &app.theme, view, app.input_mode, "Search", areas.filters);

    let today = app.today_string();
    let block = Block::default()
        .title(format!("Events ({})", view.list.filtered().len()))
        .borders(Borders::ALL);

    if view.list.page_slice().is_empty() {
        let message = if view.list.is_loading() {
            "Loading events..."
        } else {
            "No events found"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(empty, areas.records);
    } else {
        let summary_width = areas.records.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = view
            .list
            .page_slice()
            .iter()
            .map(|event| {
                let mut meta = vec![Span::styled(
                    format_display_date(&event.date),
                    Style::default().fg(event_date_color(&event.date, &today, &app.theme)),
                )];
                if let Some(location) = &event.location {
                    meta.push(Span::styled(
                        format!("  @ {}", location),
                        Style::default().fg(app.theme.secondary),
                    ));
                }
                ListItem::new(vec![
                    Line::from(Span::styled(
                        event.title.clone(),
                        Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(meta),
                    Line::from(Span::styled(
                        truncate(&event.summary, summary_width),
                        Style::default().fg(app.theme.text_dim),
                    )),
                    Line::raw(""),
                ])
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(view.selected));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(app.theme.bg_highlight))
            .highlight_symbol("▌ ");
        f.render_stateful_widget(list, areas.records, &mut state);
    }

    render_pager(f, &app.theme, view, areas.pager);
    render_suggestions(f, &app.theme, view, &areas);
}
