//! Admin events table: create, edit and delete.

use super::helpers::{
    format_display_date, list_layout, render_filter_bar, render_pager, render_suggestions,
    truncate,
};
use crate::state::App;
use crate::theme::event_date_color;
use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let view = &app.admin_events;
    let areas = list_layout(area);
    render_filter_bar(f, &app.theme, view, app.input_mode, "Search", areas.filters);

    let title = if app.authenticated {
        format!("Manage Events ({}) [n new, e edit, d delete]", view.list.filtered().len())
    } else {
        "Manage Events (not signed in: changes will be rejected)".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    if view.list.page_slice().is_empty() {
        let message = if view.list.is_loading() {
            "Loading events..."
        } else {
            "No events found. Press n to create one."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(empty, areas.records);
    } else {
        let today = app.today_string();
        let header = Row::new(vec!["Title", "Date", "Location", "Summary"]).style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = view
            .list
            .page_slice()
            .iter()
            .map(|event| {
                Row::new(vec![
                    Cell::from(event.title.clone()),
                    Cell::from(format_display_date(&event.date)).style(
                        Style::default().fg(event_date_color(&event.date, &today, &app.theme)),
                    ),
                    Cell::from(event.location.clone().unwrap_or_default()),
                    Cell::from(truncate(&event.summary, 60)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(28),
            Constraint::Length(20),
            Constraint::Percentage(20),
            Constraint::Min(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(Style::default().bg(app.theme.bg_highlight))
            .highlight_symbol("▌ ");

        let mut state = TableState::default();
        state.select(Some(view.selected));
        f.render_stateful_widget(table, areas.records, &mut state);
    }

    render_pager(f, &app.theme, view, areas.pager);
    render_suggestions(f, &app.theme, view, &areas);
}
