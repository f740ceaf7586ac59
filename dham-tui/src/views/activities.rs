//! Social activities listing. Search covers title and category.

use super::helpers::{
    format_display_date, list_layout, render_filter_bar, render_pager, render_suggestions,
    truncate,
};
use crate::state::App;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let view = &app.activities;
    let areas = list_layout(area);
    render_filter_bar(f, &app.theme, view, app.input_mode, "Title/Category", areas.filters);

    let block = Block::default()
        .title(format!("Social Activities ({})", view.list.filtered().len()))
        .borders(Borders::ALL);

    if view.list.page_slice().is_empty() {
        let empty = Paragraph::new("No activities found")
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(empty, areas.records);
    } else {
        let summary_width = areas.records.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = view
            .list
            .page_slice()
            .iter()
            .map(|activity| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            activity.title.clone(),
                            Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  [{}]", activity.category),
                            Style::default().fg(app.theme.secondary),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled(
                            format_display_date(&activity.date),
                            Style::default().fg(app.theme.primary),
                        ),
                        Span::styled(
                            format!("  {} participants", activity.participants),
                            Style::default().fg(app.theme.info),
                        ),
                    ]),
                    Line::from(Span::styled(
                        truncate(&activity.summary, summary_width),
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
