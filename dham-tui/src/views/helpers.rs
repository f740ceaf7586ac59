//! Common view rendering helpers.
//!
//! Every listing screen shares the same chrome: a filter bar on top, the
//! records in the middle, a pagination strip at the bottom and the
//! suggestion dropdown floating over the records.

use crate::state::{InputMode, ListViewState};
use crate::theme::Theme;
use crate::widgets::filter::FilterInput;
use crate::widgets::{FilterBar, PaginationBar, SuggestionDropdown};
use chrono::NaiveDate;
use dham_core::{DateRange, Listable};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    Frame,
};

pub struct ListAreas {
    pub filters: Rect,
    pub records: Rect,
    pub pager: Rect,
}

pub fn list_layout(area: Rect) -> ListAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    ListAreas {
        filters: chunks[0],
        records: chunks[1],
        pager: chunks[2],
    }
}

pub fn render_filter_bar<R: Listable + Clone>(
    f: &mut Frame<'_>,
    theme: &Theme,
    view: &ListViewState<R>,
    mode: InputMode,
    search_label: &str,
    area: Rect,
) {
    let bar = FilterBar {
        title: "Filter [/ search, f from, u until, c clear]",
        inputs: vec![
            FilterInput {
                label: search_label,
                value: view.list.search_term(),
                placeholder: "any",
                editing: mode == InputMode::Search,
            },
            FilterInput {
                label: "From",
                value: &view.start_input,
                placeholder: "YYYY-MM-DD",
                editing: mode == InputMode::StartDate,
            },
            FilterInput {
                label: "Until",
                value: &view.end_input,
                placeholder: "YYYY-MM-DD",
                editing: mode == InputMode::EndDate,
            },
        ],
        active_style: Style::default().fg(theme.border_focus),
        inactive_style: Style::default().fg(theme.text),
        placeholder_style: Style::default().fg(theme.text_dim),
        warning: range_warning(view.list.range()).map(|w| (w, Style::default().fg(theme.warning))),
    };
    bar.render(f, area);
}

/// Hint for a range whose start is after its end. Such a range matches nothing.
pub fn range_warning(range: &DateRange) -> Option<&'static str> {
    range.is_inverted().then_some("! From is after Until")
}

/// Draws the dropdown just under the filter bar, over the records.
pub fn render_suggestions<R: Listable + Clone>(
    f: &mut Frame<'_>,
    theme: &Theme,
    view: &ListViewState<R>,
    areas: &ListAreas,
) {
    let suggestions = view.list.suggestions();
    if !suggestions.visible {
        return;
    }
    let dropdown = SuggestionDropdown {
        items: suggestions.items.iter().map(|r| r.title()).collect(),
        highlighted: view.suggestion_cursor,
        style: Style::default().fg(theme.text).bg(theme.bg_secondary),
        highlight_style: Style::default()
            .fg(theme.primary)
            .bg(theme.bg_highlight)
            .add_modifier(Modifier::BOLD),
    };
    let width = areas.filters.width.saturating_sub(4).min(48);
    let height = dropdown.height().min(areas.records.height);
    let area = Rect::new(areas.filters.x + 2, areas.records.y, width, height);
    dropdown.render(f, area);
}

pub fn render_pager<R: Listable + Clone>(
    f: &mut Frame<'_>,
    theme: &Theme,
    view: &ListViewState<R>,
    area: Rect,
) {
    let bar = PaginationBar {
        page: view.list.page_index(),
        total_pages: view.list.total_pages(),
        current_style: Style::default()
            .fg(theme.bg)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD),
        style: Style::default().fg(theme.text),
        disabled_style: Style::default().fg(theme.text_dim),
    };
    bar.render(f, area);
}

/// Returns a rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// `2025-03-05` becomes `March 5, 2025`. Unparseable input is shown as is.
pub fn format_display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
