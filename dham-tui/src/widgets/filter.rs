//! Search and date-range bar plus the type-ahead dropdown.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// One labelled input in the bar. `editing` marks the input receiving keys.
#[derive(Debug, Clone)]
pub struct FilterInput<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub editing: bool,
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub inputs: Vec<FilterInput<'a>>,
    pub active_style: Style,
    pub inactive_style: Style,
    pub placeholder_style: Style,
    /// Shown after the inputs, e.g. when the dates can never match.
    pub warning: Option<(&'a str, Style)>,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let label_style = if input.editing {
                self.active_style.add_modifier(Modifier::BOLD)
            } else {
                self.inactive_style
            };
            spans.push(Span::styled(format!("{}: ", input.label), label_style));
            if input.value.is_empty() && !input.editing {
                spans.push(Span::styled(input.placeholder, self.placeholder_style));
            } else {
                spans.push(Span::styled(input.value, self.inactive_style));
            }
            if input.editing {
                spans.push(Span::styled("_", self.active_style));
            }
        }
        if let Some((warning, style)) = self.warning {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(warning, style.add_modifier(Modifier::BOLD)));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

/// Floating list of suggested titles drawn under the search input.
pub struct SuggestionDropdown<'a> {
    pub items: Vec<&'a str>,
    pub highlighted: Option<usize>,
    pub style: Style,
    pub highlight_style: Style,
}

impl<'a> SuggestionDropdown<'a> {
    /// Height the dropdown needs, borders included.
    pub fn height(&self) -> u16 {
        self.items.len() as u16 + 2
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        if self.items.is_empty() {
            return;
        }
        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|title| ListItem::new(*title).style(self.style))
            .collect();
        let mut state = ListState::default();
        state.select(self.highlighted);

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Suggestions"))
            .highlight_style(self.highlight_style);
        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }
}
