//! Detail panel: labelled fields followed by an optional free-text body.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, String)>,
    pub body: Option<String>,
    pub style: Style,
}

impl<'a> DetailPanel<'a> {
    pub fn new(title: &'a str, style: Style) -> Self {
        Self {
            title,
            fields: Vec::new(),
            body: None,
            style,
        }
    }

    pub fn field(mut self, label: &'a str, value: impl Into<String>) -> Self {
        self.fields.push((label, value.into()));
        self
    }

    /// Blank values are skipped rather than shown as an empty row.
    pub fn optional_field(self, label: &'a str, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.field(label, value),
            None => self,
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let label_style = self.style.add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", label), label_style),
                    Span::raw(value.clone()),
                ])
            })
            .collect();

        if let Some(body) = &self.body {
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.extend(body.lines().map(|l| Line::raw(l.to_string())));
        }

        let widget = Paragraph::new(Text::from(lines))
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: false });

        f.render_widget(widget, area);
    }
}
