//! Terminal editor behind the description field.

use crossterm::event::KeyEvent;
use dham_core::RichTextField;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

/// Multi-line editor for event descriptions. Markup is edited as text.
pub struct TextAreaField {
    area: TextArea<'static>,
}

impl TextAreaField {
    pub fn new() -> Self {
        Self::from_lines(Vec::new())
    }

    fn from_lines(lines: Vec<String>) -> Self {
        let mut area = TextArea::new(lines);
        area.set_cursor_line_style(Style::default());
        area.set_placeholder_text("Describe the event (HTML allowed)");
        Self { area }
    }

    /// Forward a key press. Returns whether the content changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        self.area.input(key)
    }

    /// The editor widget, bordered and titled for the drawer.
    pub fn widget(
        &mut self,
        title: impl Into<String>,
        focused: bool,
        style: Style,
    ) -> &TextArea<'static> {
        let border = if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        };
        self.area.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.into())
                .border_style(border),
        );
        &self.area
    }
}

impl Default for TextAreaField {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextField for TextAreaField {
    fn value(&self) -> String {
        self.area.lines().join("\n")
    }

    fn set_value(&mut self, html: &str) {
        *self = Self::from_lines(html.lines().map(str::to_string).collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_value_round_trips_lines() {
        let mut field = TextAreaField::new();
        field.set_value("<p>Aarti</p>\n<p>Prasad</p>");
        assert_eq!(field.value(), "<p>Aarti</p>\n<p>Prasad</p>");
    }

    #[test]
    fn test_typing_changes_value() {
        let mut field = TextAreaField::new();
        for c in "Om".chars() {
            field.input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        assert_eq!(field.value(), "Om");
    }
}
