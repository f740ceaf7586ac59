//! Create/edit drawer for the admin table.

use super::helpers::centered_rect;
use crate::richtext::TextAreaField;
use crate::theme::Theme;
use dham_core::{EditorField, EventEditor};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, editor: &mut EventEditor<TextAreaField>, theme: &Theme, area: Rect) {
    let drawer = centered_rect(80, 90, area);
    f.render_widget(Clear, drawer);

    let heading = if editor.is_update() { "Edit Event" } else { "New Event" };
    let outer = Block::default()
        .title(Span::styled(
            heading,
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focus))
        .style(Style::default().bg(theme.bg).fg(theme.text));
    let inner = outer.inner(drawer);
    f.render_widget(outer, drawer);

    let single_line: Vec<EditorField> = EditorField::all()
        .iter()
        .copied()
        .filter(|field| *field != EditorField::Detail)
        .collect();
    let mut constraints: Vec<Constraint> = single_line.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, row) in single_line.iter().zip(rows.iter()) {
        let focused = editor.focus == *field;
        let mut value = editor.line(*field);
        if focused {
            value.push('_');
        }
        let input = Paragraph::new(value).block(field_block(*field, focused, editor.error_for(*field), theme));
        f.render_widget(input, *row);
    }

    let detail_row = rows[single_line.len()];
    let detail_focused = editor.focus == EditorField::Detail;
    let error = editor.error_for(EditorField::Detail).map(str::to_string);
    let title = match error {
        Some(error) => format!("{} - {}", EditorField::Detail.label(), error),
        None => EditorField::Detail.label().to_string(),
    };
    let border = Style::default().fg(if detail_focused { theme.border_focus } else { theme.border });
    let textarea = editor.detail.widget(title, detail_focused, border);
    f.render_widget(textarea, detail_row);

    let hint = if editor.submitting {
        Span::styled("Saving...", Style::default().fg(theme.info))
    } else {
        Span::styled(
            "Tab next • Shift-Tab previous • Ctrl-s save • Esc cancel",
            Style::default().fg(theme.text_dim),
        )
    };
    f.render_widget(Paragraph::new(Line::from(hint)), rows[single_line.len() + 1]);
}

fn field_block<'a>(field: EditorField, focused: bool, error: Option<&'a str>, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.border_focus } else { theme.border };
    let mut title = vec![Span::styled(field.label(), Style::default().fg(theme.text))];
    if let Some(error) = error {
        title.push(Span::styled(format!(" - {}", error), Style::default().fg(theme.error)));
    }
    Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}
