//! Single event page, reached from the public listing.

use super::helpers::format_display_date;
use crate::state::App;
use crate::widgets::DetailPanel;
use ratatui::{
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let detail = &app.detail;

    if detail.loading {
        let loading = Paragraph::new("Loading event...")
            .style(Style::default().fg(app.theme.text_dim))
            .block(Block::default().title("Event").borders(Borders::ALL));
        f.render_widget(loading, area);
        return;
    }

    let Some(event) = &detail.record else {
        let message = detail.error.as_deref().unwrap_or("Event not found");
        let error = Paragraph::new(format!("{}\n\nEsc to go back to the events list", message))
            .style(Style::default().fg(app.theme.error))
            .block(Block::default().title("Event").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(error, area);
        return;
    };

    let mut panel = DetailPanel::new(&event.title, Style::default().fg(app.theme.secondary))
        .field("Date", format_display_date(&event.date))
        .optional_field("Location", event.location.as_deref())
        .optional_field("Summary", Some(event.summary.as_str()));
    if let Some(cover) = event.cover() {
        panel = panel.field("Image", cover);
    }
    if event.media.len() > 1 {
        panel = panel.field("Gallery", format!("{} images", event.media.len()));
    }
    panel.body(event.detail.clone()).render(f, area);
}
