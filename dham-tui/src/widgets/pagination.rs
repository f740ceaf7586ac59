//! Previous / page-number / next strip under a listing.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct PaginationBar {
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub current_style: Style,
    pub style: Style,
    pub disabled_style: Style,
}

impl PaginationBar {
    /// Labels shown for the page buttons. Wide page counts collapse to a
    /// window around the current page.
    pub fn page_labels(&self) -> Vec<String> {
        const WINDOW: usize = 2;
        if self.total_pages <= 7 {
            return (1..=self.total_pages).map(|p| p.to_string()).collect();
        }
        let low = self.page.saturating_sub(WINDOW).max(2);
        let high = (self.page + WINDOW).min(self.total_pages - 1);
        let mut labels = vec!["1".to_string()];
        if low > 2 {
            labels.push("…".to_string());
        }
        labels.extend((low..=high).map(|p| p.to_string()));
        if high < self.total_pages - 1 {
            labels.push("…".to_string());
        }
        labels.push(self.total_pages.to_string());
        labels
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        if self.total_pages <= 1 {
            return;
        }
        let prev_style = if self.page > 1 { self.style } else { self.disabled_style };
        let next_style = if self.page < self.total_pages {
            self.style
        } else {
            self.disabled_style
        };

        let current = self.page.to_string();
        let mut spans = vec![Span::styled("◀ Prev ", prev_style)];
        for label in self.page_labels() {
            let style = if label == current { self.current_style } else { self.style };
            spans.push(Span::styled(format!(" {} ", label), style));
        }
        spans.push(Span::styled(" Next ▶", next_style));

        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(page: usize, total_pages: usize) -> PaginationBar {
        PaginationBar {
            page,
            total_pages,
            current_style: Style::default(),
            style: Style::default(),
            disabled_style: Style::default(),
        }
    }

    #[test]
    fn test_short_ranges_list_every_page() {
        assert_eq!(bar(2, 3).page_labels(), vec!["1", "2", "3"]);
        assert!(bar(1, 0).page_labels().is_empty());
    }

    #[test]
    fn test_long_ranges_collapse_around_current() {
        assert_eq!(bar(6, 12).page_labels(), vec!["1", "…", "4", "5", "6", "7", "8", "…", "12"]);
        assert_eq!(bar(1, 12).page_labels(), vec!["1", "2", "3", "…", "12"]);
        assert_eq!(bar(12, 12).page_labels(), vec!["1", "…", "10", "11", "12"]);
    }
}
