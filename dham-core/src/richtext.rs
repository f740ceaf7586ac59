//! Seam for the long-text editor.
//!
//! The event editor reads and writes the description only through this
//! trait, so the editing widget can be swapped without touching form logic.

pub trait RichTextField {
    /// Current content as markup.
    fn value(&self) -> String;

    fn set_value(&mut self, html: &str);
}

/// In-memory field with no editing behaviour of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainTextField {
    content: String,
}

impl PlainTextField {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl RichTextField for PlainTextField {
    fn value(&self) -> String {
        self.content.clone()
    }

    fn set_value(&mut self, html: &str) {
        self.content = html.to_string();
    }
}
