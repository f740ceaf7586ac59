//! Notification system for the TUI.
//!
//! Notifications close themselves after a short, medium or long interval.

use chrono::{DateTime, Duration, Utc};
use dham_core::{Notice, NoticeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl From<NoticeLevel> for NotificationLevel {
    fn from(level: NoticeLevel) -> Self {
        match level {
            NoticeLevel::Info => NotificationLevel::Info,
            NoticeLevel::Success => NotificationLevel::Success,
            NoticeLevel::Warning => NotificationLevel::Warning,
            NoticeLevel::Error => NotificationLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoClose {
    Short,
    Medium,
    Long,
}

impl AutoClose {
    pub fn duration(self) -> Duration {
        match self {
            AutoClose::Short => Duration::milliseconds(2_000),
            AutoClose::Medium => Duration::milliseconds(3_000),
            AutoClose::Long => Duration::milliseconds(5_000),
        }
    }

    /// Errors stay up longest.
    pub fn for_level(level: NotificationLevel) -> Self {
        match level {
            NotificationLevel::Success => AutoClose::Short,
            NotificationLevel::Info | NotificationLevel::Warning => AutoClose::Medium,
            NotificationLevel::Error => AutoClose::Long,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub auto_close: AutoClose,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            auto_close: AutoClose::for_level(level),
            created_at: Utc::now(),
        }
    }

    pub fn with_auto_close(mut self, auto_close: AutoClose) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= self.auto_close.duration()
    }
}

impl From<Notice> for Notification {
    fn from(notice: Notice) -> Self {
        Notification::new(notice.level.into(), notice.message)
    }
}
