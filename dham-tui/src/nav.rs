//! Navigation and view switching utilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Events,
    EventDetail,
    SocialActivities,
    AdminEvents,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Events => "Events",
            View::EventDetail => "Event",
            View::SocialActivities => "Social Activities",
            View::AdminEvents => "Admin: Events",
        }
    }

    /// Views reachable with Tab and the digit keys. The detail page is
    /// entered from the events list instead.
    pub fn all() -> &'static [View] {
        &[View::Events, View::SocialActivities, View::AdminEvents]
    }

    pub fn index(&self) -> usize {
        let view = match self {
            View::EventDetail => View::Events,
            other => *other,
        };
        Self::all().iter().position(|v| *v == view).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let next = (idx + 1) % all.len();
        all[next]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }

    /// A view worth restoring on the next start.
    pub fn restorable(&self) -> View {
        match self {
            View::EventDetail => View::Events,
            other => *other,
        }
    }
}
