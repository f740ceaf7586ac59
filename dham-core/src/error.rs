//! Error types for listing and mutation operations

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Failures reported by an [`EventsBackend`](crate::backend::EventsBackend).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// No response was obtained (offline, timeout, DNS, TLS).
    #[error("Network error: {message}")]
    Network { message: String },

    /// A response arrived but reported a logical failure.
    #[error("Request rejected: {message}")]
    Application { message: String },
}

impl BackendError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// Failures of an admin create/update/delete.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MutationError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Caught before dispatch; never reaches the network.
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message meant for the person at the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Shown when the backend cannot be reached.
pub const TECHNICAL_DIFFICULTIES: &str =
    "We're experiencing technical difficulties. Please try again later.";

impl MutationError {
    /// User-facing notice for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            MutationError::Backend(BackendError::Network { .. }) => {
                Notice::new(NoticeLevel::Error, TECHNICAL_DIFFICULTIES)
            }
            MutationError::Backend(BackendError::Application { message }) => {
                Notice::new(NoticeLevel::Error, format!("Request failed: {}", message))
            }
            MutationError::Validation(errors) => Notice::new(
                NoticeLevel::Warning,
                format!("Please fix the form errors before submitting ({})", errors),
            ),
        }
    }
}
