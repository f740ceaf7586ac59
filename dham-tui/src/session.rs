//! Admin login details.
//!
//! The login flow itself lives elsewhere; it leaves a small JSON record
//! (`{"accessToken": "..."}`) behind. Without one the client is anonymous
//! and mutations go out with the api key alone.

use crate::persistence::PersistenceError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Session {
    #[serde(rename = "accessToken", default)]
    access_token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
        }
    }

    /// Read login details from `path`. No path or no file means anonymous.
    pub fn load(path: Option<&Path>) -> Result<Self, PersistenceError> {
        let Some(path) = path else {
            return Ok(Self::anonymous());
        };
        if !path.exists() {
            return Ok(Self::anonymous());
        }
        let contents = std::fs::read_to_string(path)?;
        // The login record is stored as JSON `null` after a logout.
        let session = serde_json::from_str::<Option<Session>>(&contents)?;
        Ok(session.unwrap_or_default())
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
