//! REST client for the trust backend.
//!
//! Responses carry a `status` (or `status_code`) field where `1` means
//! success. That convention stops here: every call returns a
//! [`BackendResult`] and callers never see the raw code.

use crate::config::TuiConfig;
use crate::session::Session;
use async_trait::async_trait;
use dham_core::{
    normalize_date, BackendError, BackendResult, EventDraft, EventsBackend, ListRecord, RecordId,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Success marker in response bodies.
const STATUS_OK: i64 = 1;
/// Body-level status the backend uses for an expired or missing login.
const STATUS_UNAUTHORIZED: i64 = 401;

pub const SESSION_EXPIRED: &str = "Session expired, please log in again";

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<ApiClientError> for BackendError {
    fn from(err: ApiClientError) -> Self {
        match err {
            // A decode failure means a response did arrive.
            ApiClientError::Http(e) if e.is_decode() || e.is_status() => {
                BackendError::application(e.to_string())
            }
            ApiClientError::Http(e) => BackendError::network(e.to_string()),
            ApiClientError::Serde(e) => BackendError::application(e.to_string()),
            ApiClientError::InvalidResponse(message) => BackendError::application(message),
            ApiClientError::Config(message) => BackendError::application(message),
        }
    }
}

// ============================================================================
// WIRE TYPES
// ============================================================================

/// An event as the backend sends and receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

impl EventDto {
    pub fn from_draft(draft: &EventDraft) -> Self {
        Self {
            id: draft.id.as_ref().map(|id| id.as_str().to_string()),
            title: draft.title.clone(),
            short_description: draft.summary.clone(),
            images: draft.media.clone(),
            date: draft.date.clone(),
            location: draft.location.clone(),
            description: draft.detail.clone(),
        }
    }

    pub fn into_record(self) -> BackendResult<ListRecord> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BackendError::application("Event is missing its id"))?;
        let date = match normalize_date(&self.date) {
            Some(date) => date,
            None => {
                tracing::warn!(id = %id, date = %self.date, "Unrecognised event date");
                self.date.trim().to_string()
            }
        };
        let location = Some(self.location.trim().to_string()).filter(|l| !l.is_empty());
        Ok(ListRecord {
            id: RecordId::new(id),
            title: self.title,
            date,
            summary: self.short_description,
            detail: self.description,
            location,
            media: self.images,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventListResponse {
    pub status: i64,
    #[serde(default)]
    pub items: Vec<EventDto>,
    #[serde(rename = "total_Count", default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Single-event responses use `status` on some routes and `status_code` on others.
#[derive(Debug, Clone, Deserialize)]
pub struct EventResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub item: Option<EventDto>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EventResponse {
    fn code(&self) -> Option<i64> {
        self.status.or(self.status_code)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct EventIdRequest<'a> {
    id: &'a str,
}

/// Map a body-level status code to a result.
pub fn check_status(code: Option<i64>, message: Option<String>, fallback: &str) -> BackendResult<()> {
    match code {
        Some(STATUS_OK) => Ok(()),
        Some(STATUS_UNAUTHORIZED) => Err(BackendError::application(SESSION_EXPIRED)),
        _ => Err(BackendError::application(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        )),
    }
}

pub fn records_from_list(response: EventListResponse) -> BackendResult<Vec<ListRecord>> {
    check_status(Some(response.status), response.message, "Failed to load events")?;
    if let Some(total) = response.total_count {
        if total as usize != response.items.len() {
            tracing::debug!(total, received = response.items.len(), "Event count mismatch");
        }
    }
    let records = response
        .items
        .into_iter()
        .filter_map(|item| match item.into_record() {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping undecodable event");
                None
            }
        })
        .collect();
    Ok(records)
}

pub fn record_from_response(response: EventResponse, fallback: &str) -> BackendResult<ListRecord> {
    let code = response.code();
    check_status(code, response.message, fallback)?;
    response
        .item
        .ok_or_else(|| BackendError::application(fallback))?
        .into_record()
}

// ============================================================================
// CLIENT
// ============================================================================

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    api_headers: HeaderMap,
    bearer: Option<HeaderValue>,
}

impl RestClient {
    pub fn new(config: &TuiConfig, session: &Session) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let mut api_headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.auth.api_key)
            .map_err(|e| ApiClientError::Config(format!("invalid api key: {}", e)))?;
        api_headers.insert("api-key", api_key);

        let bearer = session
            .token()
            .map(|token| HeaderValue::from_str(&format!("Bearer {}", token)))
            .transpose()
            .map_err(|e| ApiClientError::Config(format!("invalid session token: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_headers,
            bearer,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn admin_headers(&self) -> HeaderMap {
        let mut headers = self.api_headers.clone();
        if let Some(bearer) = &self.bearer {
            headers.insert(AUTHORIZATION, bearer.clone());
        }
        headers
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(self.url(path))
            .headers(self.api_headers.clone())
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B, headers: HeaderMap) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.url(path))
            .headers(headers)
            .json(body)
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn delete_json<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .delete(self.url(path))
            .headers(self.admin_headers())
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiClientError::InvalidResponse(SESSION_EXPIRED.to_string()));
        }
        let text = response.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str::<T>(&text)?)
        } else {
            Err(ApiClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )))
        }
    }
}

#[async_trait]
impl EventsBackend for RestClient {
    async fn list_events(&self) -> BackendResult<Vec<ListRecord>> {
        let response: EventListResponse = self.get_json("/events").await?;
        let records = records_from_list(response)?;
        tracing::info!(count = records.len(), "Fetched events");
        Ok(records)
    }

    async fn get_event(&self, id: &RecordId) -> BackendResult<ListRecord> {
        let body = EventIdRequest { id: id.as_str() };
        let response: EventResponse = self
            .post_json("/events/getEventById", &body, self.api_headers.clone())
            .await?;
        record_from_response(response, "Event not found")
    }

    async fn create_event(&self, draft: &EventDraft) -> BackendResult<ListRecord> {
        let body = EventDto::from_draft(draft);
        let response: EventResponse = self
            .post_json("/events/create", &body, self.admin_headers())
            .await?;
        record_from_response(response, "Failed to create event")
    }

    async fn update_event(&self, draft: &EventDraft) -> BackendResult<ListRecord> {
        if draft.id.is_none() {
            return Err(BackendError::application("Cannot update an event without an id"));
        }
        let body = EventDto::from_draft(draft);
        let response: EventResponse = self
            .post_json("/events/update", &body, self.admin_headers())
            .await?;
        // Some deployments answer an update with the status alone.
        if response.item.is_none() && response.code() == Some(STATUS_OK) {
            return body.into_record();
        }
        record_from_response(response, "Failed to update event")
    }

    async fn delete_event(&self, id: &RecordId) -> BackendResult<()> {
        let path = format!("/events/delete/{}", id.as_str());
        let response: StatusResponse = self.delete_json(&path).await?;
        check_status(Some(response.status), response.message, "Failed to delete event")
    }
}
