//! Data models for request history.
//!
//! A history entry is request metadata plus the response summary. It keeps
//! the template URL, never the resolved one, so interpolated credentials are
//! not persisted.

use crate::models::{HttpMethod, HttpResponse};
use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single entry in the request history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier for this history entry (UUID v4).
    pub id: String,

    /// Id of the request template that was sent.
    pub request_id: String,

    pub request_name: String,

    pub method: HttpMethod,

    /// Template URL, placeholders unresolved.
    pub url: String,

    pub workspace_id: String,

    /// `None` when no response was received.
    pub status_code: Option<u16>,

    pub duration_ms: u64,

    /// Response body size in bytes.
    pub response_size: usize,

    /// Stored in UTC for consistency across time zones.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an entry for a request with no response recorded yet.
    ///
    /// # Returns
    ///
    /// A new `HistoryEntry` with a unique ID and current timestamp.
    pub fn new(
        request_id: impl Into<String>,
        request_name: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
        workspace_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            request_id: request_id.into(),
            request_name: request_name.into(),
            method,
            url: url.into(),
            workspace_id: workspace_id.into(),
            status_code: None,
            duration_ms: 0,
            response_size: 0,
            timestamp: Utc::now(),
        }
    }

    /// Fills in status, duration and size from a received response.
    pub fn with_response(mut self, response: &HttpResponse) -> Self {
        self.status_code = Some(response.status_code);
        self.duration_ms = response.duration.as_millis() as u64;
        self.response_size = response.size;
        self
    }

    /// `true` if a response was received at all.
    pub fn has_response(&self) -> bool {
        self.status_code.is_some()
    }
}

/// Status class used to filter history searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusFilter {
    #[serde(rename = "2xx")]
    Success,
    #[serde(rename = "3xx")]
    Redirect,
    #[serde(rename = "4xx")]
    ClientError,
    #[serde(rename = "5xx")]
    ServerError,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::Success,
        StatusFilter::Redirect,
        StatusFilter::ClientError,
        StatusFilter::ServerError,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Success => "2xx",
            StatusFilter::Redirect => "3xx",
            StatusFilter::ClientError => "4xx",
            StatusFilter::ServerError => "5xx",
        }
    }

    /// Whether `status_code` falls in this class.
    pub fn matches(&self, status_code: u16) -> bool {
        let range = match self {
            StatusFilter::Success => 200..300,
            StatusFilter::Redirect => 300..400,
            StatusFilter::ClientError => 400..500,
            StatusFilter::ServerError => 500..600,
        };
        range.contains(&status_code)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive timestamp range used to filter history searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// From midnight UTC today until now.
    pub fn today() -> Self {
        let end = Utc::now();
        let midnight = end.date_naive().and_time(chrono::NaiveTime::MIN);
        Self::new(Utc.from_utc_datetime(&midnight), end)
    }

    /// The last seven days.
    pub fn last_week() -> Self {
        let end = Utc::now();
        Self::new(end - Duration::days(7), end)
    }

    /// The last calendar month.
    pub fn last_month() -> Self {
        let end = Utc::now();
        let start = end.checked_sub_months(Months::new(1)).unwrap_or(end);
        Self::new(start, end)
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        *timestamp >= self.start && *timestamp <= self.end
    }
}

/// Errors that can occur during history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// File I/O failed.
    #[error("History storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// An entry could not be serialized.
    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
