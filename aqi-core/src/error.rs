use reqwest::StatusCode;

/// Failure of a single call to the remote API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected response format: {0}")]
    Schema(String),
}

impl FetchError {
    pub(crate) fn status(status: StatusCode, body: &str) -> Self {
        FetchError::Status { status, body: truncate_body(body) }
    }

    pub(crate) fn schema(detail: impl Into<String>) -> Self {
        FetchError::Schema(detail.into())
    }

    /// Transport and HTTP status failures, as opposed to a bad payload.
    pub fn is_request_error(&self) -> bool {
        matches!(self, FetchError::Request(_) | FetchError::Status { .. })
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self, FetchError::Schema(_))
    }
}

/// The API reported an AQI category outside 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("AQI category {0} is outside the known range 1-5")]
pub struct ClassificationError(pub i64);

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
