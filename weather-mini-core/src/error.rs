use thiserror::Error;
use tracing::debug;

/// Why a single lookup produced no [`WeatherResult`](crate::WeatherResult).
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed")]
    Connection,

    #[error("unexpected failure: {0}")]
    Unexpected(String),

    #[error("network request failed, status: {0}")]
    HttpStatus(u16),

    #[error("city not found or lookup failed")]
    ApiStatus { status: i64 },

    #[error("no forecast available for this city")]
    EmptyForecast,
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        debug!(error = %err, "classifying transport failure");

        // A timeout while connecting also reports `is_connect`, so it goes first.
        if err.is_timeout() {
            LookupError::Timeout
        } else if err.is_connect() {
            LookupError::Connection
        } else {
            LookupError::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Unexpected(format!("failed to decode response body: {err}"))
    }
}
