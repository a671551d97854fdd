use thiserror::Error;

/// Unified error type for the entire investment-tracker-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Analytics never produce errors; everything here comes from
/// validation, configuration, or the remote investment API.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Investment not found: {0}")]
    NotFound(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Map a non-success HTTP status from the investment API to an error.
    ///
    /// 404 means the record is gone, 400/422 means the server rejected
    /// the payload; anything else is reported with its status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => CoreError::NotFound(message),
            400 | 422 => CoreError::Validation(message),
            _ => CoreError::Api { status, message },
        }
    }

    /// Whether the error came from talking to the server rather than from
    /// local validation or configuration.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            CoreError::NotFound(_) | CoreError::Api { .. } | CoreError::Network(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; drop the query string so
        // prices and filters don't end up in user-facing messages.
        CoreError::Network(redact_query(&e.to_string()))
    }
}

/// Strip everything after the first `?` in a message containing a URL.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}
