//! Error taxonomy for vendor calls and polling.

use thiserror::Error;

/// Errors produced by provider clients and the poller.
///
/// The orchestrator recovers from every variant by degrading to the
/// deterministic placeholder; nothing here is fatal to a request.
#[derive(Debug, Error)]
pub enum GenMediaError {
    #[error("API key not configured")]
    MissingApiKey,

    /// Non-success HTTP response from a vendor, with status and body.
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// Network failure mid-call.
    #[error("transport error: {0}")]
    Transport(String),

    /// The outbound request itself timed out.
    #[error("request timed out: {0}")]
    RequestTimeout(String),

    /// Vendor declared the task failed.
    #[error("generation task failed: {0}")]
    TaskFailed(String),

    /// Polling ceiling reached without a terminal vendor status.
    #[error("generation timed out waiting for completion")]
    PollTimedOut,

    #[error("missing field in provider response: {0}")]
    MissingField(&'static str),

    #[error("invalid provider payload: {0}")]
    InvalidPayload(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for GenMediaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenMediaError::RequestTimeout(err.to_string())
        } else {
            GenMediaError::Transport(err.to_string())
        }
    }
}

impl GenMediaError {
    /// Short tag used in logs and failure metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GenMediaError::MissingApiKey => "missing_api_key",
            GenMediaError::Provider { .. } => "provider",
            GenMediaError::Transport(_) => "transport",
            GenMediaError::RequestTimeout(_) => "request_timeout",
            GenMediaError::TaskFailed(_) => "task_failed",
            GenMediaError::PollTimedOut => "poll_timed_out",
            GenMediaError::MissingField(_) => "missing_field",
            GenMediaError::InvalidPayload(_) => "invalid_payload",
            GenMediaError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_carries_status_and_body() {
        let err = GenMediaError::Provider {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(err.kind(), "provider");
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_poll_timeout_is_distinct_from_request_timeout() {
        assert_ne!(
            GenMediaError::PollTimedOut.kind(),
            GenMediaError::RequestTimeout("deadline".to_string()).kind()
        );
    }
}
