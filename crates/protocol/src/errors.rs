//! Error taxonomy and retry-policy types for calls against the panel.
//!
//! Every fallible operation in the workspace returns [`PanelError`]. Callers
//! branch on [`PanelError::kind`] to tell apart failures the server reported
//! ([`ErrorKind::Api`]) from failures that happened before or instead of a
//! classifiable response ([`ErrorKind::Transport`]), and from responses the
//! server considered successful but that did not have the expected shape
//! ([`ErrorKind::Decode`]).
//!
//! [`RetryPolicy`] is the bridge between an error and the transport's retry
//! loop: any failure of a single attempt can say whether another attempt is
//! worthwhile.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed error used to carry the underlying cause across crate boundaries
/// without naming the adapter's error types here.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// ## Rules
///
/// - `Retryable`: connection failures, response read failures, timeouts of a
///   single attempt and `5xx` responses.
/// - `NonRetryable`: build failures, decoded API errors, decode failures and
///   stream connect failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt. `None` means apply the
        /// caller's own back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried.
    NonRetryable,
}

impl RetryPolicy {
    /// Returns `true` for [`RetryPolicy::Retryable`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, RetryPolicy::Retryable { .. })
    }
}

// ---------------------------------------------------------------------------
// API errors
// ---------------------------------------------------------------------------

/// A structured failure returned by the panel.
///
/// Built best-effort from the body of any non-2xx response: the body is parsed
/// as `{"ok": bool, "errorMessage": string}`, and if that fails or the message
/// is empty the raw body text is used as the message instead. The HTTP status
/// is always the real one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, Serialize, Deserialize)]
#[error("{}", self.display_message())]
pub struct ApiError {
    /// Success flag reported by the server, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,

    /// Human-readable message.
    #[serde(rename = "errorMessage", default)]
    pub message: String,

    /// HTTP status code of the response.
    #[serde(skip)]
    pub status: u16,
}

impl ApiError {
    /// Classifies a non-2xx response body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiError>(body) {
            Ok(parsed) if !parsed.message.is_empty() => ApiError { status, ..parsed },
            Ok(parsed) => ApiError {
                ok: parsed.ok,
                message: String::from_utf8_lossy(body).into_owned(),
                status,
            },
            Err(e) => {
                tracing::debug!(status, error = %e, "error body is not structured; using raw text");
                ApiError {
                    ok: None,
                    message: String::from_utf8_lossy(body).into_owned(),
                    status,
                }
            }
        }
    }

    fn display_message(&self) -> String {
        if self.message.is_empty() {
            format!("unknown error (status {})", self.status)
        } else {
            self.message.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Coarse classification of a [`PanelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be built; nothing was sent.
    Build,
    /// Connection, timeout, read failure or retry exhaustion on `5xx`.
    Transport,
    /// The server answered with a non-2xx status.
    Api,
    /// A 2xx body did not have the expected envelope or type shape.
    Decode,
    /// The log stream handshake failed.
    Connect,
}

/// Every failure a call against the panel can produce.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Malformed base address, URL or payload. Never retried.
    #[error("invalid request: {message}")]
    Build {
        /// What could not be built.
        message: String,
        /// Underlying cause.
        #[source]
        source: Option<BoxError>,
    },

    /// The request did not produce a classifiable response.
    #[error("request failed: {message}")]
    Transport {
        /// Description of the failed step.
        message: String,
        /// Underlying cause.
        #[source]
        source: Option<BoxError>,
    },

    /// The server kept answering `5xx` until the attempt budget ran out.
    ///
    /// The body of such a response is never decoded.
    #[error("server error: status {status} after {attempts} attempt(s)")]
    ServerUnavailable {
        /// Status of the last response.
        status: u16,
        /// Attempts made.
        attempts: u32,
    },

    /// The overall call deadline expired.
    #[error("deadline of {deadline:?} exceeded")]
    DeadlineExceeded {
        /// The configured deadline.
        deadline: Duration,
    },

    /// The server reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful response could not be decoded.
    #[error("decode response: {source}")]
    Decode {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The log stream could not be opened.
    #[error("log stream connect failed: {message}")]
    Connect {
        /// Description of the failed step.
        message: String,
        /// Underlying cause.
        #[source]
        source: Option<BoxError>,
    },
}

impl PanelError {
    /// Creates a [`PanelError::Build`].
    pub fn build(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        PanelError::Build {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a [`PanelError::Transport`].
    pub fn transport(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        PanelError::Transport {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a [`PanelError::Connect`].
    pub fn connect(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        PanelError::Connect {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PanelError::Build { .. } => ErrorKind::Build,
            PanelError::Transport { .. }
            | PanelError::ServerUnavailable { .. }
            | PanelError::DeadlineExceeded { .. } => ErrorKind::Transport,
            PanelError::Api(_) => ErrorKind::Api,
            PanelError::Decode { .. } => ErrorKind::Decode,
            PanelError::Connect { .. } => ErrorKind::Connect,
        }
    }

    /// HTTP status associated with the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            PanelError::Api(api) => Some(api.status),
            PanelError::ServerUnavailable { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The decoded API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            PanelError::Api(api) => Some(api),
            _ => None,
        }
    }

    /// Whether a single failed attempt ending in this error may be repeated.
    ///
    /// The deadline is shared by every attempt, so its expiry is final.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            PanelError::Transport { .. } | PanelError::ServerUnavailable { .. } => {
                RetryPolicy::Retryable { after: None }
            }
            _ => RetryPolicy::NonRetryable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_uses_structured_message() {
        let err = ApiError::from_response(403, br#"{"ok":false,"errorMessage":"access denied"}"#);
        assert_eq!(err.status, 403);
        assert_eq!(err.ok, Some(false));
        assert_eq!(err.message, "access denied");
        assert_eq!(err.to_string(), "access denied");
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = ApiError::from_response(404, b"Not Found");
        assert_eq!(err.status, 404);
        assert_eq!(err.ok, None);
        assert_eq!(err.message, "Not Found");
    }

    #[test]
    fn api_error_with_empty_message_uses_raw_body() {
        let body = br#"{"ok":false,"errorMessage":""}"#;
        let err = ApiError::from_response(400, body);
        assert_eq!(err.ok, Some(false));
        assert_eq!(err.message, String::from_utf8_lossy(body));
    }

    #[test]
    fn api_error_with_empty_body_has_fallback_display() {
        let err = ApiError::from_response(401, b"");
        assert_eq!(err.message, "");
        assert_eq!(err.to_string(), "unknown error (status 401)");
    }

    #[test]
    fn kinds_and_statuses() {
        let api = PanelError::from(ApiError::from_response(403, b"nope"));
        assert_eq!(api.kind(), ErrorKind::Api);
        assert_eq!(api.status(), Some(403));
        assert!(!api.retry_policy().is_retryable());

        let exhausted = PanelError::ServerUnavailable {
            status: 502,
            attempts: 2,
        };
        assert_eq!(exhausted.kind(), ErrorKind::Transport);
        assert_eq!(exhausted.status(), Some(502));
        assert!(exhausted.retry_policy().is_retryable());

        let deadline = PanelError::DeadlineExceeded {
            deadline: Duration::from_secs(1),
        };
        assert_eq!(deadline.kind(), ErrorKind::Transport);
        assert!(!deadline.retry_policy().is_retryable());
    }
}
