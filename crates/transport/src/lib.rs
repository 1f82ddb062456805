//! Easypanel transport adapters.
//!
//! Implements the [`protocol::Transport`] port over HTTP(S), and opens the
//! live service log stream over WebSocket.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL assembly, authentication headers, retry, status
//! classification and socket lifecycle all live here. The `easypanel` crate
//! sees only [`protocol::Transport`] for request/response calls and
//! [`LogStream`] for streaming.
//!
//! ## Retry
//!
//! Each call makes at most [`http::MAX_ATTEMPTS`] attempts, one second apart.
//! Only connection failures, response read failures and `5xx` responses are
//! retried. A configured deadline bounds the call as a whole.
//!
//! ## Cancellation
//!
//! Dropping a call's future abandons the call. The log stream is bound to a
//! [`tokio_util::sync::CancellationToken`] and to the lifetime of its
//! [`LogStream`] handle.

pub mod http;
pub mod stream;

pub use http::HttpTransport;
pub use stream::{open as open_log_stream, stream_url, CloseReason, LogStream};
