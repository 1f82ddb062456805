//! Live service log stream over WebSocket.
//!
//! [`open`] performs the handshake against `/ws/serviceLogs` and hands back a
//! [`LogStream`]: a lazy, finite [`Stream`] of [`LogMessage`]s fed by a
//! producer task. The producer and the consumer meet at a channel of capacity
//! one, so a slow consumer applies back-pressure to the socket.
//!
//! At most two decoded messages are ever held back from the consumer: one
//! waiting in the channel and one the producer is blocked on handing over.
//! The producer reads nothing further from the socket until the consumer
//! takes one of them.
//!
//! ## Lifecycle
//!
//! ```text
//! Connecting ──► Streaming ──► Closed
//!      │
//!      └──► Failed   (returned from `open`)
//! ```
//!
//! The stream ends, and the connection is released, when any of these happen:
//! the caller's [`CancellationToken`] fires, the [`LogStream`] is dropped, the
//! peer closes, a read fails, or a frame does not decode. Frame failures are
//! not surfaced as items; [`LogStream::finish`] reports the [`CloseReason`].
//! Once the token has fired no further message is yielded, even if one is
//! already buffered.

use std::{
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use async_tungstenite::{
    tokio::{connect_async, ConnectStream},
    WebSocketStream,
};
use futures::{Stream, StreamExt};
use protocol::{routes::SERVICE_LOGS_SOCKET, EndpointConfig, LogMessage, PanelError, StreamLogsParams};
use reqwest::Url;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::Instrument;
use tungstenite::Message;

/// Upper bound on sending our own close frame once the stream is over.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Why a [`LogStream`] stopped producing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The cancellation token fired or the stream was dropped.
    Cancelled,
    /// The server sent a close frame or ended the connection cleanly.
    PeerClosed,
    /// The consumer went away while a message was waiting to be delivered.
    ConsumerDropped,
    /// Reading from the socket failed.
    ReadFailed {
        /// Description of the socket error.
        error: String,
    },
    /// A frame was not a valid `{"output": ...}` message.
    BadFrame {
        /// Description of the decode error.
        error: String,
    },
    /// The producer task panicked or was aborted.
    Aborted,
}

/// Derives the WebSocket address of a service's log stream.
///
/// `https` endpoints map to `wss`, `http` endpoints to `ws`. The token, the
/// `<project>_<service>` identifier and the compose flag travel as query
/// parameters.
///
/// # Errors
///
/// Returns [`PanelError::Build`] if the endpoint cannot be turned into a URL.
pub fn stream_url(config: &EndpointConfig, params: &StreamLogsParams) -> Result<Url, PanelError> {
    let endpoint = config.endpoint();
    let (scheme, authority) = match endpoint.split_once("://") {
        Some(("https", rest)) => ("wss", rest),
        Some((_, rest)) => ("ws", rest),
        None => ("ws", endpoint),
    };

    let raw = format!("{scheme}://{authority}{SERVICE_LOGS_SOCKET}");
    let mut url = Url::parse(&raw)
        .map_err(|e| PanelError::build("invalid log stream address", e))?;
    url.query_pairs_mut()
        .append_pair("token", params.token.expose())
        .append_pair("service", params.service_id().as_str())
        .append_pair("compose", if params.compose { "true" } else { "false" });
    Ok(url)
}

/// Opens the log stream of one service.
///
/// The handshake is bounded by the configured per-attempt timeout and is
/// abandoned if `cancel` fires first. Cancelling `cancel` later ends the
/// returned stream; dropping the stream does not cancel `cancel`.
///
/// # Errors
///
/// Returns [`PanelError::Build`] for an unusable address and
/// [`PanelError::Connect`] if the handshake fails, times out or is cancelled.
/// Handshake failures are never retried.
pub async fn open(
    config: &EndpointConfig,
    params: &StreamLogsParams,
    cancel: CancellationToken,
) -> Result<LogStream, PanelError> {
    let url = stream_url(config, params)?;
    let service = params.service_id();
    tracing::info!(service = %service, compose = params.compose, "opening log stream");

    let handshake = tokio::time::timeout(config.timeout(), connect_async(url.as_str()));
    let socket = tokio::select! {
        _ = cancel.cancelled() => {
            return Err(PanelError::Connect {
                message: "cancelled during handshake".to_string(),
                source: None,
            });
        }
        result = handshake => match result {
            Ok(Ok((socket, _response))) => socket,
            Ok(Err(e)) => return Err(PanelError::connect("WebSocket handshake", e)),
            Err(_) => {
                return Err(PanelError::Connect {
                    message: format!("handshake timed out after {:?}", config.timeout()),
                    source: None,
                });
            }
        },
    };

    let session = cancel.child_token();
    let (sender, receiver) = mpsc::channel(1);
    let span = tracing::info_span!("log_stream", service = %service);
    let task = tokio::spawn(pump(socket, sender, session.clone()).instrument(span));

    Ok(LogStream {
        receiver,
        cancel: session.clone(),
        task: Some(task),
        _guard: session.drop_guard(),
    })
}

/// Producer loop: reads frames, decodes them and hands them to the consumer.
async fn pump(
    mut socket: WebSocketStream<ConnectStream>,
    sender: mpsc::Sender<LogMessage>,
    cancel: CancellationToken,
) -> CloseReason {
    let mut delivered: u64 = 0;

    let reason = loop {
        let frame = tokio::select! {
            biased;
            _ = cancel.cancelled() => break CloseReason::Cancelled,
            frame = socket.next() => frame,
        };

        let decoded = match frame {
            None | Some(Ok(Message::Close(_))) => break CloseReason::PeerClosed,
            Some(Err(e)) => break CloseReason::ReadFailed { error: e.to_string() },
            Some(Ok(Message::Text(text))) => serde_json::from_str::<LogMessage>(&text),
            Some(Ok(Message::Binary(data))) => serde_json::from_slice::<LogMessage>(&data),
            // Control frames; pongs are queued by tungstenite itself.
            Some(Ok(_)) => continue,
        };
        let message = match decoded {
            Ok(message) => message,
            Err(e) => break CloseReason::BadFrame { error: e.to_string() },
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break CloseReason::Cancelled,
            sent = sender.send(message) => {
                if sent.is_err() {
                    break CloseReason::ConsumerDropped;
                }
            }
        }
        delivered += 1;
    };

    if !matches!(reason, CloseReason::PeerClosed | CloseReason::ReadFailed { .. }) {
        match tokio::time::timeout(CLOSE_TIMEOUT, socket.close(None)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!(error = %e, "close frame not sent"),
            Err(_) => tracing::debug!("close frame timed out"),
        }
    }

    match &reason {
        CloseReason::ReadFailed { error } | CloseReason::BadFrame { error } => {
            tracing::warn!(delivered, error = %error, reason = ?reason, "log stream ended early");
        }
        _ => tracing::info!(delivered, reason = ?reason, "log stream closed"),
    }
    reason
}

/// Handle on an open log stream.
///
/// Yields messages in the order they were received. Dropping the handle stops
/// the producer and closes the connection.
#[derive(Debug)]
pub struct LogStream {
    receiver: mpsc::Receiver<LogMessage>,
    cancel: CancellationToken,
    task: Option<JoinHandle<CloseReason>>,
    _guard: DropGuard,
}

impl LogStream {
    /// Stops the stream without waiting for the producer.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the stream has been cancelled, by [`LogStream::cancel`] or by
    /// the token given to [`open`].
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops the stream if it is still running and reports why it ended.
    ///
    /// Call this after the stream returned `None` to tell a clean close from
    /// a socket or frame failure.
    pub async fn finish(mut self) -> CloseReason {
        self.cancel.cancel();
        match self.task.take() {
            Some(task) => task.await.unwrap_or(CloseReason::Aborted),
            None => CloseReason::Aborted,
        }
    }
}

impl Stream for LogStream {
    type Item = LogMessage;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.cancel.is_cancelled() {
            return Poll::Ready(None);
        }
        this.receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use protocol::{DeployToken, ProjectName, ServiceName};

    use super::*;

    fn params(compose: bool) -> StreamLogsParams {
        StreamLogsParams {
            project_name: ProjectName::new("proj").unwrap(),
            service_name: ServiceName::new("web").unwrap(),
            token: DeployToken::new("dep tok").unwrap(),
            compose,
        }
    }

    #[test]
    fn https_endpoint_maps_to_wss() {
        let config = EndpointConfig::new("https://panel.example.com", "t").unwrap();
        let url = stream_url(&config, &params(false)).unwrap();
        assert_eq!(
            url.as_str(),
            "wss://panel.example.com/ws/serviceLogs?token=dep+tok&service=proj_web&compose=false"
        );
    }

    #[test]
    fn http_endpoint_maps_to_ws_and_keeps_port() {
        let config = EndpointConfig::new("http://127.0.0.1:3000/", "t").unwrap();
        let url = stream_url(&config, &params(true)).unwrap();
        assert_eq!(url.scheme(), "ws");
        assert_eq!(url.port(), Some(3000));
        assert_eq!(url.path(), "/ws/serviceLogs");
        let compose = url
            .query_pairs()
            .find(|(key, _)| key == "compose")
            .map(|(_, value)| value.into_owned());
        assert_eq!(compose.as_deref(), Some("true"));
    }
}
