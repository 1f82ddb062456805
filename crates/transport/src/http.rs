//! HTTP request/response core.
//!
//! [`HttpTransport`] performs one logical call per [`Transport`] method:
//!
//! ```text
//! Building ──► Sent ──► Success | DecodedError | TransportError
//!                │
//!                └──► Building   (once: 5xx, connection or read failure)
//! ```
//!
//! The request body is materialised before the first send so that the retry
//! resends exactly the same bytes. A `5xx` on the final attempt surfaces as
//! [`PanelError::ServerUnavailable`]; its body is never decoded.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use protocol::{ApiError, EndpointConfig, PanelError, RetryPolicy, Route, Transport};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method, Url,
};
use tracing::Instrument;

/// Total attempts per call, the first one included.
pub const MAX_ATTEMPTS: u32 = 2;

/// Fixed pause before the retry.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// A fully built request, kept around so it can be replayed.
#[derive(Debug)]
struct PreparedRequest {
    method: Method,
    url: Url,
    body: Option<Vec<u8>>,
}

/// [`Transport`] over HTTP(S) using [`reqwest`].
///
/// Cheap to clone; clones share the connection pool and the configuration.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: Arc<EndpointConfig>,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Builds the transport. The per-attempt socket timeout comes from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Build`] if the HTTP client cannot be constructed
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: Arc<EndpointConfig>) -> Result<Self, PanelError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PanelError::build("construct HTTP client", e))?;
        Ok(Self { config, http })
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &Arc<EndpointConfig> {
        &self.config
    }

    fn url(&self, route: &Route) -> Result<Url, PanelError> {
        let raw = format!("{}{}", self.config.endpoint(), route);
        Url::parse(&raw).map_err(|e| PanelError::build(format!("invalid URL '{raw}'"), e))
    }

    /// Runs the attempts of one call, bounded by the configured deadline.
    async fn execute(&self, request: PreparedRequest) -> Result<Vec<u8>, PanelError> {
        match self.config.deadline() {
            Some(deadline) => tokio::time::timeout(deadline, self.attempts(&request))
                .await
                .map_err(|_| PanelError::DeadlineExceeded { deadline })?,
            None => self.attempts(&request).await,
        }
    }

    async fn attempts(&self, request: &PreparedRequest) -> Result<Vec<u8>, PanelError> {
        let mut attempt = 1;
        loop {
            let err = match self.attempt(request, attempt).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };

            if attempt >= MAX_ATTEMPTS {
                return Err(err);
            }
            match err.retry_policy() {
                RetryPolicy::Retryable { after } => {
                    let delay = after.unwrap_or(RETRY_DELAY);
                    tracing::warn!(attempt, error = %err, ?delay, "attempt failed; retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                RetryPolicy::NonRetryable => return Err(err),
            }
        }
    }

    /// Sends the request once and classifies the response.
    async fn attempt(&self, request: &PreparedRequest, attempt: u32) -> Result<Vec<u8>, PanelError> {
        tracing::debug!(attempt, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .header(AUTHORIZATION, self.config.token().expose());
        if request.method == Method::POST {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(request.body.clone().unwrap_or_default());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                PanelError::build("assemble request", e)
            } else {
                PanelError::transport("send request", e)
            }
        })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| PanelError::transport("read response body", e))?;

        tracing::debug!(attempt, status = status.as_u16(), len = body.len(), "response received");

        if status.is_server_error() {
            return Err(PanelError::ServerUnavailable {
                status: status.as_u16(),
                attempts: attempt,
            });
        }
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body).into());
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn query(&self, route: &Route, input: Vec<u8>) -> Result<Vec<u8>, PanelError> {
        let span = tracing::debug_span!("panel_call", method = "GET", route = %route);
        async {
            let input = String::from_utf8(input)
                .map_err(|e| PanelError::build("input envelope is not UTF-8", e))?;
            let mut url = self.url(route)?;
            url.query_pairs_mut().append_pair("input", &input);

            self.execute(PreparedRequest {
                method: Method::GET,
                url,
                body: None,
            })
            .await
        }
        .instrument(span)
        .await
    }

    async fn mutate(&self, route: &Route, body: Option<Vec<u8>>) -> Result<Vec<u8>, PanelError> {
        let span = tracing::debug_span!("panel_call", method = "POST", route = %route);
        async {
            let url = self.url(route)?;
            self.execute(PreparedRequest {
                method: Method::POST,
                url,
                body,
            })
            .await
        }
        .instrument(span)
        .await
    }
}
