//! The port through which resource façades reach the panel.
//!
//! [`Transport`] moves already-encoded envelopes and hands back the raw body of
//! a successful (2xx) response. Retry, status classification and
//! authentication are the implementation's business.
//! [`TransportExt`] layers the envelope codec on top so that callers deal in
//! typed payloads only.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::{envelope, PanelError, Route};

/// A request/response channel to the panel.
///
/// Implementations must be safe to share between concurrent calls, and must
/// stop work on a call when its future is dropped. Callers rely on that to
/// impose their own per-call deadline with `tokio::time::timeout`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a read call with `input` (an encoded envelope) as the `input`
    /// query parameter.
    ///
    /// Returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Any [`PanelError`] other than [`PanelError::Decode`].
    async fn query(&self, route: &Route, input: Vec<u8>) -> Result<Vec<u8>, PanelError>;

    /// Issues a write call. `body` is an encoded envelope, or `None` to send
    /// an empty body.
    ///
    /// Returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Any [`PanelError`] other than [`PanelError::Decode`].
    async fn mutate(&self, route: &Route, body: Option<Vec<u8>>) -> Result<Vec<u8>, PanelError>;
}

/// Typed calls over any [`Transport`].
#[async_trait]
pub trait TransportExt: Transport {
    /// Read call returning the decoded value. Pass `&()` for no input.
    async fn get<I, O>(&self, route: &Route, input: &I) -> Result<O, PanelError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let input = envelope::encode(input)?;
        let body = self.query(route, input).await?;
        envelope::decode(&body)
    }

    /// Read call whose response body is discarded after status classification.
    async fn get_unit<I>(&self, route: &Route, input: &I) -> Result<(), PanelError>
    where
        I: Serialize + Sync + ?Sized,
    {
        let input = envelope::encode(input)?;
        self.query(route, input).await.map(drop)
    }

    /// Write call returning the decoded value. `None` sends an empty body.
    async fn post<I, O>(&self, route: &Route, body: Option<&I>) -> Result<O, PanelError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let body = body.map(envelope::encode).transpose()?;
        let response = self.mutate(route, body).await?;
        envelope::decode(&response)
    }

    /// Write call whose response body is discarded after status classification.
    async fn post_unit<I>(&self, route: &Route, body: Option<&I>) -> Result<(), PanelError>
    where
        I: Serialize + Sync + ?Sized,
    {
        let body = body.map(envelope::encode).transpose()?;
        self.mutate(route, body).await.map(drop)
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}

/// No payload, for [`TransportExt::post`] and [`TransportExt::post_unit`].
pub const NO_BODY: Option<&()> = None;

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{routes, ErrorKind, SelectService};

    /// Records what it was sent and replies with a canned body.
    struct Canned {
        reply: Vec<u8>,
        seen: Mutex<Vec<(String, Option<Vec<u8>>)>>,
    }

    impl Canned {
        fn new(reply: &[u8]) -> Self {
            Self {
                reply: reply.to_vec(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn query(&self, route: &Route, input: Vec<u8>) -> Result<Vec<u8>, PanelError> {
            self.seen
                .lock()
                .unwrap()
                .push((route.to_string(), Some(input)));
            Ok(self.reply.clone())
        }

        async fn mutate(
            &self,
            route: &Route,
            body: Option<Vec<u8>>,
        ) -> Result<Vec<u8>, PanelError> {
            self.seen.lock().unwrap().push((route.to_string(), body));
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn get_encodes_absent_input_as_null() {
        let transport = Canned::new(br#"{"result":{"data":{"json":true}}}"#);
        let can: bool = transport.get(&routes::projects::CAN_CREATE, &()).await.unwrap();
        assert!(can);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].1.as_deref(), Some(&br#"{"json":null}"#[..]));
    }

    #[tokio::test]
    async fn post_without_body_sends_nothing() {
        let transport = Canned::new(b"");
        transport
            .post_unit(&routes::settings::RESTART_TRAEFIK, NO_BODY)
            .await
            .unwrap();
        assert_eq!(transport.seen.lock().unwrap()[0].1, None);
    }

    #[tokio::test]
    async fn post_wraps_body_in_envelope() {
        let transport = Canned::new(b"");
        let params = SelectService::new("proj", "svc");
        transport
            .post_unit(&routes::projects::DESTROY, Some(&params))
            .await
            .unwrap();
        let seen = transport.seen.lock().unwrap();
        let sent: SelectService = envelope::decode_request(seen[0].1.as_ref().unwrap()).unwrap();
        assert_eq!(sent, params);
    }

    #[tokio::test]
    async fn typed_call_on_empty_success_body_is_a_decode_error() {
        let transport = Canned::new(b"");
        let err = transport
            .get::<_, bool>(&routes::projects::CAN_CREATE, &())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
