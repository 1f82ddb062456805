//! The `{"json": ...}` envelope convention.
//!
//! Requests are wrapped as `{"json": <payload>}`, either as the POST body or
//! serialised into the `input` query parameter of a GET. Successful responses
//! arrive as `{"result": {"data": {"json": <value>}}}`.
//!
//! The `json` key is always emitted, including for an absent payload
//! (`{"json":null}`): the panel routes on the presence of the parameter.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::PanelError;

/// Wrapper around a request payload (or the innermost layer of a response).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The payload itself.
    pub json: T,

    /// Serialiser metadata attached by some servers; never sent by this client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// Wraps `json` without metadata.
    pub fn new(json: T) -> Self {
        Self { json, meta: None }
    }
}

/// A successful response: `{"result": {"data": {"json": T}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    /// The `result` layer.
    pub result: ResponseResult<T>,
}

/// The `result` layer of a [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult<T> {
    /// The `data` layer, itself an envelope.
    pub data: Envelope<T>,
}

impl<T> Response<T> {
    /// Builds the response shape around `value`.
    pub fn new(value: T) -> Self {
        Self {
            result: ResponseResult {
                data: Envelope::new(value),
            },
        }
    }

    /// Unwraps the response down to its value.
    pub fn into_inner(self) -> T {
        self.result.data.json
    }
}

/// Encodes a request payload as compact `{"json": payload}` bytes.
///
/// Pass `&()` for an absent payload; it encodes as `{"json":null}`.
///
/// # Errors
///
/// Returns [`PanelError::Build`] if the payload cannot be serialised.
pub fn encode<I>(payload: &I) -> Result<Vec<u8>, PanelError>
where
    I: Serialize + ?Sized,
{
    serde_json::to_vec(&Envelope::new(payload))
        .map_err(|e| PanelError::build("serialise request envelope", e))
}

/// Decodes the value out of a `{"result": {"data": {"json": T}}}` body.
///
/// # Errors
///
/// Returns [`PanelError::Decode`] if the body does not have the response shape
/// or the inner value cannot be turned into `T`.
pub fn decode<T>(body: &[u8]) -> Result<T, PanelError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice::<Response<T>>(body)
        .map(Response::into_inner)
        .map_err(|source| PanelError::Decode { source })
}

/// Encodes a value in the response shape. The counterpart of [`decode`].
///
/// # Errors
///
/// Returns [`PanelError::Build`] if the value cannot be serialised.
pub fn encode_response<T>(value: &T) -> Result<Vec<u8>, PanelError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_vec(&Response::new(value))
        .map_err(|e| PanelError::build("serialise response envelope", e))
}

/// Decodes the payload of a `{"json": T}` request body. The counterpart of
/// [`encode`].
///
/// # Errors
///
/// Returns [`PanelError::Decode`] if the body is not a request envelope.
pub fn decode_request<T>(body: &[u8]) -> Result<T, PanelError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice::<Envelope<T>>(body)
        .map(|envelope| envelope.json)
        .map_err(|source| PanelError::Decode { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, ProjectName, SelectService};

    #[test]
    fn absent_payload_still_emits_json_key() {
        assert_eq!(encode(&()).unwrap(), br#"{"json":null}"#);
        assert_eq!(encode(&None::<u32>).unwrap(), br#"{"json":null}"#);
    }

    #[test]
    fn payload_is_wrapped_compactly() {
        let payload = ProjectName::new("my-app").unwrap();
        assert_eq!(encode(&payload).unwrap(), br#"{"json":"my-app"}"#);
    }

    #[test]
    fn request_round_trip() {
        let payload = SelectService::new("proj", "svc");
        let decoded: SelectService = decode_request(&encode(&payload).unwrap()).unwrap();
        assert_eq!(decoded, payload);

        let absent: Option<SelectService> = decode_request(&encode(&()).unwrap()).unwrap();
        assert_eq!(absent, None);
    }

    #[test]
    fn response_round_trip() {
        let value = vec!["a".to_string(), "b".to_string()];
        let decoded: Vec<String> = decode(&encode_response(&value).unwrap()).unwrap();
        assert_eq!(decoded, value);

        let null: Option<bool> = decode(&encode_response(&None::<bool>).unwrap()).unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn decode_accepts_meta() {
        let body = br#"{"result":{"data":{"json":true,"meta":{"values":{}}}}}"#;
        assert!(decode::<bool>(body).unwrap());
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let err = decode::<bool>(br#"{"json":true}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);

        let err = decode::<u32>(br#"{"result":{"data":{"json":"nope"}}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
