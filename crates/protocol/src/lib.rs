//! Wire protocol of the Easypanel API.
//!
//! This crate contains everything about talking to the panel that does not
//! involve I/O: the `{"json": ...}` envelope codec, route descriptors, the
//! request/response data model, the error taxonomy and the [`Transport`] port
//! trait. The `transport` crate implements the port over HTTP and WebSocket;
//! the `easypanel` crate builds typed resource façades on top of it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Name newtypes (`ProjectName`, `ServiceId`) and redacted tokens |
//! | [`config`] | Validated, immutable `EndpointConfig` |
//! | [`errors`] | `PanelError`, `ApiError`, `ErrorKind` and `RetryPolicy` |
//! | [`envelope`] | Request/response envelope codec |
//! | [`routes`] | Route constants, templates and service/license kinds |
//! | [`models`] | Typed payloads per resource |
//! | [`transport`] | The `Transport` port and its typed extension |

pub mod config;
pub mod envelope;
pub mod errors;
pub mod identifiers;
pub mod models;
pub mod routes;
pub mod transport;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{ConfigError, EndpointConfig, RawEndpointConfig, DEFAULT_TIMEOUT};
pub use envelope::{Envelope, Response};
pub use errors::{ApiError, BoxError, ErrorKind, PanelError, RetryPolicy};
pub use identifiers::{AuthToken, DeployToken, ProjectName, ServiceId, ServiceName};
pub use models::*;
pub use routes::{LicenseKind, Route, RouteTemplate, ServiceKind, UnknownKind};
pub use transport::{Transport, TransportExt, NO_BODY};
