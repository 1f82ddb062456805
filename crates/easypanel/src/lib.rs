//! Typed client for the Easypanel API.
//!
//! [`Client`] is the entry point. It owns the endpoint configuration and a
//! [`protocol::Transport`], and hands out one façade per resource:
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use easypanel::{Client, EndpointConfig, SelectService, ServiceKind};
//!
//! let client = Client::new(EndpointConfig::new("https://panel.example.com", "token")?)?;
//! for project in client.projects().list().await? {
//!     println!("{}", project.name);
//! }
//! client
//!     .services()
//!     .deploy(ServiceKind::App, &SelectService::new("shop", "web"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Façades pair a route with a typed payload and
//! delegate to the transport. They contain no protocol rules of their own:
//! envelope handling lives in [`protocol`], retry and socket handling in
//! [`transport`].

pub mod actions;
pub mod client;
pub mod domains;
pub mod monitor;
pub mod projects;
pub mod services;
pub mod settings;

pub use client::Client;

pub use protocol::{
    self, ActionDetail, ApiError, ConfigError, DeployToken, Domain, EndpointConfig, ErrorKind,
    LicenseKind, LogMessage, PanelError, ProjectInfo, ProjectInspect, ProjectName, ProjectQuery,
    ProjectSpec, RawEndpointConfig, SelectService, Service, ServiceKind, ServiceName,
    StreamLogsParams, User,
};
pub use tokio_util::sync::CancellationToken;
pub use transport::{self, CloseReason, LogStream};
