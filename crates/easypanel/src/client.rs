//! The client handle and its account-level calls.

use std::sync::Arc;

use protocol::{routes, EndpointConfig, LicenseKind, PanelError, Transport, TransportExt, User, NO_BODY};
use transport::HttpTransport;

use crate::{
    actions::Actions, domains::Domains, monitor::Monitor, projects::Projects, services::Services,
    settings::Settings,
};

/// Handle on one panel.
///
/// Cheap to clone; clones share the configuration and the connection pool.
/// Safe to use from concurrent tasks.
///
/// # Deadlines
///
/// [`EndpointConfig::with_deadline`] bounds every call made through the
/// client, measured from the start of each call. A caller that needs a
/// different bound for one call wraps that call instead:
///
/// ```no_run
/// # async fn run(client: &easypanel::Client) -> Result<(), Box<dyn std::error::Error>> {
/// use std::time::Duration;
///
/// let projects = tokio::time::timeout(Duration::from_secs(5), client.projects().list()).await??;
/// # drop(projects);
/// # Ok(())
/// # }
/// ```
///
/// Dropping a call's future abandons it, including any pending retry.
#[derive(Clone)]
pub struct Client {
    config: Arc<EndpointConfig>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client talking HTTP(S) to `config.endpoint()`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Build`] if the HTTP client cannot be constructed.
    pub fn new(config: EndpointConfig) -> Result<Self, PanelError> {
        let config = Arc::new(config);
        let transport = HttpTransport::new(Arc::clone(&config))?;
        tracing::debug!(endpoint = config.endpoint(), "client created");
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over an arbitrary transport.
    ///
    /// `config` is still used to open log streams.
    pub fn with_transport(config: Arc<EndpointConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// The endpoint configuration.
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    // -----------------------------------------------------------------------
    // Resources
    // -----------------------------------------------------------------------

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    pub fn services(&self) -> Services<'_> {
        Services::new(self)
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self)
    }

    pub fn actions(&self) -> Actions<'_> {
        Actions::new(self)
    }

    pub fn monitor(&self) -> Monitor<'_> {
        Monitor::new(self)
    }

    pub fn settings(&self) -> Settings<'_> {
        Settings::new(self)
    }

    // -----------------------------------------------------------------------
    // Account
    // -----------------------------------------------------------------------

    /// The user the token belongs to.
    pub async fn get_user(&self) -> Result<User, PanelError> {
        self.transport().get(&routes::auth::GET_USER, &()).await
    }

    /// Fetches the license payload of a provider. The payload itself is not
    /// interpreted.
    pub async fn license_payload(&self, kind: LicenseKind) -> Result<(), PanelError> {
        self.transport()
            .get_unit(&routes::license::GET_PAYLOAD.resolve(kind), &())
            .await
    }

    /// Activates the license of a provider.
    pub async fn activate_license(&self, kind: LicenseKind) -> Result<(), PanelError> {
        self.transport()
            .post_unit(&routes::license::ACTIVATE.resolve(kind), NO_BODY)
            .await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
