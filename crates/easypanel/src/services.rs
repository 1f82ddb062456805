//! `services.<type>.*` calls, plus service logs.
//!
//! Every per-service operation exists once per [`ServiceKind`]; the kind picks
//! the route, the payload names the service. Live logs bypass the
//! request/response transport and go through [`transport::stream`].

use protocol::{
    routes::services as route, CreateServiceParams, DeployParams, ExposeServiceParams,
    MountParams, PanelError, SelectService, Service, ServiceKind, StreamLogsParams, TransportExt,
    UpdateAdvancedParams, UpdateBackupParams, UpdateBasicAuth, UpdateBuildParams, UpdateEnv,
    UpdateGit, UpdateGithub, UpdateImage, UpdatePorts, UpdateRedirects, UpdateResources,
    UpdateSourceGitCompose, UpdateSourceInline,
};
use tokio_util::sync::CancellationToken;
use transport::LogStream;

use crate::Client;

// ---------------------------------------------------------------------------
// Macro for write calls that return nothing.
// Generates: async fn name(&self, kind, &Params) -> Result<(), PanelError>
// posting `params` to the route template resolved with `kind`.
// ---------------------------------------------------------------------------
macro_rules! service_updates {
    (
        $(
            $(#[$attr:meta])*
            $name:ident($params:ty) => $route:ident;
        )*
    ) => {
        $(
            $(#[$attr])*
            pub async fn $name(&self, kind: ServiceKind, params: &$params) -> Result<(), PanelError> {
                self.client
                    .transport()
                    .post_unit(&route::$route.resolve(kind), Some(params))
                    .await
            }
        )*
    };
}

/// Service operations. Obtained from [`Client::services`].
#[derive(Debug, Clone, Copy)]
pub struct Services<'a> {
    client: &'a Client,
}

impl<'a> Services<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        kind: ServiceKind,
        params: &CreateServiceParams,
    ) -> Result<Service, PanelError> {
        self.client
            .transport()
            .post(&route::CREATE.resolve(kind), Some(params))
            .await
    }

    /// Full service state, including its deploy token.
    pub async fn inspect(&self, kind: ServiceKind, params: &SelectService) -> Result<Service, PanelError> {
        self.client
            .transport()
            .get(&route::INSPECT.resolve(kind), params)
            .await
    }

    service_updates! {
        destroy(SelectService) => DESTROY;
        /// Triggers a new deployment.
        deploy(SelectService) => DEPLOY;
        stop(SelectService) => STOP;
        restart(SelectService) => RESTART;
        disable(SelectService) => DISABLE;
        enable(SelectService) => ENABLE;
        /// Publishes a port on the host.
        expose(ExposeServiceParams) => EXPOSE;
        /// Invalidates the current deploy token and issues a new one.
        refresh_deploy_token(SelectService) => REFRESH_DEPLOY_TOKEN;
        update_source_github(UpdateGithub) => UPDATE_SOURCE_GITHUB;
        update_source_git(UpdateGit) => UPDATE_SOURCE_GIT;
        update_source_image(UpdateImage) => UPDATE_SOURCE_IMAGE;
        /// Replaces the docker-compose file of a compose service.
        update_source_inline(UpdateSourceInline) => UPDATE_SOURCE_INLINE;
        /// Points a compose service at a Git repository. Shares the route of
        /// [`Services::update_source_git`].
        update_source_git_compose(UpdateSourceGitCompose) => UPDATE_SOURCE_GIT;
        update_build(UpdateBuildParams) => UPDATE_BUILD;
        update_env(UpdateEnv) => UPDATE_ENV;
        update_domains(CreateServiceParams) => UPDATE_DOMAINS;
        update_redirects(UpdateRedirects) => UPDATE_REDIRECTS;
        update_basic_auth(UpdateBasicAuth) => UPDATE_BASIC_AUTH;
        update_mounts(MountParams) => UPDATE_MOUNTS;
        update_ports(UpdatePorts) => UPDATE_PORTS;
        update_resources(UpdateResources) => UPDATE_RESOURCES;
        update_deploy(DeployParams) => UPDATE_DEPLOY;
        update_backup(UpdateBackupParams) => UPDATE_BACKUP;
        update_advanced(UpdateAdvancedParams) => UPDATE_ADVANCED;
    }

    /// Recent log output of a service as a single string.
    pub async fn service_logs(&self, params: &SelectService) -> Result<String, PanelError> {
        self.client.transport().get(&route::LOGS, params).await
    }

    /// Opens the live log stream of a service.
    ///
    /// The stream ends when `cancel` fires, when the returned handle is
    /// dropped, or when the panel closes the connection.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Connect`] if the WebSocket handshake fails.
    pub async fn stream_logs(
        &self,
        params: &StreamLogsParams,
        cancel: CancellationToken,
    ) -> Result<LogStream, PanelError> {
        transport::open_log_stream(self.client.config(), params, cancel).await
    }
}
