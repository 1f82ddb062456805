//! `settings.*` calls.

use protocol::{
    routes::settings as route, ChangeCredentialsParams, GithubTokenParams, LetsEncryptParams,
    PanelDomain, PanelDomainParams, PanelError, PruneDockerDailyParams, TraefikConfParams,
    TransportExt, NO_BODY,
};

use crate::Client;

/// Panel-wide settings and maintenance. Obtained from [`Client::settings`].
#[derive(Debug, Clone, Copy)]
pub struct Settings<'a> {
    client: &'a Client,
}

impl<'a> Settings<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Changes the login email and password of the current user.
    pub async fn change_credentials(&self, params: &ChangeCredentialsParams) -> Result<(), PanelError> {
        self.client
            .transport()
            .post_unit(&route::CHANGE_CREDENTIALS, Some(params))
            .await
    }

    // -----------------------------------------------------------------------
    // Values
    // -----------------------------------------------------------------------

    pub async fn github_token(&self) -> Result<String, PanelError> {
        self.client.transport().get(&route::GET_GITHUB_TOKEN, &()).await
    }

    pub async fn set_github_token(&self, params: &GithubTokenParams) -> Result<String, PanelError> {
        self.client
            .transport()
            .post(&route::SET_GITHUB_TOKEN, Some(params))
            .await
    }

    pub async fn letsencrypt_email(&self) -> Result<String, PanelError> {
        self.client
            .transport()
            .get(&route::GET_LETSENCRYPT_EMAIL, &())
            .await
    }

    pub async fn set_letsencrypt_email(&self, params: &LetsEncryptParams) -> Result<String, PanelError> {
        self.client
            .transport()
            .post(&route::SET_LETSENCRYPT_EMAIL, Some(params))
            .await
    }

    pub async fn panel_domain(&self) -> Result<PanelDomain, PanelError> {
        self.client.transport().get(&route::GET_PANEL_DOMAIN, &()).await
    }

    pub async fn set_panel_domain(&self, params: &PanelDomainParams) -> Result<(), PanelError> {
        self.client
            .transport()
            .post_unit(&route::SET_PANEL_DOMAIN, Some(params))
            .await
    }

    pub async fn server_ip(&self) -> Result<String, PanelError> {
        self.client.transport().get(&route::GET_SERVER_IP, &()).await
    }

    /// Re-detects the public address of the host.
    pub async fn refresh_server_ip(&self) -> Result<(), PanelError> {
        self.client
            .transport()
            .post_unit(&route::REFRESH_SERVER_IP, NO_BODY)
            .await
    }

    pub async fn traefik_custom_config(&self) -> Result<String, PanelError> {
        self.client
            .transport()
            .get(&route::GET_TRAEFIK_CUSTOM_CONFIG, &())
            .await
    }

    pub async fn update_traefik_custom_config(&self, params: &TraefikConfParams) -> Result<(), PanelError> {
        self.client
            .transport()
            .post_unit(&route::UPDATE_TRAEFIK_CUSTOM_CONFIG, Some(params))
            .await
    }

    // -----------------------------------------------------------------------
    // Maintenance
    // -----------------------------------------------------------------------

    pub async fn restart_panel(&self) -> Result<(), PanelError> {
        self.client.transport().post_unit(&route::RESTART_PANEL, NO_BODY).await
    }

    pub async fn restart_traefik(&self) -> Result<(), PanelError> {
        self.client.transport().post_unit(&route::RESTART_TRAEFIK, NO_BODY).await
    }

    /// Removes unused images. Returns the panel's summary of what was freed.
    pub async fn prune_docker_images(&self) -> Result<String, PanelError> {
        self.client.transport().post(&route::PRUNE_DOCKER_IMAGES, NO_BODY).await
    }

    /// Clears the build cache. Returns the panel's summary of what was freed.
    pub async fn prune_docker_builder(&self) -> Result<String, PanelError> {
        self.client.transport().post(&route::PRUNE_DOCKER_BUILDER, NO_BODY).await
    }

    /// Turns the daily prune job on or off. Returns the new setting.
    pub async fn set_docker_prune_daily(&self, params: &PruneDockerDailyParams) -> Result<bool, PanelError> {
        self.client
            .transport()
            .post(&route::SET_PRUNE_DOCKER_DAILY, Some(params))
            .await
    }
}
