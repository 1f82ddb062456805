//! `projects.*` calls.

use protocol::{
    routes::projects as route, PanelError, ProjectInfo, ProjectInspect, ProjectQuery, ProjectSpec,
    ProjectsWithServices, TransportExt,
};

use crate::Client;

/// Project operations. Obtained from [`Client::projects`].
#[derive(Debug, Clone, Copy)]
pub struct Projects<'a> {
    client: &'a Client,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Whether the license allows another project.
    pub async fn can_create(&self) -> Result<bool, PanelError> {
        self.client.transport().get(&route::CAN_CREATE, &()).await
    }

    pub async fn create(&self, params: &ProjectSpec) -> Result<ProjectInfo, PanelError> {
        self.client.transport().post(&route::CREATE, Some(params)).await
    }

    /// Destroys a project and every service in it.
    pub async fn destroy(&self, params: &ProjectSpec) -> Result<(), PanelError> {
        self.client.transport().post_unit(&route::DESTROY, Some(params)).await
    }

    pub async fn inspect(&self, params: &ProjectQuery) -> Result<ProjectInspect, PanelError> {
        self.client.transport().get(&route::INSPECT, params).await
    }

    pub async fn list(&self) -> Result<Vec<ProjectInfo>, PanelError> {
        self.client.transport().get(&route::LIST, &()).await
    }

    pub async fn list_with_services(&self) -> Result<ProjectsWithServices, PanelError> {
        self.client.transport().get(&route::LIST_WITH_SERVICES, &()).await
    }
}
