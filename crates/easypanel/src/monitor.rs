//! `monitor.*` calls.

use protocol::{
    routes::monitor as route, AdvancedStats, ContainerStats, DockerTaskStats, PanelError,
    SelectService, SystemStats, TransportExt,
};

use crate::Client;

/// Host and container metrics. Obtained from [`Client::monitor`].
#[derive(Debug, Clone, Copy)]
pub struct Monitor<'a> {
    client: &'a Client,
}

impl<'a> Monitor<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// CPU, disk, memory and network history of the host.
    pub async fn advanced_stats(&self) -> Result<AdvancedStats, PanelError> {
        self.client.transport().get(&route::ADVANCED_STATS, &()).await
    }

    pub async fn system_stats(&self) -> Result<SystemStats, PanelError> {
        self.client.transport().get(&route::SYSTEM_STATS, &()).await
    }

    /// Running versus desired replicas, keyed by `<project>_<service>`.
    pub async fn docker_task_stats(&self) -> Result<DockerTaskStats, PanelError> {
        self.client.transport().get(&route::DOCKER_TASK_STATS, &()).await
    }

    /// One row per running container.
    pub async fn monitor_table_data(&self) -> Result<Vec<ContainerStats>, PanelError> {
        self.client.transport().get(&route::TABLE_DATA, &()).await
    }

    /// Metrics of one service. The shape varies between panel versions, so
    /// the value is returned undecoded.
    pub async fn service_stats(
        &self,
        params: &SelectService,
    ) -> Result<serde_json::Value, PanelError> {
        self.client.transport().get(&route::SERVICE_STATS, params).await
    }
}
