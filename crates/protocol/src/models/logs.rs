//! Log stream payloads.

use serde::{Deserialize, Serialize};

use crate::{DeployToken, ProjectName, ServiceId, ServiceName};

/// One frame of a live log stream: `{"output": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogMessage {
    /// Raw output text, usually a timestamped line ending in `\r\n`.
    pub output: String,
}

/// What to stream and how to authorise it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLogsParams {
    pub project_name: ProjectName,
    pub service_name: ServiceName,
    /// The service's deploy token (from an inspected [`crate::Service`]).
    pub token: DeployToken,
    /// Set for compose services.
    pub compose: bool,
}

impl StreamLogsParams {
    /// The `<project>_<service>` identifier sent as the `service` parameter.
    pub fn service_id(&self) -> ServiceId {
        ServiceId::new(&self.project_name, &self.service_name)
    }
}
