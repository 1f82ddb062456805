//! Service payloads.

use serde::{Deserialize, Serialize};

use super::{is_false, is_zero};
use crate::{DeployToken, ServiceKind};

/// Identifies a service within a project. Embedded in most service payloads.
///
/// The credential and image fields are only meaningful when creating database
/// services and are omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectService {
    pub project_name: String,
    pub service_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root_password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
}

impl SelectService {
    pub fn new(project_name: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            service_name: service_name.into(),
            ..Self::default()
        }
    }
}

/// A domain attached to a service at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainParams {
    pub host: String,
    #[serde(skip_serializing_if = "is_false")]
    pub https: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub port: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateServiceParams {
    #[serde(flatten)]
    pub service: SelectService,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<DomainParams>,
}

impl From<SelectService> for CreateServiceParams {
    fn from(service: SelectService) -> Self {
        Self {
            service,
            domains: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectParams {
    pub regex: String,
    pub replacement: String,
    pub permanent: bool,
}

/// A published port.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortParams {
    /// `"tcp"` or `"udp"`.
    pub protocol: String,
    pub published: u32,
    pub target: u32,
}

/// A bind mount, named volume or file mount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MountEntry {
    /// `"bind"`, `"volume"` or `"file"`.
    #[serde(rename = "type")]
    pub mount_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    pub mount_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MountParams {
    #[serde(flatten)]
    pub service: SelectService,
    pub mounts: Vec<MountEntry>,
}

/// Basic auth credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserParams {
    pub username: String,
    pub password: String,
}

/// Swarm deployment settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployParams {
    #[serde(flatten)]
    pub service: SelectService,
    pub replicas: u32,
    pub command: Vec<String>,
    pub zero_downtime: bool,
    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,
    pub sysctls: Vec<String>,
}

/// CPU and memory limits and reservations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resources {
    pub cpu_limit: f64,
    pub cpu_reservation: f64,
    pub memory_limit: f64,
    pub memory_reservation: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateResources {
    #[serde(flatten)]
    pub service: SelectService,
    pub resources: Resources,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateBuildParams {
    #[serde(flatten)]
    pub service: SelectService,
    /// `"nixpacks"`, `"herokuBuildpacks"`, `"dockerfile"` or `"none"`.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub build_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GitParams {
    pub repo: String,
    pub branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubParams {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerImageParams {
    pub image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

/// Where a service's code or image comes from, as reported by the panel.
///
/// The panel reuses field names across source types, so this is a flat union
/// of every source's fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceSource {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub source_type: String,
    pub auto_deploy: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub repo: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGithub {
    #[serde(flatten)]
    pub service: SelectService,
    #[serde(flatten)]
    pub github: GithubParams,
    pub auto_deploy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGit {
    #[serde(flatten)]
    pub service: SelectService,
    #[serde(flatten)]
    pub git: GitParams,
    pub auto_deploy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImage {
    pub project_name: String,
    pub service_name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateEnv {
    #[serde(flatten)]
    pub service: SelectService,
    /// Dotenv-formatted variables.
    pub env: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateRedirects {
    #[serde(flatten)]
    pub service: SelectService,
    pub redirects: Vec<RedirectParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBasicAuth {
    #[serde(flatten)]
    pub service: SelectService,
    pub basic_auth: Vec<UserParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdatePorts {
    #[serde(flatten)]
    pub service: SelectService,
    pub ports: Vec<PortParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposeServiceParams {
    #[serde(flatten)]
    pub service: SelectService,
    pub exposed_port: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateAdvancedParams {
    #[serde(flatten)]
    pub service: SelectService,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateBackupParams {
    #[serde(flatten)]
    pub service: SelectService,
}

/// Inline docker-compose content for a compose service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceInline {
    pub project_name: String,
    pub service_name: String,
    pub compose_file: String,
    pub compose_content: String,
}

/// A Git repository source for a compose service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceGitCompose {
    pub project_name: String,
    pub service_name: String,
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub compose_file: String,
    pub auto_deploy: bool,
}

/// A service as reported by the panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    #[serde(flatten)]
    pub service: SelectService,
    /// Some endpoints report `name` instead of `serviceName`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<ServiceKind>,
    pub enabled: bool,
    pub token: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub env: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy: Option<DeployParams>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<DomainParams>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mounts: Vec<MountEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortParams>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<RedirectParams>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub basic_auth: Vec<UserParams>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exposed_port: u32,
    #[serde(rename = "deploymentUrl", skip_serializing_if = "String::is_empty")]
    pub deployment_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ServiceSource>,
    pub resources: Resources,
}

impl Service {
    /// The service name, whichever field the endpoint used for it.
    pub fn service_name(&self) -> &str {
        if self.service.service_name.is_empty() {
            &self.name
        } else {
            &self.service.service_name
        }
    }

    /// The deploy token that authorises a log stream, if the panel sent one.
    pub fn deploy_token(&self) -> Option<DeployToken> {
        DeployToken::new(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_service_omits_empty_credentials() {
        let json = serde_json::to_value(SelectService::new("proj", "svc")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"projectName": "proj", "serviceName": "svc"})
        );
    }

    #[test]
    fn embedded_selection_is_flattened() {
        let params = UpdateEnv {
            service: SelectService::new("proj", "svc"),
            env: "A=1".into(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"projectName": "proj", "serviceName": "svc", "env": "A=1"})
        );
        let back: UpdateEnv = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn build_type_may_be_left_unset() {
        let params = UpdateBuildParams {
            service: SelectService::new("proj", "svc"),
            build_type: String::new(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"projectName": "proj", "serviceName": "svc"})
        );
        let back: UpdateBuildParams = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn service_tolerates_sparse_payloads() {
        let service: Service = serde_json::from_value(serde_json::json!({
            "projectName": "proj",
            "name": "db",
            "type": "mysql",
            "enabled": true,
            "token": "deploy-token"
        }))
        .unwrap();
        assert_eq!(service.service_name(), "db");
        assert_eq!(service.kind, Some(ServiceKind::Mysql));
        assert_eq!(service.deploy_token().unwrap().expose(), "deploy-token");
        assert_eq!(service.resources, Resources::default());
    }

    #[test]
    fn service_rejects_unknown_kinds() {
        let result = serde_json::from_value::<Service>(serde_json::json!({"type": "box"}));
        assert!(result.is_err());
    }
}
