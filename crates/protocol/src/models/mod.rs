//! Request and response payloads, one module per resource.
//!
//! Field names follow the panel's camelCase wire format. Response types derive
//! `Default` and accept missing fields, since the panel omits empty values
//! freely; request types skip empty optional fields when serialising.

pub mod actions;
pub mod auth;
pub mod domains;
pub mod logs;
pub mod monitor;
pub mod projects;
pub mod services;
pub mod settings;

pub use actions::{Action, ActionDetail, GetActionParams, ListActionsParams};
pub use auth::User;
pub use domains::{DeleteDomainParams, Domain, ListDomainsParams, ServiceDestination};
pub use logs::{LogMessage, StreamLogsParams};
pub use monitor::{
    AdvancedStats, ContainerCpu, ContainerMemory, ContainerNetwork, ContainerStat, ContainerStats,
    CpuInfo, DiskInfo, DockerTaskStats, MemInfo, NetworkInfo, NetworkTimeValue, NetworkValue,
    SystemStats, TaskStatus, TimeValue,
};
pub use projects::{ProjectInfo, ProjectInspect, ProjectQuery, ProjectsWithServices, ProjectSpec};
pub use services::{
    CreateServiceParams, DeployParams, DockerImageParams, DomainParams, ExposeServiceParams,
    GitParams, GithubParams, MountEntry, MountParams, PortParams, RedirectParams, Resources,
    SelectService, Service, ServiceSource, UpdateAdvancedParams, UpdateBackupParams,
    UpdateBasicAuth, UpdateBuildParams, UpdateEnv, UpdateGit, UpdateGithub, UpdateImage,
    UpdatePorts, UpdateRedirects, UpdateResources, UpdateSourceGitCompose, UpdateSourceInline,
    UserParams,
};
pub use settings::{
    ChangeCredentialsParams, GithubTokenParams, LetsEncryptParams, PanelDomain, PanelDomainParams,
    PruneDockerDailyParams, TraefikConfParams,
};

/// `skip_serializing_if` helper for `bool` fields the panel treats as optional.
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// `skip_serializing_if` helper for numeric fields the panel treats as optional.
pub(crate) fn is_zero(value: &u32) -> bool {
    *value == 0
}
