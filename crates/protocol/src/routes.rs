//! Route descriptors for every remote operation.
//!
//! Fixed operations are plain [`Route`] constants. Operations that exist once
//! per service type or license provider are [`RouteTemplate`]s whose `{type}`
//! placeholder is substituted with the wire tag of a [`ServiceKind`] or
//! [`LicenseKind`]. A template can only be resolved with the kind it was
//! declared for.

use std::{borrow::Cow, fmt, marker::PhantomData, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder substituted by [`RouteTemplate::resolve`].
pub const PLACEHOLDER: &str = "{type}";

/// Path of the live log WebSocket.
pub const SERVICE_LOGS_SOCKET: &str = "/ws/serviceLogs";

/// A resolved route path, e.g. `/api/trpc/projects.listProjects`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(Cow<'static, str>);

impl Route {
    /// A fixed route.
    pub const fn fixed(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Returns the path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A kind whose wire tag can be substituted into a [`RouteTemplate`].
pub trait RouteTag: Copy {
    /// The tag as it appears in the route.
    fn tag(self) -> &'static str;
}

/// A route containing a `{type}` placeholder, resolvable with a `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTemplate<K> {
    template: &'static str,
    kind: PhantomData<fn(K)>,
}

impl<K: RouteTag> RouteTemplate<K> {
    /// Declares a template. `template` must contain [`PLACEHOLDER`] once.
    pub const fn new(template: &'static str) -> Self {
        Self {
            template,
            kind: PhantomData,
        }
    }

    /// The unresolved template.
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Substitutes the kind's tag for the placeholder.
    pub fn resolve(&self, kind: K) -> Route {
        Route(Cow::Owned(self.template.replacen(PLACEHOLDER, kind.tag(), 1)))
    }
}

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// A tag that is not one of the supported kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} '{tag}'")]
pub struct UnknownKind {
    what: &'static str,
    tag: String,
}

/// Type of a service. Selects the `services.<type>.*` family of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// A generic application container.
    App,
    /// MySQL database.
    Mysql,
    /// MariaDB database.
    Mariadb,
    /// PostgreSQL database.
    Postgres,
    /// MongoDB database.
    Mongo,
    /// Redis instance.
    Redis,
    /// A docker-compose stack.
    Compose,
}

impl ServiceKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [ServiceKind; 7] = [
        ServiceKind::App,
        ServiceKind::Mysql,
        ServiceKind::Mariadb,
        ServiceKind::Postgres,
        ServiceKind::Mongo,
        ServiceKind::Redis,
        ServiceKind::Compose,
    ];

    /// Wire tag of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::App => "app",
            ServiceKind::Mysql => "mysql",
            ServiceKind::Mariadb => "mariadb",
            ServiceKind::Postgres => "postgres",
            ServiceKind::Mongo => "mongo",
            ServiceKind::Redis => "redis",
            ServiceKind::Compose => "compose",
        }
    }
}

impl RouteTag for ServiceKind {
    fn tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind {
                what: "service kind",
                tag: s.to_string(),
            })
    }
}

/// License provider. Selects the `<provider>License.*` family of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseKind {
    /// Lemon Squeezy licenses.
    Lemon,
    /// Licenses bought through the Easypanel portal.
    Portal,
}

impl LicenseKind {
    /// Wire tag of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            LicenseKind::Lemon => "lemon",
            LicenseKind::Portal => "portal",
        }
    }
}

impl RouteTag for LicenseKind {
    fn tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for LicenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lemon" => Ok(LicenseKind::Lemon),
            "portal" => Ok(LicenseKind::Portal),
            _ => Err(UnknownKind {
                what: "license kind",
                tag: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Route tables
// ---------------------------------------------------------------------------

/// `auth.*`
pub mod auth {
    use super::Route;

    pub const GET_USER: Route = Route::fixed("/api/trpc/auth.getUser");
}

/// `<provider>License.*`
pub mod license {
    use super::{LicenseKind, RouteTemplate};

    pub const GET_PAYLOAD: RouteTemplate<LicenseKind> =
        RouteTemplate::new("/api/trpc/{type}License.getLicensePayload");
    pub const ACTIVATE: RouteTemplate<LicenseKind> =
        RouteTemplate::new("/api/trpc/{type}License.activate");
}

/// `projects.*`
pub mod projects {
    use super::Route;

    pub const LIST: Route = Route::fixed("/api/trpc/projects.listProjects");
    pub const LIST_WITH_SERVICES: Route =
        Route::fixed("/api/trpc/projects.listProjectsAndServices");
    pub const CAN_CREATE: Route = Route::fixed("/api/trpc/projects.canCreateProject");
    pub const INSPECT: Route = Route::fixed("/api/trpc/projects.inspectProject");
    pub const CREATE: Route = Route::fixed("/api/trpc/projects.createProject");
    pub const DESTROY: Route = Route::fixed("/api/trpc/projects.destroyProject");
}

/// `services.<type>.*` and `logs.*`
pub mod services {
    use super::{Route, RouteTemplate, ServiceKind};

    type T = RouteTemplate<ServiceKind>;

    pub const CREATE: T = T::new("/api/trpc/services.{type}.createService");
    pub const INSPECT: T = T::new("/api/trpc/services.{type}.inspectService");
    pub const DESTROY: T = T::new("/api/trpc/services.{type}.destroyService");
    pub const DEPLOY: T = T::new("/api/trpc/services.{type}.deployService");
    pub const STOP: T = T::new("/api/trpc/services.{type}.stopService");
    pub const RESTART: T = T::new("/api/trpc/services.{type}.restartService");
    pub const DISABLE: T = T::new("/api/trpc/services.{type}.disableService");
    pub const ENABLE: T = T::new("/api/trpc/services.{type}.enableService");
    pub const EXPOSE: T = T::new("/api/trpc/services.{type}.exposeService");
    pub const REFRESH_DEPLOY_TOKEN: T = T::new("/api/trpc/services.{type}.refreshDeployToken");
    pub const UPDATE_SOURCE_GITHUB: T = T::new("/api/trpc/services.{type}.updateSourceGithub");
    pub const UPDATE_SOURCE_GIT: T = T::new("/api/trpc/services.{type}.updateSourceGit");
    pub const UPDATE_SOURCE_IMAGE: T = T::new("/api/trpc/services.{type}.updateSourceImage");
    pub const UPDATE_SOURCE_INLINE: T = T::new("/api/trpc/services.{type}.updateSourceInline");
    pub const UPDATE_BUILD: T = T::new("/api/trpc/services.{type}.updateBuild");
    pub const UPDATE_ENV: T = T::new("/api/trpc/services.{type}.updateEnv");
    pub const UPDATE_DOMAINS: T = T::new("/api/trpc/services.{type}.updateDomains");
    pub const UPDATE_REDIRECTS: T = T::new("/api/trpc/services.{type}.updateRedirects");
    pub const UPDATE_BASIC_AUTH: T = T::new("/api/trpc/services.{type}.updateBasicAuth");
    pub const UPDATE_MOUNTS: T = T::new("/api/trpc/services.{type}.updateMounts");
    pub const UPDATE_PORTS: T = T::new("/api/trpc/services.{type}.updatePorts");
    pub const UPDATE_RESOURCES: T = T::new("/api/trpc/services.{type}.updateResources");
    pub const UPDATE_DEPLOY: T = T::new("/api/trpc/services.{type}.updateDeploy");
    pub const UPDATE_BACKUP: T = T::new("/api/trpc/services.{type}.updateBackup");
    pub const UPDATE_ADVANCED: T = T::new("/api/trpc/services.{type}.updateAdvanced");

    pub const LOGS: Route = Route::fixed("/api/trpc/logs.getServiceLogs");
}

/// `monitor.*`
pub mod monitor {
    use super::Route;

    pub const ADVANCED_STATS: Route = Route::fixed("/api/trpc/monitor.getAdvancedStats");
    pub const SYSTEM_STATS: Route = Route::fixed("/api/trpc/monitor.getSystemStats");
    pub const DOCKER_TASK_STATS: Route = Route::fixed("/api/trpc/monitor.getDockerTaskStats");
    pub const TABLE_DATA: Route = Route::fixed("/api/trpc/monitor.getMonitorTableData");
    pub const SERVICE_STATS: Route = Route::fixed("/api/trpc/monitor.getServiceStats");
}

/// `settings.*`
pub mod settings {
    use super::Route;

    pub const RESTART_PANEL: Route = Route::fixed("/api/trpc/settings.restartEasypanel");
    pub const GET_SERVER_IP: Route = Route::fixed("/api/trpc/settings.getServerIp");
    pub const REFRESH_SERVER_IP: Route = Route::fixed("/api/trpc/settings.refreshServerIp");
    pub const GET_GITHUB_TOKEN: Route = Route::fixed("/api/trpc/settings.getGithubToken");
    pub const SET_GITHUB_TOKEN: Route = Route::fixed("/api/trpc/settings.setGithubToken");
    pub const GET_PANEL_DOMAIN: Route = Route::fixed("/api/trpc/settings.getPanelDomain");
    pub const SET_PANEL_DOMAIN: Route = Route::fixed("/api/trpc/settings.setPanelDomain");
    pub const GET_LETSENCRYPT_EMAIL: Route =
        Route::fixed("/api/trpc/settings.getLetsEncryptEmail");
    pub const SET_LETSENCRYPT_EMAIL: Route =
        Route::fixed("/api/trpc/settings.setLetsEncryptEmail");
    pub const GET_TRAEFIK_CUSTOM_CONFIG: Route =
        Route::fixed("/api/trpc/settings.getTraefikCustomConfig");
    pub const UPDATE_TRAEFIK_CUSTOM_CONFIG: Route =
        Route::fixed("/api/trpc/settings.updateTraefikCustomConfig");
    pub const RESTART_TRAEFIK: Route = Route::fixed("/api/trpc/settings.restartTraefik");
    pub const PRUNE_DOCKER_IMAGES: Route = Route::fixed("/api/trpc/settings.pruneDockerImages");
    pub const PRUNE_DOCKER_BUILDER: Route =
        Route::fixed("/api/trpc/settings.pruneDockerBuilder");
    pub const SET_PRUNE_DOCKER_DAILY: Route =
        Route::fixed("/api/trpc/settings.setPruneDockerDaily");
    pub const CHANGE_CREDENTIALS: Route = Route::fixed("/api/trpc/settings.changeCredentials");
}

/// `domains.*`
pub mod domains {
    use super::Route;

    pub const CREATE: Route = Route::fixed("/api/trpc/domains.createDomain");
    pub const UPDATE: Route = Route::fixed("/api/trpc/domains.updateDomain");
    pub const DELETE: Route = Route::fixed("/api/trpc/domains.deleteDomain");
    pub const LIST: Route = Route::fixed("/api/trpc/domains.listDomains");
}

/// `actions.*`
pub mod actions {
    use super::Route;

    pub const LIST: Route = Route::fixed("/api/trpc/actions.listActions");
    pub const GET: Route = Route::fixed("/api/trpc/actions.getAction");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_template_substitutes_tag() {
        let route = services::INSPECT.resolve(ServiceKind::Mysql);
        assert_eq!(route.as_str(), "/api/trpc/services.mysql.inspectService");
        assert!(!route.as_str().contains(PLACEHOLDER));
    }

    #[test]
    fn every_service_template_resolves_for_every_kind() {
        let templates = [
            services::CREATE,
            services::DEPLOY,
            services::UPDATE_SOURCE_INLINE,
            services::UPDATE_ADVANCED,
        ];
        for template in templates {
            assert_eq!(template.template().matches(PLACEHOLDER).count(), 1);
            for kind in ServiceKind::ALL {
                let route = template.resolve(kind);
                assert!(route
                    .as_str()
                    .starts_with(&format!("/api/trpc/services.{kind}.")));
                assert!(!route.as_str().contains(PLACEHOLDER));
            }
        }
    }

    #[test]
    fn license_template_substitutes_tag() {
        assert_eq!(
            license::ACTIVATE.resolve(LicenseKind::Portal).as_str(),
            "/api/trpc/portalLicense.activate"
        );
        assert_eq!(
            license::GET_PAYLOAD.resolve(LicenseKind::Lemon).as_str(),
            "/api/trpc/lemonLicense.getLicensePayload"
        );
    }

    #[test]
    fn kinds_parse_from_wire_tags_only() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.as_str().parse::<ServiceKind>().unwrap(), kind);
        }
        let err = "MySQL".parse::<ServiceKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown service kind 'MySQL'");
        assert!("box".parse::<ServiceKind>().is_err());

        assert_eq!("lemon".parse::<LicenseKind>().unwrap(), LicenseKind::Lemon);
        assert!("gumroad".parse::<LicenseKind>().is_err());
    }

    #[test]
    fn kinds_serialize_as_tags() {
        assert_eq!(
            serde_json::to_string(&ServiceKind::Postgres).unwrap(),
            r#""postgres""#
        );
        let kind: ServiceKind = serde_json::from_str(r#""compose""#).unwrap();
        assert_eq!(kind, ServiceKind::Compose);
    }
}
