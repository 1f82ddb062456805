//! Command line definitions.

use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use easypanel::{EndpointConfig, ServiceKind};

/// panelctl - talk to an Easypanel instance from the command line
#[derive(Parser, Debug)]
#[command(name = "panelctl", version, about = "Command line client for Easypanel")]
pub struct Cli {
    #[command(flatten)]
    pub connection: Connection,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the panel is and how to authenticate.
#[derive(Args, Debug)]
pub struct Connection {
    /// Base URL of the panel, e.g. https://panel.example.com
    #[arg(long, env = "EASYPANEL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// API token
    #[arg(long, env = "EASYPANEL_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Per-attempt socket timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Overall deadline per call in seconds, covering the retry
    #[arg(long, global = true)]
    pub deadline: Option<u64>,
}

impl Connection {
    /// Validates the flags into an [`EndpointConfig`].
    pub fn config(&self) -> anyhow::Result<EndpointConfig> {
        let endpoint = self
            .endpoint
            .clone()
            .context("no endpoint: pass --endpoint or set EASYPANEL_ENDPOINT")?;
        let token = self
            .token
            .clone()
            .context("no token: pass --token or set EASYPANEL_TOKEN")?;

        let mut config = EndpointConfig::new(endpoint, token)?
            .with_timeout(Duration::from_secs(self.timeout))?;
        if let Some(secs) = self.deadline {
            config = config.with_deadline(Duration::from_secs(secs))?;
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the user the token belongs to
    User,

    /// Project operations
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Service operations
    Services {
        #[command(subcommand)]
        action: ServicesAction,
    },

    /// Show host CPU, memory, disk and network figures
    Stats,

    /// Follow the live logs of a service until Ctrl-C
    Logs {
        #[command(flatten)]
        target: ServiceTarget,

        /// Deploy token of the service; looked up with an inspect call if absent
        #[arg(long = "deploy-token")]
        deploy_token: Option<String>,

        /// The service is a compose stack
        #[arg(long)]
        compose: bool,
    },
}

impl Command {
    /// Whether the command runs until interrupted and handles the
    /// interruption itself.
    pub fn is_streaming(&self) -> bool {
        matches!(self, Command::Logs { .. })
    }
}

#[derive(Subcommand, Debug)]
pub enum ProjectsAction {
    /// List every project
    List,

    /// Show a project and its services
    Inspect {
        /// Project name
        project: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ServicesAction {
    /// Show the full state of a service
    Inspect {
        #[command(flatten)]
        target: ServiceTarget,
    },

    /// Trigger a deployment
    Deploy {
        #[command(flatten)]
        target: ServiceTarget,
    },

    /// Restart the running containers
    Restart {
        #[command(flatten)]
        target: ServiceTarget,
    },
}

/// A service addressed by project, name and type.
#[derive(Args, Debug, Clone)]
pub struct ServiceTarget {
    /// Project name
    pub project: String,

    /// Service name
    pub service: String,

    /// Service type: app, mysql, mariadb, postgres, mongo, redis or compose
    #[arg(short, long, default_value = "app")]
    pub kind: ServiceKind,
}
