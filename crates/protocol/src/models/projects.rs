//! Project payloads.

use serde::{Deserialize, Serialize};

use super::services::Service;

/// Names a project to create or destroy: `{"name": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,
}

impl ProjectSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Selects a project to inspect: `{"projectName": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    pub project_name: String,
}

impl ProjectQuery {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
        }
    }
}

/// Basic project information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInfo {
    pub name: String,
    pub created_at: String,
}

/// A project together with its services.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInspect {
    pub project: ProjectInfo,
    pub services: Vec<Service>,
}

/// Every project and every service on the panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsWithServices {
    pub projects: Vec<ProjectInfo>,
    pub services: Vec<Service>,
}
