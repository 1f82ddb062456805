//! Deployment action payloads.

use serde::{Deserialize, Serialize};

/// A deployment (or other long-running) action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Action {
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: String,
    /// `"success"`, `"error"` or `"running"`.
    pub status: String,
    pub project_name: String,
    pub service_name: String,
    pub service_type: String,
    pub created_at: String,
    pub updated_at: String,
}

/// An action together with its log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionDetail {
    #[serde(flatten)]
    pub action: Action,
    pub log: String,
}

/// Selects the actions of one service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActionsParams {
    pub project_name: String,
    pub service_name: String,
}

/// Selects one action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetActionParams {
    pub action_id: String,
}
