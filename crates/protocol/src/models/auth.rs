//! Authentication payloads.

use serde::{Deserialize, Serialize};

/// The user the API token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub created_at: String,
    pub email: String,
    pub admin: bool,
}
