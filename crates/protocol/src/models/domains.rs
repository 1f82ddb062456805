//! Domain payloads.

use serde::{Deserialize, Serialize};

/// The service a domain routes to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceDestination {
    pub protocol: String,
    pub port: u32,
    pub path: String,
    pub project_name: String,
    pub service_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub compose_service: String,
}

/// A domain. Also the payload of create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Domain {
    pub id: String,
    pub https: bool,
    pub host: String,
    pub path: String,
    pub middlewares: Vec<String>,
    pub certificate_resolver: String,
    pub wildcard: bool,
    pub destination_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_destination: Option<ServiceDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteDomainParams {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDomainsParams {
    pub project_name: String,
    pub service_name: String,
}
