//! Monitoring payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A time-series data point. The panel reports values as strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeValue {
    pub value: String,
    pub time: String,
}

/// Network I/O at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkValue {
    pub input: u64,
    pub output: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkTimeValue {
    pub value: NetworkValue,
    pub time: String,
}

/// CPU, disk, memory and network history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedStats {
    pub cpu: Vec<TimeValue>,
    pub disk: Vec<TimeValue>,
    pub memory: Vec<TimeValue>,
    pub network: Vec<NetworkTimeValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemInfo {
    pub total_mem_mb: f64,
    pub used_mem_mb: f64,
    pub free_mem_mb: f64,
    pub used_mem_percentage: f64,
    pub free_mem_percentage: f64,
}

/// Disk usage. The panel reports these figures as strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskInfo {
    pub total_gb: String,
    pub used_gb: String,
    pub free_gb: String,
    pub used_percentage: String,
    pub free_percentage: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpuInfo {
    pub used_percentage: f64,
    pub count: u32,
    pub loadavg: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkInfo {
    pub input_mb: f64,
    pub output_mb: f64,
}

/// Host-wide statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStats {
    pub uptime: f64,
    pub mem_info: MemInfo,
    pub disk_info: DiskInfo,
    pub cpu_info: CpuInfo,
    pub network: NetworkInfo,
}

/// Running versus desired replicas of a swarm service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskStatus {
    pub actual: u32,
    pub desired: u32,
}

/// Task status keyed by `<project>_<service>`.
pub type DockerTaskStats = BTreeMap<String, TaskStatus>;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerCpu {
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerMemory {
    pub usage: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerNetwork {
    #[serde(rename = "in")]
    pub rx: u64,
    #[serde(rename = "out")]
    pub tx: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerStat {
    pub cpu: ContainerCpu,
    pub memory: ContainerMemory,
    pub network: ContainerNetwork,
}

/// One row of the monitor table: a running container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerStats {
    pub id: String,
    pub stats: ContainerStat,
    pub project_name: String,
    pub service_name: String,
    pub container_name: String,
}
