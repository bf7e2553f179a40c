use serde::{Deserialize, Serialize};

/// Service identity metadata from `/about`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub version: String,
    pub homepage: String,
    pub source_code: String,
    pub maintainer: String,
}

/// Service limits and maintenance flags from `/config_info`.
///
/// The hosted and self-hosted flavors of the service expose different
/// subsets of these, so every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub maintenance_mode: Option<bool>,
    #[serde(default)]
    pub enable_wait_result: Option<bool>,
    #[serde(default)]
    pub enable_compiler_options: Option<bool>,
    #[serde(default)]
    pub enable_network: Option<bool>,
    #[serde(default)]
    pub enable_batched_submissions: Option<bool>,
    #[serde(default)]
    pub max_submission_batch_size: Option<u32>,
    #[serde(default)]
    pub cpu_time_limit: Option<f64>,
    #[serde(default)]
    pub max_cpu_time_limit: Option<f64>,
    #[serde(default)]
    pub cpu_extra_time: Option<f64>,
    #[serde(default)]
    pub max_cpu_extra_time: Option<f64>,
    #[serde(default)]
    pub wall_time_limit: Option<f64>,
    #[serde(default)]
    pub max_wall_time_limit: Option<f64>,
    #[serde(default)]
    pub memory_limit: Option<i64>,
    #[serde(default)]
    pub max_memory_limit: Option<i64>,
    #[serde(default)]
    pub stack_limit: Option<i64>,
    #[serde(default)]
    pub max_stack_limit: Option<i64>,
    #[serde(default)]
    pub max_queue_size: Option<u32>,
    #[serde(default)]
    pub number_of_runs: Option<u32>,
    #[serde(default)]
    pub max_number_of_runs: Option<u32>,
}
