//! Configuration structures for the triage pipeline.
//!
//! This module defines all configuration data structures used at both
//! deserialization and runtime stages. It distinguishes between raw config
//! formats (from TOML) and internal representations used during execution.
//!
//! Key responsibilities:
//! - Define the TOML-deserialized structures (`MasterConfig` and sections).
//! - Represent the runtime upstream policy (`UpstreamPolicy`) and run limits.
//! - Keep a clean separation between config file format and logic-layer usage.

use serde::Deserialize;
use std::time::Duration;

/// Logging section of the master config.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Whether to also write a log file next to stdout.
    #[serde(default)]
    pub enable: bool,
    /// One of ERROR / WARN / INFO / DEBUG / TRACE (anything else → INFO).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file name, relative to the host-chosen log directory.
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "INFO".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { enable: false, level: default_log_level(), file: None }
    }
}

/// Raw TOML block for the upstream collaborator policy.
///
/// The core does not retry or time out anything itself; these values are
/// passed through to the external stage source (model / transcription calls).
#[derive(Debug, Default, Deserialize)]
pub struct UpstreamConfig {
    /// Per-call timeout as a humantime string, e.g. "30s" or "2m".
    pub timeout: Option<String>,
    /// Retry budget for transient upstream failures.
    pub max_retries: Option<u32>,
}

/// Raw TOML block bounding one pipeline run.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineConfig {
    /// Ceiling on received stage events before the run is cut off.
    pub max_turns: Option<usize>,
}

/// Top-level config as deserialized from TOML.
#[derive(Debug, Deserialize)]
pub struct MasterConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Runtime policy handed to the external stage source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamPolicy {
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for UpstreamPolicy {
    fn default() -> Self {
        UpstreamPolicy { timeout: Duration::from_secs(30), max_retries: 3 }
    }
}

/// Runtime bounds for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub max_turns: usize,
}

impl Default for RunLimits {
    fn default() -> Self {
        RunLimits { max_turns: 8 }
    }
}
