// src/config/loader.rs

//! # Configuration Loader
//!
//! Reads the master TOML file, deserializes into `MasterConfig`, and converts
//! the raw upstream/pipeline sections into their runtime forms.

use crate::config::types::{
    MasterConfig, PipelineConfig, RunLimits, UpstreamConfig, UpstreamPolicy,
};
use crate::guardian_log;
use log::Level;
use std::{fs, path::Path};

/// Load and parse the master configuration from `path`.
/// Logs at DEBUG before reading and INFO on success.
pub fn load_master_config(path: &Path) -> Result<MasterConfig, Box<dyn std::error::Error>> {
    guardian_log!(Level::Debug, "config", "Reading config from {:?}", path);
    let txt = fs::read_to_string(path)?;
    let cfg: MasterConfig = toml::from_str(&txt)?;
    guardian_log!(Level::Info, "config", "Loaded config from {:?}", path);
    Ok(cfg)
}

/// Convert the raw `[upstream]` block into a runtime `UpstreamPolicy`.
/// Missing fields fall back to the defaults (30s, 3 retries).
pub fn convert_upstream_policy(
    cfg: &UpstreamConfig,
) -> Result<UpstreamPolicy, humantime::DurationError> {
    let defaults = UpstreamPolicy::default();
    let timeout = match cfg.timeout.as_deref() {
        Some(txt) => humantime::parse_duration(txt)?,
        None => defaults.timeout,
    };
    let policy = UpstreamPolicy {
        timeout,
        max_retries: cfg.max_retries.unwrap_or(defaults.max_retries),
    };
    guardian_log!(
        Level::Debug,
        "config",
        "Upstream policy: timeout={:?}, max_retries={}",
        policy.timeout,
        policy.max_retries
    );
    Ok(policy)
}

/// Convert the raw `[pipeline]` block into runtime `RunLimits`.
pub fn convert_run_limits(cfg: &PipelineConfig) -> RunLimits {
    RunLimits { max_turns: cfg.max_turns.unwrap_or(RunLimits::default().max_turns) }
}
