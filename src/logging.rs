// src/logging.rs

//! Global logging bootstrap.
//!
//! Builds a `fern::Dispatch` from the `[logging]` config section: structured
//! line format, stdout chain, and an optional file chain when file logging is
//! enabled. The host orchestrator calls this once at startup.

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;
use std::{path::Path, process, thread};

use crate::config::types::LoggingConfig;

/// Configure global logging as requested in the `[logging]` section.
/// `log_dir` is where the optional log file is created.
pub fn init_logging(cfg: &LoggingConfig, log_dir: &Path) -> Result<(), fern::InitError> {
    let level = match cfg.level.to_uppercase().as_str() {
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let log_path = cfg
        .enable
        .then(|| log_dir.join(cfg.file.as_deref().unwrap_or("guardian.log")));

    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}][pid={}][tid={:?}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(), // Only print the target (module path)
                process::id(),
                thread::current().id(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
