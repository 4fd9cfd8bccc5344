//! Structured logging for the agent.
//!
//! Every line reads `[ts][LEVEL][target][pid=..][tid=..] msg`. The caller
//! chains the console sink and applies the dispatch.

use crate::config::model::LoggingConfig;
use chrono::Local;
use fern::Dispatch;
use std::{path::Path, process, thread};

/// Formatter, level and optional log file as requested in `[logging]`.
/// A relative `file` lives next to `exe_dir`.
pub fn dispatch(exe_dir: &Path, logging: &LoggingConfig) -> Result<Dispatch, fern::InitError> {
    let log_path = logging
        .enable
        .then(|| exe_dir.join(logging.file.as_deref().unwrap_or("echo-agent.log")));

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
        .level(logging.level_filter());

    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }
    Ok(dispatch)
}
