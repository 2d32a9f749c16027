// src/logging.rs

use crate::{config::Config, errors::AssistantResult, models::ApiCallLog};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::fs;

/// Starts file logging. The terminal belongs to the UI, so nothing is
/// written to stderr. `RUST_LOG` overrides the configured level.
///
/// The returned handle must be kept alive for the lifetime of the program.
pub fn init_logging(config: &Config) -> AssistantResult<LoggerHandle> {
    let dir = config.log_dir()?;
    fs::create_dir_all(&dir)?;

    let handle = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(&dir)
                .basename("devops-assistant")
                .suppress_timestamp(),
        )
        .append()
        .format(flexi_logger::detailed_format)
        .start()?;

    log::info!("logging to {}", dir.display());
    Ok(handle)
}

/// Logs an API call on the `api` target.
pub fn log_api_call(log: &ApiCallLog) {
    log::info!(
        target: "api",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );
}
