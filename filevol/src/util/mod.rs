mod process;

pub use process::ToolCommand;

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::errors::{FilevolError, FilevolResult};

/// Build the log filter: `RUST_LOG` wins, otherwise `debug` or `warn`.
pub fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Install the global subscriber.
///
/// Logs go to stderr, and additionally to `log_file` when one is given.
/// The returned guard flushes the file writer and must be held until exit.
pub fn init_tracing(debug: bool, log_file: Option<&Path>) -> FilevolResult<Option<WorkerGuard>> {
    let Some(log_file) = log_file else {
        let _ = tracing_subscriber::fmt()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(debug))
            .try_init();
        return Ok(None);
    };

    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file.file_name().ok_or_else(|| {
        FilevolError::Config(format!("Invalid log file path: {}", log_file.display()))
    })?;

    std::fs::create_dir_all(dir).map_err(|e| {
        FilevolError::Storage(format!(
            "Failed to create log directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    register_to_tracing(non_blocking, env_filter(debug));
    Ok(Some(guard))
}

pub fn register_to_tracing(non_blocking: NonBlocking, env_filter: EnvFilter) {
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(false),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}
