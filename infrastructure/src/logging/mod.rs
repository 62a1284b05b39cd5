//! Diagnostic logging setup.
//!
//! Logs never go to stdout, which carries command output. They are written
//! to stderr, or to a file through a non-blocking appender when
//! `[logging] file` is configured.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

/// `RUST_LOG` when set, otherwise the level chosen by `-v`.
fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file appender on drop and must be kept
/// alive for the whole run. A second call is a no-op.
pub fn init_logging(verbosity: u8, file: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let filter = build_filter(verbosity);

    let Some(path) = file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .try_init();
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(log_file);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();

    Ok(Some(guard))
}
