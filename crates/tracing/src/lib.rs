//! Logging for the fpath crates.
//!
//! Nothing is logged unless FPATH_LOG holds a filter, e.g. `FPATH_LOG=fpath_fs=debug`.
//! See [directive-syntax] for what a filter may contain. Logs go to stderr, or to the file
//! named by FPATH_LOGTO when that is set.
//!
//! The path buffer logs each transition to the invalid state at `debug`, and each directory
//! call it makes at `info`. Other crates in this workspace log through the re-exports below
//! instead of depending on `tracing` themselves.
//!
//! [directive-syntax]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives

/// Installs the subscriber in debug builds; does nothing in release builds.
///
/// Bind the result to a variable that lives until logging is finished, since dropping it
/// stops a file log from being flushed.
#[macro_export]
macro_rules! setup_tracing {
    () => {
        if cfg!(debug_assertions) {
            $crate::setup_tracing()
        } else {
            $crate::TracingGuards::NONE
        }
    };
}

pub use tracing::{debug, info};

use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

const FILTER_VAR: &str = "FPATH_LOG";
const LOG_FILE_VAR: &str = "FPATH_LOGTO";

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Replaced on every run.
    File(PathBuf),
}

impl LogTarget {
    pub fn from_env() -> Self {
        match std::env::var_os(LOG_FILE_VAR) {
            Some(file) if !file.is_empty() => LogTarget::File(PathBuf::from(file)),
            _ => LogTarget::Stderr,
        }
    }
}

/// Keeps a file log flushing. Must outlive all logging.
pub struct TracingGuards {
    _file_appender_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

impl TracingGuards {
    pub const NONE: TracingGuards = TracingGuards {
        _file_appender_guard: None,
    };
}

fn filter() -> EnvFilter {
    EnvFilter::from_env(FILTER_VAR)
}

/// Installs the global subscriber for [LogTarget::from_env].
///
/// Only the first call in a process installs anything; later calls (say, from every test in
/// one binary) keep that subscriber and get [TracingGuards::NONE].
#[must_use]
pub fn setup_tracing() -> TracingGuards {
    match LogTarget::from_env() {
        LogTarget::Stderr => {
            let layer = fmt::layer().with_writer(std::io::stderr).with_filter(filter());
            let _ = Registry::default().with(layer).try_init();

            TracingGuards::NONE
        }
        LogTarget::File(file) => {
            let _ = std::fs::remove_file(&file);

            let (dir, name) = match (file.parent(), file.file_name()) {
                (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => (dir, name),
                (_, Some(name)) => (std::path::Path::new("."), name),
                _ => return TracingGuards::NONE,
            };
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());

            match Registry::default().with(layer).try_init() {
                Ok(()) => TracingGuards {
                    _file_appender_guard: Some(guard),
                },
                Err(_) => TracingGuards::NONE,
            }
        }
    }
}
