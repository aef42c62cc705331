//! Structured logging utilities.
//!
//! Provides context-aware logging with job_id and row number included
//! in every log message.

use std::fmt;

/// Logging context for a file job.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub job_id: String,
    pub row: Option<usize>,
}

impl LogContext {
    pub fn new(job_id: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            row: None,
        }
    }

    pub fn with_row(&self, row: usize) -> Self {
        Self {
            job_id: self.job_id.clone(),
            row: Some(row),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "[job={}] [row={}]", self.job_id, row),
            None => write!(f, "[job={}]", self.job_id),
        }
    }
}

/// Initialize the process-wide logger.
///
/// Safe to call repeatedly; only the first call installs the backend.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}
