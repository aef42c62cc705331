//! Job context management.
//!
//! Provides job and row context for logging and reporting.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::logging::structured::LogContext;
use crate::redaction::RedactionStats;

/// Context for one file job.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub job_id: String,
    pub kind: &'static str,
    pub started_at: DateTime<Utc>,
}

impl JobContext {
    pub fn new(kind: &'static str) -> Self {
        let job_id = format!("job-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            job_id,
            kind,
            started_at: Utc::now(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.job_id)
    }

    /// Create a log context for a data row (1-based, header excluded).
    pub fn row_context(&self, row: usize) -> LogContext {
        self.log_context().with_row(row)
    }

    /// Close the job, producing its report.
    pub fn finish(&self, rows_read: usize, rows_written: usize, cells_changed: usize) -> JobReport {
        JobReport {
            job_id: self.job_id.clone(),
            kind: self.kind.to_string(),
            rows_read,
            rows_written,
            cells_changed,
            redactions: None,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}

/// Summary of a completed file job.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub job_id: String,
    pub kind: String,
    pub rows_read: usize,
    pub rows_written: usize,
    pub cells_changed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redactions: Option<RedactionStats>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl JobReport {
    pub fn with_redactions(mut self, stats: RedactionStats) -> Self {
        self.redactions = Some(stats);
        self
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
