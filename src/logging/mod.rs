//! Structured logging with job context.
//!
//! Provides logging macros and utilities that include job_id and row
//! number in every log message for easy correlation.

pub mod structured;

pub use structured::*;
