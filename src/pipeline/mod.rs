//! Pipeline orchestration module.
//!
//! File jobs that coordinate:
//! - Table reading and atomic writing
//! - PII redaction
//! - Normalization
//! - Class-balancing augmentation

pub mod context;
pub mod jobs;
pub mod table;

pub use context::*;
pub use jobs::*;
pub use table::Table;
