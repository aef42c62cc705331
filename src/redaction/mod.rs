//! Redaction module.
//!
//! Provides the ordered PII rule set and the filter that applies it.

pub mod filter;
pub mod rules;

pub use filter::*;
pub use rules::{Guard, Placeholder, RedactionRule, RULES};
