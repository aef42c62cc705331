//! Text preprocessing module.
//!
//! Stopword removal and stemming applied after redaction, before training.

pub mod normalize;
pub mod stopwords;

pub use normalize::*;
