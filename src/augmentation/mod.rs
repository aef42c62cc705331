//! Class-balancing augmentation module.
//!
//! Tops up minority classes with backtranslated paraphrases:
//! - Balance planning against the median class size
//! - Round-trip translation through a pluggable [`Translator`]

pub mod balance;
pub mod translate;

pub use balance::*;
pub use translate::*;
