//! Stopword removal and Dutch stemming.

use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};

use super::stopwords::{DATASET_STOPWORDS, DUTCH_STOPWORDS, NEGATIONS};

/// Drops stopwords and reduces the remaining tokens to their stems.
pub struct Normalizer {
    stemmer: Stemmer,
    stopwords: HashSet<&'static str>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Normalizer that also drops the negations `niet` and `geen`.
    pub fn new() -> Self {
        let stopwords = DUTCH_STOPWORDS
            .iter()
            .chain(DATASET_STOPWORDS)
            .chain(NEGATIONS)
            .copied()
            .collect();
        Self {
            stemmer: Stemmer::create(Algorithm::Dutch),
            stopwords,
        }
    }

    /// Normalizer that keeps `niet` and `geen`.
    pub fn with_negations() -> Self {
        let mut normalizer = Self::new();
        for negation in NEGATIONS {
            normalizer.stopwords.remove(negation);
        }
        normalizer
    }

    pub fn from_flag(keep_negations: bool) -> Self {
        if keep_negations {
            Self::with_negations()
        } else {
            Self::new()
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token.to_lowercase().as_str())
    }

    /// Normalize whitespace-separated text.
    ///
    /// Tokens are compared against the stopword set case-insensitively,
    /// lowercased and stemmed, and re-joined with single spaces.
    pub fn normalize(&self, text: &str) -> String {
        text.split_whitespace()
            .filter_map(|token| {
                let lower = token.to_lowercase();
                if self.stopwords.contains(lower.as_str()) {
                    None
                } else {
                    Some(self.stemmer.stem(&lower).into_owned())
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
