//! Job configuration.
//!
//! Only the input and output paths are required; everything else falls
//! back to the column names used by the dataset scripts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PipelineError, Result};

fn default_delimiter() -> char {
    ';'
}

fn default_text_column() -> String {
    "combined_text".to_string()
}

fn default_label_column() -> String {
    "Issue Type".to_string()
}

fn default_split_column() -> String {
    "split".to_string()
}

fn default_augment_flag_column() -> String {
    "is_augmented".to_string()
}

fn default_test_fraction() -> f64 {
    0.2
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Single-byte field delimiter, used for both reading and writing.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_text_column")]
    pub text_column: String,
    #[serde(default = "default_label_column")]
    pub label_column: String,
    #[serde(default = "default_split_column")]
    pub split_column: String,
    #[serde(default = "default_augment_flag_column")]
    pub augment_flag_column: String,
    #[serde(default)]
    pub keep_negations: bool,
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
}

impl JobConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            delimiter: default_delimiter(),
            text_column: default_text_column(),
            label_column: default_label_column(),
            split_column: default_split_column(),
            augment_flag_column: default_augment_flag_column(),
            keep_negations: false,
            test_fraction: default_test_fraction(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Self::from_json_str(&raw)
    }

    /// Delimiter as the byte the table reader expects.
    ///
    /// Multi-byte characters cannot delimit fields; they fall back to `;`.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            log::warn!(
                "CONFIG_DELIMITER_UNSUPPORTED delimiter={:?} fallback=';'",
                self.delimiter
            );
            b';'
        }
    }
}
