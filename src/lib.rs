//! Dutch Privacy Filter - dataset preparation for Dutch text classification
//!
//! This crate prepares tabular Dutch text for model training. The
//! implementation prioritizes:
//!
//! 1. **Privacy** - Phone numbers, emails, postal codes and dates are
//!    replaced by category placeholders before anything else sees the text
//! 2. **Logging** - Every job logged with its id and outcome
//! 3. **Determinism** - Same input, same output; no hidden randomness
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `redaction` - Ordered PII rule set and the filter applying it
//! - `preprocessing` - Stopword removal and Dutch stemming
//! - `augmentation` - Class balancing via backtranslation
//! - `pipeline` - File jobs over semicolon-delimited tables
//! - `config` - Job configuration
//! - `logging` - Structured logging with job context
//!
//! ```
//! use privacy_filter::filter;
//!
//! assert_eq!(filter("mail naar jan.jansen@example.nl"), "mail naar <EMAIL>");
//! ```

pub mod augmentation;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod preprocessing;
pub mod redaction;

pub use config::JobConfig;
pub use error::{PipelineError, TranslateError};
pub use logging::init_logger;
pub use pipeline::{augment_file, filter_file, normalize_file, JobReport};
pub use preprocessing::Normalizer;
pub use redaction::{filter, PrivacyFilter, RedactionStats};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::{PyIOError, PyValueError};
    use pyo3::prelude::*;

    use crate::{JobConfig, Normalizer, PipelineError};

    fn to_py_err(e: PipelineError) -> PyErr {
        match e {
            PipelineError::Io { .. } => PyIOError::new_err(e.to_string()),
            _ => PyValueError::new_err(e.to_string()),
        }
    }

    /// Redact PII from a single text.
    #[pyfunction]
    fn filter_text(text: &str) -> String {
        crate::filter(text)
    }

    /// Redact every column except the first of a semicolon-delimited file.
    ///
    /// Returns the job report as JSON.
    #[pyfunction]
    fn filter_file(input_path: String, output_path: String) -> PyResult<String> {
        crate::init_logger();
        let config = JobConfig::new(input_path, output_path);
        crate::filter_file(&config)
            .map(|report| report.to_json())
            .map_err(to_py_err)
    }

    /// Remove stopwords and stem a single text.
    #[pyfunction]
    #[pyo3(signature = (text, keep_negations=false))]
    fn normalize_text(text: &str, keep_negations: bool) -> String {
        Normalizer::from_flag(keep_negations).normalize(text)
    }

    /// Normalize the `combined_text` column of a semicolon-delimited file.
    #[pyfunction]
    #[pyo3(signature = (input_path, output_path, keep_negations=false))]
    fn normalize_file(
        input_path: String,
        output_path: String,
        keep_negations: bool,
    ) -> PyResult<String> {
        crate::init_logger();
        let mut config = JobConfig::new(input_path, output_path);
        config.keep_negations = keep_negations;
        crate::normalize_file(&config, &Normalizer::from_flag(config.keep_negations))
            .map(|report| report.to_json())
            .map_err(to_py_err)
    }

    /// Python module definition
    #[pymodule]
    fn privacy_filter(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(filter_text, m)?)?;
        m.add_function(wrap_pyfunction!(filter_file, m)?)?;
        m.add_function(wrap_pyfunction!(normalize_text, m)?)?;
        m.add_function(wrap_pyfunction!(normalize_file, m)?)?;
        Ok(())
    }
}
