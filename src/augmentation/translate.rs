//! Round-trip translation.
//!
//! No translation model ships with this crate; callers plug one in through
//! [`Translator`].

use crate::error::TranslateError;
use crate::logging::structured::LogContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Dutch,
    English,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Dutch => "nl",
            Lang::English => "en",
        }
    }
}

pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, from: Lang, to: Lang) -> Result<String, TranslateError>;
}

/// Dutch -> English -> Dutch paraphrase of `text`.
///
/// Never fails: if either leg errors, the original text is returned.
pub fn backtranslate(translator: &dyn Translator, text: &str, ctx: &LogContext) -> String {
    let round_trip = translator
        .translate(text, Lang::Dutch, Lang::English)
        .and_then(|english| translator.translate(&english, Lang::English, Lang::Dutch));

    match round_trip {
        Ok(paraphrase) => paraphrase,
        Err(e) => {
            crate::log_warn!(ctx, "BACKTRANSLATE_FAILED", error = e.to_string());
            text.to_string()
        }
    }
}
