use super::mode::ConcatenationMode;
use thiserror::Error;

/// Errors raised while resolving or running an extractor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// No extractor is registered under the requested name
    #[error("Extractor with name '{0}' not found")]
    NotFound(String),

    /// `first` or `last` was requested but nothing matched
    #[error("Extractor '{extractor}' found no elements to take ({mode})")]
    EmptyResult {
        extractor: String,
        mode: ConcatenationMode,
    },

    /// The input is not valid source code for the extractor's language
    #[error("Failed to parse source: {0}")]
    Parse(String),
}
