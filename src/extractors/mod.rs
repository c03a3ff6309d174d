// Text extraction strategies
//
// Extractors pull zero or more elements out of raw text (source files or
// model responses) and combine them into a single string according to a
// concatenation mode. Strategies are looked up by name from a fixed table.

pub mod between_tokens;
pub mod class_snippet;
pub mod error;
pub mod mode;
pub mod registry;

pub use between_tokens::BetweenTokens;
pub use class_snippet::ClassSnippet;
pub use error::ExtractionError;
pub use mode::ConcatenationMode;
pub use registry::{get_extractor_by_name, Extractor, ExtractorKind, Strategy};
