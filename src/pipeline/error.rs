use crate::config::ConfigError;
use crate::extractors::ExtractionError;
use crate::llm::{BackendError, UnsuccessfulRequest};
use crate::prompting::PromptError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of one pipeline stage, passed through unchanged
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Request(#[from] UnsuccessfulRequest),

    /// The backend could not be constructed
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
