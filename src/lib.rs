//! promptpipe - configuration-driven LLM prompt pipeline
//!
//! A run reads named input files, narrows each one down with an extractor,
//! fills a prompt template with the results, sends the prompt to an LLM
//! backend and writes the extracted part of the answer to a file.
//!
//! # Example
//!
//! ```ignore
//! use promptpipe::Pipeline;
//! use std::path::Path;
//!
//! async fn refactor() -> Result<(), promptpipe::PipelineError> {
//!     let pipeline = Pipeline::from_file(Path::new("conf.yaml"))?;
//!     let outcome = pipeline.run().await?;
//!     println!("wrote {}", outcome.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`extractors`]: named extraction strategies and concatenation modes
//! - [`prompting`]: templates, parameter checking and prompts
//! - [`llm`]: the backend trait, the genai backend and the backend table
//! - [`pipeline`]: the end-to-end run
//! - [`config`]: YAML configuration with interpolation and validation

pub mod cli;
pub mod config;
pub mod extractors;
pub mod llm;
pub mod pipeline;
pub mod prompting;
pub mod util;

pub use config::{ConfigError, PipelineConfig};
pub use extractors::{get_extractor_by_name, ConcatenationMode, ExtractionError, Extractor};
pub use llm::{
    select_backend, BackendError, GenAIClient, LLMClient, MockLLMClient, MockResponse,
    UnsuccessfulRequest,
};
pub use pipeline::{Pipeline, PipelineError, RunOutcome};
pub use prompting::{Params, Prompt, PromptError, Prompter};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
