pub mod error;
pub mod orchestrator;

pub use error::PipelineError;
pub use orchestrator::{Pipeline, RunOutcome};
