pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ExtractArgs, OutputFormatArg, RenderArgs, RunArgs};
pub use output::{OutputFormat, OutputFormatter, RenderReport};
