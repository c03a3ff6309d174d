use crate::extractors::ConcatenationMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fill a prompt template from extracted file contents, query an LLM and
/// save the extracted answer
#[derive(Parser, Debug)]
#[command(
    name = "promptpipe",
    about = "Template-driven LLM prompt pipeline",
    version,
    author,
    long_about = "promptpipe reads input files, extracts the relevant parts (class \
                  definitions, fenced code, marked descriptions), fills a prompt template, \
                  sends it to an LLM backend (OpenAI, Anthropic, Gemini, Groq, xAI, Cohere, \
                  Ollama) and writes the extracted answer to a file."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the full pipeline described by a configuration file",
        long_about = "Reads the inputs, fills the template, queries the configured backend, \
                      extracts the answer and writes it to the output file.\n\n\
                      Examples:\n  \
                      promptpipe run conf.yaml\n  \
                      promptpipe run conf.yaml --print"
    )]
    Run(RunArgs),

    #[command(
        about = "Print the prompt a configuration would send",
        long_about = "Performs every step up to the backend request and prints the prompt.\n\n\
                      Examples:\n  \
                      promptpipe render conf.yaml\n  \
                      promptpipe render conf.yaml --format json"
    )]
    Render(RenderArgs),

    #[command(
        about = "Run one extractor over a file",
        long_about = "Applies a registered extractor (default, class, description, \
                      python_code) to a file and prints the result.\n\n\
                      Examples:\n  \
                      promptpipe extract class model.py\n  \
                      promptpipe extract python_code answer.md --take-only last"
    )]
    Extract(ExtractArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(value_name = "CONFIG", help = "Pipeline configuration (YAML)")]
    pub config: PathBuf,

    #[arg(long, help = "Also print the processed response to stdout")]
    pub print: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(value_name = "CONFIG", help = "Pipeline configuration (YAML)")]
    pub config: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(value_name = "EXTRACTOR", help = "Registered extractor name")]
    pub extractor: String,

    #[arg(value_name = "FILE", help = "File to extract from")]
    pub file: PathBuf,

    #[arg(
        short = 't',
        long,
        value_name = "MODE",
        default_value = "join",
        value_parser = parse_mode,
        help = "How to combine matches: join, first or last"
    )]
    pub take_only: ConcatenationMode,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_mode(s: &str) -> Result<ConcatenationMode, String> {
    s.parse()
}
