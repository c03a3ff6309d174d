use promptpipe::cli::commands::{CliArgs, Commands};
use promptpipe::cli::handlers::{handle_extract, handle_render, handle_run};
use promptpipe::util::{init_logging, LoggingConfig};
use promptpipe::VERSION;

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_cli(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("promptpipe v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Run(run_args) => handle_run(run_args).await,
        Commands::Render(render_args) => handle_render(render_args),
        Commands::Extract(extract_args) => handle_extract(extract_args),
    };

    std::process::exit(exit_code);
}
