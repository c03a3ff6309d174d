//! Subcommand handlers. Each returns the process exit code.

use super::commands::{ExtractArgs, RenderArgs, RunArgs};
use super::output::{OutputFormatter, RenderReport};
use crate::extractors::get_extractor_by_name;
use crate::pipeline::Pipeline;
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub async fn handle_run(args: &RunArgs) -> i32 {
    exit_code(run(args).await)
}

async fn run(args: &RunArgs) -> Result<()> {
    let pipeline = Pipeline::from_file(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let outcome = pipeline.run().await.context("Pipeline failed")?;
    info!(
        "Result saved to {} ({:.1}s)",
        outcome.output_path.display(),
        outcome.elapsed.as_secs_f64()
    );

    if args.print {
        println!("{}", outcome.content);
    }
    Ok(())
}

pub fn handle_render(args: &RenderArgs) -> i32 {
    exit_code(render(args))
}

fn render(args: &RenderArgs) -> Result<()> {
    let pipeline = Pipeline::from_file(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let params = pipeline.collect_params().context("Failed to read inputs")?;
    let prompt = pipeline
        .build_prompt(&params)
        .context("Failed to build prompt")?;

    let report = RenderReport {
        template: &pipeline.config().template,
        params: &params,
        prompt: &prompt,
    };
    let output = OutputFormatter::new(args.format.into()).format(&report)?;
    println!("{}", output);
    Ok(())
}

pub fn handle_extract(args: &ExtractArgs) -> i32 {
    exit_code(extract(args))
}

fn extract(args: &ExtractArgs) -> Result<()> {
    let extractor = get_extractor_by_name(&args.extractor, args.take_only)?;
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let result = extractor
        .extract(&text)
        .with_context(|| format!("Extraction from {} failed", args.file.display()))?;
    println!("{}", result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;
    use crate::extractors::ConcatenationMode;
    use std::path::PathBuf;

    #[test]
    fn test_extract_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answer.md");
        fs::write(&path, "START_DESC A parser. END_DESC").unwrap();

        let args = ExtractArgs {
            extractor: "description".to_string(),
            file: path,
            take_only: ConcatenationMode::First,
        };
        assert_eq!(handle_extract(&args), 0);
    }

    #[test]
    fn test_extract_unknown_extractor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answer.md");
        fs::write(&path, "text").unwrap();

        let args = ExtractArgs {
            extractor: "nonexistent".to_string(),
            file: path,
            take_only: ConcatenationMode::Join,
        };
        assert_eq!(handle_extract(&args), 1);
    }

    #[test]
    fn test_extract_empty_first_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answer.md");
        fs::write(&path, "no fences").unwrap();

        let args = ExtractArgs {
            extractor: "python_code".to_string(),
            file: path,
            take_only: ConcatenationMode::First,
        };
        assert_eq!(handle_extract(&args), 1);
    }

    #[test]
    fn test_render_missing_config() {
        let args = RenderArgs {
            config: PathBuf::from("/nonexistent/conf.yaml"),
            format: OutputFormatArg::Human,
        };
        assert_eq!(handle_render(&args), 1);
    }

    #[tokio::test]
    async fn test_run_missing_config() {
        let args = RunArgs {
            config: PathBuf::from("/nonexistent/conf.yaml"),
            print: false,
        };
        assert_eq!(handle_run(&args).await, 1);
    }
}
