use super::error::PipelineError;
use crate::config::PipelineConfig;
use crate::llm::{select_backend, LLMClient};
use crate::prompting::{Params, Prompt, Prompter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    /// Processed response, as written to `output_path`
    pub content: String,
    pub raw_response: String,
    pub elapsed: Duration,
}

/// Runs one configuration end to end: inputs, prompt, request, output
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let config = PipelineConfig::load(path)?;
        debug!("Loaded configuration:\n{}", config);
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reads every input and applies its extractor
    pub fn collect_params(&self) -> Result<Params, PipelineError> {
        let mut params = Params::new();

        for input in &self.config.inp {
            let text = read_file(&input.file)?;
            let extractor = input.extractor()?;
            let value = extractor.extract(&text)?;

            debug!(
                input = %input.name,
                extractor = extractor.name(),
                "Read {} ({} chars extracted)",
                input.file.display(),
                value.len()
            );
            params.insert(input.name.clone(), value);
        }

        Ok(params)
    }

    pub fn prompter(&self) -> Result<Prompter, PipelineError> {
        Prompter::from_file(&self.config.template)
            .map_err(|e| PipelineError::io(&self.config.template, e))
    }

    /// Fills the template and attaches the configured system instruction
    pub fn build_prompt(&self, params: &Params) -> Result<Prompt, PipelineError> {
        let prompt = self.prompter()?.prompt(params)?;

        Ok(match &self.config.api.system {
            Some(system) => prompt.with_system(system.clone()),
            None => prompt,
        })
    }

    /// Stages up to the request: inputs and prompt
    pub fn render(&self) -> Result<Prompt, PipelineError> {
        info!("Reading {} inputs", self.config.inp.len());
        let params = self.collect_params()?;
        self.build_prompt(&params)
    }

    /// Applies the response extractor to the raw response
    pub fn process_response(&self, response: &str) -> Result<String, PipelineError> {
        let extractor = self.config.api.response_extractor()?;
        Ok(extractor.extract(response)?)
    }

    /// Runs with the backend named in the configuration. The backend is
    /// built only once the prompt exists.
    pub async fn run(&self) -> Result<RunOutcome, PipelineError> {
        let start = Instant::now();
        let prompt = self.render()?;

        let api = &self.config.api;
        let client = select_backend(&api.backend, &api.backend_settings())?;
        self.complete(start, &prompt, client.as_ref()).await
    }

    pub async fn run_with_client(
        &self,
        client: &dyn LLMClient,
    ) -> Result<RunOutcome, PipelineError> {
        let start = Instant::now();
        let prompt = self.render()?;
        self.complete(start, &prompt, client).await
    }

    async fn complete(
        &self,
        start: Instant,
        prompt: &Prompt,
        client: &dyn LLMClient,
    ) -> Result<RunOutcome, PipelineError> {
        debug!("Prompt:\n{}", prompt);

        info!("Querying {}", client.name());
        let raw_response = client.query(prompt).await?;
        debug!("Response:\n{}", raw_response);

        let content = self.process_response(&raw_response)?;
        let output_path = self.config.out.file.clone();
        write_output(&output_path, &content)?;

        let elapsed = start.elapsed();
        info!(
            "Wrote {} chars to {} in {:?}",
            content.len(),
            output_path.display(),
            elapsed
        );

        Ok(RunOutcome {
            output_path,
            content,
            raw_response,
            elapsed,
        })
    }
}

fn read_file(path: &Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))
}

fn write_output(path: &Path, content: &str) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| PipelineError::io(path, e))
}
