//! Formatting of rendered prompts for the `render` command

use crate::prompting::{Params, Prompt};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    /// The prompt exactly as a single-message backend would receive it
    Human,
}

/// What `render` reports: the parameters that went in and the prompt that
/// came out
#[derive(Debug, Serialize)]
pub struct RenderReport<'a> {
    pub template: &'a Path,
    pub params: &'a Params,
    pub prompt: &'a Prompt,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &RenderReport<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize prompt to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize prompt to YAML")
            }
            OutputFormat::Human => Ok(report.prompt.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Params, Prompt) {
        let mut params = Params::new();
        params.insert("name".to_string(), "Ada".to_string());
        let prompt = Prompt::new("Hello, Ada!").with_system("Be kind.");
        (params, prompt)
    }

    #[test]
    fn test_human_is_display() {
        let (params, prompt) = fixture();
        let report = RenderReport {
            template: Path::new("t.txt"),
            params: &params,
            prompt: &prompt,
        };
        let out = OutputFormatter::new(OutputFormat::Human).format(&report).unwrap();
        assert_eq!(out, "INSTRUCTION:\n\nBe kind.\nHello, Ada!");
    }

    #[test]
    fn test_json() {
        let (params, prompt) = fixture();
        let report = RenderReport {
            template: Path::new("t.txt"),
            params: &params,
            prompt: &prompt,
        };
        let out = OutputFormatter::new(OutputFormat::Json).format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["template"], "t.txt");
        assert_eq!(value["params"]["name"], "Ada");
        assert_eq!(value["prompt"]["content"], "Hello, Ada!");
        assert_eq!(value["prompt"]["system"], "Be kind.");
    }

    #[test]
    fn test_yaml() {
        let (params, prompt) = fixture();
        let report = RenderReport {
            template: Path::new("t.txt"),
            params: &params,
            prompt: &prompt,
        };
        let out = OutputFormatter::new(OutputFormat::Yaml).format(&report).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(value["prompt"]["content"].as_str(), Some("Hello, Ada!"));
    }
}
