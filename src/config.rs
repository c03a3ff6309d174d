//! Pipeline configuration
//!
//! A run is described by one YAML document:
//!
//! ```yaml
//! inp:
//!   - name: code
//!     file: ${root_dir}/model.py
//!     extractor: { name: class, take_only: first }
//!   - name: notes
//!     file: notes.txt
//! template: ${root_dir}/template.txt
//! api:
//!   type: openai
//!   model: gpt-4o-mini
//!   key: ${env:OPENAI_API_KEY}
//!   extractor: { name: python_code, take_only: last }
//! out:
//!   file: ${root_dir}/out/result.py
//! ```
//!
//! # Interpolation
//!
//! String values may reference:
//! - `${root_dir}`: absolute directory containing the configuration file
//! - `${env:NAME}` (or `${oc.env:NAME}`): the environment variable `NAME`
//!
//! # Optional API settings
//!
//! - `system`: system instruction attached to the prompt
//! - `temperature`: sampling temperature (0.0 - 2.0)
//! - `timeout_secs`: request timeout, default 60, at most 600
//! - `base_url`: endpoint override
//! - `system_role`: send `system` as its own message (default `true`); when
//!   `false` it is folded into the user message
//!
//! Relative paths are used as written, i.e. relative to the working
//! directory; use `${root_dir}` to anchor them to the configuration file.

use crate::extractors::{get_extractor_by_name, ConcatenationMode, ExtractionError, Extractor};
use crate::llm::{
    is_known_backend, BackendError, BackendSettings, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;
const MAX_TEMPERATURE: f32 = 2.0;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not match the schema
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A `${...}` reference could not be resolved
    #[error("Cannot interpolate '{expression}': {reason}")]
    Interpolation { expression: String, reason: String },

    /// An extractor name does not resolve
    #[error("Invalid extractor for {context}: {source}")]
    Extractor {
        context: String,
        #[source]
        source: ExtractionError,
    },

    /// The API type does not name a registered backend
    #[error("Invalid API type: {0}")]
    Backend(#[source] BackendError),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Names a registered extractor and how to combine its elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorSpec {
    /// Registered extractor; absent means the text is used as-is
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub take_only: ConcatenationMode,
}

impl ExtractorSpec {
    pub fn named(name: impl Into<String>, take_only: ConcatenationMode) -> Self {
        Self {
            name: Some(name.into()),
            take_only,
        }
    }

    pub fn build(&self) -> Result<Extractor, ExtractionError> {
        match &self.name {
            Some(name) => get_extractor_by_name(name, self.take_only),
            None => Ok(Extractor::identity()),
        }
    }
}

/// One named input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub name: String,
    pub file: PathBuf,
    #[serde(default)]
    pub extractor: Option<ExtractorSpec>,
}

impl InputSpec {
    /// The input's extractor, or identity extraction when none is declared
    pub fn extractor(&self) -> Result<Extractor, ExtractionError> {
        match &self.extractor {
            Some(spec) => spec.build(),
            None => Ok(Extractor::identity()),
        }
    }
}

/// Backend selection and response handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSpec {
    /// Registered backend name (`openai`, `anthropic`, ...)
    #[serde(rename = "type")]
    pub backend: String,
    pub model: String,
    #[serde(default)]
    pub key: Option<String>,
    /// Applied to the raw response
    #[serde(default)]
    pub extractor: Option<ExtractorSpec>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_system_role")]
    pub system_role: bool,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_system_role() -> bool {
    true
}

impl ApiSpec {
    pub fn response_extractor(&self) -> Result<Extractor, ExtractionError> {
        match &self.extractor {
            Some(spec) => spec.build(),
            None => Ok(Extractor::identity()),
        }
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            model: self.model.clone(),
            key: self.key.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
            system_role: self.system_role,
        }
    }
}

/// Where the processed response is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub file: PathBuf,
}

/// Main configuration structure for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub inp: Vec<InputSpec>,
    pub template: PathBuf,
    pub api: ApiSpec,
    pub out: OutputSpec,
    /// Directory of the configuration file, used for `${root_dir}`
    #[serde(skip)]
    pub root_dir: PathBuf,
}

impl PipelineConfig {
    /// Reads, interpolates and validates a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&raw, &config_dir(path))
    }

    /// Parses a configuration document whose `${root_dir}` is `root_dir`
    pub fn from_yaml_str(yaml: &str, root_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.root_dir = root_dir.to_path_buf();
        config.interpolate()?;
        config.validate()?;
        Ok(config)
    }

    fn interpolate(&mut self) -> Result<(), ConfigError> {
        let root = self.root_dir.clone();

        for input in &mut self.inp {
            input.file = interpolate_path(&input.file, &root)?;
        }
        self.template = interpolate_path(&self.template, &root)?;
        self.out.file = interpolate_path(&self.out.file, &root)?;

        self.api.model = interpolate_str(&self.api.model, &root)?;
        for value in [
            &mut self.api.key,
            &mut self.api.base_url,
            &mut self.api.system,
        ]
        .into_iter()
        .flatten()
        {
            *value = interpolate_str(value, &root)?;
        }

        Ok(())
    }

    /// Validates the configuration
    ///
    /// Checks that:
    /// - Input names are non-empty and unique
    /// - Every extractor name resolves
    /// - The API type names a registered backend and a model is given
    /// - Timeout and temperature are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for input in &self.inp {
            if input.name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "Input reading {} has an empty name",
                    input.file.display()
                )));
            }
            if !seen.insert(input.name.as_str()) {
                return Err(ConfigError::ValidationFailed(format!(
                    "Duplicate input name: {}",
                    input.name
                )));
            }
            input.extractor().map_err(|source| ConfigError::Extractor {
                context: format!("input '{}'", input.name),
                source,
            })?;
        }

        self.api
            .response_extractor()
            .map_err(|source| ConfigError::Extractor {
                context: "api response".to_string(),
                source,
            })?;

        if !is_known_backend(&self.api.backend) {
            return Err(ConfigError::Backend(BackendError::UnknownBackend {
                name: self.api.backend.clone(),
            }));
        }

        if self.api.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "API model must not be empty".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.api.timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if let Some(temperature) = self.api.temperature {
            if !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
                return Err(ConfigError::ValidationFailed(format!(
                    "Temperature must be between 0.0 and {}, got {}",
                    MAX_TEMPERATURE, temperature
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        writeln!(f, "  Inputs:")?;
        for input in &self.inp {
            let extractor = input
                .extractor
                .as_ref()
                .and_then(|spec| spec.name.as_ref().map(|name| (name, spec.take_only)));
            match extractor {
                Some((name, mode)) => writeln!(
                    f,
                    "    {} <- {} ({}, {})",
                    input.name,
                    input.file.display(),
                    name,
                    mode
                )?,
                None => writeln!(f, "    {} <- {}", input.name, input.file.display())?,
            }
        }
        writeln!(f, "  Template: {}", self.template.display())?;
        writeln!(f, "  API: {} ({})", self.api.backend, self.api.model)?;
        writeln!(
            f,
            "  Key: {}",
            if self.api.key.is_some() { "<set>" } else { "<from environment>" }
        )?;
        writeln!(f, "  Timeout: {}s", self.api.timeout_secs)?;
        write!(f, "  Output: {}", self.out.file.display())
    }
}

fn config_dir(path: &Path) -> PathBuf {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if dir.is_absolute() {
        dir
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(&dir))
            .unwrap_or(dir)
    }
}

fn interpolation_regex() -> &'static Regex {
    static INTERP_RE: OnceLock<Regex> = OnceLock::new();
    INTERP_RE.get_or_init(|| Regex::new(r"\$\{([^}]*)\}").expect("valid regex"))
}

fn resolve(expression: &str, root_dir: &Path) -> Result<String, ConfigError> {
    let key = expression.trim();
    if key == "root_dir" {
        return Ok(root_dir.display().to_string());
    }

    let var = key
        .strip_prefix("env:")
        .or_else(|| key.strip_prefix("oc.env:"))
        .map(str::trim);

    match var {
        Some(name) => env::var(name).map_err(|_| ConfigError::Interpolation {
            expression: format!("${{{}}}", expression),
            reason: format!("environment variable {} is not set", name),
        }),
        None => Err(ConfigError::Interpolation {
            expression: format!("${{{}}}", expression),
            reason: "unknown key (expected root_dir or env:NAME)".to_string(),
        }),
    }
}

fn interpolate_str(value: &str, root_dir: &Path) -> Result<String, ConfigError> {
    let mut failure = None;
    let resolved = interpolation_regex().replace_all(value, |caps: &Captures<'_>| {
        match resolve(&caps[1], root_dir) {
            Ok(text) => text,
            Err(e) => {
                failure.get_or_insert(e);
                String::new()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(resolved.into_owned()),
    }
}

fn interpolate_path(path: &Path, root_dir: &Path) -> Result<PathBuf, ConfigError> {
    interpolate_str(&path.to_string_lossy(), root_dir).map(PathBuf::from)
}
