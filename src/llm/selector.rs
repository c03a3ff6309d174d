//! Backend selection by name
//!
//! Backends come from a fixed table mapping a configuration name to a
//! constructor. Names are matched case-insensitively.

use super::client::LLMClient;
use super::error::BackendError;
use super::genai::GenAIClient;
use genai::adapter::AdapterKind;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Everything a backend needs at construction time
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    /// Provider-specific model identifier
    pub model: String,
    /// Credential; `None` falls back to the provider's environment variable
    pub key: Option<String>,
    /// Endpoint override
    pub base_url: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Request timeout
    pub timeout: Duration,
    /// Send system instructions as a separate message
    pub system_role: bool,
}

impl BackendSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            key: None,
            base_url: None,
            temperature: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            system_role: true,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

type BackendConstructor = fn(&BackendSettings) -> Result<Arc<dyn LLMClient>, BackendError>;

const BACKENDS: &[(&str, BackendConstructor)] = &[
    ("openai", openai),
    ("anthropic", anthropic),
    ("claude", anthropic),
    ("gemini", gemini),
    ("groq", groq),
    ("xai", xai),
    ("cohere", cohere),
    ("ollama", ollama),
];

fn genai_backend(
    provider: AdapterKind,
    settings: &BackendSettings,
) -> Result<Arc<dyn LLMClient>, BackendError> {
    Ok(Arc::new(GenAIClient::new(provider, settings)?))
}

fn openai(settings: &BackendSettings) -> Result<Arc<dyn LLMClient>, BackendError> {
    genai_backend(AdapterKind::OpenAI, settings)
}

fn anthropic(settings: &BackendSettings) -> Result<Arc<dyn LLMClient>, BackendError> {
    genai_backend(AdapterKind::Anthropic, settings)
}

fn gemini(settings: &BackendSettings) -> Result<Arc<dyn LLMClient>, BackendError> {
    genai_backend(AdapterKind::Gemini, settings)
}

fn groq(settings: &BackendSettings) -> Result<Arc<dyn LLMClient>, BackendError> {
    genai_backend(AdapterKind::Groq, settings)
}

fn xai(settings: &BackendSettings) -> Result<Arc<dyn LLMClient>, BackendError> {
    genai_backend(AdapterKind::Xai, settings)
}

fn cohere(settings: &BackendSettings) -> Result<Arc<dyn LLMClient>, BackendError> {
    genai_backend(AdapterKind::Cohere, settings)
}

fn ollama(settings: &BackendSettings) -> Result<Arc<dyn LLMClient>, BackendError> {
    genai_backend(AdapterKind::Ollama, settings)
}

fn find_constructor(name: &str) -> Option<BackendConstructor> {
    let wanted = name.trim().to_lowercase();
    BACKENDS
        .iter()
        .find(|(registered, _)| *registered == wanted)
        .map(|(_, constructor)| *constructor)
}

/// Registered backend names
pub fn backend_names() -> Vec<&'static str> {
    BACKENDS.iter().map(|(name, _)| *name).collect()
}

pub fn is_known_backend(name: &str) -> bool {
    find_constructor(name).is_some()
}

/// Builds the backend registered under `name`
pub fn select_backend(
    name: &str,
    settings: &BackendSettings,
) -> Result<Arc<dyn LLMClient>, BackendError> {
    let constructor = find_constructor(name).ok_or_else(|| BackendError::UnknownBackend {
        name: name.to_string(),
    })?;

    let client = constructor(settings)?;
    info!("Using backend: {} ({})", client.name(), settings.model);
    Ok(client)
}
