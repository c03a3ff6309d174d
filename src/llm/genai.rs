//! GenAI-based LLM client implementation
//!
//! This module provides an LLM client implementation using the `genai` crate,
//! supporting multiple providers (OpenAI, Anthropic, Gemini, Groq, xAI,
//! Cohere, Ollama).

use super::client::LLMClient;
use super::error::BackendError;
use super::selector::BackendSettings;
use super::types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage as GenAIChatMessage, ChatOptions, ChatRequest as GenAIChatRequest};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use std::time::Duration;
use tracing::{debug, error};

/// GenAI-based LLM client
///
/// Model, credential, endpoint, sampling temperature and timeout are fixed
/// when the client is built.
pub struct GenAIClient {
    /// GenAI client instance
    client: Client,
    /// Model name
    model: String,
    /// Provider type
    provider: AdapterKind,
    /// Request timeout
    timeout: Duration,
    /// Default sampling temperature
    temperature: Option<f32>,
    /// Send the system instruction as a separate message
    system_role: bool,
}

impl GenAIClient {
    /// Creates a new GenAI client
    ///
    /// # Arguments
    ///
    /// * `provider` - LLM provider to use
    /// * `settings` - Model, credential and request options
    ///
    /// Without an explicit key the provider's usual environment variable
    /// (e.g. `OPENAI_API_KEY`) is read at request time.
    pub fn new(provider: AdapterKind, settings: &BackendSettings) -> Result<Self, BackendError> {
        if settings.model.trim().is_empty() {
            return Err(BackendError::ConfigurationError {
                message: "model name must not be empty".to_string(),
            });
        }

        let key = settings.key.clone();
        let base_url = settings.base_url.clone();
        let model_name = settings.model.clone();

        if let Some(url) = &base_url {
            debug!("Using custom endpoint for {}: {}", provider.as_str(), url);
        }

        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let ServiceTarget { endpoint, .. } = service_target;

                let endpoint = match &base_url {
                    Some(url) => Endpoint::from_owned(url.clone()),
                    None => endpoint,
                };

                let auth = match (&key, provider.default_key_env_name()) {
                    (Some(key), _) => AuthData::from_single(key.clone()),
                    (None, Some(api_key_var)) => AuthData::from_env(api_key_var),
                    (None, None) => AuthData::from_single(""),
                };

                Ok(ServiceTarget {
                    endpoint,
                    auth,
                    model: ModelIden::new(provider, &model_name),
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        debug!(
            "Creating GenAI client: provider={}, model={}",
            provider.as_str(),
            settings.model,
        );

        Ok(Self {
            client,
            model: settings.model.clone(),
            provider,
            timeout: settings.timeout,
            temperature: settings.temperature,
            system_role: settings.system_role,
        })
    }

    /// Converts our ChatMessage to genai ChatMessage
    fn convert_message(&self, msg: &ChatMessage) -> GenAIChatMessage {
        match msg.role {
            MessageRole::System => GenAIChatMessage::system(&msg.content),
            MessageRole::User => GenAIChatMessage::user(&msg.content),
            MessageRole::Assistant => GenAIChatMessage::assistant(&msg.content),
        }
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let start = std::time::Instant::now();

        let messages: Vec<GenAIChatMessage> = request
            .messages
            .iter()
            .map(|m| self.convert_message(m))
            .collect();
        let genai_request = GenAIChatRequest::new(messages);

        let mut options = ChatOptions::default();
        if let Some(temp) = request.temperature.or(self.temperature) {
            options = options.with_temperature(temp as f64);
        }
        if let Some(max_tokens) = request.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }

        // Execute with timeout
        let response = match tokio::time::timeout(
            self.timeout,
            self.client
                .exec_chat(&self.model, genai_request, Some(&options)),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!("{} API error: {}", self.provider.as_str(), e);
                return Err(BackendError::ApiError {
                    message: format!("{} request failed: {}", self.provider.as_str(), e),
                    status_code: None,
                });
            }
            Err(_) => {
                error!(
                    "{} request timed out after {}s",
                    self.provider.as_str(),
                    self.timeout.as_secs()
                );
                return Err(BackendError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let content = response
            .first_text()
            .ok_or_else(|| BackendError::InvalidResponse {
                message: format!("{} returned no text content", self.provider.as_str()),
                raw_response: None,
            })?
            .to_string();

        Ok(LLMResponse::text(content, start.elapsed()))
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }

    fn supports_system(&self) -> bool {
        self.system_role
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .field("system_role", &self.system_role)
            .finish()
    }
}
