use super::error::{BackendError, UnsuccessfulRequest};
use super::types::{LLMRequest, LLMResponse};
use crate::prompting::Prompt;
use async_trait::async_trait;
use tracing::{debug, error};

#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Backend-specific request execution
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError>;

    fn name(&self) -> &str;

    fn model_info(&self) -> Option<String> {
        None
    }

    /// Whether the system instruction can be sent as its own message
    fn supports_system(&self) -> bool {
        true
    }

    /// Sends a prompt and returns the generated text
    async fn call(&self, prompt: &Prompt) -> Result<String, BackendError> {
        let request = LLMRequest::from_prompt(prompt, self.supports_system());
        let response = self.chat(request).await?;
        debug!(
            backend = self.name(),
            "Received {} chars in {:?}",
            response.content.len(),
            response.response_time
        );
        Ok(response.content)
    }

    /// Like [`call`](LLMClient::call), but every failure is reported as
    /// [`UnsuccessfulRequest`]
    async fn query(&self, prompt: &Prompt) -> Result<String, UnsuccessfulRequest> {
        self.call(prompt).await.map_err(|e| {
            error!(backend = self.name(), "Request failed: {}", e);
            UnsuccessfulRequest::new(self.name(), e)
        })
    }
}
