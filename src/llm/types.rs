//! LLM communication types
//!
//! This module defines the types used for LLM request/response communication,
//! independent of any specific provider implementation.

use crate::prompting::Prompt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions
    System,
    /// User message
    User,
    /// Assistant (LLM) response
    Assistant,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to send to the LLM
#[derive(Debug, Clone, PartialEq)]
pub struct LLMRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Temperature for response generation, overriding the backend default
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl LLMRequest {
    /// Creates a new request with messages
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Turns a prompt into a request.
    ///
    /// With `system_role` the instruction travels as its own system message;
    /// without it the whole prompt, instruction header included, becomes a
    /// single user message.
    pub fn from_prompt(prompt: &Prompt, system_role: bool) -> Self {
        let messages = match (&prompt.system, system_role) {
            (Some(system), true) => vec![
                ChatMessage::system(system.as_str()),
                ChatMessage::user(prompt.content.as_str()),
            ],
            (Some(_), false) => vec![ChatMessage::user(prompt.to_string())],
            (None, _) => vec![ChatMessage::user(prompt.content.as_str())],
        };

        Self::new(messages)
    }

    /// Sets the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Text content of the response
    pub content: String,
    /// Time taken for the request
    pub response_time: Duration,
}

impl LLMResponse {
    /// Creates a new response with just content
    pub fn text(content: impl Into<String>, response_time: Duration) -> Self {
        Self {
            content: content.into(),
            response_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_creation() {
        let system = ChatMessage::system("You are a helpful assistant");
        assert_eq!(system.role, MessageRole::System);
        assert_eq!(system.content, "You are a helpful assistant");

        let user = ChatMessage::user("Hello");
        assert_eq!(user.role, MessageRole::User);

        let assistant = ChatMessage::assistant("Hi there!");
        assert_eq!(assistant.role, MessageRole::Assistant);
    }

    #[test]
    fn test_from_prompt_without_system() {
        let request = LLMRequest::from_prompt(&Prompt::new("Hello"), true);
        assert_eq!(request.messages, vec![ChatMessage::user("Hello")]);
    }

    #[test]
    fn test_from_prompt_with_system_role() {
        let prompt = Prompt::new("Hello").with_system("Be terse.");
        let request = LLMRequest::from_prompt(&prompt, true);
        assert_eq!(
            request.messages,
            vec![ChatMessage::system("Be terse."), ChatMessage::user("Hello")]
        );
    }

    #[test]
    fn test_from_prompt_folds_system_without_role() {
        let prompt = Prompt::new("Hello").with_system("Be terse.");
        let request = LLMRequest::from_prompt(&prompt, false);
        assert_eq!(
            request.messages,
            vec![ChatMessage::user("INSTRUCTION:\n\nBe terse.\nHello")]
        );
    }

    #[test]
    fn test_llm_request_builder() {
        let request = LLMRequest::new(vec![ChatMessage::user("Hello")])
            .with_temperature(0.7)
            .with_max_tokens(1024);

        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(1024));
    }

    #[test]
    fn test_llm_response() {
        let response = LLMResponse::text("Hello!", Duration::from_millis(100));
        assert_eq!(response.content, "Hello!");
        assert_eq!(response.response_time, Duration::from_millis(100));
    }
}
