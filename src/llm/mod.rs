//! LLM client abstraction layer
//!
//! This module provides a trait-based abstraction for talking to
//! text-generation backends. Every backend implements [`LLMClient::chat`];
//! callers go through [`LLMClient::query`], which folds any backend failure
//! into a single [`UnsuccessfulRequest`] error.

mod client;
mod error;
mod genai;
mod mock;
mod selector;
mod types;

pub use client::LLMClient;
pub use error::{BackendError, UnsuccessfulRequest};
pub use genai::GenAIClient;
pub use mock::{MockLLMClient, MockResponse};
pub use selector::{
    backend_names, is_known_backend, select_backend, BackendSettings, DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
