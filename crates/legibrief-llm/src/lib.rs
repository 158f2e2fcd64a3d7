//! Legibrief LLM Provider Layer
//!
//! Pluggable text-generation providers behind the `LlmProvider` trait
//! from `legibrief-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic scripted mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat-completions backend
//!
//! # Examples
//!
//! ```
//! use legibrief_llm::MockProvider;
//! use legibrief_domain::LlmProvider;
//!
//! let provider = MockProvider::new("Yes");
//! assert_eq!(provider.generate("is this a bill?").unwrap(), "Yes");
//! ```

#![warn(missing_docs)]

pub mod openai;

use legibrief_domain::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during provider operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider answered, but not with anything usable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available at the endpoint
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

enum Scripted {
    Text(String),
    Error(String),
}

/// Scripted mock provider for deterministic testing
///
/// Workflows issue a known sequence of generation calls, so the mock
/// replays a queue of responses in order and falls back to a default
/// once the queue is drained. No network calls are made.
///
/// # Examples
///
/// ```
/// use legibrief_llm::MockProvider;
/// use legibrief_domain::LlmProvider;
///
/// let mut provider = MockProvider::new("{}");
/// provider.push_response("Yes");
/// provider.push_response(r#"{"billNumber": "HB 1"}"#);
///
/// assert_eq!(provider.generate("first call").unwrap(), "Yes");
/// assert_eq!(provider.generate("second call").unwrap(), r#"{"billNumber": "HB 1"}"#);
/// assert_eq!(provider.generate("third call").unwrap(), "{}");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Clone)]
pub struct MockProvider {
    default_response: String,
    script: Arc<Mutex<VecDeque<Scripted>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a mock returning `response` once the script is exhausted
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue the next scripted response
    pub fn push_response(&mut self, response: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Text(response.into()));
    }

    /// Queue an error for the next call
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Error(message.into()));
    }

    /// Number of times a generate method was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Text(response)) => Ok(response),
            Some(Scripted::Error(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
        // The mock has no JSON mode; the script already holds whatever
        // shape the test wants back.
        self.generate(prompt)
    }
}
