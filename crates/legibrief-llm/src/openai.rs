//! OpenAI-compatible Provider Implementation
//!
//! Talks to any chat-completions endpoint that speaks the OpenAI wire
//! format (api.openai.com itself, or a self-hosted gateway).
//!
//! # Features
//!
//! - Async HTTP communication with the chat-completions API
//! - Configurable endpoint, model, and API key
//! - JSON-object response mode for structured requests
//! - Per-request timeout handling
//!
//! A failed call is reported to the caller as-is; retry policy belongs
//! to the user, not this layer.

use crate::LlmError;
use legibrief_domain::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model for legislative analysis
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for generation requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default output-token ceiling per generation call
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4_000;

/// Sampling temperature; analysis wants consistency over creativity
const TEMPERATURE: f32 = 0.3;

/// Chat-completions provider for bill analysis
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base, e.g. `https://api.openai.com/v1`
    /// - `api_key`: bearer token for the endpoint
    /// - `model`: model to use, e.g. `gpt-4o-mini`
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Create a provider against the default endpoint and model
    pub fn default_endpoint(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, api_key, DEFAULT_MODEL)
    }

    /// Set the output-token ceiling per call
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Generate text for a prompt
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is unreachable, the model is
    /// unknown, the request is rate limited, or the response body does
    /// not parse.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.request(prompt, false).await
    }

    /// Generate output constrained to a single JSON object
    ///
    /// The constraint is the API's JSON mode; the content is still
    /// untrusted and may not match the schema the prompt asked for.
    pub async fn generate_json(&self, prompt: &str) -> Result<String, LlmError> {
        self.request(prompt, true).await
    }

    async fn request(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: self.max_output_tokens,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper; callers run this inside spawn_blocking
        block_on_provider(self.generate(prompt))
    }

    fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on_provider(self.generate_json(prompt))
    }
}

fn block_on_provider<F>(future: F) -> Result<String, LlmError>
where
    F: std::future::Future<Output = Result<String, LlmError>>,
{
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LlmError::Other(format!("Runtime error: {}", e)))?
        .block_on(future)
}
