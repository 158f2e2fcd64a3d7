//! Trait definitions for external interactions
//!
//! These traits define the boundary between domain logic and
//! infrastructure. Implementations live in other crates.

/// Trait for text-generation provider operations
///
/// Implemented by the infrastructure layer (legibrief-llm). The
/// interface is deliberately synchronous; async callers wrap it in a
/// blocking task so workflow code stays provider-agnostic.
pub trait LlmProvider {
    /// Error type for provider operations
    type Error;

    /// Generate free-form text for a prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate output constrained to a single JSON object
    ///
    /// The returned string is still untrusted: it may fail to parse or
    /// fail to match whatever shape the prompt requested.
    fn generate_json(&self, prompt: &str) -> Result<String, Self::Error>;
}
