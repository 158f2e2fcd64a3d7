//! Decode provider output into raw payloads

use crate::error::AnalystError;
use serde_json::Value;

/// Check whether a classification answer is affirmative.
///
/// Providers asked for a bare "Yes"/"No" still editorialize ("Yes, this
/// is a bill"), so the answer is matched by case-insensitive substring.
pub fn is_affirmative(response: &str) -> bool {
    response.to_lowercase().contains("yes")
}

/// Decode a provider response as a single JSON object.
///
/// The response is untrusted: JSON mode is requested but not guaranteed,
/// and some providers wrap output in markdown code blocks anyway.
pub fn decode_object(response: &str) -> Result<Value, AnalystError> {
    let json_str = strip_code_fence(response);

    let value: Value = serde_json::from_str(&json_str)
        .map_err(|e| AnalystError::Decode(format!("JSON parse error: {}", e)))?;

    if !value.is_object() {
        return Err(AnalystError::Decode("Expected a JSON object".to_string()));
    }

    Ok(value)
}

/// Strip a markdown code fence when present
fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        // Skip first line (```json or ```) and last line (```)
        lines[1..lines.len().saturating_sub(1)].join("\n")
    } else {
        trimmed.to_string()
    }
}
