//! Document analysis workflow
//!
//! A linear pipeline over an uploaded document's extracted text:
//! classify, extract, enrich, combine. Each stage depends on the
//! previous one, so the three generation calls are strictly sequential.
//! Failure policy is per-stage: anything up to and including extraction
//! is fatal, while an undecodable enrichment response degrades to fixed
//! placeholder research so the extraction's output is not thrown away.

use crate::config::AnalystConfig;
use crate::error::AnalystError;
use crate::parser;
use crate::prompt;
use legibrief_domain::{BillRecord, LlmProvider};
use legibrief_normalizer::normalize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Progress marker for the linear analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    /// Document text received, nothing decided yet
    Received,
    /// Confirmed to be legislation
    Classified,
    /// Identity, summary, and sections extracted
    Extracted,
    /// Research narratives produced (or substituted)
    Enriched,
    /// Fragments merged into one payload
    Combined,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStage::Received => "received",
            AnalysisStage::Classified => "classified",
            AnalysisStage::Extracted => "extracted",
            AnalysisStage::Enriched => "enriched",
            AnalysisStage::Combined => "combined",
        };
        f.write_str(name)
    }
}

/// Runs the multi-stage analysis of an uploaded bill's text
pub struct DocumentAnalyst<L>
where
    L: LlmProvider,
{
    provider: Arc<L>,
    config: AnalystConfig,
}

impl<L> DocumentAnalyst<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: fmt::Display,
{
    /// Create a new analyst over a shared provider handle
    pub fn new(provider: Arc<L>, config: AnalystConfig) -> Self {
        Self { provider, config }
    }

    /// Analyze extracted document text into a canonical bill record.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::NotLegislation`] when classification says
    /// the document is not a bill, [`AnalystError::Generation`] or
    /// [`AnalystError::Timeout`] when a provider call fails, and
    /// [`AnalystError::Decode`] when the extraction stage's output is
    /// unusable. Enrichment decode failure does not error.
    pub async fn analyze(&self, text: &str) -> Result<BillRecord, AnalystError> {
        info!(
            chars = text.len(),
            stage = %AnalysisStage::Received,
            "starting document analysis"
        );

        // Classify
        let answer = self
            .call(
                &prompt::classification_prompt(text, self.config.classification_prefix_chars),
                false,
            )
            .await?;
        if !parser::is_affirmative(&answer) {
            info!(answer = %answer.trim(), "document rejected as non-legislation");
            return Err(AnalystError::NotLegislation);
        }
        debug!(stage = %AnalysisStage::Classified, "document confirmed as legislation");

        // Extract
        let extraction = self.call(&prompt::extraction_prompt(text), true).await?;
        let initial = parser::decode_object(&extraction)?;
        info!(stage = %AnalysisStage::Extracted, "initial extraction complete");

        // Enrich
        let research = match self
            .call(
                &prompt::enrichment_prompt(&initial, text, self.config.enrichment_prefix_chars),
                true,
            )
            .await
            .map(|response| parser::decode_object(&response))?
        {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "enrichment output undecodable, substituting placeholders");
                placeholder_research()
            }
        };
        info!(stage = %AnalysisStage::Enriched, "research enrichment complete");

        // Combine
        let combined = combine_fragments(initial, research);
        debug!(stage = %AnalysisStage::Combined, "fragments merged");

        Ok(normalize(combined))
    }

    async fn call(&self, prompt: &str, json_mode: bool) -> Result<String, AnalystError> {
        let provider = Arc::clone(&self.provider);
        let prompt = prompt.to_string();

        debug!(chars = prompt.len(), json_mode, "issuing generation call");

        // The provider trait is blocking; run it off the async executor
        let task = tokio::task::spawn_blocking(move || {
            let result = if json_mode {
                provider.generate_json(&prompt)
            } else {
                provider.generate(&prompt)
            };
            result.map_err(|e| AnalystError::Generation(e.to_string()))
        });

        timeout(self.config.generation_timeout(), task)
            .await
            .map_err(|_| AnalystError::Timeout)?
            .map_err(|e| AnalystError::Generation(format!("Task join error: {}", e)))?
    }
}

/// The fixed research fragment used when enrichment output cannot be
/// decoded. Every narrative field gets its own sentence so clients can
/// still render a complete record.
pub fn placeholder_research() -> Value {
    json!({
        "financialImplications":
            "The financial implications could not be determined at this time.",
        "ideologicalLeaning":
            "The ideological leaning could not be determined at this time.",
        "advocacyGroupPositions":
            "Information on advocacy group positions could not be determined at this time.",
        "changesTo":
            "The changes to existing law could not be determined at this time.",
        "similarLaws":
            "Information on similar laws in other states could not be determined at this time.",
        "otherFactors":
            "Additional factors to consider could not be determined at this time.",
        "citations": []
    })
}

/// Merge the extraction fragment's identity/summary/sections with the
/// enrichment fragment's narratives/citations. On key collision the
/// extraction side wins; it came straight from the bill text and is the
/// more reliable of the two.
fn combine_fragments(initial: Value, research: Value) -> Value {
    let mut merged = match research {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(initial_map) = initial {
        for (key, value) in initial_map {
            merged.insert(key, value);
        }
    }
    Value::Object(merged)
}
