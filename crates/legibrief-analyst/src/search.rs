//! Bill search workflow
//!
//! Single-call design: the whole combined schema is requested in one
//! generation pass, then verified and normalized. Unlike the document
//! workflow there is no earlier good fragment to fall back on, so an
//! undecodable response fails the search outright.

use crate::config::AnalystConfig;
use crate::error::AnalystError;
use crate::parser;
use crate::prompt;
use crate::types::SearchQuery;
use legibrief_domain::{BillRecord, LlmProvider};
use legibrief_normalizer::{coerce, fields, normalize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};

/// Locates and analyzes a bill from sparse search parameters
pub struct BillSearcher<L>
where
    L: LlmProvider,
{
    provider: Arc<L>,
    config: AnalystConfig,
}

impl<L> BillSearcher<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: fmt::Display,
{
    /// Create a new searcher over a shared provider handle
    pub fn new(provider: Arc<L>, config: AnalystConfig) -> Self {
        Self { provider, config }
    }

    /// Search for a bill and produce its canonical record.
    ///
    /// Validation runs before any generation call, so a bad query never
    /// costs a provider round trip.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::MissingJurisdiction`] or
    /// [`AnalystError::InsufficientQuery`] for invalid input,
    /// [`AnalystError::Decode`] when the provider response is not a
    /// JSON object, and [`AnalystError::YearMismatch`] when a requested
    /// year disagrees with the result.
    pub async fn search(&self, query: &SearchQuery) -> Result<BillRecord, AnalystError> {
        query.validate()?;

        info!(
            state = query.state().unwrap_or_default(),
            number = query.bill_number().unwrap_or_default(),
            "starting bill search"
        );

        let response = self.call(&prompt::search_prompt(query)).await?;
        let payload = parser::decode_object(&response)?;

        verify_year(query, &payload)?;

        Ok(normalize(payload))
    }

    async fn call(&self, prompt: &str) -> Result<String, AnalystError> {
        let provider = Arc::clone(&self.provider);
        let prompt = prompt.to_string();

        debug!(chars = prompt.len(), "issuing search generation call");

        let task = tokio::task::spawn_blocking(move || {
            provider
                .generate_json(&prompt)
                .map_err(|e| AnalystError::Generation(e.to_string()))
        });

        timeout(self.config.generation_timeout(), task)
            .await
            .map_err(|_| AnalystError::Timeout)?
            .map_err(|e| AnalystError::Generation(format!("Task join error: {}", e)))?
    }
}

/// Reject a result whose stated year differs from the requested one.
/// Compared as strings since sources disagree on year representation;
/// a payload with no discernible year passes, the normalizer's default
/// covers it.
fn verify_year(query: &SearchQuery, payload: &Value) -> Result<(), AnalystError> {
    let Some(requested) = query.year() else {
        return Ok(());
    };
    let Some(found) = payload
        .as_object()
        .and_then(|bag| coerce::resolve(bag, fields::YEAR_INTRODUCED_KEYS))
    else {
        return Ok(());
    };

    let found = coerce::scalar_text(found);
    if found != requested {
        return Err(AnalystError::YearMismatch {
            requested: requested.to_string(),
            found,
        });
    }
    Ok(())
}
