//! Legibrief Analyst
//!
//! The two workflows that turn a legislative bill into a canonical
//! [`BillRecord`](legibrief_domain::BillRecord) by orchestrating a
//! text-generation provider.
//!
//! # Workflows
//!
//! - [`DocumentAnalyst`]: three sequential generation calls over
//!   extracted document text (classify, extract, enrich), merged and
//!   normalized. Enrichment failure degrades to placeholder research
//!   rather than discarding the extraction.
//! - [`BillSearcher`]: one generation call from sparse search
//!   parameters, with fail-fast input validation and post-hoc year
//!   verification.
//!
//! # Architecture
//!
//! ```text
//! Text  → DocumentAnalyst → LLM ×3 → RawPayload → Normalizer → BillRecord
//! Query → BillSearcher    → LLM ×1 → RawPayload → Normalizer → BillRecord
//! ```
//!
//! Providers are injected as [`Arc`](std::sync::Arc) handles so both
//! workflows can share one client whose lifecycle the process entry
//! point owns. No retry logic: a failed generation call fails its
//! stage, and retrying is the user's decision.

#![warn(missing_docs)]

mod analysis;
mod config;
mod error;
mod parser;
mod prompt;
mod search;
mod types;

#[cfg(test)]
mod tests;

pub use analysis::{placeholder_research, AnalysisStage, DocumentAnalyst};
pub use config::AnalystConfig;
pub use error::AnalystError;
pub use search::BillSearcher;
pub use types::SearchQuery;
