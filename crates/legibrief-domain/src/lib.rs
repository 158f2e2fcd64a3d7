//! Legibrief Domain Layer
//!
//! Core record model and trait boundaries for the legislative analysis
//! pipeline. This crate defines the canonical `BillRecord` that every
//! workflow ultimately produces, together with the union types that keep
//! loosely-typed provider output representable without ever exposing an
//! arbitrary object to a client.
//!
//! ## Key Concepts
//!
//! - **BillRecord**: the canonical, rendering-safe analysis of one bill
//! - **SponsorList**: a string or a list of strings, never anything else
//! - **YearIntroduced**: a string or an integer, since sources disagree
//! - **LlmProvider**: the trait boundary to the text-generation service
//!
//! ## Architecture
//!
//! Infrastructure implementations (HTTP providers, normalization,
//! transport) live in other crates. This crate carries only the record
//! model and the provider trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bill;
pub mod traits;

// Re-exports for convenience
pub use bill::{BillRecord, BillSection, SponsorList, YearIntroduced};
pub use traits::LlmProvider;
