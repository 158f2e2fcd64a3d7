//! Legibrief Normalizer
//!
//! Turns the untrusted, loosely-shaped JSON a generation provider
//! returns into the canonical [`BillRecord`](legibrief_domain::BillRecord).
//!
//! # Overview
//!
//! Providers are asked for a fixed schema but are not guaranteed to
//! honor it: field names arrive in any casing convention, string fields
//! arrive as nested objects, arrays arrive as objects. Rather than
//! scattering ad hoc checks, every candidate key spelling and every
//! placeholder string lives in one table ([`fields`]), and two small
//! layers consume it:
//!
//! - [`coerce`] — pure, total value coercion (`resolve`, `flat_string`,
//!   `string_array`)
//! - [`record`] — per-field normalization into a `BillRecord`
//!
//! # Guarantees
//!
//! Normalization is deterministic, pure, and total. Malformed input
//! degrades to documented placeholder text; it never raises. The output
//! record has every narrative field present as a string and
//! `sections`/`citations` always as arrays.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
pub mod fields;
pub mod record;

pub use record::normalize;
