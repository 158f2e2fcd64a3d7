//! Request types for the analysis workflows

use crate::error::AnalystError;
use serde::Deserialize;

/// Sparse search parameters for locating a bill without its text.
///
/// Wire names match the client form fields. Empty or whitespace-only
/// strings are treated as absent, since browsers submit blank inputs
/// rather than omitting them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Full or partial bill title
    #[serde(rename = "billName", default)]
    pub bill_name: Option<String>,

    /// Bill number, e.g. `"HB 1234"`
    #[serde(rename = "billNumber", default)]
    pub bill_number: Option<String>,

    /// State name or `"federal"`; the one mandatory field
    #[serde(rename = "billState", default)]
    pub state: Option<String>,

    /// Restrict results to bills introduced in this year
    #[serde(rename = "billYear", default)]
    pub year: Option<String>,

    /// Free-text hints about the bill
    #[serde(rename = "additionalInfo", default)]
    pub additional_info: Option<String>,
}

impl SearchQuery {
    /// The jurisdiction, if a non-blank one was given
    pub fn state(&self) -> Option<&str> {
        presence(&self.state)
    }

    /// The bill name, if a non-blank one was given
    pub fn bill_name(&self) -> Option<&str> {
        presence(&self.bill_name)
    }

    /// The bill number, if a non-blank one was given
    pub fn bill_number(&self) -> Option<&str> {
        presence(&self.bill_number)
    }

    /// The requested year, if a non-blank one was given
    pub fn year(&self) -> Option<&str> {
        presence(&self.year)
    }

    /// Free-text hints, if non-blank ones were given
    pub fn additional_info(&self) -> Option<&str> {
        presence(&self.additional_info)
    }

    /// Check the query carries enough to search on.
    ///
    /// The jurisdiction is mandatory; beyond that at least one of
    /// name, number, or free text must be present.
    pub fn validate(&self) -> Result<(), AnalystError> {
        if self.state().is_none() {
            return Err(AnalystError::MissingJurisdiction);
        }
        if self.bill_name().is_none()
            && self.bill_number().is_none()
            && self.additional_info().is_none()
        {
            return Err(AnalystError::InsufficientQuery);
        }
        Ok(())
    }
}

fn presence(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
