//! Error types for the analysis workflows

use thiserror::Error;

/// Errors that can occur while producing a bill record
#[derive(Error, Debug)]
pub enum AnalystError {
    /// The classification stage decided the document is not legislation.
    /// User-facing rejection, not a server fault.
    #[error(
        "The uploaded document does not appear to be a legislative bill or law. \
         This tool only summarizes legislation."
    )]
    NotLegislation,

    /// Generation provider call failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// A generation call exceeded the configured timeout
    #[error("Generation timed out")]
    Timeout,

    /// Provider output could not be decoded as a JSON object
    #[error("Could not decode provider output: {0}")]
    Decode(String),

    /// The search result names a different year than the one requested
    #[error(
        "No bill matching your criteria was found for the year {requested}. The search found \
         a bill from {found} instead. Please try again with different search parameters or \
         without specifying a year."
    )]
    YearMismatch {
        /// Year the client asked for
        requested: String,
        /// Year the provider's payload states
        found: String,
    },

    /// Search validation: no state or federal jurisdiction given
    #[error("State or federal jurisdiction is required")]
    MissingJurisdiction,

    /// Search validation: nothing identifies the bill
    #[error("Please provide at least one piece of information about the bill")]
    InsufficientQuery,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
