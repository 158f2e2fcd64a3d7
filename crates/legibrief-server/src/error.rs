//! Error types for the legibrief server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use legibrief_analyst::AnalystError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Server error types, one per client-visible failure mode
#[derive(Error, Debug)]
pub enum ServerError {
    /// Multipart body carried no file field
    #[error("No file uploaded")]
    NoFile,

    /// Uploaded file is not a PDF
    #[error("Only PDF files are allowed")]
    NotPdf,

    /// Multipart body could not be read
    #[error("Invalid upload: {0}")]
    Upload(String),

    /// Document text could not be extracted
    #[error("Error processing file: {0}")]
    Extraction(String),

    /// Failure inside the document analysis workflow
    #[error(transparent)]
    Analysis(AnalystError),

    /// Failure inside the bill search workflow
    #[error(transparent)]
    Search(AnalystError),

    /// Anything else
    #[error("An unexpected error occurred on the server")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::NoFile | ServerError::NotPdf => {
                (StatusCode::BAD_REQUEST, plain(self.to_string()))
            }
            ServerError::Upload(msg) => (
                StatusCode::BAD_REQUEST,
                plain(format!("Invalid upload: {}", msg)),
            ),
            ServerError::Extraction(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                plain(format!("Error processing file: {}", msg)),
            ),
            ServerError::Analysis(err) => match err {
                // Classification rejection is the user's problem, not ours
                AnalystError::NotLegislation => (StatusCode::BAD_REQUEST, plain(err.to_string())),
                other => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    plain(format!("Error processing file: {}", other)),
                ),
            },
            ServerError::Search(err) => match err {
                AnalystError::MissingJurisdiction
                | AnalystError::InsufficientQuery
                | AnalystError::YearMismatch { .. } => {
                    (StatusCode::BAD_REQUEST, plain(err.to_string()))
                }
                AnalystError::Decode(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    plain(
                        "Unable to find complete information about this bill. Please try \
                         with more specific details."
                            .to_string(),
                    ),
                ),
                other => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    plain(format!("Error searching for bill: {}", other)),
                ),
            },
            ServerError::Internal(msg) => {
                error!(detail = %msg, "unhandled server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "An unexpected error occurred on the server".to_string(),
                        message: Some(msg.clone()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn plain(error: String) -> ErrorResponse {
    ErrorResponse {
        error,
        message: None,
    }
}
