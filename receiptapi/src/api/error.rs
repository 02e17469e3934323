use crate::domain::prelude::*;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the receipts API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body is not a valid receipt.
    #[error("The receipt is invalid: {0}")]
    Decode(String),

    #[error("The receipt could not be scored: {0}")]
    Scoring(#[from] ScoringError),

    /// Unknown receipt id or route.
    #[error("{0}")]
    NotFound(String),
}

/// Error response body.
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Decode(_) => (StatusCode::BAD_REQUEST, "DECODE_ERROR"),
            ApiError::Scoring(_) => (StatusCode::BAD_REQUEST, "SCORING_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
