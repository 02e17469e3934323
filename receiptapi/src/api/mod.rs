use crate::core::prelude::*;
use axum::{
    http::{Method, Uri},
    routing::{get, post},
    Router,
};
use error::ApiError;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod receipts;

/// Builds the route table of the receipts API.
///
/// Any other path, or a known path with the wrong method, is a 404. HEAD is
/// routed to the 404 handler explicitly, since axum would otherwise answer it
/// with the GET handler.
///
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(receipts::process).fallback(not_found))
        .route("/receipts/{id}/points", get(receipts::points).head(not_found).fallback(not_found))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {method} {}", uri.path()))
}
