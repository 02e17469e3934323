use super::error::{ApiError, ApiResult};
use crate::{core::prelude::*, domain::prelude::*};
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use models::{PointsResponse, ProcessResponse};
use regex::Regex;
use std::sync::LazyLock;

/// Shape of a receipt id in the points path.
pub const ID_PATTERN: &str = "^[a-zA-Z0-9-]+$";

static ID_REGEX: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(ID_PATTERN));

/// Response bodies of the receipts API.
pub mod models {
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
    pub struct ProcessResponse {
        pub id: String,
    }

    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
    pub struct PointsResponse {
        pub points: i64,
    }
}

/// `POST /receipts/process`
///
/// Decodes and scores the receipt, then stores the points under a fresh id.
/// Nothing is stored unless both steps succeed.
///
pub async fn process(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ProcessResponse>> {
    let receipt = serde_json::from_slice::<Receipt>(&body).map_err(|e| {
        tracing::warn!("Rejected receipt: {e}");
        ApiError::Decode(e.to_string())
    })?;

    let breakdown = PointsBreakdown::from_receipt(&receipt).map_err(|e| {
        tracing::warn!("Could not score receipt: {e}");
        ApiError::from(e)
    })?;
    let points = breakdown.total();

    let id = uuid::Uuid::new_v4().to_string();
    state.store.put(id.clone(), points).await;

    tracing::debug!(%id, ?breakdown, "Scored receipt");
    tracing::info!(%id, points, retailer = %receipt.retailer, "Processed receipt");

    Ok(Json(ProcessResponse { id }))
}

/// `GET /receipts/{id}/points`
///
/// Malformed ids, including ids the path extractor cannot decode, are
/// reported the same way as unknown ones.
///
pub async fn points(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<PointsResponse>> {
    let Path(id) = path.map_err(|e| ApiError::NotFound(format!("Invalid receipt id: {e}")))?;
    if !is_valid_id(&id) {
        return Err(ApiError::NotFound(format!("Invalid receipt id: {id}")));
    }

    match state.store.get(&id).await {
        Some(points) => Ok(Json(PointsResponse { points })),
        None => Err(ApiError::NotFound(format!("No receipt found for id {id}"))),
    }
}

fn is_valid_id(id: &str) -> bool {
    ID_REGEX
        .as_ref()
        .map(|regex| regex.is_match(id))
        .unwrap_or(false)
}
