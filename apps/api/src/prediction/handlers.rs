//! Axum route handlers for the Prediction API.
//!
//! Handlers never fail on the prediction itself: the client always returns a
//! value. Only malformed requests are rejected.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::prediction::models::PredictionResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CrowdPredictionRequest {
    pub module: String,
    pub day: String,
    pub time: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct DemandForecastQuery {
    pub day: String,
}

#[derive(Debug, Serialize)]
pub struct DemandForecastResponse {
    pub day: String,
    pub items: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/predictions/crowd
pub async fn handle_predict_crowd(
    State(state): State<AppState>,
    payload: Result<Json<CrowdPredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    let Json(request) = payload?;
    let result = state
        .predictor
        .predict_crowd(&request.module, &request.day, &request.time, &request.context)
        .await;
    Ok(Json(result))
}

/// GET /api/v1/forecasts/demand?day=Monday
pub async fn handle_forecast_demand(
    State(state): State<AppState>,
    query: Result<Query<DemandForecastQuery>, QueryRejection>,
) -> Result<Json<DemandForecastResponse>, AppError> {
    let Query(query) = query?;
    let items = state.predictor.forecast_demand(&query.day).await;
    Ok(Json(DemandForecastResponse {
        day: query.day,
        items,
    }))
}
