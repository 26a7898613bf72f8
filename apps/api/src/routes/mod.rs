pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::prediction::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/predictions/crowd",
            post(handlers::handle_predict_crowd),
        )
        .route(
            "/api/v1/forecasts/demand",
            get(handlers::handle_forecast_demand),
        )
        .fallback(not_found)
        .with_state(state)
}
