use crate::prediction::predictor::PredictionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; degraded for the process lifetime if no API key was set.
    pub predictor: PredictionClient,
}
