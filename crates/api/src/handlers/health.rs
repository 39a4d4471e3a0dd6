use axum::{extract::State, response::Json};
use tracing::debug;

use crate::{dto::HealthResponse, state::AppState};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse::from(state.get_stats.execute()))
}
