use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/certificate-info", get(handlers::get_certificate_info))
        .route("/certificate-bulk", get(handlers::get_certificate_bulk))
        .route("/certificate-list", get(handlers::list_domains))
        .route("/certificate-create", post(handlers::create_domain))
        .route("/certificate-single/{id}", get(handlers::get_domain))
        .route("/certificate-delete/{id}", delete(handlers::delete_domain))
        .with_state(state)
}
