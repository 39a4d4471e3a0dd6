use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use certwatch_domain::{EnrichedDomain, MonitoredDomain};

use crate::{
    dto::{CreateDomainRequest, CreateDomainResponse, MessageResponse},
    errors::ApiError,
    state::AppState,
};

pub async fn list_domains(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonitoredDomain>>, ApiError> {
    let domains = state.list_domains.execute().await?;
    Ok(Json(domains.as_ref().clone()))
}

pub async fn create_domain(
    State(state): State<AppState>,
    Json(req): Json<CreateDomainRequest>,
) -> Result<(StatusCode, Json<CreateDomainResponse>), ApiError> {
    let domain = state.create_domain.execute(&req.domain).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateDomainResponse {
            message: "Domain added".to_string(),
            domain,
        }),
    ))
}

pub async fn get_domain(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EnrichedDomain>, ApiError> {
    Ok(Json(state.get_domain.execute(id).await?))
}

pub async fn delete_domain(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.delete_domain.execute(id).await?;
    Ok(Json(MessageResponse::new("Domain deleted")))
}
