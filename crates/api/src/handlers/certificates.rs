use axum::{
    extract::{Query, State},
    response::Json,
};
use certwatch_domain::EnrichedDomain;
use tracing::debug;

use crate::{
    dto::{BulkQuery, CertificateInfoResponse, CertificateQuery},
    errors::ApiError,
    state::AppState,
};

pub async fn get_certificate_info(
    State(state): State<AppState>,
    Query(query): Query<CertificateQuery>,
) -> Result<Json<CertificateInfoResponse>, ApiError> {
    let domain = query
        .domain
        .ok_or_else(|| ApiError::bad_request("invalid or missing domain"))?;

    let report = state.get_certificate.execute(&domain).await?;
    Ok(Json(CertificateInfoResponse::from(report)))
}

pub async fn get_certificate_bulk(
    State(state): State<AppState>,
    Query(query): Query<BulkQuery>,
) -> Result<Json<Vec<EnrichedDomain>>, ApiError> {
    let enriched = state.enrich_domains.execute(query.fast).await?;
    debug!(count = enriched.len(), fast = query.fast, "Bulk certificate data served");
    Ok(Json(enriched))
}
