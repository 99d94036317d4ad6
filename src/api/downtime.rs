//! Downtime report endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{asset::OfficeQuery, downtime::AssetDowntime},
    AppState,
};

use super::AuthenticatedUser;

/// Spare and service downtime per asset of an office, longest first
#[utoipa::path(
    get,
    path = "/AssetDowntime/finalreport",
    tag = "downtime",
    security(("bearer_auth" = [])),
    params(OfficeQuery),
    responses(
        (status = 200, description = "Downtime report", body = Vec<AssetDowntime>)
    )
)]
pub async fn final_report(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<OfficeQuery>,
) -> AppResult<Json<Vec<AssetDowntime>>> {
    let report = state.services.downtime.final_report(query.office_id).await?;
    Ok(Json(report))
}
