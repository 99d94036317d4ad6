//! Spare lifecycle API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        spare::CreateSpare,
        spare_ops::{
            AddSpareResponse, ApproveQuery, AssetMaintenanceStatus, CheckInRequest, LogActionQuery,
            MaintenanceDetail, MaintenanceLoggedResponse, MaintenanceReportEntry, MessageResponse,
            ReplacementResponse, ReportQuery, SpareMaintenanceInput, SpareReplacementInput,
        },
    },
    AppState,
};

use super::AuthenticatedUser;

/// Add a spare to the catalog
#[utoipa::path(
    post,
    path = "/asset/AssetSpareOps/add-spare",
    tag = "spare_ops",
    security(("bearer_auth" = [])),
    request_body = CreateSpare,
    responses(
        (status = 200, description = "Spare added", body = AddSpareResponse),
        (status = 400, description = "Invalid spare", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_spare(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(spare): Json<CreateSpare>,
) -> AppResult<Json<AddSpareResponse>> {
    let spare_id = state.services.spare_ops.add_spare(spare).await?;
    Ok(Json(AddSpareResponse {
        message: "Spare added successfully.".to_string(),
        spare_id,
    }))
}

/// Log a checkout, check-in or scrap against an asset
#[utoipa::path(
    post,
    path = "/asset/AssetSpareOps/log-action",
    tag = "spare_ops",
    security(("bearer_auth" = [])),
    params(LogActionQuery),
    request_body = SpareMaintenanceInput,
    responses(
        (status = 200, description = "Action logged, approval pending", body = MaintenanceLoggedResponse),
        (status = 400, description = "Unknown action type or invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Spare or asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn log_action(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<LogActionQuery>,
    Json(input): Json<SpareMaintenanceInput>,
) -> AppResult<Json<MaintenanceLoggedResponse>> {
    let maintenance_id = state
        .services
        .spare_ops
        .log_action(input, &query.action_type)
        .await?;
    Ok(Json(MaintenanceLoggedResponse {
        message: format!("{} action logged successfully.", query.action_type.trim()),
        maintenance_id,
    }))
}

/// Replace a spare, scrapping the old one
#[utoipa::path(
    post,
    path = "/asset/AssetSpareOps/replacement",
    tag = "spare_ops",
    security(("bearer_auth" = [])),
    request_body = SpareReplacementInput,
    responses(
        (status = 200, description = "Spare replaced", body = ReplacementResponse),
        (status = 400, description = "No replacement spare given", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_spare(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(input): Json<SpareReplacementInput>,
) -> AppResult<Json<ReplacementResponse>> {
    let new_spare_id = state.services.spare_ops.replace(input).await?;
    Ok(Json(ReplacementResponse {
        message: "Spare replaced successfully.".to_string(),
        new_spare_id,
    }))
}

/// Check a spare back in, optionally replacing it
#[utoipa::path(
    post,
    path = "/asset/AssetSpareOps/checkin-full",
    tag = "spare_ops",
    security(("bearer_auth" = [])),
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Check-in logged", body = MaintenanceLoggedResponse),
        (status = 400, description = "Missing maintenance data", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_in(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<CheckInRequest>,
) -> AppResult<Json<MaintenanceLoggedResponse>> {
    let maintenance_id = state.services.spare_ops.check_in(request).await?;
    Ok(Json(MaintenanceLoggedResponse {
        message: "Check-in completed successfully.".to_string(),
        maintenance_id,
    }))
}

/// Approve or reject a pending maintenance record
#[utoipa::path(
    put,
    path = "/asset/AssetSpareOps/approve",
    tag = "spare_ops",
    security(("bearer_auth" = [])),
    params(ApproveQuery),
    responses(
        (status = 200, description = "Record decided", body = MessageResponse),
        (status = 400, description = "Status is not Approved or Rejected", body = crate::error::ErrorResponse),
        (status = 404, description = "Record or approval not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Already decided", body = crate::error::ErrorResponse)
    )
)]
pub async fn approve(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ApproveQuery>,
) -> AppResult<Json<MessageResponse>> {
    let decision = state.services.spare_ops.decide(query, claims.user_id).await?;
    Ok(Json(MessageResponse {
        message: format!("Record {}", decision.as_str()),
    }))
}

/// Maintenance history, newest issue first
#[utoipa::path(
    get,
    path = "/asset/AssetSpareOps/report",
    tag = "spare_ops",
    security(("bearer_auth" = [])),
    params(ReportQuery),
    responses(
        (status = 200, description = "Maintenance report", body = Vec<MaintenanceReportEntry>)
    )
)]
pub async fn report(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<MaintenanceReportEntry>>> {
    let entries = state.services.spare_ops.report(query.asset_id).await?;
    Ok(Json(entries))
}

/// One maintenance record with its approval and replacement
#[utoipa::path(
    get,
    path = "/asset/AssetSpareOps/maintenance/{id}",
    tag = "spare_ops",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance detail", body = MaintenanceDetail),
        (status = 404, description = "Maintenance record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn maintenance_detail(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceDetail>> {
    let detail = state.services.spare_ops.maintenance_detail(id).await?;
    Ok(Json(detail))
}

/// Latest maintenance status of every asset in an office
#[utoipa::path(
    get,
    path = "/asset/AssetSpareOps/all-assets/{office_id}",
    tag = "spare_ops",
    security(("bearer_auth" = [])),
    params(("office_id" = i32, Path, description = "Office ID")),
    responses(
        (status = 200, description = "Asset statuses", body = Vec<AssetMaintenanceStatus>)
    )
)]
pub async fn all_assets_by_office(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(office_id): Path<i32>,
) -> AppResult<Json<Vec<AssetMaintenanceStatus>>> {
    let statuses = state.services.spare_ops.asset_statuses(office_id).await?;
    Ok(Json(statuses))
}
