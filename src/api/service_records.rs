//! Asset service record API endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        service_record::{
            SaveServiceRecord, ServiceDecisionRequest, ServiceDueQuery, ServiceDueSummary,
            ServiceHistoryQuery, ServiceRecord,
        },
        spare_ops::MessageResponse,
    },
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceRecordSavedResponse {
    pub message: String,
    pub record_id: i32,
}

/// Service history of an asset
#[utoipa::path(
    get,
    path = "/assetservice/AssetServiceRecord/GetServiceHistory",
    tag = "service_records",
    security(("bearer_auth" = [])),
    params(ServiceHistoryQuery),
    responses(
        (status = 200, description = "Service history", body = Vec<ServiceRecord>)
    )
)]
pub async fn service_history(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ServiceHistoryQuery>,
) -> AppResult<Json<Vec<ServiceRecord>>> {
    let records = state.services.service_records.history(query.asset_id).await?;
    Ok(Json(records))
}

/// Record a service and update the asset's service dates
#[utoipa::path(
    post,
    path = "/assetservice/AssetServiceRecord/SaveServiceRecord",
    tag = "service_records",
    security(("bearer_auth" = [])),
    request_body = SaveServiceRecord,
    responses(
        (status = 200, description = "Service record saved", body = ServiceRecordSavedResponse),
        (status = 400, description = "Invalid input data", body = crate::error::ErrorResponse)
    )
)]
pub async fn save_service_record(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(input): Json<SaveServiceRecord>,
) -> AppResult<Json<ServiceRecordSavedResponse>> {
    let record_id = state.services.service_records.save(input).await?;
    Ok(Json(ServiceRecordSavedResponse {
        message: "Service record saved successfully.".to_string(),
        record_id,
    }))
}

#[utoipa::path(
    post,
    path = "/assetservice/AssetServiceRecord/ApproveOrReject",
    tag = "service_records",
    security(("bearer_auth" = [])),
    request_body = ServiceDecisionRequest,
    responses(
        (status = 200, description = "Service record decided", body = MessageResponse),
        (status = 400, description = "Invalid decision", body = crate::error::ErrorResponse),
        (status = 404, description = "Service record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn approve_or_reject(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<ServiceDecisionRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.service_records.decide(&request).await?;
    let outcome = if request.is_approved {
        "approved"
    } else if request.is_rejected {
        "rejected"
    } else {
        "updated"
    };
    Ok(Json(MessageResponse {
        message: format!("Service record {} successfully.", outcome),
    }))
}

/// Overdue services plus those due within the requested window
#[utoipa::path(
    get,
    path = "/assetservice/AssetServiceRecord/GetServiceDueSummary",
    tag = "service_records",
    security(("bearer_auth" = [])),
    params(ServiceDueQuery),
    responses(
        (status = 200, description = "Service due summary", body = ServiceDueSummary),
        (status = 400, description = "Invalid filter type or missing parameters", body = crate::error::ErrorResponse)
    )
)]
pub async fn service_due_summary(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ServiceDueQuery>,
) -> AppResult<Json<ServiceDueSummary>> {
    let summary = state.services.service_records.due_summary(&query).await?;
    Ok(Json(summary))
}
