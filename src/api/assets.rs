//! Asset registry API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        asset::{Asset, AssetInput, AssetServiceSplit, OfficeQuery},
        spare_ops::MessageResponse,
    },
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
pub struct AssetCreatedResponse {
    pub message: String,
    pub asset_id: i32,
}

/// Active assets of an office
#[utoipa::path(
    get,
    path = "/asset/Asset",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(OfficeQuery),
    responses(
        (status = 200, description = "Asset list", body = Vec<Asset>)
    )
)]
pub async fn list_assets(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<OfficeQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.assets.list_by_office(query.office_id).await?;
    Ok(Json(assets))
}

/// Get asset by ID
#[utoipa::path(
    get,
    path = "/asset/Asset/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = Asset),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.assets.get_by_id(id).await?;
    Ok(Json(asset))
}

/// Register an asset
#[utoipa::path(
    post,
    path = "/asset/Asset",
    tag = "assets",
    security(("bearer_auth" = [])),
    request_body = AssetInput,
    responses(
        (status = 200, description = "Asset created", body = AssetCreatedResponse)
    )
)]
pub async fn create_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<AssetInput>,
) -> AppResult<Json<AssetCreatedResponse>> {
    let asset_id = state.services.assets.create(&data).await?;
    Ok(Json(AssetCreatedResponse {
        message: "Asset created successfully.".to_string(),
        asset_id,
    }))
}

/// Replace an asset record
#[utoipa::path(
    put,
    path = "/asset/Asset/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = AssetInput,
    responses(
        (status = 200, description = "Asset updated", body = MessageResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<AssetInput>,
) -> AppResult<Json<MessageResponse>> {
    state.services.assets.update(id, &data).await?;
    Ok(Json(MessageResponse {
        message: "Asset updated successfully.".to_string(),
    }))
}

/// Deactivate an asset
#[utoipa::path(
    delete,
    path = "/asset/Asset/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset deactivated", body = MessageResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.assets.deactivate(id).await?;
    Ok(Json(MessageResponse {
        message: "Asset deactivated successfully.".to_string(),
    }))
}

/// Office assets split into overdue and upcoming service
#[utoipa::path(
    get,
    path = "/asset/Asset/GetAssets",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(OfficeQuery),
    responses(
        (status = 200, description = "Assets by service date", body = AssetServiceSplit)
    )
)]
pub async fn service_split(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<OfficeQuery>,
) -> AppResult<Json<AssetServiceSplit>> {
    let split = state.services.assets.service_split(query.office_id).await?;
    Ok(Json(split))
}
