//! Spare catalog API endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        spare::{CreateSpare, SpareMaster, UpdateSpare},
        spare_ops::{AddSpareResponse, MessageResponse},
    },
    AppState,
};

use super::AuthenticatedUser;

/// Whole catalog, newest first
#[utoipa::path(
    get,
    path = "/asset/AssetSpare",
    tag = "spares",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Spare list", body = Vec<SpareMaster>)
    )
)]
pub async fn list_spares(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SpareMaster>>> {
    let spares = state.services.spares.list().await?;
    Ok(Json(spares))
}

#[utoipa::path(
    get,
    path = "/asset/AssetSpare/{id}",
    tag = "spares",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare ID")),
    responses(
        (status = 200, description = "Spare details", body = SpareMaster),
        (status = 404, description = "Spare not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_spare(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SpareMaster>> {
    let spare = state.services.spares.get_by_id(id).await?;
    Ok(Json(spare))
}

#[utoipa::path(
    post,
    path = "/asset/AssetSpare",
    tag = "spares",
    security(("bearer_auth" = [])),
    request_body = CreateSpare,
    responses(
        (status = 200, description = "Spare created", body = AddSpareResponse)
    )
)]
pub async fn create_spare(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateSpare>,
) -> AppResult<Json<AddSpareResponse>> {
    let spare_id = state.services.spares.create(&data).await?;
    Ok(Json(AddSpareResponse {
        message: "Spare created successfully.".to_string(),
        spare_id,
    }))
}

#[utoipa::path(
    put,
    path = "/asset/AssetSpare/{id}",
    tag = "spares",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare ID")),
    request_body = UpdateSpare,
    responses(
        (status = 200, description = "Spare updated", body = MessageResponse),
        (status = 400, description = "Code, name or unit of measure missing", body = crate::error::ErrorResponse),
        (status = 404, description = "Spare not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_spare(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSpare>,
) -> AppResult<Json<MessageResponse>> {
    state.services.spares.update(id, &data).await?;
    Ok(Json(MessageResponse {
        message: "Spare updated successfully.".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/asset/AssetSpare/{id}",
    tag = "spares",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare ID")),
    responses(
        (status = 200, description = "Spare deleted", body = MessageResponse),
        (status = 404, description = "Spare not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_spare(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.spares.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Spare deleted successfully.".to_string(),
    }))
}

/// Spares dedicated to an asset
#[utoipa::path(
    get,
    path = "/asset/AssetSpare/asset/{asset_id}",
    tag = "spares",
    security(("bearer_auth" = [])),
    params(("asset_id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Linked spares", body = Vec<SpareMaster>),
        (status = 404, description = "No spares linked", body = crate::error::ErrorResponse)
    )
)]
pub async fn spares_by_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(asset_id): Path<i32>,
) -> AppResult<Json<Vec<SpareMaster>>> {
    let spares = state.services.spares.by_asset(asset_id).await?;
    Ok(Json(spares))
}

/// Case-insensitive name search
#[utoipa::path(
    get,
    path = "/asset/AssetSpare/name/{spare_name}",
    tag = "spares",
    security(("bearer_auth" = [])),
    params(("spare_name" = String, Path, description = "Part of the spare name")),
    responses(
        (status = 200, description = "Matching spares", body = Vec<SpareMaster>),
        (status = 404, description = "No match", body = crate::error::ErrorResponse)
    )
)]
pub async fn spares_by_name(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(spare_name): Path<String>,
) -> AppResult<Json<Vec<SpareMaster>>> {
    let spares = state.services.spares.search_by_name(&spare_name).await?;
    Ok(Json(spares))
}
