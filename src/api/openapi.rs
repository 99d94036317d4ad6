//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, auth, downtime, health, service_records, spare_ops, spares};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vaulterp Asset API",
        version = "0.3.0",
        description = "Asset registry, spare lifecycle and service records REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Spare lifecycle
        spare_ops::add_spare,
        spare_ops::log_action,
        spare_ops::replace_spare,
        spare_ops::check_in,
        spare_ops::approve,
        spare_ops::report,
        spare_ops::maintenance_detail,
        spare_ops::all_assets_by_office,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::service_split,
        // Spare catalog
        spares::list_spares,
        spares::get_spare,
        spares::create_spare,
        spares::update_spare,
        spares::delete_spare,
        spares::spares_by_asset,
        spares::spares_by_name,
        // Service records
        service_records::service_history,
        service_records::save_service_record,
        service_records::approve_or_reject,
        service_records::service_due_summary,
        // Downtime
        downtime::final_report,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::UserInfo,
            // Spare lifecycle
            crate::models::spare_ops::SpareMaintenanceInput,
            crate::models::spare_ops::SpareReplacementInput,
            crate::models::spare_ops::CheckInRequest,
            crate::models::spare_ops::MaintenanceReportEntry,
            crate::models::spare_ops::MaintenanceDetail,
            crate::models::spare_ops::SpareApproval,
            crate::models::spare_ops::SpareReplacement,
            crate::models::spare_ops::AssetMaintenanceStatus,
            crate::models::spare_ops::AddSpareResponse,
            crate::models::spare_ops::MaintenanceLoggedResponse,
            crate::models::spare_ops::ReplacementResponse,
            crate::models::spare_ops::MessageResponse,
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::AssetInput,
            crate::models::asset::AssetServiceSplit,
            assets::AssetCreatedResponse,
            // Spare catalog
            crate::models::spare::SpareMaster,
            crate::models::spare::CreateSpare,
            crate::models::spare::UpdateSpare,
            // Service records
            crate::models::service_record::ServiceRecord,
            crate::models::service_record::SaveServiceRecord,
            crate::models::service_record::ServiceDecisionRequest,
            crate::models::service_record::ServiceDueSummary,
            crate::models::service_record::ServiceDueCounts,
            crate::models::service_record::ServiceDueEntry,
            service_records::ServiceRecordSavedResponse,
            // Downtime
            crate::models::downtime::AssetDowntime,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "spare_ops", description = "Spare checkout, check-in, scrap, replacement and approval"),
        (name = "assets", description = "Asset registry"),
        (name = "spares", description = "Spare catalog"),
        (name = "service_records", description = "Asset service records"),
        (name = "downtime", description = "Downtime reporting")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
