//! Spare lifecycle service: logging, replacement, check-in and approval

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::{
        spare::CreateSpare,
        spare_ops::{
            ApprovalDecision, ApproveQuery, AssetMaintenanceStatus, CheckInRequest,
            MaintenanceDetail, MaintenanceReportEntry, MaintenanceRow, NewMaintenance,
            NewReplacement, SpareAction, SpareDecision, SpareMaintenanceInput,
            SpareReplacementInput,
        },
    },
};

/// Persistence for the spare lifecycle. Every write method is atomic: it
/// either commits all of its rows or none.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpareOpsStore: Send + Sync {
    /// Insert a catalog entry flagged as new, returning its id
    async fn add_spare(&self, spare: CreateSpare) -> AppResult<i32>;

    /// Maintenance row plus its pending approval; returns the maintenance id
    async fn log_action(&self, record: NewMaintenance) -> AppResult<i32>;

    /// Scrap of the old spare, new spare resolution and the replacement link;
    /// returns the new spare id
    async fn replace(&self, scrap: NewMaintenance, replacement: NewReplacement) -> AppResult<i32>;

    /// Check-in row, optionally with a replacement anchored on it; returns
    /// the check-in's maintenance id
    async fn check_in(
        &self,
        record: NewMaintenance,
        replacement: Option<NewReplacement>,
    ) -> AppResult<i32>;

    async fn decide(&self, decision: SpareDecision) -> AppResult<()>;

    async fn report(&self, asset_id: Option<i32>) -> AppResult<Vec<MaintenanceRow>>;

    async fn maintenance_detail(&self, maintenance_id: i32) -> AppResult<MaintenanceDetail>;

    async fn asset_statuses(&self, office_id: i32) -> AppResult<Vec<AssetMaintenanceStatus>>;
}

#[derive(Clone)]
pub struct SpareOpsService {
    store: Arc<dyn SpareOpsStore>,
}

impl SpareOpsService {
    pub fn new(store: Arc<dyn SpareOpsStore>) -> Self {
        Self { store }
    }

    pub async fn add_spare(&self, spare: CreateSpare) -> AppResult<i32> {
        validator::Validate::validate(&spare)?;
        let id = self.store.add_spare(spare).await?;
        tracing::info!(spare_id = id, "Spare added");
        Ok(id)
    }

    /// Log a checkout, check-in or scrap. The action type is parsed before
    /// anything touches the database.
    pub async fn log_action(&self, input: SpareMaintenanceInput, action_type: &str) -> AppResult<i32> {
        let action: SpareAction = action_type.parse()?;
        let record = NewMaintenance::from_input(input, action)?;
        let (spare_id, asset_id) = (record.spare_id, record.asset_id);

        let id = self.store.log_action(record).await?;
        tracing::info!(
            maintenance_id = id,
            spare_id,
            asset_id,
            action = %action,
            "Spare action logged"
        );
        Ok(id)
    }

    pub async fn replace(&self, input: SpareReplacementInput) -> AppResult<i32> {
        let replacement = NewReplacement::from_input(input)?;
        let scrap = NewMaintenance::replacement_scrap(
            replacement.old_spare_id,
            replacement.asset_id,
            replacement.scrap_value,
        );
        let old_spare_id = replacement.old_spare_id;

        let new_spare_id = self.store.replace(scrap, replacement).await?;
        tracing::info!(old_spare_id, new_spare_id, "Spare replaced");
        Ok(new_spare_id)
    }

    pub async fn check_in(&self, request: CheckInRequest) -> AppResult<i32> {
        let maintenance = request
            .maintenance
            .ok_or_else(|| AppError::Validation("Maintenance data is required.".to_string()))?;
        let record = NewMaintenance::from_input(maintenance, SpareAction::Checkin)?;

        let replacement = if request.replacement_required {
            let input = request.replacement.ok_or_else(|| {
                AppError::Validation(
                    "Replacement data is required when replacement_required is set.".to_string(),
                )
            })?;
            Some(NewReplacement::from_input(input)?)
        } else {
            None
        };

        let with_replacement = replacement.is_some();
        let id = self.store.check_in(record, replacement).await?;
        tracing::info!(maintenance_id = id, with_replacement, "Spare checked in");
        Ok(id)
    }

    /// Approve or reject a pending record. `acting_user` stands in for a
    /// missing approver.
    pub async fn decide(&self, query: ApproveQuery, acting_user: i32) -> AppResult<ApprovalDecision> {
        let decision: ApprovalDecision = query.status.parse()?;
        if query.maintenance_id <= 0 {
            return Err(AppError::Validation("maintenanceId must be positive".to_string()));
        }

        self.store
            .decide(SpareDecision {
                maintenance_id: query.maintenance_id,
                decision,
                approver_id: Some(query.approved_by.unwrap_or(acting_user)),
                comments: query.comments.filter(|c| !c.trim().is_empty()),
            })
            .await?;

        tracing::info!(
            maintenance_id = query.maintenance_id,
            status = decision.as_str(),
            "Spare maintenance decided"
        );
        Ok(decision)
    }

    pub async fn report(&self, asset_id: Option<i32>) -> AppResult<Vec<MaintenanceReportEntry>> {
        let rows = self.store.report(asset_id).await?;
        Ok(rows.into_iter().map(MaintenanceReportEntry::from).collect())
    }

    pub async fn maintenance_detail(&self, maintenance_id: i32) -> AppResult<MaintenanceDetail> {
        self.store.maintenance_detail(maintenance_id).await
    }

    pub async fn asset_statuses(&self, office_id: i32) -> AppResult<Vec<AssetMaintenanceStatus>> {
        self.store.asset_statuses(office_id).await
    }
}
