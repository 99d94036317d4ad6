//! Spare lifecycle persistence
//!
//! Each write runs in one transaction opened with `pool.begin()`; returning
//! early with an error drops the transaction, which rolls it back.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::{spares::insert_spare, Repository};
use crate::{
    error::{AppError, AppResult},
    models::{
        spare::CreateSpare,
        spare_ops::{
            AssetMaintenanceStatus, MaintenanceDetail, MaintenanceReportEntry, MaintenanceRow,
            NewMaintenance, NewReplacement, ReplacementSpare, SpareApproval, SpareDecision,
            SpareReplacement, APPROVAL_LEVEL, STATUS_PENDING,
        },
    },
    services::spare_ops::SpareOpsStore,
};

const MAINTENANCE_SELECT: &str = r#"
    SELECT m.id, m.asset_id, m.spare_id, m.action_type, m.issued_to, m.issued_by,
           m.issue_date, m.expected_return_date, m.actual_return_date, m.under_warranty,
           m.warranty_expiry, m.quantity, m.purpose, m.out_from, m.sent_to,
           m.return_condition, m.status, m.remarks, m.replacement_cost, m.scrap_value,
           m.net_cost, m.image_out, m.image_in,
           COALESCE(a.status, 'Pending') AS approval_status,
           m.created_at, m.updated_at
    FROM asset.asset_spare_maintenance m
    LEFT JOIN asset.asset_spare_approval a ON a.maintenance_id = m.id
"#;

/// Lock the spare row for the rest of the transaction so concurrent actions
/// on the same spare queue up behind each other
async fn lock_spare(conn: &mut PgConnection, spare_id: i32) -> AppResult<()> {
    sqlx::query_scalar::<_, i32>(
        "SELECT spare_id FROM asset.asset_spare_master WHERE spare_id = $1 FOR UPDATE",
    )
    .bind(spare_id)
    .fetch_optional(&mut *conn)
    .await?
    .map(|_| ())
    .ok_or_else(|| AppError::NotFound(format!("Spare {} not found", spare_id)))
}

async fn ensure_asset(conn: &mut PgConnection, asset_id: i32) -> AppResult<()> {
    sqlx::query_scalar::<_, i32>("SELECT asset_id FROM asset.asset_master WHERE asset_id = $1")
        .bind(asset_id)
        .fetch_optional(&mut *conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", asset_id)))
}

/// Insert the maintenance row and its level-1 pending approval, returning
/// the maintenance id
async fn insert_maintenance(conn: &mut PgConnection, record: &NewMaintenance) -> AppResult<i32> {
    lock_spare(conn, record.spare_id).await?;
    ensure_asset(conn, record.asset_id).await?;

    let maintenance_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO asset.asset_spare_maintenance (
            asset_id, spare_id, action_type, issued_to, issued_by, issue_date,
            expected_return_date, actual_return_date, under_warranty, warranty_expiry,
            quantity, purpose, out_from, sent_to, return_condition, status, remarks,
            replacement_cost, scrap_value, image_out, image_in, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, NOW(), NOW())
        RETURNING id
        "#,
    )
    .bind(record.asset_id)
    .bind(record.spare_id)
    .bind(record.action.as_str())
    .bind(record.issued_to)
    .bind(record.issued_by)
    .bind(record.issue_date)
    .bind(record.expected_return_date)
    .bind(record.actual_return_date)
    .bind(record.under_warranty)
    .bind(record.warranty_expiry)
    .bind(record.quantity)
    .bind(&record.purpose)
    .bind(&record.out_from)
    .bind(&record.sent_to)
    .bind(&record.return_condition)
    .bind(&record.status)
    .bind(&record.remarks)
    .bind(record.replacement_cost)
    .bind(record.scrap_value)
    .bind(&record.image_out)
    .bind(&record.image_in)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO asset.asset_spare_approval (maintenance_id, action_type, approver_id, approval_level, status)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(maintenance_id)
    .bind(record.action.as_str())
    .bind(record.issued_to)
    .bind(APPROVAL_LEVEL)
    .bind(STATUS_PENDING)
    .execute(&mut *conn)
    .await?;

    Ok(maintenance_id)
}

/// Catalog id of the incoming part, inserting it when it is brand new
async fn resolve_new_spare(conn: &mut PgConnection, spare: &ReplacementSpare) -> AppResult<i32> {
    match spare {
        ReplacementSpare::Existing(id) => {
            sqlx::query_scalar::<_, i32>(
                "SELECT spare_id FROM asset.asset_spare_master WHERE spare_id = $1",
            )
            .bind(*id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Spare {} not found", id)))
        }
        ReplacementSpare::New(data) => insert_spare(conn, data).await,
    }
}

async fn insert_replacement(
    conn: &mut PgConnection,
    maintenance_id: i32,
    replacement: &NewReplacement,
    new_spare_id: i32,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO asset.asset_spare_replacement (
            maintenance_id, old_spare_id, new_spare_id, replaced_on,
            scrap_value, replacement_cost, remarks
        )
        VALUES ($1, $2, $3, NOW(), $4, $5, $6)
        "#,
    )
    .bind(maintenance_id)
    .bind(replacement.old_spare_id)
    .bind(new_spare_id)
    .bind(replacement.scrap_value)
    .bind(replacement.replacement_cost)
    .bind(&replacement.remarks)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl SpareOpsStore for Repository {
    async fn add_spare(&self, spare: CreateSpare) -> AppResult<i32> {
        let mut conn = self.pool.acquire().await?;
        insert_spare(&mut *conn, &spare).await
    }

    async fn log_action(&self, record: NewMaintenance) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;
        let maintenance_id = insert_maintenance(&mut *tx, &record).await?;
        tx.commit().await?;
        Ok(maintenance_id)
    }

    async fn replace(&self, scrap: NewMaintenance, replacement: NewReplacement) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let maintenance_id = insert_maintenance(&mut *tx, &scrap).await?;
        let new_spare_id = resolve_new_spare(&mut *tx, &replacement.new_spare).await?;
        insert_replacement(&mut *tx, maintenance_id, &replacement, new_spare_id).await?;

        tx.commit().await?;
        Ok(new_spare_id)
    }

    async fn check_in(
        &self,
        record: NewMaintenance,
        replacement: Option<NewReplacement>,
    ) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let maintenance_id = insert_maintenance(&mut *tx, &record).await?;
        if let Some(replacement) = replacement {
            let new_spare_id = resolve_new_spare(&mut *tx, &replacement.new_spare).await?;
            insert_replacement(&mut *tx, maintenance_id, &replacement, new_spare_id).await?;
        }

        tx.commit().await?;
        Ok(maintenance_id)
    }

    async fn decide(&self, decision: SpareDecision) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE asset.asset_spare_maintenance SET status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(decision.decision.as_str())
        .bind(decision.maintenance_id)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Maintenance record {} not found",
                decision.maintenance_id
            )));
        }

        let current: Option<String> = sqlx::query_scalar(
            "SELECT status FROM asset.asset_spare_approval WHERE maintenance_id = $1 FOR UPDATE",
        )
        .bind(decision.maintenance_id)
        .fetch_optional(&mut *tx)
        .await?;

        match current.as_deref() {
            None => {
                return Err(AppError::NotFound(format!(
                    "No approval record for maintenance {}",
                    decision.maintenance_id
                )))
            }
            Some(STATUS_PENDING) => {}
            Some(status) => {
                return Err(AppError::Conflict(format!(
                    "Maintenance {} was already {}",
                    decision.maintenance_id, status
                )))
            }
        }

        sqlx::query(
            r#"
            UPDATE asset.asset_spare_approval
            SET status = $1, approver_id = $2, comments = $3, approved_at = NOW()
            WHERE maintenance_id = $4 AND status = $5
            "#,
        )
        .bind(decision.decision.as_str())
        .bind(decision.approver_id)
        .bind(&decision.comments)
        .bind(decision.maintenance_id)
        .bind(STATUS_PENDING)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn report(&self, asset_id: Option<i32>) -> AppResult<Vec<MaintenanceRow>> {
        let rows = sqlx::query_as::<_, MaintenanceRow>(&format!(
            "{} WHERE ($1::INT IS NULL OR m.asset_id = $1) ORDER BY m.issue_date DESC, m.id DESC",
            MAINTENANCE_SELECT
        ))
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn maintenance_detail(&self, maintenance_id: i32) -> AppResult<MaintenanceDetail> {
        let row = sqlx::query_as::<_, MaintenanceRow>(&format!(
            "{} WHERE m.id = $1",
            MAINTENANCE_SELECT
        ))
        .bind(maintenance_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Maintenance record {} not found", maintenance_id))
        })?;

        let approval = sqlx::query_as::<_, SpareApproval>(
            r#"
            SELECT id, maintenance_id, action_type, approver_id, approval_level, status,
                   comments, approved_at
            FROM asset.asset_spare_approval WHERE maintenance_id = $1
            "#,
        )
        .bind(maintenance_id)
        .fetch_optional(&self.pool)
        .await?;

        let replacement = sqlx::query_as::<_, SpareReplacement>(
            r#"
            SELECT id, maintenance_id, old_spare_id, new_spare_id, replaced_on,
                   scrap_value, replacement_cost, remarks
            FROM asset.asset_spare_replacement WHERE maintenance_id = $1
            "#,
        )
        .bind(maintenance_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(MaintenanceDetail {
            record: MaintenanceReportEntry::from(row),
            approval,
            replacement,
        })
    }

    async fn asset_statuses(&self, office_id: i32) -> AppResult<Vec<AssetMaintenanceStatus>> {
        let rows = sqlx::query_as::<_, AssetMaintenanceStatus>(
            r#"
            SELECT am.asset_id AS id,
                   am.asset_name,
                   COALESCE(m.id, 0) AS maintenance_id,
                   COALESCE(m.status, 'N/A') AS maintenance_status,
                   COALESCE(m.out_from, '') AS out_from,
                   COALESCE(m.sent_to, '') AS sent_to,
                   COALESCE(a.status, 'Pending') AS approval_status
            FROM asset.asset_master am
            LEFT JOIN LATERAL (
                SELECT id, status, out_from, sent_to
                FROM asset.asset_spare_maintenance
                WHERE asset_id = am.asset_id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) m ON TRUE
            LEFT JOIN asset.asset_spare_approval a ON a.maintenance_id = m.id
            WHERE am.office_id = $1
            ORDER BY am.asset_id
            "#,
        )
        .bind(office_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
