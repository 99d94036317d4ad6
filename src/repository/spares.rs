//! Spare catalog methods on Repository

use rust_decimal::Decimal;
use sqlx::PgConnection;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::spare::{CreateSpare, SpareMaster, UpdateSpare, DEFAULT_CRITICALITY, DEFAULT_UNIT_OF_MEASURE},
};

const SPARE_COLUMNS: &str = r#"
    spare_id, spare_code, spare_name, part_number, category, specification,
    unit_of_measure, current_stock, reorder_level, reorder_quantity, location,
    linked_asset_id, vendor_name, purchase_rate, average_cost, lead_time_days,
    criticality, warranty_expiry, remarks, created_at, updated_at, is_new
"#;

/// Insert a catalog entry flagged `is_new`. Shared by the catalog, add-spare
/// and the replacement flows, which run it inside their own transaction.
pub(crate) async fn insert_spare(conn: &mut PgConnection, data: &CreateSpare) -> AppResult<i32> {
    let id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO asset.asset_spare_master (
            spare_code, spare_name, part_number, category, specification,
            unit_of_measure, current_stock, reorder_level, reorder_quantity, location,
            linked_asset_id, vendor_name, purchase_rate, average_cost, lead_time_days,
            criticality, warranty_expiry, remarks, created_at, updated_at, is_new
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                NOW(), NOW(), TRUE)
        RETURNING spare_id
        "#,
    )
    .bind(&data.spare_code)
    .bind(&data.spare_name)
    .bind(&data.part_number)
    .bind(&data.category)
    .bind(&data.specification)
    .bind(data.unit_of_measure.as_deref().unwrap_or(DEFAULT_UNIT_OF_MEASURE))
    .bind(data.current_stock.unwrap_or(0))
    .bind(data.reorder_level.unwrap_or(0))
    .bind(data.reorder_quantity.unwrap_or(0))
    .bind(&data.location)
    .bind(data.linked_asset_id)
    .bind(&data.vendor_name)
    .bind(data.purchase_rate.unwrap_or(Decimal::ZERO))
    .bind(data.average_cost.unwrap_or(Decimal::ZERO))
    .bind(data.lead_time_days.unwrap_or(0))
    .bind(data.criticality.as_deref().unwrap_or(DEFAULT_CRITICALITY))
    .bind(data.warranty_expiry)
    .bind(&data.remarks)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

impl Repository {
    /// Whole catalog, newest first
    pub async fn spares_list(&self) -> AppResult<Vec<SpareMaster>> {
        let rows = sqlx::query_as::<_, SpareMaster>(&format!(
            "SELECT {} FROM asset.asset_spare_master ORDER BY spare_id DESC",
            SPARE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn spares_get_by_id(&self, id: i32) -> AppResult<SpareMaster> {
        sqlx::query_as::<_, SpareMaster>(&format!(
            "SELECT {} FROM asset.asset_spare_master WHERE spare_id = $1",
            SPARE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Spare {} not found", id)))
    }

    /// Spares dedicated to an asset
    pub async fn spares_by_asset(&self, asset_id: i32) -> AppResult<Vec<SpareMaster>> {
        let rows = sqlx::query_as::<_, SpareMaster>(&format!(
            "SELECT {} FROM asset.asset_spare_master WHERE linked_asset_id = $1 ORDER BY spare_name",
            SPARE_COLUMNS
        ))
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Case-insensitive substring match on the spare name
    pub async fn spares_search_by_name(&self, name: &str) -> AppResult<Vec<SpareMaster>> {
        let rows = sqlx::query_as::<_, SpareMaster>(&format!(
            "SELECT {} FROM asset.asset_spare_master WHERE spare_name ILIKE $1 ORDER BY spare_name",
            SPARE_COLUMNS
        ))
        .bind(format!("%{}%", escape_like(name)))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn spares_create(&self, data: &CreateSpare) -> AppResult<i32> {
        let mut conn = self.pool.acquire().await?;
        insert_spare(&mut *conn, data).await
    }

    pub async fn spares_update(&self, id: i32, data: &UpdateSpare) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE asset.asset_spare_master SET
                spare_code = $1, spare_name = $2, part_number = $3, category = $4,
                specification = $5, unit_of_measure = $6, current_stock = $7,
                reorder_level = $8, reorder_quantity = $9, location = $10,
                linked_asset_id = $11, vendor_name = $12, purchase_rate = $13,
                average_cost = $14, lead_time_days = $15, criticality = $16,
                warranty_expiry = $17, remarks = $18, updated_at = NOW()
            WHERE spare_id = $19
            "#,
        )
        .bind(&data.spare_code)
        .bind(&data.spare_name)
        .bind(&data.part_number)
        .bind(&data.category)
        .bind(&data.specification)
        .bind(&data.unit_of_measure)
        .bind(data.current_stock.unwrap_or(0))
        .bind(data.reorder_level.unwrap_or(0))
        .bind(data.reorder_quantity.unwrap_or(0))
        .bind(&data.location)
        .bind(data.linked_asset_id)
        .bind(&data.vendor_name)
        .bind(data.purchase_rate.unwrap_or(Decimal::ZERO))
        .bind(data.average_cost.unwrap_or(Decimal::ZERO))
        .bind(data.lead_time_days.unwrap_or(0))
        .bind(&data.criticality)
        .bind(data.warranty_expiry)
        .bind(&data.remarks)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Spare {} not found", id)));
        }
        Ok(())
    }

    pub async fn spares_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM asset.asset_spare_master WHERE spare_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Spare {} not found", id)));
        }
        Ok(())
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
