//! Asset registry methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::asset::{Asset, AssetInput},
};

const ASSET_COLUMNS: &str = r#"
    asset_id, asset_code, asset_name, asset_type_id, office_id, model_number,
    serial_number, purchase_date, warranty_expiry, last_service_date,
    next_service_date, manufacturer, supplier, is_active, created_on, created_by
"#;

impl Repository {
    /// Active assets of an office
    pub async fn assets_list_by_office(&self, office_id: i32) -> AppResult<Vec<Asset>> {
        let rows = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM asset.asset_master WHERE office_id = $1 AND is_active = TRUE ORDER BY asset_id",
            ASSET_COLUMNS
        ))
        .bind(office_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn assets_get_by_id(&self, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM asset.asset_master WHERE asset_id = $1",
            ASSET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Create an asset, returning its id
    pub async fn assets_create(&self, data: &AssetInput) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO asset.asset_master (
                asset_code, asset_name, asset_type_id, office_id, model_number,
                serial_number, purchase_date, warranty_expiry, last_service_date,
                next_service_date, manufacturer, supplier, is_active, created_on, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, TRUE, NOW(), $13)
            RETURNING asset_id
            "#,
        )
        .bind(&data.asset_code)
        .bind(&data.asset_name)
        .bind(data.asset_type_id)
        .bind(data.office_id)
        .bind(&data.model_number)
        .bind(&data.serial_number)
        .bind(data.purchase_date)
        .bind(data.warranty_expiry)
        .bind(data.last_service_date)
        .bind(data.next_service_date)
        .bind(&data.manufacturer)
        .bind(&data.supplier)
        .bind(&data.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Overwrite every editable column of an asset
    pub async fn assets_update(&self, id: i32, data: &AssetInput) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE asset.asset_master SET
                asset_code = $1, asset_name = $2, asset_type_id = $3, office_id = $4,
                model_number = $5, serial_number = $6, purchase_date = $7,
                warranty_expiry = $8, last_service_date = $9, next_service_date = $10,
                manufacturer = $11, supplier = $12, is_active = $13
            WHERE asset_id = $14
            "#,
        )
        .bind(&data.asset_code)
        .bind(&data.asset_name)
        .bind(data.asset_type_id)
        .bind(data.office_id)
        .bind(&data.model_number)
        .bind(&data.serial_number)
        .bind(data.purchase_date)
        .bind(data.warranty_expiry)
        .bind(data.last_service_date)
        .bind(data.next_service_date)
        .bind(&data.manufacturer)
        .bind(&data.supplier)
        .bind(data.is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }

    /// Soft delete: the row stays for the maintenance history
    pub async fn assets_deactivate(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE asset.asset_master SET is_active = FALSE WHERE asset_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }
}
