//! Spare catalog model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_UNIT_OF_MEASURE: &str = "Piece";
pub const DEFAULT_CRITICALITY: &str = "Medium";

/// Catalog entry from `asset.asset_spare_master`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SpareMaster {
    pub spare_id: i32,
    pub spare_code: String,
    pub spare_name: String,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub specification: Option<String>,
    pub unit_of_measure: String,
    pub current_stock: i32,
    pub reorder_level: i32,
    pub reorder_quantity: i32,
    pub location: Option<String>,
    /// Asset this spare is dedicated to, if any
    pub linked_asset_id: Option<i32>,
    pub vendor_name: Option<String>,
    pub purchase_rate: Decimal,
    pub average_cost: Decimal,
    pub lead_time_days: i32,
    /// Low / Medium / High / Critical
    pub criticality: Option<String>,
    pub warranty_expiry: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set for parts introduced through a replacement or the add-spare flow
    pub is_new: bool,
}

/// Create spare request, also used as the "brand new part" payload of a
/// replacement
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Validate, ToSchema)]
pub struct CreateSpare {
    #[validate(length(min = 1, max = 50, message = "Spare code is required"))]
    pub spare_code: String,
    #[validate(length(min = 1, max = 200, message = "Spare name is required"))]
    pub spare_name: String,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub specification: Option<String>,
    pub unit_of_measure: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub current_stock: Option<i32>,
    pub reorder_level: Option<i32>,
    pub reorder_quantity: Option<i32>,
    pub location: Option<String>,
    pub linked_asset_id: Option<i32>,
    pub vendor_name: Option<String>,
    pub purchase_rate: Option<Decimal>,
    pub average_cost: Option<Decimal>,
    pub lead_time_days: Option<i32>,
    pub criticality: Option<String>,
    pub warranty_expiry: Option<NaiveDate>,
    pub remarks: Option<String>,
}

/// Update spare request. Code, name and unit of measure must be supplied.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateSpare {
    #[validate(required(message = "spare_code is required"))]
    pub spare_code: Option<String>,
    #[validate(required(message = "spare_name is required"))]
    pub spare_name: Option<String>,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub specification: Option<String>,
    #[validate(required(message = "unit_of_measure is required"))]
    pub unit_of_measure: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub current_stock: Option<i32>,
    pub reorder_level: Option<i32>,
    pub reorder_quantity: Option<i32>,
    pub location: Option<String>,
    pub linked_asset_id: Option<i32>,
    pub vendor_name: Option<String>,
    pub purchase_rate: Option<Decimal>,
    pub average_cost: Option<Decimal>,
    pub lead_time_days: Option<i32>,
    pub criticality: Option<String>,
    pub warranty_expiry: Option<NaiveDate>,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_code_and_name() {
        let spare = CreateSpare {
            spare_code: "SP-99".to_string(),
            spare_name: String::new(),
            ..Default::default()
        };
        let errors = spare.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("spare_name"));
        assert!(!errors.field_errors().contains_key("spare_code"));
    }

    #[test]
    fn test_update_requires_unit_of_measure() {
        let update: UpdateSpare = serde_json::from_value(serde_json::json!({
            "spare_code": "SP-1",
            "spare_name": "Bearing"
        }))
        .unwrap();
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("unit_of_measure"));
    }
}
