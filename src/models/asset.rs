//! Asset registry model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Asset record from `asset.asset_master`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub asset_id: i32,
    pub asset_code: String,
    pub asset_name: String,
    pub asset_type_id: i32,
    /// Owning office / location
    pub office_id: i32,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub manufacturer: Option<String>,
    pub supplier: Option<String>,
    pub is_active: bool,
    pub created_on: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
}

/// Create or replace an asset. `PUT` overwrites every column, as the
/// registry screens always submit the full record.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssetInput {
    #[validate(length(min = 1, max = 50, message = "Asset code is required"))]
    pub asset_code: String,
    #[validate(length(min = 1, max = 200, message = "Asset name is required"))]
    pub asset_name: String,
    pub asset_type_id: i32,
    pub office_id: i32,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub manufacturer: Option<String>,
    pub supplier: Option<String>,
    /// Ignored on create
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_by: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Office filter shared by the asset listings
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OfficeQuery {
    pub office_id: i32,
}

/// Active assets split on whether their next service is already overdue
#[derive(Debug, Serialize, ToSchema)]
pub struct AssetServiceSplit {
    pub passed_service_dates: Vec<Asset>,
    pub upcoming_service_dates: Vec<Asset>,
}

impl AssetServiceSplit {
    /// Assets without a next service date count as upcoming.
    pub fn split(assets: Vec<Asset>, today: NaiveDate) -> Self {
        let (passed_service_dates, upcoming_service_dates) = assets
            .into_iter()
            .partition(|a| matches!(a.next_service_date, Some(d) if d < today));
        Self {
            passed_service_dates,
            upcoming_service_dates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: i32, next: Option<NaiveDate>) -> Asset {
        Asset {
            asset_id: id,
            asset_code: format!("AS-{}", id),
            asset_name: "Press".to_string(),
            asset_type_id: 1,
            office_id: 1,
            model_number: None,
            serial_number: None,
            purchase_date: None,
            warranty_expiry: None,
            last_service_date: None,
            next_service_date: next,
            manufacturer: None,
            supplier: None,
            is_active: true,
            created_on: None,
            created_by: None,
        }
    }

    #[test]
    fn test_split_by_next_service_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let split = AssetServiceSplit::split(
            vec![
                asset(1, NaiveDate::from_ymd_opt(2026, 3, 9)),
                asset(2, Some(today)),
                asset(3, None),
                asset(4, NaiveDate::from_ymd_opt(2025, 12, 1)),
            ],
            today,
        );

        let passed: Vec<i32> = split.passed_service_dates.iter().map(|a| a.asset_id).collect();
        let upcoming: Vec<i32> = split.upcoming_service_dates.iter().map(|a| a.asset_id).collect();
        assert_eq!(passed, vec![1, 4]);
        assert_eq!(upcoming, vec![2, 3]);
    }
}
