//! Spare lifecycle model: maintenance events, approvals and replacements

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{image, spare::CreateSpare};
use crate::error::{AppError, AppResult};

pub const STATUS_PENDING: &str = "Pending";
pub const APPROVAL_LEVEL: i16 = 1;
pub const REPLACEMENT_SCRAP_PURPOSE: &str = "Replacement - Scrap old spare";

/// Action logged against a (spare, asset) pair. Every variant is gated by a
/// single pending approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SpareAction {
    Checkout,
    Checkin,
    Scrap,
}

impl SpareAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpareAction::Checkout => "checkout",
            SpareAction::Checkin => "checkin",
            SpareAction::Scrap => "scrap",
        }
    }

    /// Scrap rows carry their value as a negative amount; that sign is what
    /// downstream cost reports key on.
    pub fn stored_scrap_value(&self, submitted: Decimal) -> Decimal {
        match self {
            SpareAction::Scrap => -submitted.abs(),
            _ => submitted,
        }
    }
}

impl fmt::Display for SpareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpareAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checkout" => Ok(SpareAction::Checkout),
            "checkin" => Ok(SpareAction::Checkin),
            "scrap" => Ok(SpareAction::Scrap),
            other => Err(AppError::Validation(format!(
                "Unknown action type '{}', expected checkout, checkin or scrap",
                other
            ))),
        }
    }
}

/// Outcome of the approval gate. Matching is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

impl ApprovalDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalDecision::Approved => "Approved",
            ApprovalDecision::Rejected => "Rejected",
        }
    }
}

impl FromStr for ApprovalDecision {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(ApprovalDecision::Approved),
            "Rejected" => Ok(ApprovalDecision::Rejected),
            _ => Err(AppError::Validation(
                "Status must be Approved or Rejected.".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Maintenance event payload as submitted by the spare screens
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SpareMaintenanceInput {
    pub spare_id: i32,
    pub asset_id: i32,
    pub issued_to: Option<i32>,
    pub issued_by: Option<i32>,
    /// Defaults to now
    pub issue_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub actual_return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub under_warranty: bool,
    pub warranty_expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replacement_cost: Decimal,
    /// Any sign is accepted; scrap actions always store the negative amount
    #[serde(default)]
    pub scrap_value: Decimal,
    #[validate(length(max = 100, message = "return_condition must be at most 100 characters"))]
    pub return_condition: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    #[validate(length(min = 1, max = 20, message = "Status must be 1-20 characters"))]
    pub status: Option<String>,
    pub purpose: Option<String>,
    #[validate(length(max = 200, message = "out_from must be at most 200 characters"))]
    pub out_from: Option<String>,
    #[validate(length(max = 200, message = "sent_to must be at most 200 characters"))]
    pub sent_to: Option<String>,
    /// Outbound condition photo, base64
    pub image_out_base64: Option<String>,
    /// Inbound condition photo, base64
    pub image_in_base64: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogActionQuery {
    /// checkout, checkin or scrap (case-insensitive)
    pub action_type: String,
}

/// Retire a spare and put another one in its place
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SpareReplacementInput {
    pub old_spare_id: i32,
    pub asset_id: i32,
    /// Take `new_spare_id` from the catalog instead of creating `new_spare`
    #[serde(default)]
    pub use_existing_spare: bool,
    pub new_spare_id: Option<i32>,
    #[validate(nested)]
    pub new_spare: Option<CreateSpare>,
    #[serde(default)]
    pub scrap_value: Decimal,
    #[serde(default)]
    pub replacement_cost: Decimal,
    pub remarks: Option<String>,
}

/// Check-in with an optional replacement riding on the check-in record
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckInRequest {
    pub maintenance: Option<SpareMaintenanceInput>,
    #[serde(default)]
    pub replacement_required: bool,
    pub replacement: Option<SpareReplacementInput>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ApproveQuery {
    pub maintenance_id: i32,
    /// Approved or Rejected
    pub status: String,
    /// Defaults to the authenticated user
    pub approved_by: Option<i32>,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    pub asset_id: Option<i32>,
}

// ---------------------------------------------------------------------------
// Normalized commands handed to the store
// ---------------------------------------------------------------------------

/// Maintenance row ready for insertion: scrap sign applied, images decoded,
/// defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenance {
    pub action: SpareAction,
    pub spare_id: i32,
    pub asset_id: i32,
    pub issued_to: Option<i32>,
    pub issued_by: Option<i32>,
    pub issue_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub under_warranty: bool,
    pub warranty_expiry: Option<DateTime<Utc>>,
    pub replacement_cost: Decimal,
    pub scrap_value: Decimal,
    pub return_condition: Option<String>,
    pub quantity: i32,
    pub status: String,
    pub purpose: Option<String>,
    pub out_from: Option<String>,
    pub sent_to: Option<String>,
    pub image_out: Option<Vec<u8>>,
    pub image_in: Option<Vec<u8>>,
    pub remarks: Option<String>,
}

impl NewMaintenance {
    pub fn from_input(input: SpareMaintenanceInput, action: SpareAction) -> AppResult<Self> {
        input.validate()?;

        let image_out = image::decode("image_out_base64", input.image_out_base64.as_deref())?;
        let image_in = image::decode("image_in_base64", input.image_in_base64.as_deref())?;

        Ok(Self {
            action,
            spare_id: input.spare_id,
            asset_id: input.asset_id,
            issued_to: input.issued_to,
            issued_by: input.issued_by,
            issue_date: input.issue_date.unwrap_or_else(Utc::now),
            expected_return_date: input.expected_return_date,
            actual_return_date: input.actual_return_date,
            under_warranty: input.under_warranty,
            warranty_expiry: input.warranty_expiry,
            replacement_cost: input.replacement_cost,
            scrap_value: action.stored_scrap_value(input.scrap_value),
            return_condition: input.return_condition,
            quantity: input.quantity.unwrap_or(1),
            status: input.status.unwrap_or_else(|| STATUS_PENDING.to_string()),
            purpose: input.purpose,
            out_from: input.out_from,
            sent_to: input.sent_to,
            image_out,
            image_in,
            remarks: input.remarks,
        })
    }

    /// Scrap event for the part leaving service in a standalone replacement
    pub fn replacement_scrap(old_spare_id: i32, asset_id: i32, scrap_value: Decimal) -> Self {
        Self {
            action: SpareAction::Scrap,
            spare_id: old_spare_id,
            asset_id,
            issued_to: None,
            issued_by: None,
            issue_date: Utc::now(),
            expected_return_date: None,
            actual_return_date: None,
            under_warranty: false,
            warranty_expiry: None,
            replacement_cost: Decimal::ZERO,
            scrap_value: SpareAction::Scrap.stored_scrap_value(scrap_value),
            return_condition: None,
            quantity: 1,
            status: STATUS_PENDING.to_string(),
            purpose: Some(REPLACEMENT_SCRAP_PURPOSE.to_string()),
            out_from: None,
            sent_to: None,
            image_out: None,
            image_in: None,
            remarks: None,
        }
    }
}

/// Where the incoming part comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ReplacementSpare {
    Existing(i32),
    New(CreateSpare),
}

/// Old-to-new link, resolved and validated
#[derive(Debug, Clone, PartialEq)]
pub struct NewReplacement {
    pub old_spare_id: i32,
    pub asset_id: i32,
    pub new_spare: ReplacementSpare,
    /// Recorded as submitted; only the maintenance row is sign-encoded
    pub scrap_value: Decimal,
    pub replacement_cost: Decimal,
    pub remarks: Option<String>,
}

impl NewReplacement {
    pub fn from_input(input: SpareReplacementInput) -> AppResult<Self> {
        input.validate()?;

        let new_spare = match (input.use_existing_spare, input.new_spare_id, input.new_spare) {
            (true, Some(id), _) => ReplacementSpare::Existing(id),
            (_, _, Some(definition)) => ReplacementSpare::New(definition),
            _ => {
                return Err(AppError::Validation(
                    "Either use_existing_spare with new_spare_id or a new_spare definition is required"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            old_spare_id: input.old_spare_id,
            asset_id: input.asset_id,
            new_spare,
            scrap_value: input.scrap_value,
            replacement_cost: input.replacement_cost,
            remarks: input.remarks,
        })
    }
}

/// Validated approve/reject command
#[derive(Debug, Clone, PartialEq)]
pub struct SpareDecision {
    pub maintenance_id: i32,
    pub decision: ApprovalDecision,
    pub approver_id: Option<i32>,
    pub comments: Option<String>,
}

// ---------------------------------------------------------------------------
// Stored rows and report shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SpareApproval {
    pub id: i32,
    pub maintenance_id: i32,
    pub action_type: String,
    pub approver_id: Option<i32>,
    pub approval_level: i16,
    pub status: String,
    pub comments: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SpareReplacement {
    pub id: i32,
    pub maintenance_id: i32,
    pub old_spare_id: i32,
    pub new_spare_id: i32,
    pub replaced_on: DateTime<Utc>,
    pub scrap_value: Decimal,
    pub replacement_cost: Decimal,
    pub remarks: Option<String>,
}

/// Maintenance row joined with its approval status
#[derive(Debug, Clone, FromRow)]
pub struct MaintenanceRow {
    pub id: i32,
    pub asset_id: i32,
    pub spare_id: i32,
    pub action_type: String,
    pub issued_to: Option<i32>,
    pub issued_by: Option<i32>,
    pub issue_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub under_warranty: bool,
    pub warranty_expiry: Option<DateTime<Utc>>,
    pub quantity: i32,
    pub purpose: Option<String>,
    pub out_from: Option<String>,
    pub sent_to: Option<String>,
    pub return_condition: Option<String>,
    pub status: String,
    pub remarks: Option<String>,
    pub replacement_cost: Decimal,
    pub scrap_value: Decimal,
    pub net_cost: Decimal,
    pub image_out: Option<Vec<u8>>,
    pub image_in: Option<Vec<u8>>,
    pub approval_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Report line. Scrap value is shown as a magnitude, the action type says
/// what it was.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaintenanceReportEntry {
    pub id: i32,
    pub asset_id: i32,
    pub spare_id: i32,
    pub action_type: String,
    pub issued_to: Option<i32>,
    pub issued_by: Option<i32>,
    pub issue_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub under_warranty: bool,
    pub warranty_expiry: Option<DateTime<Utc>>,
    pub quantity: i32,
    pub purpose: Option<String>,
    pub out_from: Option<String>,
    pub sent_to: Option<String>,
    pub return_condition: Option<String>,
    pub status: String,
    pub approval_status: String,
    pub remarks: Option<String>,
    pub replacement_cost: Decimal,
    pub scrap_value: Decimal,
    pub net_cost: Decimal,
    pub image_out_base64: Option<String>,
    pub image_in_base64: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MaintenanceRow> for MaintenanceReportEntry {
    fn from(row: MaintenanceRow) -> Self {
        Self {
            image_out_base64: image::encode(row.image_out.as_deref()),
            image_in_base64: image::encode(row.image_in.as_deref()),
            scrap_value: row.scrap_value.abs(),
            id: row.id,
            asset_id: row.asset_id,
            spare_id: row.spare_id,
            action_type: row.action_type,
            issued_to: row.issued_to,
            issued_by: row.issued_by,
            issue_date: row.issue_date,
            expected_return_date: row.expected_return_date,
            actual_return_date: row.actual_return_date,
            under_warranty: row.under_warranty,
            warranty_expiry: row.warranty_expiry,
            quantity: row.quantity,
            purpose: row.purpose,
            out_from: row.out_from,
            sent_to: row.sent_to,
            return_condition: row.return_condition,
            status: row.status,
            approval_status: row.approval_status,
            remarks: row.remarks,
            replacement_cost: row.replacement_cost,
            net_cost: row.net_cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One maintenance event with its approval and any replacement it anchors
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaintenanceDetail {
    pub record: MaintenanceReportEntry,
    pub approval: Option<SpareApproval>,
    pub replacement: Option<SpareReplacement>,
}

/// Latest maintenance snapshot per asset of an office
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AssetMaintenanceStatus {
    pub id: i32,
    pub asset_name: String,
    /// 0 when the asset has no maintenance history
    pub maintenance_id: i32,
    /// "N/A" when the asset has no maintenance history
    pub maintenance_status: String,
    pub out_from: String,
    pub sent_to: String,
    pub approval_status: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, ToSchema)]
pub struct AddSpareResponse {
    pub message: String,
    #[serde(rename = "SpareId")]
    pub spare_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceLoggedResponse {
    pub message: String,
    #[serde(rename = "MaintenanceId")]
    pub maintenance_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReplacementResponse {
    pub message: String,
    #[serde(rename = "NewSpareId")]
    pub new_spare_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_action_type_parsing_is_case_insensitive() {
        assert_eq!("CheckOut".parse::<SpareAction>().unwrap(), SpareAction::Checkout);
        assert_eq!("CheckIn".parse::<SpareAction>().unwrap(), SpareAction::Checkin);
        assert_eq!(" scrap ".parse::<SpareAction>().unwrap(), SpareAction::Scrap);
        assert!("return".parse::<SpareAction>().is_err());
    }

    #[test]
    fn test_scrap_value_is_always_negative_magnitude() {
        for submitted in [dec(50), dec(-50)] {
            assert_eq!(SpareAction::Scrap.stored_scrap_value(submitted), dec(-50));
        }
        assert_eq!(SpareAction::Checkout.stored_scrap_value(dec(50)), dec(50));
        assert_eq!(SpareAction::Checkin.stored_scrap_value(dec(-5)), dec(-5));
        assert_eq!(SpareAction::Scrap.stored_scrap_value(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_decision_matching_is_exact() {
        assert_eq!("Approved".parse::<ApprovalDecision>().unwrap(), ApprovalDecision::Approved);
        assert_eq!("Rejected".parse::<ApprovalDecision>().unwrap(), ApprovalDecision::Rejected);
        assert!("approved".parse::<ApprovalDecision>().is_err());
        assert!("Pending".parse::<ApprovalDecision>().is_err());
    }

    #[test]
    fn test_new_maintenance_defaults() {
        let input = SpareMaintenanceInput {
            spare_id: 10,
            asset_id: 5,
            scrap_value: dec(120),
            ..Default::default()
        };
        let row = NewMaintenance::from_input(input, SpareAction::Scrap).unwrap();
        assert_eq!(row.status, STATUS_PENDING);
        assert_eq!(row.quantity, 1);
        assert_eq!(row.scrap_value, dec(-120));
        assert_eq!(row.image_out, None);
        assert_eq!(row.image_in, None);
    }

    #[test]
    fn test_new_maintenance_rejects_zero_quantity() {
        let input = SpareMaintenanceInput {
            spare_id: 10,
            asset_id: 5,
            quantity: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            NewMaintenance::from_input(input, SpareAction::Checkout),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_location_labels_fit_their_columns() {
        let input = SpareMaintenanceInput {
            spare_id: 10,
            asset_id: 5,
            sent_to: Some("x".repeat(201)),
            ..Default::default()
        };
        assert!(matches!(
            NewMaintenance::from_input(input, SpareAction::Checkout),
            Err(AppError::Validation(_))
        ));

        let input = SpareMaintenanceInput {
            spare_id: 10,
            asset_id: 5,
            return_condition: Some("c".repeat(101)),
            ..Default::default()
        };
        assert!(matches!(
            NewMaintenance::from_input(input, SpareAction::Checkin),
            Err(AppError::Validation(_))
        ));

        let input = SpareMaintenanceInput {
            spare_id: 10,
            asset_id: 5,
            out_from: Some("w".repeat(200)),
            return_condition: Some("c".repeat(100)),
            ..Default::default()
        };
        assert!(NewMaintenance::from_input(input, SpareAction::Checkin).is_ok());
    }

    #[test]
    fn test_replacement_resolution() {
        let existing = SpareReplacementInput {
            old_spare_id: 10,
            asset_id: 5,
            use_existing_spare: true,
            new_spare_id: Some(42),
            ..Default::default()
        };
        assert_eq!(
            NewReplacement::from_input(existing).unwrap().new_spare,
            ReplacementSpare::Existing(42)
        );

        let definition = CreateSpare {
            spare_code: "SP-99".to_string(),
            spare_name: "Bearing".to_string(),
            ..Default::default()
        };
        let brand_new = SpareReplacementInput {
            old_spare_id: 10,
            asset_id: 5,
            new_spare_id: Some(42),
            new_spare: Some(definition.clone()),
            ..Default::default()
        };
        assert_eq!(
            NewReplacement::from_input(brand_new).unwrap().new_spare,
            ReplacementSpare::New(definition)
        );

        let neither = SpareReplacementInput {
            old_spare_id: 10,
            asset_id: 5,
            use_existing_spare: true,
            ..Default::default()
        };
        assert!(NewReplacement::from_input(neither).is_err());
    }

    #[test]
    fn test_report_entry_shows_scrap_magnitude() {
        let now = Utc::now();
        let row = MaintenanceRow {
            id: 1,
            asset_id: 5,
            spare_id: 10,
            action_type: "scrap".to_string(),
            issued_to: None,
            issued_by: None,
            issue_date: now,
            expected_return_date: None,
            actual_return_date: None,
            under_warranty: false,
            warranty_expiry: None,
            quantity: 1,
            purpose: None,
            out_from: None,
            sent_to: None,
            return_condition: None,
            status: STATUS_PENDING.to_string(),
            remarks: None,
            replacement_cost: dec(200),
            scrap_value: dec(-50),
            net_cost: dec(150),
            image_out: Some(vec![1, 2, 3]),
            image_in: None,
            approval_status: STATUS_PENDING.to_string(),
            created_at: now,
            updated_at: now,
        };
        let entry = MaintenanceReportEntry::from(row);
        assert_eq!(entry.scrap_value, dec(50));
        assert_eq!(entry.image_out_base64.as_deref(), Some("AQID"));
        assert_eq!(entry.image_in_base64, None);
    }

    #[test]
    fn test_response_envelope_keys() {
        let body = serde_json::to_value(MaintenanceLoggedResponse {
            message: "ok".to_string(),
            maintenance_id: 7,
        })
        .unwrap();
        assert_eq!(body["MaintenanceId"], 7);
        assert_eq!(body["message"], "ok");
    }
}
