//! Asset service records and the service-due summary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::image;
use crate::error::{AppError, AppResult};

/// Row from `asset.asset_service_records`, interval flattened to seconds
#[derive(Debug, Clone, FromRow)]
pub struct ServiceRecordRow {
    pub id: i32,
    pub asset_id: i32,
    pub service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub image: Option<Vec<u8>>,
    pub remark: Option<String>,
    pub service_doc: Option<Vec<u8>>,
    pub service_cost: i32,
    pub serviced_by: Option<String>,
    pub approved_by: Option<String>,
    pub duration_seconds: Option<i64>,
    pub days: i32,
    pub is_approved: Option<bool>,
    pub is_rejected: Option<bool>,
    pub rejection_remark: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceRecord {
    pub id: i32,
    pub asset_id: i32,
    pub service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub remark: Option<String>,
    pub service_doc: Option<String>,
    pub service_cost: i32,
    pub serviced_by: Option<String>,
    pub approved_by: Option<String>,
    pub duration_minutes: Option<i64>,
    pub days: i32,
    pub is_approved: Option<bool>,
    pub is_rejected: Option<bool>,
    pub rejection_remark: Option<String>,
}

impl From<ServiceRecordRow> for ServiceRecord {
    fn from(row: ServiceRecordRow) -> Self {
        Self {
            image: image::encode(row.image.as_deref()),
            service_doc: image::encode(row.service_doc.as_deref()),
            duration_minutes: row.duration_seconds.map(|s| s / 60),
            id: row.id,
            asset_id: row.asset_id,
            service_date: row.service_date,
            next_service_date: row.next_service_date,
            remark: row.remark,
            service_cost: row.service_cost,
            serviced_by: row.serviced_by,
            approved_by: row.approved_by,
            days: row.days,
            is_approved: row.is_approved,
            is_rejected: row.is_rejected,
            rejection_remark: row.rejection_remark,
        }
    }
}

/// Save service record request; image and document are base64
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SaveServiceRecord {
    #[validate(range(min = 1, message = "asset_id must be positive"))]
    pub asset_id: i32,
    #[validate(required(message = "service_date is required"))]
    pub service_date: Option<NaiveDate>,
    #[validate(required(message = "next_service_date is required"))]
    pub next_service_date: Option<NaiveDate>,
    pub remark: Option<String>,
    #[serde(default)]
    pub service_cost: i32,
    pub serviced_by: Option<String>,
    pub approved_by: Option<String>,
    pub created_by: Option<String>,
    /// Up to one leap year of work
    #[validate(range(min = 0, max = 527040, message = "duration_minutes must be between 0 and 527040"))]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 0, max = 3660, message = "days must be between 0 and 3660"))]
    pub days: i32,
    pub is_approved: Option<bool>,
    pub is_rejected: Option<bool>,
    pub rejection_remark: Option<String>,
    pub image: Option<String>,
    pub service_doc: Option<String>,
}

/// Decoded service record ready for insertion
#[derive(Debug, Clone)]
pub struct NewServiceRecord {
    pub asset_id: i32,
    pub service_date: NaiveDate,
    pub next_service_date: NaiveDate,
    pub remark: Option<String>,
    pub service_cost: i32,
    pub serviced_by: Option<String>,
    pub approved_by: Option<String>,
    pub created_by: Option<String>,
    pub duration_minutes: Option<i64>,
    pub days: i32,
    pub is_approved: Option<bool>,
    pub is_rejected: Option<bool>,
    pub rejection_remark: Option<String>,
    pub image: Option<Vec<u8>>,
    pub service_doc: Option<Vec<u8>>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl NewServiceRecord {
    pub fn from_input(input: SaveServiceRecord) -> AppResult<Self> {
        input.validate()?;
        let (Some(service_date), Some(next_service_date)) =
            (input.service_date, input.next_service_date)
        else {
            return Err(AppError::Validation("Invalid input data.".to_string()));
        };

        Ok(Self {
            image: image::decode("image", input.image.as_deref())?,
            service_doc: image::decode("service_doc", input.service_doc.as_deref())?,
            asset_id: input.asset_id,
            service_date,
            next_service_date,
            remark: non_blank(input.remark),
            service_cost: input.service_cost,
            serviced_by: non_blank(input.serviced_by),
            approved_by: non_blank(input.approved_by),
            created_by: non_blank(input.created_by),
            duration_minutes: input.duration_minutes,
            days: input.days,
            is_approved: input.is_approved,
            is_rejected: input.is_rejected,
            rejection_remark: non_blank(input.rejection_remark),
        })
    }
}

/// Approve or reject a service record
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ServiceDecisionRequest {
    #[validate(range(min = 1, message = "record_id must be positive"))]
    pub record_id: i32,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_rejected: bool,
    pub rejection_remark: Option<String>,
    #[validate(length(min = 1, message = "approved_by is required"))]
    pub approved_by: String,
}

impl ServiceDecisionRequest {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        if self.approved_by.trim().is_empty() {
            return Err(AppError::Validation("approved_by is required".to_string()));
        }
        if self.is_approved && self.is_rejected {
            return Err(AppError::Validation(
                "Cannot approve and reject at the same time.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn rejection_remark(&self) -> Option<String> {
        non_blank(self.rejection_remark.clone())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ServiceHistoryQuery {
    pub asset_id: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ServiceDueQuery {
    /// date, week, month or year
    pub filter_type: String,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

/// Window of upcoming services to include next to the overdue ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueWindow {
    Range { from: NaiveDate, to: NaiveDate },
    Month { month: u32, year: i32 },
    Year(i32),
}

impl DueWindow {
    pub fn from_query(query: &ServiceDueQuery) -> AppResult<Self> {
        let invalid = || AppError::Validation("Invalid filter type or missing parameters".to_string());

        match query.filter_type.to_lowercase().as_str() {
            "date" | "week" => match (query.from_date, query.to_date) {
                (Some(from), Some(to)) => Ok(DueWindow::Range { from, to }),
                _ => Err(invalid()),
            },
            "month" => match (query.month, query.year) {
                (Some(month), Some(year)) if (1..=12).contains(&month) => Ok(DueWindow::Month {
                    month: month as u32,
                    year,
                }),
                _ => Err(invalid()),
            },
            "year" => query.year.map(DueWindow::Year).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    /// Inclusive date bounds of the window
    pub fn bounds(&self) -> AppResult<(NaiveDate, NaiveDate)> {
        let bad_date = || AppError::Validation("Invalid date window".to_string());
        match *self {
            DueWindow::Range { from, to } => Ok((from, to)),
            DueWindow::Month { month, year } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(bad_date)?;
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                }
                .ok_or_else(bad_date)?;
                Ok((first, next.pred_opt().ok_or_else(bad_date)?))
            }
            DueWindow::Year(year) => Ok((
                NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(bad_date)?,
                NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(bad_date)?,
            )),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ServiceDueRow {
    pub asset_id: i32,
    pub asset_name: Option<String>,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub is_approved: Option<bool>,
    pub is_rejected: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceDueEntry {
    pub asset_id: i32,
    pub asset_name: Option<String>,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    /// Overdue, Upcoming or Unknown
    pub status: String,
    /// Approved, Rejected or Pending
    pub approval_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ServiceDueCounts {
    pub overdue: i64,
    pub upcoming: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceDueSummary {
    pub summary: ServiceDueCounts,
    pub data: Vec<ServiceDueEntry>,
}

pub fn approval_status(is_approved: Option<bool>, is_rejected: Option<bool>) -> &'static str {
    if is_approved == Some(true) {
        "Approved"
    } else if is_rejected == Some(true) {
        "Rejected"
    } else {
        "Pending"
    }
}

impl ServiceDueSummary {
    pub fn build(rows: Vec<ServiceDueRow>, today: NaiveDate) -> Self {
        let mut summary = ServiceDueCounts::default();

        let data = rows
            .into_iter()
            .map(|row| {
                let status = match row.next_service_date {
                    Some(d) if d < today => {
                        summary.overdue += 1;
                        "Overdue"
                    }
                    Some(_) => {
                        summary.upcoming += 1;
                        "Upcoming"
                    }
                    None => "Unknown",
                };
                ServiceDueEntry {
                    approval_status: approval_status(row.is_approved, row.is_rejected).to_string(),
                    status: status.to_string(),
                    asset_id: row.asset_id,
                    asset_name: row.asset_name,
                    last_service_date: row.last_service_date,
                    next_service_date: row.next_service_date,
                }
            })
            .collect();

        summary.total = summary.overdue + summary.upcoming;
        Self { summary, data }
    }
}
