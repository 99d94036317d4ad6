//! Asset downtime report

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// One spare maintenance interval of an office asset
#[derive(Debug, Clone, FromRow)]
pub struct SpareInterval {
    pub asset_id: i32,
    pub asset_name: String,
    pub issue_date: Option<DateTime<Utc>>,
    pub actual_return_date: Option<DateTime<Utc>>,
}

/// Service downtime recorded against an office asset
#[derive(Debug, Clone, FromRow)]
pub struct ServiceDuration {
    pub asset_id: i32,
    pub asset_name: String,
    pub days: i32,
    pub duration_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AssetDowntime {
    pub asset_id: i32,
    pub asset_name: String,
    /// `{h}h {m}m`
    pub total_spare_downtime: String,
    /// `{d}d {h}h {m}m`
    pub total_service_duration: String,
    /// `{d}d {h}h {m}m`
    pub total_asset_downtime: String,
}

/// Hours are not wrapped into days
pub fn format_hours(seconds: i64) -> String {
    format!("{}h {}m", seconds / HOUR, (seconds % HOUR) / MINUTE)
}

pub fn format_days(seconds: i64) -> String {
    format!(
        "{}d {}h {}m",
        seconds / DAY,
        (seconds % DAY) / HOUR,
        (seconds % HOUR) / MINUTE
    )
}

#[derive(Default)]
struct Totals {
    name: String,
    spare: i64,
    service: i64,
}

/// Sum spare and service downtime per asset, longest total first.
///
/// Spare intervals only count when both the issue and the actual return
/// dates are known.
pub fn aggregate(spares: Vec<SpareInterval>, services: Vec<ServiceDuration>) -> Vec<AssetDowntime> {
    let mut totals: HashMap<i32, Totals> = HashMap::new();

    for row in spares {
        let entry = totals.entry(row.asset_id).or_insert_with(|| Totals {
            name: row.asset_name.clone(),
            ..Default::default()
        });
        if let (Some(out), Some(back)) = (row.issue_date, row.actual_return_date) {
            entry.spare += (back - out).num_seconds();
        }
    }

    for row in services {
        let entry = totals.entry(row.asset_id).or_insert_with(|| Totals {
            name: row.asset_name.clone(),
            ..Default::default()
        });
        entry.service += i64::from(row.days) * DAY + row.duration_seconds.unwrap_or(0);
    }

    let mut ranked: Vec<(i32, Totals)> = totals.into_iter().collect();
    ranked.sort_by(|(a_id, a), (b_id, b)| {
        let a_total = (a.spare + a.service) / MINUTE;
        let b_total = (b.spare + b.service) / MINUTE;
        b_total.cmp(&a_total).then(a_id.cmp(b_id))
    });

    ranked
        .into_iter()
        .map(|(asset_id, t)| AssetDowntime {
            asset_id,
            asset_name: t.name,
            total_spare_downtime: format_hours(t.spare),
            total_service_duration: format_days(t.service),
            total_asset_downtime: format_days(t.spare + t.service),
        })
        .collect()
}
