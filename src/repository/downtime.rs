//! Downtime report sources
//!
//! Spare intervals and service durations are read separately so that an
//! asset with several of each is not counted once per pairing. The spare
//! side is a left join, which keeps assets without history in the report.

use super::Repository;
use crate::{
    error::AppResult,
    models::downtime::{ServiceDuration, SpareInterval},
};

impl Repository {
    /// Every office asset, once per maintenance row (once with no dates when
    /// it has none)
    pub async fn downtime_spare_intervals(&self, office_id: i32) -> AppResult<Vec<SpareInterval>> {
        let rows = sqlx::query_as::<_, SpareInterval>(
            r#"
            SELECT am.asset_id, am.asset_name, m.issue_date, m.actual_return_date
            FROM asset.asset_master am
            LEFT JOIN asset.asset_spare_maintenance m ON m.asset_id = am.asset_id
            WHERE am.office_id = $1
            "#,
        )
        .bind(office_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn downtime_service_durations(&self, office_id: i32) -> AppResult<Vec<ServiceDuration>> {
        let rows = sqlx::query_as::<_, ServiceDuration>(
            r#"
            SELECT am.asset_id, am.asset_name, sr.days,
                   EXTRACT(EPOCH FROM sr.duration)::BIGINT AS duration_seconds
            FROM asset.asset_master am
            JOIN asset.asset_service_records sr ON sr.asset_id = am.asset_id
            WHERE am.office_id = $1
            "#,
        )
        .bind(office_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
