//! Service record methods on Repository

use chrono::NaiveDate;
use sqlx::postgres::types::PgInterval;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::service_record::{NewServiceRecord, ServiceDecisionRequest, ServiceDueRow, ServiceRecordRow},
};

const MICROS_PER_MINUTE: i64 = 60_000_000;

fn minutes_to_interval(minutes: i64) -> AppResult<PgInterval> {
    let microseconds = minutes
        .checked_mul(MICROS_PER_MINUTE)
        .ok_or_else(|| AppError::Validation(format!("duration_minutes {} is out of range", minutes)))?;
    Ok(PgInterval {
        months: 0,
        days: 0,
        microseconds,
    })
}

impl Repository {
    /// Service history of an asset, most recent service first
    pub async fn service_records_by_asset(&self, asset_id: i32) -> AppResult<Vec<ServiceRecordRow>> {
        let rows = sqlx::query_as::<_, ServiceRecordRow>(
            r#"
            SELECT id, asset_id, service_date, next_service_date, image, remark, service_doc,
                   service_cost, serviced_by, approved_by,
                   EXTRACT(EPOCH FROM duration)::BIGINT AS duration_seconds,
                   days, is_approved, is_rejected, rejection_remark
            FROM asset.asset_service_records
            WHERE asset_id = $1
            ORDER BY service_date DESC NULLS LAST, id DESC
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Record a service and move the asset's service dates forward in the
    /// same transaction
    pub async fn service_records_save(&self, record: &NewServiceRecord) -> AppResult<i32> {
        let duration = record.duration_minutes.map(minutes_to_interval).transpose()?;
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE asset.asset_master
            SET last_service_date = $1, next_service_date = $2
            WHERE asset_id = $3
            "#,
        )
        .bind(record.service_date)
        .bind(record.next_service_date)
        .bind(record.asset_id)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", record.asset_id)));
        }

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO asset.asset_service_records (
                asset_id, service_date, next_service_date, image, remark, service_doc,
                service_cost, serviced_by, approved_by, duration, days, is_approved,
                is_rejected, rejection_remark, created_by, created_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW())
            RETURNING id
            "#,
        )
        .bind(record.asset_id)
        .bind(record.service_date)
        .bind(record.next_service_date)
        .bind(&record.image)
        .bind(&record.remark)
        .bind(&record.service_doc)
        .bind(record.service_cost)
        .bind(&record.serviced_by)
        .bind(&record.approved_by)
        .bind(duration)
        .bind(record.days)
        .bind(record.is_approved)
        .bind(record.is_rejected)
        .bind(&record.rejection_remark)
        .bind(&record.created_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    pub async fn service_records_decide(&self, request: &ServiceDecisionRequest) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE asset.asset_service_records
            SET is_approved = $1, is_rejected = $2, rejection_remark = $3, approved_by = $4
            WHERE id = $5
            "#,
        )
        .bind(request.is_approved)
        .bind(request.is_rejected)
        .bind(request.rejection_remark())
        .bind(request.approved_by.trim())
        .bind(request.record_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Service record {} not found",
                request.record_id
            )));
        }
        Ok(())
    }

    /// Assets overdue for service plus those due inside `[from, to]`, with
    /// the approval flags of the record matching their last service
    pub async fn service_records_due(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<ServiceDueRow>> {
        let rows = sqlx::query_as::<_, ServiceDueRow>(
            r#"
            SELECT am.asset_id, am.asset_name, am.last_service_date, am.next_service_date,
                   sr.is_approved, sr.is_rejected
            FROM asset.asset_master am
            LEFT JOIN LATERAL (
                SELECT is_approved, is_rejected
                FROM asset.asset_service_records
                WHERE asset_id = am.asset_id AND service_date = am.last_service_date
                ORDER BY id DESC
                LIMIT 1
            ) sr ON TRUE
            WHERE am.next_service_date IS NOT NULL
              AND (am.next_service_date < CURRENT_DATE
                   OR am.next_service_date BETWEEN $1 AND $2)
            ORDER BY am.next_service_date ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_interval() {
        let interval = minutes_to_interval(90).unwrap();
        assert_eq!(interval.microseconds, 5_400_000_000);
        assert_eq!((interval.months, interval.days), (0, 0));
    }

    #[test]
    fn test_minutes_to_interval_overflow() {
        assert!(matches!(
            minutes_to_interval(9_000_000_000_000),
            Err(AppError::Validation(_))
        ));
    }
}
