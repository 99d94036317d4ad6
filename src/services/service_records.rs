//! Asset service record service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::service_record::{
        DueWindow, NewServiceRecord, SaveServiceRecord, ServiceDecisionRequest, ServiceDueQuery,
        ServiceDueSummary, ServiceRecord,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ServiceRecordsService {
    repository: Repository,
}

impl ServiceRecordsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn history(&self, asset_id: i32) -> AppResult<Vec<ServiceRecord>> {
        let rows = self.repository.service_records_by_asset(asset_id).await?;
        Ok(rows.into_iter().map(ServiceRecord::from).collect())
    }

    pub async fn save(&self, input: SaveServiceRecord) -> AppResult<i32> {
        let record = NewServiceRecord::from_input(input)?;
        let id = self.repository.service_records_save(&record).await?;
        tracing::info!(
            record_id = id,
            asset_id = record.asset_id,
            next_service_date = %record.next_service_date,
            "Service record saved"
        );
        Ok(id)
    }

    pub async fn decide(&self, request: &ServiceDecisionRequest) -> AppResult<()> {
        request.check()?;
        self.repository.service_records_decide(request).await?;
        tracing::info!(
            record_id = request.record_id,
            approved = request.is_approved,
            rejected = request.is_rejected,
            "Service record decided"
        );
        Ok(())
    }

    pub async fn due_summary(&self, query: &ServiceDueQuery) -> AppResult<ServiceDueSummary> {
        let (from, to) = DueWindow::from_query(query)?.bounds()?;
        let rows = self.repository.service_records_due(from, to).await?;
        Ok(ServiceDueSummary::build(rows, Utc::now().date_naive()))
    }
}
