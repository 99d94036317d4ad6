//! Downtime report service

use crate::{
    error::AppResult,
    models::downtime::{aggregate, AssetDowntime},
    repository::Repository,
};

#[derive(Clone)]
pub struct DowntimeService {
    repository: Repository,
}

impl DowntimeService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn final_report(&self, office_id: i32) -> AppResult<Vec<AssetDowntime>> {
        let spares = self.repository.downtime_spare_intervals(office_id).await?;
        let services = self.repository.downtime_service_durations(office_id).await?;
        Ok(aggregate(spares, services))
    }
}
