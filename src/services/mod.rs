//! Business logic services

pub mod assets;
pub mod auth;
pub mod downtime;
pub mod service_records;
pub mod spare_ops;
pub mod spares;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub assets: assets::AssetsService,
    pub spares: spares::SparesService,
    pub spare_ops: spare_ops::SpareOpsService,
    pub service_records: service_records::ServiceRecordsService,
    pub downtime: downtime::DowntimeService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            assets: assets::AssetsService::new(repository.clone()),
            spares: spares::SparesService::new(repository.clone()),
            spare_ops: spare_ops::SpareOpsService::new(Arc::new(repository.clone())),
            service_records: service_records::ServiceRecordsService::new(repository.clone()),
            downtime: downtime::DowntimeService::new(repository.clone()),
            repository,
        }
    }

    /// Database reachability, for the readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
