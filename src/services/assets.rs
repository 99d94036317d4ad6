//! Asset registry service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppResult,
    models::asset::{Asset, AssetInput, AssetServiceSplit},
    repository::Repository,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_by_office(&self, office_id: i32) -> AppResult<Vec<Asset>> {
        self.repository.assets_list_by_office(office_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        self.repository.assets_get_by_id(id).await
    }

    pub async fn create(&self, data: &AssetInput) -> AppResult<i32> {
        data.validate()?;
        let id = self.repository.assets_create(data).await?;
        tracing::info!(asset_id = id, office_id = data.office_id, "Asset created");
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: &AssetInput) -> AppResult<()> {
        data.validate()?;
        self.repository.assets_update(id, data).await
    }

    pub async fn deactivate(&self, id: i32) -> AppResult<()> {
        self.repository.assets_deactivate(id).await?;
        tracing::info!(asset_id = id, "Asset deactivated");
        Ok(())
    }

    /// Active assets of an office split on overdue next service
    pub async fn service_split(&self, office_id: i32) -> AppResult<AssetServiceSplit> {
        let assets = self.repository.assets_list_by_office(office_id).await?;
        Ok(AssetServiceSplit::split(assets, Utc::now().date_naive()))
    }
}
