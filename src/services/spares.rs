//! Spare catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::spare::{CreateSpare, SpareMaster, UpdateSpare},
    repository::Repository,
};

#[derive(Clone)]
pub struct SparesService {
    repository: Repository,
}

impl SparesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<SpareMaster>> {
        self.repository.spares_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<SpareMaster> {
        self.repository.spares_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateSpare) -> AppResult<i32> {
        data.validate()?;
        self.repository.spares_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateSpare) -> AppResult<()> {
        data.validate()?;
        self.repository.spares_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.spares_delete(id).await
    }

    /// Spares linked to an asset; none is a 404
    pub async fn by_asset(&self, asset_id: i32) -> AppResult<Vec<SpareMaster>> {
        let spares = self.repository.spares_by_asset(asset_id).await?;
        if spares.is_empty() {
            return Err(AppError::NotFound(format!("No spares found for asset {}", asset_id)));
        }
        Ok(spares)
    }

    pub async fn search_by_name(&self, name: &str) -> AppResult<Vec<SpareMaster>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Spare name is required".to_string()));
        }
        let spares = self.repository.spares_search_by_name(name).await?;
        if spares.is_empty() {
            return Err(AppError::NotFound(format!("No spares matching '{}'", name)));
        }
        Ok(spares)
    }
}
