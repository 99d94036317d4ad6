//! Vaulterp asset service
//!
//! REST JSON API over the asset registry, the spare lifecycle (checkout,
//! check-in, scrap, replacement and their approval gate), asset service
//! records and the downtime reports built on them.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
