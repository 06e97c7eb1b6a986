//! Clients - HTTP Clients for the parts backend
//!
//! This module defines the backend seams used by the wizard and the
//! reqwest implementation that talks to the REST API.

pub mod backend_client;

use async_trait::async_trait;

use crate::dto::VehicleRequest;
use crate::models::catalog::{CatalogMake, CatalogModel, CatalogOrigin};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

pub use backend_client::BackendClient;

/// Endpoints de catálogo: origins, makes y models
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /catalog/origins`
    async fn get_origins(&self) -> AppResult<Vec<CatalogOrigin>>;

    /// `GET /catalog/makes?originId=&page=&size=`; `None` pide el superconjunto
    async fn get_makes(&self, origin_id: Option<i64>) -> AppResult<Vec<CatalogMake>>;

    /// `GET /catalog/models?makeId=&page=&size=`
    async fn get_models(&self, make_id: i64) -> AppResult<Vec<CatalogModel>>;
}

/// Recurso de vehículos del usuario
#[async_trait]
pub trait VehicleApi: Send + Sync {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    async fn create_vehicle(&self, request: &VehicleRequest) -> AppResult<Vehicle>;

    async fn update_vehicle(&self, id: &str, request: &VehicleRequest) -> AppResult<Vehicle>;

    async fn delete_vehicle(&self, id: &str) -> AppResult<()>;
}
