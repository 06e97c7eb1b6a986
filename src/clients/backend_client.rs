//! Cliente HTTP para el backend REST del catálogo
//!
//! Implementa `CatalogApi` y `VehicleApi` sobre reqwest. No hay reintentos
//! del lado cliente: cada fallo llega una sola vez al llamador.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{CatalogApi, VehicleApi};
use crate::config::EnvironmentConfig;
use crate::dto::{
    ApiErrorBody, MakeDto, ModelDto, OriginDto, PageResponse, VehicleRequest, VehicleResponseDto,
    VehiclesListResponseDto,
};
use crate::models::catalog::{CatalogMake, CatalogModel, CatalogOrigin};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{api_error, AppResult};

const CATALOG_PREFIX: &str = "/catalog";
const VEHICLES_PREFIX: &str = "/vehicles";

/// Cliente HTTP del backend (catálogo + vehículos)
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    page_size: u32,
}

impl BackendClient {
    /// Crear nuevo cliente HTTP a partir de la configuración
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_token: config.api_token.clone(),
            page_size: config.catalog_page_size,
        })
    }

    pub fn origins_url(&self) -> String {
        format!("{}{}/origins", self.base_url, CATALOG_PREFIX)
    }

    pub fn makes_url(&self, origin_id: Option<i64>) -> String {
        let mut url = format!(
            "{}{}/makes?page=0&size={}",
            self.base_url, CATALOG_PREFIX, self.page_size
        );
        if let Some(origin_id) = origin_id {
            url.push_str(&format!("&originId={}", origin_id));
        }
        url
    }

    pub fn models_url(&self, make_id: i64) -> String {
        format!(
            "{}{}/models?makeId={}&page=0&size={}",
            self.base_url, CATALOG_PREFIX, make_id, self.page_size
        )
    }

    pub fn vehicles_url(&self) -> String {
        format!("{}{}", self.base_url, VEHICLES_PREFIX)
    }

    pub fn vehicle_url(&self, id: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            VEHICLES_PREFIX,
            urlencoding::encode(id)
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Content-Type", "application/json");
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // El backend suele devolver {message, field}; si no, mensaje genérico
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        Err(api_error(status, message))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        debug!("🌐 GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogApi for BackendClient {
    async fn get_origins(&self) -> AppResult<Vec<CatalogOrigin>> {
        let origins: Vec<OriginDto> = self.get_json(&self.origins_url()).await?;
        Ok(origins.into_iter().map(Into::into).collect())
    }

    async fn get_makes(&self, origin_id: Option<i64>) -> AppResult<Vec<CatalogMake>> {
        let page: PageResponse<MakeDto> = self.get_json(&self.makes_url(origin_id)).await?;
        Ok(page.content.into_iter().map(Into::into).collect())
    }

    async fn get_models(&self, make_id: i64) -> AppResult<Vec<CatalogModel>> {
        let page: PageResponse<ModelDto> = self.get_json(&self.models_url(make_id)).await?;
        Ok(page.content.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl VehicleApi for BackendClient {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let response: VehiclesListResponseDto = self.get_json(&self.vehicles_url()).await?;
        Ok(response.vehicles.into_iter().map(Into::into).collect())
    }

    async fn create_vehicle(&self, request: &VehicleRequest) -> AppResult<Vehicle> {
        let url = self.vehicles_url();
        debug!("🌐 POST {}", url);
        let response = self.send(self.client.post(&url).json(request)).await?;
        let dto: VehicleResponseDto = response.json().await?;
        Ok(dto.into())
    }

    async fn update_vehicle(&self, id: &str, request: &VehicleRequest) -> AppResult<Vehicle> {
        let url = self.vehicle_url(id);
        debug!("🌐 PATCH {}", url);
        let response = self.send(self.client.patch(&url).json(request)).await?;
        let dto: VehicleResponseDto = response.json().await?;
        Ok(dto.into())
    }

    async fn delete_vehicle(&self, id: &str) -> AppResult<()> {
        let url = self.vehicle_url(id);
        debug!("🌐 DELETE {}", url);
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        let config = EnvironmentConfig {
            api_base_url: "https://parts.example.com/api/".to_string(),
            catalog_page_size: 50,
            ..EnvironmentConfig::default()
        };
        BackendClient::new(&config).unwrap()
    }

    #[test]
    fn test_catalog_urls() {
        let client = client();
        assert_eq!(client.origins_url(), "https://parts.example.com/api/catalog/origins");
        assert_eq!(
            client.makes_url(None),
            "https://parts.example.com/api/catalog/makes?page=0&size=50"
        );
        assert_eq!(
            client.makes_url(Some(3)),
            "https://parts.example.com/api/catalog/makes?page=0&size=50&originId=3"
        );
        assert_eq!(
            client.models_url(7),
            "https://parts.example.com/api/catalog/models?makeId=7&page=0&size=50"
        );
    }

    #[test]
    fn test_vehicle_url_encodes_id() {
        let client = client();
        assert_eq!(client.vehicles_url(), "https://parts.example.com/api/vehicles");
        assert_eq!(
            client.vehicle_url("vehicle 1/2"),
            "https://parts.example.com/api/vehicles/vehicle%201%2F2"
        );
    }
}
