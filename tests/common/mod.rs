#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;

use vehicle_configurator::cache::{KeyValueStorage, MemoryKeyValueStorage, StorageConfig};
use vehicle_configurator::clients::{CatalogApi, VehicleApi};
use vehicle_configurator::config::EnvironmentConfig;
use vehicle_configurator::dto::VehicleRequest;
use vehicle_configurator::models::{CatalogMake, CatalogModel, CatalogOrigin, Vehicle};
use vehicle_configurator::services::VehicleStore;
use vehicle_configurator::utils::errors::{api_error, AppResult};
use vehicle_configurator::AppState;

/// Backend en memoria que registra cada petición
#[derive(Default)]
pub struct FakeBackend {
    pub origin_requests: AtomicUsize,
    pub make_requests: Mutex<Vec<Option<i64>>>,
    pub model_requests: Mutex<Vec<i64>>,
    pub created: Mutex<Vec<VehicleRequest>>,
    pub updated: Mutex<Vec<(String, VehicleRequest)>>,
    pub fail_writes: AtomicBool,
    next_id: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn write_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.updated.lock().unwrap().len()
    }

    fn make_name(make_id: i64) -> &'static str {
        match make_id {
            7 => "Toyota",
            8 => "Honda",
            20 => "Ford",
            _ => "Unknown",
        }
    }

    fn model_name(model_id: i64) -> &'static str {
        match model_id {
            42 => "Corolla",
            43 => "Camry",
            50 => "Civic",
            60 => "Focus",
            _ => "Unknown",
        }
    }

    fn respond(&self, id: String, request: &VehicleRequest) -> Vehicle {
        Vehicle {
            id,
            make: Self::make_name(request.make_id).to_string(),
            make_id: Some(request.make_id),
            make_logo_url: None,
            model: Self::model_name(request.model_id).to_string(),
            model_id: Some(request.model_id),
            year: request.year,
            fuel_type: request.fuel_type.clone(),
            engine: request.engine.clone(),
            trim: request.trim.clone(),
            vin: request.vin.clone(),
            display_name: request.display_name.clone(),
            created_at: 1_700_000_000_000,
        }
    }

    fn check_failure(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, None));
        }
        Ok(())
    }
}

pub fn asia() -> CatalogOrigin {
    CatalogOrigin {
        id: 1,
        name: "Asia".to_string(),
        make_count: Some(2),
        model_count: Some(3),
    }
}

pub fn america() -> CatalogOrigin {
    CatalogOrigin {
        id: 2,
        name: "America".to_string(),
        make_count: Some(1),
        model_count: Some(1),
    }
}

fn make(id: i64, name: &str, country: &str, origin_id: i64) -> CatalogMake {
    CatalogMake {
        id,
        name: name.to_string(),
        logo_url: Some(format!("https://cdn.example.com/{}.png", name.to_lowercase())),
        origin_country: Some(country.to_string()),
        origin_id: Some(origin_id),
    }
}

fn all_makes() -> Vec<CatalogMake> {
    vec![
        make(7, "Toyota", "Japan", 1),
        make(8, "Honda", "Japan", 1),
        make(20, "Ford", "USA", 2),
    ]
}

fn all_models() -> Vec<CatalogModel> {
    [(42, 7), (43, 7), (50, 8), (60, 20)]
        .into_iter()
        .map(|(id, make_id)| CatalogModel {
            id,
            make_id,
            name: FakeBackend::model_name(id).to_string(),
        })
        .collect()
}

#[async_trait]
impl CatalogApi for FakeBackend {
    async fn get_origins(&self) -> AppResult<Vec<CatalogOrigin>> {
        self.origin_requests.fetch_add(1, Ordering::SeqCst);
        Ok(vec![asia(), america()])
    }

    async fn get_makes(&self, origin_id: Option<i64>) -> AppResult<Vec<CatalogMake>> {
        self.make_requests.lock().unwrap().push(origin_id);
        Ok(all_makes()
            .into_iter()
            .filter(|m| origin_id.is_none() || m.origin_id == origin_id)
            .collect())
    }

    async fn get_models(&self, make_id: i64) -> AppResult<Vec<CatalogModel>> {
        self.model_requests.lock().unwrap().push(make_id);
        Ok(all_models().into_iter().filter(|m| m.make_id == make_id).collect())
    }
}

#[async_trait]
impl VehicleApi for FakeBackend {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        Ok(Vec::new())
    }

    async fn create_vehicle(&self, request: &VehicleRequest) -> AppResult<Vehicle> {
        self.check_failure()?;
        self.created.lock().unwrap().push(request.clone());
        let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok(self.respond(id, request))
    }

    async fn update_vehicle(&self, id: &str, request: &VehicleRequest) -> AppResult<Vehicle> {
        self.check_failure()?;
        self.updated.lock().unwrap().push((id.to_string(), request.clone()));
        Ok(self.respond(id.to_string(), request))
    }

    async fn delete_vehicle(&self, _id: &str) -> AppResult<()> {
        self.check_failure()
    }
}

/// Estado de la aplicación sobre el backend falso y un almacenamiento dado
pub async fn app_state_with(backend: Arc<FakeBackend>, storage: Arc<dyn KeyValueStorage>) -> AppState {
    let config = EnvironmentConfig::default();
    let store = VehicleStore::hydrate(storage, &StorageConfig::from(&config)).await;
    AppState::with_parts(config, store, backend.clone(), backend)
}

pub async fn app_state(backend: Arc<FakeBackend>) -> AppState {
    app_state_with(backend, Arc::new(MemoryKeyValueStorage::new())).await
}
