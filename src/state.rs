//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación: el store del
//! vehículo hidratado y los clientes del backend.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::cache::{FileKeyValueStorage, KeyValueStorage, StorageConfig};
use crate::clients::{BackendClient, CatalogApi, VehicleApi};
use crate::config::environment::EnvironmentConfig;
use crate::models::vehicle::Vehicle;
use crate::services::{CatalogOptionProvider, SubmissionService, VehicleStore, WizardSession};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: VehicleStore,
    pub catalog_api: Arc<dyn CatalogApi>,
    pub vehicle_api: Arc<dyn VehicleApi>,
}

impl AppState {
    /// Construir el estado real: cliente HTTP, almacenamiento en disco e hidratación
    pub async fn initialize(config: EnvironmentConfig) -> AppResult<Self> {
        let backend = Arc::new(BackendClient::new(&config)?);
        let storage_config = StorageConfig::from(&config);
        let storage: Arc<dyn KeyValueStorage> =
            Arc::new(FileKeyValueStorage::new(storage_config.storage_dir.clone()));

        let store = VehicleStore::hydrate(storage, &storage_config).await;
        info!("✅ Estado de la aplicación inicializado ({})", config.environment);

        Ok(Self::with_parts(config, store, backend.clone(), backend))
    }

    pub fn with_parts(
        config: EnvironmentConfig,
        store: VehicleStore,
        catalog_api: Arc<dyn CatalogApi>,
        vehicle_api: Arc<dyn VehicleApi>,
    ) -> Self {
        Self {
            config,
            store,
            catalog_api,
            vehicle_api,
        }
    }

    pub fn current_vehicle(&self) -> Option<Vehicle> {
        self.store.get()
    }

    pub fn subscribe_vehicle(&self) -> watch::Receiver<Option<Vehicle>> {
        self.store.subscribe()
    }

    /// Proveedor de opciones nuevo: cada sesión carga su propio catálogo
    pub fn catalog_provider(&self) -> Arc<CatalogOptionProvider> {
        Arc::new(CatalogOptionProvider::new(
            self.catalog_api.clone(),
            self.config.include_hydrogen,
        ))
    }

    pub fn submission_service(&self) -> SubmissionService {
        SubmissionService::new(self.vehicle_api.clone(), self.store.clone())
    }

    /// Abrir el asistente. Con `edit_vehicle` se siembra desde el vehículo actual
    /// si existe; si no, se abre en modo creación.
    pub fn start_wizard(&self, edit_vehicle: bool) -> WizardSession {
        let submission = self.submission_service();
        let catalog = self.catalog_provider();

        match self.store.get().filter(|_| edit_vehicle) {
            Some(vehicle) => {
                info!("✏️ Abriendo asistente en modo edición para {}", vehicle.id);
                WizardSession::for_edit(&vehicle, catalog, submission)
            }
            None => {
                info!("🧭 Abriendo asistente en modo creación");
                WizardSession::new(catalog, submission)
            }
        }
    }
}
