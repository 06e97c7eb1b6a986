//! Coordinador de envío del vehículo
//!
//! Valida el borrador completo, lo convierte en petición de creación o
//! actualización y, solo con confirmación del backend, escribe el vehículo
//! en el store persistido.

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use crate::clients::VehicleApi;
use crate::dto::VehicleRequest;
use crate::models::vehicle::{Vehicle, VehicleInput};
use crate::models::wizard::WizardDraft;
use crate::services::vehicle_store::VehicleStore;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Construir la petición a partir del borrador.
///
/// Falla con `PreconditionFailed` si faltan ids de catálogo o el año.
pub fn build_request(draft: &WizardDraft) -> AppResult<VehicleRequest> {
    let make_id = draft
        .make_id
        .ok_or_else(|| AppError::PreconditionFailed("manufacturer catalog id missing".to_string()))?;
    let model_id = draft
        .model_id
        .ok_or_else(|| AppError::PreconditionFailed("model catalog id missing".to_string()))?;
    let year = draft
        .year
        .ok_or_else(|| AppError::PreconditionFailed("model year missing".to_string()))?;

    Ok(VehicleRequest {
        make_id,
        model_id,
        year,
        fuel_type: draft.fuel_type.clone().filter(|f| !f.trim().is_empty()),
        engine: draft.engine.submitted(),
        trim: draft.trim.submitted(),
        vin: draft.vin.submitted(),
        display_name: draft.display_name.submitted(),
    })
}

#[derive(Clone)]
pub struct SubmissionService {
    api: Arc<dyn VehicleApi>,
    store: VehicleStore,
}

impl SubmissionService {
    pub fn new(api: Arc<dyn VehicleApi>, store: VehicleStore) -> Self {
        Self { api, store }
    }

    /// Enviar el borrador: crea o actualiza y guarda la respuesta del servidor.
    ///
    /// Ante cualquier error el store no se modifica y el borrador queda
    /// intacto para reintentar.
    pub async fn submit(&self, draft: &WizardDraft) -> AppResult<Vehicle> {
        let request = match build_request(draft) {
            Ok(request) => request,
            Err(e) => {
                warn!("🚫 Envío rechazado antes de la red: {}", e);
                return Err(e);
            }
        };
        request.validate()?;

        let result = match draft.editing_vehicle_id() {
            Some(id) => {
                info!("📝 Actualizando vehículo {}", id);
                self.api.update_vehicle(id, &request).await
            }
            None => {
                info!("🆕 Creando vehículo make={} model={} year={}", request.make_id, request.model_id, request.year);
                self.api.create_vehicle(&request).await
            }
        };

        match result {
            Ok(vehicle) => {
                let stored = self.store.set(VehicleInput::from(vehicle)).await;
                info!("✅ Vehículo {} confirmado por el servidor", stored.id);
                Ok(stored)
            }
            Err(e) => {
                error!("❌ Error enviando vehículo: {}", e);
                Err(e)
            }
        }
    }

    /// Eliminar el vehículo actual en el backend y, si tuvo éxito, en el store
    pub async fn delete_current(&self) -> AppResult<()> {
        let current = self
            .store
            .get()
            .ok_or_else(|| not_found_error("Vehicle", "current"))?;

        self.api.delete_vehicle(&current.id).await?;
        self.store.clear().await;
        info!("🗑️ Vehículo {} eliminado", current.id);
        Ok(())
    }

    /// Sincronizar el store con el backend: el primer vehículo o ninguno
    pub async fn refresh_current(&self) -> AppResult<Option<Vehicle>> {
        let vehicles = self.api.list_vehicles().await?;

        match vehicles.into_iter().next() {
            Some(vehicle) => Ok(Some(self.store.set(VehicleInput::from(vehicle)).await)),
            None => {
                self.store.clear().await;
                Ok(None)
            }
        }
    }
}
