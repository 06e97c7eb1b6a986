//! Store persistido del vehículo actual
//!
//! Guarda cero o un `Vehicle`. Las lecturas se sirven desde un espejo en
//! memoria; cada mutación escribe a través (write-through) al almacenamiento
//! del dispositivo. Un fallo de escritura durable se registra y se tolera:
//! el espejo sigue siendo correcto durante la vida del proceso.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::cache::envelope;
use crate::cache::{KeyValueStorage, StorageConfig, StorageOperations};
use crate::models::vehicle::{Vehicle, VehicleInput};
use crate::utils::validation::normalize_optional_text;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Store del vehículo actual (clonable, comparte el mismo estado)
#[derive(Clone)]
pub struct VehicleStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    current: Arc<watch::Sender<Option<Vehicle>>>,
    // Serializa memoria + escritura durable para conservar el orden
    write_lock: Arc<Mutex<()>>,
}

impl VehicleStore {
    /// Store vacío, sin leer el almacenamiento
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            storage,
            key: key.into(),
            current: Arc::new(sender),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Construir el store cargando el valor durable (con migraciones).
    ///
    /// Un valor ilegible se registra y el store arranca vacío.
    pub async fn hydrate(storage: Arc<dyn KeyValueStorage>, config: &StorageConfig) -> Self {
        let store = Self::new(storage, config.vehicle_key.clone());

        let loaded = match store.storage.get_item(&store.key).await {
            Ok(Some(raw)) => match envelope::decode(&raw) {
                Ok(vehicle) => vehicle,
                Err(e) => {
                    warn!("⚠️ Vehículo persistido ilegible en '{}': {}", store.key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                error!(
                    "❌ Error de almacenamiento ({}) para clave {}: {}",
                    StorageOperations::Get,
                    store.key,
                    e
                );
                None
            }
        };

        match &loaded {
            Some(vehicle) => info!("🚗 Vehículo actual cargado: {} ({})", vehicle.label(), vehicle.id),
            None => info!("🚗 Sin vehículo actual persistido"),
        }

        store.current.send_replace(loaded);
        store
    }

    /// Vehículo actual
    pub fn get(&self) -> Option<Vehicle> {
        self.current.borrow().clone()
    }

    /// Suscripción a cambios del vehículo actual
    pub fn subscribe(&self) -> watch::Receiver<Option<Vehicle>> {
        self.current.subscribe()
    }

    /// Reemplazar el vehículo actual (nunca fusiona con el anterior).
    ///
    /// Con identificador se guarda tal cual; sin él se sintetiza id,
    /// nombre por defecto y fecha de creación.
    pub async fn set(&self, input: VehicleInput) -> Vehicle {
        let vehicle = build_vehicle(input, chrono::Utc::now().timestamp_millis());

        let _guard = self.write_lock.lock().await;
        self.current.send_replace(Some(vehicle.clone()));
        debug!("💾 Vehículo actual reemplazado: {}", vehicle.id);
        self.persist(Some(&vehicle)).await;

        vehicle
    }

    /// Eliminar el vehículo actual
    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;
        self.current.send_replace(None);
        debug!("🗑️ Vehículo actual eliminado");
        self.persist(None).await;
    }

    async fn persist(&self, vehicle: Option<&Vehicle>) {
        let result = match vehicle {
            Some(vehicle) => match envelope::encode(Some(vehicle)) {
                Ok(raw) => self.storage.set_item(&self.key, &raw).await,
                Err(e) => Err(e),
            },
            None => self.storage.remove_item(&self.key).await,
        };

        if let Err(e) = result {
            let operation = if vehicle.is_some() {
                StorageOperations::Set
            } else {
                StorageOperations::Remove
            };
            error!(
                "❌ Error de almacenamiento ({}) para clave {}: {} - el estado en memoria sigue vigente",
                operation, self.key, e
            );
        }
    }
}

fn build_vehicle(input: VehicleInput, now_ms: i64) -> Vehicle {
    match input.id {
        Some(id) => Vehicle {
            id,
            make: input.make,
            make_id: input.make_id,
            make_logo_url: input.make_logo_url,
            model: input.model,
            model_id: input.model_id,
            year: input.year,
            fuel_type: input.fuel_type,
            engine: input.engine,
            trim: input.trim,
            vin: input.vin,
            display_name: input.display_name,
            created_at: input.created_at.unwrap_or(now_ms),
        },
        None => {
            let display_name = normalize_optional_text(input.display_name.as_deref())
                .unwrap_or_else(|| Vehicle::default_display_name(&input.make, &input.model, input.year));

            Vehicle {
                id: generate_local_id(now_ms),
                make: input.make,
                make_id: input.make_id,
                make_logo_url: input.make_logo_url,
                model: input.model,
                model_id: input.model_id,
                year: input.year,
                fuel_type: input.fuel_type,
                engine: input.engine,
                trim: input.trim,
                vin: input.vin,
                display_name: Some(display_name),
                created_at: now_ms,
            }
        }
    }
}

/// Identificador local: `vehicle_<ms>_<9 caracteres base36>`
fn generate_local_id(now_ms: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("vehicle_{}_{}", now_ms, suffix)
}
