//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle persistido en el dispositivo
//! y la entrada usada para crearlo o reemplazarlo en el store.

use serde::{Deserialize, Serialize};

/// Vehículo actual del usuario - el único registro persistido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make_logo_url: Option<String>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<i64>,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Epoch en milisegundos
    pub created_at: i64,
}

impl Vehicle {
    /// Nombre por defecto: "marca modelo año"
    pub fn default_display_name(make: &str, model: &str, year: i32) -> String {
        format!("{} {} {}", make, model, year)
    }

    /// Nombre a mostrar, con fallback al nombre por defecto
    pub fn label(&self) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => Self::default_display_name(&self.make, &self.model, self.year),
        }
    }

    /// Si el vehículo puede reabrirse en el asistente (ids de catálogo resueltos)
    pub fn has_catalog_ids(&self) -> bool {
        self.make_id.is_some() && self.model_id.is_some()
    }
}

/// Entrada para `VehicleStore::set`.
///
/// Con `id` se guarda tal cual (respuesta del servidor); sin `id` el store
/// sintetiza identificador, nombre por defecto y fecha de creación.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleInput {
    pub id: Option<String>,
    pub make: String,
    pub make_id: Option<i64>,
    pub make_logo_url: Option<String>,
    pub model: String,
    pub model_id: Option<i64>,
    pub year: i32,
    pub fuel_type: Option<String>,
    pub engine: Option<String>,
    pub trim: Option<String>,
    pub vin: Option<String>,
    pub display_name: Option<String>,
    pub created_at: Option<i64>,
}

impl VehicleInput {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            ..Default::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

impl From<Vehicle> for VehicleInput {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: Some(vehicle.id),
            make: vehicle.make,
            make_id: vehicle.make_id,
            make_logo_url: vehicle.make_logo_url,
            model: vehicle.model,
            model_id: vehicle.model_id,
            year: vehicle.year,
            fuel_type: vehicle.fuel_type,
            engine: vehicle.engine,
            trim: vehicle.trim,
            vin: vehicle.vin,
            display_name: vehicle.display_name,
            created_at: Some(vehicle.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corolla() -> Vehicle {
        Vehicle {
            id: "v1".to_string(),
            make: "Toyota".to_string(),
            make_id: Some(7),
            make_logo_url: None,
            model: "Corolla".to_string(),
            model_id: Some(42),
            year: 2020,
            fuel_type: Some("Gasoline".to_string()),
            engine: None,
            trim: None,
            vin: None,
            display_name: None,
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_label_falls_back_to_default() {
        let mut vehicle = corolla();
        assert_eq!(vehicle.label(), "Toyota Corolla 2020");

        vehicle.display_name = Some("  ".to_string());
        assert_eq!(vehicle.label(), "Toyota Corolla 2020");

        vehicle.display_name = Some("Daily".to_string());
        assert_eq!(vehicle.label(), "Daily");
    }

    #[test]
    fn test_serializes_camel_case_without_absent_fields() {
        let json = serde_json::to_value(corolla()).unwrap();
        assert_eq!(json["makeId"], 7);
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert!(json.get("vin").is_none());
    }

    #[test]
    fn test_input_from_vehicle_keeps_id() {
        let input = VehicleInput::from(corolla());
        assert_eq!(input.id.as_deref(), Some("v1"));
        assert_eq!(input.created_at, Some(1_700_000_000_000));
    }
}
