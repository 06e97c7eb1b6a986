use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::Vehicle;
use crate::utils::validation::validate_vin;

// Request para crear o actualizar un vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub make_id: i64,
    pub model_id: i64,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub engine: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub trim: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_vin")]
    pub vin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
}

// Response de vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponseDto {
    pub id: String,
    pub make_id: Option<i64>,
    pub model_id: Option<i64>,
    pub make_name: Option<String>,
    pub model_name: Option<String>,
    pub make_logo_url: Option<String>,
    pub year: i32,
    pub fuel_type: Option<String>,
    pub engine: Option<String>,
    pub trim: Option<String>,
    pub vin: Option<String>,
    pub display_name: Option<String>,
    pub created_at: Option<i64>,
}

// Response de listado de vehículos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehiclesListResponseDto {
    #[serde(default)]
    pub vehicles: Vec<VehicleResponseDto>,
    #[serde(default)]
    pub total: u64,
}

// Cuerpo de error devuelto por el backend
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub field: Option<String>,
}

impl VehicleResponseDto {
    pub fn into_vehicle(self, now_ms: i64) -> Vehicle {
        Vehicle {
            id: self.id,
            make: self.make_name.unwrap_or_default(),
            make_id: self.make_id,
            make_logo_url: self.make_logo_url,
            model: self.model_name.unwrap_or_default(),
            model_id: self.model_id,
            year: self.year,
            fuel_type: self.fuel_type,
            engine: self.engine,
            trim: self.trim,
            vin: self.vin,
            display_name: self.display_name,
            created_at: self.created_at.unwrap_or(now_ms),
        }
    }
}

impl From<VehicleResponseDto> for Vehicle {
    fn from(dto: VehicleResponseDto) -> Self {
        dto.into_vehicle(chrono::Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> VehicleRequest {
        VehicleRequest {
            make_id: 7,
            model_id: 42,
            year: 2020,
            fuel_type: Some("Gasoline".to_string()),
            engine: None,
            trim: None,
            vin: None,
            display_name: Some("Daily".to_string()),
        }
    }

    #[test]
    fn test_request_body_omits_absent_fields() {
        let body = serde_json::to_value(request()).unwrap();
        assert_eq!(
            body,
            json!({
                "makeId": 7,
                "modelId": 42,
                "year": 2020,
                "fuelType": "Gasoline",
                "displayName": "Daily"
            })
        );
    }

    #[test]
    fn test_request_rejects_long_vin() {
        let mut req = request();
        req.vin = Some("1HGCM82633A004352".to_string());
        assert!(req.validate().is_ok());

        req.vin = Some("1HGCM82633A004352X".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_response_mapping_defaults() {
        let dto: VehicleResponseDto = serde_json::from_value(json!({
            "id": "srv-1",
            "makeId": 7,
            "modelId": 42,
            "year": 2020
        }))
        .unwrap();

        let vehicle = dto.into_vehicle(123);
        assert_eq!(vehicle.id, "srv-1");
        assert_eq!(vehicle.make, "");
        assert_eq!(vehicle.model, "");
        assert_eq!(vehicle.created_at, 123);
        assert!(vehicle.has_catalog_ids());
    }
}
