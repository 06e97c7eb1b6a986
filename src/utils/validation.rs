//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! del vehículo antes de enviarlos al backend.

use validator::ValidationError;

/// Longitud máxima de un VIN
pub const VIN_MAX_LEN: usize = 17;

/// Año mínimo ofrecido por el asistente
pub const MIN_YEAR: i32 = 1980;

/// Recortar un texto libre: vacío después del trim equivale a ausente
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validar que el VIN no supere los 17 caracteres
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > VIN_MAX_LEN {
        let mut error = ValidationError::new("vin_length");
        error.add_param("max".into(), &VIN_MAX_LEN);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que el año esté dentro del rango del catálogo
pub fn validate_model_year(year: i32, max_year: i32) -> Result<(), ValidationError> {
    if year < MIN_YEAR || year > max_year {
        let mut error = ValidationError::new("year_range");
        error.add_param("min".into(), &MIN_YEAR);
        error.add_param("max".into(), &max_year);
        error.add_param("value".into(), &year);
        return Err(error);
    }
    Ok(())
}
