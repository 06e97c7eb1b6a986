//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del configurador
//! y su conversión a mensajes legibles para la pantalla del asistente.

use http::StatusCode;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Indica si el error debe mostrarse en línea al usuario.
    ///
    /// Las violaciones de precondición y las transiciones inválidas son
    /// fallos de la UI (no debería poder llegarse a ese estado) y no se muestran.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            AppError::PreconditionFailed(_) | AppError::InvalidTransition(_)
        )
    }

    /// Mensaje legible para mostrar en la pantalla del asistente
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api { message, .. } => message.clone(),
            AppError::Http(e) if e.is_timeout() => "Network error: request timed out".to_string(),
            AppError::Http(e) if e.is_connect() || e.is_request() => {
                "Network error: No response received".to_string()
            }
            AppError::Http(e) => e.to_string(),
            AppError::Validation(errors) => {
                let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
                if fields.is_empty() {
                    "The provided data is invalid".to_string()
                } else {
                    format!("The provided data is invalid: {}", fields.join(", "))
                }
            }
            AppError::NotFound(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Código HTTP asociado, si el error vino del backend
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Http(e) => e
                .status()
                .and_then(|s| StatusCode::from_u16(s.as_u16()).ok()),
            _ => None,
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores devueltos por el backend
pub fn api_error(status: StatusCode, message: Option<String>) -> AppError {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
    AppError::Api { status, message }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de configuración
pub fn config_error(variable: &str, reason: &str) -> AppError {
    AppError::Config(format!("{}: {}", variable, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_prefers_server_message() {
        let err = api_error(StatusCode::BAD_REQUEST, Some("VIN already registered".to_string()));
        assert_eq!(err.user_message(), "VIN already registered");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_api_error_falls_back_to_status() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, Some("   ".to_string()));
        assert_eq!(err.user_message(), "HTTP error! status: 500");
    }

    #[test]
    fn test_precondition_is_not_user_facing() {
        let err = AppError::PreconditionFailed("makeId".to_string());
        assert!(!err.is_user_facing());
        assert!(!AppError::InvalidTransition("x".to_string()).is_user_facing());
    }

    #[test]
    fn test_validation_error_lists_field() {
        let err = validation_error("vin", "too long");
        assert_eq!(err.user_message(), "The provided data is invalid: vin");
    }
}
