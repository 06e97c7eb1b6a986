//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::errors::{config_error, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    /// Token Bearer emitido por el flujo de login (colaborador externo)
    pub api_token: Option<String>,
    pub api_timeout_secs: u64,
    pub catalog_page_size: u32,
    pub storage_dir: PathBuf,
    pub vehicle_storage_key: String,
    pub include_hydrogen: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api_base_url: "http://localhost:8080/api".to_string(),
            api_token: None,
            api_timeout_secs: 30,
            catalog_page_size: 200,
            storage_dir: PathBuf::from(".vehicle_configurator"),
            vehicle_storage_key: "vehicle-storage".to_string(),
            include_hydrogen: false,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno.
    ///
    /// Las variables ausentes toman el valor por defecto; las presentes
    /// pero mal formadas devuelven `AppError::Config`.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            api_base_url: env::var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            api_token: env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            api_timeout_secs: parse_var("API_TIMEOUT_SECS", defaults.api_timeout_secs)?,
            catalog_page_size: parse_var("CATALOG_PAGE_SIZE", defaults.catalog_page_size)?,
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            vehicle_storage_key: env::var("VEHICLE_STORAGE_KEY")
                .unwrap_or(defaults.vehicle_storage_key),
            include_hydrogen: parse_var("INCLUDE_HYDROGEN", defaults.include_hydrogen)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| config_error(name, &format!("invalid value '{}'", raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.catalog_page_size, 200);
        assert_eq!(config.vehicle_storage_key, "vehicle-storage");
        assert!(!config.include_hydrogen);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("VEHICLE_CONFIGURATOR_TEST_PAGE_SIZE", "lots");
        let result: AppResult<u32> = parse_var("VEHICLE_CONFIGURATOR_TEST_PAGE_SIZE", 10);
        assert!(result.is_err());

        env::set_var("VEHICLE_CONFIGURATOR_TEST_PAGE_SIZE", " 50 ");
        let result: AppResult<u32> = parse_var("VEHICLE_CONFIGURATOR_TEST_PAGE_SIZE", 10);
        assert_eq!(result.ok(), Some(50));

        env::remove_var("VEHICLE_CONFIGURATOR_TEST_PAGE_SIZE");
        let result: AppResult<u32> = parse_var("VEHICLE_CONFIGURATOR_TEST_PAGE_SIZE", 10);
        assert_eq!(result.ok(), Some(10));
    }
}
