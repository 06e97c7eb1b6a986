//! Configuración del almacenamiento del dispositivo
//!
//! Este módulo contiene la configuración para el almacenamiento clave-valor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::EnvironmentConfig;

/// Configuración del almacenamiento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub storage_dir: PathBuf,
    pub vehicle_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".vehicle_configurator"),
            vehicle_key: "vehicle-storage".to_string(),
        }
    }
}

impl From<&EnvironmentConfig> for StorageConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            storage_dir: config.storage_dir.clone(),
            vehicle_key: config.vehicle_storage_key.clone(),
        }
    }
}

/// Operaciones de almacenamiento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperations {
    Get,
    Set,
    Remove,
}

impl std::fmt::Display for StorageOperations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StorageOperations::Get => "get",
            StorageOperations::Set => "set",
            StorageOperations::Remove => "remove",
        };
        f.write_str(name)
    }
}
