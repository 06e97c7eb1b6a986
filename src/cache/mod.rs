//! Cache
//!
//! Este módulo contiene el almacenamiento clave-valor del dispositivo
//! y el sobre versionado del vehículo persistido.

pub mod envelope;
pub mod kv_storage;
pub mod storage_config;

pub use kv_storage::{FileKeyValueStorage, KeyValueStorage, MemoryKeyValueStorage};
pub use storage_config::{StorageConfig, StorageOperations};
