//! Sobre versionado para el vehículo persistido
//!
//! Formato en disco: `{"version": N, "payload": Vehicle | null}`.
//! El formato previo sin versión (`{"state": {"vehicle": ...}, "version": 0}`)
//! se reconoce como versión 0 y se migra hacia adelante.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

type Migration = fn(Value) -> AppResult<Value>;

// Índice = versión de origen
const MIGRATIONS: [Migration; CURRENT_SCHEMA_VERSION as usize] = [migrate_v0_to_v1];

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub payload: T,
}

/// Serializar el vehículo actual dentro del sobre
pub fn encode(vehicle: Option<&Vehicle>) -> AppResult<String> {
    let envelope = Envelope {
        version: CURRENT_SCHEMA_VERSION,
        payload: vehicle,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Deserializar y migrar un valor leído del almacenamiento
pub fn decode(raw: &str) -> AppResult<Option<Vehicle>> {
    let value: Value = serde_json::from_str(raw)?;
    let (version, payload) = split_envelope(value)?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Storage(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "stored schema version {} is newer than supported {}",
                version, CURRENT_SCHEMA_VERSION
            ),
        )));
    }

    if payload.is_null() {
        return Ok(None);
    }

    let migrated = migrate(payload, version)?;
    Ok(Some(serde_json::from_value(migrated)?))
}

/// Aplicar las migraciones desde `from_version` hasta la actual
pub fn migrate(mut payload: Value, from_version: u32) -> AppResult<Value> {
    for version in from_version..CURRENT_SCHEMA_VERSION {
        payload = MIGRATIONS[version as usize](payload)?;
    }
    Ok(payload)
}

fn split_envelope(value: Value) -> AppResult<(u32, Value)> {
    let Value::Object(mut object) = value else {
        return Err(invalid("stored value is not a JSON object"));
    };

    if let Some(payload) = object.remove("payload") {
        let version = object
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| invalid("envelope without numeric version"))?;
        let version = u32::try_from(version).map_err(|_| invalid("envelope version out of range"))?;
        return Ok((version, payload));
    }

    // Formato legado del middleware de persistencia
    if let Some(Value::Object(mut state)) = object.remove("state") {
        let vehicle = state.remove("vehicle").unwrap_or(Value::Null);
        return Ok((0, vehicle));
    }

    Err(invalid("unrecognised stored layout"))
}

fn invalid(reason: &str) -> AppError {
    AppError::Storage(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        reason.to_string(),
    ))
}

const LEGACY_OPTIONAL_TEXT: [&str; 6] =
    ["vin", "displayName", "trim", "engine", "fuelType", "makeLogoUrl"];

/// v0 → v1: strings vacíos pasan a ausentes y `createdAt` es obligatorio
fn migrate_v0_to_v1(payload: Value) -> AppResult<Value> {
    let Value::Object(object) = payload else {
        return Err(invalid("legacy vehicle is not an object"));
    };

    let mut migrated = Map::new();
    for (key, value) in object {
        let blank_optional = LEGACY_OPTIONAL_TEXT.contains(&key.as_str())
            && value.as_str().is_some_and(|s| s.trim().is_empty());
        if blank_optional {
            continue;
        }

        if key == "year" {
            if let Some(raw) = value.as_str() {
                let year: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| invalid("legacy vehicle year is not numeric"))?;
                migrated.insert(key, Value::from(year));
                continue;
            }
        }

        migrated.insert(key, value);
    }

    migrated.entry("createdAt").or_insert(Value::from(0));
    migrated.entry("make").or_insert(Value::from(""));
    migrated.entry("model").or_insert(Value::from(""));

    Ok(Value::Object(migrated))
}
