//! Modelos del catálogo
//!
//! Registros de referencia de solo lectura: Origin 1→N Make 1→N Model,
//! más las opciones estáticas (combustibles y años).

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::utils::validation::MIN_YEAR;

/// Grupo usado cuando una marca no trae país de origen
pub const OTHER_GROUP_LABEL: &str = "other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogOrigin {
    pub id: i64,
    pub name: String,
    pub make_count: Option<u32>,
    pub model_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMake {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub origin_country: Option<String>,
    pub origin_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogModel {
    pub id: i64,
    pub make_id: i64,
    pub name: String,
}

/// Proyección de marcas agrupadas por país de origen (solo para mostrar)
#[derive(Debug, Clone, PartialEq)]
pub struct MakeGroup {
    pub label: String,
    pub makes: Vec<CatalogMake>,
}

/// Agrupar marcas por país de origen, conservando el orden de aparición
pub fn group_makes_by_origin(makes: &[CatalogMake]) -> Vec<MakeGroup> {
    let mut groups: Vec<MakeGroup> = Vec::new();

    for make in makes {
        let label = make
            .origin_country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(OTHER_GROUP_LABEL);

        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.makes.push(make.clone()),
            None => groups.push(MakeGroup {
                label: label.to_string(),
                makes: vec![make.clone()],
            }),
        }
    }

    groups
}

/// Tipo de combustible (lista fija, no viene del backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FuelType {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

const FUEL_TYPES: [FuelType; 5] = [
    FuelType { id: "gasoline", name: "Gasoline", icon: "gas-station" },
    FuelType { id: "diesel", name: "Diesel", icon: "gas-station-outline" },
    FuelType { id: "electric", name: "Electric", icon: "ev-station" },
    FuelType { id: "hybrid", name: "Hybrid", icon: "leaf" },
    FuelType { id: "plugin_hybrid", name: "Plug-in Hybrid", icon: "battery-charging" },
];

const HYDROGEN: FuelType = FuelType { id: "hydrogen", name: "Hydrogen", icon: "molecule" };

/// Combustibles disponibles; hidrógeno es opcional
pub fn fuel_types(include_hydrogen: bool) -> Vec<FuelType> {
    let mut list = FUEL_TYPES.to_vec();
    if include_hydrogen {
        list.push(HYDROGEN);
    }
    list
}

/// Año máximo ofrecido: el año en curso + 1
pub fn max_model_year() -> i32 {
    chrono::Local::now().year() + 1
}

/// Años en orden descendente desde `current_year + 1` hasta 1980
pub fn year_range(current_year: i32) -> Vec<i32> {
    (MIN_YEAR..=current_year + 1).rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(id: i64, name: &str, country: Option<&str>) -> CatalogMake {
        CatalogMake {
            id,
            name: name.to_string(),
            logo_url: None,
            origin_country: country.map(str::to_string),
            origin_id: None,
        }
    }

    #[test]
    fn test_group_makes_defaults_to_other() {
        let makes = vec![
            make(1, "Toyota", Some("Japan")),
            make(2, "Lada", None),
            make(3, "Honda", Some("Japan")),
            make(4, "Tata", Some("")),
        ];

        let groups = group_makes_by_origin(&makes);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Japan");
        assert_eq!(groups[0].makes.len(), 2);
        assert_eq!(groups[1].label, OTHER_GROUP_LABEL);
        assert_eq!(groups[1].makes.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_fuel_types_optional_hydrogen() {
        assert_eq!(fuel_types(false).len(), 5);
        let with_h2 = fuel_types(true);
        assert_eq!(with_h2.len(), 6);
        assert_eq!(with_h2.last().map(|f| f.id), Some("hydrogen"));
    }

    #[test]
    fn test_year_range_descending() {
        let years = year_range(2026);
        assert_eq!(years.first(), Some(&2027));
        assert_eq!(years.last(), Some(&1980));
        assert_eq!(years.len(), (2027 - 1980 + 1) as usize);
        assert!(years.windows(2).all(|w| w[0] > w[1]));
    }
}
