//! Modelos del asistente de configuración
//!
//! `WizardStep` define el orden total de los pasos y `WizardDraft` guarda
//! la selección en curso. El borrador nunca se persiste.

use serde::Serialize;

use super::text_field::TextField;
use super::vehicle::Vehicle;

/// Pasos del asistente, en orden estricto
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WizardStep {
    Origin,
    Manufacturer,
    Model,
    Year,
    Fuel,
    Details,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Origin,
        WizardStep::Manufacturer,
        WizardStep::Model,
        WizardStep::Year,
        WizardStep::Fuel,
        WizardStep::Details,
    ];

    pub const TERMINAL: WizardStep = WizardStep::Details;

    pub fn index(self) -> usize {
        self as usize
    }

    /// Paso siguiente; `None` en el paso terminal
    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Pasos estrictamente posteriores a este
    pub fn later_steps(self) -> impl Iterator<Item = WizardStep> {
        Self::ALL.into_iter().filter(move |s| *s > self)
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Origin => "origin",
            WizardStep::Manufacturer => "manufacturer",
            WizardStep::Model => "model",
            WizardStep::Year => "year",
            WizardStep::Fuel => "fuel",
            WizardStep::Details => "details",
        }
    }
}

/// Modo del borrador: crear uno nuevo o editar el vehículo `vehicle_id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftMode {
    #[default]
    Create,
    Edit { vehicle_id: String },
}

/// Selección en curso del asistente
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardDraft {
    pub mode: DraftMode,
    // Origin
    pub origin_id: Option<i64>,
    pub origin_name: Option<String>,
    // Manufacturer
    pub make: Option<String>,
    pub make_id: Option<i64>,
    pub make_logo_url: Option<String>,
    // Model
    pub model: Option<String>,
    pub model_id: Option<i64>,
    // Year
    pub year: Option<i32>,
    // Fuel
    pub fuel_type: Option<String>,
    // Details
    pub vin: TextField,
    pub display_name: TextField,
    pub trim: TextField,
    pub engine: TextField,
}

impl WizardDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_edit(vehicle_id: impl Into<String>) -> Self {
        Self {
            mode: DraftMode::Edit {
                vehicle_id: vehicle_id.into(),
            },
            ..Self::default()
        }
    }

    /// Borrador pre-cargado desde un vehículo existente.
    ///
    /// Devuelve `None` si el vehículo no tiene ids de catálogo resueltos.
    pub fn seeded_from(vehicle: &Vehicle) -> Option<Self> {
        let (make_id, model_id) = (vehicle.make_id?, vehicle.model_id?);

        Some(Self {
            mode: DraftMode::Edit {
                vehicle_id: vehicle.id.clone(),
            },
            origin_id: None,
            origin_name: None,
            make: Some(vehicle.make.clone()),
            make_id: Some(make_id),
            make_logo_url: vehicle.make_logo_url.clone(),
            model: Some(vehicle.model.clone()),
            model_id: Some(model_id),
            year: Some(vehicle.year),
            fuel_type: vehicle.fuel_type.clone(),
            vin: TextField::from_option(vehicle.vin.as_deref()),
            display_name: TextField::from_option(vehicle.display_name.as_deref()),
            trim: TextField::from_option(vehicle.trim.as_deref()),
            engine: TextField::from_option(vehicle.engine.as_deref()),
        })
    }

    pub fn editing_vehicle_id(&self) -> Option<&str> {
        match &self.mode {
            DraftMode::Edit { vehicle_id } => Some(vehicle_id),
            DraftMode::Create => None,
        }
    }

    /// Limpiar los campos que pertenecen a `step`
    pub fn clear_step(&mut self, step: WizardStep) {
        match step {
            WizardStep::Origin => {
                self.origin_id = None;
                self.origin_name = None;
            }
            WizardStep::Manufacturer => {
                self.make = None;
                self.make_id = None;
                self.make_logo_url = None;
            }
            WizardStep::Model => {
                self.model = None;
                self.model_id = None;
            }
            WizardStep::Year => self.year = None,
            WizardStep::Fuel => self.fuel_type = None,
            WizardStep::Details => {
                self.vin = TextField::Unset;
                self.display_name = TextField::Unset;
                self.trim = TextField::Unset;
                self.engine = TextField::Unset;
            }
        }
    }

    /// Cascada de invalidación: limpia cada paso estrictamente posterior a `step`
    pub fn clear_after(&mut self, step: WizardStep) {
        for later in step.later_steps() {
            self.clear_step(later);
        }
    }

    /// Si el paso tiene una selección guardada
    pub fn has_selection(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Origin => self.origin_id.is_some(),
            WizardStep::Manufacturer => self.make_id.is_some() || self.make.is_some(),
            WizardStep::Model => self.model_id.is_some() || self.model.is_some(),
            WizardStep::Year => self.year.is_some(),
            WizardStep::Fuel => self.fuel_type.is_some(),
            WizardStep::Details => {
                !(self.vin.is_unset()
                    && self.display_name.is_unset()
                    && self.trim.is_unset()
                    && self.engine.is_unset())
            }
        }
    }

    /// Si hay algo que mostrar en la tarjeta de resumen
    pub fn has_summary(&self) -> bool {
        self.make.is_some() || self.model.is_some() || self.year.is_some() || self.fuel_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order_and_next() {
        assert!(WizardStep::Origin < WizardStep::Manufacturer);
        assert!(WizardStep::Fuel < WizardStep::Details);
        assert_eq!(WizardStep::Model.next(), Some(WizardStep::Year));
        assert_eq!(WizardStep::Details.next(), None);
        assert_eq!(
            WizardStep::Year.later_steps().collect::<Vec<_>>(),
            vec![WizardStep::Fuel, WizardStep::Details]
        );
    }

    #[test]
    fn test_clear_after_manufacturer_drops_model() {
        let mut draft = WizardDraft {
            make: Some("Toyota".to_string()),
            make_id: Some(7),
            model: Some("Corolla".to_string()),
            model_id: Some(42),
            year: Some(2020),
            ..WizardDraft::default()
        };

        draft.clear_after(WizardStep::Manufacturer);
        assert_eq!(draft.make_id, Some(7));
        assert_eq!(draft.model, None);
        assert_eq!(draft.model_id, None);
        assert_eq!(draft.year, None);
    }

    #[test]
    fn test_seeded_requires_catalog_ids() {
        let mut vehicle = Vehicle {
            id: "v1".to_string(),
            make: "Toyota".to_string(),
            make_id: Some(7),
            make_logo_url: None,
            model: "Corolla".to_string(),
            model_id: None,
            year: 2020,
            fuel_type: None,
            engine: None,
            trim: None,
            vin: Some("".to_string()),
            display_name: Some("Daily".to_string()),
            created_at: 0,
        };
        assert!(WizardDraft::seeded_from(&vehicle).is_none());

        vehicle.model_id = Some(42);
        let draft = WizardDraft::seeded_from(&vehicle).unwrap();
        assert_eq!(draft.editing_vehicle_id(), Some("v1"));
        assert_eq!(draft.vin, TextField::Empty);
        assert_eq!(draft.display_name, TextField::Value("Daily".to_string()));
        assert_eq!(draft.trim, TextField::Unset);
    }
}
