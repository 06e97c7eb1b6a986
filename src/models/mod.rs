//! Modelos del sistema
//!
//! Este módulo contiene el vehículo persistido, el catálogo de referencia
//! y el borrador del asistente.

pub mod catalog;
pub mod text_field;
pub mod vehicle;
pub mod wizard;

pub use catalog::{CatalogMake, CatalogModel, CatalogOrigin, FuelType, MakeGroup};
pub use text_field::TextField;
pub use vehicle::{Vehicle, VehicleInput};
pub use wizard::{DraftMode, WizardDraft, WizardStep};
