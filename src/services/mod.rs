//! Services module
//!
//! Este módulo contiene la lógica del asistente de configuración del
//! vehículo: store persistido, opciones del catálogo, máquina de estados
//! y coordinador de envío.

pub mod catalog_service;
pub mod submission_service;
pub mod vehicle_store;
pub mod wizard_service;
pub mod wizard_session;

pub use catalog_service::{CatalogOptionProvider, DependentOptions, FetchOutcome};
pub use submission_service::SubmissionService;
pub use vehicle_store::VehicleStore;
pub use wizard_service::{invalidate, VehicleWizard};
pub use wizard_session::{StepOptions, WizardSession};
