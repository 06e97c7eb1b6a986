//! Sesión del asistente para la pantalla anfitriona
//!
//! Combina la máquina de estados, el proveedor de opciones y el
//! coordinador de envío. El borrador vive solo mientras dure la sesión.

use std::sync::Arc;

use tracing::info;

use crate::models::catalog::{CatalogMake, CatalogModel, CatalogOrigin, FuelType, MakeGroup};
use crate::models::vehicle::Vehicle;
use crate::models::wizard::{WizardDraft, WizardStep};
use crate::services::catalog_service::CatalogOptionProvider;
use crate::services::submission_service::SubmissionService;
use crate::services::wizard_service::VehicleWizard;
use crate::utils::errors::{AppError, AppResult};

/// Opciones a pintar para el paso actual
#[derive(Debug, Clone, PartialEq)]
pub enum StepOptions {
    Origins(Vec<CatalogOrigin>),
    Makes(Vec<MakeGroup>),
    Models(Vec<CatalogModel>),
    Years(Vec<i32>),
    Fuels(Vec<FuelType>),
    Details,
}

impl StepOptions {
    /// Si el paso no tiene opciones (estado vacío con reintento)
    pub fn is_empty(&self) -> bool {
        match self {
            StepOptions::Origins(items) => items.is_empty(),
            StepOptions::Makes(groups) => groups.is_empty(),
            StepOptions::Models(items) => items.is_empty(),
            StepOptions::Years(items) => items.is_empty(),
            StepOptions::Fuels(items) => items.is_empty(),
            StepOptions::Details => false,
        }
    }
}

type CompletionCallback = Box<dyn FnOnce(&Vehicle) + Send>;

pub struct WizardSession {
    wizard: VehicleWizard,
    catalog: Arc<CatalogOptionProvider>,
    submission: SubmissionService,
    last_error: Option<String>,
    on_complete: Option<CompletionCallback>,
    finished: bool,
}

impl WizardSession {
    pub fn new(catalog: Arc<CatalogOptionProvider>, submission: SubmissionService) -> Self {
        Self::with_wizard(VehicleWizard::new(), catalog, submission)
    }

    pub fn for_edit(
        vehicle: &Vehicle,
        catalog: Arc<CatalogOptionProvider>,
        submission: SubmissionService,
    ) -> Self {
        Self::with_wizard(VehicleWizard::for_edit(vehicle), catalog, submission)
    }

    fn with_wizard(
        wizard: VehicleWizard,
        catalog: Arc<CatalogOptionProvider>,
        submission: SubmissionService,
    ) -> Self {
        Self {
            wizard,
            catalog,
            submission,
            last_error: None,
            on_complete: None,
            finished: false,
        }
    }

    /// Registrar la acción de cierre de la pantalla anfitriona
    pub fn on_complete(mut self, callback: impl FnOnce(&Vehicle) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn wizard(&self) -> &VehicleWizard {
        &self.wizard
    }

    pub fn current_step(&self) -> WizardStep {
        self.wizard.current_step()
    }

    pub fn draft(&self) -> &WizardDraft {
        self.wizard.draft()
    }

    pub fn catalog(&self) -> &CatalogOptionProvider {
        &self.catalog
    }

    /// Borrador para la tarjeta de resumen, si ya hay algo elegido
    pub fn summary(&self) -> Option<&WizardDraft> {
        Some(self.wizard.draft()).filter(|draft| draft.has_summary())
    }

    /// Si la sesión terminó con un envío confirmado
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Mensaje del último envío fallido, para mostrar en línea
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Cargar las opciones del paso actual con los parámetros del borrador
    pub async fn load_step_options(&self) -> StepOptions {
        let draft = self.wizard.draft();

        match self.wizard.current_step() {
            WizardStep::Origin => StepOptions::Origins(self.catalog.list_origins().await),
            WizardStep::Manufacturer => {
                self.catalog.list_makes(draft.origin_id).await;
                StepOptions::Makes(self.catalog.grouped_makes().await)
            }
            WizardStep::Model => {
                let models = match self.catalog.list_models(draft.make_id).await.into_items() {
                    Some(items) => items,
                    None => self.catalog.models().await,
                };
                StepOptions::Models(models)
            }
            WizardStep::Year => StepOptions::Years(self.catalog.years()),
            WizardStep::Fuel => StepOptions::Fuels(self.catalog.fuel_types()),
            WizardStep::Details => StepOptions::Details,
        }
    }

    pub fn select_origin(&mut self, origin: &CatalogOrigin) -> AppResult<WizardStep> {
        self.wizard.select_origin(origin)
    }

    pub fn select_manufacturer(&mut self, make: &CatalogMake) -> AppResult<WizardStep> {
        self.wizard.select_manufacturer(make)
    }

    pub fn select_model(&mut self, model: &CatalogModel) -> AppResult<WizardStep> {
        self.wizard.select_model(model)
    }

    pub fn select_year(&mut self, year: i32) -> AppResult<WizardStep> {
        self.wizard.select_year(year)
    }

    pub fn select_fuel(&mut self, fuel_type: impl Into<String>) -> AppResult<WizardStep> {
        self.wizard.select_fuel(fuel_type)
    }

    pub fn set_vin(&mut self, input: &str) -> AppResult<()> {
        self.wizard.set_vin(input)
    }

    pub fn set_display_name(&mut self, input: &str) -> AppResult<()> {
        self.wizard.set_display_name(input)
    }

    pub fn set_trim(&mut self, input: &str) -> AppResult<()> {
        self.wizard.set_trim(input)
    }

    pub fn set_engine(&mut self, input: &str) -> AppResult<()> {
        self.wizard.set_engine(input)
    }

    pub fn jump_to(&mut self, step: WizardStep) -> bool {
        self.wizard.jump_to(step)
    }

    /// Acción "editar" de la tarjeta de resumen
    pub fn edit_from_summary(&mut self) -> bool {
        self.wizard.jump_to(WizardStep::Manufacturer)
    }

    /// Enviar el borrador. Solo desde Details y una única vez: en éxito se
    /// descarta el borrador y se invoca el callback de cierre; en error el
    /// borrador se conserva y se guarda el mensaje visible.
    pub async fn submit(&mut self) -> AppResult<Vehicle> {
        if self.finished {
            return Err(AppError::PreconditionFailed(
                "wizard session already submitted".to_string(),
            ));
        }
        if !self.wizard.can_submit() {
            return Err(AppError::PreconditionFailed(format!(
                "submit is only available at {} with a complete draft (current step {})",
                WizardStep::Details.label(),
                self.wizard.current_step().label()
            )));
        }

        self.last_error = None;

        match self.submission.submit(self.wizard.draft()).await {
            Ok(vehicle) => {
                self.finished = true;
                self.wizard = VehicleWizard::new();
                if let Some(callback) = self.on_complete.take() {
                    callback(&vehicle);
                }
                Ok(vehicle)
            }
            Err(e) => {
                if e.is_user_facing() {
                    self.last_error = Some(e.user_message());
                }
                Err(e)
            }
        }
    }

    /// Cancelar: el borrador se descarta sin persistir nada
    pub fn cancel(self) {
        info!("🚪 Asistente cancelado en {}", self.wizard.current_step().label());
    }
}
