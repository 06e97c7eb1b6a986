//! Máquina de estados del asistente de configuración
//!
//! Avance lineal Origin → Manufacturer → Model → Year → Fuel → Details,
//! disparado solo por una selección en el paso activo. Saltar hacia atrás
//! limpia todos los campos de los pasos posteriores (cascada monótona).

use tracing::{debug, info};

use crate::models::catalog::{max_model_year, CatalogMake, CatalogModel, CatalogOrigin};
use crate::models::text_field::TextField;
use crate::models::vehicle::Vehicle;
use crate::models::wizard::{WizardDraft, WizardStep};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_model_year, MIN_YEAR};

/// Cascada de invalidación: copia de `draft` saltando a `jump_to`
pub fn invalidate(draft: &WizardDraft, jump_to: WizardStep) -> WizardDraft {
    let mut next = draft.clone();
    next.clear_after(jump_to);
    next
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleWizard {
    step: WizardStep,
    draft: WizardDraft,
}

impl Default for VehicleWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleWizard {
    /// Asistente nuevo en modo creación
    pub fn new() -> Self {
        Self {
            step: WizardStep::Origin,
            draft: WizardDraft::new(),
        }
    }

    /// Asistente en modo edición para `vehicle`.
    ///
    /// Solo se pre-carga si marca y modelo tienen ids de catálogo; en ese
    /// caso arranca en Details. Si no, el usuario vuelve a elegir desde
    /// Manufacturer (lista de marcas sin filtrar).
    pub fn for_edit(vehicle: &Vehicle) -> Self {
        match WizardDraft::seeded_from(vehicle) {
            Some(draft) => {
                info!("✏️ Editando vehículo {} desde Details", vehicle.id);
                Self {
                    step: WizardStep::Details,
                    draft,
                }
            }
            None => {
                info!(
                    "✏️ Vehículo {} sin ids de catálogo; se re-selecciona desde Manufacturer",
                    vehicle.id
                );
                Self {
                    step: WizardStep::Manufacturer,
                    draft: WizardDraft::for_edit(vehicle.id.clone()),
                }
            }
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn into_draft(self) -> WizardDraft {
        self.draft
    }

    pub fn is_step_completed(&self, step: WizardStep) -> bool {
        step < self.step
    }

    pub fn is_step_active(&self, step: WizardStep) -> bool {
        step == self.step
    }

    /// Un indicador es pulsable si el paso está completado o activo
    pub fn is_step_clickable(&self, step: WizardStep) -> bool {
        self.is_step_completed(step) || self.is_step_active(step)
    }

    /// Progreso de la barra: (índice + 1) / número de pasos
    pub fn progress(&self) -> f32 {
        (self.step.index() + 1) as f32 / WizardStep::ALL.len() as f32
    }

    /// Saltar a un paso ya alcanzado; pasos futuros se ignoran.
    ///
    /// Devuelve `true` si el salto se aplicó.
    pub fn jump_to(&mut self, step: WizardStep) -> bool {
        if !self.is_step_clickable(step) {
            debug!("⏭️ Salto a {} ignorado (paso actual {})", step.label(), self.step.label());
            return false;
        }

        self.draft.clear_after(step);
        self.step = step;
        debug!("↩️ Salto a {}", step.label());
        true
    }

    pub fn select_origin(&mut self, origin: &CatalogOrigin) -> AppResult<WizardStep> {
        self.expect_step(WizardStep::Origin)?;

        let changed = self.draft.origin_id != Some(origin.id);
        self.draft.origin_id = Some(origin.id);
        self.draft.origin_name = Some(origin.name.clone());
        Ok(self.advance(changed))
    }

    pub fn select_manufacturer(&mut self, make: &CatalogMake) -> AppResult<WizardStep> {
        self.expect_step(WizardStep::Manufacturer)?;

        let changed = self.draft.make_id != Some(make.id);
        self.draft.make = Some(make.name.clone());
        self.draft.make_id = Some(make.id);
        self.draft.make_logo_url = make.logo_url.clone();
        Ok(self.advance(changed))
    }

    pub fn select_model(&mut self, model: &CatalogModel) -> AppResult<WizardStep> {
        self.expect_step(WizardStep::Model)?;

        if self.draft.make_id != Some(model.make_id) {
            return Err(AppError::InvalidTransition(format!(
                "model {} belongs to make {}, selected make is {:?}",
                model.id, model.make_id, self.draft.make_id
            )));
        }

        let changed = self.draft.model_id != Some(model.id);
        self.draft.model = Some(model.name.clone());
        self.draft.model_id = Some(model.id);
        Ok(self.advance(changed))
    }

    pub fn select_year(&mut self, year: i32) -> AppResult<WizardStep> {
        self.expect_step(WizardStep::Year)?;

        let max_year = max_model_year();
        validate_model_year(year, max_year).map_err(|_| {
            AppError::InvalidTransition(format!(
                "year {} outside {}..={}",
                year, MIN_YEAR, max_year
            ))
        })?;

        let changed = self.draft.year != Some(year);
        self.draft.year = Some(year);
        Ok(self.advance(changed))
    }

    pub fn select_fuel(&mut self, fuel_type: impl Into<String>) -> AppResult<WizardStep> {
        self.expect_step(WizardStep::Fuel)?;

        let fuel_type = fuel_type.into();
        let changed = self.draft.fuel_type.as_deref() != Some(fuel_type.as_str());
        self.draft.fuel_type = Some(fuel_type);
        Ok(self.advance(changed))
    }

    pub fn set_vin(&mut self, input: &str) -> AppResult<()> {
        self.expect_step(WizardStep::Details)?;
        self.draft.vin = TextField::from_input(input);
        Ok(())
    }

    pub fn set_display_name(&mut self, input: &str) -> AppResult<()> {
        self.expect_step(WizardStep::Details)?;
        self.draft.display_name = TextField::from_input(input);
        Ok(())
    }

    pub fn set_trim(&mut self, input: &str) -> AppResult<()> {
        self.expect_step(WizardStep::Details)?;
        self.draft.trim = TextField::from_input(input);
        Ok(())
    }

    pub fn set_engine(&mut self, input: &str) -> AppResult<()> {
        self.expect_step(WizardStep::Details)?;
        self.draft.engine = TextField::from_input(input);
        Ok(())
    }

    /// Si el borrador cumple las precondiciones de envío
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Details
            && self.draft.make_id.is_some()
            && self.draft.model_id.is_some()
            && self.draft.year.is_some()
    }

    fn expect_step(&self, step: WizardStep) -> AppResult<()> {
        if self.step != step {
            return Err(AppError::InvalidTransition(format!(
                "selection for {} while at {}",
                step.label(),
                self.step.label()
            )));
        }
        Ok(())
    }

    // Guarda y avanza en una sola acción; un valor distinto invalida lo posterior
    fn advance(&mut self, changed: bool) -> WizardStep {
        if changed {
            self.draft.clear_after(self.step);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        debug!("➡️ Paso actual: {}", self.step.label());
        self.step
    }
}
