//! Pet condition roles, persisted with the pet.

use log::debug;

use super::{Clinic, ClinicError, ClinicResult};
use crate::models::{ConditionKind, Healthy, Injured, PetId, Pregnant};

impl Clinic {
    /// Mark a pet healthy; any injured role is dropped.
    pub fn pet_set_healthy(&mut self, pet: PetId, healthy: Healthy) -> ClinicResult<()> {
        self.update(pet, |p| p.conditions.set_healthy(healthy))?;
        debug!("{} marked healthy", pet);
        Ok(())
    }

    /// Mark a pet injured; any healthy role is dropped.
    pub fn pet_set_injured(&mut self, pet: PetId, injured: Injured) -> ClinicResult<()> {
        self.update(pet, |p| p.conditions.set_injured(injured))?;
        debug!("{} marked injured", pet);
        Ok(())
    }

    pub fn pet_set_pregnant(&mut self, pet: PetId, pregnant: Pregnant) -> ClinicResult<()> {
        self.update(pet, |p| p.conditions.set_pregnant(pregnant))?;
        debug!("{} marked pregnant", pet);
        Ok(())
    }

    pub fn pet_clear_healthy(&mut self, pet: PetId) -> ClinicResult<Healthy> {
        self.require_condition(pet, ConditionKind::Healthy)?;
        let mut cleared = None;
        self.update(pet, |p| cleared = p.conditions.clear_healthy())?;
        cleared.ok_or_else(|| missing_condition(pet, ConditionKind::Healthy))
    }

    pub fn pet_clear_injured(&mut self, pet: PetId) -> ClinicResult<Injured> {
        self.require_condition(pet, ConditionKind::Injured)?;
        let mut cleared = None;
        self.update(pet, |p| cleared = p.conditions.clear_injured())?;
        cleared.ok_or_else(|| missing_condition(pet, ConditionKind::Injured))
    }

    pub fn pet_clear_pregnant(&mut self, pet: PetId) -> ClinicResult<Pregnant> {
        self.require_condition(pet, ConditionKind::Pregnant)?;
        let mut cleared = None;
        self.update(pet, |p| cleared = p.conditions.clear_pregnant())?;
        cleared.ok_or_else(|| missing_condition(pet, ConditionKind::Pregnant))
    }

    fn require_condition(&self, pet: PetId, kind: ConditionKind) -> ClinicResult<()> {
        if self.get(pet)?.conditions.has(kind) {
            Ok(())
        } else {
            Err(missing_condition(pet, kind))
        }
    }
}

fn missing_condition(pet: PetId, kind: ConditionKind) -> ClinicError {
    ClinicError::NotFound(format!("{} is not {}", pet, kind))
}
