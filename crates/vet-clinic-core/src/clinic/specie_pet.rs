//! Specie ↔ Pet: optional, one specie to many pets.

use log::debug;

use super::{require, Clinic, ClinicError, ClinicResult};
use crate::models::{Pet, PetId, Specie, SpecieId};

impl Clinic {
    /// Classify a pet under a specie, detaching it from its previous one.
    pub fn specie_add_pet(&mut self, specie: SpecieId, pet: PetId) -> ClinicResult<()> {
        self.link_specie_pet(specie, pet)
    }

    /// Same effect as [`Clinic::specie_add_pet`].
    pub fn pet_set_specie(&mut self, pet: PetId, specie: SpecieId) -> ClinicResult<()> {
        self.link_specie_pet(specie, pet)
    }

    pub fn specie_remove_pet(&mut self, specie: SpecieId, pet: PetId) -> ClinicResult<()> {
        self.unlink_specie_pet(specie, pet)
    }

    /// Drop a pet's specie, whichever it is.
    pub fn pet_clear_specie(&mut self, pet: PetId) -> ClinicResult<()> {
        let specie = self
            .get(pet)?
            .specie
            .ok_or_else(|| ClinicError::NotFound(format!("{} has no specie", pet)))?;
        self.unlink_specie_pet(specie, pet)
    }

    pub fn specie_pets(&self, specie: SpecieId) -> ClinicResult<Vec<&Pet>> {
        let specie = self.get(specie)?;
        specie.pets.iter().map(|id| self.get(*id)).collect()
    }

    fn link_specie_pet(&mut self, specie: SpecieId, pet: PetId) -> ClinicResult<()> {
        require(specie)?;
        self.get(specie)?;
        let previous = self.get(pet)?.specie;

        if previous == Some(specie) {
            return Err(ClinicError::Duplicate(format!(
                "{} is already classified under {}",
                pet, specie
            )));
        }

        if let Some(old) = previous {
            if let Ok(old) = self.get_mut(old) {
                old.pets.remove(&pet);
            }
        }
        self.get_mut(specie)?.pets.insert(pet);
        self.get_mut(pet)?.specie = Some(specie);

        self.save::<Specie>()?;
        self.save::<Pet>()?;
        debug!("{} classified under {}", pet, specie);
        Ok(())
    }

    fn unlink_specie_pet(&mut self, specie: SpecieId, pet: PetId) -> ClinicResult<()> {
        let linked = self.get(specie)?.pets.contains(&pet);
        if !linked || self.get(pet)?.specie != Some(specie) {
            return Err(ClinicError::NotFound(format!(
                "{} is not classified under {}",
                pet, specie
            )));
        }

        self.get_mut(specie)?.pets.remove(&pet);
        self.get_mut(pet)?.specie = None;

        self.save::<Specie>()?;
        self.save::<Pet>()?;
        debug!("{} removed from {}", pet, specie);
        Ok(())
    }
}
