//! Pet ↔ Appointment, qualified by appointment identity.
//!
//! A pet keeps its appointments keyed by identity; an appointment belongs to
//! at most one pet.

use log::debug;

use super::{require, Clinic, ClinicError, ClinicResult};
use crate::models::{Appointment, AppointmentId, Pet, PetId};

impl Clinic {
    pub fn pet_add_appointment(&mut self, pet: PetId, appointment: AppointmentId) -> ClinicResult<()> {
        self.link_pet_appointment(pet, appointment)
    }

    pub fn appointment_set_pet(&mut self, appointment: AppointmentId, pet: PetId) -> ClinicResult<()> {
        self.link_pet_appointment(pet, appointment)
    }

    pub fn pet_remove_appointment(
        &mut self,
        pet: PetId,
        appointment: AppointmentId,
    ) -> ClinicResult<()> {
        self.unlink_pet_appointment(pet, appointment)
    }

    /// Detach an appointment from whichever pet it belongs to.
    pub fn appointment_clear_pet(&mut self, appointment: AppointmentId) -> ClinicResult<()> {
        let pet = self
            .get(appointment)?
            .pet
            .ok_or_else(|| ClinicError::NotFound(format!("{} has no pet", appointment)))?;
        self.unlink_pet_appointment(pet, appointment)
    }

    /// Qualified lookup: the pet's appointment with the given identity.
    pub fn pet_appointment(
        &self,
        pet: PetId,
        appointment: AppointmentId,
    ) -> ClinicResult<&Appointment> {
        if !self.get(pet)?.appointments.contains(&appointment) {
            return Err(ClinicError::NotFound(format!(
                "{} has no {}",
                pet, appointment
            )));
        }
        self.get(appointment)
    }

    /// Appointments of a pet, in identity order.
    pub fn pet_appointments(&self, pet: PetId) -> ClinicResult<Vec<&Appointment>> {
        let pet = self.get(pet)?;
        pet.appointments.iter().map(|id| self.get(*id)).collect()
    }

    fn link_pet_appointment(&mut self, pet: PetId, appointment: AppointmentId) -> ClinicResult<()> {
        require(pet)?;
        require(appointment)?;
        let has_key = self.get(pet)?.appointments.contains(&appointment);
        let owner = self.get(appointment)?.pet;

        if has_key || owner == Some(pet) {
            return Err(ClinicError::Duplicate(format!(
                "{} already has {}",
                pet, appointment
            )));
        }
        if let Some(other) = owner {
            return Err(ClinicError::InvalidOperation(format!(
                "{} already belongs to {}",
                appointment, other
            )));
        }

        self.get_mut(pet)?.appointments.insert(appointment);
        self.get_mut(appointment)?.pet = Some(pet);

        self.save::<Pet>()?;
        self.save::<Appointment>()?;
        debug!("{} added to {}", appointment, pet);
        Ok(())
    }

    fn unlink_pet_appointment(&mut self, pet: PetId, appointment: AppointmentId) -> ClinicResult<()> {
        let has_key = self.get(pet)?.appointments.contains(&appointment);
        if !has_key || self.get(appointment)?.pet != Some(pet) {
            return Err(ClinicError::NotFound(format!(
                "{} has no {}",
                pet, appointment
            )));
        }

        self.get_mut(pet)?.appointments.remove(&appointment);
        self.get_mut(appointment)?.pet = None;

        self.save::<Pet>()?;
        self.save::<Appointment>()?;
        debug!("{} removed from {}", appointment, pet);
        Ok(())
    }
}
