//! Veterinarian ↔ Appointment and Veterinarian ↔ Prescription.
//!
//! Both are one vet to many records, and the record side holds a single
//! slot: assigning a second vet without clearing the first is rejected.

use log::debug;

use super::{require, Clinic, ClinicError, ClinicResult};
use crate::models::{
    Appointment, AppointmentId, Prescription, PrescriptionId, Veterinarian, VeterinarianId,
};

impl Clinic {
    pub fn vet_add_appointment(
        &mut self,
        vet: VeterinarianId,
        appointment: AppointmentId,
    ) -> ClinicResult<()> {
        self.link_vet_appointment(vet, appointment)
    }

    pub fn appointment_set_vet(
        &mut self,
        appointment: AppointmentId,
        vet: VeterinarianId,
    ) -> ClinicResult<()> {
        self.link_vet_appointment(vet, appointment)
    }

    pub fn vet_remove_appointment(
        &mut self,
        vet: VeterinarianId,
        appointment: AppointmentId,
    ) -> ClinicResult<()> {
        self.unlink_vet_appointment(vet, appointment)
    }

    pub fn appointment_clear_vet(&mut self, appointment: AppointmentId) -> ClinicResult<()> {
        let vet = self
            .get(appointment)?
            .vet
            .ok_or_else(|| ClinicError::NotFound(format!("{} has no veterinarian", appointment)))?;
        self.unlink_vet_appointment(vet, appointment)
    }

    pub fn vet_appointments(&self, vet: VeterinarianId) -> ClinicResult<Vec<&Appointment>> {
        let vet = self.get(vet)?;
        vet.appointments.iter().map(|id| self.get(*id)).collect()
    }

    pub fn vet_add_prescription(
        &mut self,
        vet: VeterinarianId,
        prescription: PrescriptionId,
    ) -> ClinicResult<()> {
        self.link_vet_prescription(vet, prescription)
    }

    pub fn prescription_set_vet(
        &mut self,
        prescription: PrescriptionId,
        vet: VeterinarianId,
    ) -> ClinicResult<()> {
        self.link_vet_prescription(vet, prescription)
    }

    pub fn vet_remove_prescription(
        &mut self,
        vet: VeterinarianId,
        prescription: PrescriptionId,
    ) -> ClinicResult<()> {
        self.unlink_vet_prescription(vet, prescription)
    }

    pub fn prescription_clear_vet(&mut self, prescription: PrescriptionId) -> ClinicResult<()> {
        let vet = self.get(prescription)?.vet.ok_or_else(|| {
            ClinicError::NotFound(format!("{} has no veterinarian", prescription))
        })?;
        self.unlink_vet_prescription(vet, prescription)
    }

    pub fn vet_prescriptions(&self, vet: VeterinarianId) -> ClinicResult<Vec<&Prescription>> {
        let vet = self.get(vet)?;
        vet.prescriptions.iter().map(|id| self.get(*id)).collect()
    }

    fn link_vet_appointment(
        &mut self,
        vet: VeterinarianId,
        appointment: AppointmentId,
    ) -> ClinicResult<()> {
        require(vet)?;
        require(appointment)?;
        self.get(vet)?;
        match self.get(appointment)?.vet {
            Some(current) if current == vet => {
                return Err(ClinicError::Duplicate(format!(
                    "{} is already assigned to {}",
                    vet, appointment
                )));
            }
            Some(current) => {
                return Err(ClinicError::InvalidOperation(format!(
                    "{} already has {}; clear it before assigning {}",
                    appointment, current, vet
                )));
            }
            None => {}
        }

        self.get_mut(vet)?.appointments.insert(appointment);
        self.get_mut(appointment)?.vet = Some(vet);

        self.save::<Veterinarian>()?;
        self.save::<Appointment>()?;
        debug!("{} assigned to {}", vet, appointment);
        Ok(())
    }

    fn unlink_vet_appointment(
        &mut self,
        vet: VeterinarianId,
        appointment: AppointmentId,
    ) -> ClinicResult<()> {
        let listed = self.get(vet)?.appointments.contains(&appointment);
        if !listed || self.get(appointment)?.vet != Some(vet) {
            return Err(ClinicError::NotFound(format!(
                "{} is not assigned to {}",
                vet, appointment
            )));
        }

        self.get_mut(vet)?.appointments.remove(&appointment);
        self.get_mut(appointment)?.vet = None;

        self.save::<Veterinarian>()?;
        self.save::<Appointment>()?;
        debug!("{} unassigned from {}", vet, appointment);
        Ok(())
    }

    fn link_vet_prescription(
        &mut self,
        vet: VeterinarianId,
        prescription: PrescriptionId,
    ) -> ClinicResult<()> {
        require(vet)?;
        require(prescription)?;
        self.get(vet)?;
        match self.get(prescription)?.vet {
            Some(current) if current == vet => {
                return Err(ClinicError::Duplicate(format!(
                    "{} already issued {}",
                    vet, prescription
                )));
            }
            Some(current) => {
                return Err(ClinicError::InvalidOperation(format!(
                    "{} already has {}; clear it before assigning {}",
                    prescription, current, vet
                )));
            }
            None => {}
        }

        self.get_mut(vet)?.prescriptions.insert(prescription);
        self.get_mut(prescription)?.vet = Some(vet);

        self.save::<Veterinarian>()?;
        self.save::<Prescription>()?;
        debug!("{} issued {}", vet, prescription);
        Ok(())
    }

    fn unlink_vet_prescription(
        &mut self,
        vet: VeterinarianId,
        prescription: PrescriptionId,
    ) -> ClinicResult<()> {
        let listed = self.get(vet)?.prescriptions.contains(&prescription);
        if !listed || self.get(prescription)?.vet != Some(vet) {
            return Err(ClinicError::NotFound(format!(
                "{} did not issue {}",
                vet, prescription
            )));
        }

        self.get_mut(vet)?.prescriptions.remove(&prescription);
        self.get_mut(prescription)?.vet = None;

        self.save::<Veterinarian>()?;
        self.save::<Prescription>()?;
        debug!("{} detached from {}", vet, prescription);
        Ok(())
    }
}
