//! Medication ↔ Prescription through [`Dose`] association records.

use log::debug;

use super::{require, Clinic, ClinicError, ClinicResult};
use crate::models::{Dose, DoseId, Medication, MedicationId, Prescription, PrescriptionId};
use crate::store::{Internal, Record};

impl Clinic {
    /// Put a medication on a prescription.
    ///
    /// At most one dose may exist per (medication, prescription) pair.
    pub fn create_dose(
        &mut self,
        dose: Dose,
        medication: MedicationId,
        prescription: PrescriptionId,
    ) -> ClinicResult<DoseId> {
        require(medication)?;
        require(prescription)?;
        self.get(medication)?;
        self.get(prescription)?;
        if let Some(existing) = self.find_dose(medication, prescription) {
            return Err(ClinicError::Duplicate(format!(
                "{} already links {} and {}",
                existing.id(),
                medication,
                prescription
            )));
        }

        let mut dose = dose;
        dose.clear_links(Internal(()));
        dose.medication = medication;
        dose.prescription = prescription;
        let id = self.doses.add(dose)?;

        self.get_mut(medication)?.doses.insert(id);
        self.get_mut(prescription)?.doses.insert(id);
        self.save::<Medication>()?;
        self.save::<Prescription>()?;
        debug!("{} links {} and {}", id, medication, prescription);
        Ok(id)
    }

    /// Delete a dose and detach it from its medication and prescription.
    pub fn remove_dose(&mut self, dose: DoseId) -> ClinicResult<()> {
        let (medication, prescription) = {
            let record = self.get(dose)?;
            (record.medication, record.prescription)
        };

        if let Ok(record) = self.get_mut(medication) {
            record.doses.remove(&dose);
        }
        if let Ok(record) = self.get_mut(prescription) {
            record.doses.remove(&dose);
        }
        self.save::<Medication>()?;
        self.save::<Prescription>()?;
        self.doses.remove(dose)?;
        debug!("{} removed", dose);
        Ok(())
    }

    /// The dose linking a medication to a prescription.
    pub fn dose_between(
        &self,
        medication: MedicationId,
        prescription: PrescriptionId,
    ) -> ClinicResult<&Dose> {
        self.get(medication)?;
        self.get(prescription)?;
        self.find_dose(medication, prescription).ok_or_else(|| {
            ClinicError::NotFound(format!(
                "no dose links {} and {}",
                medication, prescription
            ))
        })
    }

    pub fn prescription_doses(&self, prescription: PrescriptionId) -> ClinicResult<Vec<&Dose>> {
        let prescription = self.get(prescription)?;
        prescription.doses.iter().map(|id| self.get(*id)).collect()
    }

    pub fn medication_doses(&self, medication: MedicationId) -> ClinicResult<Vec<&Dose>> {
        let medication = self.get(medication)?;
        medication.doses.iter().map(|id| self.get(*id)).collect()
    }

    /// Medications on a prescription, via its doses.
    pub fn prescription_medications(
        &self,
        prescription: PrescriptionId,
    ) -> ClinicResult<Vec<&Medication>> {
        self.prescription_doses(prescription)?
            .into_iter()
            .map(|dose| self.get(dose.medication))
            .collect()
    }

    /// Prescriptions a medication appears on, via its doses.
    pub fn medication_prescriptions(
        &self,
        medication: MedicationId,
    ) -> ClinicResult<Vec<&Prescription>> {
        self.medication_doses(medication)?
            .into_iter()
            .map(|dose| self.get(dose.prescription))
            .collect()
    }

    fn find_dose(&self, medication: MedicationId, prescription: PrescriptionId) -> Option<&Dose> {
        let record = self.medications.get(medication)?;
        record
            .doses
            .iter()
            .filter_map(|id| self.doses.get(*id))
            .find(|dose| dose.prescription == prescription)
    }
}
