//! Dose model: the link between a medication and a prescription.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DoseId, MedicationId, PrescriptionId};
use crate::store::{Internal, Record};

/// One medication on one prescription, with dose-specific data.
///
/// At most one dose exists per (medication, prescription) pair. Both
/// references are fixed when the dose is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dose {
    pub(crate) id: DoseId,
    /// How to administer (e.g., "1 tablet every 12h")
    pub description: String,
    /// Number of units dispensed
    pub quantity: u32,
    pub(crate) medication: MedicationId,
    pub(crate) prescription: PrescriptionId,
}

impl Dose {
    pub fn new(description: String, quantity: u32) -> Self {
        Self {
            id: DoseId::UNASSIGNED,
            description,
            quantity,
            medication: MedicationId::UNASSIGNED,
            prescription: PrescriptionId::UNASSIGNED,
        }
    }

    pub fn medication(&self) -> MedicationId {
        self.medication
    }

    pub fn prescription(&self) -> PrescriptionId {
        self.prescription
    }
}

impl Record for Dose {
    type Id = DoseId;
    const KIND: &'static str = "doses";

    fn id(&self) -> DoseId {
        self.id
    }

    fn set_id(&mut self, id: DoseId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.medication = MedicationId::UNASSIGNED;
        self.prescription = PrescriptionId::UNASSIGNED;
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.medication = from.medication;
        self.prescription = from.prescription;
    }
}

impl fmt::Display for Dose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dose {}: {} x{}",
            self.id.0, self.description, self.quantity
        )
    }
}
