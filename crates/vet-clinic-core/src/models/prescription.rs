//! Prescription model.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DoseId, PrescriptionId, VeterinarianId};
use crate::store::{Internal, Record};

/// A prescription issued by a veterinarian.
///
/// Medications are attached through [`Dose`](super::Dose) records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    pub(crate) id: PrescriptionId,
    /// Date of issue
    pub issued_on: NaiveDate,
    /// Last day the prescription may be filled
    pub valid_until: NaiveDate,
    /// Free-text instructions for the owner
    pub instructions: String,
    #[serde(default)]
    pub(crate) vet: Option<VeterinarianId>,
    #[serde(default)]
    pub(crate) doses: BTreeSet<DoseId>,
}

impl Prescription {
    pub fn new(issued_on: NaiveDate, valid_until: NaiveDate, instructions: String) -> Self {
        Self {
            id: PrescriptionId::UNASSIGNED,
            issued_on,
            valid_until,
            instructions,
            vet: None,
            doses: BTreeSet::new(),
        }
    }

    pub fn vet(&self) -> Option<VeterinarianId> {
        self.vet
    }

    pub fn doses(&self) -> &BTreeSet<DoseId> {
        &self.doses
    }

    /// Whether the prescription can still be filled on `date`.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        date >= self.issued_on && date <= self.valid_until
    }
}

impl Record for Prescription {
    type Id = PrescriptionId;
    const KIND: &'static str = "prescriptions";

    fn id(&self) -> PrescriptionId {
        self.id
    }

    fn set_id(&mut self, id: PrescriptionId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.vet = None;
        self.doses.clear();
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.vet = from.vet;
        self.doses.clone_from(&from.doses);
    }
}

impl fmt::Display for Prescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Prescription {}: issued {} | valid until {} | {}",
            self.id.0, self.issued_on, self.valid_until, self.instructions
        )
    }
}
