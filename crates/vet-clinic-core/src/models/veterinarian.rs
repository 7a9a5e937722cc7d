//! Veterinarian model.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AppointmentId, PrescriptionId, VeterinarianId};
use crate::store::{Internal, Record};

/// Field of practice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Specialization {
    GeneralPractice,
    Surgery,
    Dentistry,
    Dermatology,
    Cardiology,
    ExoticAnimals,
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Specialization::GeneralPractice => "general practice",
            Specialization::Surgery => "surgery",
            Specialization::Dentistry => "dentistry",
            Specialization::Dermatology => "dermatology",
            Specialization::Cardiology => "cardiology",
            Specialization::ExoticAnimals => "exotic animals",
        };
        f.write_str(name)
    }
}

/// A veterinarian working at the clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Veterinarian {
    pub(crate) id: VeterinarianId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Field of practice
    pub specialization: Specialization,
    /// Contact phone number
    pub phone: String,
    /// Contact e-mail
    pub email: String,
    /// Years in practice
    pub years_of_experience: u32,
    /// Appointments this vet is assigned to
    #[serde(default)]
    pub(crate) appointments: BTreeSet<AppointmentId>,
    /// Prescriptions this vet issued
    #[serde(default)]
    pub(crate) prescriptions: BTreeSet<PrescriptionId>,
}

impl Veterinarian {
    /// Create a new veterinarian with required fields.
    pub fn new(
        first_name: String,
        last_name: String,
        specialization: Specialization,
        phone: String,
        email: String,
        years_of_experience: u32,
    ) -> Self {
        Self {
            id: VeterinarianId::UNASSIGNED,
            first_name,
            last_name,
            specialization,
            phone,
            email,
            years_of_experience,
            appointments: BTreeSet::new(),
            prescriptions: BTreeSet::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn appointments(&self) -> &BTreeSet<AppointmentId> {
        &self.appointments
    }

    pub fn prescriptions(&self) -> &BTreeSet<PrescriptionId> {
        &self.prescriptions
    }
}

impl Record for Veterinarian {
    type Id = VeterinarianId;
    const KIND: &'static str = "veterinarians";

    fn id(&self) -> VeterinarianId {
        self.id
    }

    fn set_id(&mut self, id: VeterinarianId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.appointments.clear();
        self.prescriptions.clear();
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.appointments.clone_from(&from.appointments);
        self.prescriptions.clone_from(&from.prescriptions);
    }
}

impl fmt::Display for Veterinarian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Veterinarian {}: Dr. {} | {} | {} years | phone {} | email {}",
            self.id.0,
            self.full_name(),
            self.specialization,
            self.years_of_experience,
            self.phone,
            self.email
        )
    }
}
