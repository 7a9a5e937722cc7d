//! Pet model.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AppointmentId, ClientId, Conditions, PetId, SpecieId};
use crate::store::{Internal, Record};

/// Biological sex of a pet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

/// A patient animal.
///
/// Once stored, a pet always has exactly one owning client. The species is
/// optional, and appointments are keyed by their identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub(crate) id: PetId,
    /// Pet name
    pub name: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Biological sex
    pub sex: Sex,
    /// Weight in kg
    pub weight_kg: f64,
    /// Current condition roles
    #[serde(default)]
    pub conditions: Conditions,
    /// Owning client
    pub(crate) client: ClientId,
    /// Species, if known
    #[serde(default)]
    pub(crate) specie: Option<SpecieId>,
    /// Appointments qualified by appointment identity
    #[serde(default)]
    pub(crate) appointments: BTreeSet<AppointmentId>,
}

impl Pet {
    /// Create a new pet with required fields.
    pub fn new(name: String, birth_date: NaiveDate, sex: Sex, weight_kg: f64) -> Self {
        Self {
            id: PetId::UNASSIGNED,
            name,
            birth_date,
            sex,
            weight_kg,
            conditions: Conditions::default(),
            client: ClientId::UNASSIGNED,
            specie: None,
            appointments: BTreeSet::new(),
        }
    }

    pub fn client(&self) -> ClientId {
        self.client
    }

    pub fn specie(&self) -> Option<SpecieId> {
        self.specie
    }

    pub fn appointments(&self) -> &BTreeSet<AppointmentId> {
        &self.appointments
    }

    pub fn has_appointment(&self, appointment: AppointmentId) -> bool {
        self.appointments.contains(&appointment)
    }
}

impl Record for Pet {
    type Id = PetId;
    const KIND: &'static str = "pets";

    fn id(&self) -> PetId {
        self.id
    }

    fn set_id(&mut self, id: PetId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.client = ClientId::UNASSIGNED;
        self.specie = None;
        self.appointments.clear();
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.client = from.client;
        self.specie = from.specie;
        self.appointments.clone_from(&from.appointments);
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pet {}: {} | {} | born {} | {:.2} kg | {}",
            self.id.0, self.name, self.sex, self.birth_date, self.weight_kg, self.conditions
        )
    }
}
