//! Appointment model.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{AppointmentId, PaymentId, PetId, VeterinarianId};
use crate::store::{Internal, Record};

/// A scheduled visit.
///
/// Belongs to at most one pet and at most one veterinarian, and owns its
/// payments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub(crate) id: AppointmentId,
    /// Visit date and time
    pub scheduled_at: NaiveDateTime,
    /// Price in cents
    pub price_cents: u64,
    /// Reason for the visit
    pub reason: String,
    #[serde(default)]
    pub(crate) pet: Option<PetId>,
    #[serde(default)]
    pub(crate) vet: Option<VeterinarianId>,
    #[serde(default)]
    pub(crate) payments: BTreeSet<PaymentId>,
}

impl Appointment {
    /// Create a new appointment with required fields.
    pub fn new(scheduled_at: NaiveDateTime, price_cents: u64, reason: String) -> Self {
        Self {
            id: AppointmentId::UNASSIGNED,
            scheduled_at,
            price_cents,
            reason,
            pet: None,
            vet: None,
            payments: BTreeSet::new(),
        }
    }

    pub fn pet(&self) -> Option<PetId> {
        self.pet
    }

    pub fn vet(&self) -> Option<VeterinarianId> {
        self.vet
    }

    pub fn payments(&self) -> &BTreeSet<PaymentId> {
        &self.payments
    }
}

impl Record for Appointment {
    type Id = AppointmentId;
    const KIND: &'static str = "appointments";

    fn id(&self) -> AppointmentId {
        self.id
    }

    fn set_id(&mut self, id: AppointmentId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.pet = None;
        self.vet = None;
        self.payments.clear();
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.pet = from.pet;
        self.vet = from.vet;
        self.payments.clone_from(&from.payments);
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment {}: {} | {} | price {}",
            self.id.0,
            self.scheduled_at.format("%Y-%m-%d %H:%M"),
            self.reason,
            format_cents(self.price_cents)
        )
    }
}

/// Render an amount in cents as `units.cc`.
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
