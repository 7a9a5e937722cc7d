//! Payment model.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{format_cents, AppointmentId, PaymentId};
use crate::store::{Internal, Record};

/// How a payment was made.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("cash"),
            PaymentMethod::Card => f.write_str("card"),
            PaymentMethod::BankTransfer => f.write_str("bank transfer"),
        }
    }
}

/// A payment towards an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub(crate) id: PaymentId,
    /// Amount in cents
    pub amount_cents: u64,
    pub method: PaymentMethod,
    pub paid_at: NaiveDateTime,
    #[serde(default)]
    pub(crate) appointment: Option<AppointmentId>,
}

impl Payment {
    pub fn new(amount_cents: u64, method: PaymentMethod, paid_at: NaiveDateTime) -> Self {
        Self {
            id: PaymentId::UNASSIGNED,
            amount_cents,
            method,
            paid_at,
            appointment: None,
        }
    }

    pub fn appointment(&self) -> Option<AppointmentId> {
        self.appointment
    }
}

impl Record for Payment {
    type Id = PaymentId;
    const KIND: &'static str = "payments";

    fn id(&self) -> PaymentId {
        self.id
    }

    fn set_id(&mut self, id: PaymentId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.appointment = None;
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.appointment = from.appointment;
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Payment {}: {} by {} on {}",
            self.id.0,
            format_cents(self.amount_cents),
            self.method,
            self.paid_at.format("%Y-%m-%d %H:%M")
        )
    }
}
