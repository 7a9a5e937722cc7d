//! Appointment ↔ Payment: an appointment owns many payments.

use log::debug;

use super::{require, Clinic, ClinicError, ClinicResult};
use crate::models::{Appointment, AppointmentId, Payment, PaymentId};

impl Clinic {
    pub fn appointment_add_payment(
        &mut self,
        appointment: AppointmentId,
        payment: PaymentId,
    ) -> ClinicResult<()> {
        self.link_appointment_payment(appointment, payment)
    }

    pub fn payment_set_appointment(
        &mut self,
        payment: PaymentId,
        appointment: AppointmentId,
    ) -> ClinicResult<()> {
        self.link_appointment_payment(appointment, payment)
    }

    /// Take a payment off an appointment. The payment record is kept.
    pub fn appointment_remove_payment(
        &mut self,
        appointment: AppointmentId,
        payment: PaymentId,
    ) -> ClinicResult<()> {
        let listed = self.get(appointment)?.payments.contains(&payment);
        if !listed || self.get(payment)?.appointment != Some(appointment) {
            return Err(ClinicError::NotFound(format!(
                "{} is not paid by {}",
                appointment, payment
            )));
        }

        self.get_mut(appointment)?.payments.remove(&payment);
        self.get_mut(payment)?.appointment = None;

        self.save::<Appointment>()?;
        self.save::<Payment>()?;
        debug!("{} taken off {}", payment, appointment);
        Ok(())
    }

    pub fn appointment_payments(&self, appointment: AppointmentId) -> ClinicResult<Vec<&Payment>> {
        let appointment = self.get(appointment)?;
        appointment.payments.iter().map(|id| self.get(*id)).collect()
    }

    /// Sum of all payments towards an appointment, in cents.
    pub fn appointment_paid_cents(&self, appointment: AppointmentId) -> ClinicResult<u64> {
        Ok(self
            .appointment_payments(appointment)?
            .iter()
            .map(|p| p.amount_cents)
            .sum())
    }

    fn link_appointment_payment(
        &mut self,
        appointment: AppointmentId,
        payment: PaymentId,
    ) -> ClinicResult<()> {
        require(appointment)?;
        require(payment)?;
        self.get(appointment)?;
        match self.get(payment)?.appointment {
            Some(current) if current == appointment => {
                return Err(ClinicError::Duplicate(format!(
                    "{} already pays {}",
                    payment, appointment
                )));
            }
            Some(current) => {
                return Err(ClinicError::InvalidOperation(format!(
                    "{} already belongs to {}",
                    payment, current
                )));
            }
            None => {}
        }

        self.get_mut(appointment)?.payments.insert(payment);
        self.get_mut(payment)?.appointment = Some(appointment);

        self.save::<Appointment>()?;
        self.save::<Payment>()?;
        debug!("{} added to {}", payment, appointment);
        Ok(())
    }
}
