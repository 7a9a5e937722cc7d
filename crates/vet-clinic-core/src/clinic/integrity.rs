//! Whole-graph consistency checks.
//!
//! Association operations keep both sides in step, so a clean graph reports
//! nothing. Violations can still appear when backing files are edited or
//! lost independently of each other.

use std::collections::BTreeSet;
use std::fmt;

use super::Clinic;
use crate::models::ConditionKind;
use crate::store::{EntityId, Record};

/// A broken association found by [`Clinic::check_integrity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityViolation {
    /// Record the problem was found on (e.g. "pet #3")
    pub record: String,
    /// What is wrong
    pub detail: String,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record, self.detail)
    }
}

#[derive(Default)]
struct Report {
    violations: Vec<IntegrityViolation>,
}

impl Report {
    fn push(&mut self, record: impl EntityId, detail: String) {
        self.violations.push(IntegrityViolation {
            record: record.to_string(),
            detail,
        });
    }

    /// Record a violation unless `ok` holds.
    fn check(&mut self, ok: bool, record: impl EntityId, detail: impl FnOnce() -> String) {
        if !ok {
            self.push(record, detail());
        }
    }
}

impl Clinic {
    /// Check that every association is symmetric and every reference resolves.
    pub fn check_integrity(&self) -> Vec<IntegrityViolation> {
        let mut report = Report::default();
        self.check_clients_and_pets(&mut report);
        self.check_species(&mut report);
        self.check_appointments(&mut report);
        self.check_vets(&mut report);
        self.check_payments(&mut report);
        self.check_doses(&mut report);
        self.check_components(&mut report);
        report.violations
    }

    fn check_clients_and_pets(&self, report: &mut Report) {
        for client in self.clients.iter() {
            for pet in &client.pets {
                let back = self.pets.get(*pet).map(|p| p.client);
                report.check(back == Some(client.id()), client.id(), || {
                    format!("lists {} which is not owned by it", pet)
                });
            }
        }

        for pet in self.pets.iter() {
            let id = pet.id();
            let owned = self
                .clients
                .get(pet.client)
                .is_some_and(|c| c.pets.contains(&id));
            report.check(owned, id, || {
                format!("owner {} is missing or does not list it", pet.client)
            });

            if let Some(specie) = pet.specie {
                let listed = self
                    .species
                    .get(specie)
                    .is_some_and(|s| s.pets.contains(&id));
                report.check(listed, id, || {
                    format!("{} is missing or does not list it", specie)
                });
            }

            let conditions = &pet.conditions;
            report.check(
                !(conditions.has(ConditionKind::Healthy) && conditions.has(ConditionKind::Injured)),
                id,
                || "holds both Healthy and Injured".to_string(),
            );

            for appointment in &pet.appointments {
                let back = self.appointments.get(*appointment).and_then(|a| a.pet);
                report.check(back == Some(id), id, || {
                    format!("{} does not point back to it", appointment)
                });
            }
        }
    }

    fn check_species(&self, report: &mut Report) {
        for specie in self.species.iter() {
            for pet in &specie.pets {
                let back = self.pets.get(*pet).and_then(|p| p.specie);
                report.check(back == Some(specie.id()), specie.id(), || {
                    format!("lists {} which is classified elsewhere", pet)
                });
            }
        }
    }

    fn check_appointments(&self, report: &mut Report) {
        for appointment in self.appointments.iter() {
            let id = appointment.id();
            if let Some(pet) = appointment.pet {
                let listed = self
                    .pets
                    .get(pet)
                    .is_some_and(|p| p.appointments.contains(&id));
                report.check(listed, id, || {
                    format!("{} is missing or does not list it", pet)
                });
            }
            if let Some(vet) = appointment.vet {
                let listed = self
                    .vets
                    .get(vet)
                    .is_some_and(|v| v.appointments.contains(&id));
                report.check(listed, id, || {
                    format!("{} is missing or does not list it", vet)
                });
            }
            for payment in &appointment.payments {
                let back = self.payments.get(*payment).and_then(|p| p.appointment);
                report.check(back == Some(id), id, || {
                    format!("{} does not point back to it", payment)
                });
            }
        }
    }

    fn check_vets(&self, report: &mut Report) {
        for vet in self.vets.iter() {
            let id = vet.id();
            for appointment in &vet.appointments {
                let back = self.appointments.get(*appointment).and_then(|a| a.vet);
                report.check(back == Some(id), id, || {
                    format!("{} does not point back to it", appointment)
                });
            }
            for prescription in &vet.prescriptions {
                let back = self.prescriptions.get(*prescription).and_then(|p| p.vet);
                report.check(back == Some(id), id, || {
                    format!("{} does not point back to it", prescription)
                });
            }
        }

        for prescription in self.prescriptions.iter() {
            if let Some(vet) = prescription.vet {
                let id = prescription.id();
                let listed = self
                    .vets
                    .get(vet)
                    .is_some_and(|v| v.prescriptions.contains(&id));
                report.check(listed, id, || {
                    format!("{} is missing or does not list it", vet)
                });
            }
        }
    }

    fn check_payments(&self, report: &mut Report) {
        for payment in self.payments.iter() {
            if let Some(appointment) = payment.appointment {
                let id = payment.id();
                let listed = self
                    .appointments
                    .get(appointment)
                    .is_some_and(|a| a.payments.contains(&id));
                report.check(listed, id, || {
                    format!("{} is missing or does not list it", appointment)
                });
            }
        }
    }

    fn check_doses(&self, report: &mut Report) {
        let mut pairs = BTreeSet::new();
        for dose in self.doses.iter() {
            let id = dose.id();
            let on_medication = self
                .medications
                .get(dose.medication)
                .is_some_and(|m| m.doses.contains(&id));
            report.check(on_medication, id, || {
                format!("{} is missing or does not list it", dose.medication)
            });

            let on_prescription = self
                .prescriptions
                .get(dose.prescription)
                .is_some_and(|p| p.doses.contains(&id));
            report.check(on_prescription, id, || {
                format!("{} is missing or does not list it", dose.prescription)
            });

            report.check(
                pairs.insert((dose.medication, dose.prescription)),
                id,
                || {
                    format!(
                        "second dose for {} on {}",
                        dose.medication, dose.prescription
                    )
                },
            );
        }

        for medication in self.medications.iter() {
            for dose in &medication.doses {
                let back = self.doses.get(*dose).map(|d| d.medication);
                report.check(back == Some(medication.id()), medication.id(), || {
                    format!("{} does not point back to it", dose)
                });
            }
        }
        for prescription in self.prescriptions.iter() {
            for dose in &prescription.doses {
                let back = self.doses.get(*dose).map(|d| d.prescription);
                report.check(back == Some(prescription.id()), prescription.id(), || {
                    format!("{} does not point back to it", dose)
                });
            }
        }
    }

    fn check_components(&self, report: &mut Report) {
        for medication in self.medications.iter() {
            let id = medication.id();
            for component in &medication.components {
                let back = self
                    .medications
                    .get(*component)
                    .is_some_and(|c| c.component_of.contains(&id));
                report.check(back, id, || {
                    format!("component {} is missing or does not list it", component)
                });
                report.check(!self.reaches(*component, id), id, || {
                    format!("component {} leads back to it", component)
                });
            }
            for composite in &medication.component_of {
                let listed = self
                    .medications
                    .get(*composite)
                    .is_some_and(|c| c.components.contains(&id));
                report.check(listed, id, || {
                    format!("{} does not list it as a component", composite)
                });
            }
        }
    }
}
