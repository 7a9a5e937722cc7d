//! Medication ↔ Medication components (reflexive many-to-many).
//!
//! The component graph stays acyclic: a medication cannot contain itself,
//! directly or through any chain of components.

use std::collections::BTreeSet;

use log::debug;

use super::{require, Clinic, ClinicError, ClinicResult};
use crate::models::{Medication, MedicationId};

impl Clinic {
    /// Record `component` as an ingredient of `medication`.
    pub fn medication_add_component(
        &mut self,
        medication: MedicationId,
        component: MedicationId,
    ) -> ClinicResult<()> {
        require(medication)?;
        require(component)?;
        let already = self.get(medication)?.components.contains(&component);
        self.get(component)?;

        if medication == component {
            return Err(ClinicError::InvalidOperation(format!(
                "{} cannot be its own component",
                medication
            )));
        }
        if already {
            return Err(ClinicError::Duplicate(format!(
                "{} already contains {}",
                medication, component
            )));
        }
        if self.reaches(component, medication) {
            return Err(ClinicError::InvalidOperation(format!(
                "{} is reachable from {}; adding it as a component would form a cycle",
                medication, component
            )));
        }

        self.get_mut(medication)?.components.insert(component);
        self.get_mut(component)?.component_of.insert(medication);

        self.save::<Medication>()?;
        debug!("{} now contains {}", medication, component);
        Ok(())
    }

    pub fn medication_remove_component(
        &mut self,
        medication: MedicationId,
        component: MedicationId,
    ) -> ClinicResult<()> {
        let listed = self.get(medication)?.components.contains(&component);
        if !listed || !self.get(component)?.component_of.contains(&medication) {
            return Err(ClinicError::NotFound(format!(
                "{} does not contain {}",
                medication, component
            )));
        }

        self.get_mut(medication)?.components.remove(&component);
        self.get_mut(component)?.component_of.remove(&medication);

        self.save::<Medication>()?;
        debug!("{} no longer contains {}", medication, component);
        Ok(())
    }

    /// Direct components of a medication.
    pub fn medication_components(&self, medication: MedicationId) -> ClinicResult<Vec<&Medication>> {
        let medication = self.get(medication)?;
        medication.components.iter().map(|id| self.get(*id)).collect()
    }

    /// Every medication reachable through components, excluding `medication`.
    pub fn medication_all_components(
        &self,
        medication: MedicationId,
    ) -> ClinicResult<BTreeSet<MedicationId>> {
        self.get(medication)?;
        let mut seen = BTreeSet::new();
        let mut stack = vec![medication];
        while let Some(current) = stack.pop() {
            let Some(record) = self.medications.get(current) else {
                continue;
            };
            for next in &record.components {
                if seen.insert(*next) {
                    stack.push(*next);
                }
            }
        }
        seen.remove(&medication);
        Ok(seen)
    }

    /// Whether `target` is reachable from `from` along component links.
    pub(crate) fn reaches(&self, from: MedicationId, target: MedicationId) -> bool {
        let mut seen = BTreeSet::new();
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(record) = self.medications.get(current) {
                stack.extend(record.components.iter().copied());
            }
        }
        false
    }
}
