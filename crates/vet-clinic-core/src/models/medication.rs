//! Medication model.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DoseId, MedicationId};
use crate::store::{Internal, Record};

/// Pharmaceutical form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MedicationForm {
    Tablet,
    Capsule,
    Liquid,
    Injection,
    Ointment,
}

impl fmt::Display for MedicationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MedicationForm::Tablet => "tablet",
            MedicationForm::Capsule => "capsule",
            MedicationForm::Liquid => "liquid",
            MedicationForm::Injection => "injection",
            MedicationForm::Ointment => "ointment",
        };
        f.write_str(name)
    }
}

/// A medication, possibly composed of other medications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub(crate) id: MedicationId,
    /// Product name
    pub name: String,
    /// Pharmaceutical form
    pub form: MedicationForm,
    /// Manufacturer, if known
    pub manufacturer: Option<String>,
    /// Direct components of this medication
    #[serde(default)]
    pub(crate) components: BTreeSet<MedicationId>,
    /// Medications that list this one as a component
    #[serde(default)]
    pub(crate) component_of: BTreeSet<MedicationId>,
    #[serde(default)]
    pub(crate) doses: BTreeSet<DoseId>,
}

impl Medication {
    pub fn new(name: String, form: MedicationForm) -> Self {
        Self {
            id: MedicationId::UNASSIGNED,
            name,
            form,
            manufacturer: None,
            components: BTreeSet::new(),
            component_of: BTreeSet::new(),
            doses: BTreeSet::new(),
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: String) -> Self {
        self.manufacturer = Some(manufacturer);
        self
    }

    pub fn components(&self) -> &BTreeSet<MedicationId> {
        &self.components
    }

    pub fn component_of(&self) -> &BTreeSet<MedicationId> {
        &self.component_of
    }

    pub fn doses(&self) -> &BTreeSet<DoseId> {
        &self.doses
    }
}

impl Record for Medication {
    type Id = MedicationId;
    const KIND: &'static str = "medications";

    fn id(&self) -> MedicationId {
        self.id
    }

    fn set_id(&mut self, id: MedicationId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.components.clear();
        self.component_of.clear();
        self.doses.clear();
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.components.clone_from(&from.components);
        self.component_of.clone_from(&from.component_of);
        self.doses.clone_from(&from.doses);
    }
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Medication {}: {} | {} | manufacturer {}",
            self.id.0,
            self.name,
            self.form,
            self.manufacturer.as_deref().unwrap_or("-")
        )
    }
}
