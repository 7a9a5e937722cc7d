//! Species model.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PetId, SpecieId};
use crate::store::{Internal, Record};

/// An animal species (e.g., "Dog").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Specie {
    pub(crate) id: SpecieId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub(crate) pets: BTreeSet<PetId>,
}

impl Specie {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: SpecieId::UNASSIGNED,
            name,
            description,
            pets: BTreeSet::new(),
        }
    }

    pub fn pets(&self) -> &BTreeSet<PetId> {
        &self.pets
    }
}

impl Record for Specie {
    type Id = SpecieId;
    const KIND: &'static str = "species";

    fn id(&self) -> SpecieId {
        self.id
    }

    fn set_id(&mut self, id: SpecieId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.pets.clear();
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.pets.clone_from(&from.pets);
    }
}

impl fmt::Display for Specie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Specie {}: {} | {}", self.id.0, self.name, self.description)
    }
}
