//! Client (pet owner) model.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ClientId, PetId};
use crate::store::{Internal, Record};

/// A pet owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub(crate) id: ClientId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone number
    pub phone: String,
    /// Contact e-mail
    pub email: String,
    /// Postal address
    pub address: Option<String>,
    /// Pets owned by this client
    #[serde(default)]
    pub(crate) pets: BTreeSet<PetId>,
}

impl Client {
    /// Create a new client with required fields.
    pub fn new(first_name: String, last_name: String, phone: String, email: String) -> Self {
        Self {
            id: ClientId::UNASSIGNED,
            first_name,
            last_name,
            phone,
            email,
            address: None,
            pets: BTreeSet::new(),
        }
    }

    /// Stand-in owner for a pet registered without one.
    pub fn placeholder() -> Self {
        Self::new(
            "Unknown".into(),
            "Owner".into(),
            "000000000".into(),
            "unknown@clinic.local".into(),
        )
    }

    pub fn with_address(mut self, address: String) -> Self {
        self.address = Some(address);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn pets(&self) -> &BTreeSet<PetId> {
        &self.pets
    }
}

impl Record for Client {
    type Id = ClientId;
    const KIND: &'static str = "clients";

    fn id(&self) -> ClientId {
        self.id
    }

    fn set_id(&mut self, id: ClientId) {
        self.id = id;
    }

    fn clear_links(&mut self, _: Internal) {
        self.pets.clear();
    }

    fn keep_links(&mut self, from: &Self, _: Internal) {
        self.pets.clone_from(&from.pets);
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Client {}: {} | phone {} | email {} | address {}",
            self.id.0,
            self.full_name(),
            self.phone,
            self.email,
            self.address.as_deref().unwrap_or("-")
        )
    }
}
