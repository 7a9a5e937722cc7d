//! Client ↔ Pet: one client owns many pets; a pet always has one client.

use log::debug;

use super::{require, Clinic, ClinicError, ClinicResult};
use crate::models::{Client, ClientId, Pet, PetId};

impl Clinic {
    /// Give a pet to a client, taking it away from its previous owner.
    pub fn client_add_pet(&mut self, client: ClientId, pet: PetId) -> ClinicResult<()> {
        self.link_client_pet(client, pet)
    }

    /// Reassign a pet's owner. Same effect as [`Clinic::client_add_pet`].
    pub fn pet_set_client(&mut self, pet: PetId, client: ClientId) -> ClinicResult<()> {
        self.link_client_pet(client, pet)
    }

    /// Pets owned by a client.
    pub fn client_pets(&self, client: ClientId) -> ClinicResult<Vec<&Pet>> {
        let client = self.get(client)?;
        client.pets.iter().map(|id| self.get(*id)).collect()
    }

    /// Owner of a pet.
    pub fn pet_client(&self, pet: PetId) -> ClinicResult<&Client> {
        let owner = self.get(pet)?.client;
        self.get(owner)
    }

    fn link_client_pet(&mut self, client: ClientId, pet: PetId) -> ClinicResult<()> {
        require(client)?;
        require(pet)?;
        self.get(client)?;
        let previous = self.get(pet)?.client;

        if previous == client {
            return Err(ClinicError::Duplicate(format!(
                "{} already belongs to {}",
                pet, client
            )));
        }

        if let Ok(old_owner) = self.get_mut(previous) {
            old_owner.pets.remove(&pet);
        }
        self.get_mut(client)?.pets.insert(pet);
        self.get_mut(pet)?.client = client;

        self.save::<Client>()?;
        self.save::<Pet>()?;
        debug!("{} moved from {} to {}", pet, previous, client);
        Ok(())
    }
}
