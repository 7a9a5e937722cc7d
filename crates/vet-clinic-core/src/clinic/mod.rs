//! The clinic object graph.
//!
//! [`Clinic`] owns one [`Extent`] per entity type. Records refer to each other
//! by identity, and every association is changed through a single internal
//! routine per relationship that validates first and then updates both sides,
//! so no link is ever left one-sided.
//!
//! Each extent write is all-or-nothing. An operation that touches two extents
//! saves them one after the other; if the second write fails the error is
//! returned and the in-memory graph stays ahead of that file until the next
//! successful save.

mod appointment_payment;
mod client_pet;
mod components;
mod conditions;
mod doses;
mod integrity;
mod lifecycle;
mod pet_appointment;
mod specie_pet;
mod vet_links;

pub use integrity::*;

use log::{info, warn};
use thiserror::Error;

use crate::config::ClinicConfig;
use crate::models::{
    Appointment, Client, Dose, Medication, Payment, Pet, Prescription, Specie, Veterinarian,
};
use crate::store::{EntityId, Extent, Internal, Record, StoreError};

/// Clinic errors.
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Null reference: {0}")]
    NullReference(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

/// Condition kind of a [`ClinicError`], without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Duplicate,
    NullReference,
    InvalidOperation,
    Storage,
}

impl ClinicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClinicError::NotFound(_) => ErrorKind::NotFound,
            ClinicError::Duplicate(_) => ErrorKind::Duplicate,
            ClinicError::NullReference(_) => ErrorKind::NullReference,
            ClinicError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            ClinicError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<StoreError> for ClinicError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => ClinicError::NotFound(what),
            StoreError::Duplicate(what) => ClinicError::Duplicate(what),
            other => ClinicError::Storage(other),
        }
    }
}

pub type ClinicResult<T> = Result<T, ClinicError>;

/// Record types held by a [`Clinic`].
pub trait Stored: Record {
    fn extent(clinic: &Clinic) -> &Extent<Self>;

    #[doc(hidden)]
    fn extent_mut(clinic: &mut Clinic, access: Internal) -> &mut Extent<Self>;
}

macro_rules! stored {
    ($record:ty, $field:ident) => {
        impl Stored for $record {
            fn extent(clinic: &Clinic) -> &Extent<Self> {
                &clinic.$field
            }

            fn extent_mut(clinic: &mut Clinic, _: Internal) -> &mut Extent<Self> {
                &mut clinic.$field
            }
        }
    };
}

stored!(Client, clients);
stored!(Pet, pets);
stored!(Specie, species);
stored!(Veterinarian, vets);
stored!(Appointment, appointments);
stored!(Payment, payments);
stored!(Prescription, prescriptions);
stored!(Medication, medications);
stored!(Dose, doses);

/// Every extent of the clinic.
#[derive(Debug, Clone, Default)]
pub struct Clinic {
    clients: Extent<Client>,
    pets: Extent<Pet>,
    species: Extent<Specie>,
    vets: Extent<Veterinarian>,
    appointments: Extent<Appointment>,
    payments: Extent<Payment>,
    prescriptions: Extent<Prescription>,
    medications: Extent<Medication>,
    doses: Extent<Dose>,
}

impl Clinic {
    /// Load every extent from the configured data directory.
    pub fn open(config: &ClinicConfig) -> ClinicResult<Self> {
        let dir = &config.data_dir;
        let pretty = config.pretty;
        let clinic = Self {
            clients: Extent::open(dir, pretty)?,
            pets: Extent::open(dir, pretty)?,
            species: Extent::open(dir, pretty)?,
            vets: Extent::open(dir, pretty)?,
            appointments: Extent::open(dir, pretty)?,
            payments: Extent::open(dir, pretty)?,
            prescriptions: Extent::open(dir, pretty)?,
            medications: Extent::open(dir, pretty)?,
            doses: Extent::open(dir, pretty)?,
        };

        info!("opened clinic data at {}", dir.display());
        for violation in clinic.check_integrity() {
            warn!("integrity: {}", violation);
        }
        Ok(clinic)
    }

    /// Create a clinic that is never written to disk (for testing).
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Look up a record by identity.
    pub fn get<I>(&self, id: I) -> ClinicResult<&I::Entity>
    where
        I: EntityId,
        I::Entity: Stored,
    {
        require(id)?;
        <I::Entity as Stored>::extent(self)
            .get(id)
            .ok_or_else(|| ClinicError::NotFound(id.to_string()))
    }

    pub(crate) fn get_mut<I>(&mut self, id: I) -> ClinicResult<&mut I::Entity>
    where
        I: EntityId,
        I::Entity: Stored,
    {
        require(id)?;
        <I::Entity as Stored>::extent_mut(self, Internal(()))
            .get_mut(id)
            .ok_or_else(|| ClinicError::NotFound(id.to_string()))
    }

    pub fn contains<I>(&self, id: I) -> bool
    where
        I: EntityId,
        I::Entity: Stored,
    {
        <I::Entity as Stored>::extent(self).contains(id)
    }

    /// Edit the scalar fields of a record and persist its extent.
    ///
    /// The identity and association fields are put back after `edit` runs;
    /// links change only through the association operations.
    pub fn update<I, F>(&mut self, id: I, edit: F) -> ClinicResult<()>
    where
        I: EntityId,
        I::Entity: Stored,
        F: FnOnce(&mut I::Entity),
    {
        require(id)?;
        <I::Entity as Stored>::extent_mut(self, Internal(())).update(id, edit)?;
        Ok(())
    }

    /// Read-only view of one extent.
    pub fn extent<T: Stored>(&self) -> &Extent<T> {
        T::extent(self)
    }

    /// Every record of one type, in identity order.
    pub fn all<'a, T: Stored + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        T::extent(self).iter()
    }

    pub fn count<T: Stored>(&self) -> usize {
        T::extent(self).len()
    }

    /// Rewrite one extent's backing file.
    pub(crate) fn save<T: Stored>(&self) -> ClinicResult<()> {
        T::extent(self).save()?;
        Ok(())
    }
}

/// Fail with a null-reference error for identities that were never assigned.
pub(crate) fn require<I: EntityId>(id: I) -> ClinicResult<I> {
    if id.is_assigned() {
        Ok(id)
    } else {
        Err(ClinicError::NullReference(format!(
            "{} reference is not set",
            I::LABEL
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientId, Pet, Sex, SpecieId};
    use chrono::NaiveDate;

    fn setup() -> (Clinic, ClientId, crate::models::PetId) {
        let mut clinic = Clinic::in_memory();
        let owner = clinic
            .create_client(Client::new(
                "Ada".into(),
                "Kos".into(),
                "321".into(),
                "ada@example.com".into(),
            ))
            .unwrap();
        let born = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let rex = clinic
            .create_pet(Pet::new("Rex".into(), born, Sex::Male, 10.0), Some(owner))
            .unwrap();
        (clinic, owner, rex)
    }

    #[test]
    fn test_update_cannot_change_links() {
        let (mut clinic, owner, rex) = setup();

        clinic
            .update(rex, |p| {
                p.name = "Rexio".into();
                p.clear_links(Internal(()));
                p.client = ClientId(77);
                p.specie = Some(SpecieId(5));
            })
            .unwrap();

        let pet = clinic.get(rex).unwrap();
        assert_eq!(pet.name, "Rexio");
        assert_eq!(pet.client(), owner);
        assert_eq!(pet.specie(), None);
        assert!(clinic.check_integrity().is_empty());
    }

    #[test]
    fn test_update_unassigned_is_null_reference() {
        let (mut clinic, _, _) = setup();
        let err = clinic
            .update(crate::models::PetId::UNASSIGNED, |p| p.weight_kg = 1.0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullReference);
    }

    #[test]
    fn test_all_in_identity_order() {
        let (mut clinic, owner, _) = setup();
        let born = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        clinic
            .create_pet(Pet::new("Max".into(), born, Sex::Male, 8.0), Some(owner))
            .unwrap();

        let names: Vec<&str> = clinic.all::<Pet>().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Rex", "Max"]);
        assert_eq!(clinic.count::<Pet>(), 2);
    }
}
