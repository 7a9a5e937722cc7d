//! Typed record identities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Appointment, Client, Dose, Medication, Payment, Pet, Prescription, Specie, Veterinarian};
use crate::store::EntityId;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident => $entity:ty, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Identity of a record that has not been stored yet.
            pub const UNASSIGNED: Self = Self(0);
        }

        impl EntityId for $name {
            type Entity = $entity;
            const LABEL: &'static str = $label;

            fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} #{}", $label, self.0)
            }
        }
    };
}

entity_id!(
    /// Identity of a [`Client`].
    ClientId => Client, "client"
);
entity_id!(
    /// Identity of a [`Pet`].
    PetId => Pet, "pet"
);
entity_id!(
    /// Identity of a [`Specie`].
    SpecieId => Specie, "specie"
);
entity_id!(
    /// Identity of a [`Veterinarian`].
    VeterinarianId => Veterinarian, "veterinarian"
);
entity_id!(
    /// Identity of an [`Appointment`]; also the qualifier of a pet's appointments.
    AppointmentId => Appointment, "appointment"
);
entity_id!(
    /// Identity of a [`Payment`].
    PaymentId => Payment, "payment"
);
entity_id!(
    /// Identity of a [`Prescription`].
    PrescriptionId => Prescription, "prescription"
);
entity_id!(
    /// Identity of a [`Medication`].
    MedicationId => Medication, "medication"
);
entity_id!(
    /// Identity of a [`Dose`].
    DoseId => Dose, "dose"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned() {
        assert!(!PetId::UNASSIGNED.is_assigned());
        assert!(PetId(1).is_assigned());
        assert_eq!(PetId::default(), PetId::UNASSIGNED);
    }

    #[test]
    fn test_display_includes_label() {
        assert_eq!(AppointmentId(7).to_string(), "appointment #7");
        assert_eq!(MedicationId(2).to_string(), "medication #2");
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&ClientId(12)).unwrap(), "12");
        let id: DoseId = serde_json::from_str("4").unwrap();
        assert_eq!(id, DoseId(4));
    }
}
