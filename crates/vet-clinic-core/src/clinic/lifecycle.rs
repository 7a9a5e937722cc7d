//! Record creation and cascading removal.
//!
//! Creation clears any association data on the incoming record and stores it
//! in its extent. Removal first unwinds every association (removing owned
//! records), then deletes the record from its extent.

use log::debug;

use super::{Clinic, ClinicError, ClinicResult};
use crate::models::{
    Appointment, AppointmentId, Client, ClientId, Medication, MedicationId, Payment, PaymentId,
    Pet, PetId, Prescription, PrescriptionId, Specie, SpecieId, Veterinarian, VeterinarianId,
};
use crate::store::{Extent, Internal, Record};

/// Store a record with no links.
fn insert<T: Record>(extent: &mut Extent<T>, mut record: T) -> ClinicResult<T::Id> {
    record.clear_links(Internal(()));
    let id = extent.add(record)?;
    debug!("created {}", id);
    Ok(id)
}

impl Clinic {
    pub fn create_client(&mut self, client: Client) -> ClinicResult<ClientId> {
        insert(&mut self.clients, client)
    }

    /// Register a pet with its owner.
    ///
    /// Without an owner, a placeholder client is created so the pet is never
    /// ownerless.
    pub fn create_pet(&mut self, pet: Pet, client: Option<ClientId>) -> ClinicResult<PetId> {
        if let Some(owner) = client {
            self.get(owner)?;
        }

        let mut pet = pet;
        pet.clear_links(Internal(()));
        let id = self.pets.assign_identity(&mut pet);
        if self.pets.contains(id) {
            return Err(ClinicError::Duplicate(id.to_string()));
        }

        let owner = match client {
            Some(owner) => owner,
            None => self.create_client(Client::placeholder())?,
        };
        pet.client = owner;
        let id = self.pets.add(pet)?;

        self.get_mut(owner)?.pets.insert(id);
        self.save::<Client>()?;
        debug!("created {} owned by {}", id, owner);
        Ok(id)
    }

    pub fn create_specie(&mut self, specie: Specie) -> ClinicResult<SpecieId> {
        insert(&mut self.species, specie)
    }

    pub fn create_veterinarian(&mut self, vet: Veterinarian) -> ClinicResult<VeterinarianId> {
        insert(&mut self.vets, vet)
    }

    pub fn create_appointment(&mut self, appointment: Appointment) -> ClinicResult<AppointmentId> {
        insert(&mut self.appointments, appointment)
    }

    pub fn create_payment(&mut self, payment: Payment) -> ClinicResult<PaymentId> {
        insert(&mut self.payments, payment)
    }

    pub fn create_prescription(
        &mut self,
        prescription: Prescription,
    ) -> ClinicResult<PrescriptionId> {
        insert(&mut self.prescriptions, prescription)
    }

    pub fn create_medication(&mut self, medication: Medication) -> ClinicResult<MedicationId> {
        insert(&mut self.medications, medication)
    }

    /// Remove a client together with the pets it owns.
    pub fn remove_client(&mut self, client: ClientId) -> ClinicResult<()> {
        let pets = self.get(client)?.pets.clone();
        for pet in pets {
            self.remove_pet(pet)?;
        }
        self.clients.remove(client)?;
        debug!("removed {}", client);
        Ok(())
    }

    /// Remove a pet, detaching it from its client, specie and appointments.
    ///
    /// The appointments themselves are kept, with an empty pet slot.
    pub fn remove_pet(&mut self, pet: PetId) -> ClinicResult<()> {
        let record = self.get(pet)?.clone();

        if let Ok(owner) = self.get_mut(record.client) {
            owner.pets.remove(&pet);
        }
        self.save::<Client>()?;

        if let Some(specie) = record.specie {
            if let Ok(specie) = self.get_mut(specie) {
                specie.pets.remove(&pet);
            }
            self.save::<Specie>()?;
        }

        if !record.appointments.is_empty() {
            for appointment in &record.appointments {
                if let Ok(appointment) = self.get_mut(*appointment) {
                    appointment.pet = None;
                }
            }
            self.save::<Appointment>()?;
        }

        self.pets.remove(pet)?;
        debug!("removed {}", pet);
        Ok(())
    }

    /// Remove a specie; its pets become unclassified.
    pub fn remove_specie(&mut self, specie: SpecieId) -> ClinicResult<()> {
        let pets = self.get(specie)?.pets.clone();
        for pet in &pets {
            if let Ok(pet) = self.get_mut(*pet) {
                pet.specie = None;
            }
        }
        if !pets.is_empty() {
            self.save::<Pet>()?;
        }
        self.species.remove(specie)?;
        debug!("removed {}", specie);
        Ok(())
    }

    /// Remove a veterinarian, freeing the vet slot of its appointments and
    /// prescriptions.
    pub fn remove_veterinarian(&mut self, vet: VeterinarianId) -> ClinicResult<()> {
        let record = self.get(vet)?.clone();

        for appointment in &record.appointments {
            if let Ok(appointment) = self.get_mut(*appointment) {
                appointment.vet = None;
            }
        }
        for prescription in &record.prescriptions {
            if let Ok(prescription) = self.get_mut(*prescription) {
                prescription.vet = None;
            }
        }
        self.save::<Appointment>()?;
        self.save::<Prescription>()?;

        self.vets.remove(vet)?;
        debug!("removed {}", vet);
        Ok(())
    }

    /// Remove an appointment and the payments it owns.
    pub fn remove_appointment(&mut self, appointment: AppointmentId) -> ClinicResult<()> {
        let record = self.get(appointment)?.clone();

        for payment in &record.payments {
            self.remove_payment(*payment)?;
        }

        if let Some(pet) = record.pet {
            if let Ok(pet) = self.get_mut(pet) {
                pet.appointments.remove(&appointment);
            }
            self.save::<Pet>()?;
        }
        if let Some(vet) = record.vet {
            if let Ok(vet) = self.get_mut(vet) {
                vet.appointments.remove(&appointment);
            }
            self.save::<Veterinarian>()?;
        }

        self.appointments.remove(appointment)?;
        debug!("removed {}", appointment);
        Ok(())
    }

    pub fn remove_payment(&mut self, payment: PaymentId) -> ClinicResult<()> {
        let owner = self.get(payment)?.appointment;
        if let Some(appointment) = owner {
            if let Ok(appointment) = self.get_mut(appointment) {
                appointment.payments.remove(&payment);
            }
            self.save::<Appointment>()?;
        }
        self.payments.remove(payment)?;
        debug!("removed {}", payment);
        Ok(())
    }

    /// Remove a prescription with its doses.
    pub fn remove_prescription(&mut self, prescription: PrescriptionId) -> ClinicResult<()> {
        let record = self.get(prescription)?.clone();

        for dose in &record.doses {
            self.remove_dose(*dose)?;
        }
        if let Some(vet) = record.vet {
            if let Ok(vet) = self.get_mut(vet) {
                vet.prescriptions.remove(&prescription);
            }
            self.save::<Veterinarian>()?;
        }

        self.prescriptions.remove(prescription)?;
        debug!("removed {}", prescription);
        Ok(())
    }

    /// Remove a medication with its doses, unlinking it from the component
    /// graph in both directions.
    pub fn remove_medication(&mut self, medication: MedicationId) -> ClinicResult<()> {
        let record = self.get(medication)?.clone();

        for dose in &record.doses {
            self.remove_dose(*dose)?;
        }
        for component in &record.components {
            if let Ok(component) = self.get_mut(*component) {
                component.component_of.remove(&medication);
            }
        }
        for composite in &record.component_of {
            if let Ok(composite) = self.get_mut(*composite) {
                composite.components.remove(&medication);
            }
        }

        self.medications.remove(medication)?;
        debug!("removed {}", medication);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::ErrorKind;
    use crate::models::{Dose, MedicationForm, PaymentMethod, Sex, Specialization};
    use chrono::{NaiveDate, NaiveDateTime};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn at(hour: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn pet(name: &str) -> Pet {
        Pet::new(name.into(), day(), Sex::Male, 7.0)
    }

    #[test]
    fn test_placeholder_owner() {
        let mut clinic = Clinic::in_memory();
        let rex = clinic.create_pet(pet("Rex"), None).unwrap();

        let owner = clinic.pet_client(rex).unwrap();
        assert_eq!(owner.full_name(), "Unknown Owner");
        assert!(owner.pets().contains(&rex));
        assert_eq!(clinic.count::<Client>(), 1);
    }

    #[test]
    fn test_create_pet_with_unknown_owner_creates_nothing() {
        let mut clinic = Clinic::in_memory();
        let err = clinic.create_pet(pet("Rex"), Some(ClientId(4))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(clinic.count::<Pet>(), 0);
    }

    #[test]
    fn test_create_pet_with_taken_identity_creates_nothing() {
        let mut clinic = Clinic::in_memory();
        let rex = clinic.create_pet(pet("Rex"), None).unwrap();
        let err = clinic
            .create_pet(pet("Max").with_id(rex), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(clinic.count::<Client>(), 1);
    }

    #[test]
    fn test_create_clears_incoming_links() {
        let mut clinic = Clinic::in_memory();
        let mut appointment = Appointment::new(at(9), 1_000, "Nail trim".into());
        appointment.pet = Some(PetId(42));
        let id = clinic.create_appointment(appointment).unwrap();
        assert!(clinic.get(id).unwrap().pet().is_none());
    }

    #[test]
    fn test_remove_twice_is_not_found() {
        let mut clinic = Clinic::in_memory();
        let dog = clinic
            .create_specie(Specie::new("Dog".into(), "Canine".into()))
            .unwrap();
        clinic.remove_specie(dog).unwrap();
        assert_eq!(clinic.remove_specie(dog).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_remove_client_takes_pets() {
        let mut clinic = Clinic::in_memory();
        let owner = clinic
            .create_client(Client::new(
                "Eva".into(),
                "Lis".into(),
                "123".into(),
                "eva@example.com".into(),
            ))
            .unwrap();
        let rex = clinic.create_pet(pet("Rex"), Some(owner)).unwrap();
        let max = clinic.create_pet(pet("Max"), Some(owner)).unwrap();

        clinic.remove_client(owner).unwrap();
        assert!(!clinic.contains(rex));
        assert!(!clinic.contains(max));
        assert!(!clinic.contains(owner));
    }

    #[test]
    fn test_remove_veterinarian_frees_slots() {
        let mut clinic = Clinic::in_memory();
        let vet = clinic
            .create_veterinarian(Veterinarian::new(
                "Ola".into(),
                "Wrona".into(),
                Specialization::Dentistry,
                "987".into(),
                "ola@clinic.example".into(),
                3,
            ))
            .unwrap();
        let appointment = clinic
            .create_appointment(Appointment::new(at(8), 2_500, "Dental".into()))
            .unwrap();
        let prescription = clinic
            .create_prescription(Prescription::new(day(), day(), "Rinse".into()))
            .unwrap();
        clinic.vet_add_appointment(vet, appointment).unwrap();
        clinic.vet_add_prescription(vet, prescription).unwrap();

        clinic.remove_veterinarian(vet).unwrap();
        assert!(clinic.get(appointment).unwrap().vet().is_none());
        assert!(clinic.get(prescription).unwrap().vet().is_none());
    }

    #[test]
    fn test_remove_appointment_takes_payments() {
        let mut clinic = Clinic::in_memory();
        let rex = clinic.create_pet(pet("Rex"), None).unwrap();
        let appointment = clinic
            .create_appointment(Appointment::new(at(12), 9_900, "X-ray".into()))
            .unwrap();
        let payment = clinic
            .create_payment(Payment::new(9_900, PaymentMethod::Card, at(13)))
            .unwrap();
        clinic.pet_add_appointment(rex, appointment).unwrap();
        clinic.appointment_add_payment(appointment, payment).unwrap();

        clinic.remove_appointment(appointment).unwrap();
        assert!(!clinic.contains(payment));
        assert!(clinic.get(rex).unwrap().appointments().is_empty());
    }

    #[test]
    fn test_remove_medication_unwinds_doses_and_components() {
        let mut clinic = Clinic::in_memory();
        let combo = clinic
            .create_medication(Medication::new("Combo".into(), MedicationForm::Tablet))
            .unwrap();
        let part = clinic
            .create_medication(Medication::new("Part".into(), MedicationForm::Tablet))
            .unwrap();
        let inner = clinic
            .create_medication(Medication::new("Inner".into(), MedicationForm::Liquid))
            .unwrap();
        clinic.medication_add_component(combo, part).unwrap();
        clinic.medication_add_component(part, inner).unwrap();
        let prescription = clinic
            .create_prescription(Prescription::new(day(), day(), "Daily".into()))
            .unwrap();
        let dose = clinic
            .create_dose(Dose::new("one".into(), 1), part, prescription)
            .unwrap();

        clinic.remove_medication(part).unwrap();
        assert!(!clinic.contains(dose));
        assert!(clinic.get(prescription).unwrap().doses().is_empty());
        assert!(clinic.get(combo).unwrap().components().is_empty());
        assert!(clinic.get(inner).unwrap().component_of().is_empty());
    }

    #[test]
    fn test_remove_prescription_takes_doses() {
        let mut clinic = Clinic::in_memory();
        let medication = clinic
            .create_medication(Medication::new("Drops".into(), MedicationForm::Liquid))
            .unwrap();
        let prescription = clinic
            .create_prescription(Prescription::new(day(), day(), "Eyes".into()))
            .unwrap();
        let dose = clinic
            .create_dose(Dose::new("2 drops".into(), 1), medication, prescription)
            .unwrap();

        clinic.remove_prescription(prescription).unwrap();
        assert!(!clinic.contains(dose));
        assert!(clinic.get(medication).unwrap().doses().is_empty());
    }
}
