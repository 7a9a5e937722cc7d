//! Property tests for identity assignment and association symmetry.

use chrono::NaiveDate;
use proptest::prelude::*;

use vet_clinic_core::{
    Appointment, AppointmentId, Client, ClientId, Clinic, Dose, Extent, Medication,
    MedicationForm, MedicationId, Payment, PaymentId, PaymentMethod, Pet, PetId, Prescription,
    PrescriptionId, Sex, Specialization, Specie, SpecieId, Veterinarian, VeterinarianId,
};

/// One step of a random clinic session. Indices are raw identities, so some
/// steps target records that were never created or were already removed.
#[derive(Debug, Clone)]
enum Op {
    MovePet(u64, u64),
    SetSpecie(u64, u64),
    ClearSpecie(u64),
    AddAppointment(u64, u64),
    RemoveAppointmentLink(u64, u64),
    SetVet(u64, u64),
    ClearVet(u64),
    AddPrescription(u64, u64),
    AddPayment(u64, u64),
    DetachPayment(u64, u64),
    AddDose(u64, u64),
    AddComponent(u64, u64),
    RemoveComponent(u64, u64),
    RemovePet(u64),
    RemoveClient(u64),
    RemoveAppointment(u64),
    RemoveVet(u64),
    RemovePrescription(u64),
    RemoveMedication(u64),
}

fn id() -> impl Strategy<Value = u64> {
    0u64..6
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (id(), id()).prop_map(|(c, p)| Op::MovePet(c, p)),
        (id(), id()).prop_map(|(s, p)| Op::SetSpecie(s, p)),
        id().prop_map(Op::ClearSpecie),
        (id(), id()).prop_map(|(p, a)| Op::AddAppointment(p, a)),
        (id(), id()).prop_map(|(p, a)| Op::RemoveAppointmentLink(p, a)),
        (id(), id()).prop_map(|(v, a)| Op::SetVet(v, a)),
        id().prop_map(Op::ClearVet),
        (id(), id()).prop_map(|(v, rx)| Op::AddPrescription(v, rx)),
        (id(), id()).prop_map(|(a, pay)| Op::AddPayment(a, pay)),
        (id(), id()).prop_map(|(a, pay)| Op::DetachPayment(a, pay)),
        (id(), id()).prop_map(|(m, rx)| Op::AddDose(m, rx)),
        (id(), id()).prop_map(|(m, c)| Op::AddComponent(m, c)),
        (id(), id()).prop_map(|(m, c)| Op::RemoveComponent(m, c)),
        id().prop_map(Op::RemovePet),
        id().prop_map(Op::RemoveClient),
        id().prop_map(Op::RemoveAppointment),
        id().prop_map(Op::RemoveVet),
        id().prop_map(Op::RemovePrescription),
        id().prop_map(Op::RemoveMedication),
    ]
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
}

/// A clinic with a handful of records of every type and no links.
fn seeded() -> Clinic {
    let mut clinic = Clinic::in_memory();
    for i in 0..3 {
        clinic
            .create_client(Client::new(
                format!("Owner{}", i),
                "Test".into(),
                "555".into(),
                "owner@example.com".into(),
            ))
            .unwrap();
    }
    for i in 0..5u64 {
        let owner = ClientId(i % 3 + 1);
        clinic
            .create_pet(
                Pet::new(format!("Pet{}", i), day(), Sex::Female, 5.0),
                Some(owner),
            )
            .unwrap();
    }
    for name in ["Dog", "Cat"] {
        clinic
            .create_specie(Specie::new(name.into(), String::new()))
            .unwrap();
    }
    for i in 0..3 {
        clinic
            .create_veterinarian(Veterinarian::new(
                format!("Vet{}", i),
                "Test".into(),
                Specialization::GeneralPractice,
                "555".into(),
                "vet@clinic.example".into(),
                1,
            ))
            .unwrap();
    }
    for _ in 0..5 {
        clinic
            .create_appointment(Appointment::new(
                day().and_hms_opt(9, 0, 0).unwrap(),
                1_000,
                "Visit".into(),
            ))
            .unwrap();
        clinic
            .create_payment(Payment::new(
                500,
                PaymentMethod::Cash,
                day().and_hms_opt(10, 0, 0).unwrap(),
            ))
            .unwrap();
        clinic
            .create_prescription(Prescription::new(day(), day(), "As needed".into()))
            .unwrap();
        clinic
            .create_medication(Medication::new("Med".into(), MedicationForm::Tablet))
            .unwrap();
    }
    clinic
}

/// Apply one step. Rejected steps are expected; only the resulting graph
/// shape matters.
fn apply(clinic: &mut Clinic, op: &Op) {
    let _ = match *op {
        Op::MovePet(c, p) => clinic.client_add_pet(ClientId(c), PetId(p)),
        Op::SetSpecie(s, p) => clinic.pet_set_specie(PetId(p), SpecieId(s)),
        Op::ClearSpecie(p) => clinic.pet_clear_specie(PetId(p)),
        Op::AddAppointment(p, a) => clinic.pet_add_appointment(PetId(p), AppointmentId(a)),
        Op::RemoveAppointmentLink(p, a) => {
            clinic.pet_remove_appointment(PetId(p), AppointmentId(a))
        }
        Op::SetVet(v, a) => clinic.appointment_set_vet(AppointmentId(a), VeterinarianId(v)),
        Op::ClearVet(a) => clinic.appointment_clear_vet(AppointmentId(a)),
        Op::AddPrescription(v, rx) => {
            clinic.vet_add_prescription(VeterinarianId(v), PrescriptionId(rx))
        }
        Op::AddPayment(a, pay) => clinic.appointment_add_payment(AppointmentId(a), PaymentId(pay)),
        Op::DetachPayment(a, pay) => {
            clinic.appointment_remove_payment(AppointmentId(a), PaymentId(pay))
        }
        Op::AddDose(m, rx) => clinic
            .create_dose(
                Dose::new("dose".into(), 1),
                MedicationId(m),
                PrescriptionId(rx),
            )
            .map(|_| ()),
        Op::AddComponent(m, c) => clinic.medication_add_component(MedicationId(m), MedicationId(c)),
        Op::RemoveComponent(m, c) => {
            clinic.medication_remove_component(MedicationId(m), MedicationId(c))
        }
        Op::RemovePet(p) => clinic.remove_pet(PetId(p)),
        Op::RemoveClient(c) => clinic.remove_client(ClientId(c)),
        Op::RemoveAppointment(a) => clinic.remove_appointment(AppointmentId(a)),
        Op::RemoveVet(v) => clinic.remove_veterinarian(VeterinarianId(v)),
        Op::RemovePrescription(rx) => clinic.remove_prescription(PrescriptionId(rx)),
        Op::RemoveMedication(m) => clinic.remove_medication(MedicationId(m)),
    };
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: identities handed out by one extent strictly increase and are
    /// never reused, whatever mix of adds and removes happens in between.
    #[test]
    fn property_identities_strictly_increase(steps in proptest::collection::vec(any::<bool>(), 1..60)) {
        let mut extent = Extent::<Specie>::in_memory();
        let mut issued: Vec<SpecieId> = Vec::new();

        for add in steps {
            if add || extent.is_empty() {
                let id = extent.add(Specie::new("S".into(), String::new())).unwrap();
                if let Some(last) = issued.last() {
                    prop_assert!(id > *last, "{} not after {}", id, last);
                }
                prop_assert!(id.0 > 0);
                issued.push(id);
            } else {
                let victim = extent.ids().next().unwrap();
                extent.remove(victim).unwrap();
            }
        }
    }

    /// PROPERTY: any sequence of association and removal steps leaves every
    /// link symmetric and the component graph acyclic.
    #[test]
    fn property_random_sessions_keep_graph_consistent(ops in proptest::collection::vec(op(), 1..40)) {
        let mut clinic = seeded();
        prop_assert!(clinic.check_integrity().is_empty());

        for op in &ops {
            apply(&mut clinic, op);
            let violations = clinic.check_integrity();
            prop_assert!(violations.is_empty(), "after {:?}: {:?}", op, violations);
        }
    }

    /// PROPERTY: every remaining pet still has an existing owner.
    #[test]
    fn property_pets_never_ownerless(ops in proptest::collection::vec(op(), 1..40)) {
        let mut clinic = seeded();
        for op in &ops {
            apply(&mut clinic, op);
        }
        for pet in clinic.all::<Pet>() {
            prop_assert!(clinic.contains(pet.client()));
        }
    }
}
