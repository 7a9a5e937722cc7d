//! Read-only textual projections of the clinic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clinic::{Clinic, Stored};
use crate::models::{
    Appointment, Client, Dose, Medication, Payment, Pet, Prescription, Specie, Veterinarian,
};
use crate::store::{Extent, Record};

/// Render an extent as a header line followed by one line per record.
pub fn render_extent<T: Record>(extent: &Extent<T>) -> String {
    let mut out = format!("{} ({})\n", T::KIND, extent.len());
    for record in extent.iter() {
        out.push_str("  ");
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

/// Record counts per entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicSummary {
    pub clients: usize,
    pub pets: usize,
    pub species: usize,
    pub veterinarians: usize,
    pub appointments: usize,
    pub payments: usize,
    pub prescriptions: usize,
    pub medications: usize,
    pub doses: usize,
    /// Time the summary was taken
    pub generated_at: String,
}

impl ClinicSummary {
    pub fn total(&self) -> usize {
        self.clients
            + self.pets
            + self.species
            + self.veterinarians
            + self.appointments
            + self.payments
            + self.prescriptions
            + self.medications
            + self.doses
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ClinicSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "clients:       {}", self.clients)?;
        writeln!(f, "pets:          {}", self.pets)?;
        writeln!(f, "species:       {}", self.species)?;
        writeln!(f, "veterinarians: {}", self.veterinarians)?;
        writeln!(f, "appointments:  {}", self.appointments)?;
        writeln!(f, "payments:      {}", self.payments)?;
        writeln!(f, "prescriptions: {}", self.prescriptions)?;
        writeln!(f, "medications:   {}", self.medications)?;
        write!(f, "doses:         {}", self.doses)
    }
}

impl Clinic {
    pub fn summary(&self) -> ClinicSummary {
        ClinicSummary {
            clients: self.count::<Client>(),
            pets: self.count::<Pet>(),
            species: self.count::<Specie>(),
            veterinarians: self.count::<Veterinarian>(),
            appointments: self.count::<Appointment>(),
            payments: self.count::<Payment>(),
            prescriptions: self.count::<Prescription>(),
            medications: self.count::<Medication>(),
            doses: self.count::<Dose>(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Render every record of one type.
    pub fn render<T: Stored>(&self) -> String {
        render_extent(self.extent::<T>())
    }
}
