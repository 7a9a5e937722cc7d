//! Vet Clinic Core Library
//!
//! Object graph for a veterinary clinic: clients, pets, species, veterinarians,
//! appointments, payments, prescriptions, medications and doses, each kept in
//! its own file-backed extent.
//!
//! # Architecture
//!
//! ```text
//!   Client 1 ──── * Pet * ──── 0..1 Specie
//!                    │ 1
//!                    │ (keyed by appointment id)
//!                    * Appointment * ──── 0..1 Veterinarian 0..1 ──── * Prescription
//!                    │ 1                                                 │ 1
//!                    * Payment                                           * Dose * ──── 1 Medication
//!                                                                                     │
//!                                                              components (acyclic) ─┘
//! ```
//!
//! # Core Principle
//!
//! **Every association is changed on both sides or not at all.** Each
//! relationship has one internal routine that validates first and then
//! updates both records; the public entry points on either side delegate to it.
//!
//! # Modules
//!
//! - [`store`]: Generic extent with identity assignment and atomic JSON persistence
//! - [`models`]: Entity records and typed identities
//! - [`clinic`]: The object graph, association operations and cascading removal
//! - [`config`]: Data directory configuration
//! - [`report`]: Textual listings and summaries

pub mod clinic;
pub mod config;
pub mod models;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use clinic::{Clinic, ClinicError, ClinicResult, ErrorKind, IntegrityViolation, Stored};
pub use config::ClinicConfig;
pub use models::*;
pub use report::{render_extent, ClinicSummary};
pub use store::{EntityId, Extent, Record, StoreError, StoreResult};
