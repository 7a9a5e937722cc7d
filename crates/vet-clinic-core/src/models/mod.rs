//! Domain models for the clinic object graph.

mod appointment;
mod client;
mod conditions;
mod dose;
mod ids;
mod medication;
mod payment;
mod pet;
mod prescription;
mod specie;
mod veterinarian;

pub use appointment::*;
pub use client::*;
pub use conditions::*;
pub use dose::*;
pub use ids::*;
pub use medication::*;
pub use payment::*;
pub use pet::*;
pub use prescription::*;
pub use specie::*;
pub use veterinarian::*;
