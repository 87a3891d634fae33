//! Prescriptions Module
//! Mission: Read-only prescription access for patients

pub mod api;
pub mod models;
pub mod store;

pub use models::Prescription;
pub use store::PrescriptionStore;
