//! Appointments Module
//! Mission: Booking lifecycle with ownership-checked, one-way transitions

pub mod api;
pub mod models;
pub mod store;

pub use models::{Appointment, AppointmentStatus, ContactInfo};
pub use store::AppointmentStore;
