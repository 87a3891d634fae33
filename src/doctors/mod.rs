//! Doctor Profiles Module
//! Mission: Verification workflow and public directory

pub mod api;
pub mod models;
pub mod store;

pub use models::{DoctorProfile, VerificationStatus};
pub use store::ProfileStore;
