//! Reviews Module

pub mod api;
pub mod models;
pub mod store;

pub use models::Review;
pub use store::ReviewStore;
