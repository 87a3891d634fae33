//! Authentication Module
//! Mission: Stateless JWT identity, bcrypt credentials, role-gated access

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod store;

pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, AuthAccount};
pub use models::{Account, Claims, Role};
pub use store::AccountStore;
