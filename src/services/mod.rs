//! Business logic: credential storage and the authentication policy.

pub mod auth;
pub mod credentials;

pub use auth::AuthService;
pub use credentials::{CredentialStore, SqlCredentialStore};
