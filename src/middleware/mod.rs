//! Request extractors for authenticated routes.

pub mod auth;

pub use auth::AuthUser;
