//! Data models for users and auth payloads.

pub mod user;

pub use user::*;
