//! Custom Axum extractors.
//!
//! Extractors for parsing and validating request data.

pub mod auth_user;

#[allow(unused_imports)] // Re-exports for downstream use
pub use auth_user::AuthUser;
