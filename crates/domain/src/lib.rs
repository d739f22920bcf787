//! Domain layer for the Form Builder backend.
//!
//! This crate contains:
//! - Domain models (Form, Step, Field, Submission, Template)
//! - Business logic services (AI form generation)
//! - Domain error types

pub mod models;
pub mod services;
