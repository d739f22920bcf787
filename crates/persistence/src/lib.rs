//! Persistence layer for the Form Builder backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Query timing instrumentation

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
