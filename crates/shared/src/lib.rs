//! Shared utilities and common types for the Form Builder backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT verification for externally issued identity tokens
//! - Common validation logic

pub mod jwt;
pub mod validation;
