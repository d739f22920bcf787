//! HTTP route handlers.

pub mod ai;
pub mod fields;
pub mod forms;
pub mod health;
pub mod steps;
pub mod submissions;
pub mod templates;
pub mod transcribe;
