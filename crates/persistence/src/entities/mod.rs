//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod field;
pub mod form;
pub mod step;
pub mod submission;
pub mod template;

pub use field::FieldEntity;
pub use form::FormEntity;
pub use step::StepEntity;
pub use submission::SubmissionEntity;
pub use template::TemplateEntity;
