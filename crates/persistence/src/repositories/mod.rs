//! Repository implementations for database operations.

pub mod field;
pub mod form;
pub mod step;
pub mod submission;
pub mod template;

pub use field::FieldRepository;
pub use form::FormRepository;
pub use step::StepRepository;
pub use submission::SubmissionRepository;
pub use template::TemplateRepository;
