//! Domain models for the Form Builder.

pub mod field;
pub mod form;
pub mod step;
pub mod submission;
pub mod template;

pub use field::Field;
pub use form::Form;
pub use step::Step;
pub use submission::Submission;
pub use template::Template;
