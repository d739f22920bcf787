//! Domain services for the Form Builder.
//!
//! Services contain business logic that operates on domain models.

pub mod generation;

pub use generation::{
    normalize, Complexity, FormGenerator, GeneratedField, GeneratedForm, GeneratedStep,
    GenerateFormRequest, GenerationError, MockFormGenerator, RawGeneratedField, RawGeneratedForm,
    RawGeneratedOption, RawGeneratedStep, Tone,
};
