//! Form submission: serialization, submit interception and error mapping.

pub mod controller;
pub mod errors;
pub mod serializer;

pub use controller::{FormController, FormOverrides, Submission, SPINNER_CLASS};
pub use errors::{Annotation, Mapped, EXPLANATION_CLASS, INVALID_CLASS};
pub use serializer::{NestedParams, Param, Serialized};
