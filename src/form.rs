//! Dynamic Form Renderer & Validator
//!
//! The backend asks for structured input by setting `show_ui_form` in the
//! conversation state and describing the fields in `form_schema`. This module
//! turns that loosely-typed schema into form controls, collects the submitted
//! values and runs the client-side checks before anything is sent back.

mod render;
mod schema;
mod upload;
mod validate;
mod values;

pub use render::{render_form, FormView};
pub use schema::{FormSchema, PROOF_FIELD};
pub use upload::{encode_images, UploadedImage};
pub use validate::{validate, ValidationError};
pub use values::FormValues;

/// Question sent in place of free text when a form is submitted
pub const FORM_SUBMISSION_QUESTION: &str = "LOGIQUE_FORMULAIRE_UI";
