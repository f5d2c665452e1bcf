//! Validation of submitted forms
//!
//! Forms are deserialized from the request body by [`FormBody`], checked
//! structurally with `validator`, then cleaned into typed values. Problems are
//! reported per field through [`FormErrors`].

pub mod extractor;
pub mod form;

pub use extractor::FormBody;
pub use form::{Form, FormErrors, clean_form, validate_form};
