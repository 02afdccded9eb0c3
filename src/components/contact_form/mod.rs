//! Client-side contact form: per-field validation and a simulated submission
//! with transient result banners.

mod dom;
mod machine;
mod validation;

pub use dom::{DomFormView, wire_contact_form};
pub use machine::{
	BannerKind, ContactForm, FormPhase, FormView, SimulatedSubmitter, SubmitError, Submitter,
};
pub use validation::{ContactMessage, Field, FieldError, validate_field, validate_submitted};
