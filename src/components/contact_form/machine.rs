//! Submission flow of the contact form.
//!
//! `Idle -> Validating -> {Invalid, Submitting} -> {SubmittedSuccess,
//! SubmittedError} -> Idle`. The flow is written against two seams: a
//! [`FormView`] that renders state, and a [`Submitter`] that delivers the
//! message. The page uses DOM-backed and simulated implementations; tests use
//! recording doubles.

use std::cell::Cell;
use std::future::Future;

use gloo::timers::future::TimeoutFuture;
use log::{error, info};
use thiserror::Error;

use super::validation::{ContactMessage, Field, FieldError, validate_field};

/// Where the form is in its submission flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
	/// Waiting for input.
	#[default]
	Idle,
	/// Checking every field after a submit.
	Validating,
	/// The last submit found failing fields.
	Invalid,
	/// Waiting for the submitter.
	Submitting,
	/// Delivered; the banner is showing.
	SubmittedSuccess,
	/// Delivery failed; the banner is showing.
	SubmittedError,
}

/// The transient result banner shown at the top of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
	/// The message went out.
	Success,
	/// The message could not be sent.
	Error,
}

impl BannerKind {
	/// Class of the banner element.
	pub fn class(self) -> &'static str {
		match self {
			BannerKind::Success => "success-message",
			BannerKind::Error => "error-message",
		}
	}

	/// Text shown to the user.
	pub fn text(self) -> &'static str {
		match self {
			BannerKind::Success => "Message sent successfully! I'll get back to you soon.",
			BannerKind::Error => "Something went wrong. Please try again later.",
		}
	}

	/// Font Awesome icon classes.
	pub fn icon_class(self) -> &'static str {
		match self {
			BannerKind::Success => "fas fa-check-circle",
			BannerKind::Error => "fas fa-exclamation-circle",
		}
	}
}

/// Delivery of the message failed.
#[derive(Debug, Error)]
#[error("submission failed: {0}")]
pub struct SubmitError(pub String);

/// Delivers a validated message.
pub trait Submitter {
	/// Send `message`; resolves once delivery finished or failed.
	fn submit(&self, message: &ContactMessage) -> impl Future<Output = Result<(), SubmitError>>;
}

/// Stand-in for a backend: waits a fixed delay and always succeeds.
#[derive(Clone, Copy, Debug)]
pub struct SimulatedSubmitter {
	/// Latency before reporting success.
	pub delay_ms: u32,
}

impl Submitter for SimulatedSubmitter {
	async fn submit(&self, _message: &ContactMessage) -> Result<(), SubmitError> {
		TimeoutFuture::new(self.delay_ms).await;
		Ok(())
	}
}

/// Renders form state.
pub trait FormView {
	/// Show `error` under `field`.
	fn show_field_error(&self, field: Field, error: FieldError);
	/// Hide `field`'s error, if shown.
	fn clear_field_error(&self, field: Field);
	/// Disable the submit control and show the loading label, or undo that.
	fn set_submitting(&self, submitting: bool);
	/// Clear every control.
	fn reset_fields(&self);
	/// Insert a banner that removes itself after a while.
	fn show_banner(&self, kind: BannerKind);
	/// Observe phase transitions. Does nothing by default.
	fn phase_changed(&self, _phase: FormPhase) {}
}

/// The contact form controller.
pub struct ContactForm<V, S> {
	view: V,
	submitter: S,
	phase: Cell<FormPhase>,
}

impl<V: FormView, S: Submitter> ContactForm<V, S> {
	/// A controller in `Idle`.
	pub fn new(view: V, submitter: S) -> Self {
		Self {
			view,
			submitter,
			phase: Cell::new(FormPhase::Idle),
		}
	}

	/// Current phase.
	pub fn phase(&self) -> FormPhase {
		self.phase.get()
	}

	/// The view this controller renders into.
	pub fn view(&self) -> &V {
		&self.view
	}

	fn enter(&self, phase: FormPhase) {
		self.phase.set(phase);
		self.view.phase_changed(phase);
	}

	/// Re-validate a single field when it loses focus.
	pub fn handle_blur(&self, field: Field, value: &str) -> Result<(), FieldError> {
		let result = validate_field(field, value);
		match result {
			Ok(()) => self.view.clear_field_error(field),
			Err(e) => self.view.show_field_error(field, e),
		}
		result
	}

	/// Hide a field's error while the user edits it.
	pub fn handle_input(&self, field: Field) {
		self.view.clear_field_error(field);
	}

	/// Validate and, if valid, submit. Returns the phase the attempt ended in
	/// (`Invalid`, `SubmittedSuccess` or `SubmittedError`); a submit while one
	/// is already in flight is ignored and reports `Submitting`.
	pub async fn handle_submit(&self, message: ContactMessage) -> FormPhase {
		if self.phase() == FormPhase::Submitting {
			return FormPhase::Submitting;
		}

		self.enter(FormPhase::Validating);
		let errors = message.validate();
		for field in Field::ALL {
			match errors.iter().find(|(f, _)| *f == field) {
				Some((_, e)) => self.view.show_field_error(field, *e),
				None => self.view.clear_field_error(field),
			}
		}
		if !errors.is_empty() {
			self.enter(FormPhase::Invalid);
			return FormPhase::Invalid;
		}

		self.enter(FormPhase::Submitting);
		self.view.set_submitting(true);
		let result = self.submitter.submit(&message).await;

		let outcome = match result {
			Ok(()) => {
				self.enter(FormPhase::SubmittedSuccess);
				self.view.set_submitting(false);
				self.view.reset_fields();
				self.view.show_banner(BannerKind::Success);
				info!("folio-fx: contact message submitted");
				FormPhase::SubmittedSuccess
			}
			Err(e) => {
				error!("folio-fx: error submitting form: {}", e);
				self.enter(FormPhase::SubmittedError);
				self.view.set_submitting(false);
				self.view.show_banner(BannerKind::Error);
				FormPhase::SubmittedError
			}
		};
		self.enter(FormPhase::Idle);
		outcome
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use futures::executor::block_on;

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	enum Event {
		Phase(FormPhase),
		FieldError(Field, FieldError),
		FieldCleared(Field),
		Busy(bool),
		Reset,
		Banner(BannerKind),
	}

	#[derive(Default)]
	struct RecordingView {
		events: RefCell<Vec<Event>>,
	}

	impl RecordingView {
		fn take(&self) -> Vec<Event> {
			self.events.take()
		}

		fn push(&self, event: Event) {
			self.events.borrow_mut().push(event);
		}
	}

	impl FormView for RecordingView {
		fn show_field_error(&self, field: Field, error: FieldError) {
			self.push(Event::FieldError(field, error));
		}

		fn clear_field_error(&self, field: Field) {
			self.push(Event::FieldCleared(field));
		}

		fn set_submitting(&self, submitting: bool) {
			self.push(Event::Busy(submitting));
		}

		fn reset_fields(&self) {
			self.push(Event::Reset);
		}

		fn show_banner(&self, kind: BannerKind) {
			self.push(Event::Banner(kind));
		}

		fn phase_changed(&self, phase: FormPhase) {
			self.push(Event::Phase(phase));
		}
	}

	/// Resolves immediately with a fixed outcome and counts calls.
	struct FixedSubmitter {
		fail: bool,
		calls: Cell<usize>,
	}

	impl FixedSubmitter {
		fn ok() -> Self {
			Self {
				fail: false,
				calls: Cell::new(0),
			}
		}

		fn failing() -> Self {
			Self {
				fail: true,
				calls: Cell::new(0),
			}
		}
	}

	impl Submitter for FixedSubmitter {
		async fn submit(&self, _message: &ContactMessage) -> Result<(), SubmitError> {
			self.calls.set(self.calls.get() + 1);
			if self.fail {
				Err(SubmitError("backend unavailable".into()))
			} else {
				Ok(())
			}
		}
	}

	fn valid() -> ContactMessage {
		ContactMessage {
			name: "Ada".into(),
			email: "ada@example.com".into(),
			subject: "Hello".into(),
			message: "I would like to chat.".into(),
		}
	}

	fn phases(events: &[Event]) -> Vec<FormPhase> {
		events
			.iter()
			.filter_map(|e| match e {
				Event::Phase(p) => Some(*p),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn invalid_form_never_submits() {
		let form = ContactForm::new(RecordingView::default(), FixedSubmitter::ok());
		let message = ContactMessage {
			name: String::new(),
			email: "a@b.co".into(),
			subject: "hi".into(),
			message: "1234567890".into(),
		};

		assert_eq!(block_on(form.handle_submit(message)), FormPhase::Invalid);
		assert_eq!(form.submitter.calls.get(), 0);
		assert_eq!(form.phase(), FormPhase::Invalid);

		let events = form.view().take();
		let errors: Vec<_> = events
			.iter()
			.filter(|e| matches!(e, Event::FieldError(..)))
			.collect();
		assert_eq!(errors, vec![&Event::FieldError(Field::Name, FieldError::NameRequired)]);
		assert!(!events.contains(&Event::Busy(true)));
		assert_eq!(phases(&events), vec![FormPhase::Validating, FormPhase::Invalid]);
	}

	#[test]
	fn valid_form_submits_and_resets() {
		let form = ContactForm::new(RecordingView::default(), FixedSubmitter::ok());
		assert_eq!(block_on(form.handle_submit(valid())), FormPhase::SubmittedSuccess);
		assert_eq!(form.submitter.calls.get(), 1);
		assert_eq!(form.phase(), FormPhase::Idle);

		let events = form.view().take();
		assert_eq!(
			phases(&events),
			vec![
				FormPhase::Validating,
				FormPhase::Submitting,
				FormPhase::SubmittedSuccess,
				FormPhase::Idle
			]
		);

		// Disabled on entering Submitting, re-enabled only after leaving it.
		let pos = |target: &Event| events.iter().position(|e| e == target).unwrap();
		assert!(pos(&Event::Phase(FormPhase::Submitting)) < pos(&Event::Busy(true)));
		assert!(pos(&Event::Busy(true)) < pos(&Event::Phase(FormPhase::SubmittedSuccess)));
		assert!(pos(&Event::Phase(FormPhase::SubmittedSuccess)) < pos(&Event::Busy(false)));
		assert!(pos(&Event::Busy(false)) < pos(&Event::Reset));
		assert!(pos(&Event::Reset) < pos(&Event::Banner(BannerKind::Success)));
	}

	#[test]
	fn failed_submission_keeps_fields() {
		let form = ContactForm::new(RecordingView::default(), FixedSubmitter::failing());
		assert_eq!(block_on(form.handle_submit(valid())), FormPhase::SubmittedError);
		assert_eq!(form.phase(), FormPhase::Idle);

		let events = form.view().take();
		assert!(events.contains(&Event::Banner(BannerKind::Error)));
		assert!(events.contains(&Event::Busy(false)));
		assert!(!events.contains(&Event::Reset));
		assert_eq!(
			phases(&events),
			vec![
				FormPhase::Validating,
				FormPhase::Submitting,
				FormPhase::SubmittedError,
				FormPhase::Idle
			]
		);
	}

	#[test]
	fn resubmitting_after_invalid_works() {
		let form = ContactForm::new(RecordingView::default(), FixedSubmitter::ok());
		let mut message = valid();
		message.message = "short".into();
		assert_eq!(block_on(form.handle_submit(message.clone())), FormPhase::Invalid);

		message.message = "long enough now".into();
		form.view().take();
		assert_eq!(block_on(form.handle_submit(message)), FormPhase::SubmittedSuccess);
		assert!(form.view().take().contains(&Event::FieldCleared(Field::Message)));
	}

	#[test]
	fn submit_while_in_flight_is_ignored() {
		let form = ContactForm::new(RecordingView::default(), FixedSubmitter::ok());
		form.phase.set(FormPhase::Submitting);
		assert_eq!(block_on(form.handle_submit(valid())), FormPhase::Submitting);
		assert_eq!(form.submitter.calls.get(), 0);
		assert!(form.view().take().is_empty());
	}

	#[test]
	fn blur_validates_one_field() {
		let form = ContactForm::new(RecordingView::default(), FixedSubmitter::ok());
		assert_eq!(form.handle_blur(Field::Email, "nope"), Err(FieldError::EmailInvalid));
		assert_eq!(form.handle_blur(Field::Email, "a@b.co"), Ok(()));
		assert_eq!(
			form.view().take(),
			vec![
				Event::FieldError(Field::Email, FieldError::EmailInvalid),
				Event::FieldCleared(Field::Email)
			]
		);
		assert_eq!(form.phase(), FormPhase::Idle);
	}

	#[test]
	fn input_clears_without_validating() {
		let form = ContactForm::new(RecordingView::default(), FixedSubmitter::ok());
		form.handle_input(Field::Name);
		assert_eq!(form.view().take(), vec![Event::FieldCleared(Field::Name)]);
	}
}
