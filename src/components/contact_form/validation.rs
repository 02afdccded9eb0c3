//! Field rules for the contact form.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern")
});

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

/// The required form fields, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
	/// Sender's name.
	Name,
	/// Reply address.
	Email,
	/// Subject line.
	Subject,
	/// Message body.
	Message,
}

impl Field {
	/// Every field, in display order.
	pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

	/// The `name` attribute of the form control.
	pub fn name(self) -> &'static str {
		match self {
			Field::Name => "name",
			Field::Email => "email",
			Field::Subject => "subject",
			Field::Message => "message",
		}
	}

	/// The field whose control carries `name`.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|f| f.name() == name)
	}

	/// Id of the element that displays this field's error.
	pub fn error_id(self) -> String {
		format!("{}-error", self.name())
	}
}

/// A failed field rule. The display text is shown to the user as is.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
	/// Name is blank.
	#[error("Name is required")]
	NameRequired,
	/// Name has fewer than two characters.
	#[error("Name must be at least 2 characters")]
	NameTooShort,
	/// Email is blank.
	#[error("Email is required")]
	EmailRequired,
	/// Email does not look like an address.
	#[error("Please enter a valid email address")]
	EmailInvalid,
	/// Subject is blank.
	#[error("Subject is required")]
	SubjectRequired,
	/// Message is blank.
	#[error("Message is required")]
	MessageRequired,
	/// Message has fewer than ten characters.
	#[error("Message must be at least 10 characters")]
	MessageTooShort,
}

/// Check one field as the user leaves it. Values are trimmed before every rule.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
	let value = value.trim();
	let chars = value.chars().count();
	match field {
		Field::Name if value.is_empty() => Err(FieldError::NameRequired),
		Field::Name if chars < NAME_MIN_CHARS => Err(FieldError::NameTooShort),
		Field::Email if value.is_empty() => Err(FieldError::EmailRequired),
		Field::Email if !EMAIL.is_match(value) => Err(FieldError::EmailInvalid),
		Field::Subject if value.is_empty() => Err(FieldError::SubjectRequired),
		Field::Message if value.is_empty() => Err(FieldError::MessageRequired),
		Field::Message if chars < MESSAGE_MIN_CHARS => Err(FieldError::MessageTooShort),
		_ => Ok(()),
	}
}

/// Check one field of a submitted message.
///
/// Same as [`validate_field`], except the email pattern is matched against
/// the raw value, so surrounding whitespace makes the address invalid.
pub fn validate_submitted(field: Field, value: &str) -> Result<(), FieldError> {
	validate_field(field, value)?;
	if field == Field::Email && !EMAIL.is_match(value) {
		return Err(FieldError::EmailInvalid);
	}
	Ok(())
}

/// The submitted form contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
	/// Sender's name.
	pub name: String,
	/// Reply address.
	pub email: String,
	/// Subject line.
	pub subject: String,
	/// Message body.
	pub message: String,
}

impl ContactMessage {
	/// The raw value entered for `field`.
	pub fn value(&self, field: Field) -> &str {
		match field {
			Field::Name => &self.name,
			Field::Email => &self.email,
			Field::Subject => &self.subject,
			Field::Message => &self.message,
		}
	}

	/// Every failing field, in display order.
	pub fn validate(&self) -> Vec<(Field, FieldError)> {
		Field::ALL
			.into_iter()
			.filter_map(|field| validate_submitted(field, self.value(field)).err().map(|e| (field, e)))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn message(name: &str, email: &str, subject: &str, body: &str) -> ContactMessage {
		ContactMessage {
			name: name.into(),
			email: email.into(),
			subject: subject.into(),
			message: body.into(),
		}
	}

	#[test]
	fn empty_name_is_the_only_error() {
		let errors = message("", "a@b.co", "hi", "1234567890").validate();
		assert_eq!(errors, vec![(Field::Name, FieldError::NameRequired)]);
	}

	#[test]
	fn valid_message_passes() {
		assert!(message("Jo", "jo@example.com", "Hello", "Ten chars!").validate().is_empty());
	}

	#[test]
	fn name_rules() {
		assert_eq!(validate_field(Field::Name, "   "), Err(FieldError::NameRequired));
		assert_eq!(validate_field(Field::Name, " J "), Err(FieldError::NameTooShort));
		assert_eq!(validate_field(Field::Name, "Jo"), Ok(()));
	}

	#[test]
	fn email_rules() {
		assert_eq!(validate_field(Field::Email, ""), Err(FieldError::EmailRequired));
		for bad in ["plain", "a@b", "a b@c.d", "@b.co", "a@.co", "a@@b.co"] {
			assert_eq!(validate_field(Field::Email, bad), Err(FieldError::EmailInvalid), "{bad}");
		}
		for good in ["a@b.co", " user@mail.example.org ", "x.y+z@host.io"] {
			assert_eq!(validate_field(Field::Email, good), Ok(()), "{good}");
		}
	}

	#[test]
	fn email_pattern_compiles() {
		assert!(EMAIL.is_match("a@b.co"));
		assert!(!EMAIL.is_match(" a@b.co"));
	}

	#[test]
	fn submitted_email_is_matched_untrimmed() {
		assert_eq!(validate_field(Field::Email, " a@b.co"), Ok(()));
		assert_eq!(validate_submitted(Field::Email, " a@b.co"), Err(FieldError::EmailInvalid));
		assert_eq!(validate_submitted(Field::Email, "   "), Err(FieldError::EmailRequired));
		assert_eq!(validate_submitted(Field::Name, " Jo "), Ok(()));

		let errors = message("Jo", "jo@example.com ", "Hi", "1234567890").validate();
		assert_eq!(errors, vec![(Field::Email, FieldError::EmailInvalid)]);
	}

	#[test]
	fn subject_and_message_rules() {
		assert_eq!(validate_field(Field::Subject, "\t"), Err(FieldError::SubjectRequired));
		assert_eq!(validate_field(Field::Subject, "x"), Ok(()));
		assert_eq!(validate_field(Field::Message, ""), Err(FieldError::MessageRequired));
		assert_eq!(
			validate_field(Field::Message, "  123456789  "),
			Err(FieldError::MessageTooShort)
		);
		assert_eq!(validate_field(Field::Message, "1234567890"), Ok(()));
	}

	#[test]
	fn all_failures_reported_in_order() {
		let fields: Vec<_> = message("", "nope", "", "short")
			.validate()
			.into_iter()
			.map(|(f, _)| f)
			.collect();
		assert_eq!(fields, Field::ALL.to_vec());
	}

	#[test]
	fn error_text_is_user_facing() {
		assert_eq!(FieldError::EmailInvalid.to_string(), "Please enter a valid email address");
		assert_eq!(Field::Message.error_id(), "message-error");
		assert_eq!(Field::from_name("subject"), Some(Field::Subject));
		assert_eq!(Field::from_name("phone"), None);
	}
}
