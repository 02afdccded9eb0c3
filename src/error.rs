//! Crate-wide error type for controller wiring.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure while wiring a controller to the page.
#[derive(Debug, Error)]
pub enum FxError {
	/// A core element the controller cannot work without is absent.
	#[error("required element `{0}` not found")]
	MissingElement(&'static str),
	/// The browser lacks a capability (window, document, 2d context, ...).
	#[error("browser capability unavailable: {0}")]
	Unsupported(&'static str),
	/// A browser call threw.
	#[error("browser call failed: {0}")]
	Js(String),
}

impl From<JsValue> for FxError {
	fn from(value: JsValue) -> Self {
		FxError::Js(format!("{value:?}"))
	}
}

/// Shorthand for results of controller wiring.
pub type FxResult<T> = Result<T, FxError>;
