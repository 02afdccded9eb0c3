//! Light/dark theme preference persisted in browser storage.
//!
//! The preference is read once at startup (defaulting to light), flipped by
//! the toggle button and written back on every change. Storage failures are
//! logged and otherwise ignored so the toggle keeps working in private modes.
//! Concurrent tabs are not coordinated; the last write wins.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use thiserror::Error;
use web_sys::Storage;

use crate::dom;
use crate::events::Subscriptions;

/// Storage key holding `"light"` or `"dark"`.
pub const STORAGE_KEY: &str = "theme";

/// The two page themes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	/// Light palette; the default.
	#[default]
	Light,
	/// Dark palette.
	Dark,
}

impl ThemeMode {
	/// Stored and `data-theme` value.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
		}
	}

	/// Inverse of [`ThemeMode::as_str`].
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"light" => Some(ThemeMode::Light),
			"dark" => Some(ThemeMode::Dark),
			_ => None,
		}
	}

	/// The other theme.
	pub fn toggled(self) -> Self {
		match self {
			ThemeMode::Light => ThemeMode::Dark,
			ThemeMode::Dark => ThemeMode::Light,
		}
	}

	/// Icon offering the opposite theme: a sun while dark, a moon while light.
	pub fn icon_class(self) -> &'static str {
		match self {
			ThemeMode::Light => "fas fa-moon",
			ThemeMode::Dark => "fas fa-sun",
		}
	}
}

/// Persistent storage could not be read or written.
#[derive(Debug, Error)]
#[error("preference storage unavailable: {0}")]
pub struct StoreError(pub String);

/// Key-value persistence for preferences.
pub trait PreferenceStore {
	/// Value stored under `key`, if any.
	fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
	/// Store `value` under `key`.
	fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The browser's origin-scoped `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
	fn storage() -> Result<Storage, StoreError> {
		web_sys::window()
			.ok_or_else(|| StoreError("no window".into()))?
			.local_storage()
			.map_err(|e| StoreError(format!("{e:?}")))?
			.ok_or_else(|| StoreError("localStorage disabled".into()))
	}
}

impl PreferenceStore for LocalStore {
	fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
		Self::storage()?
			.get_item(key)
			.map_err(|e| StoreError(format!("{e:?}")))
	}

	fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
		Self::storage()?
			.set_item(key, value)
			.map_err(|e| StoreError(format!("{e:?}")))
	}
}

/// In-process store, for pages without storage access and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
	/// Value stored under `key`.
	pub fn get(&self, key: &str) -> Option<String> {
		self.values.borrow().get(key).cloned()
	}
}

impl PreferenceStore for MemoryStore {
	fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.get(key))
	}

	fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
		self.values
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// The page-wide theme value and its persistence.
pub struct ThemePreference<S> {
	store: S,
	current: ThemeMode,
}

impl<S: PreferenceStore> ThemePreference<S> {
	/// Read the persisted value once. Missing, invalid or unreadable values mean light.
	pub fn load(store: S) -> Self {
		let current = match store.load(STORAGE_KEY) {
			Ok(value) => value
				.as_deref()
				.and_then(ThemeMode::parse)
				.unwrap_or_default(),
			Err(e) => {
				warn!("folio-fx: {}", e);
				ThemeMode::default()
			}
		};
		Self { store, current }
	}

	/// Current theme.
	pub fn get(&self) -> ThemeMode {
		self.current
	}

	/// Flip the theme and persist it.
	pub fn toggle(&mut self) -> ThemeMode {
		self.current = self.current.toggled();
		self.persist();
		self.current
	}

	/// Write the current value; failures are logged and dropped.
	pub fn persist(&self) {
		if let Err(e) = self.store.save(STORAGE_KEY, self.current.as_str()) {
			warn!("folio-fx: {}", e);
		}
	}

	/// Backing store.
	pub fn store(&self) -> &S {
		&self.store
	}
}

fn toggle_icon() -> Option<web_sys::Element> {
	dom::find_id("theme-toggle")?.query_selector("i").ok().flatten()
}

/// Wire the toggle button to `theme`, which must already hold the loaded value.
///
/// The icon follows the signal; the root `data-theme` attribute is bound by the app.
pub fn wire_theme<S: PreferenceStore + 'static>(
	preference: ThemePreference<S>,
	theme: RwSignal<ThemeMode>,
) -> Subscriptions {
	preference.persist();

	Effect::new(move |_| {
		let mode = theme.get();
		if let Some(icon) = toggle_icon() {
			icon.set_class_name(mode.icon_class());
		}
	});

	let mut subs = Subscriptions::new();
	let Some(button) = dom::find_id("theme-toggle") else {
		warn!("folio-fx: no theme toggle on page");
		return subs;
	};
	let preference = Rc::new(RefCell::new(preference));
	subs.on(&button, "click", move |_| {
		let next = preference.borrow_mut().toggle();
		theme.set(next);
		info!("folio-fx: theme set to {}", next.as_str());
	});
	subs
}
