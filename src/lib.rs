//! folio-fx: client-side interactivity for a static portfolio page.
//!
//! This crate enhances server-rendered portfolio markup with a decorative
//! particle overlay, scroll reveals, hover transforms, a typewriter subtitle,
//! a persisted light/dark theme, navigation highlighting and a validated
//! contact form. Every controller attaches to existing elements by id or
//! class; decorative elements that are missing are skipped.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;
pub mod config;
mod dom;
pub mod error;
pub mod events;

pub use components::particle_field::{ParticleCanvas, ParticleField};
pub use components::theme::{ThemeMode, ThemePreference};
pub use config::FxConfig;
pub use error::{FxError, FxResult};

use components::theme::{LocalStore, wire_theme};
use components::typewriter::TypewriterHandle;
use components::{contact_form, hover, navigation, particle_field, reveal, scroll_fx, typewriter};
use events::Subscriptions;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("folio-fx: logging initialized");
}

/// Load configuration overrides from a script element with id="fx-config".
/// Expected format: a JSON object with any subset of [`FxConfig`]'s fields.
fn load_config() -> FxConfig {
	let Some(script) = dom::find_id("fx-config").and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
	else {
		return FxConfig::default();
	};
	let Ok(json_text) = script.text() else {
		return FxConfig::default();
	};

	match FxConfig::from_json(&json_text) {
		Ok(config) => {
			info!("folio-fx: loaded configuration overrides");
			config
		}
		Err(e) => {
			warn!("folio-fx: failed to parse configuration: {}", e);
			FxConfig::default()
		}
	}
}

/// Keep a controller's listeners for the page lifetime, or log why it is inactive.
fn keep(name: &str, wired: FxResult<Subscriptions>) {
	match wired {
		Ok(subs) => subs.persist(),
		Err(e) => warn!("folio-fx: {} disabled: {}", name, e),
	}
}

/// Attach every controller to the page.
///
/// A controller that fails to wire is logged and skipped; the rest still run.
/// Returns the typewriter's cancellation handle when the page has a subtitle.
pub fn wire_page(
	config: &FxConfig,
	theme: RwSignal<ThemeMode>,
	preference: ThemePreference<LocalStore>,
) -> Option<TypewriterHandle> {
	keep("navigation", navigation::wire_navigation(&config.nav));
	keep("theme toggle", Ok(wire_theme(preference, theme)));
	keep("contact form", contact_form::wire_contact_form(&config.form));
	if let Err(e) = reveal::wire_reveal(&config.reveal) {
		warn!("folio-fx: scroll reveal disabled: {}", e);
	}
	if let Err(e) = reveal::wire_skill_bars(&config.reveal) {
		warn!("folio-fx: skill bars disabled: {}", e);
	}
	keep("scroll effects", scroll_fx::wire_scroll_fx(&config.scroll));
	hover::wire_hover().persist();
	let handle = typewriter::wire_typewriter(&config.typewriter);
	if handle.is_none() {
		info!("folio-fx: no typewriter target");
	}
	navigation::mark_loaded();
	handle
}

/// Main application component.
/// Wires the page controllers and renders the theme attribute and particle overlay.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let preference = ThemePreference::load(LocalStore);
	let theme = RwSignal::new(preference.get());
	let particles = particle_field::particles_enabled(&config.particles);
	if let Some(handle) = wire_page(&config, theme, preference) {
		on_cleanup(move || handle.cancel());
	}

	let particle_config = config.particles;
	view! {
		<Html attr:data-theme=move || theme.get().as_str() />
		{particles.then(|| view! { <ParticleCanvas config=particle_config /> })}
	}
}
