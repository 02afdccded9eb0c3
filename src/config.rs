//! Tunable constants for every page effect.
//!
//! Defaults reproduce the stock page behavior. A page may override any subset
//! through a `<script id="fx-config" type="application/json">` element.

use serde::Deserialize;

/// Particle overlay configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
	/// Surface area (px²) per particle; count is `floor(w * h / area_per_particle)`.
	pub area_per_particle: f64,
	/// Velocity components are drawn from `[-max_speed, max_speed]`.
	pub max_speed: f64,
	/// Smallest particle radius.
	pub size_min: f64,
	/// Radii are drawn from `[size_min, size_max)`.
	pub size_max: f64,
	/// The overlay is only created when the viewport is wider than this.
	pub min_viewport_width: f64,
	/// CSS opacity of the overlay canvas.
	pub opacity: f64,
	/// CSS custom property holding the particle color.
	pub color_var: String,
	/// Used when the custom property is unset.
	pub fallback_color: String,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			area_per_particle: 15_000.0,
			max_speed: 0.25,
			size_min: 1.0,
			size_max: 3.0,
			min_viewport_width: 768.0,
			opacity: 0.1,
			color_var: "--primary-color".into(),
			fallback_color: "#6366f1".into(),
		}
	}
}

/// Scroll reveal and skill bar configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
	/// Elements revealed on scroll.
	pub selector: String,
	/// Visible fraction that triggers a reveal.
	pub threshold: f64,
	/// Observer root margin, CSS shorthand.
	pub root_margin: String,
	/// Skill bar fill elements carrying `data-width`.
	pub skill_selector: String,
	/// Visible fraction that starts a skill bar.
	pub skill_threshold: f64,
	/// Pause between a bar becoming visible and starting to grow.
	pub skill_delay_ms: u32,
}

impl Default for RevealConfig {
	fn default() -> Self {
		Self {
			selector: ".project-card, .skill-category, .stat, .about-image, .contact-form".into(),
			threshold: 0.1,
			root_margin: "0px 0px -50px 0px".into(),
			skill_selector: ".skill-progress".into(),
			skill_threshold: 0.5,
			skill_delay_ms: 200,
		}
	}
}

/// Typewriter timing.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypewriterConfig {
	/// Element whose text is typed out.
	pub selector: String,
	/// Wait before the first character.
	pub start_delay_ms: u32,
	/// Wait between characters.
	pub interval_ms: u32,
	/// Wait after the last character before the cursor is removed.
	pub cursor_delay_ms: u32,
	/// Inline `border-right` value used as the cursor while typing.
	pub cursor_style: String,
}

impl Default for TypewriterConfig {
	fn default() -> Self {
		Self {
			selector: ".hero-subtitle".into(),
			start_delay_ms: 1000,
			interval_ms: 100,
			cursor_delay_ms: 500,
			cursor_style: "2px solid var(--accent-color)".into(),
		}
	}
}

/// Contact form timing.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
	/// Stand-in latency for the simulated submission.
	pub submit_delay_ms: u32,
	/// How long a result banner stays before removing itself.
	pub banner_lifetime_ms: u32,
}

impl Default for FormConfig {
	fn default() -> Self {
		Self {
			submit_delay_ms: 2000,
			banner_lifetime_ms: 5000,
		}
	}
}

/// Navigation configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavConfig {
	/// Section ids in page order.
	pub sections: Vec<String>,
	/// Added to `scrollY` before locating the current section.
	pub probe_offset: f64,
	/// Navbar gets `scrolled` once `scrollY` exceeds this.
	pub scrolled_threshold: f64,
}

impl Default for NavConfig {
	fn default() -> Self {
		Self {
			sections: ["home", "about", "skills", "projects", "contact"]
				.into_iter()
				.map(String::from)
				.collect(),
			probe_offset: 100.0,
			scrolled_threshold: 50.0,
		}
	}
}

/// Parallax and floating effects.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollFxConfig {
	/// Scroll multiplier for the hero background.
	pub hero_parallax: f64,
	/// Scroll multiplier for the hero text.
	pub hero_content_parallax: f64,
	/// Peak vertical bob of a skill category, in px.
	pub float_amplitude: f64,
	/// Phase advance per scrolled px, in radians.
	pub float_frequency: f64,
}

impl Default for ScrollFxConfig {
	fn default() -> Self {
		Self {
			hero_parallax: 0.5,
			hero_content_parallax: 0.1,
			float_amplitude: 10.0,
			float_frequency: 0.01,
		}
	}
}

/// All effect configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FxConfig {
	/// Particle overlay.
	pub particles: ParticleConfig,
	/// Scroll reveals and skill bars.
	pub reveal: RevealConfig,
	/// Hero subtitle typewriter.
	pub typewriter: TypewriterConfig,
	/// Contact form.
	pub form: FormConfig,
	/// Navbar and section highlighting.
	pub nav: NavConfig,
	/// Parallax and floating.
	pub scroll: ScrollFxConfig,
}

impl FxConfig {
	/// Parse a (possibly partial) JSON override.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
