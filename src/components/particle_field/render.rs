//! Canvas drawing for the particle overlay.

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, Window};

use super::particles::ParticleSystem;
use crate::config::ParticleConfig;

/// Clear the surface and draw every particle as a filled circle.
pub fn render(system: &ParticleSystem, ctx: &CanvasRenderingContext2d, color: &str) {
	let (width, height) = system.bounds();
	ctx.clear_rect(0.0, 0.0, width, height);
	ctx.set_fill_style_str(color);

	for p in &system.particles {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.size, 0.0, PI * 2.0);
		ctx.fill();
	}
}

/// Read the particle color from the document's CSS custom property.
///
/// Resolved every frame so theme switches recolor the particles.
pub fn resolve_color(window: &Window, config: &ParticleConfig) -> String {
	window
		.document()
		.and_then(|d| d.document_element())
		.and_then(|root| window.get_computed_style(&root).ok().flatten())
		.and_then(|style| style.get_property_value(&config.color_var).ok())
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
		.unwrap_or_else(|| config.fallback_color.clone())
}
