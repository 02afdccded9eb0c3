//! Scroll-linked decoration: hero parallax and floating skill categories.

use std::cell::Cell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;

use crate::config::ScrollFxConfig;
use crate::dom;
use crate::error::FxResult;
use crate::events::Subscriptions;

/// Allows at most one pending animation-frame callback at a time.
#[derive(Debug, Default)]
pub struct FrameGate {
	pending: Cell<bool>,
}

impl FrameGate {
	/// Returns `true` if the caller should schedule a frame.
	pub fn try_arm(&self) -> bool {
		!self.pending.replace(true)
	}

	/// Called from the frame callback once it has run.
	pub fn release(&self) {
		self.pending.set(false);
	}

	/// Whether a frame is scheduled.
	pub fn is_pending(&self) -> bool {
		self.pending.get()
	}
}

/// Vertical shift proportional to the scroll position.
pub fn parallax_transform(scroll_y: f64, factor: f64) -> String {
	format!("translateY({}px)", scroll_y * factor)
}

/// Vertical bob of the `index`-th skill category.
pub fn float_offset(scroll_y: f64, index: usize, config: &ScrollFxConfig) -> f64 {
	(scroll_y * config.float_frequency + index as f64).sin() * config.float_amplitude
}

/// Whether a client rect spanning `[top, bottom]` overlaps a viewport of `viewport_height`.
pub fn in_viewport(top: f64, bottom: f64, viewport_height: f64) -> bool {
	top < viewport_height && bottom > 0.0
}

/// Wire parallax and floating effects. Both are skipped when their elements are absent.
pub fn wire_scroll_fx(config: &ScrollFxConfig) -> FxResult<Subscriptions> {
	let window = dom::window()?;
	let mut subs = Subscriptions::new();

	let layers: Vec<_> = [
		(".hero", config.hero_parallax),
		(".hero-content", config.hero_content_parallax),
	]
	.into_iter()
	.filter_map(|(selector, factor)| dom::query(selector).map(|el| (el, factor)))
	.collect();
	if !layers.is_empty() {
		subs.on(&window, "scroll", move |_| {
			let scroll_y = dom::scroll_y();
			for (el, factor) in &layers {
				dom::set_transform(el, &parallax_transform(scroll_y, *factor));
			}
		});
	}

	let categories = dom::query_all(".skill-category");
	if !categories.is_empty() {
		info!("folio-fx: floating {} skill categories", categories.len());
		let gate = Rc::new(FrameGate::default());
		let (gate_frame, config) = (gate.clone(), config.clone());
		let update: Rc<Closure<dyn FnMut()>> = Rc::new(Closure::new(move || {
			let scroll_y = dom::scroll_y();
			let (_, viewport_height) = dom::viewport_size();
			for (index, category) in categories.iter().enumerate() {
				let rect = category.get_bounding_client_rect();
				if in_viewport(rect.top(), rect.bottom(), viewport_height) {
					let offset = float_offset(scroll_y, index, &config);
					dom::set_transform(category, &format!("translateY({offset}px)"));
				}
			}
			gate_frame.release();
		}));

		let window_frame = window.clone();
		subs.on(&window, "scroll", move |_| {
			if !gate.try_arm() {
				return;
			}
			let callback: &Closure<dyn FnMut()> = &update;
			if window_frame
				.request_animation_frame(callback.as_ref().unchecked_ref())
				.is_err()
			{
				gate.release();
			}
		});
	}

	Ok(subs)
}
