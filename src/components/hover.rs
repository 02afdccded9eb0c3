//! Pointer-driven hover transforms: magnetic buttons and tilting cards.

use log::info;
use web_sys::{DomRect, HtmlElement, MouseEvent};
use wasm_bindgen::JsCast;

use crate::dom;
use crate::events::Subscriptions;

/// Fraction of the pointer's offset from center that a button follows.
const MAGNETIC_PULL: f64 = 0.1;
/// Pixels of pointer offset per degree of card rotation.
const TILT_DIVISOR: f64 = 10.0;

/// Element bounds in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub left: f64,
	/// Top edge.
	pub top: f64,
	/// Width in px.
	pub width: f64,
	/// Height in px.
	pub height: f64,
}

impl From<&DomRect> for Bounds {
	fn from(rect: &DomRect) -> Self {
		Self {
			left: rect.left(),
			top: rect.top(),
			width: rect.width(),
			height: rect.height(),
		}
	}
}

/// The two hover behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEffect {
	/// Buttons drift toward the pointer.
	Magnetic,
	/// Cards rotate in 3-D away from the pointer.
	Tilt,
}

impl HoverEffect {
	/// Elements that get this effect.
	pub fn selector(self) -> &'static str {
		match self {
			HoverEffect::Magnetic => ".btn",
			HoverEffect::Tilt => ".project-card",
		}
	}

	/// Transform for a pointer at client position `(x, y)` over `bounds`.
	pub fn on_pointer_move(self, bounds: Bounds, x: f64, y: f64) -> String {
		match self {
			HoverEffect::Magnetic => {
				let (dx, dy) = magnetic_offset(bounds, x, y);
				format!("translate({dx}px, {dy}px)")
			}
			HoverEffect::Tilt => {
				let (rx, ry) = tilt_angles(bounds, x, y);
				format!("perspective(1000px) rotateX({rx}deg) rotateY({ry}deg)")
			}
		}
	}

	/// Transform once the pointer leaves.
	pub fn on_pointer_leave(self) -> &'static str {
		match self {
			HoverEffect::Magnetic => "translate(0, 0)",
			HoverEffect::Tilt => "perspective(1000px) rotateX(0) rotateY(0)",
		}
	}
}

/// Translation of a magnetic button toward the pointer.
pub fn magnetic_offset(bounds: Bounds, x: f64, y: f64) -> (f64, f64) {
	let dx = x - bounds.left - bounds.width / 2.0;
	let dy = y - bounds.top - bounds.height / 2.0;
	(dx * MAGNETIC_PULL, dy * MAGNETIC_PULL)
}

/// `(rotateX, rotateY)` in degrees.
pub fn tilt_angles(bounds: Bounds, x: f64, y: f64) -> (f64, f64) {
	let (local_x, local_y) = (x - bounds.left, y - bounds.top);
	let (center_x, center_y) = (bounds.width / 2.0, bounds.height / 2.0);
	(
		(local_y - center_y) / TILT_DIVISOR,
		(center_x - local_x) / TILT_DIVISOR,
	)
}

fn bind(effect: HoverEffect, el: HtmlElement, subs: &mut Subscriptions) {
	let el_move = el.clone();
	subs.on(&el, "mousemove", move |ev| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		let bounds = Bounds::from(&el_move.get_bounding_client_rect());
		let transform =
			effect.on_pointer_move(bounds, ev.client_x() as f64, ev.client_y() as f64);
		dom::set_transform(&el_move, &transform);
	});

	let el_leave = el.clone();
	subs.on(&el, "mouseleave", move |_| {
		dom::set_transform(&el_leave, effect.on_pointer_leave());
	});
}

/// Attach both hover behaviors to every matching element on the page.
pub fn wire_hover() -> Subscriptions {
	let mut subs = Subscriptions::new();
	for effect in [HoverEffect::Magnetic, HoverEffect::Tilt] {
		let elements = dom::query_all(effect.selector());
		info!("folio-fx: {:?} hover on {} elements", effect, elements.len());
		for el in elements {
			bind(effect, el, &mut subs);
		}
	}
	subs
}

#[cfg(test)]
mod tests {
	use super::*;

	const BUTTON: Bounds = Bounds {
		left: 100.0,
		top: 50.0,
		width: 200.0,
		height: 40.0,
	};

	#[test]
	fn magnetic_follows_tenth_of_offset() {
		assert_eq!(magnetic_offset(BUTTON, 200.0, 70.0), (0.0, 0.0));
		assert_eq!(magnetic_offset(BUTTON, 300.0, 90.0), (10.0, 2.0));
		assert_eq!(magnetic_offset(BUTTON, 100.0, 50.0), (-10.0, -2.0));
	}

	#[test]
	fn tilt_rotates_away_from_pointer() {
		let card = Bounds {
			left: 0.0,
			top: 0.0,
			width: 300.0,
			height: 400.0,
		};
		assert_eq!(tilt_angles(card, 150.0, 200.0), (0.0, 0.0));
		// Top-left corner tips the top edge back and the left edge up.
		assert_eq!(tilt_angles(card, 0.0, 0.0), (-20.0, 15.0));
		assert_eq!(tilt_angles(card, 300.0, 400.0), (20.0, -15.0));
	}

	#[test]
	fn transforms_render_css() {
		assert_eq!(
			HoverEffect::Magnetic.on_pointer_move(BUTTON, 300.0, 90.0),
			"translate(10px, 2px)"
		);
		assert_eq!(
			HoverEffect::Tilt.on_pointer_move(BUTTON, 100.0, 50.0),
			"perspective(1000px) rotateX(-2deg) rotateY(10deg)"
		);
	}

	#[test]
	fn leaving_resets() {
		assert_eq!(HoverEffect::Magnetic.on_pointer_leave(), "translate(0, 0)");
		assert_eq!(
			HoverEffect::Tilt.on_pointer_leave(),
			"perspective(1000px) rotateX(0) rotateY(0)"
		);
	}
}
