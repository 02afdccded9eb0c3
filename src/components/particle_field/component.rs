//! Leptos component hosting the particle overlay canvas.
//!
//! The component renders a fixed, pointer-transparent canvas over the whole
//! viewport. Once mounted, a [`ParticleField`] seeds the particles and drives
//! an animation loop via `requestAnimationFrame` until it is torn down.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::particles::ParticleSystem;
use super::render;
use crate::config::ParticleConfig;
use crate::dom;
use crate::error::{FxError, FxResult};
use crate::events::Subscriptions;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running particle overlay bound to one canvas.
pub struct ParticleField {
	canvas: HtmlCanvasElement,
	frame_id: Rc<Cell<Option<i32>>>,
	animate: FrameCallback,
	_resize: Subscriptions,
}

impl ParticleField {
	/// Size `canvas` to the viewport, seed particles and start animating.
	pub fn start(canvas: HtmlCanvasElement, config: &ParticleConfig) -> FxResult<Self> {
		let window = dom::window()?;
		let (w, h) = dom::viewport_size();
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(FxError::Unsupported("2d canvas context"))?
			.dyn_into()
			.map_err(|_| FxError::Unsupported("2d canvas context"))?;

		let system = Rc::new(RefCell::new(ParticleSystem::new(
			config,
			w,
			h,
			&mut js_sys::Math::random,
		)));
		info!(
			"folio-fx: seeded {} particles on {}x{}",
			system.borrow().particles.len(),
			w,
			h
		);

		let mut resize = Subscriptions::new();
		let (system_resize, canvas_resize) = (system.clone(), canvas.clone());
		resize.on(&window, "resize", move |_| {
			let (nw, nh) = dom::viewport_size();
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			system_resize.borrow_mut().resize(nw, nh);
		});

		let frame_id = Rc::new(Cell::new(None));
		let animate: FrameCallback = Rc::new(RefCell::new(None));
		let (frame_anim, animate_inner, config) =
			(frame_id.clone(), animate.clone(), config.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let color = render::resolve_color(&win, &config);
			{
				let mut system = system.borrow_mut();
				system.advance();
				render::render(&system, &ctx, &color);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				frame_anim.set(
					win.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			frame_id.set(
				window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}

		Ok(Self {
			canvas,
			frame_id,
			animate,
			_resize: resize,
		})
	}

	/// Cancel the pending frame, stop listening for resizes and remove the canvas.
	pub fn teardown(self) {
		if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Breaks the callback's reference to itself.
		self.animate.borrow_mut().take();
		self.canvas.remove();
		info!("folio-fx: particle field torn down");
	}
}

/// Whether the overlay should run at all, decided once from the load-time viewport.
pub fn particles_enabled(config: &ParticleConfig) -> bool {
	particles_enabled_for(dom::viewport_size().0, config)
}

/// The overlay only runs on viewports strictly wider than `min_viewport_width`.
pub fn particles_enabled_for(width: f64, config: &ParticleConfig) -> bool {
	width > config.min_viewport_width
}

/// Full-viewport decorative particle canvas.
///
/// The field is torn down when the component is unmounted.
#[component]
pub fn ParticleCanvas(
	/// Overlay configuration.
	#[prop(into)]
	config: ParticleConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let field = StoredValue::new_local(None::<ParticleField>);
	let style = format!(
		"position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
		 pointer-events: none; z-index: 1; opacity: {};",
		config.opacity
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if field.with_value(Option::is_some) {
			return;
		}
		match ParticleField::start(canvas.into(), &config) {
			Ok(started) => field.set_value(Some(started)),
			Err(e) => warn!("folio-fx: particle field disabled: {}", e),
		}
	});

	on_cleanup(move || {
		if let Some(running) = field.try_update_value(Option::take).flatten() {
			running.teardown();
		}
	});

	view! { <canvas node_ref=canvas_ref class="particle-field" style=style /> }
}
