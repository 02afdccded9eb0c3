//! Uniform event registration for every controller.
//!
//! Controllers never call `add_event_listener` directly. They register through
//! [`Subscriptions`], which owns the listeners: dropping it unregisters them,
//! [`Subscriptions::persist`] keeps them for the lifetime of the page.

use std::borrow::Cow;

use gloo::events::EventListener;
use web_sys::{Event, EventTarget};

/// An owned set of DOM event listeners.
#[derive(Default)]
pub struct Subscriptions {
	listeners: Vec<EventListener>,
}

impl Subscriptions {
	/// No listeners.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `handler` for `event` on `target`.
	pub fn on<F>(&mut self, target: &EventTarget, event: impl Into<Cow<'static, str>>, handler: F)
	where
		F: FnMut(&Event) + 'static,
	{
		self.listeners
			.push(EventListener::new(target, event, handler));
	}

	/// Keep every listener registered until the page unloads.
	pub fn persist(self) {
		for listener in self.listeners {
			listener.forget();
		}
	}
}
