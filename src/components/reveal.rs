//! One-way reveal of page elements as they scroll into view.
//!
//! Each observed element flips from hidden to revealed the first time it
//! crosses the visibility threshold and never flips back. Skill bars use the
//! same mechanism to grow to their `data-width` percentage.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealConfig;
use crate::dom;
use crate::error::FxResult;

/// Marker class for elements waiting to be revealed.
pub const PENDING_CLASS: &str = "animate-on-scroll";
/// Marker class for revealed elements.
pub const REVEALED_CLASS: &str = "animate-in";

/// Monotonic revealed flags for a fixed set of targets.
#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
	revealed: Vec<bool>,
}

impl RevealTracker {
	/// `targets` hidden targets.
	pub fn new(targets: usize) -> Self {
		Self {
			revealed: vec![false; targets],
		}
	}

	/// Record an intersection change. Returns `true` only when the target
	/// becomes revealed by this call.
	pub fn on_intersection(&mut self, idx: usize, intersecting: bool) -> bool {
		match self.revealed.get_mut(idx) {
			Some(flag) if intersecting && !*flag => {
				*flag = true;
				true
			}
			_ => false,
		}
	}

	/// Whether target `idx` has been revealed. Unknown indices are not.
	pub fn is_revealed(&self, idx: usize) -> bool {
		self.revealed.get(idx).copied().unwrap_or(false)
	}

	/// Number of revealed targets.
	pub fn revealed_count(&self) -> usize {
		self.revealed.iter().filter(|r| **r).count()
	}
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// An intersection observer that fires `on_reveal` once per target.
pub struct OneShotObserver {
	observer: IntersectionObserver,
	callback: ObserverCallback,
}

impl OneShotObserver {
	/// Watch `targets` and call `on_reveal` the first time each becomes visible.
	pub fn observe<F>(
		targets: Vec<HtmlElement>,
		threshold: f64,
		root_margin: &str,
		mut on_reveal: F,
	) -> FxResult<Self>
	where
		F: FnMut(&HtmlElement) + 'static,
	{
		let tracker = Rc::new(RefCell::new(RevealTracker::new(targets.len())));
		let observed = Rc::new(targets);

		let observed_cb = observed.clone();
		let callback: ObserverCallback = Closure::new(
			move |entries: js_sys::Array, observer: IntersectionObserver| {
				for entry in entries.iter() {
					let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
						continue;
					};
					let target = entry.target();
					let Some(idx) = observed_cb
						.iter()
						.position(|el| el.unchecked_ref::<Element>() == &target)
					else {
						continue;
					};
					if tracker
						.borrow_mut()
						.on_intersection(idx, entry.is_intersecting())
					{
						on_reveal(&observed_cb[idx]);
						observer.unobserve(&target);
					}
				}
			},
		);

		let options = IntersectionObserverInit::new();
		options.set_threshold(&JsValue::from_f64(threshold));
		options.set_root_margin(root_margin);
		let observer =
			IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
		for el in observed.iter() {
			observer.observe(el);
		}

		Ok(Self { observer, callback })
	}

	/// Keep observing for the lifetime of the page.
	pub fn persist(self) {
		self.callback.forget();
		std::mem::forget(self.observer);
	}
}

/// Inline width for a skill bar from its `data-width` attribute.
pub fn skill_width(attr: Option<String>) -> Option<String> {
	let value = attr?.trim().parse::<f64>().ok()?;
	value.is_finite().then(|| format!("{value}%"))
}

/// Mark reveal targets as pending and start observing them.
pub fn wire_reveal(config: &RevealConfig) -> FxResult<()> {
	let targets = dom::query_all(&config.selector);
	if targets.is_empty() {
		return Ok(());
	}
	for el in &targets {
		let _ = el.class_list().add_1(PENDING_CLASS);
	}
	let count = targets.len();
	OneShotObserver::observe(targets, config.threshold, &config.root_margin, |el| {
		let _ = el.class_list().add_1(REVEALED_CLASS);
	})?
	.persist();
	info!("folio-fx: observing {} reveal targets", count);
	Ok(())
}

/// Grow skill bars to their target width the first time they are half visible.
pub fn wire_skill_bars(config: &RevealConfig) -> FxResult<()> {
	let bars: Vec<HtmlElement> = dom::query_all(&config.skill_selector)
		.into_iter()
		.filter(|bar| skill_width(bar.get_attribute("data-width")).is_some())
		.collect();
	if bars.is_empty() {
		return Ok(());
	}
	let (count, delay) = (bars.len(), config.skill_delay_ms);
	OneShotObserver::observe(bars, config.skill_threshold, "0px", move |bar| {
		let Some(width) = skill_width(bar.get_attribute("data-width")) else {
			return;
		};
		let bar = bar.clone();
		Timeout::new(delay, move || {
			let _ = bar.style().set_property("width", &width);
		})
		.forget();
	})?
	.persist();
	info!("folio-fx: observing {} skill bars", count);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_intersection_reveals() {
		let mut tracker = RevealTracker::new(3);
		assert!(!tracker.on_intersection(1, false));
		assert!(!tracker.is_revealed(1));
		assert!(tracker.on_intersection(1, true));
		assert!(tracker.is_revealed(1));
		assert_eq!(tracker.revealed_count(), 1);
	}

	#[test]
	fn reveal_is_monotonic() {
		let mut tracker = RevealTracker::new(2);
		assert!(tracker.on_intersection(0, true));
		// Leaves the viewport, then comes back.
		assert!(!tracker.on_intersection(0, false));
		assert!(tracker.is_revealed(0));
		assert!(!tracker.on_intersection(0, true));
		assert!(tracker.is_revealed(0));
		assert!(!tracker.is_revealed(1));
	}

	#[test]
	fn unknown_targets_are_ignored() {
		let mut tracker = RevealTracker::new(1);
		assert!(!tracker.on_intersection(5, true));
		assert!(!tracker.is_revealed(5));
		assert_eq!(tracker.revealed_count(), 0);
	}

	#[test]
	fn skill_width_parses_percentages() {
		assert_eq!(skill_width(Some("85".into())), Some("85%".into()));
		assert_eq!(skill_width(Some(" 62.5 ".into())), Some("62.5%".into()));
		assert_eq!(skill_width(Some("wide".into())), None);
		assert_eq!(skill_width(None), None);
	}
}
