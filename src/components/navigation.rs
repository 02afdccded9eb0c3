//! Navigation bar behavior: active-section highlighting, scrolled styling,
//! the mobile menu and smooth in-page anchor scrolling.

use log::{debug, info};
use web_sys::{
	Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::NavConfig;
use crate::dom;
use crate::error::FxResult;
use crate::events::Subscriptions;

const ACTIVE_CLASS: &str = "active";
const SCROLLED_CLASS: &str = "scrolled";

/// Vertical extent of a page section in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSpan {
	/// Offset from the document top.
	pub top: f64,
	/// Height in px.
	pub height: f64,
}

impl SectionSpan {
	/// Half-open `[top, top + height)`.
	pub fn contains(&self, y: f64) -> bool {
		y >= self.top && y < self.top + self.height
	}
}

/// Tracks which section's link is active.
///
/// When the probe position falls outside every section the previous
/// selection is kept.
#[derive(Clone, Debug)]
pub struct NavigationHighlighter {
	sections: Vec<String>,
	probe_offset: f64,
	active: Option<usize>,
}

impl NavigationHighlighter {
	/// No section active yet.
	pub fn new(config: &NavConfig) -> Self {
		Self {
			sections: config.sections.clone(),
			probe_offset: config.probe_offset,
			active: None,
		}
	}

	/// Tracked section ids, in page order.
	pub fn sections(&self) -> &[String] {
		&self.sections
	}

	/// Recompute the active section for `scroll_y`.
	///
	/// `spans[i]` is the extent of `sections()[i]`, or `None` if that section
	/// is missing from the page. Returns the newly active section id if the
	/// selection changed.
	pub fn on_scroll(&mut self, scroll_y: f64, spans: &[Option<SectionSpan>]) -> Option<&str> {
		let probe = scroll_y + self.probe_offset;
		let hit = spans
			.iter()
			.take(self.sections.len())
			.position(|span| span.is_some_and(|s| s.contains(probe)))?;
		if self.active == Some(hit) {
			return None;
		}
		self.active = Some(hit);
		Some(&self.sections[hit])
	}

	/// The currently highlighted section.
	pub fn active(&self) -> Option<&str> {
		self.active.map(|i| self.sections[i].as_str())
	}
}

/// Whether the navbar should carry the `scrolled` class.
pub fn navbar_scrolled(scroll_y: f64, config: &NavConfig) -> bool {
	scroll_y > config.scrolled_threshold
}

/// The section id an in-page link points at.
pub fn link_target(href: &str) -> Option<&str> {
	href.strip_prefix('#').filter(|id| !id.is_empty())
}

fn section_spans(sections: &[String]) -> Vec<Option<SectionSpan>> {
	sections
		.iter()
		.map(|id| {
			dom::find_id(id).map(|el| SectionSpan {
				top: el.offset_top() as f64,
				height: el.offset_height() as f64,
			})
		})
		.collect()
}

fn set_active_link(links: &[HtmlElement], section: &str) {
	for link in links {
		let _ = link.class_list().remove_1(ACTIVE_CLASS);
		let href = link.get_attribute("href").unwrap_or_default();
		if link_target(&href) == Some(section) {
			let _ = link.class_list().add_1(ACTIVE_CLASS);
		}
	}
}

fn set_class(el: &Element, class: &str, on: bool) {
	let list = el.class_list();
	let _ = if on {
		list.add_1(class)
	} else {
		list.remove_1(class)
	};
}

fn smooth_scroll_to(href: &str) -> bool {
	let Some(id) = link_target(href) else {
		return false;
	};
	let Some(target) = dom::find_id(id) else {
		return false;
	};
	let options = ScrollIntoViewOptions::new();
	options.set_behavior(ScrollBehavior::Smooth);
	options.set_block(ScrollLogicalPosition::Start);
	target.scroll_into_view_with_scroll_into_view_options(&options);
	true
}

/// Wire the navbar. The `navbar` element is required; everything else is optional.
pub fn wire_navigation(config: &NavConfig) -> FxResult<Subscriptions> {
	let navbar = dom::require_id("navbar")?;
	let window = dom::window()?;
	let links = dom::query_all(".nav-link");
	let (toggle, menu) = (dom::find_id("nav-toggle"), dom::find_id("nav-menu"));
	let mut subs = Subscriptions::new();

	if let (Some(toggle), Some(menu)) = (toggle.clone(), menu.clone()) {
		let toggle_el = toggle.clone();
		subs.on(&toggle, "click", move |_| {
			let _ = menu.class_list().toggle(ACTIVE_CLASS);
			let _ = toggle_el.class_list().toggle(ACTIVE_CLASS);
		});
	}
	for link in &links {
		let (toggle, menu) = (toggle.clone(), menu.clone());
		subs.on(link, "click", move |_| {
			for el in toggle.iter().chain(menu.iter()) {
				let _ = el.class_list().remove_1(ACTIVE_CLASS);
			}
		});
	}

	let nav_config = config.clone();
	subs.on(&window, "scroll", move |_| {
		set_class(&navbar, SCROLLED_CLASS, navbar_scrolled(dom::scroll_y(), &nav_config));
	});

	let mut highlighter = NavigationHighlighter::new(config);
	let mut highlight = move || {
		let spans = section_spans(highlighter.sections());
		if let Some(section) = highlighter.on_scroll(dom::scroll_y(), &spans) {
			debug!("folio-fx: active section {}", section);
			set_active_link(&links, section);
		}
	};
	highlight();
	subs.on(&window, "scroll", move |_| highlight());

	let anchors = dom::query_all("a[href^=\"#\"]");
	for anchor in &anchors {
		let anchor_el = anchor.clone();
		subs.on(anchor, "click", move |ev| {
			let href = anchor_el.get_attribute("href").unwrap_or_default();
			if smooth_scroll_to(&href) {
				ev.prevent_default();
			}
		});
	}

	info!("folio-fx: navigation wired ({} anchors)", anchors.len());
	Ok(subs)
}

/// Mark the document as fully wired.
pub fn mark_loaded() {
	if let Some(body) = dom::document().ok().and_then(|d| d.body()) {
		let _ = body.class_list().add_1("loaded");
	}
}
