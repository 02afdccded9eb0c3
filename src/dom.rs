//! Small DOM access helpers shared by the controllers.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

use crate::error::{FxError, FxResult};

pub fn window() -> FxResult<Window> {
	web_sys::window().ok_or(FxError::Unsupported("window"))
}

pub fn document() -> FxResult<Document> {
	window()?
		.document()
		.ok_or(FxError::Unsupported("document"))
}

/// Look up a core element; absence is an error.
pub fn require_id(id: &'static str) -> FxResult<HtmlElement> {
	document()?
		.get_element_by_id(id)
		.and_then(|el| el.dyn_into::<HtmlElement>().ok())
		.ok_or(FxError::MissingElement(id))
}

/// Look up an optional element.
pub fn find_id(id: &str) -> Option<HtmlElement> {
	document()
		.ok()?
		.get_element_by_id(id)?
		.dyn_into::<HtmlElement>()
		.ok()
}

pub fn query(selector: &str) -> Option<HtmlElement> {
	document()
		.ok()?
		.query_selector(selector)
		.ok()
		.flatten()?
		.dyn_into::<HtmlElement>()
		.ok()
}

/// All elements matching `selector` in document order. Invalid selectors yield nothing.
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
	document()
		.ok()
		.and_then(|d| d.query_selector_all(selector).ok())
		.map(html_elements)
		.unwrap_or_default()
}

/// Like [`query_all`], scoped to the descendants of `root`.
pub fn query_all_in(root: &Element, selector: &str) -> Vec<HtmlElement> {
	root.query_selector_all(selector)
		.map(html_elements)
		.unwrap_or_default()
}

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
	(0..list.length())
		.filter_map(|i| list.get(i))
		.filter_map(|node| node.dyn_into::<HtmlElement>().ok())
		.collect()
}

pub fn scroll_y() -> f64 {
	web_sys::window()
		.and_then(|w| w.scroll_y().ok())
		.unwrap_or(0.0)
}

pub fn viewport_size() -> (f64, f64) {
	let Some(win) = web_sys::window() else {
		return (0.0, 0.0);
	};
	let width = win
		.inner_width()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	let height = win
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	(width, height)
}

pub fn set_transform(el: &HtmlElement, value: &str) {
	let _ = el.style().set_property("transform", value);
}
