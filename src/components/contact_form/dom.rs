//! DOM bindings for the contact form.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use super::machine::{BannerKind, ContactForm, FormView, SimulatedSubmitter};
use super::validation::{ContactMessage, Field, FieldError};
use crate::config::FormConfig;
use crate::dom;
use crate::error::{FxError, FxResult};
use crate::events::Subscriptions;

const SHOW_CLASS: &str = "show";
const SENDING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#;

fn banner_style(kind: BannerKind) -> String {
	let (background, color) = match kind {
		BannerKind::Success => ("#d4edda", "#155724"),
		BannerKind::Error => ("#f8d7da", "#721c24"),
	};
	format!(
		"background: {background}; color: {color}; padding: 16px; border-radius: 8px; \
		 margin-bottom: 16px; display: flex; align-items: center; gap: 8px; \
		 animation: slideInDown 0.3s ease;"
	)
}

/// Current value of a text input or textarea.
fn control_value(el: &HtmlElement) -> String {
	if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
		input.value()
	} else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
		area.value()
	} else {
		String::new()
	}
}

/// The contact form as rendered in the page.
pub struct DomFormView {
	form: HtmlFormElement,
	button: Option<HtmlButtonElement>,
	button_label: RefCell<Option<String>>,
	banner_lifetime_ms: u32,
}

impl DomFormView {
	fn new(form: HtmlFormElement, config: &FormConfig) -> Self {
		let button = form
			.query_selector("button[type=\"submit\"]")
			.ok()
			.flatten()
			.and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
		Self {
			form,
			button,
			button_label: RefCell::new(None),
			banner_lifetime_ms: config.banner_lifetime_ms,
		}
	}

	fn control(&self, field: Field) -> Option<HtmlElement> {
		self.form
			.query_selector(&format!("[name=\"{}\"]", field.name()))
			.ok()
			.flatten()?
			.dyn_into::<HtmlElement>()
			.ok()
	}

	fn read(&self) -> ContactMessage {
		let value = |field| {
			self.control(field)
				.map(|el| control_value(&el))
				.unwrap_or_default()
		};
		ContactMessage {
			name: value(Field::Name),
			email: value(Field::Email),
			subject: value(Field::Subject),
			message: value(Field::Message),
		}
	}
}

impl FormView for DomFormView {
	fn show_field_error(&self, field: Field, error: FieldError) {
		if let Some(el) = dom::find_id(&field.error_id()) {
			el.set_text_content(Some(&error.to_string()));
			let _ = el.class_list().add_1(SHOW_CLASS);
		}
	}

	fn clear_field_error(&self, field: Field) {
		if let Some(el) = dom::find_id(&field.error_id()) {
			let _ = el.class_list().remove_1(SHOW_CLASS);
		}
	}

	fn set_submitting(&self, submitting: bool) {
		let Some(button) = &self.button else {
			return;
		};
		if submitting {
			*self.button_label.borrow_mut() = Some(button.inner_html());
			button.set_inner_html(SENDING_LABEL);
		} else if let Some(label) = self.button_label.borrow_mut().take() {
			button.set_inner_html(&label);
		}
		button.set_disabled(submitting);
	}

	fn reset_fields(&self) {
		self.form.reset();
	}

	fn show_banner(&self, kind: BannerKind) {
		let Ok(document) = dom::document() else {
			return;
		};
		let Ok(banner) = document.create_element("div") else {
			return;
		};
		banner.set_class_name(kind.class());
		banner.set_inner_html(&format!(
			r#"<i class="{}"></i><span>{}</span><button type="button" class="banner-close" aria-label="Dismiss">&times;</button>"#,
			kind.icon_class(),
			kind.text()
		));
		let _ = banner.set_attribute("style", &banner_style(kind));
		let _ = self
			.form
			.insert_before(&banner, self.form.first_child().as_ref());

		let mut close_subs = Subscriptions::new();
		if let Ok(Some(close)) = banner.query_selector(".banner-close") {
			let banner_close = banner.clone();
			close_subs.on(&close, "click", move |_| banner_close.remove());
		}
		// The close listener lives exactly as long as the banner.
		Timeout::new(self.banner_lifetime_ms, move || {
			banner.remove();
			drop(close_subs);
		})
		.forget();
	}
}

/// Wire the contact form. The `contact-form` element is required.
pub fn wire_contact_form(config: &FormConfig) -> FxResult<Subscriptions> {
	let form: HtmlFormElement = dom::require_id("contact-form")?
		.dyn_into()
		.map_err(|_| FxError::MissingElement("contact-form"))?;
	let controller = Rc::new(ContactForm::new(
		DomFormView::new(form.clone(), config),
		SimulatedSubmitter {
			delay_ms: config.submit_delay_ms,
		},
	));
	let mut subs = Subscriptions::new();

	let submit_ctrl = controller.clone();
	subs.on(&form, "submit", move |ev| {
		ev.prevent_default();
		let controller = submit_ctrl.clone();
		let message = controller.view().read();
		leptos::task::spawn_local(async move {
			controller.handle_submit(message).await;
		});
	});

	for control in dom::query_all_in(&form, "input, textarea") {
		let Some(field) = control
			.get_attribute("name")
			.as_deref()
			.and_then(Field::from_name)
		else {
			continue;
		};

		let (blur_ctrl, blur_el) = (controller.clone(), control.clone());
		subs.on(&control, "blur", move |_| {
			let _ = blur_ctrl.handle_blur(field, &control_value(&blur_el));
		});

		let input_ctrl = controller.clone();
		subs.on(&control, "input", move |_| input_ctrl.handle_input(field));
	}

	if controller.view().button.is_none() {
		warn!("folio-fx: contact form has no submit button");
	}
	info!("folio-fx: contact form wired");
	Ok(subs)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
	use gloo::timers::future::TimeoutFuture;
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn mounted_view(banner_lifetime_ms: u32) -> (HtmlFormElement, DomFormView) {
		let document = dom::document().unwrap();
		let form: HtmlFormElement = document.create_element("form").unwrap().dyn_into().unwrap();
		document.body().unwrap().append_child(&form).unwrap();
		let config = FormConfig {
			banner_lifetime_ms,
			..FormConfig::default()
		};
		let view = DomFormView::new(form.clone(), &config);
		(form, view)
	}

	fn close_button(banner: &web_sys::Element) -> HtmlElement {
		banner
			.query_selector(".banner-close")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap()
	}

	#[wasm_bindgen_test]
	fn close_button_dismisses_banner() {
		let (form, view) = mounted_view(5000);
		view.show_banner(BannerKind::Error);
		let banner = form.query_selector(".error-message").unwrap().unwrap();
		assert_eq!(form.first_element_child().as_ref(), Some(&banner));

		close_button(&banner).click();
		assert!(!banner.is_connected());
		form.remove();
	}

	#[wasm_bindgen_test]
	async fn expired_banner_drops_its_close_listener() {
		let (form, view) = mounted_view(10);
		view.show_banner(BannerKind::Success);
		let banner = form.query_selector(".success-message").unwrap().unwrap();
		let close = close_button(&banner);

		TimeoutFuture::new(50).await;
		assert!(!banner.is_connected());

		// Put back after expiry, it no longer reacts to its close button.
		form.append_child(&banner).unwrap();
		close.click();
		assert!(banner.is_connected());
		form.remove();
	}
}
