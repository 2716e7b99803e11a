//! Header behaviour: smooth in-page scrolling, transparency while at the top,
//! the collapsible mobile menu and the return-to-top control.

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::NavigationConfig;
use crate::dom::{self, classes, selectors};
use crate::timing::throttled;

/// The header stays transparent until the page scrolls past `threshold`.
pub fn header_transparent(scroll_y: f64, threshold: f64) -> bool {
	scroll_y <= threshold
}

/// The return-to-top control shows once the page scrolls past `threshold`.
pub fn return_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
	scroll_y > threshold
}

/// Scroll offset that puts a section's top just below the fixed header.
///
/// A missing or zero-height header falls back to `fallback_height`.
pub fn scroll_target(section_top: f64, header_height: Option<f64>, fallback_height: f64) -> f64 {
	let header = header_height
		.filter(|h| *h > 0.0)
		.unwrap_or(fallback_height);
	section_top - header
}

/// The `aria-expanded` value after a toggle.
pub fn toggled_expanded(current: Option<&str>) -> &'static str {
	if current == Some("true") { "false" } else { "true" }
}

/// Id referenced by an in-page link such as `#about`.
pub fn fragment_id(href: &str) -> Option<&str> {
	href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Collapse the mobile menu.
pub fn close_mobile_menu() {
	let (Some(toggler), Some(collapse)) =
		(dom::query(selectors::NAV_TOGGLER), dom::query(selectors::NAV_COLLAPSE))
	else {
		return;
	};
	let _ = toggler.set_attribute("aria-expanded", "false");
	let _ = collapse.class_list().remove_1(classes::MENU_OPEN);
}

fn header_height() -> Option<f64> {
	dom::query(selectors::HEADER).map(|h| h.offset_height() as f64)
}

fn wire_smooth_scroll(link: &HtmlElement, fallback_height: f64) -> Result<(), JsValue> {
	let link_inner = link.clone();
	dom::listen(link, "click", move |event| {
		event.prevent_default();
		let Some(href) = link_inner.get_attribute("href") else {
			return;
		};
		let Some(target) = fragment_id(&href)
			.and_then(|id| dom::document()?.get_element_by_id(id))
			.and_then(|el| el.dyn_into::<HtmlElement>().ok())
		else {
			return;
		};

		let top = scroll_target(target.offset_top() as f64, header_height(), fallback_height);
		dom::smooth_scroll_to(top);

		let menu_open = dom::query(selectors::NAV_COLLAPSE)
			.map(|c| c.class_list().contains(classes::MENU_OPEN))
			.unwrap_or(false);
		if menu_open {
			close_mobile_menu();
		}
	})
}

fn update_header(header: &HtmlElement, threshold: f64) {
	let transparent = header_transparent(dom::scroll_y(), threshold);
	let _ = header
		.class_list()
		.toggle_with_force(classes::TRANSPARENT_HEADER, transparent);
}

/// Wire smooth scrolling, header transparency and the mobile toggle.
pub fn init_navigation(config: &NavigationConfig) -> Result<(), JsValue> {
	for link in dom::query_all(selectors::NAV_LINKS) {
		wire_smooth_scroll(&link, config.fallback_header_height)?;
	}

	if let (Some(header), Some(window)) = (dom::query(selectors::HEADER), dom::window()) {
		let threshold = config.transparency_threshold;
		update_header(&header, threshold);
		dom::listen(
			&window,
			"scroll",
			throttled(config.scroll_throttle_ms, move || update_header(&header, threshold)),
		)?;
	} else {
		debug!("portfolio: no header, skipping transparency");
	}

	match (dom::query(selectors::NAV_TOGGLER), dom::query(selectors::NAV_COLLAPSE)) {
		(Some(toggler), Some(collapse)) => {
			let toggler_inner = toggler.clone();
			dom::listen(&toggler, "click", move |_| {
				let next = toggled_expanded(toggler_inner.get_attribute("aria-expanded").as_deref());
				let _ = toggler_inner.set_attribute("aria-expanded", next);
				let _ = collapse.class_list().toggle(classes::MENU_OPEN);
			})?;
		}
		_ => debug!("portfolio: no mobile menu, skipping toggle"),
	}

	Ok(())
}

/// Show the return-to-top control once scrolled down; scroll home on click.
pub fn init_return_to_top(config: &NavigationConfig) -> Result<(), JsValue> {
	let (Some(button), Some(window)) = (dom::query(selectors::RETURN_TO_TOP), dom::window()) else {
		debug!("portfolio: no return-to-top control, skipping");
		return Ok(());
	};

	let threshold = config.return_to_top_threshold;
	let button_scroll = button.clone();
	dom::listen(
		&window,
		"scroll",
		throttled(config.scroll_throttle_ms, move || {
			let display = if return_to_top_visible(dom::scroll_y(), threshold) {
				"flex"
			} else {
				"none"
			};
			dom::set_style(&button_scroll, "display", display);
		}),
	)?;

	dom::listen(&button, "click", |event| {
		event.prevent_default();
		dom::smooth_scroll_to(0.0);
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn header_is_transparent_near_top() {
		assert!(header_transparent(0.0, 50.0));
		assert!(header_transparent(40.0, 50.0));
		assert!(header_transparent(50.0, 50.0));
		assert!(!header_transparent(60.0, 50.0));
	}

	#[test]
	fn return_to_top_appears_past_threshold() {
		assert!(!return_to_top_visible(300.0, 300.0));
		assert!(return_to_top_visible(301.0, 300.0));
	}

	#[test]
	fn scroll_target_subtracts_header() {
		assert_eq!(scroll_target(1200.0, Some(64.0), 80.0), 1136.0);
	}

	#[test]
	fn scroll_target_falls_back_without_header() {
		assert_eq!(scroll_target(1200.0, None, 80.0), 1120.0);
		assert_eq!(scroll_target(1200.0, Some(0.0), 80.0), 1120.0);
	}

	#[test]
	fn expanded_flag_flips() {
		assert_eq!(toggled_expanded(Some("true")), "false");
		assert_eq!(toggled_expanded(Some("false")), "true");
		assert_eq!(toggled_expanded(None), "true");
	}

	#[test]
	fn fragment_ids() {
		assert_eq!(fragment_id("#about"), Some("about"));
		assert_eq!(fragment_id("#"), None);
		assert_eq!(fragment_id("about"), None);
	}
}
