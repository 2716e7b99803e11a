//! Thin helpers over `web-sys` for the page's existing markup.
//!
//! Lookups return `Option`/empty collections instead of failing so that each
//! controller can quietly skip itself when its markup is absent.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

/// Selectors and ids the controllers expect in the page markup.
pub mod selectors {
	/// Button flipping between light and dark.
	pub const THEME_TOGGLE: &str = "#theme-toggle";
	/// Icon inside the theme toggle.
	pub const THEME_ICON: &str = "#theme-icon";
	/// Fixed page header.
	pub const HEADER: &str = ".navigation";
	/// Hamburger button of the mobile menu.
	pub const NAV_TOGGLER: &str = ".navbar-toggler";
	/// Collapsible menu body.
	pub const NAV_COLLAPSE: &str = "#navigation";
	/// In-page navigation links.
	pub const NAV_LINKS: &str = ".nav-link[href^=\"#\"]";
	/// Sections tracked by the scrollspy.
	pub const SECTIONS: &str = "section[id]";
	/// Headline driven by the typewriter.
	pub const TYPED_TEXT: &str = ".welcome-text-type";
	/// Canvas behind the hero.
	pub const PARTICLE_CANVAS: &str = "#particlebackground";
	/// Floating return-to-top button.
	pub const RETURN_TO_TOP: &str = "#return-to-top";
	/// Elements revealed on scroll.
	pub const REVEAL: &str = "[data-aos]";
	/// Skill bars with a target percentage.
	pub const PROGRESS_BARS: &str = ".progress-bar[data-percent]";
	/// Numbers counted up on scroll.
	pub const COUNTERS: &str = ".tmcounter[data-to]";
	/// Email links.
	pub const MAILTO_LINKS: &str = "a[href^=\"mailto:\"]";
	/// Links opening a new tab.
	pub const EXTERNAL_LINKS: &str = "a[target=\"_blank\"]";
	/// Loading overlay.
	pub const PRELOADER: &str = "#preloader";
}

/// CSS classes toggled by the controllers.
pub mod classes {
	/// Header state near the top of the page.
	pub const TRANSPARENT_HEADER: &str = "transparent_header";
	/// Expanded mobile menu.
	pub const MENU_OPEN: &str = "show";
	/// Current navigation link.
	pub const ACTIVE: &str = "active";
	/// Revealed `[data-aos]` element.
	pub const REVEALED: &str = "aos-animate";
}

/// The global `window`, if running in a browser.
pub fn window() -> Option<Window> {
	web_sys::window()
}

/// The window's document.
pub fn document() -> Option<Document> {
	window()?.document()
}

/// The document's `<body>`.
pub fn body() -> Option<HtmlElement> {
	document()?.body()
}

/// First element matching `selector`.
pub fn query(selector: &str) -> Option<HtmlElement> {
	document()?
		.query_selector(selector)
		.ok()??
		.dyn_into::<HtmlElement>()
		.ok()
}

/// All elements matching `selector`, in document order.
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
	let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
		return Vec::new();
	};

	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<HtmlElement>().ok())
		.collect()
}

/// Current vertical scroll offset, 0 when unavailable.
pub fn scroll_y() -> f64 {
	window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Viewport size in CSS pixels.
pub fn viewport_size() -> Option<(f64, f64)> {
	let window = window()?;
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

/// High resolution timestamp in milliseconds.
pub fn now_ms() -> f64 {
	window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// Smoothly scroll the window to the given vertical offset.
pub fn smooth_scroll_to(top: f64) {
	let Some(window) = window() else {
		return;
	};
	let options = ScrollToOptions::new();
	options.set_top(top);
	options.set_behavior(ScrollBehavior::Smooth);
	window.scroll_to_with_scroll_to_options(&options);
}

/// Attach a listener that lives as long as the page.
pub fn listen(
	target: &EventTarget,
	event: &str,
	handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
	let closure = Closure::<dyn FnMut(Event)>::new(handler);
	target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
	closure.forget();
	Ok(())
}

/// Set an inline style property, ignoring failures.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
	let _ = element.style().set_property(property, value);
}

fn run_once(f: impl FnOnce() + 'static) -> impl FnMut(Event) + 'static {
	let mut f = Some(f);
	move |_| {
		if let Some(f) = f.take() {
			f();
		}
	}
}

/// `document.readyState` once parsing has finished ("interactive" or "complete").
fn dom_parsed(ready_state: &str) -> bool {
	ready_state != "loading"
}

/// `document.readyState` once every subresource has loaded.
fn page_complete(ready_state: &str) -> bool {
	ready_state == "complete"
}

/// Run `f` once the DOM has been parsed (immediately if it already has).
pub fn on_dom_ready(f: impl FnOnce() + 'static) -> Result<(), JsValue> {
	let Some(document) = document() else {
		return Ok(());
	};
	if dom_parsed(&document.ready_state()) {
		f();
		Ok(())
	} else {
		listen(&document, "DOMContentLoaded", run_once(f))
	}
}

/// Run `f` once the page and its resources have loaded (immediately if they
/// already have).
pub fn on_page_load(f: impl FnOnce() + 'static) -> Result<(), JsValue> {
	let (Some(window), Some(document)) = (window(), document()) else {
		return Ok(());
	};
	if page_complete(&document.ready_state()) {
		f();
		Ok(())
	} else {
		listen(&window, "load", run_once(f))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dom_ready_waits_only_while_loading() {
		assert!(!dom_parsed("loading"));
		assert!(dom_parsed("interactive"));
		assert!(dom_parsed("complete"));
	}

	#[test]
	fn page_load_waits_until_complete() {
		assert!(!page_complete("loading"));
		assert!(!page_complete("interactive"));
		assert!(page_complete("complete"));
	}
}
