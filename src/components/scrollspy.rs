//! Highlights the navigation link of the section currently under the header.

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::ScrollspyConfig;
use crate::dom::{self, classes, selectors};
use crate::timing::throttled;

/// Vertical extent of a page section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionExtent {
	/// Element id, matched against `href="#id"`.
	pub id: String,
	/// Document offset of the top edge.
	pub top: f64,
	/// Rendered height.
	pub height: f64,
}

impl SectionExtent {
	/// Half-open `[top, top + height)` test.
	pub fn contains(&self, position: f64) -> bool {
		position >= self.top && position < self.top + self.height
	}
}

/// Id of the section containing `scroll_y + offset`.
///
/// Sections are checked in document order; if several match, the last one
/// wins.
pub fn active_section(sections: &[SectionExtent], scroll_y: f64, offset: f64) -> Option<&str> {
	let position = scroll_y + offset;
	sections
		.iter()
		.rev()
		.find(|s| s.contains(position))
		.map(|s| s.id.as_str())
}

fn measure(section: &HtmlElement) -> SectionExtent {
	SectionExtent {
		id: section.id(),
		top: section.offset_top() as f64,
		height: section.offset_height() as f64,
	}
}

fn highlight(links: &[HtmlElement], id: &str) {
	let wanted = format!("#{id}");
	for link in links {
		let _ = link.class_list().remove_1(classes::ACTIVE);
		if link.get_attribute("href").as_deref() == Some(wanted.as_str()) {
			let _ = link.class_list().add_1(classes::ACTIVE);
		}
	}
}

fn refresh(sections: &[HtmlElement], links: &[HtmlElement], offset: f64) {
	// Offsets are read fresh on every pass.
	let extents: Vec<SectionExtent> = sections.iter().map(measure).collect();
	if let Some(id) = active_section(&extents, dom::scroll_y(), offset) {
		highlight(links, id);
	}
}

/// Track the scroll position and keep exactly one nav link active.
pub fn init_scrollspy(config: &ScrollspyConfig) -> Result<(), JsValue> {
	let sections = dom::query_all(selectors::SECTIONS);
	let links = dom::query_all(selectors::NAV_LINKS);
	if sections.is_empty() || links.is_empty() {
		debug!("portfolio: no sections or nav links, skipping scrollspy");
		return Ok(());
	}
	let Some(window) = dom::window() else {
		return Ok(());
	};

	let offset = config.offset;
	refresh(&sections, &links, offset);
	dom::listen(
		&window,
		"scroll",
		throttled(config.scroll_throttle_ms, move || refresh(&sections, &links, offset)),
	)
}
