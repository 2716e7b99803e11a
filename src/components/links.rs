//! Outbound link hygiene: safe `rel` on new-tab links, click logging for
//! external and mailto links.

use log::info;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::dom::{self, selectors};

/// `rel` added to new-tab links.
pub const SAFE_REL: &str = "noopener noreferrer";

/// The `rel` value a new-tab link should carry, or `None` to leave it alone.
pub fn rel_to_apply(existing: Option<&str>) -> Option<&'static str> {
	match existing {
		Some(_) => None,
		None => Some(SAFE_REL),
	}
}

fn log_clicks(link: &HtmlElement, what: &'static str) -> Result<(), JsValue> {
	let href = link.get_attribute("href").unwrap_or_default();
	dom::listen(link, "click", move |_| {
		info!("portfolio: {} link clicked: {}", what, href);
	})
}

/// Log clicks on `mailto:` links.
pub fn init_email_links() -> Result<(), JsValue> {
	for link in dom::query_all(selectors::MAILTO_LINKS) {
		log_clicks(&link, "email")?;
	}
	Ok(())
}

/// Add `rel="noopener noreferrer"` where missing and log clicks on new-tab links.
pub fn init_external_links() -> Result<(), JsValue> {
	for link in dom::query_all(selectors::EXTERNAL_LINKS) {
		if let Some(rel) = rel_to_apply(link.get_attribute("rel").as_deref()) {
			link.set_attribute("rel", rel)?;
		}
		log_clicks(&link, "external")?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_rel_gets_safe_default() {
		assert_eq!(rel_to_apply(None), Some("noopener noreferrer"));
	}

	#[test]
	fn existing_rel_is_kept() {
		assert_eq!(rel_to_apply(Some("me")), None);
		assert_eq!(rel_to_apply(Some("")), None);
	}
}
