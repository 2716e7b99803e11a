//! Fades out and hides the loading overlay once the page has loaded.

use std::time::Duration;

use leptos::prelude::set_timeout;
use log::debug;

use crate::config::PreloaderConfig;
use crate::dom::{self, selectors};

/// Fade `#preloader` out, then remove it and unlock body scrolling.
pub fn hide_preloader(config: &PreloaderConfig) {
	let Some(preloader) = dom::query(selectors::PRELOADER) else {
		debug!("portfolio: no preloader, skipping");
		return;
	};

	let fade = Duration::from_millis(config.fade_ms as u64);
	set_timeout(
		move || {
			dom::set_style(&preloader, "opacity", "0");
			set_timeout(
				move || {
					dom::set_style(&preloader, "display", "none");
					if let Some(body) = dom::body() {
						dom::set_style(&body, "overflow", "");
					}
				},
				fade,
			);
		},
		Duration::from_millis(config.fade_delay_ms as u64),
	);
}
