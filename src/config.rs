//! Tunable timings, thresholds and particle constants.
//!
//! Every value has a default matching the page's stylesheet and markup. A page
//! can override any subset by embedding a JSON document in a
//! `<script id="portfolio-config" type="application/json">` element; missing
//! fields keep their defaults.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::dom;

/// Element id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// Particle background configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
	/// Hard cap on the population.
	pub max_particles: usize,
	/// Canvas area (square pixels) per particle.
	pub area_per_particle: f64,
	/// Maximum absolute velocity component, in pixels per frame.
	pub max_speed: f64,
	/// Smallest particle radius.
	pub radius_min: f64,
	/// Largest particle radius (exclusive).
	pub radius_max: f64,
	/// Lowest particle opacity.
	pub opacity_min: f64,
	/// Highest particle opacity (exclusive).
	pub opacity_max: f64,
	/// Pairs closer than this are connected by a line.
	pub link_distance: f64,
	/// Line alpha at zero distance; falls off linearly to 0 at `link_distance`.
	pub link_alpha: f64,
	/// Quiet period before a resize rebuilds the field.
	pub resize_debounce_ms: u32,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			max_particles: 80,
			area_per_particle: 10_000.0,
			max_speed: 1.0,
			radius_min: 1.0,
			radius_max: 4.0,
			opacity_min: 0.2,
			opacity_max: 0.7,
			link_distance: 150.0,
			link_alpha: 0.2,
			resize_debounce_ms: 250,
		}
	}
}

/// Typewriter timings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypewriterConfig {
	/// Delay before the first character.
	pub start_delay_ms: u32,
	/// Delay after each typed character.
	pub type_delay_ms: u32,
	/// Delay after each deleted character.
	pub delete_delay_ms: u32,
	/// Pause with the whole string shown.
	pub full_pause_ms: u32,
	/// Pause with the text cleared, before the next string.
	pub empty_pause_ms: u32,
}

impl Default for TypewriterConfig {
	fn default() -> Self {
		Self {
			start_delay_ms: 1000,
			type_delay_ms: 100,
			delete_delay_ms: 50,
			full_pause_ms: 2000,
			empty_pause_ms: 500,
		}
	}
}

/// Header, mobile menu and return-to-top behaviour.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
	/// Header height used when the header is missing or reports no height.
	pub fallback_header_height: f64,
	/// The header is transparent until the page scrolls past this offset.
	pub transparency_threshold: f64,
	/// The return-to-top control appears past this offset.
	pub return_to_top_threshold: f64,
	/// Cooldown applied to scroll handlers.
	pub scroll_throttle_ms: u32,
}

impl Default for NavigationConfig {
	fn default() -> Self {
		Self {
			fallback_header_height: 80.0,
			transparency_threshold: 50.0,
			return_to_top_threshold: 300.0,
			scroll_throttle_ms: 16,
		}
	}
}

/// Active-section tracking.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollspyConfig {
	/// Added to the scroll position before matching sections.
	pub offset: f64,
	/// Cooldown applied to the scroll handler.
	pub scroll_throttle_ms: u32,
}

impl Default for ScrollspyConfig {
	fn default() -> Self {
		Self {
			offset: 100.0,
			scroll_throttle_ms: 16,
		}
	}
}

/// Reveal-on-scroll observer options.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
	/// Visible fraction that counts as entering.
	pub threshold: f64,
	/// Observer root margin, shrinking the bottom edge.
	pub root_margin: String,
}

impl Default for RevealConfig {
	fn default() -> Self {
		Self {
			threshold: 0.1,
			root_margin: "0px 0px -50px 0px".to_string(),
		}
	}
}

/// Progress bar fill animation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProgressConfig {
	/// Visible fraction that starts the fill.
	pub threshold: f64,
	/// Delay between resetting the bar and starting the fill transition.
	pub start_delay_ms: u32,
	/// CSS transition applied to the bar width.
	pub transition: String,
}

impl Default for ProgressConfig {
	fn default() -> Self {
		Self {
			threshold: 0.5,
			start_delay_ms: 100,
			transition: "width 2s ease-in-out".to_string(),
		}
	}
}

/// Count-up animation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CounterConfig {
	/// Visible fraction that starts the count.
	pub threshold: f64,
	/// Nominal duration of a count-up.
	pub duration_ms: f64,
	/// Assumed frame interval used to derive the per-frame increment.
	pub frame_ms: f64,
}

impl Default for CounterConfig {
	fn default() -> Self {
		Self {
			threshold: 0.5,
			duration_ms: 2000.0,
			frame_ms: 16.0,
		}
	}
}

/// Loading overlay fade-out.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreloaderConfig {
	/// Delay before the overlay starts fading.
	pub fade_delay_ms: u32,
	/// Fade duration; the overlay is hidden once it elapses.
	pub fade_ms: u32,
}

impl Default for PreloaderConfig {
	fn default() -> Self {
		Self {
			fade_delay_ms: 400,
			fade_ms: 500,
		}
	}
}

/// Theme persistence and switch transition.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
	/// localStorage key holding the theme name.
	pub storage_key: String,
	/// How long the body keeps its color transition after a toggle.
	pub transition_ms: u32,
	/// CSS transition set on the body during a toggle.
	pub transition: String,
}

impl Default for ThemeConfig {
	fn default() -> Self {
		Self {
			storage_key: "theme".to_string(),
			transition_ms: 300,
			transition: "background-color 0.3s ease, color 0.3s ease".to_string(),
		}
	}
}

/// Complete configuration for every controller on the page.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
	/// Particle background.
	pub particles: ParticleConfig,
	/// Typewriter headline.
	pub typewriter: TypewriterConfig,
	/// Header, menu and return-to-top.
	pub navigation: NavigationConfig,
	/// Active section tracking.
	pub scrollspy: ScrollspyConfig,
	/// Reveal on scroll.
	pub reveal: RevealConfig,
	/// Progress bars.
	pub progress: ProgressConfig,
	/// Counters.
	pub counter: CounterConfig,
	/// Loading overlay.
	pub preloader: PreloaderConfig,
	/// Theme switching.
	pub theme: ThemeConfig,
}

impl AppConfig {
	/// Parse a (possibly partial) JSON override document.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Read overrides from the page, falling back to defaults.
	pub fn load() -> Self {
		let Some(text) = config_text() else {
			return Self::default();
		};

		match Self::from_json(&text) {
			Ok(config) => {
				info!("portfolio: loaded configuration overrides");
				config
			}
			Err(e) => {
				warn!("portfolio: failed to parse configuration: {}", e);
				Self::default()
			}
		}
	}
}

fn config_text() -> Option<String> {
	let element = dom::document()?.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_yields_defaults() {
		let config = AppConfig::from_json("{}").unwrap();
		assert_eq!(config, AppConfig::default());
	}

	#[test]
	fn partial_override_keeps_other_fields() {
		let config =
			AppConfig::from_json(r#"{ "particles": { "max_particles": 40 }, "typewriter": { "type_delay_ms": 80 } }"#)
				.unwrap();
		assert_eq!(config.particles.max_particles, 40);
		assert_eq!(config.particles.link_distance, 150.0);
		assert_eq!(config.typewriter.type_delay_ms, 80);
		assert_eq!(config.typewriter.full_pause_ms, 2000);
		assert_eq!(config.navigation, NavigationConfig::default());
	}

	#[test]
	fn malformed_document_is_an_error() {
		assert!(AppConfig::from_json(r#"{ "particles": { "max_particles": "many" } }"#).is_err());
	}
}
