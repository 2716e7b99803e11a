//! portfolio-fx: presentation layer for a static portfolio page.
//!
//! This crate provides a WASM-based controller set that enhances existing page
//! markup with theme switching, smooth navigation, scrollspy, a typewriter
//! headline, an animated particle background and scroll-triggered effects.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsValue;

pub mod components;
pub mod config;
pub mod dom;
pub mod timing;

use components::animations::{init_counters, init_progress_bars, init_reveal};
use components::links::{init_email_links, init_external_links};
use components::navigation::{init_navigation, init_return_to_top};
use components::particle_field::init_particle_field;
use components::preloader::hide_preloader;
use components::scrollspy::init_scrollspy;
use components::theme::{LocalStore, init_theme, load_theme};
use components::typewriter::init_typewriter;

pub use components::particle_field::{ParticleField, particle_count};
pub use components::theme::Theme;
pub use config::AppConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio: logging initialized");
}

/// Log a controller that failed to set up; the others are unaffected.
fn report(feature: &str, result: Result<(), JsValue>) {
	if let Err(e) = result {
		warn!("portfolio: {} setup failed: {:?}", feature, e);
	}
}

fn dom_ready(theme: RwSignal<Theme>, config: &AppConfig) {
	report("theme", init_theme(theme, &config.theme));
	report("navigation", init_navigation(&config.navigation));
	report("scrollspy", init_scrollspy(&config.scrollspy));
	init_typewriter(&config.typewriter);
	report("particles", init_particle_field(theme, &config.particles));
	report("return-to-top", init_return_to_top(&config.navigation));
	report("email links", init_email_links());
	report("external links", init_external_links());
	info!("portfolio: app initialized");
}

fn page_loaded(config: &AppConfig) {
	hide_preloader(&config.preloader);
	report("reveal", init_reveal(&config.reveal));
	report("progress bars", init_progress_bars(&config.progress));
	report("counters", init_counters(&config.counter));
	info!("portfolio: page fully loaded");
}

/// Main application component.
/// Restores the theme, renders it onto `<html data-theme>` and starts every
/// page controller at the right lifecycle point.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	let theme = RwSignal::new(load_theme(&LocalStore::new(config.theme.storage_key.clone())));
	info!("portfolio: starting with {} theme", theme.get_untracked().as_str());

	let ready_config = config.clone();
	report(
		"dom-ready hook",
		dom::on_dom_ready(move || dom_ready(theme, &ready_config)),
	);
	report("page-load hook", dom::on_page_load(move || page_loaded(&config)));

	view! {
		<Html attr:data-theme=move || theme.get().as_str() />
	}
}
