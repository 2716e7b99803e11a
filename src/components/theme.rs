//! Light/dark theming and its persisted preference.
//!
//! The active [`Theme`] lives in a Leptos signal owned by the app. The
//! document's `data-theme` attribute is rendered from that signal; the toggle
//! control flips it and persists the new value.

use std::cell::RefCell;
use std::time::Duration;

use leptos::prelude::{GetUntracked, RwSignal, Set, set_timeout};
use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::config::ThemeConfig;
use crate::dom::{self, selectors};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Build a color from its channels.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with its alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba(...)` notation.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Colors used by the particle background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleStyle {
	/// Dot color; the alpha is replaced by each particle's opacity.
	pub fill: Color,
	/// Link color; the alpha is replaced by the distance falloff.
	pub stroke: Color,
}

/// Page color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
	/// Light background, dark particles.
	#[default]
	Light,
	/// Dark background, light particles.
	Dark,
}

impl Theme {
	/// Name used for `data-theme` and in storage.
	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}

	/// Parse a stored theme name. Unknown names yield `None`.
	pub fn parse(name: &str) -> Option<Self> {
		match name {
			"light" => Some(Theme::Light),
			"dark" => Some(Theme::Dark),
			_ => None,
		}
	}

	/// The other theme.
	pub fn toggled(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	/// Icon classes offering the switch to the other theme.
	pub fn icon_class(self) -> &'static str {
		match self {
			Theme::Light => "fas fa-moon",
			Theme::Dark => "fas fa-sun",
		}
	}

	/// Particle palette drawn on top of this theme.
	pub fn particle_style(self) -> ParticleStyle {
		match self {
			Theme::Dark => ParticleStyle {
				fill: Color::rgba(255, 255, 255, 0.3),
				stroke: Color::rgba(255, 255, 255, 0.1),
			},
			Theme::Light => ParticleStyle {
				fill: Color::rgba(0, 0, 0, 0.3),
				stroke: Color::rgba(0, 0, 0, 0.1),
			},
		}
	}
}

/// Durable key-value storage for the theme preference.
pub trait ThemeStore {
	/// The stored theme name, if any.
	fn load(&self) -> Option<String>;
	/// Persist a theme name.
	fn save(&self, value: &str);
}

/// `window.localStorage` under a fixed key.
pub struct LocalStore {
	key: String,
}

impl LocalStore {
	/// Store under `key`.
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into() }
	}

	fn storage() -> Option<Storage> {
		dom::window()?.local_storage().ok()?
	}
}

impl ThemeStore for LocalStore {
	fn load(&self) -> Option<String> {
		Self::storage()?.get_item(&self.key).ok()?
	}

	fn save(&self, value: &str) {
		let Some(storage) = Self::storage() else {
			warn!("portfolio: localStorage unavailable, theme not persisted");
			return;
		};
		if let Err(e) = storage.set_item(&self.key, value) {
			warn!("portfolio: failed to persist theme: {:?}", e);
		}
	}
}

/// Store backed by a plain cell, used as a test double for `LocalStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
	value: RefCell<Option<String>>,
}

impl MemoryStore {
	/// Store pre-seeded with `value`.
	pub fn with_value(value: &str) -> Self {
		Self {
			value: RefCell::new(Some(value.to_string())),
		}
	}
}

impl ThemeStore for MemoryStore {
	fn load(&self) -> Option<String> {
		self.value.borrow().clone()
	}

	fn save(&self, value: &str) {
		*self.value.borrow_mut() = Some(value.to_string());
	}
}

/// Read the persisted theme, defaulting to light.
pub fn load_theme(store: &impl ThemeStore) -> Theme {
	store
		.load()
		.and_then(|name| Theme::parse(&name))
		.unwrap_or_default()
}

/// Flip `current`, persist the result and return it.
pub fn toggle_theme(current: Theme, store: &impl ThemeStore) -> Theme {
	let next = current.toggled();
	store.save(next.as_str());
	next
}

fn update_icon(theme: Theme) {
	if let Some(icon) = dom::query(selectors::THEME_ICON) {
		icon.set_class_name(theme.icon_class());
	}
}

/// Show the current icon and wire the toggle control.
pub fn init_theme(theme: RwSignal<Theme>, config: &ThemeConfig) -> Result<(), JsValue> {
	let Some(toggle) = dom::query(selectors::THEME_TOGGLE) else {
		debug!("portfolio: no theme toggle, skipping");
		return Ok(());
	};
	update_icon(theme.get_untracked());

	let store = LocalStore::new(config.storage_key.clone());
	let transition = config.transition.clone();
	let transition_ms = config.transition_ms as u64;
	dom::listen(&toggle, "click", move |_| {
		let next = toggle_theme(theme.get_untracked(), &store);
		theme.set(next);
		update_icon(next);
		info!("portfolio: theme switched to {}", next.as_str());

		if let Some(body) = dom::body() {
			dom::set_style(&body, "transition", &transition);
			set_timeout(
				move || dom::set_style(&body, "transition", ""),
				Duration::from_millis(transition_ms),
			);
		}
	})
}
