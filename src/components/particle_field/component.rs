//! Browser wiring for the particle background.
//!
//! Binds the field to the `#particlebackground` canvas and drives it with a
//! `requestAnimationFrame` loop. The canvas follows the viewport (debounced),
//! and the loop is suspended while the page is hidden.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Math;
use leptos::prelude::{GetUntracked, RwSignal};
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::particles::ParticleField;
use super::render;
use crate::components::theme::Theme;
use crate::config::ParticleConfig;
use crate::dom::{self, selectors};
use crate::timing::Debounce;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Tracks the pending animation frame so it can be cancelled and resumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSchedule {
	pending: Option<i32>,
}

impl FrameSchedule {
	/// A frame request is outstanding.
	pub fn is_running(&self) -> bool {
		self.pending.is_some()
	}

	/// Record a new frame request.
	pub fn scheduled(&mut self, id: i32) {
		self.pending = Some(id);
	}

	/// The pending frame has started running.
	pub fn fired(&mut self) {
		self.pending = None;
	}

	/// Stop the loop, returning the request id to cancel.
	pub fn pause(&mut self) -> Option<i32> {
		self.pending.take()
	}

	/// Whether a visible page needs a fresh frame request.
	pub fn should_resume(&self) -> bool {
		!self.is_running()
	}
}

/// Simulation state shared by the frame, resize and visibility callbacks.
struct FieldContext {
	field: ParticleField,
	schedule: FrameSchedule,
}

fn find_canvas() -> Option<HtmlCanvasElement> {
	dom::document()?
		.query_selector(selectors::PARTICLE_CANVAS)
		.ok()??
		.dyn_into()
		.ok()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Match the canvas to the viewport and respawn the particles.
fn fit_canvas(canvas: &HtmlCanvasElement, field: &mut ParticleField) {
	let (w, h) =
		dom::viewport_size().unwrap_or((canvas.width() as f64, canvas.height() as f64));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	field.resize(w, h, &mut Math::random);
}

fn request_frame(animate: &FrameCallback) -> Option<i32> {
	let cb = animate.borrow();
	let cb = cb.as_ref()?;
	match dom::window()?.request_animation_frame(cb.as_ref().unchecked_ref()) {
		Ok(id) => Some(id),
		Err(e) => {
			warn!("portfolio: failed to request animation frame: {:?}", e);
			None
		}
	}
}

/// Start the particle background. No-op without the canvas.
pub fn init_particle_field(theme: RwSignal<Theme>, config: &ParticleConfig) -> Result<(), JsValue> {
	let Some(canvas) = find_canvas() else {
		debug!("portfolio: no particle canvas, skipping");
		return Ok(());
	};
	let Some(ctx) = context_2d(&canvas) else {
		debug!("portfolio: particle canvas has no 2d context, skipping");
		return Ok(());
	};
	let (Some(window), Some(document)) = (dom::window(), dom::document()) else {
		return Ok(());
	};

	let mut field = ParticleField::new(config.clone());
	fit_canvas(&canvas, &mut field);
	info!(
		"portfolio: particle field {}x{} with {} particles",
		field.width(),
		field.height(),
		field.particles().len()
	);

	let context = Rc::new(RefCell::new(FieldContext {
		field,
		schedule: FrameSchedule::default(),
	}));
	let animate: FrameCallback = Rc::new(RefCell::new(None));

	let (context_anim, animate_inner) = (context.clone(), animate.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		let mut c = context_anim.borrow_mut();
		c.schedule.fired();
		c.field.update();
		render::render(&c.field, &ctx, theme.get_untracked());
		if let Some(id) = request_frame(&animate_inner) {
			c.schedule.scheduled(id);
		}
	}));

	let debounce = Debounce::new(config.resize_debounce_ms);
	let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
	dom::listen(&window, "resize", move |_| {
		let (context, canvas) = (context_resize.clone(), canvas_resize.clone());
		debounce.call(move || {
			let mut c = context.borrow_mut();
			fit_canvas(&canvas, &mut c.field);
			debug!(
				"portfolio: particle field resized to {}x{}, {} particles",
				c.field.width(),
				c.field.height(),
				c.field.particles().len()
			);
		});
	})?;

	let (context_vis, animate_vis, window_vis) = (context.clone(), animate.clone(), window.clone());
	dom::listen(&document, "visibilitychange", move |_| {
		let hidden = dom::document().map(|d| d.hidden()).unwrap_or(false);
		let mut c = context_vis.borrow_mut();
		if hidden {
			if let Some(id) = c.schedule.pause() {
				let _ = window_vis.cancel_animation_frame(id);
				debug!("portfolio: particle loop paused");
			}
		} else if c.schedule.should_resume() {
			if let Some(id) = request_frame(&animate_vis) {
				c.schedule.scheduled(id);
				debug!("portfolio: particle loop resumed");
			}
		}
	})?;

	if let Some(id) = request_frame(&animate) {
		context.borrow_mut().schedule.scheduled(id);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pause_hands_back_pending_frame() {
		let mut schedule = FrameSchedule::default();
		schedule.scheduled(7);
		assert!(schedule.is_running());
		assert_eq!(schedule.pause(), Some(7));
		assert!(!schedule.is_running());
		assert_eq!(schedule.pause(), None);
	}

	#[test]
	fn resume_only_when_nothing_pending() {
		let mut schedule = FrameSchedule::default();
		assert!(schedule.should_resume());
		schedule.scheduled(1);
		assert!(!schedule.should_resume());
		schedule.fired();
		assert!(schedule.should_resume());
	}

	#[test]
	fn pausing_keeps_particle_positions() {
		let mut n = 0u32;
		let mut rng = move || {
			n = (n + 37) % 100;
			n as f64 / 100.0
		};
		let mut field = ParticleField::new(ParticleConfig::default());
		field.resize(400.0, 300.0, &mut rng);
		let mut schedule = FrameSchedule::default();

		schedule.scheduled(1);
		schedule.fired();
		field.update();
		let before = field.particles().to_vec();

		schedule.scheduled(2);
		assert_eq!(schedule.pause(), Some(2));
		assert!(schedule.should_resume());
		assert_eq!(field.particles(), &before[..]);

		assert!(schedule.should_resume());
		schedule.scheduled(3);
		assert!(!schedule.should_resume());
	}
}
