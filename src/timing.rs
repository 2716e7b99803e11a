//! Rate limiting for high-frequency browser events.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::{TimeoutHandle, set_timeout_with_handle};
use log::warn;
use web_sys::Event;

use crate::dom;

/// Leading-edge throttle with a fixed cooldown window.
///
/// The first call fires immediately; calls arriving before the cooldown has
/// elapsed are dropped, not queued.
#[derive(Clone, Debug)]
pub struct Throttle {
	cooldown_ms: f64,
	open_at: Option<f64>,
}

impl Throttle {
	/// A throttle that has not fired yet.
	pub fn new(cooldown_ms: f64) -> Self {
		Self {
			cooldown_ms,
			open_at: None,
		}
	}

	/// Returns `true` when a call at `now_ms` should run.
	pub fn try_fire(&mut self, now_ms: f64) -> bool {
		match self.open_at {
			Some(open_at) if now_ms < open_at => false,
			_ => {
				self.open_at = Some(now_ms + self.cooldown_ms);
				true
			}
		}
	}
}

/// Wrap `handler` so it runs at most once per `cooldown_ms`.
pub fn throttled(cooldown_ms: u32, mut handler: impl FnMut() + 'static) -> impl FnMut(Event) + 'static {
	let mut throttle = Throttle::new(cooldown_ms as f64);
	move |_| {
		if throttle.try_fire(dom::now_ms()) {
			handler();
		}
	}
}

/// Trailing-edge debounce: each call restarts the timer, so the action only
/// runs after a quiet period.
#[derive(Clone)]
pub struct Debounce {
	delay: Duration,
	pending: Rc<Cell<Option<TimeoutHandle>>>,
}

impl Debounce {
	/// Nothing pending.
	pub fn new(delay_ms: u32) -> Self {
		Self {
			delay: Duration::from_millis(delay_ms as u64),
			pending: Rc::new(Cell::new(None)),
		}
	}

	/// Schedule `action`, cancelling whatever was pending.
	pub fn call(&self, action: impl FnOnce() + 'static) {
		if let Some(handle) = self.pending.take() {
			handle.clear();
		}

		let pending = self.pending.clone();
		match set_timeout_with_handle(
			move || {
				pending.set(None);
				action();
			},
			self.delay,
		) {
			Ok(handle) => self.pending.set(Some(handle)),
			Err(e) => warn!("portfolio: failed to schedule debounced call: {:?}", e),
		}
	}
}
