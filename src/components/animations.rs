//! Scroll-triggered animations: reveal-on-scroll, progress bars and counters.
//!
//! Each kind observes its elements with an `IntersectionObserver`. Progress
//! bars and counters play once and are then unobserved; reveal targets stay
//! observed and simply keep their class.

use std::num::ParseIntError;
use std::time::Duration;

use js_sys::Array;
use leptos::prelude::{request_animation_frame, set_timeout};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::{CounterConfig, ProgressConfig, RevealConfig};
use crate::dom::{self, classes, selectors};

/// Attribute holding a progress bar's target width.
pub const PERCENT_ATTRIBUTE: &str = "data-percent";
/// Attribute holding a counter's target value.
pub const COUNTER_ATTRIBUTE: &str = "data-to";

/// One frame of a count-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterFrame {
	/// Intermediate value, rounded down.
	Counting(i64),
	/// The exact target; the count is over.
	Finished(i64),
}

/// Counts from 0 to a target in fixed per-frame increments.
#[derive(Clone, Debug)]
pub struct CountUp {
	target: i64,
	step: f64,
	current: f64,
}

impl CountUp {
	/// The increment is `target / (duration / frame)`, so the count takes
	/// roughly `duration_ms` at the nominal frame rate.
	pub fn new(target: i64, config: &CounterConfig) -> Self {
		let frames = config.duration_ms / config.frame_ms;
		Self {
			target,
			step: target as f64 / frames,
			current: 0.0,
		}
	}

	/// Step one frame.
	pub fn advance(&mut self) -> CounterFrame {
		self.current += self.step;
		if self.current < self.target as f64 {
			CounterFrame::Counting(self.current.floor() as i64)
		} else {
			CounterFrame::Finished(self.target)
		}
	}
}

/// Leading integer of a `data-to` value, so `"95%"` counts to 95 and `"4.5"`
/// to 4. Errors only when there is no leading digit.
pub fn parse_counter_target(value: &str) -> Result<i64, ParseIntError> {
	let value = value.trim();
	let sign = usize::from(value.starts_with(['+', '-']));
	let end = value[sign..]
		.find(|c: char| !c.is_ascii_digit())
		.map_or(value.len(), |i| sign + i);
	value[..end].parse()
}

/// CSS width for a progress bar's `data-percent` value.
pub fn progress_width(percent: &str) -> String {
	format!("{}%", percent.trim())
}

/// Build an observer that calls `on_enter` for every element entering view.
fn observe_entering(
	threshold: f64,
	root_margin: Option<&str>,
	mut on_enter: impl FnMut(HtmlElement, &IntersectionObserver) + 'static,
) -> Result<IntersectionObserver, JsValue> {
	let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
		move |entries: Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				if !entry.is_intersecting() {
					continue;
				}
				if let Ok(target) = entry.target().dyn_into::<HtmlElement>() {
					on_enter(target, &observer);
				}
			}
		},
	);

	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(threshold));
	if let Some(margin) = root_margin {
		options.set_root_margin(margin);
	}
	let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
	callback.forget();
	Ok(observer)
}

/// Add the reveal class to `[data-aos]` elements as they scroll into view.
pub fn init_reveal(config: &RevealConfig) -> Result<(), JsValue> {
	let elements = dom::query_all(selectors::REVEAL);
	if elements.is_empty() {
		debug!("portfolio: no reveal targets, skipping");
		return Ok(());
	}

	let observer = observe_entering(config.threshold, Some(&config.root_margin), |target, _| {
		let _ = target.class_list().add_1(classes::REVEALED);
	})?;
	for el in &elements {
		observer.observe(el);
	}
	Ok(())
}

/// Fill progress bars to their `data-percent` once half visible.
pub fn init_progress_bars(config: &ProgressConfig) -> Result<(), JsValue> {
	let bars = dom::query_all(selectors::PROGRESS_BARS);
	if bars.is_empty() {
		debug!("portfolio: no progress bars, skipping");
		return Ok(());
	}

	let delay = Duration::from_millis(config.start_delay_ms as u64);
	let transition = config.transition.clone();
	let observer = observe_entering(config.threshold, None, move |bar, observer| {
		let width = progress_width(&bar.get_attribute(PERCENT_ATTRIBUTE).unwrap_or_default());
		dom::set_style(&bar, "width", "0%");

		let transition = transition.clone();
		let bar_fill = bar.clone();
		set_timeout(
			move || {
				dom::set_style(&bar_fill, "transition", &transition);
				dom::set_style(&bar_fill, "width", &width);
			},
			delay,
		);

		observer.unobserve(&bar);
	})?;
	for bar in &bars {
		observer.observe(bar);
	}
	Ok(())
}

fn run_counter(counter: HtmlElement, mut count: CountUp) {
	match count.advance() {
		CounterFrame::Counting(value) => {
			counter.set_text_content(Some(&value.to_string()));
			request_animation_frame(move || run_counter(counter, count));
		}
		CounterFrame::Finished(value) => {
			counter.set_text_content(Some(&value.to_string()));
		}
	}
}

/// Count `.tmcounter` elements up to their `data-to` once half visible.
pub fn init_counters(config: &CounterConfig) -> Result<(), JsValue> {
	let counters: Vec<HtmlElement> = dom::query_all(selectors::COUNTERS)
		.into_iter()
		.filter_map(|counter| {
			let raw = counter.get_attribute(COUNTER_ATTRIBUTE).unwrap_or_default();
			match parse_counter_target(&raw) {
				Ok(_) => Some(counter),
				Err(e) => {
					warn!("portfolio: counter target {:?} has no leading integer: {}", raw, e);
					None
				}
			}
		})
		.collect();
	if counters.is_empty() {
		debug!("portfolio: no counters, skipping");
		return Ok(());
	}

	let threshold = config.threshold;
	let config = config.clone();
	let observer = observe_entering(threshold, None, move |counter, observer| {
		observer.unobserve(&counter);
		let Some(target) = counter
			.get_attribute(COUNTER_ATTRIBUTE)
			.and_then(|raw| parse_counter_target(&raw).ok())
		else {
			return;
		};
		run_counter(counter, CountUp::new(target, &config));
	})?;
	for counter in &counters {
		observer.observe(counter);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn count_to(target: i64) -> Vec<CounterFrame> {
		let mut count = CountUp::new(target, &CounterConfig::default());
		let mut frames = Vec::new();
		loop {
			let frame = count.advance();
			frames.push(frame);
			if matches!(frame, CounterFrame::Finished(_)) {
				return frames;
			}
		}
	}

	#[test]
	fn counts_up_in_about_125_frames() {
		let frames = count_to(250);
		assert_eq!(frames.len(), 125);
		assert_eq!(frames[0], CounterFrame::Counting(2));
		assert_eq!(frames.last(), Some(&CounterFrame::Finished(250)));
	}

	#[test]
	fn counting_is_monotonic_and_below_target() {
		let frames = count_to(37);
		let mut last = 0;
		for frame in &frames[..frames.len() - 1] {
			let CounterFrame::Counting(value) = *frame else {
				panic!("finished early");
			};
			assert!(value >= last && value < 37);
			last = value;
		}
	}

	#[test]
	fn zero_target_finishes_immediately() {
		assert_eq!(count_to(0), vec![CounterFrame::Finished(0)]);
	}

	#[test]
	fn targets_take_the_leading_integer() {
		assert_eq!(parse_counter_target(" 42 "), Ok(42));
		assert_eq!(parse_counter_target("95%"), Ok(95));
		assert_eq!(parse_counter_target("4.5"), Ok(4));
		assert_eq!(parse_counter_target("1200+"), Ok(1200));
		assert_eq!(parse_counter_target("10px"), Ok(10));
		assert_eq!(parse_counter_target("-7 days"), Ok(-7));
	}

	#[test]
	fn targets_without_digits_are_rejected() {
		assert!(parse_counter_target("lots").is_err());
		assert!(parse_counter_target("").is_err());
		assert!(parse_counter_target("-").is_err());
		assert!(parse_counter_target("$5").is_err());
	}

	#[test]
	fn progress_width_appends_percent() {
		assert_eq!(progress_width("85"), "85%");
		assert_eq!(progress_width(" 70 "), "70%");
	}
}
