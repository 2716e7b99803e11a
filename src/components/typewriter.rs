//! Typewriter effect cycling through a list of phrases.
//!
//! The animation is a four-phase state machine. Each [`Typewriter::tick`]
//! renders one frame of text and reports how long to wait before the next.

use std::time::Duration;

use leptos::prelude::set_timeout;
use log::debug;
use web_sys::HtmlElement;

use crate::config::TypewriterConfig;
use crate::dom::{self, selectors};

/// Attribute holding the comma-separated phrases.
pub const OPTIONS_ATTRIBUTE: &str = "data-options";

/// Where the typewriter is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Adding one character per tick.
	Typing,
	/// Holding the complete phrase.
	PausingFull,
	/// Removing one character per tick.
	Deleting,
	/// Holding the empty text before the next phrase.
	PausingEmpty,
}

/// Output of a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
	/// Text to display.
	pub text: String,
	/// Wait before the next tick.
	pub delay_ms: u32,
}

/// Types and deletes each phrase in turn, looping forever.
#[derive(Clone, Debug)]
pub struct Typewriter {
	phrases: Vec<Vec<char>>,
	index: usize,
	shown: usize,
	phase: Phase,
	timings: TypewriterConfig,
}

/// Split a comma-separated option list, dropping blank entries.
pub fn parse_phrases(options: &str) -> Vec<String> {
	options
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}

impl Typewriter {
	/// `None` when there is nothing to type.
	pub fn new(phrases: Vec<String>, timings: TypewriterConfig) -> Option<Self> {
		let phrases: Vec<Vec<char>> = phrases
			.into_iter()
			.filter(|p| !p.is_empty())
			.map(|p| p.chars().collect())
			.collect();
		if phrases.is_empty() {
			return None;
		}
		Some(Self {
			phrases,
			index: 0,
			shown: 0,
			phase: Phase::Typing,
			timings,
		})
	}

	/// Build from a comma-separated `data-options` value.
	pub fn from_options(options: &str, timings: TypewriterConfig) -> Option<Self> {
		Self::new(parse_phrases(options), timings)
	}

	/// Current phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Index of the phrase being typed or deleted.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Advance one step.
	pub fn tick(&mut self) -> Tick {
		let len = self.phrases[self.index].len();
		let delay_ms = match self.phase {
			Phase::Typing | Phase::PausingEmpty => {
				self.shown += 1;
				if self.shown >= len {
					self.phase = Phase::PausingFull;
					self.timings.full_pause_ms
				} else {
					self.phase = Phase::Typing;
					self.timings.type_delay_ms
				}
			}
			Phase::PausingFull | Phase::Deleting => {
				self.shown -= 1;
				if self.shown == 0 {
					self.phase = Phase::PausingEmpty;
					self.index = (self.index + 1) % self.phrases.len();
					self.timings.empty_pause_ms
				} else {
					self.phase = Phase::Deleting;
					self.timings.delete_delay_ms
				}
			}
		};

		let text = self.phrases[self.index][..self.shown].iter().collect();
		Tick { text, delay_ms }
	}
}

fn schedule(element: HtmlElement, mut machine: Typewriter, delay_ms: u32) {
	set_timeout(
		move || {
			let tick = machine.tick();
			element.set_text_content(Some(&tick.text));
			schedule(element, machine, tick.delay_ms);
		},
		Duration::from_millis(delay_ms as u64),
	);
}

/// Start typing into `.welcome-text-type`. No-op without phrases.
pub fn init_typewriter(config: &TypewriterConfig) {
	let Some(element) = dom::query(selectors::TYPED_TEXT) else {
		debug!("portfolio: no typed text element, skipping");
		return;
	};
	let Some(machine) = element
		.get_attribute(OPTIONS_ATTRIBUTE)
		.and_then(|options| Typewriter::from_options(&options, config.clone()))
	else {
		debug!("portfolio: typed text has no phrases, skipping");
		return;
	};

	schedule(element, machine, config.start_delay_ms);
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(options: &str, ticks: usize) -> Vec<(String, u32)> {
		let mut machine = Typewriter::from_options(options, TypewriterConfig::default()).unwrap();
		(0..ticks)
			.map(|_| {
				let tick = machine.tick();
				(tick.text, tick.delay_ms)
			})
			.collect()
	}

	#[test]
	fn cycles_through_phrases() {
		let frames = run("A, BC", 7);
		let expected = [
			("A", 2000),
			("", 500),
			("B", 100),
			("BC", 2000),
			("B", 50),
			("", 500),
			("A", 2000),
		];
		let expected: Vec<(String, u32)> = expected.iter().map(|(t, d)| (t.to_string(), *d)).collect();
		assert_eq!(frames, expected);
	}

	#[test]
	fn phases_follow_the_cycle() {
		let mut machine = Typewriter::from_options("Hi", TypewriterConfig::default()).unwrap();
		assert_eq!(machine.phase(), Phase::Typing);
		machine.tick();
		assert_eq!(machine.phase(), Phase::Typing);
		machine.tick();
		assert_eq!(machine.phase(), Phase::PausingFull);
		machine.tick();
		assert_eq!(machine.phase(), Phase::Deleting);
		machine.tick();
		assert_eq!(machine.phase(), Phase::PausingEmpty);
		assert_eq!(machine.index(), 0);
	}

	#[test]
	fn counts_characters_not_bytes() {
		let frames = run("héé", 3);
		assert_eq!(frames[0].0, "h");
		assert_eq!(frames[1].0, "hé");
		assert_eq!(frames[2].0, "héé");
		assert_eq!(frames[2].1, 2000);
	}

	#[test]
	fn blank_entries_are_dropped() {
		assert_eq!(parse_phrases(" Rust , ,Go,"), vec!["Rust", "Go"]);
		assert!(Typewriter::from_options(" , ", TypewriterConfig::default()).is_none());
		assert!(Typewriter::from_options("", TypewriterConfig::default()).is_none());
	}

	#[test]
	fn custom_timings_are_used() {
		let timings = TypewriterConfig {
			type_delay_ms: 10,
			full_pause_ms: 20,
			..TypewriterConfig::default()
		};
		let mut machine = Typewriter::from_options("ab", timings).unwrap();
		assert_eq!(machine.tick().delay_ms, 10);
		assert_eq!(machine.tick().delay_ms, 20);
	}
}
