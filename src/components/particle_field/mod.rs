//! Animated particle background.
//!
//! Renders drifting dots on a full-viewport canvas, joined by faint lines when
//! they come within reach of each other:
//! - Population scales with canvas area, capped to keep the pairwise link
//!   scan cheap
//! - Fixed-step motion with hard edge teleport
//! - Colors follow the active light/dark theme
//! - Paused while the page is hidden, rebuilt after resizes

mod component;
pub mod particles;
mod render;

pub use component::{FrameSchedule, init_particle_field};
pub use particles::{Link, Particle, ParticleField, link_alpha, particle_count};
