//! Canvas rendering for the particle background.
//!
//! Two passes per frame: dots first, then the proximity links on top.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{Link, Particle, ParticleField};
use crate::components::theme::{ParticleStyle, Theme};

/// The particle's opacity replaces the theme's base fill alpha.
fn dot_fill(style: &ParticleStyle, particle: &Particle) -> String {
	style.fill.with_alpha(particle.opacity).to_css()
}

/// The distance falloff replaces the theme's base stroke alpha.
fn link_stroke(style: &ParticleStyle, link: &Link) -> String {
	style.stroke.with_alpha(link.alpha).to_css()
}

/// Clears the canvas and draws the whole field in the theme's colors.
pub fn render(field: &ParticleField, ctx: &CanvasRenderingContext2d, theme: Theme) {
	let style = theme.particle_style();

	ctx.clear_rect(0.0, 0.0, field.width(), field.height());

	for p in field.particles() {
		ctx.set_fill_style_str(&dot_fill(&style, p));
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.radius, 0.0, PI * 2.0);
		ctx.fill();
	}

	for link in field.links() {
		ctx.set_stroke_style_str(&link_stroke(&style, &link));
		ctx.begin_path();
		ctx.move_to(link.from.0, link.from.1);
		ctx.line_to(link.to.0, link.to.1);
		ctx.stroke();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dots_draw_at_their_own_opacity() {
		let particle = Particle {
			x: 10.0,
			y: 10.0,
			vx: 0.0,
			vy: 0.0,
			radius: 2.0,
			opacity: 0.5,
		};
		assert_eq!(
			dot_fill(&Theme::Dark.particle_style(), &particle),
			"rgba(255, 255, 255, 0.5)"
		);
		assert_eq!(
			dot_fill(&Theme::Light.particle_style(), &particle),
			"rgba(0, 0, 0, 0.5)"
		);
	}

	#[test]
	fn links_draw_at_their_falloff_alpha() {
		let link = Link {
			from: (0.0, 0.0),
			to: (75.0, 0.0),
			alpha: 0.1,
		};
		assert_eq!(
			link_stroke(&Theme::Dark.particle_style(), &link),
			"rgba(255, 255, 255, 0.1)"
		);
	}
}
