//! Ambient particle simulation: spawning, integration, edge wrap and
//! proximity links.

use crate::config::ParticleConfig;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in canvas pixels.
	pub x: f64,
	/// Vertical position in canvas pixels.
	pub y: f64,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Dot radius.
	pub radius: f64,
	/// Fill opacity.
	pub opacity: f64,
}

impl Particle {
	/// Sample a particle inside a `width` x `height` canvas.
	///
	/// `rng` must yield uniform values in `[0, 1)`.
	pub fn spawn(config: &ParticleConfig, width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
		Self {
			x: rng() * width,
			y: rng() * height,
			vx: (rng() - 0.5) * 2.0 * config.max_speed,
			vy: (rng() - 0.5) * 2.0 * config.max_speed,
			radius: config.radius_min + rng() * (config.radius_max - config.radius_min),
			opacity: config.opacity_min + rng() * (config.opacity_max - config.opacity_min),
		}
	}

	/// One fixed-step move followed by the edge teleport.
	///
	/// Below zero jumps to the far edge; past the far edge jumps to zero.
	/// Positions therefore stay in `[0, width] x [0, height]`.
	fn step(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 {
			self.x = width;
		}
		if self.x > width {
			self.x = 0.0;
		}
		if self.y < 0.0 {
			self.y = height;
		}
		if self.y > height {
			self.y = 0.0;
		}
	}
}

/// A line between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// First endpoint.
	pub from: (f64, f64),
	/// Second endpoint.
	pub to: (f64, f64),
	/// Stroke opacity from the distance falloff.
	pub alpha: f64,
}

/// Population for a canvas: one particle per `area_per_particle`, capped.
pub fn particle_count(config: &ParticleConfig, width: f64, height: f64) -> usize {
	let area = (width * height).max(0.0);
	let by_area = (area / config.area_per_particle).floor() as usize;
	by_area.min(config.max_particles)
}

/// Line alpha for two particles `distance` apart, if they are close enough.
pub fn link_alpha(config: &ParticleConfig, distance: f64) -> Option<f64> {
	(distance < config.link_distance).then(|| (1.0 - distance / config.link_distance) * config.link_alpha)
}

/// Owns the particles and the canvas bounds they move in.
#[derive(Clone, Debug)]
pub struct ParticleField {
	config: ParticleConfig,
	particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// An empty field; call [`ParticleField::resize`] to size and populate it.
	pub fn new(config: ParticleConfig) -> Self {
		Self {
			config,
			particles: Vec::new(),
			width: 0.0,
			height: 0.0,
		}
	}

	/// Current particles.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Canvas width.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Canvas height.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Adopt new bounds and repopulate from scratch.
	pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl FnMut() -> f64) {
		self.width = width;
		self.height = height;
		self.populate(rng);
	}

	/// Discard every particle and spawn a fresh population for the current bounds.
	pub fn populate(&mut self, rng: &mut impl FnMut() -> f64) {
		let count = particle_count(&self.config, self.width, self.height);
		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			self.particles
				.push(Particle::spawn(&self.config, self.width, self.height, rng));
		}
	}

	/// Advance every particle by one frame.
	pub fn update(&mut self) {
		for p in &mut self.particles {
			p.step(self.width, self.height);
		}
	}

	/// Links between every unordered pair closer than the link distance.
	///
	/// Quadratic in the population, which `max_particles` keeps bounded.
	pub fn links(&self) -> Vec<Link> {
		let mut links = Vec::new();
		for (i, a) in self.particles.iter().enumerate() {
			for b in &self.particles[i + 1..] {
				let (dx, dy) = (a.x - b.x, a.y - b.y);
				let distance = (dx * dx + dy * dy).sqrt();
				if let Some(alpha) = link_alpha(&self.config, distance) {
					links.push(Link {
						from: (a.x, a.y),
						to: (b.x, b.y),
						alpha,
					});
				}
			}
		}
		links
	}

	#[cfg(test)]
	fn with_particles(config: ParticleConfig, width: f64, height: f64, particles: Vec<Particle>) -> Self {
		Self {
			config,
			particles,
			width,
			height,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Deterministic uniform source for tests.
	fn lcg(seed: u64) -> impl FnMut() -> f64 {
		let mut state = seed;
		move || {
			state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
			(state >> 11) as f64 / (1u64 << 53) as f64
		}
	}

	fn still(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 2.0,
			opacity: 0.5,
		}
	}

	#[test]
	fn count_scales_with_area() {
		let config = ParticleConfig::default();
		assert_eq!(particle_count(&config, 800.0, 600.0), 48);
		assert_eq!(particle_count(&config, 99.0, 100.0), 0);
		assert_eq!(particle_count(&config, 100.0, 100.0), 1);
		assert_eq!(particle_count(&config, 0.0, 0.0), 0);
	}

	#[test]
	fn count_is_capped() {
		let config = ParticleConfig::default();
		assert_eq!(particle_count(&config, 1920.0, 1080.0), 80);
		assert_eq!(particle_count(&config, 10_000.0, 10_000.0), 80);
	}

	#[test]
	fn resize_repopulates() {
		let mut rng = lcg(7);
		let mut field = ParticleField::new(ParticleConfig::default());
		field.resize(800.0, 600.0, &mut rng);
		assert_eq!(field.particles().len(), 48);
		let before = field.particles().to_vec();

		field.resize(400.0, 300.0, &mut rng);
		assert_eq!(field.particles().len(), 12);
		assert_ne!(field.particles(), &before[..12]);
	}

	#[test]
	fn spawned_particles_respect_ranges() {
		let config = ParticleConfig::default();
		let mut rng = lcg(42);
		for _ in 0..500 {
			let p = Particle::spawn(&config, 800.0, 600.0, &mut rng);
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!((-1.0..1.0).contains(&p.vx));
			assert!((-1.0..1.0).contains(&p.vy));
			assert!((1.0..4.0).contains(&p.radius));
			assert!((0.2..0.7).contains(&p.opacity));
		}
	}

	#[test]
	fn positions_stay_in_bounds() {
		let mut rng = lcg(3);
		let mut field = ParticleField::new(ParticleConfig::default());
		field.resize(300.0, 200.0, &mut rng);
		for _ in 0..2_000 {
			field.update();
			for p in field.particles() {
				assert!(p.x >= 0.0 && p.x <= 300.0, "x out of bounds: {}", p.x);
				assert!(p.y >= 0.0 && p.y <= 200.0, "y out of bounds: {}", p.y);
			}
		}
	}

	#[test]
	fn crossing_an_edge_teleports() {
		let mut left = Particle { vx: -1.0, ..still(0.5, 50.0) };
		left.step(100.0, 100.0);
		assert_eq!(left.x, 100.0);

		let mut right = Particle { vx: 1.0, ..still(99.5, 50.0) };
		right.step(100.0, 100.0);
		assert_eq!(right.x, 0.0);

		let mut top = Particle { vy: -0.75, ..still(10.0, 0.5) };
		top.step(100.0, 100.0);
		assert_eq!(top.y, 100.0);

		// Sitting exactly on the far edge is allowed.
		let mut edge = still(100.0, 100.0);
		edge.step(100.0, 100.0);
		assert_eq!((edge.x, edge.y), (100.0, 100.0));
	}

	#[test]
	fn velocity_and_looks_are_constant() {
		let mut rng = lcg(11);
		let mut field = ParticleField::new(ParticleConfig::default());
		field.resize(640.0, 480.0, &mut rng);
		let before: Vec<_> = field
			.particles()
			.iter()
			.map(|p| (p.vx, p.vy, p.radius, p.opacity))
			.collect();
		for _ in 0..100 {
			field.update();
		}
		let after: Vec<_> = field
			.particles()
			.iter()
			.map(|p| (p.vx, p.vy, p.radius, p.opacity))
			.collect();
		assert_eq!(before, after);
	}

	#[test]
	fn link_alpha_falls_off_linearly() {
		let config = ParticleConfig::default();
		assert_eq!(link_alpha(&config, 0.0), Some(0.2));
		let mid = link_alpha(&config, 75.0).unwrap();
		assert!((mid - 0.1).abs() < 1e-12);
		assert_eq!(link_alpha(&config, 150.0), None);
		assert_eq!(link_alpha(&config, 200.0), None);
		let near_edge = link_alpha(&config, 149.9).unwrap();
		assert!(near_edge > 0.0 && near_edge < 0.2);
	}

	#[test]
	fn links_cover_close_unordered_pairs_only() {
		let field = ParticleField::with_particles(
			ParticleConfig::default(),
			1000.0,
			1000.0,
			vec![still(0.0, 0.0), still(30.0, 40.0), still(500.0, 500.0)],
		);
		let links = field.links();
		assert_eq!(links.len(), 1);
		let link = links[0];
		assert_eq!(link.from, (0.0, 0.0));
		assert_eq!(link.to, (30.0, 40.0));
		assert!((link.alpha - (1.0 - 50.0 / 150.0) * 0.2).abs() < 1e-12);
	}

	#[test]
	fn link_alpha_stays_in_range_for_random_fields() {
		let mut rng = lcg(99);
		let mut field = ParticleField::new(ParticleConfig::default());
		field.resize(1024.0, 768.0, &mut rng);
		for link in field.links() {
			assert!(link.alpha > 0.0 && link.alpha <= 0.2);
		}
	}
}
