//! Free-floating background particles with edge wraparound.

use crate::config::ParticleConfig;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Radius.
	pub size: f64,
}

/// The particle set for one surface.
pub struct ParticleSystem {
	/// Live particles, fixed in number after seeding.
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleSystem {
	/// Seed `floor(width * height / area_per_particle)` particles.
	///
	/// `random` must yield uniform values in `[0, 1)`.
	pub fn new(
		config: &ParticleConfig,
		width: f64,
		height: f64,
		random: &mut impl FnMut() -> f64,
	) -> Self {
		let count = Self::count_for(config, width, height);
		let particles = (0..count)
			.map(|_| Particle {
				x: random() * width,
				y: random() * height,
				vx: (random() - 0.5) * 2.0 * config.max_speed,
				vy: (random() - 0.5) * 2.0 * config.max_speed,
				size: config.size_min + random() * (config.size_max - config.size_min),
			})
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	/// Particle count for a `width` x `height` surface.
	pub fn count_for(config: &ParticleConfig, width: f64, height: f64) -> usize {
		if width <= 0.0 || height <= 0.0 || config.area_per_particle <= 0.0 {
			return 0;
		}
		(width * height / config.area_per_particle).floor() as usize
	}

	/// Move every particle by its velocity, teleporting across edges.
	pub fn advance(&mut self) {
		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;

			if p.x < 0.0 {
				p.x = self.width;
			} else if p.x > self.width {
				p.x = 0.0;
			}
			if p.y < 0.0 {
				p.y = self.height;
			} else if p.y > self.height {
				p.y = 0.0;
			}
		}
	}

	/// Update the surface bounds. Positions are left as they are.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Current surface size.
	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}
