use super::stroke::{Frame, Generator, Tick};
use super::EngineConfig;
use crate::render::{fill_circle, mix, stroke_line, DrawContext};
use crate::util::spline::{jitter, resample};
use glam::{vec2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPoint {
	pub position: Vec2,
	/// In `[0, 1]`. Only ever rises.
	pub wetness: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blade {
	pub root: Vec2,
	/// Index of the ground point whose wetness feeds this blade.
	pub ground: usize,
	pub height: f32,
	phase: f32,
}

/// A patch of ground that soaks up rain from clouds above it and sprouts grass
/// while wet. When the patch rots its grass withers with it.
#[derive(Clone, Debug)]
pub struct DirtEffect {
	ground: Vec<GroundPoint>,
	blades: Vec<Blade>,
	size: f32,
}

impl DirtEffect {
	pub fn ground(&self) -> &[GroundPoint] {
		&self.ground
	}

	pub fn blades(&self) -> &[Blade] {
		&self.blades
	}

	pub fn size(&self) -> f32 {
		self.size
	}

	/// Raises the wetness of every ground point with a cloud point above it
	/// and within `rain_height`.
	fn soak(&mut self, clouds: impl Iterator<Item = Vec2> + Clone, rain_height: f32, wet_rate: f32) {
		for ground in &mut self.ground {
			let rained_on = clouds
				.clone()
				.any(|cloud| cloud.y < ground.position.y && cloud.distance(ground.position) < rain_height);
			if rained_on {
				ground.wetness = (ground.wetness + wet_rate).min(1.0);
			}
		}
	}
}

impl Generator for DirtEffect {
	fn lifetime(config: &EngineConfig) -> f64 {
		config.dirt.lifetime_ms
	}

	fn seed(points: &[Vec2], frame: &mut Frame) -> Self {
		let config = &frame.config.dirt;
		let count = (config.dirt_per_point * points.len()).min(config.max_dirt);
		let ground: Vec<GroundPoint> = resample(points, count)
			.into_iter()
			.map(|position| GroundPoint {
				position,
				wetness: 0.0,
			})
			.collect();
		let mut blades = Vec::with_capacity(ground.len() * config.grass_per_point);
		for (index, point) in ground.iter().enumerate() {
			for _ in 0..config.grass_per_point {
				blades.push(Blade {
					root: point.position + jitter(frame.rng, config.grass_spread),
					ground: index,
					height: 0.0,
					phase: frame.rng.f32() * std::f32::consts::TAU,
				});
			}
		}
		Self {
			ground,
			blades,
			size: 0.0,
		}
	}

	fn step(&mut self, tick: &Tick, frame: &mut Frame, ctx: &mut dyn DrawContext) -> bool {
		let config = &frame.config.dirt;
		let palette = &frame.config.palette;
		let rotting = tick.expired();

		self.soak(frame.environment.cloud_points(), config.rain_height, config.wet_rate);

		if rotting {
			self.size -= config.decay_rate;
			if self.size <= 0.0 {
				return false;
			}
		} else {
			self.size = (self.size + config.pop_rate).min(1.0);
		}

		for blade in &mut self.blades {
			if rotting {
				blade.height = (blade.height - config.grass_wither).max(0.0);
			} else {
				let target = config.grass_height * self.ground[blade.ground].wetness;
				if blade.height < target {
					blade.height = (blade.height + config.grass_growth).min(target);
				}
			}
		}
		if rotting {
			self.blades.retain(|blade| blade.height > 0.0);
		}

		let radius = config.dirt_radius * self.size;
		for ground in &self.ground {
			if !frame.camera.is_visible(ground.position) {
				continue;
			}
			ctx.set_fill_style(&mix(&palette.dirt_dry, &palette.dirt_wet, ground.wetness));
			fill_circle(ctx, frame.camera.to_view(ground.position), radius);
		}

		let sway = tick.time as f32 * config.sway_speed;
		ctx.set_stroke_style(&palette.grass, 2.0);
		for blade in &self.blades {
			if blade.height <= 0.0 || !frame.camera.is_visible(blade.root) {
				continue;
			}
			let root = frame.camera.to_view(blade.root);
			let lean = (sway + blade.phase).sin() * blade.height * 0.25;
			stroke_line(ctx, root, root + vec2(lean, -blade.height));
		}

		true
	}
}
