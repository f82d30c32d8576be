use super::stroke::{Frame, Generator, Tick};
use super::EngineConfig;
use crate::render::{fill_circle, stroke_line, DrawContext};
use crate::util::spline::{ease_back, jitter, resample, sample_at};
use crate::util::vector::accumulate;
use glam::{vec2, Vec2};
use std::collections::VecDeque;

/// Puffs of micro-points along the stroke that rain while they grow, then
/// shrink away once the stroke's lifetime is up.
#[derive(Clone, Debug)]
pub struct CloudEffect {
	/// Micro-points of each puff.
	clouds: Vec<Vec<Vec2>>,
	raindrops: VecDeque<Vec2>,
	size: f32,
}

impl CloudEffect {
	/// Grows from 0 to 1, then shrinks back to 0 once decaying.
	pub fn size(&self) -> f32 {
		self.size
	}

	pub fn cloud_count(&self) -> usize {
		self.clouds.len()
	}

	pub fn micropoints(&self) -> impl Iterator<Item = Vec2> + '_ {
		self.clouds.iter().flatten().copied()
	}

	pub fn raindrops(&self) -> impl Iterator<Item = Vec2> + '_ {
		self.raindrops.iter().copied()
	}
}

impl Generator for CloudEffect {
	fn lifetime(config: &EngineConfig) -> f64 {
		config.cloud.lifetime_ms
	}

	fn seed(points: &[Vec2], frame: &mut Frame) -> Self {
		let config = &frame.config.cloud;
		let count = (config.clouds_per_point * points.len()).min(config.max_clouds);
		let clouds = resample(points, count)
			.into_iter()
			.map(|position| {
				let micropoints = frame.rng.usize(0..=config.micropoint_max.saturating_sub(1));
				(0..micropoints)
					.map(|_| position + jitter(frame.rng, config.cloud_radius))
					.collect::<Vec<_>>()
			})
			.collect();
		Self {
			clouds,
			raindrops: VecDeque::new(),
			size: 0.0,
		}
	}

	fn step(&mut self, tick: &Tick, frame: &mut Frame, ctx: &mut dyn DrawContext) -> bool {
		let config = &frame.config.cloud;
		let palette = &frame.config.palette;
		let decaying = tick.expired();

		if decaying {
			self.size = (self.size - config.growth_rate).max(0.0);
			if self.size <= 0.0 {
				return false;
			}
		} else {
			self.size = (self.size + config.growth_rate).min(1.0);
			for _ in 0..config.rain_per_frame {
				if let Some(drop) = sample_at(tick.points, frame.rng.f32()) {
					self.raindrops.push_back(drop);
				}
			}
		}
		while self.raindrops.len() > config.max_rain {
			self.raindrops.pop_front();
		}

		let fall = config.rain_direction;
		let streak = fall.normalize_or(Vec2::Y) * config.rain_length;
		ctx.set_stroke_style(&palette.rain, 2.0);
		for drop in self.raindrops.iter_mut() {
			if !frame.camera.is_visible(*drop) {
				continue;
			}
			let view = frame.camera.to_view(*drop);
			*drop += fall + frame.environment.gust_at(*drop, config.wind_radius) * config.wind_push;
			stroke_line(ctx, view, view + streak);
		}

		let phase = tick.time as f32 * config.wiggle_speed;
		let radius = config.micropoint_radius * ease_back(self.size, config.overshoot).max(0.0);
		ctx.set_fill_style(&palette.cloud);
		for point in self.clouds.iter_mut().flatten() {
			if !frame.camera.is_visible(*point) {
				continue;
			}
			accumulate(point, frame.environment.gust_at(*point, config.wind_radius), config.wind_push);
			let wave = vec2(
				(point.x + phase + 2574.0).sin(),
				(point.y + phase + 2589.0).sin(),
			);
			fill_circle(ctx, frame.camera.to_view(*point) + wave, radius);
		}

		true
	}
}
