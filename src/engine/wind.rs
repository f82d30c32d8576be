use super::stroke::{Frame, Generator, Tick};
use super::{EngineConfig, Gust};
use crate::render::{stroke_line, DrawContext};
use crate::util::spline::{nearest_segment, sample_at};
use glam::Vec2;
use std::collections::VecDeque;

/// A bounded stream of particles blowing along the stroke.
///
/// Particles spawn at a fixed cadence at random places on the polyline and keep
/// turning toward the tangent of whichever segment is closest. Once the
/// lifetime is up, spawning stops and the oldest particle is dropped each tick.
#[derive(Clone, Debug, Default)]
pub struct WindEffect {
	particles: VecDeque<Gust>,
}

impl WindEffect {
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn gusts(&self) -> impl Iterator<Item = Gust> + '_ {
		self.particles.iter().copied()
	}
}

fn tangent_at(points: &[Vec2], position: Vec2) -> Option<Vec2> {
	nearest_segment(points, position).and_then(|(_, tangent)| tangent.try_normalize())
}

impl Generator for WindEffect {
	fn lifetime(config: &EngineConfig) -> f64 {
		config.wind.lifetime_ms
	}

	fn seed(_points: &[Vec2], _frame: &mut Frame) -> Self {
		Self::default()
	}

	fn step(&mut self, tick: &Tick, frame: &mut Frame, ctx: &mut dyn DrawContext) -> bool {
		let config = &frame.config.wind;

		if tick.expired() {
			self.particles.pop_front();
			if self.particles.is_empty() {
				return false;
			}
		} else if tick.time % config.spawn_interval.max(1) == 0 {
			if let Some(position) = sample_at(tick.points, frame.rng.f32()) {
				let direction = tangent_at(tick.points, position).unwrap_or(Vec2::X);
				self.particles.push_back(Gust {
					position,
					direction,
				});
			}
			while self.particles.len() > config.max_particles {
				self.particles.pop_front();
			}
		}

		ctx.set_stroke_style(&frame.config.palette.wind, 2.0);
		for particle in &mut self.particles {
			if !frame.camera.is_visible(particle.position) {
				continue;
			}
			if let Some(tangent) = tangent_at(tick.points, particle.position) {
				particle.direction = (particle.direction + tangent * config.steer).normalize_or(particle.direction);
			}
			particle.position += particle.direction * config.particle_speed;

			let view = frame.camera.to_view(particle.position);
			stroke_line(ctx, view, view - particle.direction * config.trail_length);
		}

		true
	}
}

#[cfg(test)]
mod tests {
	use crate::engine::{Effect, EngineConfig, Stroke, StrokeKind, WindConfig};
	use crate::test::*;
	use approx::assert_abs_diff_eq;
	use glam::{vec2, Vec2};

	fn wind(stroke: &Stroke) -> &super::WindEffect {
		match stroke.effect() {
			Some(Effect::Wind(wind)) => wind,
			other => panic!("expected wind, got {other:?}"),
		}
	}

	#[test]
	fn spawns_on_cadence() {
		let mut scene = Scene::new();
		let mut stroke = Stroke::new(StrokeKind::Wind, line(4));
		for _ in 0..10 {
			stroke.advance_time();
			scene.draw(&mut stroke, 0.0);
		}
		// Ticks 2, 4, 6, 8 and 10.
		assert_eq!(wind(&stroke).len(), 5);
	}

	#[test]
	fn pool_is_bounded() {
		let config = EngineConfig::builder()
			.wind(WindConfig::builder().max_particles(3).spawn_interval(1).build())
			.build();
		let mut scene = Scene::with_config(config);
		let mut stroke = Stroke::new(StrokeKind::Wind, line(4));
		for _ in 0..20 {
			stroke.advance_time();
			scene.draw(&mut stroke, 0.0);
		}
		assert_eq!(wind(&stroke).len(), 3);
	}

	#[test]
	fn particles_follow_the_stroke() {
		let config = EngineConfig::builder()
			.wind(WindConfig::builder().spawn_interval(1).build())
			.build();
		let mut scene = Scene::with_config(config);
		let mut stroke = Stroke::new(StrokeKind::Wind, line(4));
		for _ in 0..30 {
			stroke.advance_time();
			scene.draw(&mut stroke, 0.0);
		}
		for gust in wind(&stroke).gusts() {
			assert_abs_diff_eq!(gust.direction.length(), 1.0, epsilon = 1e-4);
			assert!(gust.direction.abs_diff_eq(Vec2::X, 1e-4));
			assert_abs_diff_eq!(gust.position.y, line(4)[0].y, epsilon = 1e-3);
		}
	}

	#[test]
	fn drains_and_dies_after_lifetime() {
		let config = EngineConfig::builder()
			.wind(WindConfig::builder().spawn_interval(1).build())
			.build();
		let mut scene = Scene::with_config(config);
		let mut stroke = Stroke::new(StrokeKind::Wind, line(4)).with_life_time(Some(500.0));

		let mut now = 0.0;
		while now < 500.0 {
			stroke.advance_time();
			scene.draw(&mut stroke, now);
			now += 16.0;
		}
		let peak = wind(&stroke).len();
		assert!(peak > 1);

		let mut ticks = 0;
		while stroke.is_alive() {
			let before = wind(&stroke).len();
			stroke.advance_time();
			scene.draw(&mut stroke, now);
			now += 16.0;
			ticks += 1;
			if stroke.is_alive() {
				assert_eq!(wind(&stroke).len(), before - 1);
			}
		}
		assert_eq!(ticks, peak);
		assert!(wind(&stroke).is_empty());
	}

	#[test]
	fn offscreen_particles_freeze() {
		let mut scene = Scene::new();
		let points = vec![vec2(-900.0, -900.0), vec2(-800.0, -900.0)];
		let mut stroke = Stroke::new(StrokeKind::Wind, points);
		stroke.advance_time();
		stroke.advance_time();
		scene.draw(&mut stroke, 0.0);
		let before: Vec<_> = wind(&stroke).gusts().collect();
		for _ in 0..5 {
			stroke.advance_time();
			scene.draw(&mut stroke, 0.0);
		}
		assert_eq!(wind(&stroke).gusts().next(), before.first().copied());
		assert_eq!(scene.ctx.strokes(), 0);
	}
}
