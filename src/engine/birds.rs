use super::flock::{Boid, Flock};
use super::stroke::{Frame, Generator, Tick};
use super::EngineConfig;
use crate::render::DrawContext;
use crate::util::spline::{directions_along, resample};
use glam::{vec2, Affine2, Vec2};

/// A flock launched along the stroke, each bird starting out heading along the
/// stroke where it spawned. After the lifetime the oldest bird leaves each tick.
#[derive(Clone, Debug, Default)]
pub struct BirdsEffect {
	flock: Flock,
}

impl BirdsEffect {
	pub fn flock(&self) -> &Flock {
		&self.flock
	}
}

fn draw_bird(ctx: &mut dyn DrawContext, view: Vec2, heading: f32, size: f32) {
	ctx.push_transform(Affine2::from_angle_translation(heading, view));
	ctx.begin_path();
	ctx.move_to(vec2(size, 0.0));
	ctx.line_to(vec2(-size, size * 0.6));
	ctx.line_to(vec2(-size * 0.4, 0.0));
	ctx.line_to(vec2(-size, -size * 0.6));
	ctx.line_to(vec2(size, 0.0));
	ctx.fill();
	ctx.reset_transform();
}

impl Generator for BirdsEffect {
	fn lifetime(config: &EngineConfig) -> f64 {
		config.birds.lifetime_ms
	}

	fn seed(points: &[Vec2], frame: &mut Frame) -> Self {
		let config = &frame.config.birds;
		let count = (config.birds_per_point * points.len()).min(config.max_birds);
		let positions = resample(points, count);
		let headings = directions_along(&positions);
		Self {
			flock: positions
				.into_iter()
				.zip(headings)
				.map(|(position, direction)| Boid::new(position, direction))
				.collect(),
		}
	}

	fn step(&mut self, tick: &Tick, frame: &mut Frame, ctx: &mut dyn DrawContext) -> bool {
		if tick.expired() {
			self.flock.remove_oldest();
			if self.flock.is_empty() {
				return false;
			}
		}

		self.flock.update(&frame.config.flock);

		ctx.set_fill_style(&frame.config.palette.birds);
		for boid in self.flock.iter() {
			if frame.camera.is_visible(boid.position) {
				draw_bird(ctx, frame.camera.to_view(boid.position), boid.heading(), frame.config.birds.size);
			}
		}

		true
	}
}

#[cfg(test)]
mod tests {
	use crate::engine::{BirdsConfig, Effect, EngineConfig, Stroke, StrokeKind};
	use crate::render::recording::DrawCommand;
	use crate::test::*;

	fn birds(stroke: &Stroke) -> &super::BirdsEffect {
		match stroke.effect() {
			Some(Effect::Birds(birds)) => birds,
			other => panic!("expected birds, got {other:?}"),
		}
	}

	#[test]
	fn seeds_along_the_stroke() {
		let mut scene = Scene::new();
		let mut stroke = Stroke::new(StrokeKind::Birds, line(3));
		scene.draw(&mut stroke, 0.0);
		let flock = birds(&stroke).flock();
		assert_eq!(flock.len(), 9);
		for boid in flock.iter() {
			assert!(boid.position.is_finite());
			assert!((boid.direction.length() - 1.0).abs() < 1e-4);
		}

		let mut long = Stroke::new(StrokeKind::Birds, line(30));
		scene.draw(&mut long, 0.0);
		assert_eq!(birds(&long).flock().len(), scene.config.birds.max_birds);
	}

	#[test]
	fn draws_one_chevron_per_visible_bird() {
		let mut scene = Scene::new();
		let mut stroke = Stroke::new(StrokeKind::Birds, line(3));
		scene.draw(&mut stroke, 0.0);
		assert_eq!(scene.ctx.fills(), 9);
		assert_eq!(scene.ctx.count(|c| matches!(c, DrawCommand::PushTransform(_))), 9);
		assert_eq!(scene.ctx.count(|c| matches!(c, DrawCommand::ResetTransform)), 9);
		assert!(scene.ctx.transform().abs_diff_eq(glam::Affine2::IDENTITY, 1e-6));
		// Every bird's nose lands near its boid.
		let touched = scene.ctx.touched_points();
		for (nose, boid) in touched.chunks(5).zip(birds(&stroke).flock().iter()) {
			assert!(nose[0].distance(boid.position) <= scene.config.birds.size + 1e-3);
		}
	}

	#[test]
	fn leaves_one_per_tick_after_lifetime() {
		let config = EngineConfig::builder()
			.birds(BirdsConfig::builder().lifetime_ms(100.0).build())
			.build();
		let mut scene = Scene::with_config(config);
		let mut stroke = Stroke::new(StrokeKind::Birds, line(2));
		scene.draw(&mut stroke, 0.0);
		assert_eq!(birds(&stroke).flock().len(), 6);

		let mut remaining = Vec::new();
		while stroke.is_alive() {
			stroke.advance_time();
			scene.draw(&mut stroke, 200.0);
			if stroke.is_alive() {
				remaining.push(birds(&stroke).flock().len());
			}
		}
		assert_eq!(remaining, vec![5, 4, 3, 2, 1]);
	}
}
