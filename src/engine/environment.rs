use super::{Effect, Stroke, StrokeKind};
use glam::Vec2;

/// A wind particle as seen by its neighbours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gust {
	pub position: Vec2,
	pub direction: Vec2,
}

/// What strokes can learn about each other during one frame.
///
/// Captured once before any stroke updates, so every stroke in the frame reads
/// the same state no matter where it sits in the list.
#[derive(Clone, Debug, Default)]
pub struct Environment {
	clouds: Vec<Vec<Vec2>>,
	gusts: Vec<Gust>,
}

impl Environment {
	pub fn capture(strokes: &[Stroke]) -> Self {
		let mut environment = Self::default();
		for stroke in strokes.iter().filter(|stroke| stroke.is_alive()) {
			if *stroke.kind() == StrokeKind::Cloud {
				environment.clouds.push(stroke.points().to_vec());
			}
			if let Some(Effect::Wind(wind)) = stroke.effect() {
				environment.gusts.extend(wind.gusts());
			}
		}
		environment
	}

	/// Raw points of every cloud stroke.
	pub fn clouds(&self) -> &[Vec<Vec2>] {
		&self.clouds
	}

	pub fn cloud_points(&self) -> impl Iterator<Item = Vec2> + Clone + '_ {
		self.clouds.iter().flatten().copied()
	}

	pub fn gusts(&self) -> &[Gust] {
		&self.gusts
	}

	/// Sum of the directions of all gusts within `radius` of `point`.
	pub fn gust_at(&self, point: Vec2, radius: f32) -> Vec2 {
		self.gusts
			.iter()
			.filter(|gust| gust.position.distance(point) < radius)
			.map(|gust| gust.direction)
			.sum()
	}
}

static_assertions::assert_impl_all!(Environment: Send, Sync);
