//! Boid flocking with field-of-view perception.
//!
//! Each tick every boid looks at the others through a forward cone, steers
//! toward the centroid of what it sees and away from the nearest neighbour if
//! that neighbour is too close, then moves a fixed distance along its new
//! heading. Steering rotates the heading angle; it never blends vectors.

use super::FlockConfig;
use crate::util::vector::{dot_to_angle, from_heading, heading, relative_angle, try_direction};
use glam::Vec2;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boid {
	pub position: Vec2,
	/// Unit heading.
	pub direction: Vec2,
}

impl Boid {
	/// A zero `direction` falls back to +x.
	pub fn new(position: Vec2, direction: Vec2) -> Self {
		Self {
			position,
			direction: direction.normalize_or(Vec2::X),
		}
	}

	pub fn heading(&self) -> f32 {
		heading(self.direction)
	}

	pub(crate) fn perceives(&self, point: Vec2, config: &FlockConfig) -> bool {
		if !(self.position.distance(point) < config.vision_radius) {
			return false;
		}
		let Some(toward) = try_direction(self.position, point) else {
			return false;
		};
		dot_to_angle(self.direction.dot(toward)) < config.fov / 2.0
	}

	/// Next state of the boid at `index` in `flock`, which must hold at least
	/// one other boid.
	fn steer(&self, index: usize, flock: &[Boid], config: &FlockConfig) -> Boid {
		debug_assert!(flock.len() > 1);
		let mut nearest = flock[if index > 0 { 0 } else { 1 }];
		let mut nearest_distance = self.position.distance(nearest.position);
		let mut center = Vec2::ZERO;
		let mut visible = 0;

		for (i, other) in flock.iter().enumerate() {
			if i == index || !self.perceives(other.position, config) {
				continue;
			}
			let distance = self.position.distance(other.position);
			if distance < nearest_distance {
				nearest = *other;
				nearest_distance = distance;
			}
			center += other.position;
			visible += 1;
		}

		let mut angle = self.heading();

		if visible > 0 {
			let centroid = center / visible as f32;
			if let Some(toward) = try_direction(self.position, centroid) {
				angle += relative_angle(angle, heading(toward)) * config.center_influence;
			}
		}

		if nearest_distance < config.avoid_radius {
			let avoid_fac = (config.avoid_radius - nearest_distance) / config.avoid_radius;
			let bearing = try_direction(self.position, nearest.position)
				.map(heading)
				.unwrap_or(angle);
			let turn = avoid_fac * config.avoid_speed;
			if relative_angle(angle, bearing) >= 0.0 {
				angle -= turn;
			} else {
				angle += turn;
			}
		}

		if !angle.is_finite() {
			return *self;
		}
		let direction = from_heading(angle);
		Boid {
			position: self.position + direction * config.travel_speed,
			direction,
		}
	}
}

/// Boids in spawn order.
#[derive(Clone, Debug, Default)]
pub struct Flock {
	boids: VecDeque<Boid>,
}

impl FromIterator<Boid> for Flock {
	fn from_iter<T: IntoIterator<Item = Boid>>(iter: T) -> Self {
		Self {
			boids: iter.into_iter().collect(),
		}
	}
}

impl Flock {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, boid: Boid) {
		self.boids.push_back(boid);
	}

	pub fn remove_oldest(&mut self) -> Option<Boid> {
		self.boids.pop_front()
	}

	pub fn get(&self, index: usize) -> Option<&Boid> {
		self.boids.get(index)
	}

	pub fn len(&self) -> usize {
		self.boids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.boids.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Boid> + '_ {
		self.boids.iter()
	}

	/// Advances every boid by one tick. All boids read the positions and
	/// headings from before the tick.
	pub fn update(&mut self, config: &FlockConfig) {
		if self.boids.len() < 2 {
			return;
		}
		let snapshot: Vec<Boid> = self.boids.iter().copied().collect();
		for (index, boid) in self.boids.iter_mut().enumerate() {
			*boid = snapshot[index].steer(index, &snapshot, config);
		}
	}
}
