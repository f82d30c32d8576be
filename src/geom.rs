use glam::Vec2;

/// Axis-aligned box, closed at `min` and open at `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABox {
	min: Vec2,
	max: Vec2,
}

impl AABox {
	pub fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	pub fn contains(&self, point: Vec2) -> bool {
		point.x < self.max.x
			&& point.y < self.max.y
			&& !(point.x < self.min.x)
			&& !(point.y < self.min.y)
	}

	pub fn min(&self) -> Vec2 {
		self.min
	}

	pub fn max(&self) -> Vec2 {
		self.max
	}
}

/// World-to-view offset plus the viewport size.
///
/// A world point `p` is drawn at `p + position`; it is on screen when that
/// lands in `[0, bounds)` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	pub position: Vec2,
	pub bounds: Vec2,
}

impl Default for Camera {
	fn default() -> Self {
		Self::new(Vec2::ZERO, Vec2::splat(10.0))
	}
}

impl Camera {
	pub fn new(position: Vec2, bounds: Vec2) -> Self {
		Self { position, bounds }
	}

	pub fn viewport(&self) -> AABox {
		AABox::new(Vec2::ZERO, self.bounds)
	}

	pub fn to_view(&self, world: Vec2) -> Vec2 {
		world + self.position
	}

	pub fn to_world(&self, view: Vec2) -> Vec2 {
		view - self.position
	}

	pub fn is_visible(&self, world: Vec2) -> bool {
		self.viewport().contains(self.to_view(world))
	}

	/// Pans but keeps the viewport inside a `[0, world_size]` world.
	pub fn pan_within(&mut self, delta: Vec2, world_size: Vec2) {
		let lowest = (self.bounds - world_size).min(Vec2::ZERO);
		self.position = (self.position + delta).clamp(lowest, Vec2::ZERO);
	}
}
