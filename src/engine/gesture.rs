use super::EngineConfig;
use crate::render::{fill_circle, stroke_line, DrawContext};
use glam::Vec2;
use itertools::Itertools;

/// Collects pointer samples, in view space, for the stroke being drawn.
#[derive(Clone, Debug, Default)]
pub struct GestureBuffer {
	points: Vec<Vec2>,
	pressed: bool,
}

impl GestureBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn points(&self) -> &[Vec2] {
		&self.points
	}

	pub fn is_pressed(&self) -> bool {
		self.pressed
	}

	pub fn press(&mut self, point: Vec2) {
		self.points.clear();
		self.points.push(point);
		self.pressed = true;
	}

	/// Keeps `point` if it is farther than `min_spacing` from the last kept
	/// sample. Returns whether it was kept.
	pub fn drag(&mut self, point: Vec2, min_spacing: f32) -> bool {
		if !self.pressed {
			return false;
		}
		if let Some(last) = self.points.last() {
			if !(last.distance(point) > min_spacing) {
				return false;
			}
		}
		self.points.push(point);
		true
	}

	/// Ends the gesture, yielding its polyline unless nothing was drawn.
	pub fn release(&mut self) -> Option<Vec<Vec2>> {
		self.pressed = false;
		let points = std::mem::take(&mut self.points);
		(!points.is_empty()).then_some(points)
	}

	pub fn draw_preview(&self, ctx: &mut dyn DrawContext, config: &EngineConfig) {
		if !self.pressed || self.points.is_empty() {
			return;
		}
		let color = &config.palette.preview;
		ctx.set_fill_style(color);
		ctx.set_stroke_style(color, config.gesture.preview_width);
		for (a, b) in self.points.iter().tuple_windows() {
			stroke_line(ctx, *a, *b);
		}
		for point in &self.points {
			fill_circle(ctx, *point, config.gesture.preview_radius);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::recording::RecordingContext;
	use glam::vec2;

	#[test]
	fn drag_respects_spacing() {
		let mut buffer = GestureBuffer::new();
		assert!(!buffer.drag(vec2(0.0, 0.0), 50.0));
		buffer.press(vec2(0.0, 0.0));
		assert!(!buffer.drag(vec2(30.0, 0.0), 50.0));
		assert!(!buffer.drag(vec2(50.0, 0.0), 50.0));
		assert!(buffer.drag(vec2(51.0, 0.0), 50.0));
		assert!(buffer.drag(vec2(51.0, 60.0), 50.0));
		assert_eq!(buffer.points().len(), 3);
		assert_eq!(
			buffer.release(),
			Some(vec![vec2(0.0, 0.0), vec2(51.0, 0.0), vec2(51.0, 60.0)])
		);
		assert!(!buffer.is_pressed());
		assert_eq!(buffer.release(), None);
	}

	#[test]
	fn preview_draws_segments_and_dots() {
		let config = EngineConfig::default();
		let mut buffer = GestureBuffer::new();
		let mut ctx = RecordingContext::default();
		buffer.draw_preview(&mut ctx, &config);
		assert!(ctx.is_empty());

		buffer.press(vec2(0.0, 0.0));
		buffer.drag(vec2(100.0, 0.0), config.gesture.min_spacing);
		buffer.drag(vec2(200.0, 0.0), config.gesture.min_spacing);
		buffer.draw_preview(&mut ctx, &config);
		assert_eq!(ctx.strokes(), 2);
		assert_eq!(ctx.fills(), 3);
		assert_eq!(ctx.arc_radii(), vec![config.gesture.preview_radius; 3]);
	}
}
