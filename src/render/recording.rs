use super::DrawContext;
use csscolorparser::Color;
use glam::{Affine2, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	FillStyle(Color),
	StrokeStyle(Color, f32),
	BeginPath,
	MoveTo(Vec2),
	LineTo(Vec2),
	Arc {
		center: Vec2,
		radius: f32,
		start_angle: f32,
		end_angle: f32,
	},
	Fill,
	Stroke,
	PushTransform(Affine2),
	ResetTransform,
}

/// A [`DrawContext`] that only remembers what it was asked to do.
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
	commands: Vec<DrawCommand>,
	transform: Affine2,
}

impl RecordingContext {
	pub fn commands(&self) -> &[DrawCommand] {
		&self.commands
	}

	pub fn clear(&mut self) {
		self.commands.clear();
		self.transform = Affine2::IDENTITY;
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
		self.commands.iter().filter(|c| predicate(c)).count()
	}

	pub fn fills(&self) -> usize {
		self.count(|c| matches!(c, DrawCommand::Fill))
	}

	pub fn strokes(&self) -> usize {
		self.count(|c| matches!(c, DrawCommand::Stroke))
	}

	/// Radii of every arc, in call order.
	pub fn arc_radii(&self) -> Vec<f32> {
		self
			.commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Arc { radius, .. } => Some(*radius),
				_ => None,
			})
			.collect()
	}

	/// Every point passed to `move_to`, `line_to` or `arc`, mapped through the
	/// transform in effect at the time.
	pub fn touched_points(&self) -> Vec<Vec2> {
		let mut transform = Affine2::IDENTITY;
		let mut points = Vec::new();
		for command in &self.commands {
			match command {
				DrawCommand::PushTransform(t) => transform = transform * *t,
				DrawCommand::ResetTransform => transform = Affine2::IDENTITY,
				DrawCommand::MoveTo(p) | DrawCommand::LineTo(p) => {
					points.push(transform.transform_point2(*p))
				}
				DrawCommand::Arc { center, .. } => points.push(transform.transform_point2(*center)),
				_ => {}
			}
		}
		points
	}

	pub fn transform(&self) -> Affine2 {
		self.transform
	}
}

impl DrawContext for RecordingContext {
	fn set_fill_style(&mut self, color: &Color) {
		self.commands.push(DrawCommand::FillStyle(color.clone()));
	}

	fn set_stroke_style(&mut self, color: &Color, line_width: f32) {
		self
			.commands
			.push(DrawCommand::StrokeStyle(color.clone(), line_width));
	}

	fn begin_path(&mut self) {
		self.commands.push(DrawCommand::BeginPath);
	}

	fn move_to(&mut self, point: Vec2) {
		self.commands.push(DrawCommand::MoveTo(point));
	}

	fn line_to(&mut self, point: Vec2) {
		self.commands.push(DrawCommand::LineTo(point));
	}

	fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
		self.commands.push(DrawCommand::Arc {
			center,
			radius,
			start_angle,
			end_angle,
		});
	}

	fn fill(&mut self) {
		self.commands.push(DrawCommand::Fill);
	}

	fn stroke(&mut self) {
		self.commands.push(DrawCommand::Stroke);
	}

	fn push_transform(&mut self, transform: Affine2) {
		self.transform = self.transform * transform;
		self.commands.push(DrawCommand::PushTransform(transform));
	}

	fn reset_transform(&mut self) {
		self.transform = Affine2::IDENTITY;
		self.commands.push(DrawCommand::ResetTransform);
	}
}
