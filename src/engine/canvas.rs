use super::wire::{ServerEvent, WireStroke};
use super::{EngineConfig, Environment, Frame, Stroke, StrokeKind};
use crate::geom::Camera;
use crate::render::{fill_rect, DrawContext};
use crate::util::ResultExt;
use glam::Vec2;

/// The live strokes of one client and the per-frame driver over them.
#[derive(Debug)]
pub struct Canvas {
	strokes: Vec<Stroke>,
	config: EngineConfig,
	rng: fastrand::Rng,
}

impl Canvas {
	pub fn new(config: EngineConfig, seed: u64) -> Self {
		Self {
			strokes: Vec::new(),
			config,
			rng: fastrand::Rng::with_seed(seed),
		}
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Live strokes in insertion order.
	pub fn strokes(&self) -> &[Stroke] {
		&self.strokes
	}

	pub fn len(&self) -> usize {
		self.strokes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.strokes.is_empty()
	}

	/// Paints the background, advances and draws every stroke once, then drops
	/// the ones that died.
	///
	/// All strokes see the environment as it was at the start of the frame.
	#[tracing::instrument(level = "trace", skip_all, fields(strokes = self.strokes.len()))]
	pub fn frame(&mut self, ctx: &mut dyn DrawContext, camera: &Camera, now: f64) {
		ctx.reset_transform();
		ctx.set_fill_style(&self.config.palette.background);
		fill_rect(ctx, camera.viewport());

		let environment = Environment::capture(&self.strokes);
		let mut frame = Frame {
			camera,
			environment: &environment,
			config: &self.config,
			rng: &mut self.rng,
			now,
		};
		for stroke in &mut self.strokes {
			stroke.advance_time();
			stroke.draw(&mut frame, ctx);
		}

		let before = self.strokes.len();
		self.strokes.retain(Stroke::is_alive);
		if self.strokes.len() < before {
			tracing::debug!(
				removed = before - self.strokes.len(),
				remaining = self.strokes.len(),
				"swept dead strokes"
			);
		}
	}

	/// Turns a finished gesture (view-space points) into a stroke, primes it
	/// with one draw and appends it. Returns the record to send to the relay,
	/// or `None` for an empty gesture.
	#[tracing::instrument(skip(self, points, ctx, camera), fields(points = points.len()))]
	pub fn commit(
		&mut self,
		points: &[Vec2],
		kind: StrokeKind,
		camera: &Camera,
		now: f64,
		ctx: &mut dyn DrawContext,
	) -> Option<WireStroke> {
		if points.is_empty() {
			return None;
		}
		let mut stroke = Stroke::new(kind, points.iter().map(|point| camera.to_world(*point))).created_at(now);

		let environment = Environment::capture(&self.strokes);
		let mut frame = Frame {
			camera,
			environment: &environment,
			config: &self.config,
			rng: &mut self.rng,
			now,
		};
		stroke.draw(&mut frame, ctx);

		let record = WireStroke::from(&stroke);
		self.strokes.push(stroke);
		Some(record)
	}

	/// Replaces every stroke with the relay's list. Invalid records are logged
	/// and skipped.
	#[tracing::instrument(skip_all, fields(records = records.len()))]
	pub fn receive_strokes(&mut self, records: Vec<WireStroke>) {
		self.strokes = records
			.into_iter()
			.filter_map(|record| Stroke::try_from(record).ok_or_warn())
			.collect();
		tracing::debug!(strokes = self.strokes.len(), "replaced strokes");
	}

	/// Appends one stroke from the relay. Returns whether it was accepted.
	pub fn receive_stroke(&mut self, record: WireStroke) -> bool {
		match Stroke::try_from(record).ok_or_warn() {
			Some(stroke) => {
				tracing::debug!(kind = %stroke.kind(), "received stroke");
				self.strokes.push(stroke);
				true
			}
			None => false,
		}
	}

	pub fn apply(&mut self, event: ServerEvent) {
		match event {
			ServerEvent::ReceiveStrokes(records) => self.receive_strokes(records),
			ServerEvent::NewStroke(record) => {
				self.receive_stroke(record);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::wire::WirePoint;
	use crate::engine::{StrokeState, WindConfig};
	use crate::render::recording::{DrawCommand, RecordingContext};
	use crate::test::*;
	use glam::vec2;

	fn record(kind: StrokeKind, points: &[Vec2]) -> WireStroke {
		WireStroke {
			kind,
			points: points.iter().copied().map(WirePoint::from).collect(),
			creation_time: 0.0,
			life_time: None,
		}
	}

	#[test]
	fn commit_converts_to_world_and_primes() {
		let mut canvas = Canvas::new(EngineConfig::default(), SEED);
		let camera = Camera::new(vec2(-100.0, -50.0), vec2(800.0, 600.0));
		let mut ctx = RecordingContext::default();

		let sent = canvas
			.commit(&[vec2(0.0, 0.0), vec2(60.0, 0.0)], StrokeKind::Dirt, &camera, 1000.0, &mut ctx)
			.unwrap();

		assert_eq!(sent.points, vec![WirePoint { x: 100.0, y: 50.0 }, WirePoint { x: 160.0, y: 50.0 }]);
		assert_eq!(sent.creation_time, 1000.0);
		assert_eq!(sent.life_time, Some(canvas.config().dirt.lifetime_ms));
		assert_eq!(canvas.strokes()[0].state(), StrokeState::Alive);
		assert!(ctx.fills() > 0);

		assert_eq!(canvas.commit(&[], StrokeKind::Dirt, &camera, 0.0, &mut ctx), None);
		assert_eq!(canvas.len(), 1);
	}

	#[test]
	fn frame_starts_with_the_background() {
		let mut canvas = Canvas::new(EngineConfig::default(), SEED);
		let camera = Camera::new(vec2(-100.0, -50.0), vec2(800.0, 600.0));
		let mut ctx = RecordingContext::default();
		canvas.frame(&mut ctx, &camera, 0.0);

		assert_eq!(
			ctx.commands(),
			[
				DrawCommand::ResetTransform,
				DrawCommand::FillStyle(canvas.config().palette.background.clone()),
				DrawCommand::BeginPath,
				DrawCommand::MoveTo(vec2(0.0, 0.0)),
				DrawCommand::LineTo(vec2(800.0, 0.0)),
				DrawCommand::LineTo(vec2(800.0, 600.0)),
				DrawCommand::LineTo(vec2(0.0, 600.0)),
				DrawCommand::Fill,
			]
		);
	}

	#[test]
	fn dead_strokes_are_swept_in_order() {
		let config = EngineConfig::builder()
			.wind(WindConfig::builder().lifetime_ms(100.0).build())
			.build();
		let mut canvas = Canvas::new(config, SEED);
		let camera = camera();
		let mut ctx = RecordingContext::default();

		canvas.receive_strokes(vec![
			record(StrokeKind::Dirt, &line(3)),
			record(StrokeKind::Wind, &line(3)),
			record(StrokeKind::Cloud, &line(3)),
			record(StrokeKind::Wind, &line(2)),
			record(StrokeKind::Birds, &line(3)),
		]);
		assert_eq!(canvas.len(), 5);

		let mut now = 0.0;
		for _ in 0..20 {
			canvas.frame(&mut ctx, &camera, now);
			now += 16.0;
		}
		// Both wind strokes have expired and drained.
		let kinds: Vec<_> = canvas.strokes().iter().map(|s| s.kind().clone()).collect();
		assert_eq!(kinds, vec![StrokeKind::Dirt, StrokeKind::Cloud, StrokeKind::Birds]);
	}

	#[test]
	fn invalid_records_are_skipped() {
		let mut canvas = Canvas::new(EngineConfig::default(), SEED);
		canvas.apply(ServerEvent::ReceiveStrokes(vec![
			record(StrokeKind::Cloud, &[]),
			record(StrokeKind::Birds, &line(2)),
			record(StrokeKind::Other("comet".to_owned()), &[]),
		]));
		assert_eq!(canvas.len(), 2);

		canvas.apply(ServerEvent::NewStroke(record(StrokeKind::Wind, &[])));
		assert_eq!(canvas.len(), 2);
		canvas.apply(ServerEvent::NewStroke(record(StrokeKind::Wind, &line(2))));
		assert_eq!(canvas.len(), 3);

		canvas.apply(ServerEvent::ReceiveStrokes(Vec::new()));
		assert!(canvas.is_empty());
	}

	#[test]
	fn same_seed_same_frames() {
		let run = || {
			let mut canvas = Canvas::new(EngineConfig::default(), SEED);
			let mut ctx = RecordingContext::default();
			canvas.receive_strokes(vec![
				record(StrokeKind::Cloud, &line(4)),
				record(StrokeKind::Wind, &line(4)),
			]);
			for frame in 0..30 {
				canvas.frame(&mut ctx, &camera(), frame as f64 * 16.0);
			}
			ctx
		};
		assert_eq!(run().commands(), run().commands());
	}
}
