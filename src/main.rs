use anyhow::Context;
use glam::{vec2, Vec2};
use itertools::Itertools;
use squall::engine::wire::{ClientEvent, ServerEvent};
use squall::engine::{Canvas, EngineConfig, GestureBuffer, StrokeKind};
use squall::geom::Camera;
use squall::render::recording::RecordingContext;

fn configure_tracing() -> anyhow::Result<()> {
	let max_level = if cfg!(debug_assertions) {
		tracing::Level::TRACE
	} else {
		tracing::Level::INFO
	};
	tracing::subscriber::set_global_default(
		tracing_subscriber::FmtSubscriber::builder()
			.with_max_level(max_level)
			.finish(),
	)?;
	Ok(())
}

fn configure_logging() -> anyhow::Result<()> {
	configure_tracing()?;

	// Redirect `log` to `tracing`.
	#[cfg(feature = "log")]
	tracing_log::LogTracer::init()?;

	Ok(())
}

const FRAME_MS: f64 = 16.0;

/// A pointer path across the viewport, wobbling around `y`.
fn pointer_path(y: f32) -> impl Iterator<Item = Vec2> {
	(0..=120).map(move |i| {
		let x = 80.0 + i as f32 * 8.0;
		vec2(x, y + (x / 90.0).sin() * 40.0)
	})
}

fn run(frames: usize) -> anyhow::Result<()> {
	let config = EngineConfig::default();
	let mut rng = fastrand::Rng::new();
	let mut canvas = Canvas::new(config.clone(), rng.u64(..));
	let mut camera = Camera::new(Vec2::ZERO, vec2(1280.0, 720.0));
	let mut ctx = RecordingContext::default();
	let mut gesture = GestureBuffer::new();
	let mut now = 0.0;

	// The relay greets a new client with everything drawn so far.
	canvas.apply(ServerEvent::from_json(
		r#"{"event":"receiveStrokes","data":[
			{"type":"cloud","points":[{"x":300,"y":80},{"x":420,"y":60},{"x":540,"y":90}],"creationTime":0,"lifeTime":null},
			{"type":"flower","points":[{"x":10,"y":10},{"x":20,"y":20}],"creationTime":0,"lifeTime":null}
		]}"#,
	)?);
	let request = ClientEvent::GetStrokes.to_json()?;
	tracing::info!(%request, strokes = canvas.len(), "joined");

	// Every stroke this session draws has the same kind.
	let kind = StrokeKind::from_seed(rng.f64());
	tracing::info!(%kind, "assigned session kind");

	for row in 0..4 {
		let mut path = pointer_path(150.0 + row as f32 * 140.0);
		if let Some(start) = path.next() {
			gesture.press(start);
		}
		for point in path {
			gesture.drag(point, config.gesture.min_spacing);
		}
		gesture.draw_preview(&mut ctx, &config);

		let Some(points) = gesture.release() else {
			continue;
		};
		if let Some(record) = canvas.commit(&points, kind.clone(), &camera, now, &mut ctx) {
			let event = ClientEvent::CommitBuffer(record).to_json()?;
			tracing::info!(%event, "committed");
		}
	}

	for frame in 0..frames {
		ctx.clear();
		if frame % 120 == 60 {
			camera.pan_within(vec2(-40.0, 0.0), config.world_size);
		}
		canvas.frame(&mut ctx, &camera, now);
		now += FRAME_MS;

		if frame % 60 == 0 {
			let counts = canvas
				.strokes()
				.iter()
				.map(|stroke| stroke.kind().to_string())
				.counts();
			tracing::info!(
				frame,
				strokes = canvas.len(),
				commands = ctx.len(),
				kinds = ?counts.into_iter().sorted().collect_vec(),
				"frame"
			);
		}
	}

	tracing::info!(remaining = canvas.len(), elapsed_ms = now, "done");
	Ok(())
}

fn main() -> anyhow::Result<()> {
	if let Err(error) = configure_logging() {
		// We can technically continue without logging.
		tracing::error!(error = error.to_string());
	}

	let frames = match std::env::args().nth(1) {
		Some(arg) => arg
			.parse()
			.with_context(|| format!("frame count must be a number, got `{arg}`"))?,
		None => 3000,
	};
	run(frames)
}
