use glam::{vec2, Vec2};
use squall::engine::wire::{ServerEvent, WirePoint, WireStroke};
use squall::engine::{Canvas, Effect, EngineConfig, Stroke, StrokeKind, StrokeState};
use squall::geom::Camera;
use squall::render::recording::RecordingContext;

const SEED: u64 = 0x13371337;

fn camera() -> Camera {
	Camera::new(Vec2::ZERO, vec2(1000.0, 1000.0))
}

fn record(kind: StrokeKind, y: f32, life_time: Option<f64>) -> WireStroke {
	WireStroke {
		kind,
		points: (0..4)
			.map(|i| WirePoint {
				x: 100.0 + 60.0 * i as f32,
				y,
			})
			.collect(),
		creation_time: 0.0,
		life_time,
	}
}

#[test]
fn wind_stroke_dies_once_drained() {
	let mut canvas = Canvas::new(EngineConfig::default(), SEED);
	let mut ctx = RecordingContext::default();
	let camera = camera();
	canvas.apply(ServerEvent::NewStroke(record(StrokeKind::Wind, 300.0, Some(800.0))));

	let mut now = 0.0;
	let mut peak = 0;
	while now < 800.0 {
		canvas.frame(&mut ctx, &camera, now);
		if let Some(Effect::Wind(wind)) = canvas.strokes()[0].effect() {
			peak = peak.max(wind.len());
		}
		now += 16.0;
	}
	assert!(peak > 0);
	assert_eq!(canvas.len(), 1);

	for _ in 0..peak + 1 {
		canvas.frame(&mut ctx, &camera, now);
		now += 16.0;
	}
	assert!(canvas.is_empty());
}

#[test]
fn dirt_under_cloud_only_gets_wetter() {
	let mut canvas = Canvas::new(EngineConfig::default(), SEED);
	let mut ctx = RecordingContext::default();
	let camera = camera();
	canvas.apply(ServerEvent::ReceiveStrokes(vec![
		record(StrokeKind::Dirt, 400.0, None),
		record(StrokeKind::Cloud, 250.0, None),
		record(StrokeKind::Wind, 320.0, None),
	]));

	let mut previous: Vec<f32> = Vec::new();
	for frame in 0..400 {
		canvas.frame(&mut ctx, &camera, frame as f64 * 16.0);
		let Some(Effect::Dirt(dirt)) = canvas.strokes()[0].effect() else {
			panic!("dirt stroke lost its effect");
		};
		let wetness: Vec<f32> = dirt.ground().iter().map(|ground| ground.wetness).collect();
		for (before, after) in previous.iter().zip(&wetness) {
			assert!(after >= before, "wetness fell from {before} to {after}");
		}
		previous = wetness;
	}
	assert!(previous.iter().all(|wetness| *wetness > 0.0));
}

#[test]
fn committed_stroke_round_trips_through_json() {
	let mut canvas = Canvas::new(EngineConfig::default(), SEED);
	let mut ctx = RecordingContext::default();
	let camera = Camera::new(vec2(-250.0, -40.0), vec2(800.0, 600.0));
	let drawn = [vec2(10.0, 10.0), vec2(70.0, 30.0), vec2(130.0, 10.0)];

	let sent = canvas
		.commit(&drawn, StrokeKind::Birds, &camera, 1234.0, &mut ctx)
		.unwrap();
	let json = sent.to_json().unwrap();
	let received = Stroke::try_from(WireStroke::from_json(&json).unwrap()).unwrap();

	let local = &canvas.strokes()[0];
	assert_eq!(received.kind(), local.kind());
	assert_eq!(received.points().len(), local.points().len());
	for (a, b) in received.points().iter().zip(local.points()) {
		assert_eq!(a, b);
	}
	assert_eq!(received.points()[0], vec2(260.0, 50.0));
	assert_eq!(received.life_time(), local.life_time());
	assert_eq!(received.state(), StrokeState::Uninitialized);
}

#[test]
fn flock_survives_long_runs() {
	let mut canvas = Canvas::new(EngineConfig::default(), SEED);
	let mut ctx = RecordingContext::default();
	let camera = camera();
	canvas.apply(ServerEvent::NewStroke(record(StrokeKind::Birds, 500.0, None)));
	for frame in 0..1000 {
		ctx.clear();
		canvas.frame(&mut ctx, &camera, frame as f64 * 16.0);
	}
	let Some(Effect::Birds(birds)) = canvas.strokes()[0].effect() else {
		panic!("birds stroke lost its effect");
	};
	assert_eq!(birds.flock().len(), 12);
	for boid in birds.flock().iter() {
		assert!(boid.position.is_finite());
		assert!(boid.direction.is_finite());
	}
}
