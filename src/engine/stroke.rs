//! Strokes and their lifecycle.
//!
//! A stroke starts out as a bare polyline. The first time it is drawn it seeds
//! the effect its kind selects (clouds, dirt, wind or birds); from then on each
//! draw advances and paints that effect until it reports itself dead.

use super::{BirdsEffect, CloudEffect, DirtEffect, EngineConfig, Environment, WindEffect};
use crate::geom::Camera;
use crate::render::DrawContext;
use derive_more::Display;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StrokeKind {
	#[display("cloud")]
	Cloud,
	#[display("dirt")]
	Dirt,
	#[display("wind")]
	Wind,
	#[display("birds")]
	Birds,
	/// Still accepted on the wire but never drawn.
	#[display("mushroom")]
	Mushroom,
	#[display("flower")]
	Flower,
	#[display("{_0}")]
	Other(String),
}

impl From<String> for StrokeKind {
	fn from(value: String) -> Self {
		match value.as_str() {
			"cloud" => Self::Cloud,
			"dirt" => Self::Dirt,
			"wind" => Self::Wind,
			"birds" => Self::Birds,
			"mushroom" => Self::Mushroom,
			"flower" => Self::Flower,
			_ => Self::Other(value),
		}
	}
}

impl From<StrokeKind> for String {
	fn from(value: StrokeKind) -> Self {
		value.to_string()
	}
}

impl StrokeKind {
	/// Kinds a session can be assigned.
	pub const ACTIVE: [StrokeKind; 4] = [Self::Cloud, Self::Dirt, Self::Wind, Self::Birds];

	/// Picks the session's kind from a seed in `[0, 1)`.
	pub fn from_seed(seed: f64) -> Self {
		let index = ((seed * 100.0).round() as i64 + 7879).rem_euclid(Self::ACTIVE.len() as i64);
		Self::ACTIVE[index as usize].clone()
	}

	/// Whether strokes of this kind are built by sampling their points.
	pub fn needs_sampling(&self) -> bool {
		matches!(self, Self::Cloud | Self::Dirt | Self::Wind | Self::Birds)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeState {
	Uninitialized,
	Alive,
	Dead,
}

/// Everything a generator may read or draw from while advancing one stroke.
pub struct Frame<'a> {
	pub camera: &'a Camera,
	pub environment: &'a Environment,
	pub config: &'a EngineConfig,
	pub rng: &'a mut fastrand::Rng,
	/// Simulation clock in milliseconds.
	pub now: f64,
}

/// Per-draw view of the stroke that owns an effect.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tick<'a> {
	pub points: &'a [Vec2],
	pub time: u64,
	pub age: f64,
	pub life_time: Option<f64>,
}

impl Tick<'_> {
	/// A missing lifetime never expires.
	pub fn expired(&self) -> bool {
		self.life_time.is_some_and(|life_time| self.age >= life_time)
	}
}

pub(crate) trait Generator: Sized {
	fn lifetime(config: &EngineConfig) -> f64;

	/// Builds the initial state from a polyline of at least two points.
	fn seed(points: &[Vec2], frame: &mut Frame) -> Self;

	/// Advances one frame and draws. Returns `false` once the effect is gone.
	fn step(&mut self, tick: &Tick, frame: &mut Frame, ctx: &mut dyn DrawContext) -> bool;
}

#[derive(Clone, Debug)]
pub enum Effect {
	Cloud(CloudEffect),
	Dirt(DirtEffect),
	Wind(WindEffect),
	Birds(BirdsEffect),
}

impl Effect {
	fn seed(kind: &StrokeKind, points: &[Vec2], frame: &mut Frame) -> Option<(Self, f64)> {
		let config = frame.config;
		Some(match kind {
			StrokeKind::Cloud => (
				Self::Cloud(CloudEffect::seed(points, frame)),
				CloudEffect::lifetime(config),
			),
			StrokeKind::Dirt => (
				Self::Dirt(DirtEffect::seed(points, frame)),
				DirtEffect::lifetime(config),
			),
			StrokeKind::Wind => (
				Self::Wind(WindEffect::seed(points, frame)),
				WindEffect::lifetime(config),
			),
			StrokeKind::Birds => (
				Self::Birds(BirdsEffect::seed(points, frame)),
				BirdsEffect::lifetime(config),
			),
			StrokeKind::Mushroom | StrokeKind::Flower | StrokeKind::Other(_) => return None,
		})
	}

	fn step(&mut self, tick: &Tick, frame: &mut Frame, ctx: &mut dyn DrawContext) -> bool {
		match self {
			Self::Cloud(effect) => effect.step(tick, frame, ctx),
			Self::Dirt(effect) => effect.step(tick, frame, ctx),
			Self::Wind(effect) => effect.step(tick, frame, ctx),
			Self::Birds(effect) => effect.step(tick, frame, ctx),
		}
	}
}

#[derive(Clone, Debug)]
pub struct Stroke {
	kind: StrokeKind,
	points: Vec<Vec2>,
	effect: Option<Effect>,
	time: u64,
	creation_time: f64,
	life_time: Option<f64>,
	alive: bool,
}

static_assertions::assert_impl_all!(Stroke: Send, Sync);

impl Stroke {
	pub fn new(kind: StrokeKind, points: impl IntoIterator<Item = Vec2>) -> Self {
		Self {
			kind,
			points: points.into_iter().collect(),
			effect: None,
			time: 0,
			creation_time: 0.0,
			life_time: None,
			alive: true,
		}
	}

	pub fn created_at(mut self, creation_time: f64) -> Self {
		self.creation_time = creation_time;
		self
	}

	/// Overrides the lifetime the effect would otherwise pick on first draw.
	pub fn with_life_time(mut self, life_time: Option<f64>) -> Self {
		self.life_time = life_time;
		self
	}

	pub fn kind(&self) -> &StrokeKind {
		&self.kind
	}

	pub fn points(&self) -> &[Vec2] {
		&self.points
	}

	pub fn effect(&self) -> Option<&Effect> {
		self.effect.as_ref()
	}

	pub fn time(&self) -> u64 {
		self.time
	}

	pub fn creation_time(&self) -> f64 {
		self.creation_time
	}

	pub fn life_time(&self) -> Option<f64> {
		self.life_time
	}

	pub fn is_alive(&self) -> bool {
		self.alive
	}

	pub fn state(&self) -> StrokeState {
		match (self.alive, &self.effect) {
			(false, _) => StrokeState::Dead,
			(true, None) => StrokeState::Uninitialized,
			(true, Some(_)) => StrokeState::Alive,
		}
	}

	/// Extends the polyline. Refused once the effect has been seeded from it.
	pub fn push_point(&mut self, point: Vec2) -> bool {
		if self.effect.is_some() {
			return false;
		}
		self.points.push(point);
		true
	}

	pub fn advance_time(&mut self) {
		self.time += 1;
	}

	pub fn age(&self, now: f64) -> f64 {
		now - self.creation_time
	}

	pub fn is_expired(&self, now: f64) -> bool {
		self.life_time.is_some_and(|life_time| self.age(now) >= life_time)
	}

	/// Seeds the effect if needed, then advances and draws it for one frame.
	///
	/// Strokes with fewer than two points, and kinds without an effect, draw
	/// nothing and stay uninitialized.
	pub fn draw(&mut self, frame: &mut Frame, ctx: &mut dyn DrawContext) {
		if !self.alive || self.points.len() < 2 {
			return;
		}

		if self.effect.is_none() {
			let Some((effect, life_time)) = Effect::seed(&self.kind, &self.points, frame) else {
				return;
			};
			self.life_time.get_or_insert(life_time);
			self.effect = Some(effect);
			tracing::debug!(kind = %self.kind, points = self.points.len(), "stroke initialized");
		}

		let tick = Tick {
			points: &self.points,
			time: self.time,
			age: self.age(frame.now),
			life_time: self.life_time,
		};
		let Some(effect) = self.effect.as_mut() else {
			return;
		};
		if !effect.step(&tick, frame, ctx) {
			self.alive = false;
			tracing::debug!(kind = %self.kind, time = self.time, "stroke died");
		}
	}
}
