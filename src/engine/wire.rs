//! The JSON records and events exchanged with the stroke relay.
//!
//! A stroke travels as
//! `{"type": "cloud", "points": [{"x": 1, "y": 2}], "creationTime": 0, "lifeTime": null}`
//! and events as `{"event": "newStroke", "data": <record>}`.

use super::{Stroke, StrokeKind};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WireError {
	#[error("`{kind}` stroke has no points")]
	EmptyPoints { kind: StrokeKind },

	#[error("`{kind}` stroke has a non-finite point at index {index}")]
	NonFinitePoint { kind: StrokeKind, index: usize },

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

static_assertions::assert_impl_all!(WireError: std::error::Error, Send, Sync);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
	pub x: f32,
	pub y: f32,
}

impl From<Vec2> for WirePoint {
	fn from(value: Vec2) -> Self {
		Self {
			x: value.x,
			y: value.y,
		}
	}
}

impl From<WirePoint> for Vec2 {
	fn from(value: WirePoint) -> Self {
		Vec2::new(value.x, value.y)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStroke {
	#[serde(rename = "type")]
	pub kind: StrokeKind,
	pub points: Vec<WirePoint>,
	/// Milliseconds since the epoch.
	pub creation_time: f64,
	#[serde(default)]
	pub life_time: Option<f64>,
}

impl WireStroke {
	/// Checks the record can become a [`Stroke`].
	///
	/// Unknown kinds and single-point strokes are accepted; they just never
	/// draw anything.
	pub fn validate(&self) -> Result<(), WireError> {
		if self.kind.needs_sampling() && self.points.is_empty() {
			return Err(WireError::EmptyPoints {
				kind: self.kind.clone(),
			});
		}
		if let Some(index) = self
			.points
			.iter()
			.position(|point| !(point.x.is_finite() && point.y.is_finite()))
		{
			return Err(WireError::NonFinitePoint {
				kind: self.kind.clone(),
				index,
			});
		}
		Ok(())
	}

	pub fn to_json(&self) -> Result<String, WireError> {
		Ok(serde_json::to_string(self)?)
	}

	pub fn from_json(json: &str) -> Result<Self, WireError> {
		Ok(serde_json::from_str(json)?)
	}
}

impl From<&Stroke> for WireStroke {
	fn from(stroke: &Stroke) -> Self {
		Self {
			kind: stroke.kind().clone(),
			points: stroke.points().iter().copied().map(WirePoint::from).collect(),
			creation_time: stroke.creation_time(),
			life_time: stroke.life_time(),
		}
	}
}

impl TryFrom<WireStroke> for Stroke {
	type Error = WireError;

	fn try_from(record: WireStroke) -> Result<Self, Self::Error> {
		record.validate()?;
		Ok(Stroke::new(record.kind, record.points.into_iter().map(Vec2::from))
			.created_at(record.creation_time)
			.with_life_time(record.life_time))
	}
}

/// Events the relay sends to a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
	/// The authoritative stroke list; replaces everything held locally.
	ReceiveStrokes(Vec<WireStroke>),
	NewStroke(WireStroke),
}

/// Events a client sends to the relay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
	GetStrokes,
	CommitBuffer(WireStroke),
}

impl ServerEvent {
	pub fn from_json(json: &str) -> Result<Self, WireError> {
		Ok(serde_json::from_str(json)?)
	}
}

impl ClientEvent {
	pub fn to_json(&self) -> Result<String, WireError> {
		Ok(serde_json::to_string(self)?)
	}
}
