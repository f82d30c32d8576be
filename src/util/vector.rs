//! Plane vector helpers layered over [`glam::Vec2`].
//!
//! `Vec2` already provides the value arithmetic (`+`, `-`, `* s`, `length`,
//! `distance`, `dot`, `==`). What lives here is the heading arithmetic the
//! flock and the effects share: headings are kept as angles and rotated by a
//! delta, then turned back into unit vectors, rather than renormalising a
//! blend of two nearly opposite influences.

use core::f32;
use glam::Vec2;

pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
	(a + b) * 0.5
}

/// Angle of `direction` in radians, measured from +x toward +y.
pub fn heading(direction: Vec2) -> f32 {
	direction.to_angle()
}

/// Unit vector pointing along `angle` (the inverse of [`heading`]).
pub fn from_heading(angle: f32) -> Vec2 {
	Vec2::from_angle(angle)
}

pub fn wrap_angle(theta: f32) -> f32 {
	(theta + f32::consts::PI).rem_euclid(f32::consts::TAU) - f32::consts::PI
}

/// Signed angle that rotates `from` onto `to`, in `[-π, π)`.
pub fn relative_angle(from: f32, to: f32) -> f32 {
	wrap_angle(to - from)
}

/// Maps a cosine similarity in `[-1, 1]` onto `[-180, 0]`.
///
/// This is a monotonic remapping rather than a true angle. Field of view
/// thresholds are compared against it as-is.
pub fn dot_to_angle(dot: f32) -> f32 {
	let fac = (dot + 1.0) / 2.0;
	fac * 180.0 - 180.0
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide.
pub fn try_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
	(to - from).try_normalize()
}

/// In-place `target += delta * scale` for the per-entity push loops.
pub fn accumulate(target: &mut Vec2, delta: Vec2, scale: f32) {
	*target += delta * scale;
}
