//! Linear sampling over user-drawn polylines.
//!
//! A fraction `f` is mapped to `f * len` (not `f * (len - 1)`) and the lower
//! segment index is clamped to `len - 2`, so fractions near 1 re-walk the last
//! segment. Every effect generator seeds from these samples, keep it this way.

use glam::Vec2;
use itertools::Itertools;
use ordered_float::OrderedFloat;

/// Segment index and interpolation parameter for `fraction` over `len` points.
///
/// Requires `len >= 2`.
pub fn sample_index(len: usize, fraction: f32) -> (usize, f32) {
	debug_assert!(len >= 2);
	let position = fraction * len as f32;
	let index = (position.floor() as usize).min(len - 2);
	(index, position.fract())
}

pub fn sample_at(points: &[Vec2], fraction: f32) -> Option<Vec2> {
	if points.len() < 2 {
		return None;
	}
	let (index, t) = sample_index(points.len(), fraction);
	Some(points[index].lerp(points[index + 1], t))
}

/// `count` samples at fractions `i / count`, so fraction 1 is never visited.
pub fn resample(points: &[Vec2], count: usize) -> Vec<Vec2> {
	if points.len() < 2 {
		return Vec::new();
	}
	(0..count)
		.filter_map(|i| sample_at(points, i as f32 / count as f32))
		.collect()
}

/// Unit tangent of each segment, with the last one repeated so the result has
/// one entry per point. Zero-length segments yield `Vec2::ZERO`.
pub fn directions_along(points: &[Vec2]) -> Vec<Vec2> {
	if points.len() < 2 {
		return vec![Vec2::ZERO; points.len()];
	}
	let mut directions: Vec<Vec2> = points
		.iter()
		.tuple_windows()
		.map(|(a, b)| (*b - *a).normalize_or_zero())
		.collect();
	directions.push(directions[directions.len() - 1]);
	directions
}

pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
	let ab = b - a;
	let length_squared = ab.length_squared();
	if length_squared == 0.0 {
		return point.distance(a);
	}
	let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
	point.distance(a + ab * t)
}

/// Index and unit tangent of the segment closest to `point`.
pub fn nearest_segment(points: &[Vec2], point: Vec2) -> Option<(usize, Vec2)> {
	points
		.iter()
		.tuple_windows()
		.enumerate()
		.min_by_key(|(_, (a, b))| OrderedFloat(distance_to_segment(point, **a, **b)))
		.map(|(index, (a, b))| (index, (*b - *a).normalize_or_zero()))
}

/// Back-out easing: 0 at `x = 0`, 1 at `x = 1`, overshooting in between.
pub fn ease_back(x: f32, overshoot: f32) -> f32 {
	let u = x - 1.0;
	1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
}

/// Uniform value in `[-1, 1)`.
pub fn signed_unit(rng: &mut fastrand::Rng) -> f32 {
	rng.f32() * 2.0 - 1.0
}

pub fn jitter(rng: &mut fastrand::Rng, radius: f32) -> Vec2 {
	Vec2::new(signed_unit(rng), signed_unit(rng)) * radius
}
