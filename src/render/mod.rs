//! The drawing surface the engine paints through.
//!
//! Effects never talk to a concrete canvas. They issue immediate-mode calls on
//! a [`DrawContext`] in view coordinates; the host decides what those calls
//! turn into (a browser 2D context, a raster, or a [`recording::RecordingContext`]).

pub mod recording;

use crate::geom::AABox;
use csscolorparser::Color;
use glam::{vec2, Affine2, Vec2};
use thiserror::Error;

pub trait DrawContext {
	fn set_fill_style(&mut self, color: &Color);
	fn set_stroke_style(&mut self, color: &Color, line_width: f32);
	fn begin_path(&mut self);
	fn move_to(&mut self, point: Vec2);
	fn line_to(&mut self, point: Vec2);
	fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32);
	fn fill(&mut self);
	fn stroke(&mut self);
	/// Multiplies `transform` onto the current transform.
	fn push_transform(&mut self, transform: Affine2);
	fn reset_transform(&mut self);
}

pub fn fill_circle<C: DrawContext + ?Sized>(ctx: &mut C, center: Vec2, radius: f32) {
	ctx.begin_path();
	ctx.arc(center, radius, 0.0, std::f32::consts::TAU);
	ctx.fill();
}

pub fn fill_rect<C: DrawContext + ?Sized>(ctx: &mut C, rect: AABox) {
	let (min, max) = (rect.min(), rect.max());
	ctx.begin_path();
	ctx.move_to(min);
	ctx.line_to(vec2(max.x, min.y));
	ctx.line_to(max);
	ctx.line_to(vec2(min.x, max.y));
	ctx.fill();
}

pub fn stroke_line<C: DrawContext + ?Sized>(ctx: &mut C, from: Vec2, to: Vec2) {
	ctx.begin_path();
	ctx.move_to(from);
	ctx.line_to(to);
	ctx.stroke();
}

/// Linear blend in 8-bit RGBA.
pub fn mix(a: &Color, b: &Color, t: f32) -> Color {
	let t = t.clamp(0.0, 1.0);
	let (a, b) = (a.to_rgba8(), b.to_rgba8());
	let channel = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
	Color::from_rgba8(channel(0), channel(1), channel(2), channel(3))
}

#[derive(Debug, Error)]
pub enum PaletteError {
	#[error("unknown palette entry `{0}`")]
	UnknownEntry(String),

	#[error("invalid colour for `{entry}`: {source}")]
	InvalidColor {
		entry: String,
		#[source]
		source: csscolorparser::ParseColorError,
	},
}

static_assertions::assert_impl_all!(PaletteError: std::error::Error, Send, Sync);

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub background: Color,
	pub cloud: Color,
	pub rain: Color,
	pub dirt_dry: Color,
	pub dirt_wet: Color,
	pub grass: Color,
	pub wind: Color,
	pub birds: Color,
	pub preview: Color,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			background: Color::from_rgba8(0xdf, 0xdf, 0xdf, 0xff),
			cloud: Color::from_rgba8(0x58, 0x58, 0x58, 0xff),
			rain: Color::from_rgba8(0x4a, 0xcd, 0xff, 0xff),
			dirt_dry: Color::from_rgba8(0x8a, 0x42, 0x00, 0xff),
			dirt_wet: Color::from_rgba8(0x4a, 0x24, 0x00, 0xff),
			grass: Color::from_rgba8(0x3f, 0x9b, 0x2c, 0xff),
			wind: Color::from_rgba8(0xf4, 0xf4, 0xf4, 0xc0),
			birds: Color::from_rgba8(0x22, 0x22, 0x2a, 0xff),
			preview: Color::from_rgba8(0xff, 0x00, 0x00, 0xff),
		}
	}
}

impl Palette {
	/// Overrides entries from `(name, css colour)` pairs, e.g. `("rain", "#4acdff")`.
	pub fn from_css<'a>(
		entries: impl IntoIterator<Item = (&'a str, &'a str)>,
	) -> Result<Self, PaletteError> {
		let mut palette = Self::default();
		for (entry, css) in entries {
			let color = csscolorparser::parse(css).map_err(|source| PaletteError::InvalidColor {
				entry: entry.to_owned(),
				source,
			})?;
			*palette.entry_mut(entry)? = color;
		}
		Ok(palette)
	}

	fn entry_mut(&mut self, entry: &str) -> Result<&mut Color, PaletteError> {
		Ok(match entry {
			"background" => &mut self.background,
			"cloud" => &mut self.cloud,
			"rain" => &mut self.rain,
			"dirt_dry" => &mut self.dirt_dry,
			"dirt_wet" => &mut self.dirt_wet,
			"grass" => &mut self.grass,
			"wind" => &mut self.wind,
			"birds" => &mut self.birds,
			"preview" => &mut self.preview,
			_ => return Err(PaletteError::UnknownEntry(entry.to_owned())),
		})
	}
}
