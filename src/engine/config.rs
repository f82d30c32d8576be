//! Tunables for the effect generators.
//!
//! Every struct has a builder whose defaults are the values `Default` returns,
//! so a host only spells out what it wants to change:
//!
//! ```
//! let config = squall::engine::EngineConfig::builder()
//! 	.cloud(squall::engine::CloudConfig::builder().max_rain(40).build())
//! 	.build();
//! assert_eq!(config.cloud.max_rain, 40);
//! ```

use crate::render::Palette;
use bon::Builder;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq, Builder)]
pub struct CloudConfig {
	#[builder(default = 100)]
	pub max_clouds: usize,
	#[builder(default = 5)]
	pub clouds_per_point: usize,
	/// Spread of micro-points around each cloud centre.
	#[builder(default = 10.0)]
	pub cloud_radius: f32,
	#[builder(default = 20)]
	pub micropoint_max: usize,
	#[builder(default = 10.0)]
	pub micropoint_radius: f32,
	#[builder(default = 0.05)]
	pub wiggle_speed: f32,
	#[builder(default = 1)]
	pub rain_per_frame: usize,
	#[builder(default = 100)]
	pub max_rain: usize,
	#[builder(default = Vec2::new(-0.1, 1.0))]
	pub rain_direction: Vec2,
	#[builder(default = 20.0)]
	pub rain_length: f32,
	/// Size factor change per frame while growing or shrinking.
	#[builder(default = 0.03)]
	pub growth_rate: f32,
	#[builder(default = 1.8)]
	pub overshoot: f32,
	#[builder(default = 20_000.0)]
	pub lifetime_ms: f64,
	#[builder(default = 60.0)]
	pub wind_radius: f32,
	#[builder(default = 0.6)]
	pub wind_push: f32,
}

impl Default for CloudConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Clone, Debug, PartialEq, Builder)]
pub struct DirtConfig {
	#[builder(default = 50)]
	pub max_dirt: usize,
	#[builder(default = 4)]
	pub dirt_per_point: usize,
	#[builder(default = 20.0)]
	pub dirt_radius: f32,
	#[builder(default = 0.1)]
	pub pop_rate: f32,
	#[builder(default = 0.01)]
	pub decay_rate: f32,
	#[builder(default = 30_000.0)]
	pub lifetime_ms: f64,
	/// How far below a cloud point a ground point still gets rained on.
	#[builder(default = 250.0)]
	pub rain_height: f32,
	#[builder(default = 0.01)]
	pub wet_rate: f32,
	#[builder(default = 2)]
	pub grass_per_point: usize,
	#[builder(default = 15.0)]
	pub grass_spread: f32,
	#[builder(default = 24.0)]
	pub grass_height: f32,
	#[builder(default = 0.2)]
	pub grass_growth: f32,
	#[builder(default = 0.4)]
	pub grass_wither: f32,
	#[builder(default = 0.05)]
	pub sway_speed: f32,
}

impl Default for DirtConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Clone, Debug, PartialEq, Builder)]
pub struct WindConfig {
	#[builder(default = 120)]
	pub max_particles: usize,
	/// Ticks between spawns.
	#[builder(default = 2)]
	pub spawn_interval: u64,
	#[builder(default = 3.0)]
	pub particle_speed: f32,
	/// How strongly a particle turns toward the local tangent each tick.
	#[builder(default = 0.15)]
	pub steer: f32,
	#[builder(default = 12.0)]
	pub trail_length: f32,
	#[builder(default = 10_000.0)]
	pub lifetime_ms: f64,
}

impl Default for WindConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Clone, Debug, PartialEq, Builder)]
pub struct BirdsConfig {
	#[builder(default = 40)]
	pub max_birds: usize,
	#[builder(default = 3)]
	pub birds_per_point: usize,
	#[builder(default = 25_000.0)]
	pub lifetime_ms: f64,
	#[builder(default = 6.0)]
	pub size: f32,
}

impl Default for BirdsConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Clone, Debug, PartialEq, Builder)]
pub struct FlockConfig {
	#[builder(default = 1000.0)]
	pub vision_radius: f32,
	#[builder(default = 20.0)]
	pub avoid_radius: f32,
	/// Largest avoidance turn per tick, in radians.
	///
	/// The turn is a relative bearing scaled by closeness, so this is tuned
	/// well above the original game's 0.01 to keep neighbours from overlapping.
	#[builder(default = 0.25)]
	pub avoid_speed: f32,
	#[builder(default = 1.5)]
	pub travel_speed: f32,
	/// Full field of view, in degrees.
	#[builder(default = 50.0)]
	pub fov: f32,
	#[builder(default = 0.01)]
	pub center_influence: f32,
}

impl Default for FlockConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Clone, Debug, PartialEq, Builder)]
pub struct GestureConfig {
	/// A drag sample is kept only if it is farther than this from the last one.
	#[builder(default = 50.0)]
	pub min_spacing: f32,
	#[builder(default = 5.0)]
	pub preview_radius: f32,
	#[builder(default = 2.0)]
	pub preview_width: f32,
}

impl Default for GestureConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Clone, Debug, PartialEq, Builder)]
pub struct EngineConfig {
	#[builder(default)]
	pub cloud: CloudConfig,
	#[builder(default)]
	pub dirt: DirtConfig,
	#[builder(default)]
	pub wind: WindConfig,
	#[builder(default)]
	pub birds: BirdsConfig,
	#[builder(default)]
	pub flock: FlockConfig,
	#[builder(default)]
	pub gesture: GestureConfig,
	#[builder(default)]
	pub palette: Palette,
	#[builder(default = Vec2::new(5000.0, 5000.0))]
	pub world_size: Vec2,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}
