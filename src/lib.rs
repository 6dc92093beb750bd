//! Space Intruders - arcade-field simulation core
//!
//! Core modules:
//! - `sim`: Deterministic field simulation (formation, actors, spawning, collisions)
//! - `settings`: Runtime field configuration
//! - `error`: Setup and configuration errors
//!
//! Rendering, audio playback, asset import and device mapping are owned by the
//! caller. The simulation hands out entity snapshots and audio intents.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SetupError};
pub use settings::FieldConfig;

use glam::Vec2;

/// Field configuration constants
pub mod consts {
    /// Playfield half width (field spans [-400, 400] horizontally)
    pub const FIELD_HALF_WIDTH: f32 = 400.0;

    /// Formation grid shape
    pub const FORMATION_WIDTH: usize = 10;
    pub const FORMATION_HEIGHT: usize = 6;
    /// Largest formation a config may ask for
    pub const MAX_FORMATION_CELLS: usize = 4096;
    /// Top-left cell position
    pub const FORMATION_START: (f32, f32) = (-350.0, 200.0);
    /// Cell pitch (x: 800/20, y: 600/10)
    pub const FORMATION_PITCH: (f32, f32) = (40.0, 60.0);
    /// Horizontal distance covered by one formation step
    pub const FORMATION_STEP_X: f32 = 40.0;
    /// Inner margin from the field edge that triggers a direction flip (800/10)
    pub const FORMATION_EDGE_MARGIN: f32 = 80.0;
    /// Formation step period (ms)
    pub const FORMATION_STEP_MS: u64 = 1000;

    /// Formation return-fire period (ms)
    pub const SPAWN_PERIOD_MS: u64 = 1642;

    /// Bonus target ("UFO") timings and path
    pub const UFO_PERIOD_MS: u64 = 5000;
    pub const UFO_SPEED: f32 = 150.0;
    pub const UFO_SPAWN_X: f32 = 450.0;
    pub const UFO_EXIT_X: f32 = 500.0;
    pub const UFO_Y: f32 = 250.0;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (-400.0, -250.0);
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_BOUND: f32 = 390.0;
    pub const PLAYER_SCALE: f32 = 2000.0;
    pub const PLAYER_LIVES: u32 = 3;

    /// Projectile defaults
    pub const SHOT_SPEED: f32 = 400.0;
    pub const SHOT_TOP_BOUND: f32 = 320.0;
    pub const SHOT_BOTTOM_BOUND: f32 = -320.0;

    /// Defense barriers
    pub const BARRIER_COUNT: usize = 6;
    pub const BARRIER_START: (f32, f32) = (-300.0, -200.0);
    pub const BARRIER_SPACING: f32 = 800.0 / 7.0;
    /// Hits after which a barrier stops absorbing shots
    pub const BARRIER_MAX_HITS: u32 = 3;
    /// Largest barrier row a config may ask for
    pub const MAX_BARRIERS: usize = 256;

    /// Score awards
    pub const SCORE_UFO: u64 = 200;
    pub const SCORE_INTRUDER: u64 = 50;

    /// Render scale applied to normalized sprite rects
    pub const DEFAULT_SCALE: f32 = 3000.0;
}

/// Build a `Vec2` from a `(x, y)` constant pair
#[inline]
pub fn vec2_of(pair: (f32, f32)) -> Vec2 {
    Vec2::new(pair.0, pair.1)
}
