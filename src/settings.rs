//! Field configuration
//!
//! Every tunable of the arcade field. Defaults mirror [`crate::consts`]; a JSON
//! file can override any subset of keys.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::vec2_of;

/// Runtime field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    // === Playfield ===
    pub field_half_width: f32,

    // === Formation ===
    pub formation_width: usize,
    pub formation_height: usize,
    /// Position of cell (0, 0), the top-left one
    pub formation_start: Vec2,
    /// Distance between neighbouring cells (y grows downward in rows)
    pub formation_pitch: Vec2,
    pub formation_step_x: f32,
    pub formation_edge_margin: f32,
    pub formation_step_ms: u64,

    // === Return fire ===
    pub spawn_period_ms: u64,

    // === Bonus target ===
    pub ufo_period_ms: u64,
    pub ufo_speed: f32,
    pub ufo_spawn_x: f32,
    pub ufo_exit_x: f32,
    pub ufo_y: f32,

    // === Player ===
    pub player_start: Vec2,
    pub player_speed: f32,
    pub player_bound: f32,
    pub player_scale: f32,
    pub player_lives: u32,
    /// Minimum time between two player shots. 0 fires on every active trigger.
    pub fire_cooldown_ms: u64,

    // === Projectiles ===
    pub shot_speed: f32,
    pub shot_top_bound: f32,
    pub shot_bottom_bound: f32,
    /// Remove projectiles that fall below `shot_bottom_bound`
    pub cull_below_bottom: bool,

    // === Barriers ===
    pub barrier_count: usize,
    pub barrier_start: Vec2,
    pub barrier_spacing: f32,
    pub barrier_max_hits: u32,

    // === Scoring ===
    pub score_ufo: u64,
    pub score_intruder: u64,

    /// Scale for every entity that does not set its own
    pub default_scale: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field_half_width: FIELD_HALF_WIDTH,

            formation_width: FORMATION_WIDTH,
            formation_height: FORMATION_HEIGHT,
            formation_start: vec2_of(FORMATION_START),
            formation_pitch: vec2_of(FORMATION_PITCH),
            formation_step_x: FORMATION_STEP_X,
            formation_edge_margin: FORMATION_EDGE_MARGIN,
            formation_step_ms: FORMATION_STEP_MS,

            spawn_period_ms: SPAWN_PERIOD_MS,

            ufo_period_ms: UFO_PERIOD_MS,
            ufo_speed: UFO_SPEED,
            ufo_spawn_x: UFO_SPAWN_X,
            ufo_exit_x: UFO_EXIT_X,
            ufo_y: UFO_Y,

            player_start: vec2_of(PLAYER_START),
            player_speed: PLAYER_SPEED,
            player_bound: PLAYER_BOUND,
            player_scale: PLAYER_SCALE,
            player_lives: PLAYER_LIVES,
            fire_cooldown_ms: 0,

            shot_speed: SHOT_SPEED,
            shot_top_bound: SHOT_TOP_BOUND,
            shot_bottom_bound: SHOT_BOTTOM_BOUND,
            cull_below_bottom: true,

            barrier_count: BARRIER_COUNT,
            barrier_start: vec2_of(BARRIER_START),
            barrier_spacing: BARRIER_SPACING,
            barrier_max_hits: BARRIER_MAX_HITS,

            score_ufo: SCORE_UFO,
            score_intruder: SCORE_INTRUDER,

            default_scale: DEFAULT_SCALE,
        }
    }
}

impl FieldConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded field config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a JSON config file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default field config ({})", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if self.formation_width == 0 {
            return invalid("formation_width", "must be at least 1");
        }
        if self.formation_height == 0 {
            return invalid("formation_height", "must be at least 1");
        }
        match self.formation_width.checked_mul(self.formation_height) {
            Some(cells) if cells <= MAX_FORMATION_CELLS => {}
            _ => return invalid("formation_width", "formation has too many cells"),
        }
        if self.barrier_count > MAX_BARRIERS {
            return invalid("barrier_count", "too many barriers");
        }
        if self.formation_step_ms == 0 {
            return invalid("formation_step_ms", "must be positive");
        }
        if self.spawn_period_ms == 0 {
            return invalid("spawn_period_ms", "must be positive");
        }
        if self.ufo_period_ms == 0 {
            return invalid("ufo_period_ms", "must be positive");
        }
        if self.shot_speed <= 0.0 {
            return invalid("shot_speed", "must be positive");
        }
        if self.ufo_speed <= 0.0 {
            return invalid("ufo_speed", "must be positive");
        }
        if self.barrier_max_hits == 0 {
            return invalid("barrier_max_hits", "must be at least 1");
        }
        if self.player_lives == 0 {
            return invalid("player_lives", "must be at least 1");
        }
        if self.shot_bottom_bound >= self.shot_top_bound {
            return invalid("shot_bottom_bound", "must be below shot_top_bound");
        }
        Ok(())
    }

    /// Horizontal limit a live formation cell may reach before the grid turns
    pub fn formation_inner_bound(&self) -> f32 {
        self.field_half_width - self.formation_edge_margin
    }
}
