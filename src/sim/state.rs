//! Field state
//!
//! [`Field`] owns every entity of the arcade field. Formation cells and
//! barriers live in index-stable arrays; live shots are an unordered list
//! with swap-removal.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::audio::{AudioIntent, AudioQueue, Sound};
use super::clock::{Clock, SystemClock};
use super::entity::{Barrier, Entity, Origin, Projectile};
use super::formation::Formation;
use super::player::Player;
use super::spawner::Spawner;
use super::sprite::SpriteLookup;
use super::ufo::{Ufo, UfoState};
use crate::error::ConfigError;
use crate::settings::FieldConfig;

/// Sheet objects for formation rows, top row first
pub const ROW_OBJECTS: [&str; 6] = ["intr_5", "intr_4", "intr_3", "intr_2", "intr_1", "intr_0"];
/// Sheet objects for the projectile variants
pub const PROJECTILE_OBJECTS: [&str; 4] =
    ["projectile_0", "projectile_1", "projectile_2", "projectile_3"];

/// Outcome of the per-tick round reset sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundReset {
    /// Round continues
    None,
    /// Player ran out of lives; score was zeroed
    PlayerDied,
    /// Every cell destroyed; score kept
    FormationCleared,
}

/// The arcade field
pub struct Field<C: Clock = SystemClock> {
    pub(crate) config: FieldConfig,
    pub(crate) clock: C,
    pub(crate) formation: Formation,
    pub(crate) spawner: Spawner,
    /// Projectile variants, copied into `shots` when fired
    pub(crate) templates: Vec<Entity>,
    pub(crate) shots: Vec<Projectile>,
    pub(crate) barriers: Vec<Barrier>,
    pub(crate) player: Player,
    pub(crate) ufo: Ufo,
    pub(crate) audio: AudioQueue,
    pub(crate) score: u64,
}

impl<C: Clock> Field<C> {
    /// Build a fresh round.
    ///
    /// Sprite names missing from `lookup` are logged and produce inert
    /// entities; only an invalid config is an error.
    pub fn new(config: FieldConfig, lookup: &impl SpriteLookup, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let now = clock.now();
        let scale = config.default_scale;

        let rows: Vec<Entity> = ROW_OBJECTS
            .iter()
            .map(|name| Entity::bind(lookup, name, "move", Vec2::ZERO, scale))
            .collect();
        let formation = Formation::new(&config, &rows, now);

        let templates: Vec<Entity> = PROJECTILE_OBJECTS
            .iter()
            .map(|name| Entity::bind(lookup, name, "move", Vec2::ZERO, scale))
            .collect();

        let ufo = Ufo::new(Entity::bind(lookup, "ufo", "move", Vec2::ZERO, scale), &config, now);

        let player = Player::new(
            Entity::bind(lookup, "player", "idle", config.player_start, config.player_scale),
            config.player_lives,
        );

        let barrier_body = Entity::bind(lookup, "defense", "idle", Vec2::ZERO, scale);
        let barriers = (0..config.barrier_count)
            .map(|i| {
                let mut body = barrier_body.clone();
                body.pos = config.barrier_start + Vec2::new(i as f32 * config.barrier_spacing, 0.0);
                Barrier { body, hits: 0 }
            })
            .collect();

        log::info!(
            "Field ready: {}x{} formation, {} barriers",
            config.formation_width,
            config.formation_height,
            config.barrier_count
        );

        Ok(Self {
            spawner: Spawner::new(Duration::from_millis(config.spawn_period_ms), now),
            config,
            clock,
            formation,
            templates,
            shots: Vec::new(),
            barriers,
            player,
            ufo,
            audio: AudioQueue::new(),
            score: 0,
        })
    }

    // === Read-only accessors ===

    pub fn current_score(&self) -> u64 {
        self.score
    }

    pub fn player_alive(&self) -> bool {
        self.player.is_alive()
    }

    pub fn player_lives(&self) -> u32 {
        self.player.lives
    }

    pub fn any_intruders(&self) -> bool {
        self.formation.any_alive()
    }

    pub fn ufo_state(&self) -> UfoState {
        self.ufo.state()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn shots(&self) -> &[Projectile] {
        &self.shots
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.barriers
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ufo(&self) -> &Ufo {
        &self.ufo
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Audio intents queued since the last drain
    pub fn pending_audio(&self) -> &[AudioIntent] {
        self.audio.pending()
    }

    // === Direct manipulation (debug tools, scripted scenarios) ===

    pub fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn barriers_mut(&mut self) -> &mut [Barrier] {
        &mut self.barriers
    }

    /// Put a shot on the field using projectile variant `variant`
    pub fn spawn_shot(&mut self, variant: usize, pos: Vec2, dir: Vec2, origin: Origin) {
        let shot = match self.templates.get(variant) {
            Some(template) => Projectile::from_template(template, pos, dir, origin),
            None => Projectile {
                body: Entity::inert(pos, self.config.default_scale),
                dir,
                origin,
            },
        };
        self.shots.push(shot);
    }

    /// Remove a shot in O(1); the last shot takes its slot
    pub(crate) fn remove_shot(&mut self, idx: usize) {
        self.shots.swap_remove(idx);
    }

    /// Start a new round if the player is out of lives or the formation is
    /// gone. A dead player also loses the score.
    pub fn reset_round(&mut self) -> RoundReset {
        let player_dead = !self.player.is_alive();
        if !player_dead && self.formation.any_alive() {
            return RoundReset::None;
        }

        let outcome = if player_dead {
            self.score = 0;
            RoundReset::PlayerDied
        } else {
            RoundReset::FormationCleared
        };

        self.ufo.hide(&mut self.audio);
        self.formation.revive_all();
        self.player.lives = self.config.player_lives;
        self.shots.clear();
        for barrier in &mut self.barriers {
            barrier.hits = 0;
        }

        log::info!("Round reset ({:?}), score {}", outcome, self.score);
        outcome
    }

    pub(crate) fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn queue_laser(&mut self) {
        self.audio.play(Sound::Laser);
    }
}
