//! Per-frame simulation phases
//!
//! A frame runs, in order: device (sample input, player fire), logic (round
//! reset, animation, return fire), physics (movement, shot lifetime,
//! collisions), then the caller drains the audio intents.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::audio::{AudioIntent, Sound};
use super::clock::Clock;
use super::collision::{Hit, Targets, first_hit};
use super::entity::Origin;
use super::sprite::SpriteLookup;
use super::state::{Field, RoundReset};

/// Input for a single frame, already normalized by the device layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement in `[-1, 1]` per axis
    pub movement: Vec2,
    /// Fire trigger is active this frame
    pub fire: bool,
}

/// What a full frame produced
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub reset: RoundReset,
    pub audio: Vec<AudioIntent>,
}

impl<C: Clock> Field<C> {
    /// Device phase: store the movement vector and fire if the trigger is
    /// active (subject to the configured cooldown)
    pub fn on_device(&mut self, input: &TickInput) {
        self.player.advance = input.movement.clamp(Vec2::NEG_ONE, Vec2::ONE);

        if input.fire {
            let now = self.clock.now();
            let cooldown = Duration::from_millis(self.config.fire_cooldown_ms);
            if self.player.try_fire(now, cooldown) {
                let pos = self.player.body.pos;
                self.spawn_shot(0, pos, Vec2::Y, Origin::Player);
                self.queue_laser();
            }
        }
    }

    /// Logic phase: round reset sweep, animation advance by `dt_ms`, and
    /// formation return fire
    pub fn on_logic(&mut self, lookup: &impl SpriteLookup, dt_ms: u64) -> RoundReset {
        let reset = self.reset_round();

        for shot in &mut self.shots {
            shot.body.animate(lookup, dt_ms);
        }
        for cell in self.formation.cells_mut() {
            cell.body.animate(lookup, dt_ms);
        }
        self.ufo.body.animate(lookup, dt_ms);
        self.player.body.animate(lookup, dt_ms);
        for barrier in &mut self.barriers {
            barrier.body.hold_first_frame(lookup);
        }

        let now = self.clock.now();
        if let Some(order) = self
            .spawner
            .poll(now, &self.formation, self.templates.len())
        {
            self.spawn_shot(order.variant, order.pos, Vec2::NEG_Y, Origin::Formation);
            self.queue_laser();
        }

        reset
    }

    /// Physics phase: formation step, bonus target, player movement, shot
    /// travel and culling, then collision resolution
    pub fn on_physics(&mut self, dt_ms: u64) {
        let now = self.clock.now();
        let dt = dt_ms as f32 / 1000.0;

        self.formation.step(now);
        self.ufo.update(now, dt, &mut self.audio);
        self.player
            .integrate(self.config.player_speed, self.config.player_bound, dt);

        self.advance_shots(dt);
        self.resolve_collisions(now);
    }

    /// Take the audio intents produced since the last drain
    pub fn drain_audio(&mut self) -> Vec<AudioIntent> {
        self.audio.drain()
    }

    fn advance_shots(&mut self, dt: f32) {
        let speed = self.config.shot_speed;
        let top = self.config.shot_top_bound;
        let bottom = self.config.shot_bottom_bound;
        let cull_bottom = self.config.cull_below_bottom;

        let mut i = 0;
        while i < self.shots.len() {
            let shot = &mut self.shots[i];
            shot.advance(speed, dt);
            let y = shot.body.pos.y;
            if y > top || (cull_bottom && y < bottom) {
                // The swapped-in shot is advanced on the next pass at `i`
                self.remove_shot(i);
            } else {
                i += 1;
            }
        }
    }

    /// Test each live shot once; a shot that hits something applies exactly
    /// one effect and is removed
    fn resolve_collisions(&mut self, now: Duration) {
        let mut i = 0;
        while i < self.shots.len() {
            let hit = {
                let targets = Targets {
                    barriers: &self.barriers,
                    barrier_max_hits: self.config.barrier_max_hits,
                    ufo: self.ufo.is_targetable().then_some(&self.ufo.body),
                    formation: &self.formation,
                    player: &self.player.body,
                };
                first_hit(&self.shots[i], &targets)
            };

            match hit {
                None => {
                    i += 1;
                    continue;
                }
                Some(Hit::Barrier(idx)) => {
                    self.barriers[idx].hits += 1;
                }
                Some(Hit::Ufo) => {
                    if self.ufo.on_hit(now, &mut self.audio) {
                        self.award(self.config.score_ufo);
                    }
                }
                Some(Hit::Intruder(idx)) => {
                    self.formation.cells_mut()[idx].destroyed = true;
                    self.award(self.config.score_intruder);
                }
                Some(Hit::Player) => {
                    self.player.lose_life();
                    self.audio.play(Sound::HitPlayer);
                    log::debug!("Player hit, {} lives left", self.player.lives);
                }
            }
            self.remove_shot(i);
        }
    }
}

/// Run one full frame: device, logic, physics, audio drain
pub fn tick<C: Clock>(
    field: &mut Field<C>,
    lookup: &impl SpriteLookup,
    input: &TickInput,
    dt_ms: u64,
) -> TickOutcome {
    field.on_device(input);
    let reset = field.on_logic(lookup, dt_ms);
    field.on_physics(dt_ms);
    TickOutcome {
        reset,
        audio: field.drain_audio(),
    }
}
