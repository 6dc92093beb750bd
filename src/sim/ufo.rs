//! Bonus target ("UFO")
//!
//! Waits hidden for a period, then flies across the top of the field from the
//! side opposite its travel direction. Leaving the field or being shot hides
//! it again, reverses its direction and restarts the wait.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::audio::{AudioQueue, Sound};
use super::entity::Entity;
use crate::settings::FieldConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UfoState {
    Hidden,
    Traversing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ufo {
    pub body: Entity,
    state: UfoState,
    /// Travel direction, x is +1 or -1
    dir: Vec2,
    period: Duration,
    /// Start of the current hidden wait
    last_change: Duration,
    speed: f32,
    spawn_x: f32,
    exit_x: f32,
    y: f32,
}

impl Ufo {
    pub fn new(body: Entity, config: &FieldConfig, now: Duration) -> Self {
        Self {
            body,
            state: UfoState::Hidden,
            dir: Vec2::X,
            period: Duration::from_millis(config.ufo_period_ms),
            last_change: now,
            speed: config.ufo_speed,
            spawn_x: config.ufo_spawn_x,
            exit_x: config.ufo_exit_x,
            y: config.ufo_y,
        }
    }

    #[inline]
    pub fn state(&self) -> UfoState {
        self.state
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    /// Only a flying target can be hit
    #[inline]
    pub fn is_targetable(&self) -> bool {
        self.state == UfoState::Traversing
    }

    /// Appear when the wait is over, otherwise fly and leave past the edge
    pub fn update(&mut self, now: Duration, dt: f32, audio: &mut AudioQueue) {
        if self.state == UfoState::Hidden {
            if now.saturating_sub(self.last_change) < self.period {
                return;
            }
            self.state = UfoState::Traversing;
            let x = if self.dir.x < 0.0 { self.spawn_x } else { -self.spawn_x };
            self.body.pos = Vec2::new(x, self.y);
            audio.play_looped(Sound::Ufo);
            log::debug!("UFO appears at x={}", x);
        }

        self.body.pos += self.dir * self.speed * dt;
        if self.body.pos.x > self.exit_x || self.body.pos.x < -self.exit_x {
            self.retire(now);
            audio.stop(Sound::Ufo);
            log::debug!("UFO left the field");
        }
    }

    /// Shot down: hide at once and queue the stop/explosion sounds.
    /// Returns false if the target was not flying.
    pub fn on_hit(&mut self, now: Duration, audio: &mut AudioQueue) -> bool {
        if !self.is_targetable() {
            return false;
        }
        self.retire(now);
        audio.stop(Sound::Ufo);
        audio.play(Sound::Explosion);
        log::debug!("UFO shot down");
        true
    }

    /// Round reset: hide without touching direction or timer
    pub fn hide(&mut self, audio: &mut AudioQueue) {
        if self.is_targetable() {
            audio.stop(Sound::Ufo);
        }
        self.state = UfoState::Hidden;
    }

    fn retire(&mut self, now: Duration) {
        self.state = UfoState::Hidden;
        self.last_change = now;
        self.dir.x = -self.dir.x;
    }
}
