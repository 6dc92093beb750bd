//! Player cannon

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    pub lives: u32,
    /// Movement vector sampled from input; only x is used
    pub advance: Vec2,
    /// Time of the last accepted shot
    #[serde(skip)]
    last_fire: Option<Duration>,
}

impl Player {
    pub fn new(body: Entity, lives: u32) -> Self {
        Self {
            body,
            lives,
            advance: Vec2::ZERO,
            last_fire: None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lives != 0
    }

    /// Move horizontally and snap back onto `[-bound, bound]`
    pub fn integrate(&mut self, speed: f32, bound: f32, dt: f32) {
        self.body.pos.x += speed * self.advance.x * dt;
        if self.body.pos.x > bound || self.body.pos.x < -bound {
            self.body.pos.x = bound.copysign(self.body.pos.x);
        }
    }

    /// Whether a shot may leave now. A zero cooldown always allows it.
    pub fn try_fire(&mut self, now: Duration, cooldown: Duration) -> bool {
        if let Some(last) = self.last_fire {
            if !cooldown.is_zero() && now.saturating_sub(last) < cooldown {
                return false;
            }
        }
        self.last_fire = Some(now);
        true
    }

    /// Take one hit
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }
}
