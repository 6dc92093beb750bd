//! Attract-mode autopilot
//!
//! Plays the field for demos and headless runs. Seeded, so the same seed and
//! field produce the same inputs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use glam::Vec2;

use super::clock::Clock;
use super::state::Field;
use super::tick::TickInput;

/// Horizontal distance at which steering saturates
const STEER_RANGE: f32 = 50.0;
/// Frames between shots
const FIRE_GAP: std::ops::Range<u32> = 20..60;
/// Frames between wander offset changes
const WANDER_GAP: std::ops::Range<u32> = 60..180;

pub struct Autopilot {
    rng: Pcg32,
    fire_in: u32,
    wander: f32,
    wander_for: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let fire_in = rng.random_range(FIRE_GAP);
        let wander_for = rng.random_range(WANDER_GAP);
        Self {
            rng,
            fire_in,
            wander: 0.0,
            wander_for,
        }
    }

    /// Choose this frame's input
    pub fn next_input<C: Clock>(&mut self, field: &Field<C>) -> TickInput {
        // Track the lowest live intruder, offset by a slowly changing wander
        let target_x = field
            .formation()
            .cells()
            .iter()
            .filter(|c| !c.destroyed)
            .min_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
            .map(|c| c.body.pos.x);

        if self.wander_for == 0 {
            self.wander = self.rng.random_range(-40.0..40.0);
            self.wander_for = self.rng.random_range(WANDER_GAP);
        } else {
            self.wander_for -= 1;
        }

        let movement = match target_x {
            Some(x) => {
                let delta = x + self.wander - field.player().body.pos.x;
                Vec2::new((delta / STEER_RANGE).clamp(-1.0, 1.0), 0.0)
            }
            None => Vec2::ZERO,
        };

        let fire = if self.fire_in == 0 {
            self.fire_in = self.rng.random_range(FIRE_GAP);
            true
        } else {
            self.fire_in -= 1;
            false
        };

        TickInput { movement, fire }
    }
}
