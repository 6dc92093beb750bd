//! Collision detection for the arcade field
//!
//! Everything collides as an axis-aligned box. A projectile is tested against
//! the other actors in a fixed priority order and matches at most one of them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Barrier, Entity, Origin, Projectile};
use super::formation::Formation;

/// Axis-aligned bounding box (closed intervals)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    #[inline]
    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        let half = half_extent.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap on both axes; touching edges count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Corners in order: bottom left, top left, top right, bottom right
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.min.x, self.max.y),
            self.max,
            Vec2::new(self.max.x, self.min.y),
        ]
    }
}

/// What a projectile struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    /// Index into the barrier array
    Barrier(usize),
    Ufo,
    /// Index into the formation grid
    Intruder(usize),
    Player,
}

/// Read-only view of everything a projectile can strike this tick
pub struct Targets<'a> {
    pub barriers: &'a [Barrier],
    pub barrier_max_hits: u32,
    /// Bonus target body, present only while it is traversing
    pub ufo: Option<&'a Entity>,
    pub formation: &'a Formation,
    pub player: &'a Entity,
}

/// First target `shot` overlaps, in priority order:
/// barriers, bonus target, formation (not for formation shots),
/// player (not for player shots).
pub fn first_hit(shot: &Projectile, targets: &Targets<'_>) -> Option<Hit> {
    let bb = shot.body.aabb();

    if let Some(idx) = targets
        .barriers
        .iter()
        .position(|b| b.is_standing(targets.barrier_max_hits) && b.body.aabb().overlaps(&bb))
    {
        return Some(Hit::Barrier(idx));
    }

    // The bonus target takes hits from either side
    if let Some(ufo) = targets.ufo {
        if ufo.aabb().overlaps(&bb) {
            return Some(Hit::Ufo);
        }
    }

    if shot.origin != Origin::Formation {
        if let Some(idx) = targets
            .formation
            .cells()
            .iter()
            .position(|c| !c.destroyed && c.body.aabb().overlaps(&bb))
        {
            return Some(Hit::Intruder(idx));
        }
    }

    if shot.origin != Origin::Player && targets.player.aabb().overlaps(&bb) {
        return Some(Hit::Player);
    }

    None
}
