//! Formation return fire
//!
//! On every period expiry one live cell shoots downward. Rows are searched
//! from the bottom up; within a row the search starts at a rotating column so
//! consecutive shots come from different columns.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::formation::Formation;

/// Where and with which projectile variant to fire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnOrder {
    /// Index of the firing cell
    pub cell: usize,
    pub pos: Vec2,
    /// Index into the projectile templates
    pub variant: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    period: Duration,
    last_fire: Duration,
    /// Rotating start column
    cursor: usize,
}

impl Spawner {
    pub fn new(period: Duration, now: Duration) -> Self {
        Self {
            period,
            last_fire: now,
            cursor: 0,
        }
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// At most one order per expiry. The timer restarts on expiry even when
    /// no cell is left to fire.
    pub fn poll(
        &mut self,
        now: Duration,
        formation: &Formation,
        variants: usize,
    ) -> Option<SpawnOrder> {
        if now.saturating_sub(self.last_fire) < self.period {
            return None;
        }
        self.last_fire = now;

        let width = formation.width();
        if width == 0 {
            return None;
        }
        let start = self.cursor % width;
        self.cursor = self.cursor.wrapping_add(1);

        for y in (0..formation.height()).rev() {
            for k in 0..width {
                let x = (start + k) % width;
                let idx = formation.index(x, y);
                let Some(cell) = formation.cells().get(idx) else {
                    continue;
                };
                if cell.destroyed {
                    continue;
                }
                let order = SpawnOrder {
                    cell: idx,
                    pos: cell.body.pos,
                    variant: if variants == 0 { 0 } else { start % variants },
                };
                log::debug!("Intruder ({}, {}) fires", x, y);
                return Some(order);
            }
        }
        None
    }
}
