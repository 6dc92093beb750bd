//! Intruder formation
//!
//! A fixed grid of cells moving as one block. Cells are never removed, only
//! flagged destroyed, so `(x, y) -> y * width + x` stays valid for targeting
//! and rendering.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::consts::MAX_FORMATION_CELLS;
use crate::settings::FieldConfig;

/// One grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intruder {
    pub body: Entity,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    width: usize,
    height: usize,
    cells: Vec<Intruder>,
    /// x: +1/-1 travel sign; y is fixed at -1 and unused (no descent)
    dir: Vec2,
    step_x: f32,
    inner_bound: f32,
    period: Duration,
    last_step: Duration,
}

impl Formation {
    /// Lay out the grid with every cell alive.
    ///
    /// Row `y` copies `row_templates[y % len]`; an empty template list yields
    /// inert cells.
    pub fn new(config: &FieldConfig, row_templates: &[Entity], now: Duration) -> Self {
        let (width, height) = (config.formation_width, config.formation_height);
        let mut cells = Vec::with_capacity(width.saturating_mul(height).min(MAX_FORMATION_CELLS));

        for y in 0..height {
            let template = match row_templates.len() {
                0 => Entity::inert(Vec2::ZERO, config.default_scale),
                n => row_templates[y % n].clone(),
            };
            for x in 0..width {
                let mut body = template.clone();
                body.pos = config.formation_start
                    + Vec2::new(
                        x as f32 * config.formation_pitch.x,
                        -(y as f32) * config.formation_pitch.y,
                    );
                cells.push(Intruder {
                    body,
                    destroyed: false,
                });
            }
        }

        Self {
            width,
            height,
            cells,
            dir: Vec2::new(1.0, -1.0),
            step_x: config.formation_step_x,
            inner_bound: config.formation_inner_bound(),
            period: Duration::from_millis(config.formation_step_ms),
            last_step: now,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Intruder> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.index(x, y))
    }

    pub fn cells(&self) -> &[Intruder] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Intruder] {
        &mut self.cells
    }

    /// Current travel direction
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.destroyed).count()
    }

    pub fn any_alive(&self) -> bool {
        self.cells.iter().any(|c| !c.destroyed)
    }

    /// Bring every cell back (positions are kept)
    pub fn revive_all(&mut self) {
        for cell in &mut self.cells {
            cell.destroyed = false;
        }
    }

    /// Step the block sideways once the period has elapsed.
    ///
    /// The whole grid moves so destroyed cells stay aligned for the next
    /// round. If a live cell ends up past the inner bound the direction flips
    /// for the next step; this step is not undone. Returns whether a step
    /// happened.
    pub fn step(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_step) < self.period {
            return false;
        }
        self.last_step = now;

        let offset = Vec2::new(self.dir.x * self.step_x, 0.0);
        for cell in &mut self.cells {
            cell.body.pos += offset;
        }

        let bound = self.inner_bound;
        if self
            .cells
            .iter()
            .any(|c| !c.destroyed && (c.body.pos.x > bound || c.body.pos.x < -bound))
        {
            self.dir.x = -self.dir.x;
            log::debug!("Formation turns, heading {}", if self.dir.x > 0.0 { "right" } else { "left" });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn formation(width: usize, height: usize) -> Formation {
        let config = FieldConfig {
            formation_width: width,
            formation_height: height,
            ..Default::default()
        };
        Formation::new(&config, &[], Duration::ZERO)
    }

    fn max_alive_x(f: &Formation) -> f32 {
        f.cells()
            .iter()
            .filter(|c| !c.destroyed)
            .map(|c| c.body.pos.x)
            .fold(f32::MIN, f32::max)
    }

    #[test]
    fn test_layout_and_indexing() {
        let f = formation(10, 6);
        assert_eq!(f.cells().len(), 60);
        assert_eq!(f.alive_count(), 60);
        assert_eq!(f.cell(0, 0).unwrap().body.pos, Vec2::new(-350.0, 200.0));
        assert_eq!(f.cell(9, 5).unwrap().body.pos, Vec2::new(10.0, -100.0));
        assert_eq!(f.index(3, 2), 23);
        assert!(f.cell(10, 0).is_none());
    }

    #[test]
    fn test_step_waits_for_period() {
        let mut f = formation(10, 6);
        assert!(!f.step(Duration::from_millis(999)));
        assert_eq!(f.cell(0, 0).unwrap().body.pos.x, -350.0);

        assert!(f.step(Duration::from_millis(1000)));
        assert_eq!(f.cell(0, 0).unwrap().body.pos.x, -310.0);

        // Period restarts from the last step
        assert!(!f.step(Duration::from_millis(1500)));
        assert!(f.step(Duration::from_millis(2000)));
    }

    #[test]
    fn test_flip_happens_after_crossing_bound() {
        let mut f = formation(10, 6);
        // Rightmost column starts at x=10; eight steps reach 330 > 320
        for i in 1..=7 {
            f.step(Duration::from_secs(i));
            assert_eq!(f.direction().x, 1.0, "step {i}");
        }
        f.step(Duration::from_secs(8));
        assert_eq!(max_alive_x(&f), 330.0);
        assert_eq!(f.direction().x, -1.0);

        // Next step comes back, no vertical movement
        f.step(Duration::from_secs(9));
        assert_eq!(max_alive_x(&f), 290.0);
        assert_eq!(f.cell(0, 0).unwrap().body.pos.y, 200.0);
    }

    #[test]
    fn test_destroyed_cells_do_not_trigger_flip() {
        let mut f = formation(10, 6);
        // Kill the rightmost column
        for y in 0..6 {
            let idx = f.index(9, y);
            f.cells_mut()[idx].destroyed = true;
        }
        for i in 1..=8 {
            f.step(Duration::from_secs(i));
        }
        // Column 8 is at 290 after eight steps, still inside
        assert_eq!(f.direction().x, 1.0);
        // Dead cells still moved with the block
        assert_eq!(f.cell(9, 0).unwrap().body.pos.x, 330.0);
    }

    #[test]
    fn test_revive_all() {
        let mut f = formation(3, 2);
        for cell in f.cells_mut() {
            cell.destroyed = true;
        }
        assert!(!f.any_alive());
        f.revive_all();
        assert_eq!(f.alive_count(), 6);
    }

    proptest! {
        #[test]
        fn prop_direction_flips_only_after_out_of_bounds_step(
            kills in prop::collection::vec(0usize..60, 0..40),
            steps in 1u64..60,
        ) {
            let mut f = formation(10, 6);
            for k in kills {
                f.cells_mut()[k].destroyed = true;
            }
            let bound = 320.0;
            for i in 1..=steps {
                let before = f.direction().x;
                f.step(Duration::from_secs(i));
                let outside = f.cells().iter().any(|c| !c.destroyed && c.body.pos.x.abs() > bound);
                if outside {
                    prop_assert_eq!(f.direction().x, -before);
                } else {
                    prop_assert_eq!(f.direction().x, before);
                }
            }
        }
    }
}
