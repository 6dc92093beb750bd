//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same clock readings, frame
//! durations and inputs, a field evolves the same way:
//! - Wall-clock timers read an injected [`Clock`]
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (formation and barriers by index)
//! - No rendering or platform dependencies

pub mod audio;
pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod entity;
pub mod formation;
pub mod player;
pub mod spawner;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod ufo;

pub use audio::{AudioAction, AudioIntent, AudioQueue, Sound};
pub use autopilot::Autopilot;
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{Aabb, Hit, Targets, first_hit};
pub use entity::{Barrier, Entity, Origin, Projectile};
pub use formation::{Formation, Intruder};
pub use player::Player;
pub use spawner::{SpawnOrder, Spawner};
pub use sprite::{AnimBinding, SpriteFrame, SpriteLookup, SpriteSheet};
pub use state::{Field, PROJECTILE_OBJECTS, ROW_OBJECTS, RoundReset};
pub use tick::{TickInput, TickOutcome, tick};
pub use ufo::{Ufo, UfoState};
