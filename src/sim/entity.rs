//! Entities of the arcade field
//!
//! Every actor shares an [`Entity`] body: position, animation binding and the
//! sprite frame resolved this tick. Role-specific data lives in the struct
//! that owns the body ([`Projectile`], [`Barrier`], and the controllers in
//! sibling modules).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::sprite::{AnimBinding, SpriteFrame, SpriteLookup};

/// Shared body of every simulated actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    /// `None` for inert entities whose sprite could not be found at setup
    pub anim: Option<AnimBinding>,
    /// Time into the current animation (ms), always `< max_anim_time()`
    pub anim_time: u64,
    /// Sprite resolved for this tick
    pub sprite: SpriteFrame,
    /// Uniform render scale applied to the normalized sprite rect
    pub scale: f32,
}

impl Entity {
    /// An entity with no animation (zero-sized box)
    pub fn inert(pos: Vec2, scale: f32) -> Self {
        Self {
            pos,
            anim: None,
            anim_time: 0,
            sprite: SpriteFrame::ZERO,
            scale,
        }
    }

    /// Bind to `object`/`animation` of the lookup.
    ///
    /// Unknown names are logged and produce an inert entity; setup carries on
    /// with degraded visuals.
    pub fn bind(
        lookup: &impl SpriteLookup,
        object: &str,
        animation: &str,
        pos: Vec2,
        scale: f32,
    ) -> Self {
        match lookup.locate(object, animation) {
            Ok(binding) => {
                let mut entity = Self::inert(pos, scale);
                entity.anim = Some(binding);
                entity.sprite = lookup.resolve(binding.object, binding.animation, 0);
                entity
            }
            Err(e) => {
                log::error!("{}. Using inert entity", e);
                Self::inert(pos, scale)
            }
        }
    }

    /// Total animation length (1 for inert entities)
    #[inline]
    pub fn max_anim_time(&self) -> u64 {
        self.anim.map_or(1, |a| a.duration_ms.max(1))
    }

    /// Resolve the current frame, then advance animation time (wrapping)
    pub fn animate(&mut self, lookup: &impl SpriteLookup, dt_ms: u64) {
        let Some(binding) = self.anim else {
            return;
        };
        self.sprite = lookup.resolve(binding.object, binding.animation, self.anim_time);
        self.anim_time = (self.anim_time + dt_ms) % self.max_anim_time();
    }

    /// Resolve the first frame without advancing (static props)
    pub fn hold_first_frame(&mut self, lookup: &impl SpriteLookup) {
        if let Some(binding) = self.anim {
            self.sprite = lookup.resolve(binding.object, binding.animation, 0);
        }
    }

    /// Half of the scaled sprite extent
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        self.sprite.extent() * 0.5 * self.scale
    }

    /// Bounding box from the current sprite and scale
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extent())
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Origin {
    #[default]
    None,
    Player,
    Formation,
}

/// A live shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Entity,
    /// Unit travel direction
    pub dir: Vec2,
    pub origin: Origin,
}

impl Projectile {
    /// Copy a template body into a new shot
    pub fn from_template(template: &Entity, pos: Vec2, dir: Vec2, origin: Origin) -> Self {
        let mut body = template.clone();
        body.pos = pos;
        Self { body, dir, origin }
    }

    #[inline]
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.body.pos += self.dir * speed * dt;
    }
}

/// A defense barrier; absorbs shots until `hits` reaches the limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub body: Entity,
    pub hits: u32,
}

impl Barrier {
    #[inline]
    pub fn is_standing(&self, max_hits: u32) -> bool {
        self.hits < max_hits
    }
}
