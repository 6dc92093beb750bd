//! Sprite/animation lookup
//!
//! The field never looks at pixels. It asks the lookup which sprite rectangle
//! an animation shows at a given time and sizes collision boxes from that
//! rectangle's extent.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A resolved sprite: normalized atlas rect `(x0, y0, x1, y1)` and pivot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub rect: Vec4,
    pub pivot: Vec2,
}

impl SpriteFrame {
    pub const ZERO: Self = Self {
        rect: Vec4::ZERO,
        pivot: Vec2::ZERO,
    };

    /// Unsigned width/height of the rect
    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.rect.z - self.rect.x, self.rect.w - self.rect.y).abs()
    }
}

/// Setup-time result of resolving an object/animation pair by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimBinding {
    pub object: usize,
    pub animation: usize,
    /// Total animation length in ms (always > 0)
    pub duration_ms: u64,
}

/// Contract between the field and whatever owns the sprite sheets
pub trait SpriteLookup {
    /// Resolve names to ids (setup only)
    fn locate(&self, object: &str, animation: &str) -> Result<AnimBinding, SetupError>;

    /// Frame shown `elapsed_ms` into an animation. Must be pure.
    fn resolve(&self, object: usize, animation: usize, elapsed_ms: u64) -> SpriteFrame;
}

/// A named rectangle in the atlas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub name: String,
    pub frame: SpriteFrame,
}

impl Sprite {
    /// Build from an inclusive pixel rect in an atlas of `dims` pixels
    pub fn from_pixels(name: &str, rect: [u32; 4], pivot: [i32; 2], dims: (u32, u32)) -> Self {
        let (w, h) = (dims.0.max(1) as f32, dims.1.max(1) as f32);
        Self {
            name: name.to_string(),
            frame: SpriteFrame {
                rect: Vec4::new(
                    rect[0] as f32 / w,
                    rect[1] as f32 / h,
                    (rect[2] + 1) as f32 / w,
                    (rect[3] + 1) as f32 / h,
                ),
                pivot: Vec2::new(pivot[0] as f32 / w, pivot[1] as f32 / h),
            },
        }
    }
}

/// One frame of an animation, shown for `[begin_ms, end_ms)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSpan {
    pub sprite: usize,
    pub begin_ms: u64,
    pub end_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub frames: Vec<FrameSpan>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteObject {
    pub name: String,
    pub animations: Vec<Animation>,
}

/// In-memory sprite sheet: sprites plus per-object animations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub sprites: Vec<Sprite>,
    pub objects: Vec<SpriteObject>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite, returning its index
    pub fn add_sprite(&mut self, sprite: Sprite) -> usize {
        self.sprites.push(sprite);
        self.sprites.len() - 1
    }

    /// Add an animation to `object` (created on first use).
    ///
    /// Frames are `(sprite name, duration ms)` and play back to back. Frames
    /// naming an unknown sprite are logged and skipped.
    pub fn add_animation(&mut self, object: &str, animation: &str, frames: &[(&str, u64)]) {
        let obj_id = match self.objects.iter().position(|o| o.name == object) {
            Some(id) => id,
            None => {
                self.objects.push(SpriteObject {
                    name: object.to_string(),
                    animations: Vec::new(),
                });
                self.objects.len() - 1
            }
        };

        let mut spans = Vec::with_capacity(frames.len());
        let mut tp = 0;
        for (sprite_name, duration) in frames {
            let Some(idx) = self.sprites.iter().position(|s| s.name == *sprite_name) else {
                log::error!("can not find sprite [{}]", sprite_name);
                continue;
            };
            spans.push(FrameSpan {
                sprite: idx,
                begin_ms: tp,
                end_ms: tp + duration,
            });
            tp += duration;
        }

        self.objects[obj_id].animations.push(Animation {
            name: animation.to_string(),
            frames: spans,
            duration_ms: tp,
        });
    }

    /// The sheet the arcade field is drawn from (1024x1024 atlas of 8px art)
    pub fn arcade() -> Self {
        const DIMS: (u32, u32) = (1024, 1024);
        let mut sheet = Self::new();

        for i in 0..6u32 {
            let y = i * 8;
            let (a, b) = (format!("intr_{i}_a"), format!("intr_{i}_b"));
            sheet.add_sprite(Sprite::from_pixels(&a, [0, y, 7, y + 7], [0, 0], DIMS));
            sheet.add_sprite(Sprite::from_pixels(&b, [8, y, 15, y + 7], [0, 0], DIMS));
            sheet.add_animation(&format!("intr_{i}"), "move", &[(a.as_str(), 500), (b.as_str(), 500)]);
        }

        for i in 0..4u32 {
            let x = 16 + i * 4;
            let sprite = format!("projectile_{i}");
            sheet.add_sprite(Sprite::from_pixels(&sprite, [x, 0, x + 1, 5], [0, 0], DIMS));
            sheet.add_animation(&sprite, "move", &[(sprite.as_str(), 100)]);
        }

        sheet.add_sprite(Sprite::from_pixels("ufo_a", [32, 0, 47, 7], [0, 0], DIMS));
        sheet.add_sprite(Sprite::from_pixels("ufo_b", [32, 8, 47, 15], [0, 0], DIMS));
        sheet.add_animation("ufo", "move", &[("ufo_a", 150), ("ufo_b", 150)]);

        sheet.add_sprite(Sprite::from_pixels("player", [48, 0, 55, 7], [0, 0], DIMS));
        sheet.add_animation("player", "idle", &[("player", 1000)]);

        sheet.add_sprite(Sprite::from_pixels("defense", [56, 0, 71, 7], [0, 0], DIMS));
        sheet.add_animation("defense", "idle", &[("defense", 1000)]);

        sheet
    }
}

impl SpriteLookup for SpriteSheet {
    fn locate(&self, object: &str, animation: &str) -> Result<AnimBinding, SetupError> {
        let obj_id = self
            .objects
            .iter()
            .position(|o| o.name == object)
            .ok_or_else(|| SetupError::MissingObject {
                name: object.to_string(),
            })?;

        let obj = &self.objects[obj_id];
        let ani_id = obj
            .animations
            .iter()
            .position(|a| a.name == animation)
            .ok_or_else(|| SetupError::MissingAnimation {
                object: object.to_string(),
                animation: animation.to_string(),
            })?;

        let duration_ms = obj.animations[ani_id].duration_ms;
        if duration_ms == 0 {
            return Err(SetupError::EmptyAnimation {
                object: object.to_string(),
                animation: animation.to_string(),
            });
        }

        Ok(AnimBinding {
            object: obj_id,
            animation: ani_id,
            duration_ms,
        })
    }

    fn resolve(&self, object: usize, animation: usize, elapsed_ms: u64) -> SpriteFrame {
        let Some(anim) = self
            .objects
            .get(object)
            .and_then(|o| o.animations.get(animation))
        else {
            return SpriteFrame::ZERO;
        };

        let span = anim
            .frames
            .iter()
            .find(|f| elapsed_ms >= f.begin_ms && elapsed_ms < f.end_ms)
            .or_else(|| anim.frames.first());

        span.and_then(|f| self.sprites.get(f.sprite))
            .map(|s| s.frame)
            .unwrap_or(SpriteFrame::ZERO)
    }
}
