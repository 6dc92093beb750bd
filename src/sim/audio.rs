//! Audio intents
//!
//! The field never plays sound. It records what should be played or stopped
//! and the caller's audio subsystem drains the queue once per tick.

use serde::{Deserialize, Serialize};

/// Sound buffers the field refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Any shot leaving a cannon
    Laser,
    /// Bonus target engine (looped while it flies)
    Ufo,
    /// Bonus target destroyed
    Explosion,
    /// Player struck by an enemy shot
    HitPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioAction {
    Play,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioIntent {
    pub sound: Sound,
    pub action: AudioAction,
    pub looping: bool,
}

/// Append-only queue between drains
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioQueue {
    items: Vec<AudioIntent>,
}

impl AudioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: AudioIntent) {
        log::trace!("audio intent {:?}", intent);
        self.items.push(intent);
    }

    pub fn play(&mut self, sound: Sound) {
        self.push(AudioIntent {
            sound,
            action: AudioAction::Play,
            looping: false,
        });
    }

    pub fn play_looped(&mut self, sound: Sound) {
        self.push(AudioIntent {
            sound,
            action: AudioAction::Play,
            looping: true,
        });
    }

    pub fn stop(&mut self, sound: Sound) {
        self.push(AudioIntent {
            sound,
            action: AudioAction::Stop,
            looping: false,
        });
    }

    /// Pending intents, oldest first
    pub fn pending(&self) -> &[AudioIntent] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take every pending intent, leaving the queue empty
    pub fn drain(&mut self) -> Vec<AudioIntent> {
        std::mem::take(&mut self.items)
    }
}
