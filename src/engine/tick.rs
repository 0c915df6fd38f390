use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;
use crate::emotion::{EmotionTransition, PersonalityKind};
use crate::gesture::GestureEvent;
use crate::needs::FeedOutcome;
use crate::utils::Millis;

/// Inputs sampled by the host once per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TickInput {
    pub now: Millis,
    pub touch: bool,
    pub is_online: bool,
    /// Local hour 0-23, or `None` when the clock has not been synced
    pub local_hour: Option<u32>,
}

impl TickInput {
    pub fn new(now: Millis, touch: bool) -> Self {
        Self {
            now,
            touch,
            is_online: true,
            local_hour: None,
        }
    }

    pub fn online(mut self, is_online: bool) -> Self {
        self.is_online = is_online;
        self
    }

    pub fn at_hour(mut self, hour: u32) -> Self {
        self.local_hour = Some(hour % 24);
        self
    }
}

/// Everything that happened during one tick, for the effect dispatcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TickOutput {
    pub gesture: GestureEvent,
    /// Streak length after this tick's taps
    pub touch_count: Option<u32>,
    pub feed: Option<FeedOutcome>,
    pub woke: bool,
    pub reconnected: bool,
    pub personality: Option<PersonalityKind>,
    /// In application order; the last one is the emotion now showing
    pub transitions: Vec<EmotionTransition>,
    pub sounds: Vec<SoundCue>,
    pub brightness: u8,
}

impl TickOutput {
    pub fn last_transition(&self) -> Option<&EmotionTransition> {
        self.transitions.last()
    }

    pub fn is_quiet(&self) -> bool {
        self.gesture == GestureEvent::None
            && self.transitions.is_empty()
            && self.sounds.is_empty()
            && !self.woke
    }
}
