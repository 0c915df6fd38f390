use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::utils::{elapsed, Millis};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Emotion {
    Idle,
    #[default]
    Neutral,
    Happy,
    Sad,
    Crying,
    Angry,
    Surprised,
    Love,
    Sleepy,
    Sleeping,
    Thinking,
    Laughing,
    PetHappy,
    PetLove,
    PetAnnoyed,
    Eating,
    Hungry,
    Full,
    ThrowUp,
    Starving,
    Sick,
    Worried,
    Excited,
}

impl Emotion {
    /// Upper-case label shown on the face and in status payloads.
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Idle => "IDLE",
            Emotion::Neutral => "NEUTRAL",
            Emotion::Happy => "HAPPY",
            Emotion::Sad => "SAD",
            Emotion::Crying => "CRYING",
            Emotion::Angry => "ANGRY",
            Emotion::Surprised => "SURPRISED",
            Emotion::Love => "LOVE",
            Emotion::Sleepy => "SLEEPY",
            Emotion::Sleeping => "SLEEPING",
            Emotion::Thinking => "THINKING",
            Emotion::Laughing => "LAUGHING",
            Emotion::PetHappy => "PET HAPPY",
            Emotion::PetLove => "PET LOVE",
            Emotion::PetAnnoyed => "PET ANNOYED",
            Emotion::Eating => "EATING",
            Emotion::Hungry => "HUNGRY",
            Emotion::Full => "FULL",
            Emotion::ThrowUp => "THROWING UP",
            Emotion::Starving => "STARVING",
            Emotion::Sick => "SICK",
            Emotion::Worried => "WORRIED",
            Emotion::Excited => "EXCITED",
        }
    }

    pub fn is_sleep(self) -> bool {
        matches!(self, Emotion::Sleeping | Emotion::Sleepy)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why the current emotion was set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EmotionCause {
    Boot,
    Touch,
    Feeding,
    Wake,
    Energy,
    Connectivity,
    Interaction,
    TimeOfDay,
    Neglect,
    Hunger,
    Inactivity,
    Baseline,
    Personality,
    Ambient,
}

/// The single authoritative emotion. Replaced, never removed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionState {
    pub emotion: Emotion,
    pub activated_at: Millis,
    /// `None` holds until replaced; `Some(d)` lapses once `d` has passed
    pub expiry_ms: Option<Millis>,
    pub cause: EmotionCause,
}

impl EmotionState {
    pub fn boot(now: Millis) -> Self {
        Self {
            emotion: Emotion::Neutral,
            activated_at: now,
            expiry_ms: None,
            cause: EmotionCause::Boot,
        }
    }

    pub fn new(emotion: Emotion, now: Millis, expiry_ms: Option<Millis>, cause: EmotionCause) -> Self {
        Self {
            emotion,
            activated_at: now,
            expiry_ms,
            cause,
        }
    }

    /// A timed emotion that has not run out yet.
    pub fn is_holding(&self, now: Millis) -> bool {
        self.expiry_ms
            .map(|expiry| elapsed(now, self.activated_at) < expiry)
            .unwrap_or(false)
    }

    pub fn is_expired(&self, now: Millis) -> bool {
        self.expiry_ms
            .map(|expiry| elapsed(now, self.activated_at) >= expiry)
            .unwrap_or(false)
    }

    pub fn is_persistent(&self) -> bool {
        self.expiry_ms.is_none()
    }

    pub fn age(&self, now: Millis) -> Duration {
        Duration::from_millis(elapsed(now, self.activated_at))
    }

    pub fn remaining_ms(&self, now: Millis) -> Option<Millis> {
        self.expiry_ms
            .map(|expiry| expiry.saturating_sub(elapsed(now, self.activated_at)))
    }
}
