use serde::{Deserialize, Serialize};

use crate::needs::FeedOutcome;

/// One beep: a sine tone at `frequency_hz` for `duration_ms`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SoundCue {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl SoundCue {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Petting streak tones; counts without a reaction stay silent.
pub fn touch_cue(touch_count: u32) -> Option<SoundCue> {
    match touch_count {
        1 => Some(SoundCue::new(400, 200)),
        2 => Some(SoundCue::new(450, 200)),
        3 => Some(SoundCue::new(500, 250)),
        5 => Some(SoundCue::new(300, 150)),
        10 => Some(SoundCue::new(250, 200)),
        n if n >= 15 => Some(SoundCue::new(200, 300)),
        _ => None,
    }
}

pub fn feed_cue(outcome: FeedOutcome) -> Option<SoundCue> {
    match outcome {
        FeedOutcome::TooSoon => None,
        FeedOutcome::NomNom => Some(SoundCue::new(600, 300)),
        FeedOutcome::Stuffed => Some(SoundCue::new(400, 200)),
        FeedOutcome::ThrowUp => Some(SoundCue::new(200, 400)),
    }
}

/// Three short beeps when the network comes back.
pub const RECONNECT_CHIME: [SoundCue; 3] = [
    SoundCue::new(600, 200),
    SoundCue::new(600, 200),
    SoundCue::new(600, 200),
];

/// Silence inserted between consecutive cues by players.
pub const CUE_GAP_MS: u32 = 100;
