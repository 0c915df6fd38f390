use crate::audio::{feed_cue, touch_cue, SoundCue};
use crate::emotion::{Emotion, ANGRY_TOUCH_COUNT};
use crate::needs::FeedOutcome;
use crate::utils::Millis;

/// A direct response to the user: shown for `duration_ms`, with an optional tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    pub emotion: Emotion,
    pub duration_ms: Millis,
    pub sound: Option<SoundCue>,
}

/// Petting ladder. Streak lengths between the listed steps keep whatever is
/// already showing.
pub fn touch_reaction(touch_count: u32) -> Option<Reaction> {
    let (emotion, duration_ms) = match touch_count {
        1 | 2 => (Emotion::PetHappy, 1_500),
        3 => (Emotion::Love, 2_000),
        5 => (Emotion::PetAnnoyed, 2_000),
        10 => (Emotion::PetAnnoyed, 2_500),
        n if n >= ANGRY_TOUCH_COUNT => (Emotion::Angry, 3_000),
        _ => return None,
    };
    Some(Reaction {
        emotion,
        duration_ms,
        sound: touch_cue(touch_count),
    })
}

pub fn feed_reaction(outcome: FeedOutcome) -> Option<Reaction> {
    let emotion = match outcome {
        FeedOutcome::TooSoon => return None,
        FeedOutcome::NomNom => Emotion::Eating,
        FeedOutcome::Stuffed => Emotion::Full,
        FeedOutcome::ThrowUp => Emotion::ThrowUp,
    };
    Some(Reaction {
        emotion,
        duration_ms: outcome.reaction_ms(),
        sound: feed_cue(outcome),
    })
}
