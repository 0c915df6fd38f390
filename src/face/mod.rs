pub mod brightness;

pub use brightness::BrightnessController;

use serde::Serialize;

use crate::emotion::Emotion;

/// Eye shape presets understood by the face renderer.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EyeMood {
    Default,
    Happy,
    Tired,
    Angry,
}

/// Text drawn under the eyes; animated captions depend on the frame counter.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Caption {
    None,
    Static { text: &'static str },
    /// Visible for `on` frames out of every `period`
    Blinking { text: &'static str, period: u32, on: u32 },
    /// Repeats `glyph` 0..=3 times, advancing every `step` frames
    Counting { glyph: char, step: u32 },
}

impl Caption {
    pub fn frame_text(&self, frame: u32) -> Option<String> {
        match *self {
            Caption::None => None,
            Caption::Static { text } => Some(text.to_string()),
            Caption::Blinking { text, period, on } => {
                (frame % period.max(1) < on).then(|| text.to_string())
            }
            Caption::Counting { glyph, step } => {
                let count = (frame / step.max(1)) % 4;
                Some(std::iter::repeat(glyph).take(count as usize).collect())
            }
        }
    }
}

/// Everything the renderer needs to draw one emotion.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderHint {
    pub label: &'static str,
    pub eye_mood: EyeMood,
    /// Look-around interval in seconds: base plus random variation
    pub idle_look_around_s: Option<(u8, u8)>,
    /// Autoblink interval in seconds: base plus random variation
    pub autoblink_s: Option<(u8, u8)>,
    pub sweat: bool,
    pub look_down: bool,
    pub laugh: bool,
    pub caption: Caption,
}

impl RenderHint {
    const fn base(label: &'static str, eye_mood: EyeMood) -> Self {
        Self {
            label,
            eye_mood,
            idle_look_around_s: None,
            autoblink_s: Some((3, 2)),
            sweat: false,
            look_down: false,
            laugh: false,
            caption: Caption::None,
        }
    }
}

const fn text(text: &'static str) -> Caption {
    Caption::Static { text }
}

/// Pure mapping from emotion to render parameters.
pub fn apply(emotion: Emotion) -> RenderHint {
    let label = emotion.label();
    let hint = RenderHint::base(label, EyeMood::Default);

    match emotion {
        Emotion::Neutral => RenderHint {
            idle_look_around_s: Some((3, 2)),
            ..hint
        },
        Emotion::Idle => RenderHint {
            idle_look_around_s: Some((5, 3)),
            autoblink_s: Some((4, 2)),
            ..hint
        },
        Emotion::Happy => RenderHint {
            eye_mood: EyeMood::Happy,
            autoblink_s: Some((2, 1)),
            ..hint
        },
        Emotion::Excited => RenderHint {
            eye_mood: EyeMood::Happy,
            autoblink_s: Some((1, 1)),
            laugh: true,
            ..hint
        },
        Emotion::Sleepy => RenderHint {
            eye_mood: EyeMood::Tired,
            autoblink_s: None,
            ..hint
        },
        Emotion::Sleeping => RenderHint {
            eye_mood: EyeMood::Tired,
            autoblink_s: None,
            caption: Caption::Counting { glyph: 'Z', step: 10 },
            ..hint
        },
        Emotion::Sad => RenderHint {
            look_down: true,
            autoblink_s: Some((4, 2)),
            ..hint
        },
        Emotion::Crying => RenderHint {
            look_down: true,
            autoblink_s: Some((4, 2)),
            caption: text("WAH!"),
            ..hint
        },
        Emotion::Angry => RenderHint {
            eye_mood: EyeMood::Angry,
            autoblink_s: None,
            caption: text("RAGE!"),
            ..hint
        },
        Emotion::Worried => RenderHint {
            sweat: true,
            autoblink_s: Some((2, 1)),
            ..hint
        },
        Emotion::Surprised => RenderHint {
            caption: text("WOW!"),
            ..hint
        },
        Emotion::Love => RenderHint {
            eye_mood: EyeMood::Happy,
            ..hint
        },
        Emotion::Thinking => RenderHint {
            idle_look_around_s: Some((2, 1)),
            caption: Caption::Counting { glyph: '.', step: 5 },
            ..hint
        },
        Emotion::Laughing => RenderHint {
            eye_mood: EyeMood::Happy,
            laugh: true,
            caption: text("LOL!"),
            ..hint
        },
        Emotion::PetHappy => RenderHint {
            eye_mood: EyeMood::Happy,
            caption: Caption::Blinking {
                text: "PURR",
                period: 15,
                on: 8,
            },
            ..hint
        },
        Emotion::PetLove => RenderHint {
            eye_mood: EyeMood::Happy,
            caption: text("<3 <3 <3"),
            ..hint
        },
        Emotion::PetAnnoyed => RenderHint {
            eye_mood: EyeMood::Angry,
            caption: text("STOP!"),
            ..hint
        },
        Emotion::Eating => RenderHint {
            eye_mood: EyeMood::Happy,
            caption: Caption::Blinking {
                text: "NOM NOM",
                period: 20,
                on: 10,
            },
            ..hint
        },
        Emotion::Hungry => RenderHint {
            caption: text("FEED ME!"),
            ..hint
        },
        Emotion::Full => RenderHint {
            eye_mood: EyeMood::Happy,
            autoblink_s: Some((4, 2)),
            ..hint
        },
        Emotion::ThrowUp => RenderHint {
            eye_mood: EyeMood::Tired,
            sweat: true,
            caption: text("BLEH!"),
            ..hint
        },
        Emotion::Starving => RenderHint {
            eye_mood: EyeMood::Tired,
            caption: text("CRITICAL!"),
            ..hint
        },
        Emotion::Sick => RenderHint {
            eye_mood: EyeMood::Tired,
            sweat: true,
            caption: text("FEVER"),
            ..hint
        },
    }
}
