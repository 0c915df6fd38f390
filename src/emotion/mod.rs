pub mod context;
pub mod random;
pub mod scheduler;
pub mod state;

pub use context::InteractionContext;
pub use random::{
    pick_ambient, pick_personality, PersonalityGate, PersonalityKind, PersonalityReaction,
    RandomBehaviorGenerator, RandomBehaviorTimer,
};
pub use scheduler::{EmotionScheduler, EmotionTransition, Spontaneous, ANGRY_TOUCH_COUNT};
pub use state::{Emotion, EmotionCause, EmotionState};
