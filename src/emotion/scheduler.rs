use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::audio::SoundCue;
use crate::config::BehaviorConfig;
use crate::needs::{HungerTier, NeedsModel};
use crate::utils::{elapsed, Millis};

use super::context::InteractionContext;
use super::random::{PersonalityGate, PersonalityKind, RandomBehaviorGenerator};
use super::state::{Emotion, EmotionCause, EmotionState};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Touch streak at which petting turns into annoyance and hunger tiers stop
/// re-applying.
pub const ANGRY_TOUCH_COUNT: u32 = 15;

const BURST_EXCITED_MS: Millis = 1_500;
const MORNING_HAPPY_MS: Millis = 3_000;

/// One replacement of the authoritative emotion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionTransition {
    pub from: Emotion,
    pub to: Emotion,
    pub cause: EmotionCause,
    pub at: Millis,
    pub expiry_ms: Option<Millis>,
}

/// Result of the random behavior pass for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spontaneous {
    pub personality: Option<PersonalityKind>,
    pub transition: Option<EmotionTransition>,
    pub sound: Option<SoundCue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Hold,
    Set(Emotion, Option<Millis>, EmotionCause),
}

/// Owns the authoritative emotion and resolves the priority chain each tick.
#[derive(Debug, Clone)]
pub struct EmotionScheduler {
    state: EmotionState,
    context: InteractionContext,
    random: RandomBehaviorGenerator,
    config: BehaviorConfig,
    last_morning_roll_at: Option<Millis>,
}

impl EmotionScheduler {
    pub fn new<R: Rng + ?Sized>(
        config: &BehaviorConfig,
        now: Millis,
        is_online: bool,
        rng: &mut R,
    ) -> Self {
        Self {
            state: EmotionState::boot(now),
            context: InteractionContext::new(now, is_online),
            random: RandomBehaviorGenerator::new(config, now, rng),
            config: config.clone(),
            last_morning_roll_at: None,
        }
    }

    pub fn state(&self) -> &EmotionState {
        &self.state
    }

    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut InteractionContext {
        &mut self.context
    }

    pub fn random_behavior_mut(&mut self) -> &mut RandomBehaviorGenerator {
        &mut self.random
    }

    pub fn current_emotion(&self) -> Emotion {
        self.state.emotion
    }

    pub fn current_emotion_age(&self, now: Millis) -> Duration {
        self.state.age(now)
    }

    /// Replaces the current emotion unconditionally, restarting its timer.
    pub fn set_emotion(
        &mut self,
        emotion: Emotion,
        now: Millis,
        expiry_ms: Option<Millis>,
        cause: EmotionCause,
    ) -> EmotionTransition {
        let from = self.state.emotion;
        self.state = EmotionState::new(emotion, now, expiry_ms, cause);

        if from != emotion {
            log_info!("emotion {} -> {} ({:?})", from, emotion, cause);
        } else {
            log_debug!("emotion {} refreshed ({:?})", emotion, cause);
        }

        EmotionTransition {
            from,
            to: emotion,
            cause,
            at: now,
            expiry_ms,
        }
    }

    fn set_if_changed(
        &mut self,
        emotion: Emotion,
        now: Millis,
        expiry_ms: Option<Millis>,
        cause: EmotionCause,
    ) -> Option<EmotionTransition> {
        if self.state.emotion == emotion {
            return None;
        }
        Some(self.set_emotion(emotion, now, expiry_ms, cause))
    }

    /// Runs the priority chain once. Returns the transition if the emotion
    /// changed.
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        needs: &NeedsModel,
        local_hour: Option<u32>,
        rng: &mut R,
    ) -> Option<EmotionTransition> {
        match self.select(now, needs, local_hour, rng) {
            Decision::Hold => None,
            Decision::Set(emotion, expiry, cause) => self.set_if_changed(emotion, now, expiry, cause),
        }
    }

    fn select<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        needs: &NeedsModel,
        local_hour: Option<u32>,
        rng: &mut R,
    ) -> Decision {
        let config = &self.config;
        let current = self.state.emotion;
        let holding = self.state.is_holding(now);
        let since_touch = self.context.since_touch(now);

        // Critical energy wins over every hold, touch reactions included.
        if needs.energy() < config.sleep_energy {
            return Decision::Set(Emotion::Sleeping, None, EmotionCause::Energy);
        }

        if current == Emotion::Sleeping || holding {
            return Decision::Hold;
        }

        if !self.context.is_online {
            return Decision::Set(Emotion::Worried, None, EmotionCause::Connectivity);
        }

        if self.context.is_burst(now, config) {
            return Decision::Set(
                Emotion::Excited,
                Some(BURST_EXCITED_MS),
                EmotionCause::Interaction,
            );
        }

        if needs.energy() < config.drowsy_energy
            && matches!(current, Emotion::Idle | Emotion::Full | Emotion::Sleepy)
        {
            return Decision::Set(Emotion::Sleepy, None, EmotionCause::Energy);
        }

        if let Some(hour) = local_hour {
            if (hour >= 22 || hour < 6) && since_touch >= config.night_idle_ms {
                return Decision::Set(Emotion::Sleepy, None, EmotionCause::TimeOfDay);
            }

            if (6..10).contains(&hour) && since_touch >= config.morning_idle_ms {
                let roll_due = self
                    .last_morning_roll_at
                    .map(|at| elapsed(now, at) >= config.morning_roll_interval_ms)
                    .unwrap_or(true);
                if roll_due {
                    self.last_morning_roll_at = Some(now);
                    if rng.gen_range(0..100) < config.morning_happy_percent {
                        return Decision::Set(
                            Emotion::Happy,
                            Some(MORNING_HAPPY_MS),
                            EmotionCause::TimeOfDay,
                        );
                    }
                }
            }
        }

        if since_touch > config.neglect_ms && needs.hunger() > config.neglect_hunger {
            return Decision::Set(Emotion::Crying, None, EmotionCause::Neglect);
        }

        // Ambient Sleepy stays put. Other ambient moods go back to the hunger tier.
        if current == Emotion::Sleepy
            && self.state.cause == EmotionCause::Ambient
            && self.state.is_persistent()
        {
            return Decision::Hold;
        }

        let idle_equivalent = current == Emotion::Idle
            || (since_touch > config.hunger_settle_ms
                && self.context.touch_count < ANGRY_TOUCH_COUNT);
        if idle_equivalent {
            let emotion = match needs.hunger_tier() {
                HungerTier::Starving => Emotion::Starving,
                HungerTier::Hungry => Emotion::Hungry,
                HungerTier::Content | HungerTier::Normal => Emotion::Idle,
                HungerTier::Full => Emotion::Full,
            };
            return Decision::Set(emotion, None, EmotionCause::Hunger);
        }

        if self.context.since_interaction(now) > config.inactivity_ms {
            return Decision::Set(Emotion::Idle, None, EmotionCause::Inactivity);
        }

        Decision::Set(Emotion::Neutral, None, EmotionCause::Baseline)
    }

    /// Sleeping, or a Sleepy that came from energy or the clock rather than
    /// ambient drift.
    fn is_resting(&self) -> bool {
        match self.state.emotion {
            Emotion::Sleeping => true,
            Emotion::Sleepy => self.state.cause != EmotionCause::Ambient,
            _ => false,
        }
    }

    fn spontaneous_allowed(&self, now: Millis) -> bool {
        !self.state.is_holding(now) && !self.is_resting()
    }

    /// Personality flash first, then ambient drift. Each runs only when the
    /// current emotion is neither holding nor resting.
    pub fn try_spontaneous<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        needs: &NeedsModel,
        rng: &mut R,
    ) -> Spontaneous {
        let mut out = Spontaneous::default();

        if self.spontaneous_allowed(now) {
            let gate = PersonalityGate {
                feeding: needs.is_feeding(now),
                since_touch: self.context.since_touch(now),
                current: self.state.emotion,
                hunger: needs.hunger(),
            };
            if let Some(reaction) = self.random.try_personality(now, gate, rng) {
                log_info!("personality: {:?}", reaction.kind);
                out.personality = Some(reaction.kind);
                out.sound = reaction.sound;
                if let Some((emotion, expiry)) = reaction.emotion {
                    out.transition =
                        self.set_if_changed(emotion, now, expiry, EmotionCause::Personality);
                }
            }
        }

        if self.spontaneous_allowed(now) {
            let since_interaction = self.context.since_interaction(now);
            if let Some((emotion, expiry)) = self.random.try_ambient(
                now,
                self.context.is_online,
                since_interaction,
                self.state.emotion,
                rng,
            ) {
                log_info!("ambient drift to {}", emotion);
                if let Some(transition) =
                    self.set_if_changed(emotion, now, expiry, EmotionCause::Ambient)
                {
                    out.transition = Some(transition);
                }
            }
        }

        out
    }
}
