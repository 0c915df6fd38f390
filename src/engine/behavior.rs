use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use uuid::Uuid;

use crate::audio::RECONNECT_CHIME;
use crate::config::BehaviorConfig;
use crate::emotion::{Emotion, EmotionCause, EmotionScheduler, EmotionState};
use crate::face::BrightnessController;
use crate::gesture::{GestureClassifier, GestureEvent};
use crate::needs::NeedsModel;
use crate::utils::Millis;

use super::feedback::{feed_reaction, touch_reaction, Reaction};
use super::snapshot::DeviceSnapshot;
use super::tick::{TickInput, TickOutput};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// The whole behavior core of one device, advanced by `tick`.
#[derive(Debug, Clone)]
pub struct DeviceBehaviorEngine {
    config: BehaviorConfig,
    gesture: GestureClassifier,
    needs: NeedsModel,
    scheduler: EmotionScheduler,
    brightness: BrightnessController,
    rng: StdRng,
    boot_id: Uuid,
}

impl DeviceBehaviorEngine {
    pub fn new(config: BehaviorConfig, now: Millis, is_online: bool) -> Self {
        Self::with_rng(config, now, is_online, StdRng::from_entropy())
    }

    /// Deterministic engine for tests and replays.
    pub fn with_seed(config: BehaviorConfig, now: Millis, is_online: bool, seed: u64) -> Self {
        Self::with_rng(config, now, is_online, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: BehaviorConfig, now: Millis, is_online: bool, mut rng: StdRng) -> Self {
        let scheduler = EmotionScheduler::new(&config, now, is_online, &mut rng);
        let boot_id = Uuid::new_v4();
        log_info!("mochi {} booted, online={}", boot_id, is_online);

        Self {
            gesture: GestureClassifier::new(&config),
            needs: NeedsModel::new(&config, now),
            brightness: BrightnessController::new(&config),
            scheduler,
            rng,
            boot_id,
            config,
        }
    }

    /// Replaces the needs model, e.g. to start from specific levels.
    pub fn with_needs(mut self, needs: NeedsModel) -> Self {
        self.needs = needs;
        self
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn needs(&self) -> &NeedsModel {
        &self.needs
    }

    pub fn scheduler(&self) -> &EmotionScheduler {
        &self.scheduler
    }

    pub fn gesture(&self) -> &GestureClassifier {
        &self.gesture
    }

    pub fn state(&self) -> &EmotionState {
        self.scheduler.state()
    }

    pub fn current_emotion(&self) -> Emotion {
        self.scheduler.current_emotion()
    }

    pub fn current_emotion_age(&self, now: Millis) -> Duration {
        self.scheduler.current_emotion_age(now)
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.contrast()
    }

    pub fn set_personality_enabled(&mut self, enabled: bool) {
        self.scheduler.random_behavior_mut().personality_enabled = enabled;
    }

    pub fn set_ambient_enabled(&mut self, enabled: bool) {
        self.scheduler.random_behavior_mut().ambient_enabled = enabled;
    }

    /// One full update: gestures, housekeeping, needs, user feedback, the
    /// priority chain, random behaviors and brightness, in that order.
    pub fn tick(&mut self, input: TickInput) -> TickOutput {
        let now = input.now;
        let mut out = TickOutput::default();

        self.gesture.update(input.touch, now);
        out.gesture = self.gesture.poll_event(now);

        let context = self.scheduler.context_mut();
        if context.expire(now, &self.config) {
            log_debug!("touch streak reset");
        }
        if context.set_online(input.is_online) {
            log_info!("back online");
            out.reconnected = true;
            out.sounds.extend_from_slice(&RECONNECT_CHIME);
        }

        let sleeping = self.scheduler.current_emotion() == Emotion::Sleeping;
        self.needs.tick(now, sleeping);

        match out.gesture {
            GestureEvent::None => {}
            GestureEvent::SingleTap => self.handle_taps(1, now, &mut out),
            GestureEvent::DoubleTap => self.handle_taps(2, now, &mut out),
            GestureEvent::LongPress => self.handle_long_press(now, &mut out),
        }

        if let Some(transition) =
            self.scheduler
                .resolve(now, &self.needs, input.local_hour, &mut self.rng)
        {
            out.transitions.push(transition);
        }

        let spontaneous = self
            .scheduler
            .try_spontaneous(now, &self.needs, &mut self.rng);
        out.personality = spontaneous.personality;
        out.transitions.extend(spontaneous.transition);
        out.sounds.extend(spontaneous.sound);

        if self.scheduler.current_emotion() == Emotion::Sleeping {
            self.brightness.dim(now);
        } else {
            self.brightness.brighten(now);
        }
        out.brightness = self.brightness.update(now);

        out
    }

    fn handle_taps(&mut self, taps: u32, now: Millis, out: &mut TickOutput) {
        let context = self.scheduler.context_mut();
        context.register_interaction(now);

        let mut reaction: Option<Reaction> = None;
        let mut count = context.touch_count;
        for _ in 0..taps {
            count = context.register_touch(now);
            reaction = touch_reaction(count).or(reaction);
        }
        log_info!("touch #{}", count);
        out.touch_count = Some(count);

        if let Some(reaction) = reaction {
            self.react(reaction, EmotionCause::Touch, now, out);
        }
    }

    fn handle_long_press(&mut self, now: Millis, out: &mut TickOutput) {
        let context = self.scheduler.context_mut();
        context.register_interaction(now);
        context.register_contact(now);

        if self.scheduler.current_emotion() == Emotion::Sleeping {
            log_info!("woken up by long press");
            out.woke = true;
            // Zero-length placeholder: the priority chain picks the next emotion.
            let transition = self
                .scheduler
                .set_emotion(Emotion::Neutral, now, Some(0), EmotionCause::Wake);
            out.transitions.push(transition);
            return;
        }

        let outcome = self.needs.feed(now);
        out.feed = Some(outcome);
        match feed_reaction(outcome) {
            Some(reaction) => self.react(reaction, EmotionCause::Feeding, now, out),
            None => log_debug!("feed ignored, cooling down"),
        }
    }

    fn react(&mut self, reaction: Reaction, cause: EmotionCause, now: Millis, out: &mut TickOutput) {
        let transition =
            self.scheduler
                .set_emotion(reaction.emotion, now, Some(reaction.duration_ms), cause);
        out.transitions.push(transition);
        out.sounds.extend(reaction.sound);
    }

    pub fn snapshot(&self, now: Millis) -> DeviceSnapshot {
        let state = self.scheduler.state();
        let context = self.scheduler.context();
        DeviceSnapshot {
            boot_id: self.boot_id,
            emotion: state.emotion,
            label: state.emotion.label().to_string(),
            emotion_age_ms: state.age(now).as_millis() as Millis,
            expires_in_ms: state.remaining_ms(now),
            hunger: self.needs.hunger(),
            energy: self.needs.energy(),
            touch_count: context.touch_count,
            interaction_count: context.interaction_count,
            is_online: context.is_online,
            brightness: self.brightness.contrast(),
        }
    }
}
