use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;
use crate::config::BehaviorConfig;
use crate::utils::{elapsed, Millis};

use super::state::Emotion;

/// Interval timer whose period is re-rolled uniformly after every firing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomBehaviorTimer {
    pub last_fired_at: Millis,
    pub next_interval: Millis,
    band: (Millis, Millis),
}

impl RandomBehaviorTimer {
    pub fn new(now: Millis, first_interval: Millis, band: (Millis, Millis)) -> Self {
        let (low, high) = band;
        Self {
            last_fired_at: now,
            next_interval: first_interval,
            band: (low.min(high), low.max(high)),
        }
    }

    pub fn is_due(&self, now: Millis) -> bool {
        elapsed(now, self.last_fired_at) >= self.next_interval
    }

    pub fn fire<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) {
        self.last_fired_at = now;
        self.next_interval = rng.gen_range(self.band.0..=self.band.1);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PersonalityKind {
    HappyMoment,
    Yawn,
    LookAround,
    Thinking,
    PlayfulLaugh,
    ContentPurr,
    BlinkIdle,
    HungerComplaint,
    RandomSound,
    QuickFlash,
    DoNothing,
}

#[derive(Debug, Clone, Copy)]
enum Gate {
    Always,
    HungerBelow(u8),
    HungerAbove(u8),
}

impl Gate {
    fn passes(self, hunger: u8) -> bool {
        match self {
            Gate::Always => true,
            Gate::HungerBelow(limit) => hunger < limit,
            Gate::HungerAbove(limit) => hunger > limit,
        }
    }
}

/// Cumulative percentile bounds. A bucket whose gate fails hands its rolls
/// to the next bucket, so the table always covers 0..100.
const PERSONALITY_TABLE: [(u32, PersonalityKind, Gate); 11] = [
    (15, PersonalityKind::HappyMoment, Gate::Always),
    (25, PersonalityKind::Yawn, Gate::Always),
    (35, PersonalityKind::LookAround, Gate::Always),
    (42, PersonalityKind::Thinking, Gate::Always),
    (50, PersonalityKind::PlayfulLaugh, Gate::Always),
    (55, PersonalityKind::ContentPurr, Gate::HungerBelow(50)),
    (60, PersonalityKind::BlinkIdle, Gate::Always),
    (70, PersonalityKind::HungerComplaint, Gate::HungerAbove(60)),
    (75, PersonalityKind::RandomSound, Gate::Always),
    (85, PersonalityKind::QuickFlash, Gate::Always),
    (100, PersonalityKind::DoNothing, Gate::Always),
];

const QUICK_FLASH_EMOTIONS: [Emotion; 5] = [
    Emotion::Happy,
    Emotion::Surprised,
    Emotion::Love,
    Emotion::Thinking,
    Emotion::Laughing,
];

const AMBIENT_EMOTIONS: [Emotion; 7] = [
    Emotion::Happy,
    Emotion::Sleepy,
    Emotion::Sad,
    Emotion::Angry,
    Emotion::Excited,
    Emotion::Idle,
    Emotion::Neutral,
];

/// Maps a percentile roll (0-99) to a personality behavior.
pub fn pick_personality(roll: u32, hunger: u8) -> PersonalityKind {
    PERSONALITY_TABLE
        .iter()
        .find(|(upper, _, gate)| roll < *upper && gate.passes(hunger))
        .map(|(_, kind, _)| *kind)
        .unwrap_or(PersonalityKind::DoNothing)
}

/// A spontaneous behavior ready to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalityReaction {
    pub kind: PersonalityKind,
    /// Emotion and its expiry (`None` = persistent)
    pub emotion: Option<(Emotion, Option<Millis>)>,
    pub sound: Option<SoundCue>,
}

impl PersonalityReaction {
    pub fn realize<R: Rng + ?Sized>(kind: PersonalityKind, rng: &mut R) -> Self {
        let (emotion, sound) = match kind {
            PersonalityKind::HappyMoment => (
                Some((Emotion::Happy, Some(rng.gen_range(2_000..4_000)))),
                Some(SoundCue::new(rng.gen_range(500..700), 150)),
            ),
            PersonalityKind::Yawn => (
                Some((Emotion::Sleepy, Some(2_500))),
                Some(SoundCue::new(300, 300)),
            ),
            PersonalityKind::LookAround => (
                Some((Emotion::Surprised, Some(1_500))),
                Some(SoundCue::new(600, 100)),
            ),
            PersonalityKind::Thinking => (Some((Emotion::Thinking, Some(3_000))), None),
            PersonalityKind::PlayfulLaugh => (
                Some((Emotion::Laughing, Some(2_000))),
                Some(SoundCue::new(rng.gen_range(400..700), 200)),
            ),
            PersonalityKind::ContentPurr => (
                Some((Emotion::PetHappy, Some(1_500))),
                Some(SoundCue::new(350, 250)),
            ),
            PersonalityKind::BlinkIdle => (Some((Emotion::Idle, None)), None),
            PersonalityKind::HungerComplaint => (
                Some((Emotion::Sad, Some(2_000))),
                Some(SoundCue::new(300, 200)),
            ),
            PersonalityKind::RandomSound => (
                None,
                Some(SoundCue::new(rng.gen_range(400..800), rng.gen_range(100..200))),
            ),
            PersonalityKind::QuickFlash => {
                let flash = QUICK_FLASH_EMOTIONS
                    .choose(rng)
                    .copied()
                    .unwrap_or(Emotion::Happy);
                (Some((flash, Some(800))), None)
            }
            PersonalityKind::DoNothing => (None, None),
        };

        Self { kind, emotion, sound }
    }
}

/// Picks an ambient mood different from `current`, with its expiry.
pub fn pick_ambient<R: Rng + ?Sized>(current: Emotion, rng: &mut R) -> (Emotion, Option<Millis>) {
    let candidates: Vec<Emotion> = AMBIENT_EMOTIONS
        .iter()
        .copied()
        .filter(|emotion| *emotion != current)
        .collect();
    let emotion = candidates.choose(rng).copied().unwrap_or(Emotion::Neutral);

    let expiry = match emotion {
        Emotion::Happy | Emotion::Excited => Some(rng.gen_range(2_000..3_000)),
        Emotion::Sad | Emotion::Angry => Some(rng.gen_range(1_500..2_000)),
        _ => None,
    };
    (emotion, expiry)
}

/// The two independent random timers: fast personality flashes and slow
/// ambient mood drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomBehaviorGenerator {
    pub personality_timer: RandomBehaviorTimer,
    pub ambient_timer: RandomBehaviorTimer,
    pub personality_enabled: bool,
    pub ambient_enabled: bool,
    personality_touch_quiet_ms: Millis,
    ambient_quiet_ms: Millis,
    ambient_trigger_percent: u32,
}

/// What the personality timer needs to know about the device this tick.
#[derive(Debug, Clone, Copy)]
pub struct PersonalityGate {
    pub feeding: bool,
    pub since_touch: Millis,
    pub current: Emotion,
    pub hunger: u8,
}

impl PersonalityGate {
    fn emotion_eligible(&self) -> bool {
        match self.current {
            Emotion::Idle | Emotion::Full => true,
            Emotion::Hungry => self.hunger < 80,
            _ => false,
        }
    }
}

impl RandomBehaviorGenerator {
    pub fn new<R: Rng + ?Sized>(config: &BehaviorConfig, now: Millis, rng: &mut R) -> Self {
        let (first_low, first_high) = config.personality_first_interval_ms;
        let first_personality = rng.gen_range(first_low.min(first_high)..=first_low.max(first_high));

        Self {
            personality_timer: RandomBehaviorTimer::new(
                now,
                first_personality,
                config.personality_interval_ms,
            ),
            ambient_timer: RandomBehaviorTimer::new(
                now,
                config.ambient_first_interval_ms,
                config.ambient_interval_ms,
            ),
            personality_enabled: true,
            ambient_enabled: true,
            personality_touch_quiet_ms: config.personality_touch_quiet_ms,
            ambient_quiet_ms: config.ambient_quiet_ms,
            ambient_trigger_percent: config.ambient_trigger_percent,
        }
    }

    /// Fires the personality timer if it is due. A due timer is consumed
    /// even when the current emotion is not eligible for a flash.
    pub fn try_personality<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        gate: PersonalityGate,
        rng: &mut R,
    ) -> Option<PersonalityReaction> {
        if !self.personality_enabled
            || gate.feeding
            || gate.since_touch < self.personality_touch_quiet_ms
            || !self.personality_timer.is_due(now)
        {
            return None;
        }

        self.personality_timer.fire(now, rng);
        if !gate.emotion_eligible() {
            return None;
        }

        let roll = rng.gen_range(0..100);
        let kind = pick_personality(roll, gate.hunger);
        Some(PersonalityReaction::realize(kind, rng))
    }

    /// Fires the ambient timer if it is due and rolls the trigger chance.
    pub fn try_ambient<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        is_online: bool,
        since_interaction: Millis,
        current: Emotion,
        rng: &mut R,
    ) -> Option<(Emotion, Option<Millis>)> {
        if !self.ambient_enabled
            || !is_online
            || since_interaction < self.ambient_quiet_ms
            || !self.ambient_timer.is_due(now)
        {
            return None;
        }

        self.ambient_timer.fire(now, rng);
        if rng.gen_range(0..100) >= self.ambient_trigger_percent {
            return None;
        }
        Some(pick_ambient(current, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_personality_table_buckets() {
        assert_eq!(pick_personality(0, 10), PersonalityKind::HappyMoment);
        assert_eq!(pick_personality(14, 10), PersonalityKind::HappyMoment);
        assert_eq!(pick_personality(15, 10), PersonalityKind::Yawn);
        assert_eq!(pick_personality(30, 10), PersonalityKind::LookAround);
        assert_eq!(pick_personality(41, 10), PersonalityKind::Thinking);
        assert_eq!(pick_personality(49, 10), PersonalityKind::PlayfulLaugh);
        assert_eq!(pick_personality(52, 10), PersonalityKind::ContentPurr);
        assert_eq!(pick_personality(57, 10), PersonalityKind::BlinkIdle);
        assert_eq!(pick_personality(72, 10), PersonalityKind::RandomSound);
        assert_eq!(pick_personality(80, 10), PersonalityKind::QuickFlash);
        assert_eq!(pick_personality(99, 10), PersonalityKind::DoNothing);
    }

    #[test]
    fn test_failed_gates_fall_through_to_next_bucket() {
        // Purr needs hunger below 50.
        assert_eq!(pick_personality(52, 60), PersonalityKind::BlinkIdle);
        // Complaint needs hunger above 60.
        assert_eq!(pick_personality(65, 40), PersonalityKind::RandomSound);
        assert_eq!(pick_personality(65, 61), PersonalityKind::HungerComplaint);
    }

    #[test]
    fn test_personality_table_covers_every_roll() {
        for hunger in [0, 49, 50, 60, 61, 100] {
            let do_nothing = (0..100)
                .filter(|roll| pick_personality(*roll, hunger) == PersonalityKind::DoNothing)
                .count();
            assert_eq!(do_nothing, 15, "hunger {hunger}");
        }
    }

    #[test]
    fn test_timer_rerolls_inside_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut timer = RandomBehaviorTimer::new(0, 1_000, (5_000, 15_000));
        assert!(!timer.is_due(999));
        assert!(timer.is_due(1_000));
        for step in 1..50 {
            let now = step * 20_000;
            timer.fire(now, &mut rng);
            assert!((5_000..=15_000).contains(&timer.next_interval));
            assert!(!timer.is_due(now + 4_999));
        }
    }

    #[test]
    fn test_ambient_never_repeats_current() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let (emotion, expiry) = pick_ambient(Emotion::Happy, &mut rng);
            assert_ne!(emotion, Emotion::Happy);
            match emotion {
                Emotion::Excited => assert!(matches!(expiry, Some(ms) if (2_000..3_000).contains(&ms))),
                Emotion::Sad | Emotion::Angry => {
                    assert!(matches!(expiry, Some(ms) if (1_500..2_000).contains(&ms)))
                }
                _ => assert_eq!(expiry, None),
            }
        }
    }

    #[test]
    fn test_personality_waits_for_quiet_and_eligible_emotion() {
        let config = BehaviorConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut generator = RandomBehaviorGenerator::new(&config, 0, &mut rng);
        let gate = PersonalityGate {
            feeding: false,
            since_touch: 500,
            current: Emotion::Idle,
            hunger: 40,
        };
        // Touched too recently: timer untouched.
        assert!(generator.try_personality(20_000, gate, &mut rng).is_none());
        assert_eq!(generator.personality_timer.last_fired_at, 0);

        let not_idle = PersonalityGate {
            since_touch: 5_000,
            current: Emotion::Angry,
            ..gate
        };
        assert!(generator.try_personality(20_000, not_idle, &mut rng).is_none());
        assert_eq!(generator.personality_timer.last_fired_at, 20_000);

        let eligible = PersonalityGate {
            since_touch: 50_000,
            ..gate
        };
        assert!(generator.try_personality(60_000, eligible, &mut rng).is_some());
    }

    #[test]
    fn test_ambient_requires_online_and_quiet() {
        let config = BehaviorConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut generator = RandomBehaviorGenerator::new(&config, 0, &mut rng);
        assert!(generator
            .try_ambient(40_000, false, 40_000, Emotion::Idle, &mut rng)
            .is_none());
        assert!(generator
            .try_ambient(40_000, true, 5_000, Emotion::Idle, &mut rng)
            .is_none());
        assert_eq!(generator.ambient_timer.last_fired_at, 0);

        let mut fired = 0;
        let mut now = 40_000;
        for _ in 0..200 {
            if generator
                .try_ambient(now, true, now, Emotion::Idle, &mut rng)
                .is_some()
            {
                fired += 1;
            }
            now += 60_000;
        }
        // Roughly 30% of due timers trigger.
        assert!(fired > 20 && fired < 110, "fired {fired}");
    }
}
