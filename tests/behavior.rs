use mochi_lib::engine::DeviceBehaviorEngine;
use mochi_lib::{
    BehaviorConfig, Emotion, EmotionCause, EmotionScheduler, FeedOutcome, GestureClassifier,
    GestureEvent, NeedsModel, TickInput, TickOutput,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STEP_MS: u64 = 33;

/// Drives an engine with a simulated touch pin at a fixed tick rate.
struct Sim {
    engine: DeviceBehaviorEngine,
    now: u64,
    online: bool,
}

impl Sim {
    fn new() -> Self {
        Self::with_levels(50, 100)
    }

    fn with_levels(hunger: u8, energy: u8) -> Self {
        let config = BehaviorConfig::default();
        let needs = NeedsModel::with_levels(&config, 0, hunger, energy);
        let engine = DeviceBehaviorEngine::with_seed(config, 0, true, 2024).with_needs(needs);
        Self {
            engine,
            now: 0,
            online: true,
        }
    }

    fn quiet(mut self) -> Self {
        self.engine.set_personality_enabled(false);
        self.engine.set_ambient_enabled(false);
        self
    }

    fn step(&mut self, touch: bool) -> TickOutput {
        self.now += STEP_MS;
        self.engine
            .tick(TickInput::new(self.now, touch).online(self.online))
    }

    fn run(&mut self, touch: bool, duration_ms: u64) -> Vec<TickOutput> {
        let end = self.now + duration_ms;
        let mut outputs = Vec::new();
        while self.now < end {
            outputs.push(self.step(touch));
        }
        outputs
    }

    /// Short press, then enough quiet for the single tap to be reported.
    fn tap(&mut self) -> Vec<TickOutput> {
        let mut outputs = self.run(true, 60);
        outputs.extend(self.run(false, 500));
        outputs
    }

    fn hold(&mut self, duration_ms: u64) -> Vec<TickOutput> {
        let mut outputs = self.run(true, duration_ms);
        outputs.extend(self.run(false, 100));
        outputs
    }
}

fn find_gesture(outputs: &[TickOutput], gesture: GestureEvent) -> Option<&TickOutput> {
    outputs.iter().find(|o| o.gesture == gesture)
}

#[test]
fn test_touch_streak_ladder() {
    let mut sim = Sim::new();
    let mut seen = Vec::new();

    for _ in 0..15 {
        let outputs = sim.tap();
        let tap = find_gesture(&outputs, GestureEvent::SingleTap).expect("tap reported");
        let count = tap.touch_count.expect("tap counted");
        if [1, 2, 3, 5, 10, 15].contains(&count) {
            let shown = tap.last_transition().expect("reaction").to;
            seen.push(shown);
        }
    }

    assert_eq!(
        seen,
        vec![
            Emotion::PetHappy,
            Emotion::PetHappy,
            Emotion::Love,
            Emotion::PetAnnoyed,
            Emotion::PetAnnoyed,
            Emotion::Angry,
        ]
    );
}

#[test]
fn test_touch_streak_resets_after_quiet() {
    let mut sim = Sim::new();
    sim.tap();
    sim.tap();
    assert_eq!(sim.engine.scheduler().context().touch_count, 2);

    sim.run(false, 10_500);
    assert_eq!(sim.engine.scheduler().context().touch_count, 0);

    let outputs = sim.tap();
    let tap = find_gesture(&outputs, GestureEvent::SingleTap).unwrap();
    assert_eq!(tap.touch_count, Some(1));
}

#[test]
fn test_offline_worried_until_reconnected() {
    let mut sim = Sim::new().quiet();
    sim.run(false, 5_000);
    assert_eq!(sim.engine.current_emotion(), Emotion::Idle);

    sim.online = false;
    sim.step(false);
    assert_eq!(sim.engine.current_emotion(), Emotion::Worried);

    for output in sim.run(false, 60_000) {
        assert!(output.transitions.is_empty());
    }
    assert_eq!(sim.engine.current_emotion(), Emotion::Worried);

    sim.online = true;
    let back = sim.step(false);
    assert!(back.reconnected);
    assert_eq!(back.sounds.len(), 3);
    assert_ne!(sim.engine.current_emotion(), Emotion::Worried);
}

#[test]
fn test_energy_nine_forces_sleep() {
    let mut sim = Sim::with_levels(50, 10);
    loop {
        sim.step(false);
        if sim.engine.needs().energy() == 9 {
            break;
        }
        assert!(sim.now < 70_000, "energy never drained");
    }
    assert_eq!(sim.engine.current_emotion(), Emotion::Sleeping);
    assert_eq!(sim.engine.state().cause, EmotionCause::Energy);

    sim.run(false, 1_500);
    assert_eq!(sim.engine.brightness(), 10);
}

#[test]
fn test_touch_at_energy_nine_cannot_keep_device_awake() {
    let mut sim = Sim::with_levels(50, 9).quiet();
    sim.run(false, 500);
    assert_eq!(sim.engine.current_emotion(), Emotion::Sleeping);

    for _ in 0..3 {
        let outputs = sim.tap();
        let tap = find_gesture(&outputs, GestureEvent::SingleTap).expect("tap reported");
        assert_eq!(tap.last_transition().map(|t| t.to), Some(Emotion::Sleeping));
        assert_eq!(sim.engine.current_emotion(), Emotion::Sleeping);
    }

    let outputs = sim.hold(1_600);
    assert!(find_gesture(&outputs, GestureEvent::LongPress).expect("long press").woke);
    assert_eq!(sim.engine.current_emotion(), Emotion::Sleeping);
}

#[test]
fn test_ambient_drift_returns_to_hunger_tier() {
    let config = BehaviorConfig::default();
    let mut rng = StdRng::seed_from_u64(5);
    let mut scheduler = EmotionScheduler::new(&config, 0, true, &mut rng);
    let starving = NeedsModel::with_levels(&config, 0, 95, 100);

    for drifted in [Emotion::Idle, Emotion::Neutral] {
        scheduler.set_emotion(drifted, 10_000, None, EmotionCause::Ambient);
        scheduler.resolve(10_033, &starving, None, &mut rng);
        assert_eq!(scheduler.current_emotion(), Emotion::Starving, "from {drifted:?}");
    }

    scheduler.set_emotion(Emotion::Sleepy, 20_000, None, EmotionCause::Ambient);
    assert_eq!(scheduler.resolve(20_033, &starving, None, &mut rng), None);
    assert_eq!(scheduler.current_emotion(), Emotion::Sleepy);
}

#[test]
fn test_neglect_overrides_hungry() {
    let mut sim = Sim::with_levels(75, 100).quiet();
    sim.run(false, 30_000);
    assert_eq!(sim.engine.current_emotion(), Emotion::Hungry);

    sim.run(false, 31_000);
    assert_eq!(sim.engine.current_emotion(), Emotion::Crying);
    assert_eq!(sim.engine.state().cause, EmotionCause::Neglect);
}

#[test]
fn test_hold_to_feed_outcomes() {
    let cases = [
        (40, FeedOutcome::NomNom, 10, Emotion::Eating),
        (80, FeedOutcome::Stuffed, 60, Emotion::Full),
        (95, FeedOutcome::ThrowUp, 50, Emotion::ThrowUp),
    ];

    for (hunger, outcome, after, emotion) in cases {
        let mut sim = Sim::with_levels(hunger, 100);
        let outputs = sim.hold(1_600);
        let fed = find_gesture(&outputs, GestureEvent::LongPress).expect("long press");
        assert_eq!(fed.feed, Some(outcome));
        assert_eq!(fed.last_transition().map(|t| t.to), Some(emotion));
        assert_eq!(sim.engine.needs().hunger(), after);
    }
}

#[test]
fn test_second_feed_inside_cooldown_is_ignored() {
    let mut sim = Sim::with_levels(40, 100);
    sim.hold(1_600);
    assert_eq!(sim.engine.needs().hunger(), 10);

    let outputs = sim.hold(1_600);
    let second = find_gesture(&outputs, GestureEvent::LongPress).expect("long press");
    assert_eq!(second.feed, Some(FeedOutcome::TooSoon));
    assert_eq!(sim.engine.needs().hunger(), 10);
}

#[test]
fn test_double_tap_counts_as_two_touches() {
    let mut sim = Sim::new();
    let mut outputs = sim.run(true, 60);
    outputs.extend(sim.run(false, 100));
    outputs.extend(sim.run(true, 60));
    outputs.extend(sim.run(false, 500));

    assert!(find_gesture(&outputs, GestureEvent::SingleTap).is_none());
    let double = find_gesture(&outputs, GestureEvent::DoubleTap).expect("double tap");
    assert_eq!(double.touch_count, Some(2));
    assert_eq!(sim.engine.current_emotion(), Emotion::PetHappy);
}

#[test]
fn test_random_pin_noise_respects_gesture_windows() {
    let config = BehaviorConfig::default();
    let mut rng = StdRng::seed_from_u64(77);
    let mut classifier = GestureClassifier::new(&config);

    let mut now = 0u64;
    let mut level = false;
    let mut falling_edges: Vec<u64> = Vec::new();
    let mut press_started_at: Option<u64> = None;
    let mut qualifies = false;
    let mut long_presses = 0;

    for _ in 0..2_000 {
        let run_ticks = rng.gen_range(1..100);
        level = !level;
        for _ in 0..run_ticks {
            now += 20;
            classifier.update(level, now);

            if level {
                let start = *press_started_at.get_or_insert(now);
                if now - start >= config.long_press_ms {
                    qualifies = true;
                }
            } else if let Some(_start) = press_started_at.take() {
                falling_edges.push(now);
                assert_eq!(long_presses, usize::from(qualifies), "at {now}");
                qualifies = false;
                long_presses = 0;
            }

            match classifier.poll_event(now) {
                GestureEvent::DoubleTap => {
                    let n = falling_edges.len();
                    assert!(n >= 2, "double tap without two releases at {now}");
                    assert_eq!(falling_edges[n - 1], now);
                    assert!(falling_edges[n - 1] - falling_edges[n - 2] < config.double_tap_window_ms);
                }
                GestureEvent::LongPress => {
                    assert!(level, "long press after release at {now}");
                    long_presses += 1;
                }
                _ => {}
            }
        }
    }
}
