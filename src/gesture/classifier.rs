use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::BehaviorConfig;
use crate::utils::{elapsed, Millis};

const ENABLE_LOGS: bool = false;

use crate::log_debug;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GestureEvent {
    #[default]
    None,
    SingleTap,
    DoubleTap,
    LongPress,
}

/// Edge-tracking state of the touch pin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchSession {
    pub is_pressed: bool,
    pub press_started_at: Option<Millis>,
    /// Release time of a tap that may still become the first half of a double tap
    pub pending_tap_at: Option<Millis>,
    pub long_press_fired: bool,
}

/// Turns one clean boolean pin sample per tick into tap, double-tap and
/// long-press events.
///
/// Long presses fire during the hold. A single tap is held back for the
/// double-tap window so it can still pair with a second tap.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    session: TouchSession,
    /// Decided events waiting to be polled, oldest first
    pending_events: VecDeque<GestureEvent>,
    long_press_ms: Millis,
    double_tap_window_ms: Millis,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(&BehaviorConfig::default())
    }
}

impl GestureClassifier {
    pub fn new(config: &BehaviorConfig) -> Self {
        Self {
            session: TouchSession::default(),
            pending_events: VecDeque::new(),
            long_press_ms: config.long_press_ms,
            double_tap_window_ms: config.double_tap_window_ms,
        }
    }

    pub fn session(&self) -> &TouchSession {
        &self.session
    }

    pub fn update(&mut self, raw_touch: bool, now: Millis) {
        let was_pressed = self.session.is_pressed;

        if raw_touch && !was_pressed {
            self.session.is_pressed = true;
            self.session.press_started_at = Some(now);
            self.session.long_press_fired = false;
            log_debug!("touch down at {now}");
        } else if !raw_touch && was_pressed {
            self.session.is_pressed = false;
            self.on_release(now);
        }

        if self.session.is_pressed && !self.session.long_press_fired {
            let held_ms = self
                .session
                .press_started_at
                .map(|start| elapsed(now, start))
                .unwrap_or(0);
            if held_ms >= self.long_press_ms {
                self.session.long_press_fired = true;
                // The hold wins over a tap still waiting for its partner.
                self.session.pending_tap_at = None;
                self.pending_events.push_back(GestureEvent::LongPress);
                log_debug!("long press after {held_ms}ms");
            }
        }
    }

    /// Returns and consumes at most one event. Queued events come out in the
    /// order they were decided.
    pub fn poll_event(&mut self, now: Millis) -> GestureEvent {
        if let Some(event) = self.pending_events.pop_front() {
            return event;
        }

        if self.tap_window_closed(now) {
            self.session.pending_tap_at = None;
            return GestureEvent::SingleTap;
        }

        GestureEvent::None
    }

    pub fn reset(&mut self) {
        self.session = TouchSession::default();
        self.pending_events.clear();
    }

    fn on_release(&mut self, now: Millis) {
        let held_ms = self
            .session
            .press_started_at
            .take()
            .map(|start| elapsed(now, start))
            .unwrap_or(0);

        if self.session.long_press_fired || held_ms >= self.long_press_ms {
            // Long presses only ever fire during the hold.
            return;
        }

        match self.session.pending_tap_at {
            Some(tap_at) if elapsed(now, tap_at) < self.double_tap_window_ms => {
                self.session.pending_tap_at = None;
                self.pending_events.push_back(GestureEvent::DoubleTap);
                log_debug!("double tap at {now}");
            }
            Some(_) => {
                // The earlier tap timed out but was never polled; keep it.
                self.pending_events.push_back(GestureEvent::SingleTap);
                self.session.pending_tap_at = Some(now);
            }
            None => {
                self.session.pending_tap_at = Some(now);
            }
        }
    }

    fn tap_window_closed(&self, now: Millis) -> bool {
        self.session
            .pending_tap_at
            .map(|tap_at| elapsed(now, tap_at) >= self.double_tap_window_ms)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `(level, until_ms)` spans at a 10ms tick and collects every event.
    fn run(classifier: &mut GestureClassifier, spans: &[(bool, Millis)]) -> Vec<(Millis, GestureEvent)> {
        let mut events = Vec::new();
        let mut now = 0;
        for &(level, until) in spans {
            while now < until {
                classifier.update(level, now);
                let event = classifier.poll_event(now);
                if event != GestureEvent::None {
                    events.push((now, event));
                }
                now += 10;
            }
        }
        events
    }

    #[test]
    fn test_single_tap_is_delayed_by_window() {
        let mut classifier = GestureClassifier::default();
        let events = run(&mut classifier, &[(false, 100), (true, 200), (false, 1_000)]);
        assert_eq!(events.len(), 1);
        let (at, event) = events[0];
        assert_eq!(event, GestureEvent::SingleTap);
        // Released at 200, reported once the 400ms window has passed.
        assert_eq!(at, 600);
    }

    #[test]
    fn test_double_tap() {
        let mut classifier = GestureClassifier::default();
        let events = run(
            &mut classifier,
            &[(false, 100), (true, 200), (false, 300), (true, 400), (false, 1_200)],
        );
        assert_eq!(events, vec![(400, GestureEvent::DoubleTap)]);
    }

    #[test]
    fn test_slow_second_tap_gives_two_single_taps() {
        let mut classifier = GestureClassifier::default();
        let events = run(
            &mut classifier,
            &[(false, 100), (true, 200), (false, 700), (true, 800), (false, 1_600)],
        );
        let kinds: Vec<GestureEvent> = events.iter().map(|(_, e)| *e).collect();
        assert_eq!(kinds, vec![GestureEvent::SingleTap, GestureEvent::SingleTap]);
    }

    #[test]
    fn test_long_press_fires_once_during_hold() {
        let mut classifier = GestureClassifier::default();
        let events = run(&mut classifier, &[(false, 100), (true, 4_000), (false, 5_000)]);
        assert_eq!(events, vec![(1_600, GestureEvent::LongPress)]);
    }

    #[test]
    fn test_long_press_discards_pending_tap() {
        let config = BehaviorConfig {
            long_press_ms: 300,
            ..BehaviorConfig::default()
        };
        let mut classifier = GestureClassifier::new(&config);
        // Tap released at 200, hold from 300 crosses the threshold at 600,
        // the same tick the tap window would have closed.
        let events = run(
            &mut classifier,
            &[(false, 100), (true, 200), (false, 300), (true, 1_000), (false, 2_000)],
        );
        assert_eq!(events, vec![(600, GestureEvent::LongPress)]);
    }

    #[test]
    fn test_tap_before_hold_still_reported() {
        let mut classifier = GestureClassifier::default();
        let events = run(
            &mut classifier,
            &[(false, 100), (true, 200), (false, 300), (true, 2_000), (false, 3_000)],
        );
        assert_eq!(
            events,
            vec![(600, GestureEvent::SingleTap), (1_800, GestureEvent::LongPress)]
        );
    }

    #[test]
    fn test_unsampled_long_hold_emits_nothing_after_release() {
        let mut classifier = GestureClassifier::default();
        classifier.update(true, 0);
        classifier.update(false, 2_000);
        assert_eq!(classifier.poll_event(2_000), GestureEvent::None);
        assert_eq!(classifier.poll_event(3_000), GestureEvent::None);
    }

    #[test]
    fn test_unpolled_expired_tap_is_not_lost() {
        let mut classifier = GestureClassifier::default();
        classifier.update(true, 0);
        classifier.update(false, 100);
        // Second tap long after the window, without polling in between.
        classifier.update(true, 900);
        classifier.update(false, 1_000);
        assert_eq!(classifier.poll_event(1_000), GestureEvent::SingleTap);
        assert_eq!(classifier.poll_event(1_100), GestureEvent::None);
        assert_eq!(classifier.poll_event(1_400), GestureEvent::SingleTap);
    }

    #[test]
    fn test_taps_queue_while_nobody_polls() {
        let mut classifier = GestureClassifier::default();
        for start in [0, 1_000, 2_000] {
            classifier.update(true, start);
            classifier.update(false, start + 100);
        }
        // Two taps timed out unpolled; the third is still in its window.
        assert_eq!(classifier.poll_event(2_100), GestureEvent::SingleTap);
        assert_eq!(classifier.poll_event(2_100), GestureEvent::SingleTap);
        assert_eq!(classifier.poll_event(2_200), GestureEvent::None);
        assert_eq!(classifier.poll_event(2_500), GestureEvent::SingleTap);
        assert_eq!(classifier.poll_event(2_600), GestureEvent::None);
    }

    #[test]
    fn test_reset_clears_pending_state() {
        let mut classifier = GestureClassifier::default();
        classifier.update(true, 0);
        classifier.update(false, 100);
        classifier.reset();
        assert_eq!(classifier.poll_event(1_000), GestureEvent::None);
        assert_eq!(classifier.session(), &TouchSession::default());
    }
}
