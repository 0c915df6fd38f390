use serde::{Deserialize, Serialize};

use crate::utils::Millis;

/// Tunable timings and thresholds for the behavior engine.
///
/// All durations are wall-clock milliseconds so behavior does not depend on
/// the host tick rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BehaviorConfig {
    /// Hold time after which a press becomes a long press (fires while held)
    pub long_press_ms: Millis,
    /// Two releases closer than this form a double tap
    pub double_tap_window_ms: Millis,

    /// Hunger rises by `hunger_step` once per window
    pub hunger_step_window_ms: Millis,
    pub hunger_step: u8,
    /// Energy moves once per window: +`energy_sleep_gain` asleep, -`energy_awake_drain` awake
    pub energy_step_window_ms: Millis,
    pub energy_sleep_gain: u8,
    pub energy_awake_drain: u8,
    pub initial_hunger: u8,
    pub initial_energy: u8,
    /// Minimum spacing between two accepted feeds
    pub feed_cooldown_ms: Millis,

    /// Touch count falls back to zero after this long without a touch
    pub touch_reset_ms: Millis,
    /// Interactions inside this window count as a burst
    pub burst_window_ms: Millis,
    pub burst_min_interactions: u32,
    pub inactivity_ms: Millis,
    /// No touch for this long while hungry means neglect
    pub neglect_ms: Millis,
    pub neglect_hunger: u8,
    /// Hunger tiers re-apply once the last touch is older than this
    pub hunger_settle_ms: Millis,
    pub sleep_energy: u8,
    pub drowsy_energy: u8,

    pub night_idle_ms: Millis,
    pub morning_idle_ms: Millis,
    pub morning_happy_percent: u32,
    pub morning_roll_interval_ms: Millis,

    /// Personality flashes wait this long after the last touch
    pub personality_touch_quiet_ms: Millis,
    pub personality_first_interval_ms: (Millis, Millis),
    pub personality_interval_ms: (Millis, Millis),

    pub ambient_quiet_ms: Millis,
    pub ambient_first_interval_ms: Millis,
    pub ambient_interval_ms: (Millis, Millis),
    pub ambient_trigger_percent: u32,

    pub normal_contrast: u8,
    pub dimmed_contrast: u8,
    pub fade_ms: Millis,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 1_500,
            double_tap_window_ms: 400,

            hunger_step_window_ms: 10_000,
            hunger_step: 1,
            energy_step_window_ms: 60_000,
            energy_sleep_gain: 5,
            energy_awake_drain: 1,
            initial_hunger: 50,
            initial_energy: 100,
            feed_cooldown_ms: 3_000,

            touch_reset_ms: 10_000,
            burst_window_ms: 2_000,
            burst_min_interactions: 2,
            inactivity_ms: 60_000,
            neglect_ms: 60_000,
            neglect_hunger: 70,
            hunger_settle_ms: 3_000,
            sleep_energy: 10,
            drowsy_energy: 20,

            night_idle_ms: 30_000,
            morning_idle_ms: 60_000,
            morning_happy_percent: 20,
            morning_roll_interval_ms: 60_000,

            personality_touch_quiet_ms: 2_000,
            personality_first_interval_ms: (3_000, 10_000),
            personality_interval_ms: (5_000, 15_000),

            ambient_quiet_ms: 10_000,
            ambient_first_interval_ms: 30_000,
            ambient_interval_ms: (20_000, 60_000),
            ambient_trigger_percent: 30,

            normal_contrast: 255,
            dimmed_contrast: 10,
            fade_ms: 1_000,
        }
    }
}
