use serde::{Deserialize, Serialize};

use crate::config::BehaviorConfig;
use crate::utils::{elapsed, Millis};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

pub const NEED_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FeedOutcome {
    /// Fed again inside the cooldown; nothing changed
    TooSoon,
    /// Hunger was below 70: -30
    NomNom,
    /// Hunger was 70-89: -20
    Stuffed,
    /// Hunger was 90 or more: reset to 50
    ThrowUp,
}

impl FeedOutcome {
    /// How long the feeding reaction plays; hunger drift pauses meanwhile.
    pub fn reaction_ms(self) -> Millis {
        match self {
            FeedOutcome::TooSoon => 0,
            FeedOutcome::NomNom => 2_000,
            FeedOutcome::Stuffed => 2_500,
            FeedOutcome::ThrowUp => 3_000,
        }
    }
}

/// Hunger bands, in increasing hunger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HungerTier {
    /// below 20
    Full,
    /// 20-49
    Normal,
    /// 50-69
    Content,
    /// 70-89
    Hungry,
    /// 90 and above
    Starving,
}

impl HungerTier {
    pub fn from_hunger(hunger: u8) -> Self {
        match hunger {
            0..=19 => HungerTier::Full,
            20..=49 => HungerTier::Normal,
            50..=69 => HungerTier::Content,
            70..=89 => HungerTier::Hungry,
            _ => HungerTier::Starving,
        }
    }
}

/// Hunger and energy, both 0..=100, drifting on fixed wall-clock windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedsModel {
    hunger: u8,
    energy: u8,
    last_hunger_tick: Millis,
    last_energy_tick: Millis,
    last_feed_at: Option<Millis>,
    feeding_until: Option<Millis>,
    #[serde(skip)]
    config: BehaviorConfig,
}

impl NeedsModel {
    pub fn new(config: &BehaviorConfig, now: Millis) -> Self {
        Self::with_levels(config, now, config.initial_hunger, config.initial_energy)
    }

    pub fn with_levels(config: &BehaviorConfig, now: Millis, hunger: u8, energy: u8) -> Self {
        Self {
            hunger: hunger.min(NEED_MAX),
            energy: energy.min(NEED_MAX),
            last_hunger_tick: now,
            last_energy_tick: now,
            last_feed_at: None,
            feeding_until: None,
            config: config.clone(),
        }
    }

    pub fn hunger(&self) -> u8 {
        self.hunger
    }

    pub fn energy(&self) -> u8 {
        self.energy
    }

    pub fn hunger_tier(&self) -> HungerTier {
        HungerTier::from_hunger(self.hunger)
    }

    /// True while a feeding reaction is still playing.
    pub fn is_feeding(&self, now: Millis) -> bool {
        self.feeding_until.map(|until| now < until).unwrap_or(false)
    }

    /// Applies at most one hunger step and one energy step.
    pub fn tick(&mut self, now: Millis, current_emotion_is_sleeping: bool) {
        if elapsed(now, self.last_hunger_tick) >= self.config.hunger_step_window_ms
            && !self.is_feeding(now)
        {
            self.last_hunger_tick = now;
            if self.hunger < NEED_MAX {
                self.hunger = self
                    .hunger
                    .saturating_add(self.config.hunger_step)
                    .min(NEED_MAX);
                log_debug!("hunger: {}%", self.hunger);
            }
        }

        if elapsed(now, self.last_energy_tick) >= self.config.energy_step_window_ms {
            self.last_energy_tick = now;
            if current_emotion_is_sleeping {
                self.energy = self
                    .energy
                    .saturating_add(self.config.energy_sleep_gain)
                    .min(NEED_MAX);
                log_debug!("energy recovering: {}%", self.energy);
            } else {
                self.energy = self.energy.saturating_sub(self.config.energy_awake_drain);
                log_debug!("energy: {}%", self.energy);
            }
        }
    }

    /// Feeds once. The outcome is picked from hunger before the reduction.
    pub fn feed(&mut self, now: Millis) -> FeedOutcome {
        if let Some(last) = self.last_feed_at {
            if elapsed(now, last) < self.config.feed_cooldown_ms {
                return FeedOutcome::TooSoon;
            }
        }

        let before = self.hunger;
        let outcome = match before {
            0..=69 => {
                self.hunger = before.saturating_sub(30);
                FeedOutcome::NomNom
            }
            70..=89 => {
                self.hunger = before.saturating_sub(20);
                FeedOutcome::Stuffed
            }
            _ => {
                self.hunger = 50;
                FeedOutcome::ThrowUp
            }
        };

        self.last_feed_at = Some(now);
        self.feeding_until = Some(now + outcome.reaction_ms());
        log_info!("fed at hunger {}% -> {:?}, hunger now {}%", before, outcome, self.hunger);
        outcome
    }
}
