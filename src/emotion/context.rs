use serde::{Deserialize, Serialize};

use crate::config::BehaviorConfig;
use crate::utils::{elapsed, Millis};

/// External signals and interaction history, snapshotted once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionContext {
    pub is_online: bool,
    pub is_interacting: bool,
    pub last_interaction_at: Millis,
    /// Monotonic for the whole session
    pub interaction_count: u32,
    /// Petting streak; drops to zero after a quiet spell
    pub touch_count: u32,
    pub last_touch_at: Millis,
}

impl InteractionContext {
    pub fn new(now: Millis, is_online: bool) -> Self {
        Self {
            is_online,
            is_interacting: false,
            last_interaction_at: now,
            interaction_count: 0,
            touch_count: 0,
            last_touch_at: now,
        }
    }

    /// Snapshots connectivity. Returns true when the link just came back.
    pub fn set_online(&mut self, is_online: bool) -> bool {
        let reconnected = is_online && !self.is_online;
        self.is_online = is_online;
        reconnected
    }

    pub fn register_interaction(&mut self, now: Millis) {
        self.is_interacting = true;
        self.last_interaction_at = now;
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    /// Counts one touch and returns the new streak length.
    pub fn register_touch(&mut self, now: Millis) -> u32 {
        self.touch_count = self.touch_count.saturating_add(1);
        self.last_touch_at = now;
        self.touch_count
    }

    /// Marks a contact that is not part of the petting streak (long press).
    pub fn register_contact(&mut self, now: Millis) {
        self.last_touch_at = now;
    }

    /// Applies the quiet-time resets. Returns true if the touch streak ended.
    pub fn expire(&mut self, now: Millis, config: &BehaviorConfig) -> bool {
        if self.is_interacting && elapsed(now, self.last_interaction_at) >= config.burst_window_ms {
            self.is_interacting = false;
        }

        if self.touch_count > 0 && elapsed(now, self.last_touch_at) > config.touch_reset_ms {
            self.touch_count = 0;
            return true;
        }
        false
    }

    pub fn since_touch(&self, now: Millis) -> Millis {
        elapsed(now, self.last_touch_at)
    }

    pub fn since_interaction(&self, now: Millis) -> Millis {
        elapsed(now, self.last_interaction_at)
    }

    pub fn is_burst(&self, now: Millis, config: &BehaviorConfig) -> bool {
        self.is_interacting
            && self.since_interaction(now) < config.burst_window_ms
            && self.interaction_count >= config.burst_min_interactions
    }
}
