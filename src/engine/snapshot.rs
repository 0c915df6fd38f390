use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::emotion::Emotion;
use crate::utils::Millis;

/// Point-in-time device status, as printed by `status` and the heartbeat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSnapshot {
    pub boot_id: Uuid,
    pub emotion: Emotion,
    pub label: String,
    pub emotion_age_ms: Millis,
    pub expires_in_ms: Option<Millis>,
    pub hunger: u8,
    pub energy: u8,
    pub touch_count: u32,
    pub interaction_count: u32,
    pub is_online: bool,
    pub brightness: u8,
}

impl DeviceSnapshot {
    /// Single-line summary for the log.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}s) H:{}% E:{}% touches={} {}",
            self.label,
            self.emotion_age_ms / 1_000,
            self.hunger,
            self.energy,
            self.touch_count,
            if self.is_online { "online" } else { "offline" }
        )
    }
}
