use serde::{Deserialize, Serialize};

use crate::config::BehaviorConfig;
use crate::utils::{elapsed, Millis};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct Fade {
    from: u8,
    to: u8,
    started_at: Millis,
}

/// Display contrast with linear fades between the normal and dimmed levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrightnessController {
    normal: u8,
    dimmed: u8,
    fade_ms: Millis,
    current: u8,
    dim_target: bool,
    fade: Option<Fade>,
}

impl BrightnessController {
    pub fn new(config: &BehaviorConfig) -> Self {
        Self {
            normal: config.normal_contrast,
            dimmed: config.dimmed_contrast,
            fade_ms: config.fade_ms,
            current: config.normal_contrast,
            dim_target: false,
            fade: None,
        }
    }

    pub fn contrast(&self) -> u8 {
        self.current
    }

    /// True once a dim has been requested, even while still fading.
    pub fn is_dimmed(&self) -> bool {
        self.dim_target
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn dim(&mut self, now: Millis) {
        if self.dim_target {
            return;
        }
        self.dim_target = true;
        self.start_fade(self.dimmed, now);
    }

    pub fn brighten(&mut self, now: Millis) {
        if !self.dim_target {
            return;
        }
        self.dim_target = false;
        self.start_fade(self.normal, now);
    }

    fn start_fade(&mut self, to: u8, now: Millis) {
        self.fade = Some(Fade {
            from: self.current,
            to,
            started_at: now,
        });
    }

    /// Advances the fade and returns the contrast to send to the panel.
    pub fn update(&mut self, now: Millis) -> u8 {
        let Some(fade) = self.fade else {
            return self.current;
        };

        let spent = elapsed(now, fade.started_at);
        if spent >= self.fade_ms {
            self.current = fade.to;
            self.fade = None;
            return self.current;
        }

        let from = fade.from as i64;
        let to = fade.to as i64;
        let step = (to - from) * spent as i64 / self.fade_ms.max(1) as i64;
        self.current = (from + step).clamp(0, u8::MAX as i64) as u8;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_and_brighten_fade_linearly() {
        let mut brightness = BrightnessController::new(&BehaviorConfig::default());
        assert_eq!(brightness.update(0), 255);

        brightness.dim(1_000);
        assert_eq!(brightness.update(1_000), 255);
        assert_eq!(brightness.update(1_500), 133);
        assert_eq!(brightness.update(2_000), 10);
        assert!(!brightness.is_fading());

        brightness.brighten(5_000);
        assert_eq!(brightness.update(5_500), 132);
        assert_eq!(brightness.update(6_200), 255);
    }

    #[test]
    fn test_repeated_requests_are_ignored() {
        let mut brightness = BrightnessController::new(&BehaviorConfig::default());
        brightness.brighten(0);
        assert!(!brightness.is_fading());

        brightness.dim(0);
        brightness.dim(900);
        assert_eq!(brightness.update(1_000), 10);
    }

    #[test]
    fn test_reversal_starts_from_current_level() {
        let mut brightness = BrightnessController::new(&BehaviorConfig::default());
        brightness.dim(0);
        assert_eq!(brightness.update(500), 133);
        brightness.brighten(500);
        assert_eq!(brightness.update(500), 133);
        assert_eq!(brightness.update(1_500), 255);
    }
}
