use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

use super::cues::SoundCue;

const SAMPLE_RATE: u32 = 44_100;

/// Finite mono sine tone; a zero frequency yields silence of the same length.
pub struct ToneSource {
    frequency_hz: f32,
    total_samples: usize,
    num_sample: usize,
}

impl ToneSource {
    pub fn new(cue: SoundCue) -> Self {
        Self {
            frequency_hz: cue.frequency_hz as f32,
            total_samples: (SAMPLE_RATE as usize * cue.duration_ms as usize) / 1_000,
            num_sample: 0,
        }
    }

    pub fn silence(duration_ms: u32) -> Self {
        Self::new(SoundCue::new(0, duration_ms))
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }
        let t = self.num_sample as f32 / SAMPLE_RATE as f32;
        self.num_sample += 1;

        if self.frequency_hz <= 0.0 {
            return Some(0.0);
        }
        // Half amplitude, matching the speaker's comfortable level.
        Some((2.0 * PI * self.frequency_hz * t).sin() * 0.5)
    }
}

impl Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples - self.num_sample)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(
            (self.total_samples as u64 * 1_000) / SAMPLE_RATE as u64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length_matches_cue() {
        let tone = ToneSource::new(SoundCue::new(440, 200));
        assert_eq!(tone.count(), 8_820);
    }

    #[test]
    fn test_silence_is_flat() {
        assert!(ToneSource::silence(50).all(|sample| sample == 0.0));
    }
}
