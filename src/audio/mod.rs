pub mod cues;
#[cfg(feature = "audio")]
pub mod engine;
#[cfg(feature = "audio")]
pub mod tone;

pub use cues::{feed_cue, touch_cue, SoundCue, RECONNECT_CHIME};
#[cfg(feature = "audio")]
pub use engine::AudioEngineHandle;

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Output side of the sound triggers produced by the engine.
pub trait SoundPlayer {
    fn play(&mut self, cues: &[SoundCue]) -> Result<(), String>;
}

/// Writes cues to the log instead of a speaker.
#[derive(Debug, Default)]
pub struct LogSoundPlayer;

impl SoundPlayer for LogSoundPlayer {
    fn play(&mut self, cues: &[SoundCue]) -> Result<(), String> {
        for cue in cues {
            log_info!("beep {}Hz for {}ms", cue.frequency_hz, cue.duration_ms);
        }
        Ok(())
    }
}

/// Swallows every cue; used when sound is disabled in settings.
#[derive(Debug, Default)]
pub struct MutedSoundPlayer;

impl SoundPlayer for MutedSoundPlayer {
    fn play(&mut self, _cues: &[SoundCue]) -> Result<(), String> {
        Ok(())
    }
}

/// Picks the player for the current build and settings.
pub fn default_player(enabled: bool, volume: f32) -> Box<dyn SoundPlayer + Send> {
    if !enabled {
        return Box::new(MutedSoundPlayer);
    }

    #[cfg(feature = "audio")]
    return Box::new(AudioEngineHandle::new(volume));

    #[cfg(not(feature = "audio"))]
    {
        let _ = volume;
        return Box::new(LogSoundPlayer);
    }
}
