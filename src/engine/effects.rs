use crate::audio::SoundPlayer;
use crate::emotion::EmotionTransition;
use crate::face::{apply, RenderHint};

use super::tick::TickOutput;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Receiver of visual effects; the display driver in a real device.
pub trait FaceSink {
    fn render(&mut self, transition: &EmotionTransition, hint: &RenderHint);
    fn set_contrast(&mut self, contrast: u8);
}

/// Logs face changes instead of drawing them.
#[derive(Debug, Default)]
pub struct LogFace;

impl FaceSink for LogFace {
    fn render(&mut self, transition: &EmotionTransition, hint: &RenderHint) {
        log_info!(
            "face: {} (eyes {:?}, {:?}, {:?})",
            hint.label,
            hint.eye_mood,
            transition.cause,
            transition.expiry_ms
        );
    }

    fn set_contrast(&mut self, contrast: u8) {
        log_info!("contrast: {}", contrast);
    }
}

/// Routes a tick's effects to the face and the speaker. Keeps the priority
/// logic free of any rendering or sound wiring.
pub struct EffectDispatcher {
    face: Box<dyn FaceSink + Send>,
    sound: Box<dyn SoundPlayer + Send>,
    last_contrast: Option<u8>,
}

impl EffectDispatcher {
    pub fn new(face: Box<dyn FaceSink + Send>, sound: Box<dyn SoundPlayer + Send>) -> Self {
        Self {
            face,
            sound,
            last_contrast: None,
        }
    }

    pub fn dispatch(&mut self, output: &TickOutput) {
        if let Some(transition) = output.last_transition() {
            let hint = apply(transition.to);
            self.face.render(transition, &hint);
        }

        if !output.sounds.is_empty() {
            if let Err(err) = self.sound.play(&output.sounds) {
                log_warn!("sound failed: {}", err);
            }
        }

        // Contrast writes only go out on change; fades update it every tick.
        if self.last_contrast != Some(output.brightness) {
            self.last_contrast = Some(output.brightness);
            self.face.set_contrast(output.brightness);
        }
    }
}
