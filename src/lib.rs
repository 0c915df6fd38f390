pub mod audio;
pub mod config;
pub mod device;
pub mod emotion;
pub mod engine;
pub mod face;
pub mod gesture;
pub mod needs;
pub mod settings;
pub mod utils;

use anyhow::{Context, Result};

use audio::default_player;
use device::{run_console, DeviceController, LoopSettings};
use engine::{DeviceBehaviorEngine, EffectDispatcher, LogFace};
use settings::{DeviceSettings, SettingsStore};

pub use config::BehaviorConfig;
pub use emotion::{Emotion, EmotionCause, EmotionScheduler, EmotionState};
pub use engine::{DeviceSnapshot, TickInput, TickOutput};
pub use gesture::{GestureClassifier, GestureEvent};
pub use needs::{FeedOutcome, NeedsModel};

/// Builds a ready-to-run engine from persisted settings.
pub fn build_engine(settings: &DeviceSettings) -> DeviceBehaviorEngine {
    let mut engine =
        DeviceBehaviorEngine::new(settings.behavior.clone(), 0, settings.start_online);
    engine.set_personality_enabled(settings.personality_enabled);
    engine.set_ambient_enabled(settings.ambient_enabled);
    engine
}

async fn host(settings: DeviceSettings) -> Result<()> {
    let engine = build_engine(&settings);
    let effects = EffectDispatcher::new(
        Box::new(LogFace),
        default_player(settings.sound.enabled, settings.sound.volume),
    );

    let mut controller = DeviceController::new(settings.start_online);
    controller.start(
        engine,
        effects,
        LoopSettings::from_env(settings.use_local_clock),
    )?;

    let console_result = run_console(&controller).await;
    controller.stop().await?;
    console_result
}

fn try_run() -> Result<()> {
    let store = SettingsStore::new(SettingsStore::default_path())?;
    log::info!("Settings loaded from {}", store.path().display());

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(host(store.settings()))
}

pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Mochi starting up...");

    if let Err(err) = try_run() {
        log::error!("Mochi stopped: {err:?}");
        std::process::exit(1);
    }
}
