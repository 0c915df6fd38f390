use tokio::sync::watch;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::engine::{DeviceBehaviorEngine, DeviceSnapshot, EffectDispatcher, TickInput};
use crate::utils::{local_hour, Millis};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Roughly 30 Hz, the rate the device firmware polls its touch pin.
pub const TICK_INTERVAL_MS: u64 = 33;

/// Pin levels and link state written by the host, sampled once per tick.
pub struct DeviceInputs {
    pub touch: watch::Receiver<bool>,
    pub online: watch::Receiver<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub use_local_clock: bool,
    pub heartbeat_every_ticks: u32,
}

impl LoopSettings {
    pub fn from_env(use_local_clock: bool) -> Self {
        let debug_mode = std::env::var("MOCHI_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            use_local_clock,
            heartbeat_every_ticks: if debug_mode { 30 } else { 300 },
        }
    }
}

pub async fn device_loop(
    mut engine: DeviceBehaviorEngine,
    mut effects: EffectDispatcher,
    inputs: DeviceInputs,
    snapshot_tx: watch::Sender<DeviceSnapshot>,
    settings: LoopSettings,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let boot = Instant::now();
    let heartbeat_every = settings.heartbeat_every_ticks.max(1);
    let mut ticks: u32 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = boot.elapsed().as_millis() as Millis;
                let input = TickInput {
                    now,
                    touch: *inputs.touch.borrow(),
                    is_online: *inputs.online.borrow(),
                    local_hour: settings.use_local_clock.then(local_hour),
                };

                let output = engine.tick(input);
                effects.dispatch(&output);

                let snapshot = engine.snapshot(now);
                ticks = ticks.wrapping_add(1);
                if ticks % heartbeat_every == 0 {
                    log_info!("heartbeat: {}", snapshot.summary());
                }
                snapshot_tx.send_replace(snapshot);
            }
            _ = cancel_token.cancelled() => {
                log_info!("device loop shutting down");
                break;
            }
        }
    }
}
