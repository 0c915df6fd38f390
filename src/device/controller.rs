use anyhow::{bail, Context, Result};
use log::info;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

use crate::engine::{DeviceBehaviorEngine, DeviceSnapshot, EffectDispatcher};

use super::loop_worker::{device_loop, DeviceInputs, LoopSettings};

/// Gap between the two taps of a simulated double tap.
const DOUBLE_TAP_GAP_MS: u64 = 150;
/// Length of a simulated tap.
const TAP_HOLD_MS: u64 = 80;

/// Owns the running device loop and the simulated touch pin.
pub struct DeviceController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    touch_tx: watch::Sender<bool>,
    online_tx: watch::Sender<bool>,
    snapshot_rx: Option<watch::Receiver<DeviceSnapshot>>,
}

impl DeviceController {
    pub fn new(start_online: bool) -> Self {
        let (touch_tx, _) = watch::channel(false);
        let (online_tx, _) = watch::channel(start_online);
        Self {
            handle: None,
            cancel_token: None,
            touch_tx,
            online_tx,
            snapshot_rx: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start(
        &mut self,
        engine: DeviceBehaviorEngine,
        effects: EffectDispatcher,
        settings: LoopSettings,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("device loop already running");
        }

        let cancel_token = CancellationToken::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot(0));
        let inputs = DeviceInputs {
            touch: self.touch_tx.subscribe(),
            online: self.online_tx.subscribe(),
        };

        let handle = tokio::spawn(device_loop(
            engine,
            effects,
            inputs,
            snapshot_tx,
            settings,
            cancel_token.clone(),
        ));

        info!("device loop started");
        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.snapshot_rx = Some(snapshot_rx);
        Ok(())
    }

    pub fn set_touch(&self, pressed: bool) {
        self.touch_tx.send_replace(pressed);
    }

    pub fn set_online(&self, online: bool) {
        self.online_tx.send_replace(online);
    }

    /// Holds the pin down for `hold`, then releases it.
    pub async fn pulse(&self, hold: Duration) {
        self.set_touch(true);
        sleep(hold).await;
        self.set_touch(false);
    }

    pub async fn tap(&self) {
        self.pulse(Duration::from_millis(TAP_HOLD_MS)).await;
    }

    pub async fn double_tap(&self) {
        self.tap().await;
        sleep(Duration::from_millis(DOUBLE_TAP_GAP_MS)).await;
        self.tap().await;
    }

    /// Latest snapshot published by the loop, if it has been started.
    pub fn snapshot(&self) -> Option<DeviceSnapshot> {
        self.snapshot_rx.as_ref().map(|rx| rx.borrow().clone())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("device loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}
