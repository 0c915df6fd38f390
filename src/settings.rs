use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

use crate::config::BehaviorConfig;

pub const SETTINGS_ENV: &str = "MOCHI_SETTINGS";
const DEFAULT_SETTINGS_FILE: &str = "mochi-settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SoundSettings {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceSettings {
    pub sound: SoundSettings,
    pub personality_enabled: bool,
    pub ambient_enabled: bool,
    /// Feed the host's local hour to the time-of-day rules
    pub use_local_clock: bool,
    pub start_online: bool,
    pub behavior: BehaviorConfig,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            sound: SoundSettings::default(),
            personality_enabled: true,
            ambient_enabled: true,
            use_local_clock: true,
            start_online: true,
            behavior: BehaviorConfig::default(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<DeviceSettings>,
}

impl SettingsStore {
    /// `$MOCHI_SETTINGS`, or `mochi-settings.json` in the working directory.
    pub fn default_path() -> PathBuf {
        env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring unparsable settings in {}: {}",
                    path.display(),
                    err
                );
                DeviceSettings::default()
            })
        } else {
            DeviceSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn settings(&self) -> DeviceSettings {
        self.data.read().unwrap().clone()
    }

    pub fn sound(&self) -> SoundSettings {
        self.data.read().unwrap().sound.clone()
    }

    pub fn update_sound(&self, settings: SoundSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.sound = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    pub fn update(&self, settings: DeviceSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        *guard = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &DeviceSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: DeviceSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("mochi-{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let store = SettingsStore::new(temp_path("missing")).unwrap();
        assert_eq!(store.settings(), DeviceSettings::default());
    }

    #[test]
    fn test_update_persists_and_reloads() {
        let path = temp_path("persist");
        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_sound(SoundSettings {
                enabled: false,
                volume: 0.2,
            })
            .unwrap();

        let reopened = SettingsStore::new(path.clone()).unwrap();
        assert!(!reopened.sound().enabled);
        assert!(reopened.reload().is_ok());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_unparsable_file_falls_back() {
        let path = temp_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(store.settings(), DeviceSettings::default());
        assert!(store.reload().is_err());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_partial_file_keeps_behavior_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{"ambientEnabled": false, "behavior": {"longPressMs": 1000}}"#).unwrap();
        let settings = SettingsStore::new(path.clone()).unwrap().settings();
        assert!(!settings.ambient_enabled);
        assert!(settings.personality_enabled);
        assert_eq!(settings.behavior.long_press_ms, 1_000);
        assert_eq!(settings.behavior.feed_cooldown_ms, 3_000);
        let _ = fs::remove_file(path);
    }
}
