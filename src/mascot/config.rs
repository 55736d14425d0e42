//! Mascot configuration: timings, bubble copy and the idle table.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::idle_actions::{
    default_click_messages, default_idle_actions, IdleAction, GREETING_MESSAGE, RESTORE_MESSAGE,
};
use super::interface::MascotError;

pub const CONFIG_LABEL: &str = "Mascot";

/// Upper bound for every scheduled duration (one day).
pub const MAX_DURATION_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MascotConfig {
    /// Delay after mount before the greeting wave.
    pub boot_delay_ms: u64,
    /// How long the greeting wave lasts.
    pub boot_wave_ms: u64,
    /// Period of the idle check. Fixed phase, counted from mount.
    pub poll_interval_ms: u64,
    /// Quiet time before idle actions start.
    pub idle_threshold_ms: u64,
    /// Bubble lifetime for idle-action lines.
    pub bubble_auto_hide_ms: u64,
    /// How long the happy reaction to a click lasts.
    pub click_happy_ms: u64,
    /// How long the wave after restore lasts.
    pub restore_wave_ms: u64,

    pub greeting: String,
    pub restore_message: String,
    pub click_messages: Vec<String>,
    pub idle_actions: Vec<IdleAction>,
}

impl Default for MascotConfig {
    fn default() -> Self {
        Self {
            boot_delay_ms: 2000,
            boot_wave_ms: 3000,
            poll_interval_ms: 4000,
            idle_threshold_ms: 8000,
            bubble_auto_hide_ms: 2000,
            click_happy_ms: 2000,
            restore_wave_ms: 2000,
            greeting: GREETING_MESSAGE.to_string(),
            restore_message: RESTORE_MESSAGE.to_string(),
            click_messages: default_click_messages(),
            idle_actions: default_idle_actions(),
        }
    }
}

impl MascotConfig {
    pub fn validate(&self) -> Result<(), MascotError> {
        if self.poll_interval_ms == 0 {
            return Err(MascotError::InvalidConfig(
                "poll_interval_ms must be positive".to_string(),
            ));
        }
        if self.idle_threshold_ms == 0 {
            return Err(MascotError::InvalidConfig(
                "idle_threshold_ms must be positive".to_string(),
            ));
        }
        let timings = [
            ("boot_delay_ms", self.boot_delay_ms),
            ("boot_wave_ms", self.boot_wave_ms),
            ("poll_interval_ms", self.poll_interval_ms),
            ("bubble_auto_hide_ms", self.bubble_auto_hide_ms),
            ("click_happy_ms", self.click_happy_ms),
            ("restore_wave_ms", self.restore_wave_ms),
        ];
        if let Some((name, ms)) = timings.iter().find(|(_, ms)| *ms > MAX_DURATION_MS) {
            return Err(MascotError::InvalidConfig(format!(
                "{} is {} ms, above the {} ms limit",
                name, ms, MAX_DURATION_MS
            )));
        }
        if self.idle_actions.is_empty() {
            return Err(MascotError::InvalidConfig(
                "idle_actions must not be empty".to_string(),
            ));
        }
        if let Some(i) = self.idle_actions.iter().position(|a| a.duration_ms == 0) {
            return Err(MascotError::InvalidConfig(format!(
                "idle_actions[{}] has zero duration",
                i
            )));
        }
        if let Some(i) = self
            .idle_actions
            .iter()
            .position(|a| a.duration_ms > MAX_DURATION_MS)
        {
            return Err(MascotError::InvalidConfig(format!(
                "idle_actions[{}] lasts longer than {} ms",
                i, MAX_DURATION_MS
            )));
        }
        if self.click_messages.is_empty() {
            return Err(MascotError::InvalidConfig(
                "click_messages must not be empty".to_string(),
            ));
        }
        if self.click_messages.iter().any(|m| m.trim().is_empty()) {
            return Err(MascotError::InvalidConfig(
                "click_messages must not contain blank lines".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load config from disk, falling back to defaults when the file is
/// missing, unparsable or fails validation.
pub fn load_config(path: &Path) -> MascotConfig {
    let config: MascotConfig = crate::config::load_json_config(path, CONFIG_LABEL);
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            tracing::warn!("[{}] {}, using defaults", CONFIG_LABEL, e);
            MascotConfig::default()
        }
    }
}

/// Load and validate, surfacing every failure.
pub fn try_load_config(path: &Path) -> Result<MascotConfig, MascotError> {
    let config: MascotConfig = crate::config::try_load_json_config(path)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &MascotConfig) -> Result<(), MascotError> {
    config.validate()?;
    crate::config::save_json_config(path, config, CONFIG_LABEL)
}
