//! Runtime settings
//!
//! Read once at startup from an optional JSON file. Missing fields take their
//! defaults, so a file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::narrative::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Environment variable naming the settings file
pub const SETTINGS_PATH_ENV: &str = "BURGER_STACK_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Narrative text generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeSettings {
    /// Ask the generator at all (false = always use fallback text)
    pub enabled: bool,
    pub model: String,
    pub base_url: String,
    /// Overrides `GEMINI_API_KEY` / `API_KEY`
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 15,
        }
    }
}

/// Demo autopilot pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSettings {
    /// Delay between autopilot actions at level 1 (milliseconds)
    pub action_interval_ms: u64,
    /// Extra delay per level above 1 (milliseconds); must be > 0 for a run to end
    pub slowdown_per_level_ms: u64,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            action_interval_ms: 700,
            slowdown_per_level_ms: 100,
        }
    }
}

impl AutopilotSettings {
    /// Delay between actions on `level`
    pub fn pace(&self, level: u32) -> Duration {
        let extra = self
            .slowdown_per_level_ms
            .saturating_mul(level.saturating_sub(1) as u64);
        Duration::from_millis(self.action_interval_ms.saturating_add(extra))
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed for reproducible orders (random if unset)
    pub seed: Option<u64>,
    pub narrative: NarrativeSettings,
    pub autopilot: AutopilotSettings,
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from the file named by `BURGER_STACK_SETTINGS`, or defaults.
    ///
    /// A broken file is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.seed.is_none());
        assert!(settings.narrative.enabled);
        assert_eq!(settings.narrative.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(settings.autopilot.action_interval_ms, 700);
    }

    #[test]
    fn test_autopilot_slows_with_level() {
        let autopilot = AutopilotSettings::default();
        assert_eq!(autopilot.pace(1), Duration::from_millis(700));
        assert_eq!(autopilot.pace(5), Duration::from_millis(1100));
        assert!(autopilot.pace(9) > autopilot.pace(8));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{"seed": 42, "narrative": {"enabled": false}}"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.narrative.enabled);
        assert_eq!(settings.narrative.timeout_secs, 15);
        assert_eq!(settings.autopilot.action_interval_ms, 700);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{seed:"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
