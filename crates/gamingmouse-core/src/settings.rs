// GamingMouse Settings Module
// User-tunable runtime settings, separate from scheme configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::DEFAULT_DEBOUNCE;
use crate::transform::DEFAULT_CACHE_CAPACITY;

/// Runtime settings
///
/// Loaded from a TOML file (default: ~/.config/gamingmouse/settings.toml).
/// Every key is optional; a missing file means defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Number of transformer chains kept in the cache
    cache_capacity: usize,

    /// Quiet period before a configuration change is reloaded
    debounce: Duration,

    /// Trace every input value routed through the device registry
    verbose_input: bool,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    pipeline: Option<PipelineSettings>,

    #[serde(default)]
    watch: Option<WatchSettings>,

    #[serde(default)]
    logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PipelineSettings {
    #[serde(default)]
    cache_capacity: Option<i64>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct WatchSettings {
    #[serde(default)]
    debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LoggingSettings {
    #[serde(default)]
    verbose_input: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            debounce: DEFAULT_DEBOUNCE,
            verbose_input: false,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(capacity) = toml_settings.pipeline.and_then(|p| p.cache_capacity) {
            settings.cache_capacity = match usize::try_from(capacity) {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(SettingsError::InvalidValue(format!(
                        "cache_capacity must be positive, got {}",
                        capacity
                    )))
                }
            };
        }

        if let Some(ms) = toml_settings.watch.and_then(|w| w.debounce_ms) {
            settings.debounce = Duration::from_millis(ms);
        }

        if let Some(verbose) = toml_settings.logging.and_then(|l| l.verbose_input) {
            settings.verbose_input = verbose;
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gamingmouse").join("settings.toml"))
    }

    /// Load from default location (~/.config/gamingmouse/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::new())
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn verbose_input(&self) -> bool {
        self.verbose_input
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# GamingMouse Settings
# Place this file at: ~/.config/gamingmouse/settings.toml

[pipeline]
# Number of transformer chains kept in memory
cache_capacity = 16

[watch]
# Quiet period before a changed config file is reloaded
debounce_ms = 100

[logging]
# Trace every HID input value (very noisy)
verbose_input = false
"#
}
