//! Configuration management for Swipetodo
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    ANIMATION_MAX_MS, CHECKBOX_DEFAULT_ANIMATION_MS, LABEL_DEFAULT_ANIMATION_MS, LABEL_DEFAULT_PLACEHOLDER,
    SWIPE_DEFAULT_ACTIVATION_SLOP, SWIPE_DEFAULT_COMMIT_FRACTION, SWIPE_DEFAULT_MIN_COMMIT_DISTANCE,
    SWIPE_DEFAULT_SETTLE_MS, SWIPE_DEFAULT_VELOCITY_PROJECTION_MS, UI_DEFAULT_TICK_RATE_MS,
};
use crate::gesture::SwipeThreshold;
use crate::theme::{ColorMode, ThemeToken};
use crate::utils::color::parse_hex;
use crate::ui::components::checkbox::ReconcilePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Validation failures reported by [`Config::validate`]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("commit_fraction must be in (0, 1], got {0}")]
    CommitFraction(f32),

    #[error("min_commit_distance cannot be negative, got {0}")]
    MinCommitDistance(f32),

    #[error("activation_slop cannot be negative, got {0}")]
    ActivationSlop(f32),

    #[error("{name} must be between 1 and {max} ms, got {value}")]
    AnimationDuration { name: &'static str, value: u64, max: u64 },

    #[error("tick_rate_ms must be between 1 and 1000, got {0}")]
    TickRate(u64),

    #[error("theme colour {mode}.{token} must be #rrggbb, got '{value}'")]
    ThemeColor {
        mode: &'static str,
        token: &'static str,
        value: String,
    },

    #[error("unknown log level '{0}' (expected off, error, warn, info, debug or trace)")]
    LogLevel(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub swipe: SwipeConfig,
    pub checkbox: CheckboxConfig,
    pub label: LabelConfig,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable mouse support (required for swiping)
    pub mouse_enabled: bool,
    /// Palette used by the theme resolver
    pub color_mode: ColorMode,
    /// Event loop tick in milliseconds; animations advance on ticks
    pub tick_rate_ms: u64,
}

/// Swipe gesture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Fraction of the row width a leftward swipe must cover to commit
    pub commit_fraction: f32,
    /// Absolute commit distance in columns, floor for narrow rows
    pub min_commit_distance: f32,
    /// Release velocity projection in milliseconds (0 = displacement only)
    pub velocity_projection_ms: u64,
    /// Movement before the pan recognizer activates
    pub activation_slop: f32,
    /// Duration of the commit/cancel settle animation
    pub settle_duration_ms: u64,
}

/// Checkbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxConfig {
    /// How the local checked flag follows the external done flag
    pub reconcile: ReconcilePolicy,
    pub animation_ms: u64,
}

/// Label configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub animation_ms: u64,
    /// Shown by the text field while it is empty
    pub placeholder: String,
}

/// Colour overrides per display mode, as `#rrggbb`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub light: ThemeOverrides,
    pub dark: ThemeOverrides,
}

/// One optional colour per theme token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_backdrop: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to file
    pub enabled: bool,
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
            color_mode: ColorMode::Dark,
            tick_rate_ms: UI_DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_fraction: SWIPE_DEFAULT_COMMIT_FRACTION,
            min_commit_distance: SWIPE_DEFAULT_MIN_COMMIT_DISTANCE,
            velocity_projection_ms: SWIPE_DEFAULT_VELOCITY_PROJECTION_MS,
            activation_slop: SWIPE_DEFAULT_ACTIVATION_SLOP,
            settle_duration_ms: SWIPE_DEFAULT_SETTLE_MS,
        }
    }
}

impl Default for CheckboxConfig {
    fn default() -> Self {
        Self {
            reconcile: ReconcilePolicy::default(),
            animation_ms: CHECKBOX_DEFAULT_ANIMATION_MS,
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            animation_ms: LABEL_DEFAULT_ANIMATION_MS,
            placeholder: LABEL_DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl SwipeConfig {
    /// Commit policy derived from this configuration
    pub fn threshold(&self) -> SwipeThreshold {
        SwipeThreshold {
            commit_fraction: self.commit_fraction,
            min_distance: self.min_commit_distance,
            velocity_projection: Duration::from_millis(self.velocity_projection_ms),
        }
    }

    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_duration_ms)
    }
}

impl ThemeConfig {
    pub fn overrides(&self, mode: ColorMode) -> &ThemeOverrides {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }
}

impl ThemeOverrides {
    pub fn get(&self, token: ThemeToken) -> Option<&str> {
        let value = match token {
            ThemeToken::Highlight => &self.highlight,
            ThemeToken::BoxStroke => &self.box_stroke,
            ThemeToken::Checkmark => &self.checkmark,
            ThemeToken::ActiveText => &self.active_text,
            ThemeToken::DoneText => &self.done_text,
            ThemeToken::RowBackground => &self.row_background,
            ThemeToken::DeleteBackdrop => &self.delete_backdrop,
        };
        value.as_deref()
    }
}

impl LoggingConfig {
    /// Parse the configured level name
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.level.clone()))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::find_config_file() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("swipetodo.toml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        // 2. Check XDG config directory
        let xdg_config = dirs::config_dir()?.join("swipetodo").join("config.toml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let swipe = &self.swipe;
        if !(swipe.commit_fraction > 0.0 && swipe.commit_fraction <= 1.0) {
            return Err(ConfigError::CommitFraction(swipe.commit_fraction));
        }
        if swipe.min_commit_distance < 0.0 || swipe.min_commit_distance.is_nan() {
            return Err(ConfigError::MinCommitDistance(swipe.min_commit_distance));
        }
        if swipe.activation_slop < 0.0 || swipe.activation_slop.is_nan() {
            return Err(ConfigError::ActivationSlop(swipe.activation_slop));
        }

        check_duration("settle_duration_ms", swipe.settle_duration_ms)?;
        check_duration("checkbox.animation_ms", self.checkbox.animation_ms)?;
        check_duration("label.animation_ms", self.label.animation_ms)?;

        if self.ui.tick_rate_ms == 0 || self.ui.tick_rate_ms > 1000 {
            return Err(ConfigError::TickRate(self.ui.tick_rate_ms));
        }

        for (mode, name) in [(ColorMode::Light, "light"), (ColorMode::Dark, "dark")] {
            let overrides = self.theme.overrides(mode);
            for token in ThemeToken::ALL {
                if let Some(value) = overrides.get(token) {
                    if parse_hex(value).is_none() {
                        return Err(ConfigError::ThemeColor {
                            mode: name,
                            token: token.name(),
                            value: value.to_string(),
                        });
                    }
                }
            }
        }

        self.logging.level_filter()?;
        Ok(())
    }
}

fn check_duration(name: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 || value > ANIMATION_MAX_MS {
        return Err(ConfigError::AnimationDuration {
            name,
            value,
            max: ANIMATION_MAX_MS,
        });
    }
    Ok(())
}
