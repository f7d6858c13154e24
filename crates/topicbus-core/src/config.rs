//! Configuration for the event bus
//!
//! Provides the bus configuration and its file handling. Files may be
//! written as TOML or JSON; the format is chosen by file extension.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How handler-driven mutations affect an in-flight publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Copy the topic's handlers when publish starts.
    ///
    /// Handlers added or removed during the call never change which handlers
    /// that call invokes.
    #[default]
    Snapshot,
    /// Walk the topic's handler sequence by index while it changes.
    ///
    /// The sequence and the step count are both taken when publish starts.
    /// Each step invokes the handler now at that index, or skips the step if
    /// there is none. Removing an earlier handler shifts later ones down so
    /// one of them is skipped. Appended handlers run only if earlier removals
    /// bring them within the original step count. Removing or replacing the
    /// whole topic detaches the sequence: the call keeps walking it as it was.
    Live,
}

impl std::fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot => write!(f, "snapshot"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Configuration for the event bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Re-entrancy policy for publish.
    pub dispatch: DispatchMode,
    /// Emit a trace event for every handler invocation.
    pub trace_dispatch: bool,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchMode::Snapshot,
            trace_dispatch: false,
        }
    }
}

impl EventBusConfig {
    /// Config using live dispatch
    pub fn live() -> Self {
        Self {
            dispatch: DispatchMode::Live,
            ..Default::default()
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        tracing::debug!(path = %path.display(), dispatch = %config.dispatch, "Loaded event bus config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }
}

enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat {
                extension: other.unwrap_or_default().to_string(),
            }),
        }
    }
}
