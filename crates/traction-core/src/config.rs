use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TractionError};

/// Top-level configuration for the Traction application.
///
/// Loaded from `~/.traction/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TractionConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub sink: SinkConfig,
}

impl TractionConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TractionConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TractionError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Label attached to submitted items as their source meeting title.
    pub source_label: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            source_label: "Untitled Meeting".to_string(),
        }
    }
}

/// Incremental extraction pass settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Transcript length floor before any non-final pass may trigger.
    pub min_transcript_chars: usize,
    /// Modulus applied to the transcript length for the trigger band.
    pub trigger_modulus: usize,
    /// Width of the trigger band: a pass fires when `len % modulus < window`.
    pub trigger_window: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_transcript_chars: 200,
            trigger_modulus: 100,
            trigger_window: 10,
        }
    }
}

/// Streaming session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Milliseconds of buffered time before a segment is flushed.
    pub flush_gap_ms: u64,
    /// Buffered character count above which a segment is flushed.
    pub flush_max_chars: usize,
    /// Seconds to wait for a graceful stop before the force-stop path fires.
    pub stop_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            flush_gap_ms: 2_000,
            flush_max_chars: 100,
            stop_timeout_secs: 5,
        }
    }
}

/// Task sink credentials and submission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Bearer token for the task-tracking API.
    pub api_key: String,
    /// Target database identifier within the task tracker.
    pub database_id: String,
    /// Base URL of the task-tracking API.
    pub endpoint: String,
    /// Submit newly extracted items without a manual submit action.
    pub auto_submit: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            database_id: String::new(),
            endpoint: "https://api.notion.com".to_string(),
            auto_submit: false,
        }
    }
}

impl SinkConfig {
    /// Whether both credentials required for submission are present.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.database_id.is_empty()
    }
}
