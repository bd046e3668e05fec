//! CLI argument definitions for the Traction application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Traction extracts action items from a live transcription stream.
#[derive(Parser, Debug)]
#[command(name = "traction", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Read chunks from this file instead of stdin.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Label for the meeting this stream belongs to.
    #[arg(short = 's', long = "source-label")]
    pub source_label: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Submit extracted items to the configured sink when the stream ends.
    #[arg(long = "submit")]
    pub submit: bool,

    /// Print the flushed segment history when the stream ends.
    #[arg(long = "show-history")]
    pub show_history: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TRACTION_CONFIG env var > ~/.traction/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TRACTION_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the meeting label attached to submitted tasks.
    ///
    /// Priority: --source-label flag > config file value.
    pub fn resolve_source_label(&self, config_label: &str) -> String {
        self.source_label
            .clone()
            .unwrap_or_else(|| config_label.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".traction").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".traction").join("config.toml");
    }
    PathBuf::from("config.toml")
}
