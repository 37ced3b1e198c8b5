//! Dashboard settings persistence.
//!
//! This module handles loading and saving the view preferences that shape
//! every window computation: bucket count, histogram bins, selected channels
//! and the alert threshold.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis::DEFAULT_HISTOGRAM_BINS;
use crate::telemetry::ChannelId;

/// Bucket count used when none is configured
pub const DEFAULT_BUCKET_COUNT: usize = 200;

/// Recording gap that starts a new session, in seconds
pub const DEFAULT_SESSION_GAP_SECS: f64 = 5.0;

/// Errors that can occur while reading or writing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Time buckets across the visible window
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Selected channels; the first one drives the histogram
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelId>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default = "default_session_gap")]
    pub session_gap_secs: f64,
}

fn default_version() -> u32 {
    1
}

fn default_bucket_count() -> usize {
    DEFAULT_BUCKET_COUNT
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

fn default_channels() -> Vec<ChannelId> {
    vec![ChannelId::Speed, ChannelId::Rpm]
}

fn default_session_gap() -> f64 {
    DEFAULT_SESSION_GAP_SECS
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            bucket_count: DEFAULT_BUCKET_COUNT,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            channels: default_channels(),
            threshold: None,
            session_gap_secs: DEFAULT_SESSION_GAP_SECS,
        }
    }
}

impl DashboardSettings {
    /// Get the config directory path for dashlog
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("DashLog"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("DashLog"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("dashlog"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the config directory, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::get_settings_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings.sanitized())
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::get_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Replace out-of-range values with their defaults
    pub fn sanitized(mut self) -> Self {
        if self.bucket_count == 0 {
            self.bucket_count = DEFAULT_BUCKET_COUNT;
        }
        if self.histogram_bins == 0 {
            self.histogram_bins = DEFAULT_HISTOGRAM_BINS;
        }
        if !(self.session_gap_secs.is_finite() && self.session_gap_secs > 0.0) {
            self.session_gap_secs = DEFAULT_SESSION_GAP_SECS;
        }
        if self.threshold.is_some_and(|t| !t.is_finite()) {
            self.threshold = None;
        }

        let mut seen = Vec::with_capacity(self.channels.len());
        self.channels.retain(|c| {
            let first = !seen.contains(c);
            seen.push(*c);
            first
        });

        self
    }
}
