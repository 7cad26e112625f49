//! User settings.
//!
//! Settings live in a small JSON file. Every field has a default, so a
//! partial file (or no file at all) is valid. Command-line flags override
//! whatever the file says.

use crate::swara::ScaleKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "swaratui.json";

/// Directory the samples are loaded from by default.
pub const DEFAULT_SAMPLES_DIR: &str = "audio";

/// Upper bound on playback volume.
pub const MAX_VOLUME: f32 = 2.0;

/// Errors that can occur while reading or writing settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize settings for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write settings to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Quiz settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding the note samples.
    pub samples_dir: PathBuf,

    /// Scale selected at startup.
    pub default_scale: ScaleKey,

    /// Play a synthesized tone when a sample file is missing.
    pub fallback_tone: bool,

    /// Playback volume, 0.0 to [`MAX_VOLUME`].
    pub volume: f32,

    /// Seed for the question picker. Random when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            samples_dir: PathBuf::from(DEFAULT_SAMPLES_DIR),
            default_scale: ScaleKey::Major,
            fallback_tone: true,
            volume: 1.0,
            seed: None,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings.normalized())
    }

    /// Loads settings for startup.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// `dir` is used if present, and defaults otherwise.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            tracing::info!("Loading settings from {:?}", fallback);
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies command-line overrides. `None` keeps the current value.
    pub fn apply_overrides(
        &mut self,
        samples_dir: Option<PathBuf>,
        scale: Option<ScaleKey>,
        seed: Option<u64>,
    ) {
        if let Some(dir) = samples_dir {
            self.samples_dir = dir;
        }
        if let Some(scale) = scale {
            self.default_scale = scale;
        }
        if seed.is_some() {
            self.seed = seed;
        }
    }

    /// Clamps out-of-range values.
    fn normalized(mut self) -> Self {
        if !self.volume.is_finite() {
            self.volume = 1.0;
        }
        self.volume = self.volume.clamp(0.0, MAX_VOLUME);
        self
    }
}
