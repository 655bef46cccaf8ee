use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RunnerError;

/// Frame loop and terminal output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Frames per second. One physics step runs per frame.
    pub tick_rate_hz: f32,
    /// Stop the loop after this many frames. `None` runs until stopped.
    pub max_frames: Option<u64>,
    pub ascii_columns: usize,
    pub ascii_rows: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            max_frames: Some(3600),
            ascii_columns: 60,
            ascii_rows: 15,
        }
    }
}

impl RunnerConfig {
    /// Load config from `FAIRWAY_RUNNER_CONFIG` or `config/runner.toml`.
    /// Falls back to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("FAIRWAY_RUNNER_CONFIG")
            .unwrap_or_else(|_| "config/runner.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<RunnerConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    RunnerConfig::default()
                },
            },
            Err(_) => RunnerConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        self.tick_interval().map(|_| ())
    }

    /// Time between frames. Rates too high to give a non-zero period, or too
    /// low to give a finite one, are rejected.
    pub fn tick_interval(&self) -> Result<Duration, RunnerError> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(RunnerError::TickRate(self.tick_rate_hz));
        }
        Duration::try_from_secs_f32(1.0 / self.tick_rate_hz)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or(RunnerError::TickRate(self.tick_rate_hz))
    }
}
