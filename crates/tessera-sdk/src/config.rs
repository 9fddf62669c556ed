// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Game configuration, loadable from JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// A configuration value that cannot drive a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The target frame rate must be at least one frame per second.
    InvalidFps(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFps(fps) => {
                write!(f, "Invalid target frame rate: {fps} (must be at least 1)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunables of the game loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target frames per second.
    pub fps: u32,
    /// How many frame budgets the loop may lag behind before it stops catching up.
    pub max_catch_up_frames: u32,
    /// Interval between frame telemetry summaries, in milliseconds.
    pub telemetry_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            max_catch_up_frames: 5,
            telemetry_interval_ms: 1000,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Failed to parse game configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game configuration '{}'", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid game configuration '{}'", path.display()))
    }

    /// Checks that the configuration can drive a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::InvalidFps(self.fps));
        }
        Ok(())
    }

    /// The time allotted to one frame: `1000 / fps` whole milliseconds.
    pub fn frame_budget(&self) -> Duration {
        frame_budget(self.fps)
    }

    /// The telemetry reporting interval.
    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_millis(self.telemetry_interval_ms)
    }
}

/// `1000 / fps` whole milliseconds, or zero (unpaced) when `fps` is zero.
pub(crate) fn frame_budget(fps: u32) -> Duration {
    match fps {
        0 => Duration::ZERO,
        fps => Duration::from_millis(1000 / u64::from(fps)),
    }
}
