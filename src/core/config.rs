//! Session configuration.
//!
//! A `SessionConfig` fixes everything a session needs at startup:
//! - Board size and the win value
//! - Unlock credits granted to the player
//! - Spawn weights (which values appear after a move, and how often)
//! - RNG seed (`None` means seed from entropy)
//! - Location of the best-score file
//!
//! Configs can be built in code with the `with_*` methods or loaded from
//! TOML:
//!
//! ```
//! use tile_merge::core::SessionConfig;
//!
//! let config = SessionConfig::from_toml_str("size = 5\nseed = 7\n").unwrap();
//! assert_eq!(config.size, 5);
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.win_value.get(), 2048);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::TileValue;

/// Errors raised while loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One entry of the spawn table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub value: TileValue,
    pub weight: f32,
}

/// Weighted table of values a spawned tile can take.
///
/// Weights are relative and need not sum to 1.0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpawnWeights(pub Vec<SpawnWeight>);

impl Default for SpawnWeights {
    /// 90% twos, 10% fours.
    fn default() -> Self {
        Self(vec![
            SpawnWeight {
                value: TileValue::TWO,
                weight: 0.9,
            },
            SpawnWeight {
                value: TileValue::FOUR,
                weight: 0.1,
            },
        ])
    }
}

impl SpawnWeights {
    /// Equal chance of every listed value.
    #[must_use]
    pub fn uniform(values: &[TileValue]) -> Self {
        Self(
            values
                .iter()
                .map(|&value| SpawnWeight { value, weight: 1.0 })
                .collect(),
        )
    }

    /// Always spawn the same value.
    #[must_use]
    pub fn only(value: TileValue) -> Self {
        Self::uniform(&[value])
    }

    /// Relative weights, in table order.
    #[must_use]
    pub fn weights(&self) -> Vec<f32> {
        self.0.iter().map(|w| w.weight).collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::Invalid("spawn table is empty".into()));
        }
        if self.0.iter().any(|w| !w.weight.is_finite() || w.weight < 0.0) {
            return Err(ConfigError::Invalid(
                "spawn weights must be finite and non-negative".into(),
            ));
        }
        if self.0.iter().all(|w| w.weight == 0.0) {
            return Err(ConfigError::Invalid("all spawn weights are zero".into()));
        }
        if let Some(w) = self.0.iter().find(|w| w.value >= TileValue::MAX) {
            return Err(ConfigError::Invalid(format!(
                "spawn value {} is too large to ever merge",
                w.value
            )));
        }
        Ok(())
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board side length (N for an N×N board).
    pub size: usize,

    /// Swaps the player may perform. Kept across restarts.
    pub unlock_credits: u32,

    /// Reaching this value counts as a win for best-time tracking.
    pub win_value: TileValue,

    /// Tiles spawned on a fresh board.
    pub initial_tiles: usize,

    /// Values spawned after a move.
    pub spawn: SpawnWeights,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Best-score record location.
    pub score_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: 4,
            unlock_credits: 1,
            win_value: TileValue::DEFAULT_WIN,
            initial_tiles: 2,
            spawn: SpawnWeights::default(),
            seed: None,
            score_file: PathBuf::from("score.txt"),
        }
    }
}

impl SessionConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the config describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::Invalid(format!(
                "board size must be at least 2, got {}",
                self.size
            )));
        }
        if self.initial_tiles > self.size * self.size {
            return Err(ConfigError::Invalid(format!(
                "{} initial tiles do not fit on a {}x{} board",
                self.initial_tiles, self.size, self.size
            )));
        }
        self.spawn.validate()
    }

    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_unlock_credits(mut self, credits: u32) -> Self {
        self.unlock_credits = credits;
        self
    }

    #[must_use]
    pub fn with_win_value(mut self, value: TileValue) -> Self {
        self.win_value = value;
        self
    }

    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    #[must_use]
    pub fn with_spawn(mut self, spawn: SpawnWeights) -> Self {
        self.spawn = spawn;
        self
    }

    #[must_use]
    pub fn with_score_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.score_file = path.into();
        self
    }
}
