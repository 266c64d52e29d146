//! The persisted best record and its text format.
//!
//! The record is two lines of text:
//!
//! ```text
//! 2048
//! 312.457
//! ```
//!
//! Line 1 is the best tile value reached, line 2 the fastest time in seconds
//! to reach the win value (`0` while no win has been recorded). Missing
//! lines read as their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::TileValue;

/// Errors raised by score stores.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score record I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line} of the score record is not a number: {content:?}")]
    Parse { line: usize, content: String },
}

/// Best score and best win time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    /// Highest tile value ever reached.
    pub best_score: u32,
    /// Fastest time to the win value, in seconds. 0.0 means unset.
    pub best_time_seconds: f64,
}

impl BestRecord {
    #[must_use]
    pub fn new(best_score: u32, best_time_seconds: f64) -> Self {
        Self {
            best_score,
            best_time_seconds,
        }
    }

    /// True while no win time has been recorded.
    #[must_use]
    pub fn is_time_unset(&self) -> bool {
        self.best_time_seconds <= 0.0
    }

    /// Record after a tile of `value` appeared `elapsed` into the game.
    ///
    /// Best score becomes the larger of the stored score and `value`. Best
    /// time changes only when `value` is the win value, and only if the new
    /// time is strictly faster or no time was stored.
    #[must_use]
    pub fn updated_with(&self, value: TileValue, elapsed: Duration, win_value: TileValue) -> Self {
        let best_score = self.best_score.max(value.get());
        let seconds = elapsed.as_secs_f64();

        let best_time_seconds =
            if value == win_value && (self.is_time_unset() || seconds < self.best_time_seconds) {
                seconds
            } else {
                self.best_time_seconds
            };

        Self {
            best_score,
            best_time_seconds,
        }
    }

    /// Render the two-line text form.
    #[must_use]
    pub fn to_text(&self) -> String {
        format!("{}\n{}\n", self.best_score, self.best_time_seconds)
    }

    /// Parse the two-line text form.
    pub fn parse(text: &str) -> Result<Self, ScoreError> {
        let mut lines = text.lines().map(str::trim);
        let mut record = BestRecord::default();

        if let Some(line) = lines.next().filter(|l| !l.is_empty()) {
            record.best_score = line.parse().map_err(|_| ScoreError::Parse {
                line: 1,
                content: line.to_string(),
            })?;
        }
        if let Some(line) = lines.next().filter(|l| !l.is_empty()) {
            let seconds: f64 = line.parse().map_err(|_| ScoreError::Parse {
                line: 2,
                content: line.to_string(),
            })?;
            record.best_time_seconds = if seconds.is_finite() && seconds > 0.0 {
                seconds
            } else {
                0.0
            };
        }

        Ok(record)
    }
}
