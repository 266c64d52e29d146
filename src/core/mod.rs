//! Core types: positions, directions, tiles, RNG, configuration, errors.
//!
//! Everything here is independent of the grid and the session; higher
//! layers build on these building blocks.

pub mod position;
pub mod tile;
pub mod rng;
pub mod config;
pub mod error;

pub use position::{Direction, ParseDirectionError, Position};
pub use tile::{Cell, Tile, TileId, TileValue};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, SessionConfig, SpawnWeight, SpawnWeights};
pub use error::{GameError, GridError};
