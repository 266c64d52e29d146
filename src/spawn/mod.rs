//! Post-move tile spawning.

mod policy;

pub use policy::{Spawned, SpawnPolicy};
