//! Best-score / best-time persistence.
//!
//! `BestRecord` holds the two persisted numbers and the rule for updating
//! them. `ScoreStore` is the collaborator that loads and saves a record;
//! the session treats every store failure as non-fatal.

mod record;
mod store;

pub use record::{BestRecord, ScoreError};
pub use store::{FileScoreStore, MemoryScoreStore, ScoreStore};
