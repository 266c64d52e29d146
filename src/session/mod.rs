//! Game sessions.
//!
//! A `GameSession` owns one board and the rules around it: spawning after
//! moves, the unlock swap, terminal detection, elapsed time and the best
//! record.

mod clock;
mod game;
mod state;

pub use clock::{elapsed, Clock, ManualClock, SystemClock};
pub use game::{GameSession, GameSessionBuilder};
pub use state::{Checkpoint, MoveReport, SessionError, SessionSnapshot, SessionState, SwapReport};
