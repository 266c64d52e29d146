//! The game session: grid + engine + spawning + unlock swaps + records.

use std::time::{Duration, Instant};

use crate::core::{Direction, GameError, GameRng, GridError, Position, SessionConfig, TileValue};
use crate::engine::MoveEngine;
use crate::grid::Grid;
use crate::score::{BestRecord, FileScoreStore, ScoreStore};
use crate::spawn::SpawnPolicy;

use super::clock::{elapsed, Clock, SystemClock};
use super::state::{
    Checkpoint, MoveReport, SessionError, SessionSnapshot, SessionState, SwapReport,
};

/// One game, driven by serialized commands.
///
/// Every command takes `&mut self`, so commands never interleave. After a
/// command the caller pulls whatever it needs to render (`snapshot`,
/// `elapsed`, ...); nothing is pushed.
///
/// ## Usage
///
/// ```
/// use tile_merge::core::{Direction, SessionConfig};
/// use tile_merge::score::MemoryScoreStore;
/// use tile_merge::session::GameSession;
///
/// let mut session = GameSession::builder(SessionConfig::default().with_seed(42))
///     .store(MemoryScoreStore::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(session.grid().tile_count(), 2);
/// let report = session.play_move(Direction::Left).unwrap();
/// if report.moved() {
///     assert!(report.spawned.is_some());
/// }
/// ```
pub struct GameSession {
    config: SessionConfig,
    grid: Grid,
    is_over: bool,
    unlock_credits: u32,
    pending_swap: Option<Position>,
    started_at: Instant,
    carried: Duration,
    frozen_elapsed: Option<Duration>,
    session_max: Option<TileValue>,
    best: BestRecord,
    rng: GameRng,
    spawn: SpawnPolicy,
    store: Box<dyn ScoreStore>,
    clock: Box<dyn Clock>,
}

/// Builder for creating a `GameSession`.
pub struct GameSessionBuilder {
    config: SessionConfig,
    store: Option<Box<dyn ScoreStore>>,
    clock: Box<dyn Clock>,
    checkpoint: Option<Checkpoint>,
}

impl GameSessionBuilder {
    /// Use a custom score store instead of the config's score file.
    pub fn store<S: ScoreStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Use a custom clock.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Resume from a checkpoint instead of dealing a fresh board.
    pub fn resume(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Validate the config and start the session.
    pub fn build(self) -> Result<GameSession, SessionError> {
        self.config.validate()?;

        let store: Box<dyn ScoreStore> = match self.store {
            Some(store) => store,
            None => Box::new(FileScoreStore::new(self.config.score_file.clone())),
        };
        let best = store.read_best().unwrap_or_else(|e| {
            log::warn!("could not read best record, starting from defaults: {e}");
            BestRecord::default()
        });
        let rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let started_at = self.clock.now();

        let mut session = GameSession {
            grid: Grid::new(self.config.size),
            is_over: false,
            unlock_credits: self.config.unlock_credits,
            pending_swap: None,
            started_at,
            carried: Duration::ZERO,
            frozen_elapsed: None,
            session_max: None,
            best,
            rng,
            spawn: SpawnPolicy::new(self.config.spawn.clone()),
            store,
            clock: self.clock,
            config: self.config,
        };

        match self.checkpoint {
            Some(checkpoint) => session.load_checkpoint(checkpoint)?,
            None => session.deal()?,
        }

        log::info!(
            "started {0}x{0} session (seed {1})",
            session.config.size,
            session.rng.seed()
        );
        Ok(session)
    }
}

impl GameSession {
    /// Start building a session.
    pub fn builder(config: SessionConfig) -> GameSessionBuilder {
        GameSessionBuilder {
            config,
            store: None,
            clock: Box::new(SystemClock),
            checkpoint: None,
        }
    }

    /// Start a session backed by the config's score file and the wall clock.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        Self::builder(config).build()
    }

    // === Commands ===

    /// Shift the board toward `direction`.
    ///
    /// Rejected with `SwapInProgress` while a swap is pending. If the move
    /// changes the board, one tile is spawned and the terminal condition is
    /// re-checked. A move that changes nothing leaves the board untouched and
    /// spawns nothing.
    pub fn play_move(&mut self, direction: Direction) -> Result<MoveReport, GameError> {
        if self.pending_swap.is_some() {
            return Err(GameError::SwapInProgress);
        }

        let outcome = MoveEngine::apply_move(&mut self.grid, direction)?;

        let mut new_best = false;
        let mut spawned = None;

        if outcome.moved {
            for merge in &outcome.merges {
                new_best |= self.record_value(merge.value);
            }

            let tile = self.spawn.spawn(&mut self.grid, &mut self.rng)?;
            new_best |= self.record_value(tile.value);
            spawned = Some(tile);
        }

        self.refresh_terminal();

        log::debug!(
            "move {direction}: moved={}, merges={}, tiles={}",
            outcome.moved,
            outcome.merges.len(),
            self.grid.tile_count()
        );

        Ok(MoveReport {
            outcome,
            spawned,
            game_over: self.is_over,
            new_best,
        })
    }

    /// Begin an unlock swap anchored at `position`.
    ///
    /// Needs at least one unlock credit and no swap already pending. Allowed
    /// after game over, since a swap is the only way out of a deadlock.
    pub fn swap_start(&mut self, position: Position) -> Result<(), GameError> {
        self.grid.check_bounds(position)?;
        if let Some(anchor) = self.pending_swap {
            return Err(GameError::SwapAlreadyPending(anchor));
        }
        if self.unlock_credits == 0 {
            return Err(GameError::NoUnlockCredits);
        }

        self.pending_swap = Some(position);
        log::debug!("swap started at {position}");
        Ok(())
    }

    /// Finish the pending swap by exchanging the anchor with `position`.
    ///
    /// Committing on the anchor cancels without spending a credit. With no
    /// swap pending, or an off-board target, nothing changes, the pending
    /// state is cleared and `InvalidSwapTarget` is returned.
    pub fn swap_commit(&mut self, position: Position) -> Result<SwapReport, GameError> {
        let Some(anchor) = self.pending_swap.take() else {
            return Err(GameError::InvalidSwapTarget);
        };
        if self.grid.check_bounds(position).is_err() {
            return Err(GameError::InvalidSwapTarget);
        }
        if position == anchor {
            log::debug!("swap at {anchor} cancelled");
            return Ok(SwapReport::Cancelled);
        }

        self.grid.swap(anchor, position)?;
        self.unlock_credits -= 1;
        self.refresh_terminal();

        log::debug!(
            "swapped {anchor} <-> {position}, {} credits left",
            self.unlock_credits
        );

        Ok(SwapReport::Swapped {
            from: anchor,
            to: position,
            game_over: self.is_over,
        })
    }

    /// Drop a pending swap, if any. Returns whether one was pending.
    pub fn swap_cancel(&mut self) -> bool {
        self.pending_swap.take().is_some()
    }

    /// Start a new game on the same session.
    ///
    /// Unlock credits are kept.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.deal()?;
        log::info!("session restarted");
        Ok(())
    }

    /// Set the number of unlock credits and restart.
    pub fn set_unlock_credits(&mut self, credits: u32) -> Result<(), GameError> {
        self.unlock_credits = credits;
        self.restart()
    }

    /// Delete the persisted best record.
    pub fn reset_best(&mut self) {
        if let Err(e) = self.store.reset() {
            log::warn!("could not delete best record: {e}");
        }
        self.best = BestRecord::default();
    }

    // === Observation ===

    /// The board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.pending_swap {
            Some(anchor) => SessionState::SwapPending { anchor },
            None if self.is_over => SessionState::GameOver,
            None => SessionState::Active,
        }
    }

    /// True iff the board is full and no merge is possible.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    #[must_use]
    pub fn unlock_credits(&self) -> u32 {
        self.unlock_credits
    }

    /// Anchor of the pending swap, if any.
    #[must_use]
    pub fn pending_swap(&self) -> Option<Position> {
        self.pending_swap
    }

    /// Best record as last read or written.
    #[must_use]
    pub fn best(&self) -> BestRecord {
        self.best
    }

    /// Largest value reached during this game.
    #[must_use]
    pub fn session_max(&self) -> Option<TileValue> {
        self.session_max
    }

    /// Time since the game started; frozen while the game is over.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.frozen_elapsed
            .unwrap_or_else(|| self.carried + elapsed(self.clock.now(), self.started_at))
    }

    /// Read-only view for renderers.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid.snapshot(),
            state: self.state(),
            is_over: self.is_over,
            unlock_credits: self.unlock_credits,
            best: self.best,
            elapsed: self.elapsed(),
        }
    }

    /// Save the session for a later `GameSessionBuilder::resume`.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            grid: self.grid.snapshot(),
            unlock_credits: self.unlock_credits,
            elapsed: self.elapsed(),
            session_max: self.session_max,
            rng: self.rng.state(),
        }
    }

    // === Internals ===

    /// Clear the board and spawn the opening tiles.
    fn deal(&mut self) -> Result<(), GameError> {
        self.grid.clear();
        self.pending_swap = None;
        self.is_over = false;
        self.frozen_elapsed = None;
        self.session_max = None;
        self.started_at = self.clock.now();
        self.carried = Duration::ZERO;

        for _ in 0..self.config.initial_tiles {
            let tile = self.spawn.spawn(&mut self.grid, &mut self.rng)?;
            self.record_value(tile.value);
        }

        self.refresh_terminal();
        Ok(())
    }

    fn load_checkpoint(&mut self, checkpoint: Checkpoint) -> Result<(), GridError> {
        if checkpoint.grid.size() != self.config.size {
            return Err(GridError::Inconsistent(format!(
                "checkpoint is {0}x{0} but the session is {1}x{1}",
                checkpoint.grid.size(),
                self.config.size
            )));
        }

        self.grid = Grid::from_snapshot(&checkpoint.grid)?;
        self.unlock_credits = checkpoint.unlock_credits;
        self.session_max = checkpoint.session_max;
        self.rng = GameRng::from_state(&checkpoint.rng);

        self.started_at = self.clock.now();
        self.carried = checkpoint.elapsed;
        self.refresh_terminal();
        Ok(())
    }

    /// Re-evaluate the terminal condition, freezing or resuming the clock.
    fn refresh_terminal(&mut self) {
        let over = MoveEngine::is_terminal(&self.grid);

        if over && !self.is_over {
            self.frozen_elapsed = Some(self.elapsed());
            log::info!(
                "game over after {:.1}s, max tile {}",
                self.elapsed().as_secs_f64(),
                self.session_max.map_or(0, TileValue::get)
            );
        } else if !over && self.is_over {
            self.frozen_elapsed = None;
            log::info!("deadlock broken, game resumed");
        }

        self.is_over = over;
    }

    /// Update the best record for a newly created tile value.
    ///
    /// Only new session maxima and the win value reach the store. Returns
    /// whether the record changed.
    fn record_value(&mut self, value: TileValue) -> bool {
        let is_new_max = self.session_max.map_or(true, |max| value > max);
        if is_new_max {
            self.session_max = Some(value);
        }
        if !is_new_max && value != self.config.win_value {
            return false;
        }

        let stored = self.store.read_best().unwrap_or_else(|e| {
            log::warn!("could not read best record: {e}");
            self.best
        });
        let updated = stored.updated_with(value, self.elapsed(), self.config.win_value);
        let changed = updated != stored;

        if changed {
            if let Err(e) = self.store.write_best(&updated) {
                log::warn!("could not save best record: {e}");
            }
            log::info!(
                "new best: score {}, time {:.3}s",
                updated.best_score,
                updated.best_time_seconds
            );
        }

        self.best = updated;
        changed
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state())
            .field("unlock_credits", &self.unlock_credits)
            .field("best", &self.best)
            .field("grid", &self.grid.snapshot().to_rows())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{MemoryScoreStore, ScoreError};
    use crate::session::ManualClock;

    fn session_with(config: SessionConfig) -> (GameSession, MemoryScoreStore, ManualClock) {
        let store = MemoryScoreStore::new();
        let clock = ManualClock::new();
        let session = GameSession::builder(config)
            .store(store.clone())
            .clock(clock.clone())
            .build()
            .unwrap();
        (session, store, clock)
    }

    fn resumed(rows: &[[u32; 2]], credits: u32) -> (GameSession, MemoryScoreStore, ManualClock) {
        let store = MemoryScoreStore::new();
        let clock = ManualClock::new();
        let checkpoint = Checkpoint {
            grid: Grid::from_rows(rows).snapshot(),
            unlock_credits: credits,
            elapsed: Duration::from_secs(10),
            session_max: None,
            rng: GameRng::new(9).state(),
        };
        let session = GameSession::builder(SessionConfig::default().with_size(2).with_seed(9))
            .store(store.clone())
            .clock(clock.clone())
            .resume(checkpoint)
            .build()
            .unwrap();
        (session, store, clock)
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn read_best(&self) -> Result<BestRecord, ScoreError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn write_best(&mut self, _record: &BestRecord) -> Result<(), ScoreError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn reset(&mut self) -> Result<(), ScoreError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    #[test]
    fn test_new_session_deals_initial_tiles() {
        let (session, store, _) = session_with(SessionConfig::default().with_seed(1));

        assert_eq!(session.grid().tile_count(), 2);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.unlock_credits(), 1);
        assert!(session.session_max().is_some());
        // Opening tiles set a new session max, so the store saw a write
        assert!(store.stored().is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GameSession::builder(SessionConfig::default().with_size(1))
            .store(MemoryScoreStore::new())
            .build();
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_seeded_sessions_match() {
        let (a, _, _) = session_with(SessionConfig::default().with_seed(77));
        let (b, _, _) = session_with(SessionConfig::default().with_seed(77));
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_move_spawns_exactly_one_tile() {
        let (mut session, _, _) = resumed(&[[2, 0], [0, 0]], 1);

        let report = session.play_move(Direction::Right).unwrap();
        assert!(report.moved());
        assert!(report.spawned.is_some());
        assert_eq!(session.grid().tile_count(), 2);
        assert_eq!(session.grid().value_at(Position::new(0, 1)), Some(2));
    }

    #[test]
    fn test_noop_move_spawns_nothing() {
        let (mut session, _, _) = resumed(&[[2, 0], [0, 0]], 1);
        let before = session.grid().snapshot();

        let report = session.play_move(Direction::Left).unwrap();
        assert!(!report.moved());
        assert!(report.spawned.is_none());
        assert_eq!(session.grid().snapshot(), before);
    }

    #[test]
    fn test_merge_clears_flags_on_next_move() {
        let (mut session, _, _) = resumed(&[[2, 2], [0, 0]], 1);

        session.play_move(Direction::Left).unwrap();
        assert_eq!(session.grid().value_at(Position::new(0, 0)), Some(4));
        assert!(session.grid().snapshot().merged_at(Position::new(0, 0)));

        // Flags from the first move are gone; only this move's merges show
        let report = session.play_move(Direction::Up).unwrap();
        let flagged = session.grid().iter().filter(|(_, _, tile)| tile.merged).count();
        assert_eq!(flagged, report.outcome.merges.len());
    }

    #[test]
    fn test_deadlocked_checkpoint_is_over() {
        let (session, _, _) = resumed(&[[2, 4], [4, 2]], 1);
        assert!(session.is_over());
        assert_eq!(session.state(), SessionState::GameOver);
    }

    #[test]
    fn test_swap_breaks_deadlock() {
        let (mut session, _, clock) = resumed(&[[2, 4], [4, 2]], 1);
        let frozen = session.elapsed();
        clock.advance(Duration::from_secs(5));
        assert_eq!(session.elapsed(), frozen);

        session.swap_start(Position::new(0, 0)).unwrap();
        assert_eq!(
            session.state(),
            SessionState::SwapPending {
                anchor: Position::new(0, 0)
            }
        );

        let report = session.swap_commit(Position::new(0, 1)).unwrap();
        assert_eq!(
            report,
            SwapReport::Swapped {
                from: Position::new(0, 0),
                to: Position::new(0, 1),
                game_over: false,
            }
        );
        assert_eq!(session.grid().snapshot().to_rows(), vec![vec![4, 2], vec![4, 2]]);
        assert_eq!(session.unlock_credits(), 0);
        assert!(!session.is_over());
        assert_eq!(session.state(), SessionState::Active);

        // Clock runs again
        clock.advance(Duration::from_secs(1));
        assert!(session.elapsed() > frozen);
    }

    #[test]
    fn test_swap_commit_on_anchor_cancels() {
        let (mut session, _, _) = resumed(&[[2, 4], [0, 0]], 1);

        session.swap_start(Position::new(0, 0)).unwrap();
        assert_eq!(session.swap_commit(Position::new(0, 0)).unwrap(), SwapReport::Cancelled);
        assert_eq!(session.unlock_credits(), 1);
        assert_eq!(session.pending_swap(), None);
    }

    #[test]
    fn test_swap_requires_credit() {
        let (mut session, _, _) = resumed(&[[2, 4], [0, 0]], 0);
        assert_eq!(
            session.swap_start(Position::new(0, 0)),
            Err(GameError::NoUnlockCredits)
        );
    }

    #[test]
    fn test_swap_start_errors() {
        let (mut session, _, _) = resumed(&[[2, 4], [0, 0]], 2);

        assert!(matches!(
            session.swap_start(Position::new(5, 0)),
            Err(GameError::Grid(GridError::OutOfBounds { .. }))
        ));

        session.swap_start(Position::new(0, 0)).unwrap();
        assert_eq!(
            session.swap_start(Position::new(0, 1)),
            Err(GameError::SwapAlreadyPending(Position::new(0, 0)))
        );
    }

    #[test]
    fn test_move_rejected_while_swap_pending() {
        let (mut session, _, _) = resumed(&[[2, 4], [0, 0]], 1);
        session.swap_start(Position::new(0, 0)).unwrap();

        assert_eq!(
            session.play_move(Direction::Down).unwrap_err(),
            GameError::SwapInProgress
        );

        assert!(session.swap_cancel());
        assert!(!session.swap_cancel());
        assert!(session.play_move(Direction::Down).unwrap().moved());
    }

    #[test]
    fn test_swap_commit_without_pending() {
        let (mut session, _, _) = resumed(&[[2, 4], [0, 0]], 1);
        assert_eq!(
            session.swap_commit(Position::new(0, 0)),
            Err(GameError::InvalidSwapTarget)
        );
    }

    #[test]
    fn test_swap_commit_off_board_clears_pending() {
        let (mut session, _, _) = resumed(&[[2, 4], [0, 0]], 1);
        session.swap_start(Position::new(0, 0)).unwrap();

        assert_eq!(
            session.swap_commit(Position::new(2, 2)),
            Err(GameError::InvalidSwapTarget)
        );
        assert_eq!(session.pending_swap(), None);
        assert_eq!(session.unlock_credits(), 1);
    }

    #[test]
    fn test_swap_with_empty_cell() {
        let (mut session, _, _) = resumed(&[[2, 4], [0, 0]], 1);
        session.swap_start(Position::new(0, 1)).unwrap();
        session.swap_commit(Position::new(1, 1)).unwrap();
        assert_eq!(session.grid().snapshot().to_rows(), vec![vec![2, 0], vec![0, 4]]);
    }

    #[test]
    fn test_restart_keeps_credits() {
        let (mut session, _, _) = resumed(&[[2, 4], [4, 2]], 3);
        session.swap_start(Position::new(0, 0)).unwrap();

        session.restart().unwrap();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.unlock_credits(), 3);
        assert_eq!(session.grid().tile_count(), 2);
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_set_unlock_credits_restarts() {
        let (mut session, _, _) = resumed(&[[2, 4], [4, 2]], 0);
        session.set_unlock_credits(4).unwrap();
        assert_eq!(session.unlock_credits(), 4);
        assert!(!session.is_over());
    }

    #[test]
    fn test_win_merge_records_time() {
        let store = MemoryScoreStore::new();
        let clock = ManualClock::new();
        let checkpoint = Checkpoint {
            grid: Grid::from_rows(&[[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]).snapshot(),
            unlock_credits: 1,
            elapsed: Duration::from_secs(90),
            session_max: TileValue::new(1024),
            rng: GameRng::new(3).state(),
        };
        let mut session = GameSession::builder(SessionConfig::default().with_seed(3))
            .store(store.clone())
            .clock(clock.clone())
            .resume(checkpoint)
            .build()
            .unwrap();

        clock.advance(Duration::from_secs(5));
        let report = session.play_move(Direction::Left).unwrap();

        assert!(report.new_best);
        let stored = store.stored().unwrap();
        assert_eq!(stored.best_score, 2048);
        assert!((stored.best_time_seconds - 95.0).abs() < 1e-6);
        assert_eq!(session.best(), stored);
    }

    #[test]
    fn test_store_failures_are_swallowed() {
        let checkpoint = Checkpoint {
            grid: Grid::from_rows(&[[2, 2], [0, 0]]).snapshot(),
            unlock_credits: 1,
            elapsed: Duration::ZERO,
            session_max: None,
            rng: GameRng::new(4).state(),
        };
        let mut session = GameSession::builder(SessionConfig::default().with_size(2).with_seed(4))
            .store(BrokenStore)
            .clock(ManualClock::new())
            .resume(checkpoint)
            .build()
            .unwrap();

        let report = session.play_move(Direction::Left).unwrap();
        assert!(report.moved());
        assert!(session.best().best_score >= 4);

        session.reset_best();
        assert_eq!(session.best(), BestRecord::default());
    }

    #[test]
    fn test_reset_best_clears_store() {
        let (mut session, store, _) = session_with(SessionConfig::default().with_seed(5));
        assert!(store.stored().is_some());

        session.reset_best();
        assert_eq!(store.stored(), None);
        assert_eq!(session.best(), BestRecord::default());
    }

    #[test]
    fn test_checkpoint_resume_continues_identically() {
        let (mut a, _, _) = session_with(SessionConfig::default().with_seed(12));
        a.play_move(Direction::Left).unwrap();

        let bytes = a.checkpoint().to_bytes().unwrap();
        let mut b = GameSession::builder(SessionConfig::default().with_seed(12))
            .store(MemoryScoreStore::new())
            .clock(ManualClock::new())
            .resume(Checkpoint::from_bytes(&bytes).unwrap())
            .build()
            .unwrap();

        assert_eq!(a.grid(), b.grid());
        for direction in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
            let ra = a.play_move(direction).unwrap();
            let rb = b.play_move(direction).unwrap();
            let spawned = |r: &MoveReport| r.spawned.map(|s| (s.position, s.value));
            assert_eq!(spawned(&ra), spawned(&rb));
            assert_eq!(a.grid(), b.grid());
        }
    }

    #[test]
    fn test_resume_rejects_wrong_size() {
        let checkpoint = Checkpoint {
            grid: Grid::new(3).snapshot(),
            unlock_credits: 1,
            elapsed: Duration::ZERO,
            session_max: None,
            rng: GameRng::new(1).state(),
        };
        let result = GameSession::builder(SessionConfig::default())
            .store(MemoryScoreStore::new())
            .resume(checkpoint)
            .build();
        assert!(matches!(result, Err(SessionError::Game(GameError::Grid(_)))));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut session, _, _) = resumed(&[[2, 4], [4, 2]], 1);
        session.swap_start(Position::new(1, 1)).unwrap();

        let snapshot = session.snapshot();
        assert!(snapshot.is_over);
        assert_eq!(
            snapshot.state,
            SessionState::SwapPending {
                anchor: Position::new(1, 1)
            }
        );
        assert_eq!(snapshot.unlock_credits, 1);
        assert_eq!(snapshot.grid.to_rows(), vec![vec![2, 4], vec![4, 2]]);
    }
}
