#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board session for Critter Match.
//!
//! The session owns the grid, the player's selection, the score and the
//! pending revert of a swap that formed no match. It is mutated only through
//! [`apply`] and read through the [`query`] module.

use std::{collections::BTreeSet, mem, time::Duration};

use critter_match_core::{
    CellCoord, ClickError, Command, ConfigError, Event, TileKind, DEFAULT_GRID_SIZE,
    DEFAULT_SWAP_REVERT_DELAY, MAX_GRID_SIZE, MIN_GRID_SIZE, MIN_KIND_COUNT,
};
use critter_match_grid::Grid;
use critter_match_system_cascade::resolve;
use critter_match_system_dealing::deal;
use critter_match_system_swap_validation::try_swap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Parameters fixed for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Side length of the square grid.
    pub grid_size: u32,
    /// Kinds dealt onto the grid.
    pub kinds: Vec<TileKind>,
    /// Time a rejected swap stays on the board before it is undone.
    pub swap_revert_delay: Duration,
    /// Seed for the deterministic dealing RNG.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            kinds: TileKind::ALL.to_vec(),
            swap_revert_delay: DEFAULT_SWAP_REVERT_DELAY,
            seed: 0,
        }
    }
}

impl SessionConfig {
    /// Checks that a board can be dealt from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                minimum: MIN_GRID_SIZE,
            });
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                maximum: MAX_GRID_SIZE,
            });
        }

        let mut seen = BTreeSet::new();
        for kind in &self.kinds {
            if !seen.insert(*kind) {
                return Err(ConfigError::DuplicateKind(*kind));
            }
        }

        if self.kinds.len() < MIN_KIND_COUNT {
            return Err(ConfigError::TooFewKinds {
                found: self.kinds.len(),
                minimum: MIN_KIND_COUNT,
            });
        }

        Ok(())
    }
}

/// A single game on a single board.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    state: InputState,
    presentation_busy: bool,
    score: u32,
}

impl Session {
    /// Deals a fresh match-free board from the configured seed.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = deal(config.grid_size, &config.kinds, &mut rng)?;
        debug!(
            size = config.grid_size,
            seed = config.seed,
            "session dealt a new board"
        );
        Ok(Self::from_parts(config, grid))
    }

    /// Starts a session on a prepared grid instead of dealing one.
    ///
    /// The configured size is replaced by the size of `grid`. The grid is
    /// taken as is, so callers that want the usual guarantees should pass one
    /// without matches.
    pub fn with_grid(mut config: SessionConfig, grid: Grid) -> Result<Self, ConfigError> {
        config.grid_size = grid.size();
        config.validate()?;
        Ok(Self::from_parts(config, grid))
    }

    fn from_parts(config: SessionConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            state: InputState::Idle,
            presentation_busy: false,
            score: 0,
        }
    }

    fn click(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if self.presentation_busy {
            trace!(?cell, "click dropped while presentation is busy");
            return;
        }

        match self.state {
            InputState::Reverting(_) => {
                trace!(?cell, "click dropped while a swap is reverting");
            }
            _ if !self.grid.contains(cell) => {
                debug!(?cell, "click outside the grid");
                out_events.push(Event::ClickRejected {
                    cell,
                    reason: ClickError::OutOfBounds,
                });
            }
            InputState::Idle => {
                debug!(?cell, "cell selected");
                self.state = InputState::Selected(cell);
            }
            InputState::Selected(first) if first == cell || !first.is_adjacent(cell) => {
                debug!(?first, ?cell, "selection cleared");
                self.state = InputState::Idle;
            }
            InputState::Selected(first) => {
                self.state = InputState::Idle;
                self.swap(first, cell, out_events);
            }
        }
    }

    fn swap(&mut self, first: CellCoord, second: CellCoord, out_events: &mut Vec<Event>) {
        let snapshot = self.grid.clone();
        let outcome = match try_swap(&mut self.grid, first, second) {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(?first, ?second, %error, "swap refused");
                return;
            }
        };
        out_events.push(Event::SwapStarted { first, second });

        if outcome.is_accepted() {
            debug!(?first, ?second, matched = outcome.matches().len(), "swap accepted");
            let resolution = resolve(&mut self.grid);
            self.score = self.score.saturating_add(resolution.score_delta);
            out_events.extend(resolution.events.into_iter().map(Event::Cascade));
            out_events.push(Event::ScoreChanged { total: self.score });
            return;
        }

        debug!(
            ?first,
            ?second,
            delay = ?self.config.swap_revert_delay,
            "swap formed no match, scheduling revert"
        );
        self.state = InputState::Reverting(PendingRevert {
            snapshot,
            first,
            second,
            remaining: self.config.swap_revert_delay,
        });
        self.finish_revert_if_due(out_events);
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if let InputState::Reverting(pending) = &mut self.state {
            pending.remaining = pending.remaining.saturating_sub(dt);
            self.finish_revert_if_due(out_events);
        }
    }

    fn finish_revert_if_due(&mut self, out_events: &mut Vec<Event>) {
        let due = matches!(
            &self.state,
            InputState::Reverting(pending) if pending.remaining.is_zero()
        );
        if !due {
            return;
        }

        if let InputState::Reverting(pending) = mem::replace(&mut self.state, InputState::Idle) {
            self.grid = pending.snapshot;
            debug!(first = ?pending.first, second = ?pending.second, "swap reverted");
            out_events.push(Event::SwapReverted {
                first: pending.first,
                second: pending.second,
            });
        }
    }
}

#[derive(Clone, Debug)]
enum InputState {
    Idle,
    Selected(CellCoord),
    Reverting(PendingRevert),
}

/// Swap awaiting its undo once the revert delay has elapsed.
#[derive(Clone, Debug)]
struct PendingRevert {
    snapshot: Grid,
    first: CellCoord,
    second: CellCoord,
    remaining: Duration,
}

/// Applies the provided command to the session, appending what happened.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ClickCell { cell } => session.click(cell, out_events),
        Command::Tick { dt } => session.advance(dt, out_events),
        Command::SetPresentationBusy { busy } => {
            if session.presentation_busy != busy {
                trace!(busy, "presentation busy flag changed");
            }
            session.presentation_busy = busy;
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use super::{InputState, Session, SessionConfig};
    use critter_match_core::{CellCoord, SessionPhase};
    use critter_match_grid::Grid;
    use critter_match_system_swap_validation::available_swaps as swaps_on;

    /// Provides read-only access to the board.
    #[must_use]
    pub fn grid(session: &Session) -> &Grid {
        &session.grid
    }

    /// Total score earned so far.
    #[must_use]
    pub fn score(session: &Session) -> u32 {
        session.score
    }

    /// Cell awaiting a second click, if any.
    #[must_use]
    pub fn selection(session: &Session) -> Option<CellCoord> {
        match session.state {
            InputState::Selected(cell) => Some(cell),
            InputState::Idle | InputState::Reverting(_) => None,
        }
    }

    /// Current phase of the input state machine.
    #[must_use]
    pub fn phase(session: &Session) -> SessionPhase {
        match session.state {
            InputState::Idle => SessionPhase::Idle,
            InputState::Selected(cell) => SessionPhase::OneSelected { cell },
            InputState::Reverting(_) => SessionPhase::Resolving,
        }
    }

    /// Reports whether clicks are currently being dropped.
    ///
    /// This is the case while a rejected swap waits to be undone or while the
    /// presentation reports that it is animating.
    #[must_use]
    pub fn is_busy(session: &Session) -> bool {
        session.presentation_busy || matches!(session.state, InputState::Reverting(_))
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(session: &Session) -> &SessionConfig {
        &session.config
    }

    /// Adjacent swaps on the current board that would form a match.
    #[must_use]
    pub fn available_swaps(session: &Session) -> Vec<(CellCoord, CellCoord)> {
        swaps_on(&session.grid)
    }
}
