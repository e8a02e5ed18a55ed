#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Critter Match engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative board session, and the pure board systems. Adapters submit
//! [`Command`] values describing player input and the passage of time, the
//! session executes those commands via its `apply` entry point, and then
//! reports what happened as an ordered stream of [`Event`] values that a
//! presentation layer can animate. Systems operate on a grid borrowed for the
//! duration of a single call and never retain it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Score awarded for every tile removed by a cascade.
pub const POINTS_PER_TILE: u32 = 10;

/// Minimum number of identical tiles in a straight line that forms a match.
pub const MIN_RUN_LENGTH: usize = 3;

/// Smallest board that can hold a run.
pub const MIN_GRID_SIZE: u32 = 3;

/// Largest board a session accepts.
pub const MAX_GRID_SIZE: u32 = 64;

/// Fewest distinct kinds that always admit a board without matches.
pub const MIN_KIND_COUNT: usize = 3;

/// Side length of the board used when no explicit size is configured.
pub const DEFAULT_GRID_SIZE: u32 = 8;

/// Delay before a swap that formed no match is undone.
pub const DEFAULT_SWAP_REVERT_DELAY: Duration = Duration::from_millis(300);

/// Commands that express every input the session accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Reports that the player clicked the provided grid cell.
    ClickCell {
        /// Cell resolved from the pointer position by the input adapter.
        cell: CellCoord,
    },
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Reports whether the presentation layer is still playing animations.
    SetPresentationBusy {
        /// `true` while animations are in flight and input should be dropped.
        busy: bool,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Announces that two adjacent tiles exchanged places.
    SwapStarted {
        /// Cell selected first by the player.
        first: CellCoord,
        /// Cell selected second by the player.
        second: CellCoord,
    },
    /// Announces that a swap which formed no match was undone.
    SwapReverted {
        /// Cell selected first by the player.
        first: CellCoord,
        /// Cell selected second by the player.
        second: CellCoord,
    },
    /// Step of the cascade that followed an accepted swap.
    Cascade(CascadeEvent),
    /// Reports the cumulative score after a cascade settled.
    ScoreChanged {
        /// Total score accumulated by the session.
        total: u32,
    },
    /// Reports that a click was refused without changing any state.
    ClickRejected {
        /// Cell supplied by the input adapter.
        cell: CellCoord,
        /// Specific reason the click was refused.
        reason: ClickError,
    },
}

/// Individual steps produced by the cascade resolver in temporal order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeEvent {
    /// Matched tiles were cleared from the grid.
    TilesRemoved {
        /// Cleared cells in row-major order.
        cells: Vec<CellCoord>,
        /// Score earned by this removal pass alone.
        score_delta: u32,
    },
    /// Remaining tiles dropped into the gaps below them.
    TilesFell {
        /// Every tile that changed cell during the gravity pass.
        moves: Vec<TileMove>,
    },
    /// The grid contains no further matches.
    Settled,
}

/// Phases of the session's input state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No selection is held and input is accepted.
    Idle,
    /// One cell is selected and the session awaits the second click.
    OneSelected {
        /// Cell chosen by the first click.
        cell: CellCoord,
    },
    /// A swap or cascade is in flight and input is ignored.
    Resolving,
}

/// Categorical tile values that populate the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Woolly sheep tile.
    Sheep,
    /// Long-eared rabbit tile.
    Rabbit,
    /// Capybara tile.
    Capybara,
    /// Brown bear tile.
    Bear,
    /// Dinosaur tile.
    Dino,
}

impl TileKind {
    /// Every tile kind in declaration order.
    pub const ALL: [TileKind; 5] = [
        TileKind::Sheep,
        TileKind::Rabbit,
        TileKind::Capybara,
        TileKind::Bear,
        TileKind::Dino,
    ];

    /// Lowercase name used by configuration files and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sheep => "sheep",
            Self::Rabbit => "rabbit",
            Self::Capybara => "capybara",
            Self::Bear => "bear",
            Self::Dino => "dino",
        }
    }

    /// Parses a kind from its lowercase name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
///
/// Ordering is row-major so every set of cells reported by the engine has a
/// deterministic iteration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell, counted from the top.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell, counted from the left.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells share an edge. Diagonals never do.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Single tile displacement recorded by a gravity pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileMove {
    /// Cell the tile occupied before falling.
    pub from: CellCoord,
    /// Cell the tile occupies after falling.
    pub to: CellCoord,
}

impl TileMove {
    /// Creates a new move descriptor.
    #[must_use]
    pub const fn new(from: CellCoord, to: CellCoord) -> Self {
        Self { from, to }
    }

    /// Number of rows the tile dropped.
    #[must_use]
    pub const fn distance(&self) -> u32 {
        self.to.row().saturating_sub(self.from.row())
    }
}

/// Reasons a grid access may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum GridError {
    /// The coordinate lies outside the grid.
    #[error("cell ({row}, {column}) lies outside a {size}x{size} grid")]
    OutOfBounds {
        /// Row of the rejected coordinate.
        row: u32,
        /// Column of the rejected coordinate.
        column: u32,
        /// Side length of the grid that was accessed.
        size: u32,
    },
    /// Rows supplied to build a grid do not describe a square.
    #[error("expected {expected} cells in every row, found a row with {found}")]
    NotSquare {
        /// Number of rows, which every row length must equal.
        expected: u32,
        /// Length of the first mismatching row.
        found: u32,
    },
}

/// Reasons the swap validator may refuse a swap without touching the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum SwapError {
    /// Both coordinates name the same cell.
    #[error("a cell cannot be swapped with itself")]
    SameCell,
    /// The cells do not share an edge.
    #[error("cells are not adjacent")]
    NotAdjacent,
    /// At least one coordinate lies outside the grid.
    #[error("swap touches a cell outside the grid")]
    OutOfBounds,
}

/// Reasons a click may be refused by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum ClickError {
    /// The clicked cell lies outside the grid.
    #[error("clicked cell lies outside the grid")]
    OutOfBounds,
}

/// Reasons a board configuration may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum ConfigError {
    /// The grid is too small to ever hold a run.
    #[error("grid size {size} is below the minimum of {minimum}")]
    GridTooSmall {
        /// Requested side length.
        size: u32,
        /// Smallest side length accepted.
        minimum: u32,
    },
    /// The grid is larger than a session accepts.
    #[error("grid size {size} exceeds the maximum of {maximum}")]
    GridTooLarge {
        /// Requested side length.
        size: u32,
        /// Largest side length accepted.
        maximum: u32,
    },
    /// Too few distinct kinds to deal a board without matches.
    #[error("{found} tile kinds configured, at least {minimum} are required")]
    TooFewKinds {
        /// Number of kinds supplied.
        found: usize,
        /// Smallest number of kinds accepted.
        minimum: usize,
    },
    /// The same kind was listed more than once.
    #[error("tile kind {0:?} is listed more than once")]
    DuplicateKind(TileKind),
}
