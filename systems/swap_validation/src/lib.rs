#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure swap validation primitive.
//!
//! [`try_swap`] exchanges two adjacent cells in place and reports the matches
//! the exchange produced. It never undoes its own work: deciding whether a
//! swap without matches should be rolled back belongs to the caller, which is
//! expected to keep a snapshot of the grid when it needs one.

use critter_match_core::{CellCoord, SwapError};
use critter_match_grid::Grid;
use critter_match_system_match_detection::{find_matches, MatchSet};

/// Result of a swap that passed the adjacency and bounds checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapOutcome {
    matches: MatchSet,
}

impl SwapOutcome {
    /// Reports whether the swap formed at least one match.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Cells matched on the grid right after the swap.
    #[must_use]
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    /// Consumes the outcome, yielding the matched cells.
    #[must_use]
    pub fn into_matches(self) -> MatchSet {
        self.matches
    }
}

/// Exchanges two adjacent cells and runs match detection on the result.
///
/// The grid is mutated for every `Ok` result, accepted or not. Every `Err`
/// leaves the grid untouched.
pub fn try_swap(
    grid: &mut Grid,
    first: CellCoord,
    second: CellCoord,
) -> Result<SwapOutcome, SwapError> {
    if first == second {
        return Err(SwapError::SameCell);
    }
    if !first.is_adjacent(second) {
        return Err(SwapError::NotAdjacent);
    }
    grid.swap(first, second).map_err(|_| SwapError::OutOfBounds)?;

    Ok(SwapOutcome {
        matches: find_matches(grid),
    })
}

/// Lists every adjacent pair whose swap would form a match.
///
/// Pairs are reported once, as `(cell, right neighbour)` or
/// `(cell, lower neighbour)`, in row-major order of the first cell. The grid
/// is not modified; candidate swaps are evaluated on a scratch copy. Pairs of
/// equal kinds and pairs of empty cells are skipped, since exchanging them
/// leaves the grid unchanged. On a grid without matches the list therefore
/// holds exactly the swaps [`try_swap`] would accept.
#[must_use]
pub fn available_swaps(grid: &Grid) -> Vec<(CellCoord, CellCoord)> {
    let mut scratch = grid.clone();
    let mut swaps = Vec::new();

    for (cell, value) in grid.iter() {
        let neighbours = [
            CellCoord::new(cell.row(), cell.column() + 1),
            CellCoord::new(cell.row() + 1, cell.column()),
        ];
        for neighbour in neighbours {
            if !grid.contains(neighbour) {
                continue;
            }
            if value.is_none() && grid.occupant(neighbour).is_none() {
                continue;
            }
            if value == grid.occupant(neighbour) {
                continue;
            }

            if let Ok(outcome) = try_swap(&mut scratch, cell, neighbour) {
                if outcome.is_accepted() {
                    swaps.push((cell, neighbour));
                }
                let _ = scratch.swap(cell, neighbour);
            }
        }
    }

    swaps
}
