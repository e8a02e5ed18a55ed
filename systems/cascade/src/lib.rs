#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cascade resolution: remove matches, let tiles fall, repeat until settled.
//!
//! Falling tiles can line up into runs that did not exist before gravity ran,
//! so removal and gravity alternate until a detection pass comes back empty.
//! Every removal pass strictly lowers the number of occupied cells, which
//! bounds the loop by the cell count of the grid. Vacated cells at the top of
//! each column are left empty; nothing refills them.

use critter_match_core::{CascadeEvent, CellCoord, TileMove, POINTS_PER_TILE};
use critter_match_grid::Grid;
use critter_match_system_match_detection::{find_matches, MatchSet};
use tracing::{debug, trace};

/// Everything a single cascade produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Cascade steps in the order they happened, always ending in `Settled`.
    pub events: Vec<CascadeEvent>,
    /// Score earned across all removal passes.
    pub score_delta: u32,
    /// Number of removal passes that cleared at least one tile.
    pub passes: u32,
}

/// Runs the cascade loop on the grid until no matches remain.
#[tracing::instrument(level = "debug", skip(grid), fields(size = grid.size()))]
pub fn resolve(grid: &mut Grid) -> Resolution {
    let mut resolution = Resolution::default();

    loop {
        let matches = find_matches(grid);
        if matches.is_empty() {
            resolution.events.push(CascadeEvent::Settled);
            break;
        }

        resolution.passes += 1;
        let cells = remove_matches(grid, &matches);
        let pass_delta = points_for(cells.len());
        resolution.score_delta = resolution.score_delta.saturating_add(pass_delta);
        trace!(
            pass = resolution.passes,
            removed = cells.len(),
            pass_delta,
            "removed matched tiles"
        );
        resolution.events.push(CascadeEvent::TilesRemoved {
            cells,
            score_delta: pass_delta,
        });

        let moves = apply_gravity(grid);
        if !moves.is_empty() {
            trace!(pass = resolution.passes, moved = moves.len(), "tiles fell");
            resolution.events.push(CascadeEvent::TilesFell { moves });
        }
    }

    debug!(
        passes = resolution.passes,
        score_delta = resolution.score_delta,
        "cascade settled"
    );
    resolution
}

/// Empties every matched cell and returns the cleared cells in row-major order.
pub fn remove_matches(grid: &mut Grid, matches: &MatchSet) -> Vec<CellCoord> {
    matches
        .iter()
        .filter(|cell| grid.vacate(*cell).is_some())
        .collect()
}

/// Compacts every column downward, preserving the relative order of its tiles.
///
/// Columns are processed left to right, each from the bottom row upward, and
/// every displaced tile is reported once with its start and end cell.
pub fn apply_gravity(grid: &mut Grid) -> Vec<TileMove> {
    let size = grid.size();
    let mut moves = Vec::new();

    for column in 0..size {
        let mut landing_row = size;
        for row in (0..size).rev() {
            let from = CellCoord::new(row, column);
            let Some(kind) = grid.occupant(from) else {
                continue;
            };

            landing_row -= 1;
            if landing_row != row {
                let to = CellCoord::new(landing_row, column);
                let _ = grid.vacate(from);
                grid.occupy(to, kind);
                moves.push(TileMove::new(from, to));
            }
        }
    }

    moves
}

/// Score awarded for clearing `tiles` cells.
#[must_use]
pub fn points_for(tiles: usize) -> u32 {
    u32::try_from(tiles)
        .unwrap_or(u32::MAX)
        .saturating_mul(POINTS_PER_TILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_scale_with_tile_count() {
        assert_eq!(points_for(0), 0);
        assert_eq!(points_for(3), 30);
        assert_eq!(points_for(7), 70);
    }

    #[test]
    fn points_saturate_instead_of_overflowing() {
        assert_eq!(points_for(usize::MAX), u32::MAX);
    }
}
