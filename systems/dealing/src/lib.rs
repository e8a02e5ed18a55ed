#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deals the starting grid of a session.
//!
//! A dealt grid is full and contains no matches. The dealer rerolls the whole
//! board with uniform random kinds until detection comes back empty. Large
//! boards with few kinds almost never roll clean, so after
//! [`MAX_REROLLS`] attempts the dealer switches to a cell-by-cell fill that
//! draws uniformly among the kinds that cannot complete a run with the two
//! cells to the left or the two cells above.

use std::collections::BTreeSet;

use critter_match_core::{CellCoord, ConfigError, TileKind, MAX_GRID_SIZE, MIN_KIND_COUNT};
use critter_match_grid::Grid;
use critter_match_system_match_detection::find_matches;
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, warn};

/// Whole-board rerolls attempted before falling back to the constrained fill.
pub const MAX_REROLLS: u32 = 1_000;

/// Produces a full, match-free grid of the requested size.
///
/// Fails when `kinds` holds fewer than three distinct kinds, since a
/// match-free board cannot be guaranteed with fewer, or when `size` exceeds
/// [`MAX_GRID_SIZE`].
#[tracing::instrument(level = "debug", skip(kinds, rng))]
pub fn deal<R>(size: u32, kinds: &[TileKind], rng: &mut R) -> Result<Grid, ConfigError>
where
    R: Rng + ?Sized,
{
    if size > MAX_GRID_SIZE {
        return Err(ConfigError::GridTooLarge {
            size,
            maximum: MAX_GRID_SIZE,
        });
    }

    let distinct: BTreeSet<TileKind> = kinds.iter().copied().collect();
    if distinct.len() < MIN_KIND_COUNT {
        return Err(ConfigError::TooFewKinds {
            found: distinct.len(),
            minimum: MIN_KIND_COUNT,
        });
    }

    let mut grid = Grid::new(size);
    for attempt in 1..=MAX_REROLLS {
        grid.fill_random(kinds, rng);
        if find_matches(&grid).is_empty() {
            debug!(attempt, "dealt a match-free grid");
            return Ok(grid);
        }
    }

    warn!(rerolls = MAX_REROLLS, "rerolls exhausted, filling cell by cell");
    fill_without_runs(&mut grid, kinds, rng);
    Ok(grid)
}

/// Fills the grid in row-major order, never completing a run of three.
pub fn fill_without_runs<R>(grid: &mut Grid, kinds: &[TileKind], rng: &mut R)
where
    R: Rng + ?Sized,
{
    let size = grid.size();
    let mut candidates = Vec::with_capacity(kinds.len());

    for row in 0..size {
        for column in 0..size {
            let cell = CellCoord::new(row, column);
            let _ = grid.vacate(cell);

            let left = completes_run(grid, |offset| {
                column
                    .checked_sub(offset)
                    .map(|column| CellCoord::new(row, column))
            });
            let above = completes_run(grid, |offset| {
                row.checked_sub(offset)
                    .map(|row| CellCoord::new(row, column))
            });

            candidates.clear();
            candidates.extend(
                kinds
                    .iter()
                    .copied()
                    .filter(|kind| Some(*kind) != left && Some(*kind) != above),
            );

            if let Some(kind) = candidates.choose(rng).copied() {
                grid.occupy(cell, kind);
            }
        }
    }
}

/// Kind shared by the two cells `preceding(1)` and `preceding(2)`, if any.
fn completes_run<F>(grid: &Grid, preceding: F) -> Option<TileKind>
where
    F: Fn(u32) -> Option<CellCoord>,
{
    let nearest = grid.occupant(preceding(1)?)?;
    let farther = grid.occupant(preceding(2)?)?;
    (nearest == farther).then_some(nearest)
}
