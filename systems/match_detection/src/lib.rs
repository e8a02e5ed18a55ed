#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure match detection over a borrowed grid.
//!
//! A *run* is a maximal sequence of consecutive, identical, non-empty cells
//! along one row or column. Every run of at least
//! [`MIN_RUN_LENGTH`](critter_match_core::MIN_RUN_LENGTH) cells is a match,
//! and the match set of a grid is the union of the cells of all such runs.
//! Empty cells never take part in a run, not even with each other.

use std::collections::BTreeSet;

use critter_match_core::{CellCoord, TileKind, MIN_RUN_LENGTH};
use critter_match_grid::Grid;

/// Orientation of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Run laid out along a row, left to right.
    Horizontal,
    /// Run laid out along a column, top to bottom.
    Vertical,
}

/// A maximal straight line of at least three identical tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    /// Kind shared by every cell in the run.
    pub kind: TileKind,
    /// Direction the run extends in.
    pub axis: Axis,
    /// Cells in scan order.
    pub cells: Vec<CellCoord>,
}

/// Cells belonging to at least one run, ordered row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSet {
    cells: BTreeSet<CellCoord>,
}

impl MatchSet {
    /// Number of distinct matched cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the provided cell is part of a match.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Iterator over the matched cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }

    /// Consumes the set, yielding the cells in row-major order.
    #[must_use]
    pub fn into_vec(self) -> Vec<CellCoord> {
        self.cells.into_iter().collect()
    }
}

impl FromIterator<CellCoord> for MatchSet {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Returns every matched cell of the grid.
#[must_use]
pub fn find_matches(grid: &Grid) -> MatchSet {
    find_runs(grid)
        .into_iter()
        .flat_map(|run| run.cells)
        .collect()
}

/// Returns every run of three or more, rows first (top to bottom), then columns
/// (left to right).
#[must_use]
pub fn find_runs(grid: &Grid) -> Vec<Run> {
    let size = grid.size();
    let mut runs = Vec::new();

    for row in 0..size {
        scan_line(
            grid,
            (0..size).map(|column| CellCoord::new(row, column)),
            Axis::Horizontal,
            &mut runs,
        );
    }

    for column in 0..size {
        scan_line(
            grid,
            (0..size).map(|row| CellCoord::new(row, column)),
            Axis::Vertical,
            &mut runs,
        );
    }

    runs
}

fn scan_line<I>(grid: &Grid, line: I, axis: Axis, runs: &mut Vec<Run>)
where
    I: Iterator<Item = CellCoord>,
{
    let mut streak = Streak::default();
    for cell in line {
        let kind = grid.occupant(cell);
        if kind.is_some() && kind == streak.kind {
            streak.cells.push(cell);
            continue;
        }

        streak.flush(axis, runs);
        streak.kind = kind;
        if kind.is_some() {
            streak.cells.push(cell);
        }
    }
    streak.flush(axis, runs);
}

#[derive(Default)]
struct Streak {
    kind: Option<TileKind>,
    cells: Vec<CellCoord>,
}

impl Streak {
    fn flush(&mut self, axis: Axis, runs: &mut Vec<Run>) {
        let cells = std::mem::take(&mut self.cells);
        if let Some(kind) = self.kind.take() {
            if cells.len() >= MIN_RUN_LENGTH {
                runs.push(Run { kind, axis, cells });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_flush_discards_short_runs() {
        let mut runs = Vec::new();
        let mut streak = Streak {
            kind: Some(TileKind::Sheep),
            cells: vec![CellCoord::new(0, 0), CellCoord::new(0, 1)],
        };

        streak.flush(Axis::Horizontal, &mut runs);

        assert!(runs.is_empty());
        assert!(streak.cells.is_empty());
        assert_eq!(streak.kind, None);
    }
}
