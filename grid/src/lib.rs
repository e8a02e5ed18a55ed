#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Square tile grid owned by the board session.
//!
//! The grid stores one optional [`TileKind`] per cell in a flat, row-major
//! vector. Strict accessors ([`Grid::get`], [`Grid::set`], [`Grid::swap`])
//! report [`GridError::OutOfBounds`] for coordinates outside the board, while
//! the lenient [`Grid::occupant`], [`Grid::occupy`] and [`Grid::vacate`]
//! helpers treat such coordinates as empty so that systems walking cells they
//! already know to be in bounds stay infallible.

use critter_match_core::{CellCoord, GridError, TileKind, MAX_GRID_SIZE};
use rand::{seq::SliceRandom, Rng};

/// Fixed-size square grid of optional tile kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: u32,
    cells: Vec<Option<TileKind>>,
}

impl Grid {
    /// Creates an empty grid with `size` rows and `size` columns.
    ///
    /// Sizes above [`MAX_GRID_SIZE`] are clamped to it.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let size = size.min(MAX_GRID_SIZE);
        let capacity = rows_len(size) * rows_len(size);
        Self {
            size,
            cells: vec![None; capacity],
        }
    }

    /// Builds a grid from nested rows listed top to bottom.
    ///
    /// Every row must contain exactly as many cells as there are rows.
    pub fn from_rows(rows: Vec<Vec<Option<TileKind>>>) -> Result<Self, GridError> {
        let size = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let mut cells = Vec::with_capacity(rows.len().saturating_mul(rows.len()));
        for row in rows {
            if row.len() != rows_len(size) {
                return Err(GridError::NotSquare {
                    expected: size,
                    found: u32::try_from(row.len()).unwrap_or(u32::MAX),
                });
            }
            cells.extend(row);
        }

        Ok(Self { size, cells })
    }

    /// Number of rows, which always equals the number of columns.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.size && cell.column() < self.size
    }

    /// Returns the content of the cell, failing for coordinates outside the grid.
    pub fn get(&self, cell: CellCoord) -> Result<Option<TileKind>, GridError> {
        let index = self.checked_index(cell)?;
        Ok(self.cells[index])
    }

    /// Overwrites the content of the cell and returns its previous value.
    pub fn set(
        &mut self,
        cell: CellCoord,
        value: Option<TileKind>,
    ) -> Result<Option<TileKind>, GridError> {
        let index = self.checked_index(cell)?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Exchanges the contents of two cells.
    ///
    /// The grid is left untouched when either coordinate is out of bounds.
    pub fn swap(&mut self, first: CellCoord, second: CellCoord) -> Result<(), GridError> {
        let first_index = self.checked_index(first)?;
        let second_index = self.checked_index(second)?;
        self.cells.swap(first_index, second_index);
        Ok(())
    }

    /// Returns the tile occupying the cell, treating out-of-bounds cells as empty.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<TileKind> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Places a tile in the cell. Coordinates outside the grid are ignored.
    pub fn occupy(&mut self, cell: CellCoord, kind: TileKind) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(kind);
            }
        }
    }

    /// Empties the cell, yielding the tile it held.
    pub fn vacate(&mut self, cell: CellCoord) -> Option<TileKind> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Assigns every cell an independent, uniformly random kind from `kinds`.
    ///
    /// An empty `kinds` slice leaves every cell empty.
    pub fn fill_random<R>(&mut self, kinds: &[TileKind], rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for slot in &mut self.cells {
            *slot = kinds.choose(rng).copied();
        }
    }

    /// Iterates over every cell in row-major order together with its content.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Option<TileKind>)> + '_ {
        let width = rows_len(self.size).max(1);
        self.cells.iter().enumerate().map(move |(index, value)| {
            let row = u32::try_from(index / width).unwrap_or(u32::MAX);
            let column = u32::try_from(index % width).unwrap_or(u32::MAX);
            (CellCoord::new(row, column), *value)
        })
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<TileKind>]> {
        self.cells.chunks(rows_len(self.size).max(1))
    }

    /// Counts the cells that currently hold a tile.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Flat, row-major view of every cell.
    #[must_use]
    pub fn cells(&self) -> &[Option<TileKind>] {
        &self.cells
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, GridError> {
        self.index(cell).ok_or(GridError::OutOfBounds {
            row: cell.row(),
            column: cell.column(),
            size: self.size,
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

fn rows_len(size: u32) -> usize {
    usize::try_from(size).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        let grid = Grid::new(4);
        assert_eq!(grid.index(CellCoord::new(0, 0)), Some(0));
        assert_eq!(grid.index(CellCoord::new(0, 3)), Some(3));
        assert_eq!(grid.index(CellCoord::new(1, 0)), Some(4));
        assert_eq!(grid.index(CellCoord::new(3, 3)), Some(15));
        assert_eq!(grid.index(CellCoord::new(4, 0)), None);
        assert_eq!(grid.index(CellCoord::new(0, 4)), None);
    }

    #[test]
    fn iter_reports_coordinates_matching_storage() {
        let mut grid = Grid::new(3);
        let _ = grid
            .set(CellCoord::new(2, 1), Some(TileKind::Bear))
            .expect("in bounds");

        let occupied: Vec<_> = grid.iter().filter(|(_, value)| value.is_some()).collect();
        assert_eq!(occupied, vec![(CellCoord::new(2, 1), Some(TileKind::Bear))]);
        assert_eq!(grid.cells[7], Some(TileKind::Bear));
    }

    #[test]
    fn oversized_grid_is_clamped_with_matching_storage() {
        let grid = Grid::new(u32::MAX);

        assert_eq!(grid.size(), MAX_GRID_SIZE);
        assert_eq!(grid.cells.len(), rows_len(MAX_GRID_SIZE) * rows_len(MAX_GRID_SIZE));
        let corner = CellCoord::new(MAX_GRID_SIZE - 1, MAX_GRID_SIZE - 1);
        assert_eq!(grid.get(corner), Ok(None));
    }

    #[test]
    fn zero_sized_grid_has_no_rows() {
        let grid = Grid::new(0);
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(grid.iter().count(), 0);
        assert!(!grid.contains(CellCoord::new(0, 0)));
    }
}
