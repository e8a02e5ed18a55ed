use std::collections::BTreeSet;

use critter_match_core::{CellCoord, TileKind};
use critter_match_grid::Grid;
use critter_match_system_match_detection::{find_matches, find_runs, Axis};
use proptest::prelude::*;

fn grid_from(rows: &[&str]) -> Grid {
    let rows = rows
        .iter()
        .map(|row| row.chars().map(kind_from_char).collect())
        .collect();
    Grid::from_rows(rows).expect("test grids are square")
}

fn kind_from_char(symbol: char) -> Option<TileKind> {
    match symbol {
        'S' => Some(TileKind::Sheep),
        'R' => Some(TileKind::Rabbit),
        'C' => Some(TileKind::Capybara),
        'B' => Some(TileKind::Bear),
        'D' => Some(TileKind::Dino),
        '.' => None,
        other => panic!("unknown tile symbol {other:?}"),
    }
}

fn cells(coords: &[(u32, u32)]) -> Vec<CellCoord> {
    coords
        .iter()
        .map(|&(row, column)| CellCoord::new(row, column))
        .collect()
}

#[test]
fn grid_without_runs_has_no_matches() {
    let grid = grid_from(&["SRC", "RCS", "CSR"]);
    assert!(find_matches(&grid).is_empty());
    assert!(find_runs(&grid).is_empty());
}

#[test]
fn horizontal_run_of_three_is_matched() {
    let grid = grid_from(&["SSSR", "RCBD", "CBDR", "BDRC"]);
    let matches = find_matches(&grid);
    assert_eq!(matches.into_vec(), cells(&[(0, 0), (0, 1), (0, 2)]));
}

#[test]
fn vertical_run_of_three_is_matched() {
    let grid = grid_from(&["SRC", "SCB", "SBR"]);
    let matches = find_matches(&grid);
    assert_eq!(matches.into_vec(), cells(&[(0, 0), (1, 0), (2, 0)]));
}

#[test]
fn long_runs_are_matched_in_full() {
    let grid = grid_from(&[
        "RCBDSC", "DDDDDB", "CBRSCR", "BRSCRD", "RSCRDS", "SCRDSB",
    ]);
    let matches = find_matches(&grid);
    assert_eq!(
        matches.into_vec(),
        cells(&[(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)])
    );

    let runs = find_runs(&grid);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, TileKind::Dino);
    assert_eq!(runs[0].axis, Axis::Horizontal);
    assert_eq!(runs[0].cells.len(), 5);
}

#[test]
fn crossing_runs_share_their_intersection() {
    let grid = grid_from(&["RBSCD", "CDSRB", "SSSBC", "DRCDR", "BCDRC"]);
    let matches = find_matches(&grid);

    assert_eq!(matches.len(), 5, "intersection counted once");
    for cell in cells(&[(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)]) {
        assert!(matches.contains(cell), "{cell:?} should be matched");
    }

    let runs = find_runs(&grid);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].axis, Axis::Horizontal);
    assert_eq!(runs[1].axis, Axis::Vertical);
}

#[test]
fn separate_runs_are_all_reported() {
    let grid = grid_from(&["BBB.", "....", "....", "RRR."]);
    let matches = find_matches(&grid);
    assert_eq!(
        matches.into_vec(),
        cells(&[(0, 0), (0, 1), (0, 2), (3, 0), (3, 1), (3, 2)])
    );
}

#[test]
fn pairs_never_match() {
    let grid = grid_from(&["SS.", "..S", "..S"]);
    assert!(find_matches(&grid).is_empty());
}

#[test]
fn empty_cells_never_match_each_other() {
    let grid = Grid::new(5);
    assert!(find_matches(&grid).is_empty());

    let grid = grid_from(&["...", "...", "SSS"]);
    assert_eq!(
        find_matches(&grid).into_vec(),
        cells(&[(2, 0), (2, 1), (2, 2)])
    );
}

#[test]
fn gaps_break_runs() {
    let grid = grid_from(&["SS.SS", ".....", ".....", ".....", "....."]);
    assert!(find_matches(&grid).is_empty());
}

fn arbitrary_grid() -> impl Strategy<Value = Grid> {
    (3u32..=8).prop_flat_map(|size| {
        let cell_count = (size * size) as usize;
        proptest::collection::vec(
            proptest::option::weighted(0.85, proptest::sample::select(TileKind::ALL.to_vec())),
            cell_count,
        )
        .prop_map(move |cells| {
            let rows = cells
                .chunks(size as usize)
                .map(<[_]>::to_vec)
                .collect();
            Grid::from_rows(rows).expect("chunks are square")
        })
    })
}

fn window_matches(grid: &Grid) -> BTreeSet<CellCoord> {
    let mut matched = BTreeSet::new();
    let size = grid.size();
    for row in 0..size {
        for column in 0..size {
            let horizontal = [0, 1, 2].map(|offset| CellCoord::new(row, column + offset));
            let vertical = [0, 1, 2].map(|offset| CellCoord::new(row + offset, column));
            for window in [horizontal, vertical] {
                let first = grid.occupant(window[0]);
                if first.is_some() && window.iter().all(|cell| grid.occupant(*cell) == first) {
                    matched.extend(window);
                }
            }
        }
    }
    matched
}

proptest! {
    #[test]
    fn detection_is_idempotent(grid in arbitrary_grid()) {
        prop_assert_eq!(find_matches(&grid), find_matches(&grid));
    }

    #[test]
    fn detection_agrees_with_sliding_windows(grid in arbitrary_grid()) {
        let matched: BTreeSet<CellCoord> = find_matches(&grid).iter().collect();
        prop_assert_eq!(matched, window_matches(&grid));
    }

    #[test]
    fn matched_cells_are_never_empty(grid in arbitrary_grid()) {
        for cell in find_matches(&grid).iter() {
            prop_assert!(grid.occupant(cell).is_some());
        }
    }

    #[test]
    fn horizontal_runs_are_reported_completely(
        length in 3u32..=8,
        row in 0u32..8,
        start in 0u32..6,
    ) {
        let size = 8;
        let start = start.min(size - length);
        let mut grid = Grid::new(size);
        for column in start..start + length {
            grid.occupy(CellCoord::new(row, column), TileKind::Capybara);
        }

        let matches = find_matches(&grid);
        prop_assert_eq!(matches.len(), length as usize);
        for column in start..start + length {
            prop_assert!(matches.contains(CellCoord::new(row, column)));
        }
    }
}
