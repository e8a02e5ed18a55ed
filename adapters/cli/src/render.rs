use std::fmt::Write as _;

use critter_match_core::{CascadeEvent, CellCoord, Event, TileKind, TileMove};
use critter_match_grid::Grid;

/// Single letter drawn for each kind.
pub(crate) fn symbol(kind: TileKind) -> char {
    match kind {
        TileKind::Sheep => 'S',
        TileKind::Rabbit => 'R',
        TileKind::Capybara => 'C',
        TileKind::Bear => 'B',
        TileKind::Dino => 'D',
    }
}

/// Draws the board with column and row headers; the selection is bracketed.
pub(crate) fn board(grid: &Grid, selection: Option<CellCoord>) -> String {
    let mut out = String::from("    ");
    for column in 0..grid.size() {
        let _ = write!(out, "{column:^3}");
    }
    out.push('\n');

    for (row, cells) in (0u32..).zip(grid.rows()) {
        let _ = write!(out, "{row:>3} ");
        for (column, value) in (0u32..).zip(cells.iter().copied()) {
            let letter = value.map_or('.', symbol);
            if selection == Some(CellCoord::new(row, column)) {
                let _ = write!(out, "[{letter}]");
            } else {
                let _ = write!(out, " {letter} ");
            }
        }
        out.push('\n');
    }
    out
}

pub(crate) fn cell(cell: CellCoord) -> String {
    format!("({}, {})", cell.row(), cell.column())
}

/// One line describing what happened.
pub(crate) fn event(event: &Event) -> String {
    match event {
        Event::SwapStarted { first, second } => {
            format!("swapped {} with {}", cell(*first), cell(*second))
        }
        Event::SwapReverted { first, second } => {
            format!("no match, {} and {} swap back", cell(*first), cell(*second))
        }
        Event::Cascade(CascadeEvent::TilesRemoved { cells, score_delta }) => {
            format!("cleared {} tiles (+{score_delta})", cells.len())
        }
        Event::Cascade(CascadeEvent::TilesFell { moves }) => {
            let deepest = moves.iter().map(TileMove::distance).max().unwrap_or(0);
            format!("{} tiles fell, deepest by {deepest}", moves.len())
        }
        Event::Cascade(CascadeEvent::Settled) => "board settled".to_owned(),
        Event::ScoreChanged { total } => format!("score: {total}"),
        Event::ClickRejected { cell: target, reason } => {
            format!("{} ignored: {reason}", cell(*target))
        }
    }
}
