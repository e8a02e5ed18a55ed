#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Critter Match in the terminal.

mod config;
mod render;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use critter_match_core::{CellCoord, Command, Event, SessionPhase};
use critter_match_session::{self as session, query, Session};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{FileConfig, Overrides};

/// Command-line arguments accepted by the Critter Match binary.
#[derive(Debug, Parser)]
#[command(name = "critter-match", about = "Swap adjacent critters to line up three or more.")]
struct CliArgs {
    /// TOML file with board settings; flags take precedence over it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Side length of the square board.
    #[arg(long, value_name = "CELLS")]
    size: Option<u32>,
    /// Seed for dealing the board; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds a swap without a match stays on the board.
    #[arg(long, value_name = "MS")]
    revert_delay_ms: Option<u64>,
    /// Comma separated tile kinds, for example `sheep,bear,dino`.
    #[arg(long, value_name = "LIST")]
    kinds: Option<String>,
}

impl CliArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            grid_size: self.size,
            kinds: self.kinds.clone(),
            swap_revert_delay_ms: self.revert_delay_ms,
            seed: self.seed,
        }
    }
}

/// Entry point for the Critter Match command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let file = match args.config.as_deref() {
        Some(path) => config::load_file(path)?,
        None => FileConfig::default(),
    };
    let config = config::layer(file, args.overrides(), rand::random)?;
    info!(seed = config.seed, size = config.grid_size, "starting session");

    let mut session = Session::new(config).context("failed to deal the board")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut session, stdin.lock(), stdout.lock(), thread::sleep)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// A line typed by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Input {
    Click(CellCoord),
    Hint,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("quit" | "q" | "exit"), None, None) => Input::Quit,
        (Some("hint" | "h"), None, None) => Input::Hint,
        (Some(row), Some(column), None) => match (row.parse(), column.parse()) {
            (Ok(row), Ok(column)) => Input::Click(CellCoord::new(row, column)),
            _ => Input::Unknown,
        },
        _ => Input::Unknown,
    }
}

/// Plays until the player quits, input ends or no swap is left.
fn run<R, W>(
    session: &mut Session,
    input: R,
    mut output: W,
    mut pause: impl FnMut(Duration),
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(
            output,
            "\n{}score: {}\n",
            render::board(query::grid(session), query::selection(session)),
            query::score(session)
        )?;

        let swaps = query::available_swaps(session);
        let Some(&(hint_first, hint_second)) = swaps.first() else {
            writeln!(
                output,
                "No swaps left. Final score: {}",
                query::score(session)
            )?;
            return Ok(());
        };

        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read from stdin")?;

        match parse_input(&line) {
            Input::Quit => return Ok(()),
            Input::Hint => writeln!(
                output,
                "try swapping {} with {}",
                render::cell(hint_first),
                render::cell(hint_second)
            )?,
            Input::Unknown => {
                writeln!(output, "enter `<row> <column>`, `hint` or `quit`")?;
            }
            Input::Click(cell) => {
                let mut events = Vec::new();
                session::apply(session, Command::ClickCell { cell }, &mut events);
                report(&mut output, &events)?;

                if query::phase(session) == SessionPhase::Resolving {
                    let delay = query::config(session).swap_revert_delay;
                    debug!(?delay, "waiting for the revert");
                    pause(delay);
                    events.clear();
                    session::apply(session, Command::Tick { dt: delay }, &mut events);
                    report(&mut output, &events)?;
                }
            }
        }
    }
}

fn report<W: Write>(output: &mut W, events: &[Event]) -> Result<()> {
    for event in events {
        writeln!(output, "  {}", render::event(event))?;
    }
    Ok(())
}
