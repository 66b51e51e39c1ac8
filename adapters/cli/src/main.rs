#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Game of Life experience.
//!
//! The adapter is a thin presentation collaborator: it seeds a starting
//! pattern through the control panel, starts the autonomous driver, renders
//! every committed generation to stdout, and quits once the requested
//! generation budget is spent. All simulation state lives behind the
//! driver; this binary only submits intents and reads snapshots.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use game_of_life_core::{CellCoord, CellState, Event, GridSize, WELCOME_BANNER};
use game_of_life_runner::Driver;
use game_of_life_system_control::{ControlPanel, PlayerIntent};
use game_of_life_world::{query::BoardSnapshot, World};

/// Command-line arguments accepted by the adapter.
#[derive(Debug, Parser)]
#[command(name = "game-of-life", about = "Conway's Game of Life on a fixed board")]
struct Args {
    /// Number of columns on the board.
    #[arg(long, default_value_t = 50)]
    columns: u32,

    /// Number of rows on the board.
    #[arg(long, default_value_t = 50)]
    rows: u32,

    /// Interval between generations in milliseconds. Values outside the
    /// permitted range are clamped, matching the control-panel slider.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Starting pattern toggled onto the centre of the board.
    #[arg(long, value_enum, default_value_t = Pattern::Blinker)]
    pattern: Pattern,

    /// Number of generations to render before quitting.
    #[arg(long, default_value_t = 12)]
    generations: u64,
}

/// Seed patterns the adapter can toggle onto the board.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Pattern {
    /// Period-2 oscillating line of three cells.
    Blinker,
    /// Stable 2x2 square.
    Block,
    /// Diagonally travelling five-cell ship.
    Glider,
}

impl Pattern {
    fn offsets(self) -> &'static [(u32, u32)] {
        match self {
            Self::Blinker => &[(0, 1), (1, 1), (2, 1)],
            Self::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Self::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
        }
    }

    fn extent(self) -> (u32, u32) {
        let mut columns = 0;
        let mut rows = 0;
        for (column, row) in self.offsets() {
            columns = columns.max(column + 1);
            rows = rows.max(row + 1);
        }
        (columns, rows)
    }

    /// Cells the pattern occupies when centred on a board of the given size.
    fn cells(self, size: GridSize) -> Vec<CellCoord> {
        let (width, height) = self.extent();
        let origin_column = size.columns().saturating_sub(width) / 2;
        let origin_row = size.rows().saturating_sub(height) / 2;
        self.offsets()
            .iter()
            .map(|(column, row)| CellCoord::new(origin_column + column, origin_row + row))
            .filter(|cell| size.contains(*cell))
            .collect()
    }
}

/// Entry point for the Game of Life command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    if args.columns == 0 || args.rows == 0 {
        bail!("board dimensions must be positive, got {}x{}", args.columns, args.rows);
    }

    println!("{WELCOME_BANNER}");

    let size = GridSize::new(args.columns, args.rows);
    let driver = Driver::spawn(World::with_size(size));
    let handle = driver.handle();
    let events = handle
        .subscribe()
        .context("subscribing to simulation events")?;

    let mut control = ControlPanel::default();
    let mut commands = Vec::new();
    for cell in args.pattern.cells(size) {
        control.handle(PlayerIntent::ClickCell { cell }, &mut commands);
    }
    if let Some(delay_ms) = args.delay_ms {
        control.handle(
            PlayerIntent::MoveDelaySlider {
                delay: Duration::from_millis(delay_ms),
            },
            &mut commands,
        );
    }
    control.handle(PlayerIntent::PressStart, &mut commands);
    for command in commands.drain(..) {
        handle
            .submit(command)
            .context("submitting startup commands")?;
    }

    render(&handle.snapshot().context("capturing the initial board")?);

    while let Ok(event) = events.recv() {
        if let Event::GenerationAdvanced { iterations } = event {
            render(&handle.snapshot().context("capturing the board")?);
            if iterations >= args.generations {
                control.handle(PlayerIntent::PressQuit, &mut commands);
                break;
            }
        }
    }

    if control.take_quit_request() {
        println!("Quitting after {} generations.", args.generations);
    }
    driver.stop().context("stopping the simulation driver")?;
    Ok(())
}

fn render(snapshot: &BoardSnapshot) {
    let size = snapshot.size();
    let mut frame = String::new();
    for row in 0..size.rows() {
        for column in 0..size.columns() {
            let alive = snapshot
                .state(CellCoord::new(column, row))
                .map_or(false, CellState::is_alive);
            frame.push(if alive { '#' } else { '.' });
        }
        frame.push('\n');
    }
    println!("Iterations: {}", snapshot.iterations());
    print!("{frame}");
}
