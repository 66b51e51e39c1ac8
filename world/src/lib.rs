#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Game of Life.
//!
//! The world owns the board and the run-state (generation counter, stepping
//! delay, pause flag). All mutation flows through [`apply`], which executes
//! one [`Command`] and broadcasts the resulting [`Event`] values. Observers
//! read committed state exclusively through the [`query`] module.

mod grid;

use std::time::Duration;

use game_of_life_core::{
    Command, DelayError, Event, GridSize, DEFAULT_GRID_SIZE, INITIAL_DELAY, MAX_DELAY, MIN_DELAY,
    WELCOME_BANNER,
};

use crate::grid::Grid;

/// Represents the authoritative Game of Life world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    iterations: u64,
    delay: Duration,
    paused: bool,
}

impl World {
    /// Creates a new world with the default board size, paused and empty.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(DEFAULT_GRID_SIZE)
    }

    /// Creates a new world with an explicit board size, paused and empty.
    #[must_use]
    pub fn with_size(size: GridSize) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: Grid::new(size),
            iterations: 0,
            delay: INITIAL_DELAY,
            paused: true,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ToggleCell { cell } => {
            if let Some(state) = world.grid.toggle(cell) {
                out_events.push(Event::CellToggled { cell, state });
            }
        }
        Command::SetPaused { paused } => {
            world.paused = paused;
            out_events.push(Event::PauseChanged { paused });
        }
        Command::SetDelay { delay } => match validate_delay(delay) {
            Ok(delay) => {
                world.delay = delay;
                out_events.push(Event::DelayChanged { delay });
            }
            Err(error) => out_events.push(Event::DelayRejected { error }),
        },
        Command::Restart => {
            world.delay = INITIAL_DELAY;
            world.iterations = 0;
            world.paused = true;
            world.grid.reset_all();
            out_events.push(Event::SimulationRestarted);
        }
        Command::Tick => {
            // Counts refresh on every pass, paused or not, so manual toggles
            // are always reflected before the next advance.
            world.grid.recompute_neighbor_counts();
            if !world.paused {
                world.iterations = world.iterations.saturating_add(1);
                world.grid.apply_life_rule();
                out_events.push(Event::GenerationAdvanced {
                    iterations: world.iterations,
                });
            }
        }
    }
}

fn validate_delay(delay: Duration) -> Result<Duration, DelayError> {
    if delay < MIN_DELAY || delay > MAX_DELAY {
        return Err(DelayError::OutOfRange {
            requested: delay,
            min: MIN_DELAY,
            max: MAX_DELAY,
        });
    }
    Ok(delay)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use game_of_life_core::{CellCoord, CellState, GridSize, OutOfRangeError};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the dimensions of the board.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid.size()
    }

    /// Reports whether the coordinate names a cell inside the board.
    #[must_use]
    pub fn in_bounds(world: &World, cell: CellCoord) -> bool {
        world.grid.size().contains(cell)
    }

    /// Number of generations applied since boot or the last restart.
    #[must_use]
    pub fn iterations(world: &World) -> u64 {
        world.iterations
    }

    /// Interval currently separating generation steps.
    #[must_use]
    pub fn delay(world: &World) -> Duration {
        world.delay
    }

    /// Reports whether generation stepping is suspended.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Retrieves the committed state of a single cell.
    pub fn cell_state(world: &World, cell: CellCoord) -> Result<CellState, OutOfRangeError> {
        world.grid.state_at(cell)
    }

    /// Retrieves the cached neighbour count of a single cell.
    pub fn neighbor_count(world: &World, cell: CellCoord) -> Result<u8, OutOfRangeError> {
        world.grid.neighbor_count_at(cell)
    }

    /// Captures an owned snapshot of the committed board and run state.
    #[must_use]
    pub fn board_snapshot(world: &World) -> BoardSnapshot {
        BoardSnapshot {
            size: world.grid.size(),
            cells: world.grid.cells().to_vec(),
            iterations: world.iterations,
            delay: world.delay,
            paused: world.paused,
        }
    }

    /// Owned snapshot of the committed board used by presentation layers.
    /// Captured between command applications, it never exposes a mid-pass
    /// state.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct BoardSnapshot {
        size: GridSize,
        cells: Vec<CellState>,
        iterations: u64,
        delay: Duration,
        paused: bool,
    }

    impl BoardSnapshot {
        /// Dimensions of the captured board.
        #[must_use]
        pub const fn size(&self) -> GridSize {
            self.size
        }

        /// Value of the generation counter at capture time.
        #[must_use]
        pub const fn iterations(&self) -> u64 {
            self.iterations
        }

        /// Interval separating generation steps at capture time.
        #[must_use]
        pub const fn delay(&self) -> Duration {
            self.delay
        }

        /// Whether generation stepping was suspended at capture time.
        #[must_use]
        pub const fn is_paused(&self) -> bool {
            self.paused
        }

        /// Returns the captured state of the provided cell, if in bounds.
        #[must_use]
        pub fn state(&self, cell: CellCoord) -> Option<CellState> {
            self.index(cell).and_then(|index| self.cells.get(index).copied())
        }

        /// Iterator over the coordinates of every live cell, row-major.
        pub fn alive_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
            let size = self.size;
            (0..size.rows())
                .flat_map(move |row| {
                    (0..size.columns()).map(move |column| CellCoord::new(column, row))
                })
                .filter(move |cell| self.state(*cell).map_or(false, CellState::is_alive))
        }

        fn index(&self, cell: CellCoord) -> Option<usize> {
            if !self.size.contains(cell) {
                return None;
            }
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size.columns()).ok()?;
            Some(row * width + column)
        }
    }
}
