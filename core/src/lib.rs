#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Game of Life engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for observers to
//! react to deterministically. Presentation layers consume read-only
//! snapshots and respond exclusively with new command batches.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the Game of Life.";

const INITIAL_DELAY_MS: u64 = 200;

/// Interval between generation steps when the simulation boots.
pub const INITIAL_DELAY: Duration = Duration::from_millis(INITIAL_DELAY_MS);

/// Shortest interval between generation steps the engine accepts.
pub const MIN_DELAY: Duration = Duration::from_millis(INITIAL_DELAY_MS / 5);

/// Longest interval between generation steps the engine accepts.
pub const MAX_DELAY: Duration = Duration::from_millis(INITIAL_DELAY_MS * 5);

/// Board dimensions used when no explicit size is configured.
pub const DEFAULT_GRID_SIZE: GridSize = GridSize::new(50, 50);

/// State a single cell occupies on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// The cell is empty; it may be born when exactly three neighbours live.
    #[default]
    Dead,
    /// The cell is populated; it survives with two or three live neighbours.
    Alive,
}

impl CellState {
    /// Reports whether the cell is populated.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Returns the opposite state, as produced by a player click.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.column, self.row)
    }
}

/// Dimensions of the board measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns laid out across the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows laid out down the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the coordinate names a cell inside the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Total number of cells the board holds.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(0)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}x{}", self.columns, self.rows)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Flips the state of a single cell, as a player click would.
    ToggleCell {
        /// Coordinate of the cell to flip. Out-of-bounds cells are ignored.
        cell: CellCoord,
    },
    /// Sets the pause flag without any other side effect.
    SetPaused {
        /// `true` suspends generation stepping; `false` resumes it.
        paused: bool,
    },
    /// Requests a new interval between generation steps.
    SetDelay {
        /// Interval the simulation should wait between generations.
        delay: Duration,
    },
    /// Resets the simulation to its boot state: every cell dead, the
    /// generation counter at zero, the delay at its initial value, and
    /// stepping paused.
    Restart,
    /// Runs one pass of the stepping loop: neighbour counts are recomputed
    /// unconditionally, and a generation is advanced only while running.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a cell changed state in response to a toggle.
    CellToggled {
        /// Coordinate of the cell that changed.
        cell: CellCoord,
        /// State the cell holds after the toggle.
        state: CellState,
    },
    /// Announces the new value of the pause flag.
    PauseChanged {
        /// `true` when generation stepping is suspended.
        paused: bool,
    },
    /// Confirms that the interval between generations changed.
    DelayChanged {
        /// Interval now separating generation steps.
        delay: Duration,
    },
    /// Reports that a delay reconfiguration request was rejected.
    DelayRejected {
        /// Specific reason the request failed.
        error: DelayError,
    },
    /// Announces that the simulation returned to its boot state.
    SimulationRestarted,
    /// Announces that one generation was applied to every cell.
    GenerationAdvanced {
        /// Value of the generation counter after the advance.
        iterations: u64,
    },
}

/// Error raised when a state query names a cell outside the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("cell {cell} lies outside the {size} board")]
pub struct OutOfRangeError {
    /// Coordinate that failed the bounds check.
    pub cell: CellCoord,
    /// Dimensions of the board that rejected the coordinate.
    pub size: GridSize,
}

/// Reasons a delay reconfiguration request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum DelayError {
    /// The requested interval falls outside the permitted range.
    #[error("requested delay {requested:?} is outside the permitted range {min:?}..={max:?}")]
    OutOfRange {
        /// Interval the caller asked for.
        requested: Duration,
        /// Shortest permitted interval.
        min: Duration,
        /// Longest permitted interval.
        max: Duration,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, CellState, DelayError, GridSize, OutOfRangeError, INITIAL_DELAY, MAX_DELAY,
        MIN_DELAY,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn toggling_twice_restores_the_original_state() {
        assert_eq!(CellState::Dead.toggled(), CellState::Alive);
        assert_eq!(CellState::Dead.toggled().toggled(), CellState::Dead);
        assert_eq!(CellState::Alive.toggled().toggled(), CellState::Alive);
    }

    #[test]
    fn grid_size_contains_matches_bounds() {
        let size = GridSize::new(3, 2);
        assert!(size.contains(CellCoord::new(0, 0)));
        assert!(size.contains(CellCoord::new(2, 1)));
        assert!(!size.contains(CellCoord::new(3, 0)));
        assert!(!size.contains(CellCoord::new(0, 2)));
        assert_eq!(size.cell_count(), 6);
    }

    #[test]
    fn delay_bounds_bracket_the_initial_delay() {
        assert_eq!(MIN_DELAY, INITIAL_DELAY / 5);
        assert_eq!(MAX_DELAY, INITIAL_DELAY * 5);
        assert!(MIN_DELAY <= INITIAL_DELAY && INITIAL_DELAY <= MAX_DELAY);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 11));
    }

    #[test]
    fn cell_state_round_trips_through_bincode() {
        assert_round_trip(&CellState::Alive);
        assert_round_trip(&CellState::Dead);
    }

    #[test]
    fn out_of_range_error_round_trips_through_bincode() {
        assert_round_trip(&OutOfRangeError {
            cell: CellCoord::new(50, 0),
            size: GridSize::new(50, 50),
        });
    }

    #[test]
    fn delay_error_round_trips_through_bincode() {
        assert_round_trip(&DelayError::OutOfRange {
            requested: std::time::Duration::from_millis(5),
            min: MIN_DELAY,
            max: MAX_DELAY,
        });
    }

    #[test]
    fn error_messages_name_the_offending_values() {
        let error = OutOfRangeError {
            cell: CellCoord::new(50, 3),
            size: GridSize::new(50, 50),
        };
        assert_eq!(error.to_string(), "cell (50, 3) lies outside the 50x50 board");
    }
}
