//! Dense cell storage and the generation-step rule.

use game_of_life_core::{CellCoord, CellState, GridSize, OutOfRangeError};

/// Dense board of cell states with a parallel buffer of cached neighbour
/// counts. Counts are derived values: they are recomputed wholesale once per
/// tick from the committed cell states, never incrementally.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    size: GridSize,
    cells: Vec<CellState>,
    neighbor_counts: Vec<u8>,
}

impl Grid {
    pub(crate) fn new(size: GridSize) -> Self {
        let capacity = size.cell_count();
        Self {
            size,
            cells: vec![CellState::Dead; capacity],
            neighbor_counts: vec![0; capacity],
        }
    }

    pub(crate) const fn size(&self) -> GridSize {
        self.size
    }

    pub(crate) fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Flips the cell and reports its new state. Out-of-bounds coordinates
    /// are a silent no-op, matching how stray clicks are ignored.
    pub(crate) fn toggle(&mut self, cell: CellCoord) -> Option<CellState> {
        let index = self.index(cell)?;
        let state = self.cells.get(index).copied()?.toggled();
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = state;
        }
        Some(state)
    }

    pub(crate) fn state_at(&self, cell: CellCoord) -> Result<CellState, OutOfRangeError> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .ok_or(OutOfRangeError {
                cell,
                size: self.size,
            })
    }

    pub(crate) fn neighbor_count_at(&self, cell: CellCoord) -> Result<u8, OutOfRangeError> {
        self.index(cell)
            .and_then(|index| self.neighbor_counts.get(index).copied())
            .ok_or(OutOfRangeError {
                cell,
                size: self.size,
            })
    }

    /// Recomputes every cached neighbour count from the committed cell
    /// states. The whole pass reads the same pre-tick snapshot: no count is
    /// derived from another count updated during the pass.
    pub(crate) fn recompute_neighbor_counts(&mut self) {
        for row in 0..self.size.rows() {
            for column in 0..self.size.columns() {
                let cell = CellCoord::new(column, row);
                let count = self.count_live_neighbors(cell);
                if let Some(index) = self.index(cell) {
                    if let Some(slot) = self.neighbor_counts.get_mut(index) {
                        *slot = count;
                    }
                }
            }
        }
    }

    fn count_live_neighbors(&self, cell: CellCoord) -> u8 {
        let mut count = 0;
        for neighbor in moore_neighbors(cell, self.size) {
            let alive = self
                .index(neighbor)
                .and_then(|index| self.cells.get(index))
                .map_or(false, |state| state.is_alive());
            if alive {
                count += 1;
            }
        }
        count
    }

    /// Applies the birth and death rule to every cell using the counts
    /// cached by the preceding [`Grid::recompute_neighbor_counts`] call. The
    /// rule reads only a cell's own state and its cached count, so the
    /// in-place commit never observes a mid-pass state.
    pub(crate) fn apply_life_rule(&mut self) {
        for (cell, count) in self.cells.iter_mut().zip(self.neighbor_counts.iter()) {
            match *cell {
                CellState::Dead if *count == 3 => *cell = CellState::Alive,
                CellState::Alive if *count < 2 || *count > 3 => *cell = CellState::Dead,
                _ => {}
            }
        }
    }

    pub(crate) fn reset_all(&mut self) {
        self.cells.fill(CellState::Dead);
        self.neighbor_counts.fill(0);
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

fn moore_neighbors(cell: CellCoord, size: GridSize) -> NeighborIter {
    let mut neighbors = NeighborIter::default();
    let column = cell.column();
    let row = cell.row();
    let has_west = column > 0;
    let has_east = column + 1 < size.columns();
    let has_north = row > 0;
    let has_south = row + 1 < size.rows();

    if has_north && has_west {
        neighbors.push(CellCoord::new(column - 1, row - 1));
    }
    if has_north {
        neighbors.push(CellCoord::new(column, row - 1));
    }
    if has_north && has_east {
        neighbors.push(CellCoord::new(column + 1, row - 1));
    }
    if has_west {
        neighbors.push(CellCoord::new(column - 1, row));
    }
    if has_east {
        neighbors.push(CellCoord::new(column + 1, row));
    }
    if has_south && has_west {
        neighbors.push(CellCoord::new(column - 1, row + 1));
    }
    if has_south {
        neighbors.push(CellCoord::new(column, row + 1));
    }
    if has_south && has_east {
        neighbors.push(CellCoord::new(column + 1, row + 1));
    }

    neighbors
}

#[derive(Clone, Debug, Default)]
struct NeighborIter {
    buffer: [Option<CellCoord>; 8],
    len: usize,
    cursor: usize,
}

impl NeighborIter {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::{moore_neighbors, Grid};
    use game_of_life_core::{CellCoord, CellState, GridSize};

    #[test]
    fn corner_cells_have_three_neighbors() {
        let size = GridSize::new(5, 5);
        assert_eq!(moore_neighbors(CellCoord::new(0, 0), size).count(), 3);
        assert_eq!(moore_neighbors(CellCoord::new(4, 4), size).count(), 3);
    }

    #[test]
    fn edge_cells_have_five_neighbors() {
        let size = GridSize::new(5, 5);
        assert_eq!(moore_neighbors(CellCoord::new(2, 0), size).count(), 5);
        assert_eq!(moore_neighbors(CellCoord::new(0, 2), size).count(), 5);
    }

    #[test]
    fn interior_cells_have_eight_neighbors() {
        let size = GridSize::new(5, 5);
        assert_eq!(moore_neighbors(CellCoord::new(2, 2), size).count(), 8);
    }

    #[test]
    fn neighbor_iteration_excludes_the_origin_cell() {
        let size = GridSize::new(3, 3);
        let origin = CellCoord::new(1, 1);
        assert!(moore_neighbors(origin, size).all(|neighbor| neighbor != origin));
    }

    #[test]
    fn counts_follow_committed_states() {
        let mut grid = Grid::new(GridSize::new(3, 3));
        let _ = grid.toggle(CellCoord::new(0, 0));
        let _ = grid.toggle(CellCoord::new(1, 0));
        let _ = grid.toggle(CellCoord::new(2, 0));
        grid.recompute_neighbor_counts();

        assert_eq!(grid.neighbor_count_at(CellCoord::new(1, 1)), Ok(3));
        assert_eq!(grid.neighbor_count_at(CellCoord::new(1, 0)), Ok(2));
        assert_eq!(grid.neighbor_count_at(CellCoord::new(0, 0)), Ok(1));
    }

    #[test]
    fn toggle_outside_the_board_is_ignored() {
        let mut grid = Grid::new(GridSize::new(2, 2));
        assert_eq!(grid.toggle(CellCoord::new(2, 0)), None);
        assert!(grid.cells().iter().all(|state| *state == CellState::Dead));
    }
}
