use super::{Cell, Pattern};
use crate::error::LifeError;

/// Board is the fixed-size 2D grid the simulation runs on.
/// Cells are stored row-major; edges do not wrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new board with all cells dead
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    /// Build a board from explicit rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, LifeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LifeError::InvalidDimensions { rows: height, cols: width });
        }

        let mut cells = Vec::with_capacity(height * width);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::RaggedBoard {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self { rows: height, cols: width, cells })
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Board dimensions as `(rows, cols)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Convert 2D coordinates to 1D index
    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get cell at position, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.contains(row, col).then(|| self.cells[self.index(row, col)])
    }

    /// Set cell at position. Out-of-range writes are dropped.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.contains(row, col) {
            let idx = self.index(row, col);
            self.cells[idx] = cell;
        }
    }

    /// Flip cell at position. Out-of-range coordinates are ignored.
    /// Returns whether a cell was flipped.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        let idx = self.index(row, col);
        self.cells[idx] = self.cells[idx].toggle();
        true
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Fill every cell from a per-cell generator, row-major.
    pub fn fill_with(&mut self, mut generate: impl FnMut() -> Cell) {
        self.cells.iter_mut().for_each(|cell| *cell = generate());
    }

    /// Count live neighbors among the up-to-8 adjacent cells inside the board.
    /// Positions past an edge contribute nothing.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        (-1isize..=1)
            .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter_map(|(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.get(r, c)
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Compute the next generation from this one. `self` is never touched,
    /// so every neighbor count sees the same frozen generation.
    pub fn next_generation(&self) -> Self {
        let cells = self
            .positions()
            .map(|(row, col)| {
                let current = self.cells[self.index(row, col)];
                current.evolve(self.count_neighbors(row, col))
            })
            .collect();

        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Write a pattern with its top-left corner at `(top, left)`.
    /// Pattern cells that land outside the board are skipped; in-bounds
    /// cells overwrite what is there, dead included.
    pub fn stamp(&mut self, pattern: &Pattern, top: isize, left: isize) -> usize {
        let mut written = 0;
        for (r, row) in pattern.iter_rows().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                let (Some(br), Some(bc)) = (offset(top, r), offset(left, c)) else {
                    continue;
                };
                if self.contains(br, bc) {
                    self.set(br, bc, cell);
                    written += 1;
                }
            }
        }
        written
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.positions()
            .map(|(row, col)| (row, col, self.cells[self.index(row, col)]))
    }

    fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}

/// `origin + delta` as a board index, `None` when it falls before the edge
fn offset(origin: isize, delta: usize) -> Option<usize> {
    usize::try_from(origin.checked_add_unsigned(delta)?).ok()
}
