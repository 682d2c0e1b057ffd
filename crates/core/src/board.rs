//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with a piece kind.
//! Uses a flat array for cache locality and zero-allocation row compaction.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are legal for collision purposes and never stored.

use arrayvec::ArrayVec;

use crate::pieces::{Piece, Shape};
use blockfall_types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Ascending indices of full rows. Capacity covers every row of the board.
pub type FullRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision test for `shape` anchored at `(x, y)`.
    ///
    /// A filled cell collides when its column is outside `[0, W)`, its row is at or
    /// below the floor, or it lands on an occupied cell. Cells with a negative row never
    /// collide.
    pub fn collides(&self, x: i8, y: i8, shape: &Shape) -> bool {
        shape.minos().any(|(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Write every filled cell of `piece` into the grid, clipping cells that fall
    /// outside the board. Returns the number of cells written.
    pub fn merge(&mut self, piece: &Piece) -> usize {
        let mut written = 0;
        for (x, y) in piece.cells() {
            if self.set(x, y, Some(piece.kind)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, ascending (top to bottom).
    pub fn full_rows(&self) -> FullRows {
        (0..BOARD_HEIGHT)
            .filter(|&y| self.is_row_full(y as usize))
            .collect()
    }

    /// Delete the given rows and refill the top with empty rows.
    ///
    /// The remaining rows keep their order; everything above a removed row falls by the
    /// number of removed rows below it. Indices out of range are ignored. Returns the
    /// number of rows actually removed.
    pub fn remove_rows(&mut self, rows: &[u8]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut removed = 0;

        // Compact from the bottom up; copy_within handles the overlap.
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&(read_y as u8)) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        removed
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `y` as a slice, or None if out of range.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Export the grid as piece codes (0 = empty) for snapshots and renderers.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[start + x].map(|k| k.code()).unwrap_or(0);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
