//! Dense Life grid with directional growth.
//!
//! Cells are stored row-major as one byte each (0 = dead, 1 = alive):
//! index = y * width + x. Everything outside the grid is permanently dead.

use rand::Rng;

/// Grid construction and access errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },
    #[error("Grid of {width}x{height} cells is too large to address")]
    TooLarge { width: usize, height: usize },
    #[error("Cell buffer has {actual} entries, expected {expected}")]
    DataLength { expected: usize, actual: usize },
    #[error("Cell {index} holds {value}, expected 0 or 1")]
    InvalidCell { index: usize, value: u8 },
    #[error("Position ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// Moore neighbourhood offsets.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::ZeroDimension { width, height });
    }
    width
        .checked_mul(height)
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(GridError::TooLarge { width, height })
}

/// Game of Life grid.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
    /// Next-generation buffer, reused across steps.
    scratch: Vec<u8>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let size = cell_count(width, height)?;
        Ok(Self {
            cells: vec![0u8; size],
            width,
            height,
            scratch: Vec::new(),
        })
    }

    /// Create a grid from a row-major copy of `cells`.
    pub fn from_cells(cells: &[u8], width: usize, height: usize) -> Result<Self, GridError> {
        let size = cell_count(width, height)?;
        if cells.len() != size {
            return Err(GridError::DataLength {
                expected: size,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells.iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(GridError::InvalidCell { index, value });
        }
        Ok(Self {
            cells: cells.to_vec(),
            width,
            height,
            scratch: Vec::new(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row-major cell values.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Mutable cell access for codecs that fill the whole buffer. Writers
    /// must only store 0 or 1.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.idx(x, y))
    }

    /// Whether the cell at (x, y) is alive. Positions outside the grid are dead.
    #[inline]
    pub fn is_alive(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.cells[self.idx(x as usize, y as usize)] != 0
    }

    /// Set the cell at (x, y).
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) -> Result<(), GridError> {
        let i = self.check(x, y)?;
        self.cells[i] = alive as u8;
        Ok(())
    }

    /// Flip the cell at (x, y), returning its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, GridError> {
        let i = self.check(x, y)?;
        self.cells[i] ^= 1;
        Ok(self.cells[i] != 0)
    }

    /// Count live cells in the Moore neighbourhood of (x, y).
    ///
    /// Neighbours past the edge of `isize` are dead like any other outside cell.
    pub fn count_neighbors(&self, x: isize, y: isize) -> u8 {
        NEIGHBORS
            .iter()
            .filter_map(|&(dx, dy)| x.checked_add(dx).zip(y.checked_add(dy)))
            .map(|(nx, ny)| self.is_alive(nx, ny) as u8)
            .sum()
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Advance one generation under B3/S23.
    ///
    /// Every neighbour count is taken from the current generation; results go
    /// to the scratch buffer which is then swapped in.
    pub fn step(&mut self) {
        let mut next = std::mem::take(&mut self.scratch);
        next.clear();
        next.resize(self.cells.len(), 0);

        for y in 0..self.height {
            for x in 0..self.width {
                let i = self.idx(x, y);
                let n = self.count_neighbors(x as isize, y as isize);
                next[i] = match (self.cells[i], n) {
                    (1, 2) | (1, 3) => 1,
                    (0, 3) => 1,
                    _ => 0,
                };
            }
        }

        self.scratch = std::mem::replace(&mut self.cells, next);
    }

    /// Set every cell to `alive`.
    pub fn fill(&mut self, alive: bool) {
        self.cells.fill(alive as u8);
    }

    /// Set every cell independently alive or dead with equal probability.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.gen_bool(0.5) as u8;
        }
    }

    /// Copy `src` onto this grid with its top-left corner at (x, y).
    pub fn blit(&mut self, src: &Grid, x: usize, y: usize) -> Result<(), GridError> {
        let fits_x = x.checked_add(src.width).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(src.height).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(GridError::OutOfBounds {
                x: x.saturating_add(src.width),
                y: y.saturating_add(src.height),
                width: self.width,
                height: self.height,
            });
        }
        for (row, src_row) in src.cells.chunks_exact(src.width).enumerate() {
            let start = self.idx(x, y + row);
            self.cells[start..start + src.width].copy_from_slice(src_row);
        }
        Ok(())
    }

    /// Replace the buffer with a zeroed `new_width x new_height` one holding the
    /// old rows with their top-left corner at (dx, dy).
    fn regrow(
        &mut self,
        new_width: usize,
        new_height: usize,
        dx: usize,
        dy: usize,
    ) -> Result<(), GridError> {
        let size = cell_count(new_width, new_height)?;
        let mut cells = vec![0u8; size];
        for (y, row) in self.cells.chunks_exact(self.width).enumerate() {
            let start = (y + dy) * new_width + dx;
            cells[start..start + self.width].copy_from_slice(row);
        }

        log::debug!(
            "grid resized {}x{} -> {}x{} (origin shift {}, {})",
            self.width,
            self.height,
            new_width,
            new_height,
            dx,
            dy
        );

        self.cells = cells;
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    fn grown(&self, extent: usize, amount: usize) -> Result<usize, GridError> {
        extent.checked_add(amount).ok_or(GridError::TooLarge {
            width: self.width,
            height: self.height,
        })
    }

    /// Add `amount` dead columns on the right.
    pub fn expand_right(&mut self, amount: usize) -> Result<(), GridError> {
        if amount == 0 {
            return Ok(());
        }
        let width = self.grown(self.width, amount)?;
        self.regrow(width, self.height, 0, 0)
    }

    /// Add `amount` dead columns on the left. Existing cells move right by `amount`.
    pub fn expand_left(&mut self, amount: usize) -> Result<(), GridError> {
        if amount == 0 {
            return Ok(());
        }
        let width = self.grown(self.width, amount)?;
        self.regrow(width, self.height, amount, 0)
    }

    /// Add `amount` dead rows on top. Existing cells move down by `amount`.
    pub fn expand_up(&mut self, amount: usize) -> Result<(), GridError> {
        if amount == 0 {
            return Ok(());
        }
        let height = self.grown(self.height, amount)?;
        self.regrow(self.width, height, 0, amount)
    }

    /// Add `amount` dead rows at the bottom.
    pub fn expand_down(&mut self, amount: usize) -> Result<(), GridError> {
        if amount == 0 {
            return Ok(());
        }
        let height = self.grown(self.height, amount)?;
        self.regrow(self.width, height, 0, 0)
    }

    /// Double both dimensions, moving each cell (x, y) to
    /// (x + offset_x, y + offset_y).
    ///
    /// Offsets may not exceed the current width and height, so every old cell
    /// lands inside the new grid.
    pub fn double(&mut self, offset_x: usize, offset_y: usize) -> Result<(), GridError> {
        if offset_x > self.width || offset_y > self.height {
            return Err(GridError::OutOfBounds {
                x: offset_x,
                y: offset_y,
                width: self.width,
                height: self.height,
            });
        }
        let width = self.grown(self.width, self.width)?;
        let height = self.grown(self.height, self.height)?;
        self.regrow(width, height, offset_x, offset_y)
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}
