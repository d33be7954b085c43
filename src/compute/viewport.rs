//! Viewport over a growing grid.
//!
//! The viewport is the half-open rectangle `[top_left, bottom_right)` in grid
//! coordinates plus the on-screen pixel size of one cell. Panning past the edge
//! of the grid grows the grid instead of clamping, so after every operation the
//! rectangle lies inside `[0, 0) .. grid.dim()`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Grid, GridError};

/// Smallest cell size, in pixels, that zooming out may produce.
pub const MIN_CELL_PIXELS: u32 = 2;

/// Grid-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Width/height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Pan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Screen-space rectangle covering one live cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Visible window into a [`Grid`].
///
/// The viewport does not own the grid; every operation that may resize it
/// takes the grid explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    top_left: Point,
    bottom_right: Point,
    cell_size: PixelSize,
    window: PixelSize,
}

impl Viewport {
    /// Viewport at the grid origin showing `cells` cells in a `window`-sized
    /// area. Cell pixel size is `window / cells` per axis.
    ///
    /// Callers validate that `cells` is non-zero and no larger than `window`
    /// (see `SessionConfig::validate`).
    pub fn new(window: PixelSize, cells: (usize, usize)) -> Self {
        let cell_w = (window.width as usize / cells.0.max(1)).max(1) as u32;
        let cell_h = (window.height as usize / cells.1.max(1)).max(1) as u32;
        Self {
            top_left: Point::new(0, 0),
            bottom_right: Point::new(cells.0, cells.1),
            cell_size: PixelSize::new(cell_w, cell_h),
            window,
        }
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    /// Pixels per cell.
    #[inline]
    pub fn cell_size(&self) -> PixelSize {
        self.cell_size
    }

    #[inline]
    pub fn window(&self) -> PixelSize {
        self.window
    }

    /// Visible extent in cells.
    #[inline]
    pub fn extent(&self) -> (usize, usize) {
        (
            self.bottom_right.x - self.top_left.x,
            self.bottom_right.y - self.top_left.y,
        )
    }

    /// Whether the visible rectangle lies inside `grid`.
    pub fn fits(&self, grid: &Grid) -> bool {
        self.bottom_right.x <= grid.width() && self.bottom_right.y <= grid.height()
    }

    fn shift_x(&mut self, by: usize) {
        self.top_left.x += by;
        self.bottom_right.x += by;
    }

    fn shift_y(&mut self, by: usize) {
        self.top_left.y += by;
        self.bottom_right.y += by;
    }

    /// Pan `n` cells to the right, growing the grid by the deficit if needed.
    pub fn move_right(&mut self, grid: &mut Grid, n: usize) -> Result<(), GridError> {
        let target = self.bottom_right.x.saturating_add(n);
        if target > grid.width() {
            grid.expand_right(target - grid.width())?;
        }
        self.shift_x(n);
        Ok(())
    }

    /// Pan `n` cells to the left, growing the grid leftwards if needed.
    pub fn move_left(&mut self, grid: &mut Grid, n: usize) -> Result<(), GridError> {
        if n > self.top_left.x {
            let deficit = n - self.top_left.x;
            grid.expand_left(deficit)?;
            self.shift_x(deficit);
        }
        self.top_left.x -= n;
        self.bottom_right.x -= n;
        Ok(())
    }

    /// Pan `n` cells up, growing the grid upwards if needed.
    pub fn move_up(&mut self, grid: &mut Grid, n: usize) -> Result<(), GridError> {
        if n > self.top_left.y {
            let deficit = n - self.top_left.y;
            grid.expand_up(deficit)?;
            self.shift_y(deficit);
        }
        self.top_left.y -= n;
        self.bottom_right.y -= n;
        Ok(())
    }

    /// Pan `n` cells down, growing the grid by the deficit if needed.
    pub fn move_down(&mut self, grid: &mut Grid, n: usize) -> Result<(), GridError> {
        let target = self.bottom_right.y.saturating_add(n);
        if target > grid.height() {
            grid.expand_down(target - grid.height())?;
        }
        self.shift_y(n);
        Ok(())
    }

    pub fn pan(
        &mut self,
        grid: &mut Grid,
        direction: Direction,
        n: usize,
    ) -> Result<(), GridError> {
        match direction {
            Direction::Left => self.move_left(grid, n),
            Direction::Right => self.move_right(grid, n),
            Direction::Up => self.move_up(grid, n),
            Direction::Down => self.move_down(grid, n),
        }
    }

    /// Halve the visible extent around its centre and double the cell size.
    ///
    /// Returns `false` once a single cell already covers the window.
    pub fn zoom_in(&mut self) -> bool {
        if self.cell_size.width >= self.window.width || self.cell_size.height >= self.window.height
        {
            return false;
        }

        let (w, h) = self.extent();
        self.top_left.x += w / 4;
        self.top_left.y += h / 4;
        self.bottom_right.x -= w / 4;
        self.bottom_right.y -= h / 4;
        self.cell_size.width *= 2;
        self.cell_size.height *= 2;

        log::debug!("zoom in: {}", self);
        true
    }

    /// Zoom out: double `bottom_right`, halve the cell size and double the
    /// grid in both dimensions, moving every cell (x, y) to
    /// `(x + top_left.x + w/2, y + top_left.y + h/2)` where `w`/`h` is the
    /// pre-zoom visible extent. `top_left` is left unchanged.
    ///
    /// Returns `Ok(false)` without touching anything when the halved cell size
    /// would drop below [`MIN_CELL_PIXELS`].
    pub fn zoom_out(&mut self, grid: &mut Grid) -> Result<bool, GridError> {
        if self.cell_size.width / 2 < MIN_CELL_PIXELS || self.cell_size.height / 2 < MIN_CELL_PIXELS
        {
            return Ok(false);
        }

        let (w, h) = self.extent();
        grid.double(self.top_left.x + w / 2, self.top_left.y + h / 2)?;

        self.bottom_right.x *= 2;
        self.bottom_right.y *= 2;
        self.cell_size.width /= 2;
        self.cell_size.height /= 2;

        log::debug!("zoom out: {}", self);
        Ok(true)
    }

    /// Return to the grid origin showing `cells` cells. The grid never shrinks,
    /// so it is always at least as large as the initial view.
    pub fn reset(&mut self, cells: (usize, usize)) {
        self.top_left = Point::new(0, 0);
        self.bottom_right = Point::new(cells.0, cells.1);
    }

    /// Map a window pixel to the grid cell beneath it.
    pub fn screen_to_grid(&self, px: u32, py: u32) -> Point {
        Point::new(
            (px / self.cell_size.width) as usize + self.top_left.x,
            (py / self.cell_size.height) as usize + self.top_left.y,
        )
    }

    /// Screen rectangles of every live cell in view, row by row.
    pub fn visible_cells<'a>(&'a self, grid: &'a Grid) -> impl Iterator<Item = CellRect> + 'a {
        let (cw, ch) = (self.cell_size.width, self.cell_size.height);
        (self.top_left.y..self.bottom_right.y)
            .enumerate()
            .flat_map(move |(sy, y)| {
                (self.top_left.x..self.bottom_right.x)
                    .enumerate()
                    .filter(move |&(_, x)| grid.is_alive(x as isize, y as isize))
                    .map(move |(sx, _)| CellRect {
                        x: sx as u32 * cw,
                        y: sy as u32 * ch,
                        width: cw,
                        height: ch,
                    })
            })
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{},{}> to <{},{}> at <{},{}>px/cell",
            self.top_left.x,
            self.top_left.y,
            self.bottom_right.x,
            self.bottom_right.y,
            self.cell_size.width,
            self.cell_size.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup(cells: usize, px_per_cell: u32) -> (Grid, Viewport) {
        let grid = Grid::new(cells, cells).unwrap();
        let window = PixelSize::new(cells as u32 * px_per_cell, cells as u32 * px_per_cell);
        (grid, Viewport::new(window, (cells, cells)))
    }

    #[test]
    fn test_new_viewport() {
        let view = Viewport::new(PixelSize::new(800, 600), (80, 40));
        assert_eq!(view.top_left(), Point::new(0, 0));
        assert_eq!(view.bottom_right(), Point::new(80, 40));
        assert_eq!(view.cell_size(), PixelSize::new(10, 15));
    }

    #[test]
    fn test_move_right_grows_by_deficit() {
        let (mut grid, mut view) = setup(10, 4);
        grid.set_alive(9, 9, true).unwrap();

        view.move_right(&mut grid, 3).unwrap();
        assert_eq!(grid.dim(), (13, 10));
        assert_eq!(view.top_left(), Point::new(3, 0));
        assert_eq!(view.bottom_right(), Point::new(13, 10));
        assert!(grid.is_alive(9, 9));

        // Moving back inside the grid must not grow it again
        view.move_left(&mut grid, 2).unwrap();
        view.move_right(&mut grid, 2).unwrap();
        assert_eq!(grid.dim(), (13, 10));
    }

    #[test]
    fn test_move_within_bounds_does_not_grow() {
        let (mut grid, mut view) = setup(10, 4);
        grid.expand_right(5).unwrap();
        view.move_right(&mut grid, 5).unwrap();
        assert_eq!(grid.dim(), (15, 10));
        assert_eq!(view.top_left(), Point::new(5, 0));
    }

    #[test]
    fn test_move_left_past_origin() {
        let (mut grid, mut view) = setup(10, 4);
        grid.set_alive(0, 0, true).unwrap();

        view.move_left(&mut grid, 2).unwrap();
        assert_eq!(grid.dim(), (12, 10));
        assert_eq!(view.top_left(), Point::new(0, 0));
        assert_eq!(view.bottom_right(), Point::new(10, 10));
        // The old origin cell now sits two columns in, which is also two
        // columns from the left edge of the view
        assert!(grid.is_alive(2, 0));
        assert!(view.fits(&grid));
    }

    #[test]
    fn test_move_left_partial_deficit() {
        let (mut grid, mut view) = setup(10, 4);
        view.move_right(&mut grid, 1).unwrap();
        view.move_left(&mut grid, 3).unwrap();
        // One column was available, two had to be added
        assert_eq!(grid.dim(), (13, 10));
        assert_eq!(view.top_left(), Point::new(0, 0));
        assert_eq!(view.bottom_right(), Point::new(10, 10));
    }

    #[test]
    fn test_move_up_and_down() {
        let (mut grid, mut view) = setup(8, 4);
        grid.set_alive(3, 0, true).unwrap();

        view.move_up(&mut grid, 1).unwrap();
        assert_eq!(grid.dim(), (8, 9));
        assert!(grid.is_alive(3, 1));
        assert_eq!(view.top_left(), Point::new(0, 0));

        view.move_down(&mut grid, 4).unwrap();
        assert_eq!(grid.dim(), (8, 12));
        assert_eq!(view.top_left(), Point::new(0, 4));
        assert_eq!(view.bottom_right(), Point::new(8, 12));
        assert!(view.fits(&grid));
    }

    #[test]
    fn test_pan_dispatch() {
        let (mut grid, mut view) = setup(5, 2);
        view.pan(&mut grid, Direction::Down, 2).unwrap();
        view.pan(&mut grid, Direction::Right, 1).unwrap();
        assert_eq!(view.top_left(), Point::new(1, 2));
        assert_eq!(grid.dim(), (6, 7));
    }

    #[test]
    fn test_zoom_in() {
        let (_, mut view) = setup(16, 2);
        assert!(view.zoom_in());
        assert_eq!(view.top_left(), Point::new(4, 4));
        assert_eq!(view.bottom_right(), Point::new(12, 12));
        assert_eq!(view.cell_size(), PixelSize::new(4, 4));
    }

    #[test]
    fn test_zoom_in_stops_at_window() {
        let (_, mut view) = setup(4, 8);
        // 4 cells of 8px in a 32px window: 16px, 32px, then stop
        assert!(view.zoom_in());
        assert!(view.zoom_in());
        assert_eq!(view.cell_size(), PixelSize::new(32, 32));
        let before = view.clone();
        assert!(!view.zoom_in());
        assert_eq!(view, before);
    }

    #[test]
    fn test_zoom_out_remaps_grid() {
        let (mut grid, mut view) = setup(8, 8);
        grid.set_alive(1, 2, true).unwrap();
        view.move_right(&mut grid, 2).unwrap();
        // view <2,0> to <10,8>, grid 10x8
        assert!(view.zoom_out(&mut grid).unwrap());

        assert_eq!(grid.dim(), (20, 16));
        assert_eq!(grid.cells().len(), 20 * 16);
        assert_eq!(view.top_left(), Point::new(2, 0));
        assert_eq!(view.bottom_right(), Point::new(20, 16));
        assert_eq!(view.cell_size(), PixelSize::new(4, 4));
        // offset = top_left + extent / 2 = (2 + 4, 0 + 4)
        assert!(grid.is_alive(7, 6));
        assert_eq!(grid.population(), 1);
        assert!(view.fits(&grid));
    }

    #[test]
    fn test_zoom_out_minimum() {
        let (mut grid, mut view) = setup(8, 2);
        let before = (grid.clone(), view.clone());
        assert!(!view.zoom_out(&mut grid).unwrap());
        assert_eq!((grid, view), before);

        let (mut grid, mut view) = setup(8, 3);
        assert!(!view.zoom_out(&mut grid).unwrap());
        assert_eq!(view.cell_size(), PixelSize::new(3, 3));
    }

    #[test]
    fn test_reset() {
        let (mut grid, mut view) = setup(6, 2);
        view.move_left(&mut grid, 3).unwrap();
        view.move_down(&mut grid, 4).unwrap();
        view.reset((6, 6));
        assert_eq!(view.top_left(), Point::new(0, 0));
        assert_eq!(view.bottom_right(), Point::new(6, 6));
        assert!(view.fits(&grid));
    }

    #[test]
    fn test_screen_to_grid() {
        let (mut grid, mut view) = setup(10, 5);
        view.move_down(&mut grid, 2).unwrap();
        assert_eq!(view.screen_to_grid(0, 0), Point::new(0, 2));
        assert_eq!(view.screen_to_grid(14, 26), Point::new(2, 7));
    }

    #[test]
    fn test_visible_cells() {
        let (mut grid, mut view) = setup(4, 10);
        grid.set_alive(0, 0, true).unwrap();
        grid.set_alive(3, 1, true).unwrap();
        let rects: Vec<_> = view.visible_cells(&grid).collect();
        assert_eq!(
            rects,
            vec![
                CellRect { x: 0, y: 0, width: 10, height: 10 },
                CellRect { x: 30, y: 10, width: 10, height: 10 },
            ]
        );

        // Panning right drops the first column out of view
        view.move_right(&mut grid, 1).unwrap();
        let rects: Vec<_> = view.visible_cells(&grid).collect();
        assert_eq!(rects, vec![CellRect { x: 20, y: 10, width: 10, height: 10 }]);
    }

    #[test]
    fn test_display() {
        let view = Viewport::new(PixelSize::new(100, 100), (10, 10));
        assert_eq!(view.to_string(), "<0,0> to <10,10> at <10,10>px/cell");
    }

    proptest! {
        #[test]
        fn prop_move_right_grows_exactly_deficit(
            cells in proptest::collection::vec(0u8..2, 36),
            first in 0usize..8,
            n in 0usize..12,
        ) {
            let mut grid = Grid::from_cells(&cells, 6, 6).unwrap();
            let population = grid.population();
            let mut view = Viewport::new(PixelSize::new(60, 60), (6, 6));
            view.move_right(&mut grid, first).unwrap();

            let (width, _) = grid.dim();
            let br = view.bottom_right().x;
            view.move_right(&mut grid, n).unwrap();

            prop_assert_eq!(grid.width(), width.max(br + n));
            prop_assert_eq!(grid.population(), population);
            prop_assert!(view.fits(&grid));
        }

        #[test]
        fn prop_move_left_keeps_screen_content(
            cells in proptest::collection::vec(0u8..2, 36),
            n in 0usize..10,
        ) {
            let mut grid = Grid::from_cells(&cells, 6, 6).unwrap();
            let mut view = Viewport::new(PixelSize::new(60, 60), (6, 6));
            let population = grid.population();

            view.move_left(&mut grid, n).unwrap();

            prop_assert_eq!(grid.width(), 6 + n);
            prop_assert_eq!(grid.population(), population);
            // Every old cell moved right by n in grid space
            for y in 0..6isize {
                for x in 0..6isize {
                    prop_assert_eq!(
                        grid.is_alive(x + n as isize, y),
                        cells[(y * 6 + x) as usize] != 0
                    );
                }
            }
        }
    }
}
