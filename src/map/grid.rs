//! Grid coordinates and grid-to-pixel conversion.

use std::fmt;

use glam::{IVec2, UVec2};

use crate::map::direction::Direction;

/// A pixel position on the board.
///
/// Inside the engine every position is aligned to the grid, i.e. both
/// coordinates are multiples of the cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }
}

impl From<IVec2> for Position {
    fn from(v: IVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Position> for IVec2 {
    fn from(p: Position) -> Self {
        IVec2::new(p.x, p.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The board: its size in cells and the pixel size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell_size: u32,
    /// Board size in cells.
    size: UVec2,
}

impl Grid {
    pub const fn new(cell_size: u32, width: u32, height: u32) -> Self {
        Self {
            cell_size,
            size: UVec2::new(width, height),
        }
    }

    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Board width, in cells.
    pub const fn width(&self) -> u32 {
        self.size.x
    }

    /// Board height, in cells.
    pub const fn height(&self) -> u32 {
        self.size.y
    }

    /// Board size, in pixels.
    pub fn pixel_size(&self) -> UVec2 {
        self.size * self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.size.x as usize * self.size.y as usize
    }

    /// Converts a cell coordinate to the pixel position of its top-left corner.
    pub fn to_pixel(&self, cell: IVec2) -> Position {
        (cell * self.cell_size as i32).into()
    }

    /// Converts a pixel position back to its cell coordinate.
    pub fn to_cell(&self, position: Position) -> IVec2 {
        position.as_ivec2().div_euclid(IVec2::splat(self.cell_size as i32))
    }

    /// Whether the position lies within `[0, width) x [0, height)` in pixels.
    pub fn contains(&self, position: Position) -> bool {
        let bounds = self.pixel_size().as_ivec2();
        position.x >= 0 && position.y >= 0 && position.x < bounds.x && position.y < bounds.y
    }

    /// Maps a position back onto the board, re-entering on the opposite side.
    pub fn wrap(&self, position: Position) -> Position {
        position.as_ivec2().rem_euclid(self.pixel_size().as_ivec2()).into()
    }

    /// The position one cell away in the given direction. May fall off the board.
    pub fn offset(&self, position: Position, direction: Direction) -> Position {
        (position.as_ivec2() + direction.as_ivec2() * self.cell_size as i32).into()
    }

    /// The cell closest to the middle of the board.
    pub fn center(&self) -> Position {
        self.to_pixel((self.size / 2).as_ivec2())
    }

    /// Every cell on the board in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size.y).flat_map(move |y| (0..self.size.x).map(move |x| self.to_pixel(IVec2::new(x as i32, y as i32))))
    }
}
