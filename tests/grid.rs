use glam::{IVec2, UVec2};
use pretty_assertions::assert_eq;
use snake::map::direction::Direction;
use snake::map::grid::{Grid, Position};
use speculoos::prelude::*;

mod common;

use common::cell;

#[test]
fn test_pixel_cell_conversion() {
    let grid = Grid::new(20, 20, 20);

    assert_eq!(grid.to_pixel(IVec2::new(3, 4)), Position::new(60, 80));
    assert_eq!(grid.to_cell(Position::new(60, 80)), IVec2::new(3, 4));
    assert_eq!(grid.to_cell(Position::new(-20, 0)), IVec2::new(-1, 0));
    assert_eq!(grid.pixel_size(), UVec2::new(400, 400));
    assert_eq!(grid.cell_count(), 400);
}

#[test]
fn test_contains() {
    let grid = Grid::new(20, 20, 20);

    assert_that(&grid.contains(Position::new(0, 0))).is_true();
    assert_that(&grid.contains(Position::new(380, 380))).is_true();
    assert_that(&grid.contains(Position::new(400, 0))).is_false();
    assert_that(&grid.contains(Position::new(0, 400))).is_false();
    assert_that(&grid.contains(Position::new(-20, 0))).is_false();
}

#[test]
fn test_wrap_reenters_on_opposite_side() {
    let grid = Grid::new(20, 20, 20);

    assert_eq!(grid.wrap(Position::new(400, 100)), Position::new(0, 100));
    assert_eq!(grid.wrap(Position::new(-20, 100)), Position::new(380, 100));
    assert_eq!(grid.wrap(Position::new(100, -20)), Position::new(100, 380));
    assert_eq!(grid.wrap(Position::new(100, 400)), Position::new(100, 0));
    assert_eq!(grid.wrap(Position::new(100, 100)), Position::new(100, 100));
}

#[test]
fn test_offset_moves_one_cell() {
    let grid = Grid::new(20, 20, 20);
    let origin = cell(5, 5);

    assert_eq!(grid.offset(origin, Direction::Up), cell(5, 4));
    assert_eq!(grid.offset(origin, Direction::Down), cell(5, 6));
    assert_eq!(grid.offset(origin, Direction::Left), cell(4, 5));
    assert_eq!(grid.offset(origin, Direction::Right), cell(6, 5));
    assert_eq!(grid.offset(cell(0, 0), Direction::Left), Position::new(-20, 0));
}

#[test]
fn test_center() {
    assert_eq!(Grid::new(20, 20, 20).center(), Position::new(200, 200));
    assert_eq!(Grid::new(10, 7, 9).center(), Position::new(30, 40));
}

#[test]
fn test_cells_are_row_major() {
    let grid = Grid::new(10, 3, 2);
    let cells: Vec<Position> = grid.cells().collect();

    assert_eq!(
        cells,
        vec![
            Position::new(0, 0),
            Position::new(10, 0),
            Position::new(20, 0),
            Position::new(0, 10),
            Position::new(10, 10),
            Position::new(20, 10),
        ]
    );
}

#[test]
fn test_position_display() {
    assert_eq!(Position::new(40, -20).to_string(), "(40, -20)");
}
