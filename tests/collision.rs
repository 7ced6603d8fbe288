use snake::game::collision::{classify, CollisionType};
use snake::game::snake::{Snake, SnakeSegment};
use snake::map::direction::Direction;
use snake::map::grid::Position;
use speculoos::prelude::*;

mod common;

use common::{cell, test_grid};

fn straight_snake(head: Position, length: usize) -> Vec<SnakeSegment> {
    let grid = test_grid();
    Snake::new(head, Direction::Right, length, &grid).segments().copied().collect()
}

#[test]
fn test_free_cell_is_not_a_collision() {
    let grid = test_grid();
    let segments = straight_snake(cell(5, 5), 3);

    let collision = classify(&segments, cell(6, 5), &grid, false);
    assert_that(&collision.kind).is_equal_to(CollisionType::None);
    assert_that(&collision.position).is_equal_to(cell(6, 5));
    assert_that(&collision.kind.is_collision()).is_false();
}

#[test]
fn test_off_board_is_a_wall() {
    let grid = test_grid();
    let segments = straight_snake(cell(19, 5), 3);

    let collision = classify(&segments, cell(20, 5), &grid, false);
    assert_that(&collision.kind).is_equal_to(CollisionType::Wall);
    assert_that(&collision.position).is_equal_to(cell(20, 5));

    let above = classify(&segments, Position::new(100, -20), &grid, false);
    assert_that(&above.kind).is_equal_to(CollisionType::Wall);
}

#[test]
fn test_wrap_around_never_hits_a_wall() {
    let grid = test_grid();
    let segments = straight_snake(cell(19, 5), 3);

    let collision = classify(&segments, cell(20, 5), &grid, true);
    assert_that(&collision.kind).is_equal_to(CollisionType::None);
    assert_that(&collision.position).is_equal_to(cell(0, 5));
}

#[test]
fn test_wrapped_position_can_hit_the_body() {
    let grid = test_grid();
    // Head at the left edge, body wrapped around to the right edge
    let segments = straight_snake(cell(0, 5), 3);

    let collision = classify(&segments, Position::new(-20, 5 * 20), &grid, true);
    assert_that(&collision.kind).is_equal_to(CollisionType::SelfHit);
    assert_that(&collision.position).is_equal_to(cell(19, 5));
}

#[test]
fn test_body_is_a_self_collision() {
    let grid = test_grid();
    let segments = straight_snake(cell(5, 5), 4);

    let collision = classify(&segments, cell(4, 5), &grid, false);
    assert_that(&collision.kind).is_equal_to(CollisionType::SelfHit);
}

#[test]
fn test_tail_counts_as_occupied() {
    let grid = test_grid();
    let segments = straight_snake(cell(5, 5), 4);
    let tail = segments[segments.len() - 1].position;

    let collision = classify(&segments, tail, &grid, false);
    assert_that(&collision.kind).is_equal_to(CollisionType::SelfHit);
}

#[test]
fn test_collision_names() {
    assert_that(&CollisionType::None.to_string()).is_equal_to("none".to_string());
    assert_that(&CollisionType::Wall.to_string()).is_equal_to("wall".to_string());
    assert_that(&CollisionType::SelfHit.to_string()).is_equal_to("self".to_string());
}
