use pretty_assertions::assert_eq;
use snake::game::input::DirectionQueue;
use snake::map::direction::Direction;
use speculoos::prelude::*;

fn pending(queue: &DirectionQueue) -> Vec<Direction> {
    queue.pending().collect()
}

#[test]
fn test_rejects_reversal_of_current_direction() {
    let mut queue = DirectionQueue::new();

    assert_that(&queue.request(Direction::Left, Direction::Right)).is_false();
    assert_that(&queue.is_empty()).is_true();
}

#[test]
fn test_accepts_perpendicular_turn() {
    let mut queue = DirectionQueue::new();

    assert_that(&queue.request(Direction::Up, Direction::Right)).is_true();
    assert_eq!(queue.drain(Direction::Right), Some(Direction::Up));
    assert_that(&queue.drain(Direction::Up)).is_none();
}

#[test]
fn test_full_queue_replaces_newest_entry() {
    let mut queue = DirectionQueue::new();

    assert_that(&queue.request(Direction::Up, Direction::Right)).is_true();
    assert_that(&queue.request(Direction::Down, Direction::Right)).is_true();
    assert_eq!(queue.len(), 2);

    // A third request overwrites the tail instead of being dropped
    assert_that(&queue.request(Direction::Right, Direction::Right)).is_true();
    assert_eq!(pending(&queue), vec![Direction::Up, Direction::Right]);
}

#[test]
fn test_drain_discards_requests_that_became_reversals() {
    let mut queue = DirectionQueue::new();
    queue.request(Direction::Up, Direction::Right);
    queue.request(Direction::Down, Direction::Right);

    let first = queue.drain(Direction::Right);
    assert_eq!(first, Some(Direction::Up));

    // The snake now moves up, so the queued Down would reverse it
    assert_that(&queue.drain(Direction::Up)).is_none();
    assert_that(&queue.is_empty()).is_true();
}

#[test]
fn test_drain_returns_requests_in_order() {
    let mut queue = DirectionQueue::new();
    assert_that(&queue.request(Direction::Up, Direction::Right)).is_true();
    assert_that(&queue.request(Direction::Right, Direction::Right)).is_true();

    assert_eq!(queue.drain(Direction::Right), Some(Direction::Up));
    assert_eq!(queue.drain(Direction::Up), Some(Direction::Right));
}

#[test]
fn test_clear_empties_the_queue() {
    let mut queue = DirectionQueue::new();
    queue.request(Direction::Up, Direction::Right);
    queue.clear();

    assert_that(&queue.is_empty()).is_true();
    assert_that(&queue.drain(Direction::Right)).is_none();
}
