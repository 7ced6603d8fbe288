#![allow(dead_code)]

use snake::config::EngineConfig;
use snake::constants::CELL_SIZE;
use snake::game::{Game, Snapshot};
use snake::map::direction::Direction;
use snake::map::grid::{Grid, Position};

/// A fixed seed so food placement is reproducible across runs.
pub const SEED: u64 = 0x5EED;

pub fn test_config() -> EngineConfig {
    EngineConfig::default().with_seed(SEED)
}

pub fn test_grid() -> Grid {
    test_config().grid()
}

/// The pixel position of a cell on the default board.
pub fn cell(x: i32, y: i32) -> Position {
    Position::new(x * CELL_SIZE as i32, y * CELL_SIZE as i32)
}

pub fn new_game(config: EngineConfig) -> Game {
    Game::new(config).expect("test configuration should be valid")
}

/// A game that has already entered PLAYING.
pub fn playing_game(config: EngineConfig) -> Game {
    let mut game = new_game(config);
    assert!(game.start(), "MENU -> PLAYING should be allowed");
    game
}

/// Greedy steering toward the next food in the combo, avoiding walls and the body.
pub fn chase(game: &Game, snapshot: &Snapshot) -> Option<Direction> {
    let grid = game.grid();
    let head = snapshot.snake.head().position;
    let target = snapshot
        .foods
        .iter()
        .find(|food| food.number == snapshot.combo.expected_next)?
        .position;

    Direction::DIRECTIONS
        .into_iter()
        .filter(|direction| !direction.is_opposite(snapshot.snake.direction))
        .filter_map(|direction| {
            let mut next = grid.offset(head, direction);
            if game.config().wrap_around {
                next = grid.wrap(next);
            } else if !grid.contains(next) {
                return None;
            }
            if snapshot.snake.occupies(next) {
                return None;
            }
            Some(((next.x - target.x).abs() + (next.y - target.y).abs(), direction))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, direction)| direction)
}
