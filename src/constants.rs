//! This module contains all the constants used by the engine.

use std::time::Duration;

use glam::UVec2;

/// The length of one simulation tick.
pub const LOOP_TIME: Duration = Duration::from_millis(150);

/// The size of each cell, in pixels.
pub const CELL_SIZE: u32 = 20;
/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(20, 20);
/// The size of the game board, in pixels.
pub const BOARD_PIXEL_SIZE: UVec2 = UVec2::new(BOARD_CELL_SIZE.x * CELL_SIZE, BOARD_CELL_SIZE.y * CELL_SIZE);

/// The number of segments a fresh snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// How many numbered foods are live on the board at once.
pub const FOOD_COUNT: usize = 5;
/// Random placement attempts before falling back to a linear scan.
pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

/// Capacity of the direction request buffer.
pub const DIRECTION_QUEUE_DEPTH: usize = 2;

pub mod scoring {
    use std::time::Duration;

    /// Points awarded for every food, regardless of its number.
    pub const BASE_FOOD_VALUE: u32 = 10;
    /// Awarded on top of the five food values when 1..=5 are eaten in order.
    pub const COMBO_BONUS: u32 = 100;
    /// Awarded per extra food in a micro-combo streak.
    pub const MICRO_COMBO_BONUS: u32 = 5;
    /// Maximum gap between two foods for the micro-combo streak to continue.
    pub const COMBO_WINDOW: Duration = Duration::from_millis(2000);
    /// Number of score events retained in the history.
    pub const SCORE_HISTORY_SIZE: usize = 1000;
}

pub mod timestep {
    /// Upper bound on ticks produced by a single accumulator update.
    pub const MAX_TICKS_PER_UPDATE: u32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        assert_eq!(LOOP_TIME.as_millis(), 150);
    }

    #[test]
    fn test_board_pixel_size() {
        assert_eq!(BOARD_PIXEL_SIZE.x, 400);
        assert_eq!(BOARD_PIXEL_SIZE.y, 400);
    }

    #[test]
    fn test_board_fits_snake_and_food() {
        let cells = (BOARD_CELL_SIZE.x * BOARD_CELL_SIZE.y) as usize;
        assert!(cells > INITIAL_SNAKE_LENGTH + FOOD_COUNT);
    }

    #[test]
    fn test_combo_window() {
        assert_eq!(scoring::COMBO_WINDOW.as_millis(), 2000);
    }
}
