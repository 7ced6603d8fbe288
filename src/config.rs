//! Construction-time engine configuration.

use std::time::Duration;

use crate::constants::{
    scoring::{BASE_FOOD_VALUE, COMBO_BONUS, COMBO_WINDOW, MICRO_COMBO_BONUS},
    BOARD_CELL_SIZE, CELL_SIZE, FOOD_COUNT, INITIAL_SNAKE_LENGTH, LOOP_TIME,
};
use crate::error::ConfigError;
use crate::map::grid::Grid;

/// Smallest board the engine accepts, in cells per side.
const MIN_BOARD_SIDE: u32 = 5;

/// Everything the engine needs to know at construction.
///
/// There is no other environment coupling: no files, no network.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Pixel size of one grid cell.
    pub cell_size: u32,
    /// Board width, in cells.
    pub board_width: u32,
    /// Board height, in cells.
    pub board_height: u32,
    /// Points for every consumed food.
    pub base_food_value: u32,
    /// Bonus for eating 1..=5 in order.
    pub combo_bonus: u32,
    /// Bonus per extra food in a micro-combo streak.
    pub micro_combo_bonus: u32,
    /// Maximum gap between foods for the micro-combo to continue.
    pub combo_window: Duration,
    /// Crossing an edge re-enters on the other side instead of colliding.
    pub wrap_around: bool,
    /// Simulated time that passes per tick.
    pub tick_interval: Duration,
    /// Segments in a fresh snake, head included.
    pub initial_length: usize,
    /// Seed for food placement. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            board_width: BOARD_CELL_SIZE.x,
            board_height: BOARD_CELL_SIZE.y,
            base_food_value: BASE_FOOD_VALUE,
            combo_bonus: COMBO_BONUS,
            micro_combo_bonus: MICRO_COMBO_BONUS,
            combo_window: COMBO_WINDOW,
            wrap_around: false,
            tick_interval: LOOP_TIME,
            initial_length: INITIAL_SNAKE_LENGTH,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_board(mut self, width: u32, height: u32) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_wrap_around(mut self, wrap_around: bool) -> Self {
        self.wrap_around = wrap_around;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_base_food_value(mut self, value: u32) -> Self {
        self.base_food_value = value;
        self
    }

    pub fn with_combo_window(mut self, window: Duration) -> Self {
        self.combo_window = window;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_initial_length(mut self, length: usize) -> Self {
        self.initial_length = length;
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.cell_size, self.board_width, self.board_height)
    }

    /// Checks that the board can hold a fresh snake and all five foods.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.board_width < MIN_BOARD_SIDE || self.board_height < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall {
                width: self.board_width,
                height: self.board_height,
                min: MIN_BOARD_SIDE,
            });
        }
        // Pixel coordinates are i32, so the whole board must fit.
        let limit = i32::MAX as u64;
        if self.board_width as u64 * self.cell_size as u64 > limit
            || self.board_height as u64 * self.cell_size as u64 > limit
        {
            return Err(ConfigError::BoardTooLarge {
                width: self.board_width,
                height: self.board_height,
                cell_size: self.cell_size,
            });
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        // The snake is laid out behind a centered head, so it may use at most half the width.
        let max_length = (self.board_width / 2) as usize + 1;
        if self.initial_length == 0 || self.initial_length > max_length {
            return Err(ConfigError::InvalidSnakeLength {
                length: self.initial_length,
                max: max_length,
            });
        }

        let cells = self.grid().cell_count();
        if cells < self.initial_length + FOOD_COUNT + 1 {
            return Err(ConfigError::BoardTooCrowded {
                cells,
                snake: self.initial_length,
                foods: FOOD_COUNT,
            });
        }

        Ok(())
    }
}
