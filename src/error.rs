//! Centralized error types for the engine.
//!
//! Expected outcomes such as rejected direction requests, illegal session
//! transitions and collisions are plain values, not errors. The types here
//! cover invalid configuration and broken engine invariants.

use crate::map::grid::Position;

/// Main error type for the engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Food error: {0}")]
    Food(#[from] FoodError),

    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cell size must be non-zero")]
    ZeroCellSize,

    #[error("Board must be at least {min}x{min} cells, got {width}x{height}")]
    BoardTooSmall { width: u32, height: u32, min: u32 },

    #[error("Initial snake length must be between 1 and {max}, got {length}")]
    InvalidSnakeLength { length: usize, max: usize },

    #[error("Board of {cells} cells cannot hold a snake of {snake} and {foods} foods")]
    BoardTooCrowded { cells: usize, snake: usize, foods: usize },

    #[error("Board of {width}x{height} cells at {cell_size}px per cell exceeds the pixel coordinate range")]
    BoardTooLarge { width: u32, height: u32, cell_size: u32 },

    #[error("Tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Errors related to numbered food placement.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FoodError {
    #[error("Food number must be between 1 and 5, got {0}")]
    InvalidNumber(u8),

    #[error("No free cell left on the board")]
    NoFreeCell,

    #[error("No food numbered {0} is on the board")]
    Missing(u8),

    #[error("Expected {expected} food slots, found {found}")]
    SlotCount { expected: usize, found: usize },

    #[error("Food numbered {0} appears more than once")]
    DuplicateNumber(u8),

    #[error("Foods {first} and {second} share cell {position}")]
    Overlap { first: u8, second: u8, position: Position },

    #[error("Food {number} sits on the snake at {position}")]
    OnSnake { number: u8, position: Position },
}

/// Programming invariant violations surfaced to the host as fatal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("Food slots broken after consuming {number}: {source}")]
    FoodSlots { number: u8, source: FoodError },

    #[error("Snake overlaps itself at {0}")]
    SnakeOverlap(Position),

    #[error("Snake segments are not contiguous between {0} and {1}")]
    SnakeDisjoint(Position, Position),
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
