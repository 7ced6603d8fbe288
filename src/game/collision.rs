//! Classification of a candidate head position.

use strum_macros::{AsRefStr, Display};

use crate::game::snake::SnakeSegment;
use crate::map::grid::{Grid, Position};

/// What a candidate head position would run into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CollisionType {
    #[default]
    None,
    Wall,
    #[strum(serialize = "self")]
    SelfHit,
}

impl CollisionType {
    pub fn is_collision(self) -> bool {
        self != CollisionType::None
    }
}

/// The result of classifying a candidate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub kind: CollisionType,
    /// The candidate after wrap-around was applied. Equal to the input otherwise.
    pub position: Position,
}

/// Classifies `candidate` against the board edges and the snake body.
///
/// Every current segment counts as occupied, including the tail that a
/// non-growing snake would vacate on this same tick.
pub fn classify(segments: &[SnakeSegment], candidate: Position, grid: &Grid, wrap_around: bool) -> Collision {
    let position = if wrap_around {
        grid.wrap(candidate)
    } else if !grid.contains(candidate) {
        return Collision {
            kind: CollisionType::Wall,
            position: candidate,
        };
    } else {
        candidate
    };

    let kind = if segments.iter().any(|segment| segment.position == position) {
        CollisionType::SelfHit
    } else {
        CollisionType::None
    };

    Collision { kind, position }
}
