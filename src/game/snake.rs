//! The snake body and its single-cell movement.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use tracing::trace;

use crate::error::InvariantError;
use crate::game::collision::{classify, CollisionType};
use crate::map::direction::Direction;
use crate::map::grid::{Grid, Position};

/// A stable, ordinal identifier for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentId {
    Head,
    /// The n-th segment behind the head, starting at 1.
    Body(usize),
}

impl SegmentId {
    /// The id of the segment at `index`, counting from the head.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => SegmentId::Head,
            n => SegmentId::Body(n),
        }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentId::Head => write!(f, "head"),
            SegmentId::Body(n) => write!(f, "body-{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnakeSegment {
    pub id: SegmentId,
    pub position: Position,
}

/// The outcome of a single movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub success: bool,
    pub collision: CollisionType,
    /// The head position that was tried, after wrap-around.
    pub target: Position,
    /// The segment dropped off the end, unless the snake grew.
    pub removed_tail: Option<SnakeSegment>,
}

/// The player's snake, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<SnakeSegment>,
    /// The direction applied on the last successful step.
    pub direction: Direction,
    /// The direction the next step will use unless told otherwise.
    pub next_direction: Direction,
    growing: bool,
}

impl Snake {
    /// Creates a straight snake with its head at `head`, body trailing behind.
    ///
    /// Segments that would fall off the board are wrapped back onto it.
    pub fn new(head: Position, direction: Direction, length: usize, grid: &Grid) -> Self {
        let mut position = head;
        let segments = (0..length.max(1))
            .map(|index| {
                let segment = SnakeSegment {
                    id: SegmentId::from_index(index),
                    position,
                };
                position = grid.wrap(grid.offset(position, direction.opposite()));
                segment
            })
            .collect();

        Self {
            segments,
            direction,
            next_direction: direction,
            growing: false,
        }
    }

    pub fn head(&self) -> &SnakeSegment {
        // A snake is never empty; `new` creates at least one segment and `step` only pops after pushing.
        &self.segments[0]
    }

    pub fn tail(&self) -> &SnakeSegment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Segments, head first.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &SnakeSegment> + '_ {
        self.segments.iter()
    }

    /// Segment positions, head first.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|segment| segment.position)
    }

    pub fn occupies(&self, position: Position) -> bool {
        self.segments.iter().any(|segment| segment.position == position)
    }

    /// Requests one cell of growth on the next successful step.
    ///
    /// Calling this more than once between steps still grows by a single cell.
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Moves the snake one cell, or reports what it would have hit.
    ///
    /// On a collision the snake is left exactly as it was.
    pub fn step(&mut self, requested: Option<Direction>, grid: &Grid, wrap_around: bool) -> MoveResult {
        let direction = requested.unwrap_or(self.direction);
        let candidate = grid.offset(self.head().position, direction);
        let collision = classify(self.segments.make_contiguous(), candidate, grid, wrap_around);

        if collision.kind.is_collision() {
            trace!(kind = %collision.kind, position = %collision.position, "Snake step blocked");
            return MoveResult {
                success: false,
                collision: collision.kind,
                target: collision.position,
                removed_tail: None,
            };
        }

        self.segments.push_front(SnakeSegment {
            id: SegmentId::Head,
            position: collision.position,
        });

        let removed_tail = if self.growing {
            self.growing = false;
            None
        } else {
            self.segments.pop_back()
        };

        self.direction = direction;
        self.next_direction = direction;
        self.renumber();

        MoveResult {
            success: true,
            collision: CollisionType::None,
            target: collision.position,
            removed_tail,
        }
    }

    /// Checks that no two segments share a cell and that each segment is one
    /// cell away from the previous one (wrap-around edges count as adjacent).
    pub fn validate(&self, grid: &Grid) -> Result<(), InvariantError> {
        let mut seen = HashSet::with_capacity(self.segments.len());
        for segment in &self.segments {
            if !seen.insert(segment.position) {
                return Err(InvariantError::SnakeOverlap(segment.position));
            }
        }

        for (front, back) in self.segments.iter().zip(self.segments.iter().skip(1)) {
            let adjacent = Direction::DIRECTIONS
                .iter()
                .any(|&direction| grid.wrap(grid.offset(back.position, direction)) == front.position);
            if !adjacent {
                return Err(InvariantError::SnakeDisjoint(front.position, back.position));
            }
        }

        Ok(())
    }

    fn renumber(&mut self) {
        for (index, segment) in self.segments.iter_mut().enumerate() {
            segment.id = SegmentId::from_index(index);
        }
    }
}
