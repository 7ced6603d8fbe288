//! Buffering of direction-change requests between simulation ticks.

use circular_buffer::CircularBuffer;
use tracing::trace;

use crate::constants::DIRECTION_QUEUE_DEPTH;
use crate::map::direction::Direction;

/// A small fixed-capacity ring of pending direction changes.
///
/// Requests are checked against the snake's current direction when they are
/// made, and checked again when they are drained: a turn queued two ticks ago
/// may have become a reversal since.
#[derive(Debug, Clone, Default)]
pub struct DirectionQueue {
    buffer: CircularBuffer<DIRECTION_QUEUE_DEPTH, Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers `direction` unless it reverses `current`.
    ///
    /// When the buffer is full the newest request replaces the tail entry
    /// instead of being dropped.
    pub fn request(&mut self, direction: Direction, current: Direction) -> bool {
        if direction.is_opposite(current) {
            trace!(requested = %direction, current = %current, "Rejected reversing direction request");
            return false;
        }

        if self.buffer.is_full() {
            if let Some(tail) = self.buffer.back_mut() {
                trace!(replaced = %tail, requested = %direction, "Direction queue full, replacing tail");
                *tail = direction;
            }
        } else {
            self.buffer.push_back(direction);
        }

        true
    }

    /// Pops the oldest request that is still valid against `current`.
    ///
    /// Stale entries that have become reversals are discarded on the way.
    pub fn drain(&mut self, current: Direction) -> Option<Direction> {
        while let Some(direction) = self.buffer.pop_front() {
            if !direction.is_opposite(current) {
                return Some(direction);
            }
            trace!(stale = %direction, current = %current, "Discarded stale direction request");
        }
        None
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Pending requests, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = Direction> + '_ {
        self.buffer.iter().copied()
    }
}
