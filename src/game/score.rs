//! The score ledger: point history, the time-windowed micro-combo, and statistics.

use std::time::Duration;

use circular_buffer::CircularBuffer;
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter};
use tracing::trace;

use crate::constants::scoring::SCORE_HISTORY_SIZE;
use crate::map::grid::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumCount)]
#[strum(serialize_all = "lowercase")]
pub enum ScoreEventKind {
    Food,
    Combo,
    Bonus,
}

/// A single scoring entry in the append-only history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEvent {
    pub kind: ScoreEventKind,
    pub points: u32,
    pub timestamp: Duration,
    pub position: Option<Position>,
}

/// Points awarded for a single food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoodScore {
    pub base: u32,
    /// Length of the micro-combo streak including this food.
    pub streak: u32,
    /// Micro-combo bonus for this food, zero outside a streak.
    pub bonus: u32,
}

impl FoodScore {
    pub fn total(&self) -> u32 {
        self.base + self.bonus
    }
}

/// Aggregates computed by replaying the retained history.
#[derive(Debug, Clone)]
pub struct ScoreStatistics {
    /// Running total, including events that have since left the history.
    pub total_score: u64,
    points_by_kind: micromap::Map<ScoreEventKind, u64, 3>,
    pub event_count: usize,
    pub foods_eaten: usize,
    pub highest_event: Option<ScoreEvent>,
    /// Longest run of foods each eaten within the combo window of the previous one.
    pub longest_streak: u32,
}

impl Default for ScoreStatistics {
    fn default() -> Self {
        Self {
            total_score: 0,
            points_by_kind: micromap::Map::new(),
            event_count: 0,
            foods_eaten: 0,
            highest_event: None,
            longest_streak: 0,
        }
    }
}

impl ScoreStatistics {
    /// Sum of points awarded by events of `kind`.
    pub fn points_for(&self, kind: ScoreEventKind) -> u64 {
        self.points_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Records scoring events and tracks the micro-combo streak.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    history: Box<CircularBuffer<SCORE_HISTORY_SIZE, ScoreEvent>>,
    total: u64,
    window: Duration,
    micro_bonus: u32,
    combo_count: u32,
    last_food_at: Option<Duration>,
}

impl ScoreLedger {
    pub fn new(window: Duration, micro_bonus: u32) -> Self {
        Self {
            history: CircularBuffer::boxed(),
            total: 0,
            window,
            micro_bonus,
            combo_count: 0,
            last_food_at: None,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Current micro-combo streak length. Zero when no streak is running.
    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    /// Retained events, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &ScoreEvent> + '_ {
        self.history.iter()
    }

    /// Records a consumed food and any micro-combo bonus it earns.
    ///
    /// A food eaten within the window of the previous one extends the
    /// streak; otherwise the streak restarts at one.
    pub fn record_food(&mut self, points: u32, now: Duration, position: Option<Position>) -> FoodScore {
        self.combo_count = match self.last_food_at {
            Some(last) if now.saturating_sub(last) <= self.window => self.combo_count + 1,
            _ => 1,
        };
        self.last_food_at = Some(now);

        self.push(ScoreEvent {
            kind: ScoreEventKind::Food,
            points,
            timestamp: now,
            position,
        });

        let bonus = self.micro_bonus * (self.combo_count - 1);
        if bonus > 0 {
            self.push(ScoreEvent {
                kind: ScoreEventKind::Bonus,
                points: bonus,
                timestamp: now,
                position,
            });
        }

        trace!(points, bonus, streak = self.combo_count, total = self.total, "Food scored");
        FoodScore {
            base: points,
            streak: self.combo_count,
            bonus,
        }
    }

    /// Records an ordered-combo completion bonus.
    pub fn record_combo(&mut self, points: u32, now: Duration, position: Option<Position>) {
        self.push(ScoreEvent {
            kind: ScoreEventKind::Combo,
            points,
            timestamp: now,
            position,
        });
        trace!(points, total = self.total, "Combo scored");
    }

    /// Ends the micro-combo streak once the window since the last food has passed.
    pub fn expire(&mut self, now: Duration) {
        if let Some(last) = self.last_food_at {
            if self.combo_count > 0 && now.saturating_sub(last) > self.window {
                trace!(streak = self.combo_count, "Micro-combo window elapsed");
                self.combo_count = 0;
            }
        }
    }

    /// Replays the retained history into aggregate statistics.
    pub fn statistics(&self) -> ScoreStatistics {
        let mut stats = ScoreStatistics {
            total_score: self.total,
            event_count: self.history.len(),
            ..Default::default()
        };

        let mut streak = 0u32;
        let mut last_food: Option<Duration> = None;

        for event in self.history.iter() {
            let sum = stats.points_for(event.kind) + event.points as u64;
            stats.points_by_kind.insert(event.kind, sum);

            if stats.highest_event.is_none_or(|highest| event.points > highest.points) {
                stats.highest_event = Some(*event);
            }

            if event.kind == ScoreEventKind::Food {
                stats.foods_eaten += 1;
                streak = match last_food {
                    Some(last) if event.timestamp.saturating_sub(last) <= self.window => streak + 1,
                    _ => 1,
                };
                last_food = Some(event.timestamp);
                stats.longest_streak = stats.longest_streak.max(streak);
            }
        }

        stats
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.total = 0;
        self.combo_count = 0;
        self.last_food_at = None;
    }

    fn push(&mut self, event: ScoreEvent) {
        self.total += event.points as u64;
        self.history.push_back(event);
    }
}
