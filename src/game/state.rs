//! The session lifecycle: which phase the game is in and how long it has run.

use std::time::Duration;

use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::{debug, warn};

use crate::game::collision::CollisionType;
use crate::game::events::{EventBus, Keyed, Subscription};
use crate::map::grid::Position;

/// A high-level phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    #[default]
    Menu,
    Loading,
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    /// The states reachable from this one in a single transition.
    pub const fn successors(self) -> &'static [SessionState] {
        use SessionState::*;
        match self {
            Menu => &[Loading, Playing],
            Loading => &[Playing, Menu],
            Playing => &[Paused, GameOver, Menu],
            Paused => &[Playing, Menu, GameOver],
            GameOver => &[Menu, Playing],
        }
    }

    pub fn can_transition_to(self, next: SessionState) -> bool {
        self.successors().contains(&next)
    }
}

/// A completed state change, as seen by listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: SessionState,
    pub to: SessionState,
    /// Simulation time of the change.
    pub at: Duration,
}

impl Keyed for Transition {
    type Key = SessionState;

    /// Per-state listeners are keyed by the state being entered.
    fn key(&self) -> SessionState {
        self.to
    }
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GameOverCause {
    Boundary,
    #[strum(serialize = "self")]
    SelfCollision,
}

impl GameOverCause {
    pub fn from_collision(collision: CollisionType) -> Option<Self> {
        match collision {
            CollisionType::Wall => Some(GameOverCause::Boundary),
            CollisionType::SelfHit => Some(GameOverCause::SelfCollision),
            CollisionType::None => None,
        }
    }
}

/// Session figures frozen when the game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStatistics {
    /// Time spent playing, excluding pauses.
    pub duration: Duration,
    pub ticks: u64,
    pub snake_length: usize,
    pub foods_eaten: u32,
    pub total_combos: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOverState {
    pub is_game_over: bool,
    pub cause: Option<GameOverCause>,
    pub final_score: u64,
    pub timestamp: Duration,
    pub collision_position: Option<Position>,
    pub stats: Option<SessionStatistics>,
}

/// Gates the session lifecycle and keeps its timing.
#[derive(Debug, Default)]
pub struct SessionMachine {
    state: SessionState,
    listeners: EventBus<Transition>,
    game_start: Option<Duration>,
    paused_at: Option<Duration>,
    total_paused: Duration,
    ended_at: Option<Duration>,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is(&self, state: SessionState) -> bool {
        self.state == state
    }

    /// Moves to `next` if the transition table allows it, then notifies listeners.
    ///
    /// Illegal transitions are logged and leave the state untouched.
    pub fn transition_to(&mut self, next: SessionState, now: Duration) -> bool {
        let from = self.state;
        if !from.can_transition_to(next) {
            warn!(from = %from, to = %next, "Rejected illegal session transition");
            return false;
        }

        match next {
            SessionState::Playing if from == SessionState::Paused => self.end_pause(now),
            SessionState::Playing => {
                self.game_start = Some(now);
                self.paused_at = None;
                self.total_paused = Duration::ZERO;
                self.ended_at = None;
            }
            SessionState::Paused => self.paused_at = Some(now),
            SessionState::GameOver => {
                self.end_pause(now);
                self.ended_at = Some(now);
            }
            SessionState::Menu | SessionState::Loading => self.paused_at = None,
        }

        self.state = next;
        debug!(from = %from, to = %next, at = ?now, "Session transition");
        self.listeners.emit(&Transition { from, to: next, at: now });
        true
    }

    /// Registers a callback fired whenever `state` is entered.
    pub fn on_enter(&self, state: SessionState, callback: impl Fn(&Transition) + 'static) -> Subscription {
        self.listeners.subscribe(Some(state), callback)
    }

    /// Registers a callback fired on every transition.
    pub fn on_transition(&self, callback: impl Fn(&Transition) + 'static) -> Subscription {
        self.listeners.subscribe(None, callback)
    }

    /// Simulation time at which the current game entered PLAYING.
    pub fn game_start(&self) -> Option<Duration> {
        self.game_start
    }

    /// Total paused time of the current game, including a pause in progress.
    pub fn paused_duration(&self, now: Duration) -> Duration {
        let end = self.ended_at.unwrap_or(now);
        let ongoing = self.paused_at.map_or(Duration::ZERO, |at| end.saturating_sub(at));
        self.total_paused + ongoing
    }

    /// Playing time of the current game, excluding pauses. Frozen once the game is over.
    pub fn active_duration(&self, now: Duration) -> Duration {
        let Some(start) = self.game_start else {
            return Duration::ZERO;
        };
        let end = self.ended_at.unwrap_or(now);
        end.saturating_sub(start).saturating_sub(self.paused_duration(now))
    }

    fn end_pause(&mut self, now: Duration) {
        if let Some(at) = self.paused_at.take() {
            self.total_paused += now.saturating_sub(at);
        }
    }
}
