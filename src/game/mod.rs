//! This module contains the simulation engine and the components it drives.
//!
//! A [`Game`] owns every piece of mutable state. The host calls [`Game::step`]
//! once per fixed tick; renderers and UI read owned [`Snapshot`]s and listen
//! for [`EngineEvent`]s, never touching the live state.

use std::time::Duration;

use rand::Rng;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, EnumDiscriminants};
use tracing::{debug, error, info, trace};

use crate::config::EngineConfig;
use crate::constants::FOOD_COUNT;
use crate::error::{FoodError, GameError, GameResult, InvariantError};
use crate::map::direction::Direction;
use crate::map::grid::{Grid, Position};

use self::collision::CollisionType;
use self::combo::{ComboState, ComboTracker, ComboUpdate};
use self::events::{EventBus, Keyed, Subscription};
use self::food::{FoodManager, NumberedFood};
use self::input::DirectionQueue;
use self::score::{FoodScore, ScoreLedger, ScoreStatistics};
use self::snake::{Snake, SnakeSegment};
use self::state::{GameOverCause, GameOverState, SessionMachine, SessionState, SessionStatistics, Transition};

pub mod collision;
pub mod combo;
pub mod events;
pub mod food;
pub mod input;
pub mod score;
pub mod snake;
pub mod state;

/// Notifications published by the engine, in the order they happen within a tick.
#[derive(Debug, Clone, EnumDiscriminants)]
#[strum_discriminants(name(EngineEventKind), derive(Hash, AsRefStr))]
pub enum EngineEvent {
    /// The session changed state.
    StateChanged(Transition),
    /// The head landed on a food, which was replaced by `spawned`.
    FoodEaten {
        food: NumberedFood,
        spawned: NumberedFood,
        score: FoodScore,
    },
    /// The ordered combo moved.
    Combo(ComboUpdate),
    /// Points were added to the total.
    ScoreChanged { total: u64, delta: u32 },
    /// The game ended. Carries everything needed for a score submission.
    GameOver {
        state: GameOverState,
        statistics: ScoreStatistics,
    },
}

impl Keyed for EngineEvent {
    type Key = EngineEventKind;

    fn key(&self) -> EngineEventKind {
        EngineEventKind::from(self)
    }
}

/// The result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the simulation ran at all; `false` outside PLAYING.
    pub ticked: bool,
    pub success: bool,
    pub collision: CollisionType,
    pub removed_tail: Option<SnakeSegment>,
    pub eaten: Option<NumberedFood>,
    pub combo: Option<ComboUpdate>,
    /// Points awarded on this tick, bonuses included.
    pub points: u32,
}

impl StepResult {
    /// A tick that did not advance the simulation.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// An owned copy of everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub snake: Snake,
    /// Live foods, ordered by number.
    pub foods: SmallVec<[NumberedFood; FOOD_COUNT]>,
    pub combo: ComboState,
    pub score: u64,
    /// Current micro-combo streak length.
    pub combo_count: u32,
    pub session: SessionState,
    pub tick: u64,
    pub game_over: GameOverState,
}

/// The simulation engine for one player's sessions.
#[derive(Debug)]
pub struct Game {
    config: EngineConfig,
    grid: Grid,
    seed: u64,
    snake: Snake,
    queue: DirectionQueue,
    foods: FoodManager,
    combo: ComboTracker,
    ledger: ScoreLedger,
    session: SessionMachine,
    events: EventBus<EngineEvent>,
    game_over: GameOverState,
    /// The collision that is about to end the game, consumed when GAME_OVER is entered.
    pending_collision: Option<(GameOverCause, Position)>,
    /// Simulation time, advanced by one tick interval per call to `step`.
    clock: Duration,
    tick: u64,
    session_ticks: u64,
    foods_eaten: u32,
}

impl Game {
    /// Builds an engine in the MENU state with a fresh snake and food set.
    pub fn new(config: EngineConfig) -> GameResult<Game> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let grid = config.grid();
        let snake = Self::fresh_snake(&config, &grid);
        let mut foods = FoodManager::new(grid, config.base_food_value, seed);
        foods.initialize(snake.cells(), Duration::ZERO)?;

        info!(
            width = grid.width(),
            height = grid.height(),
            cell_size = grid.cell_size(),
            wrap_around = config.wrap_around,
            seed,
            "Engine created"
        );

        Ok(Game {
            ledger: ScoreLedger::new(config.combo_window, config.micro_combo_bonus),
            config,
            grid,
            seed,
            snake,
            queue: DirectionQueue::new(),
            foods,
            combo: ComboTracker::new(),
            session: SessionMachine::new(),
            events: EventBus::new(),
            game_over: GameOverState::default(),
            pending_collision: None,
            clock: Duration::ZERO,
            tick: 0,
            session_ticks: 0,
            foods_eaten: 0,
        })
    }

    fn fresh_snake(config: &EngineConfig, grid: &Grid) -> Snake {
        Snake::new(grid.center(), Direction::Right, config.initial_length, grid)
    }

    /// Advances the simulation by one fixed tick.
    ///
    /// `direction`, when given, is requested before the queue is drained.
    /// Outside PLAYING only the clock moves. A collision ends the game and is
    /// reported through the result; errors are reserved for broken invariants,
    /// which also end the game.
    pub fn step(&mut self, direction: Option<Direction>) -> GameResult<StepResult> {
        self.clock += self.config.tick_interval;
        self.tick += 1;

        if !self.session.is(SessionState::Playing) {
            return Ok(StepResult::idle());
        }

        self.session_ticks += 1;
        self.ledger.expire(self.clock);

        if let Some(direction) = direction {
            self.request_direction(direction);
        }
        if let Some(next) = self.queue.drain(self.snake.direction) {
            self.snake.next_direction = next;
        }

        let moved = self
            .snake
            .step(Some(self.snake.next_direction), &self.grid, self.config.wrap_around);

        if !moved.success {
            if let Some(cause) = GameOverCause::from_collision(moved.collision) {
                self.pending_collision = Some((cause, moved.target));
            }
            info!(collision = %moved.collision, position = %moved.target, tick = self.session_ticks, "Snake collided");
            self.transition_to(SessionState::GameOver);

            return Ok(StepResult {
                ticked: true,
                collision: moved.collision,
                ..Default::default()
            });
        }

        let head = self.snake.head().position;
        trace!(head = %head, direction = %self.snake.direction, length = self.snake.len(), "Snake moved");

        let mut result = StepResult {
            ticked: true,
            success: true,
            collision: CollisionType::None,
            removed_tail: moved.removed_tail,
            ..Default::default()
        };

        if let Some(food) = self.foods.food_at(head).copied() {
            let (points, combo) = match self.eat(food) {
                Ok(outcome) => outcome,
                Err(error) => {
                    // A broken board cannot be played on; freeze the session before reporting.
                    error!(error = %error, "Ending game after a broken invariant");
                    self.transition_to(SessionState::GameOver);
                    return Err(error);
                }
            };
            result.eaten = Some(food);
            result.combo = Some(combo);
            result.points = points;
        }

        Ok(result)
    }

    /// Consumes `food`, scores it, advances the combo and schedules growth.
    fn eat(&mut self, food: NumberedFood) -> GameResult<(u32, ComboUpdate)> {
        let number = food.number;
        let consumption = self
            .foods
            .consume(number, self.snake.cells(), self.clock)
            .map_err(|source| InvariantError::FoodSlots {
                number: number.get(),
                source,
            })?;

        let found = self.foods.len();
        if found != FOOD_COUNT {
            return Err(InvariantError::FoodSlots {
                number: number.get(),
                source: FoodError::SlotCount {
                    expected: FOOD_COUNT,
                    found,
                },
            }
            .into());
        }

        self.foods_eaten += 1;
        let score = self.ledger.record_food(food.value, self.clock, Some(food.position));
        let combo = self.combo.register(number);

        let mut delta = score.total();
        if matches!(combo, ComboUpdate::Completed { .. }) {
            self.ledger.record_combo(self.config.combo_bonus, self.clock, Some(food.position));
            delta += self.config.combo_bonus;
        }

        self.snake.grow();

        debug!(number = %number, points = delta, streak = score.streak, combo = ?combo, total = self.ledger.total(), "Food eaten");

        self.events.emit(&EngineEvent::FoodEaten {
            food: consumption.consumed,
            spawned: consumption.spawned,
            score,
        });
        self.events.emit(&EngineEvent::Combo(combo));
        self.events.emit(&EngineEvent::ScoreChanged {
            total: self.ledger.total(),
            delta,
        });

        Ok((delta, combo))
    }

    /// Attempts a session transition; illegal ones return `false` and change nothing.
    ///
    /// Entering PLAYING from anywhere but PAUSED starts a fresh game.
    /// Entering GAME_OVER freezes the final statistics.
    pub fn transition_to(&mut self, next: SessionState) -> bool {
        let from = self.session.state();
        if !from.can_transition_to(next) {
            // Logs the rejection.
            return self.session.transition_to(next, self.clock);
        }

        if next == SessionState::Playing && from != SessionState::Paused {
            if let Err(error) = self.reset() {
                error!(error = %error, "Failed to reset for a new game");
                return false;
            }
        }

        if !self.session.transition_to(next, self.clock) {
            return false;
        }

        self.events.emit(&EngineEvent::StateChanged(Transition {
            from,
            to: next,
            at: self.clock,
        }));

        if next == SessionState::GameOver {
            self.finish();
        }

        true
    }

    /// Restores snake, foods, combo, score and input to a fresh game.
    fn reset(&mut self) -> GameResult<()> {
        self.snake = Self::fresh_snake(&self.config, &self.grid);
        self.foods.initialize(self.snake.cells(), self.clock)?;
        self.queue.clear();
        self.combo.reset();
        self.ledger.reset();
        self.game_over = GameOverState::default();
        self.pending_collision = None;
        self.session_ticks = 0;
        self.foods_eaten = 0;
        debug!(head = %self.snake.head().position, length = self.snake.len(), "Game reset");
        Ok(())
    }

    fn finish(&mut self) {
        let (cause, collision_position) = match self.pending_collision.take() {
            Some((cause, position)) => (Some(cause), Some(position)),
            None => (None, None),
        };

        self.game_over = GameOverState {
            is_game_over: true,
            cause,
            final_score: self.ledger.total(),
            timestamp: self.clock,
            collision_position,
            stats: Some(self.session_statistics()),
        };

        info!(
            cause = ?cause,
            score = self.game_over.final_score,
            ticks = self.session_ticks,
            "Game over"
        );

        self.events.emit(&EngineEvent::GameOver {
            state: self.game_over,
            statistics: self.ledger.statistics(),
        });
    }

    /// Starts a new game from MENU, LOADING or GAME_OVER.
    pub fn start(&mut self) -> bool {
        self.transition_to(SessionState::Playing)
    }

    pub fn begin_loading(&mut self) -> bool {
        self.transition_to(SessionState::Loading)
    }

    pub fn pause(&mut self) -> bool {
        self.transition_to(SessionState::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.session.is(SessionState::Paused) && self.transition_to(SessionState::Playing)
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.session.state() {
            SessionState::Playing => self.pause(),
            SessionState::Paused => self.resume(),
            _ => false,
        }
    }

    pub fn return_to_menu(&mut self) -> bool {
        self.transition_to(SessionState::Menu)
    }

    /// Abandons the current game, if any, and starts a new one.
    pub fn restart(&mut self) -> bool {
        if matches!(self.session.state(), SessionState::Playing | SessionState::Paused) && !self.return_to_menu() {
            return false;
        }
        self.start()
    }

    /// Queues a direction change for the next tick. Only accepted while PLAYING.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.session.is(SessionState::Playing) {
            return false;
        }
        self.queue.request(direction, self.snake.direction)
    }

    /// Registers a listener for one kind of engine event.
    pub fn subscribe(&self, kind: EngineEventKind, callback: impl Fn(&EngineEvent) + 'static) -> Subscription {
        self.events.subscribe(Some(kind), callback)
    }

    /// Registers a listener for every engine event.
    pub fn subscribe_all(&self, callback: impl Fn(&EngineEvent) + 'static) -> Subscription {
        self.events.subscribe(None, callback)
    }

    /// Registers a callback fired whenever the session enters `state`.
    pub fn on_enter(&self, state: SessionState, callback: impl Fn(&Transition) + 'static) -> Subscription {
        self.session.on_enter(state, callback)
    }

    /// Registers a callback fired on every session transition.
    pub fn on_transition(&self, callback: impl Fn(&Transition) + 'static) -> Subscription {
        self.session.on_transition(callback)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.clone(),
            foods: self.foods.foods().copied().collect(),
            combo: self.combo.state().clone(),
            score: self.ledger.total(),
            combo_count: self.ledger.combo_count(),
            session: self.session.state(),
            tick: self.tick,
            game_over: self.game_over,
        }
    }

    /// Score aggregates replayed from the event history.
    pub fn statistics(&self) -> ScoreStatistics {
        self.ledger.statistics()
    }

    pub fn session_statistics(&self) -> SessionStatistics {
        SessionStatistics {
            duration: self.session.active_duration(self.clock),
            ticks: self.session_ticks,
            snake_length: self.snake.len(),
            foods_eaten: self.foods_eaten,
            total_combos: self.combo.state().total_combos,
            longest_streak: self.ledger.statistics().longest_streak,
        }
    }

    /// Checks the snake and food invariants. A diagnostic, not part of the tick.
    pub fn validate(&self) -> GameResult<()> {
        self.snake.validate(&self.grid)?;
        self.foods
            .validate_with_snake(self.snake.cells())
            .map_err(GameError::from)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The seed food placement was drawn from. Reusing it replays the session.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &FoodManager {
        &self.foods
    }

    pub fn combo(&self) -> &ComboState {
        self.combo.state()
    }

    pub fn score(&self) -> u64 {
        self.ledger.total()
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn session(&self) -> &SessionMachine {
        &self.session
    }

    pub fn game_over(&self) -> &GameOverState {
        &self.game_over
    }

    /// Current simulation time.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Ticks since the engine was created.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn pending_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.queue.pending()
    }
}
