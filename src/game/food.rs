//! The five numbered food slots and their placement.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use glam::IVec2;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use strum_macros::{AsRefStr, EnumCount, EnumIter};
use tracing::{debug, trace, warn};

use crate::constants::{FOOD_COUNT, MAX_SPAWN_ATTEMPTS};
use crate::error::FoodError;
use crate::map::grid::{Grid, Position};

/// The number printed on a food, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoodNumber(u8);

impl FoodNumber {
    pub const MIN: FoodNumber = FoodNumber(1);
    pub const MAX: FoodNumber = FoodNumber(FOOD_COUNT as u8);

    pub fn new(number: u8) -> Result<Self, FoodError> {
        if (1..=FOOD_COUNT as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(FoodError::InvalidNumber(number))
        }
    }

    /// All numbers in ascending order.
    pub fn all() -> impl Iterator<Item = FoodNumber> {
        (1..=FOOD_COUNT as u8).map(FoodNumber)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// The number that follows this one in an ordered combo, wrapping 5 back to 1.
    pub const fn successor(self) -> FoodNumber {
        FoodNumber(self.0 % FOOD_COUNT as u8 + 1)
    }

    const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for FoodNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One fixed color per food number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, EnumCount)]
#[strum(serialize_all = "lowercase")]
pub enum FoodColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl FoodColor {
    pub const fn for_number(number: FoodNumber) -> Self {
        match number.get() {
            1 => FoodColor::Red,
            2 => FoodColor::Orange,
            3 => FoodColor::Yellow,
            4 => FoodColor::Green,
            _ => FoodColor::Blue,
        }
    }

    /// The color as a `#rrggbb` string for renderers.
    pub const fn hex(self) -> &'static str {
        match self {
            FoodColor::Red => "#ff6b6b",
            FoodColor::Orange => "#ffa94d",
            FoodColor::Yellow => "#ffd43b",
            FoodColor::Green => "#69db7c",
            FoodColor::Blue => "#4dabf7",
        }
    }
}

/// A unique, monotonically increasing food identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoodId(pub u64);

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "food-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedFood {
    pub id: FoodId,
    pub number: FoodNumber,
    pub position: Position,
    pub color: FoodColor,
    /// Simulation time at which the food was spawned.
    pub timestamp: Duration,
    pub value: u32,
}

/// A consumed food together with the replacement spawned in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumption {
    pub consumed: NumberedFood,
    pub spawned: NumberedFood,
}

/// Keeps exactly one food of each number on the board.
#[derive(Debug, Clone)]
pub struct FoodManager {
    grid: Grid,
    slots: [Option<NumberedFood>; FOOD_COUNT],
    value: u32,
    next_id: u64,
    rng: SmallRng,
}

impl FoodManager {
    pub fn new(grid: Grid, value: u32, seed: u64) -> Self {
        Self {
            grid,
            slots: [None; FOOD_COUNT],
            value,
            next_id: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Places foods 1 through 5 on cells free of the snake and of each other.
    pub fn initialize(&mut self, snake_cells: impl IntoIterator<Item = Position>, now: Duration) -> Result<(), FoodError> {
        self.slots = [None; FOOD_COUNT];
        let mut occupied: HashSet<Position> = snake_cells.into_iter().collect();

        for number in FoodNumber::all() {
            let food = self.spawn(number, &occupied, now)?;
            occupied.insert(food.position);
            self.slots[number.index()] = Some(food);
        }

        let placed: Vec<(u8, Position)> = self.foods().map(|f| (f.number.get(), f.position)).collect();
        debug!(foods = ?placed, "Food slots initialized");
        Ok(())
    }

    /// Removes the food numbered `number` and immediately respawns the same number elsewhere.
    ///
    /// The replacement avoids the snake, the other foods and the vacated cell.
    /// If no cell is free the slot keeps its current food.
    pub fn consume(
        &mut self,
        number: FoodNumber,
        snake_cells: impl IntoIterator<Item = Position>,
        now: Duration,
    ) -> Result<Consumption, FoodError> {
        let consumed = self.slots[number.index()].ok_or(FoodError::Missing(number.get()))?;

        // Every live food is excluded, the consumed one included.
        let mut occupied: HashSet<Position> = snake_cells.into_iter().collect();
        occupied.extend(self.foods().map(|food| food.position));

        let spawned = self.spawn(number, &occupied, now)?;
        self.slots[number.index()] = Some(spawned);

        trace!(number = %number, from = %consumed.position, to = %spawned.position, "Food respawned");
        Ok(Consumption { consumed, spawned })
    }

    /// The food occupying `position`, if any.
    pub fn food_at(&self, position: Position) -> Option<&NumberedFood> {
        self.foods().find(|food| food.position == position)
    }

    pub fn get(&self, number: FoodNumber) -> Option<&NumberedFood> {
        self.slots[number.index()].as_ref()
    }

    /// Live foods, ordered by number.
    pub fn foods(&self) -> impl Iterator<Item = &NumberedFood> + '_ {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.foods().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Diagnostic check of the slot invariant: five foods, numbers 1 through 5, no shared cells.
    pub fn validate(&self) -> Result<(), FoodError> {
        let found = self.len();
        if found != FOOD_COUNT {
            return Err(FoodError::SlotCount {
                expected: FOOD_COUNT,
                found,
            });
        }

        let mut numbers = HashSet::with_capacity(FOOD_COUNT);
        for food in self.foods() {
            if !numbers.insert(food.number) {
                return Err(FoodError::DuplicateNumber(food.number.get()));
            }
        }
        if let Some(missing) = FoodNumber::all().find(|number| !numbers.contains(number)) {
            return Err(FoodError::Missing(missing.get()));
        }

        for (i, first) in self.foods().enumerate() {
            if let Some(second) = self.foods().skip(i + 1).find(|other| other.position == first.position) {
                return Err(FoodError::Overlap {
                    first: first.number.get(),
                    second: second.number.get(),
                    position: first.position,
                });
            }
        }

        Ok(())
    }

    /// Like [`validate`](Self::validate), and additionally checks that no food sits on the snake.
    pub fn validate_with_snake(&self, snake_cells: impl IntoIterator<Item = Position>) -> Result<(), FoodError> {
        self.validate()?;
        for position in snake_cells {
            if let Some(food) = self.food_at(position) {
                return Err(FoodError::OnSnake {
                    number: food.number.get(),
                    position,
                });
            }
        }
        Ok(())
    }

    fn spawn(&mut self, number: FoodNumber, occupied: &HashSet<Position>, now: Duration) -> Result<NumberedFood, FoodError> {
        let position = self.find_free_cell(occupied)?;
        self.next_id += 1;

        Ok(NumberedFood {
            id: FoodId(self.next_id),
            number,
            position,
            color: FoodColor::for_number(number),
            timestamp: now,
            value: self.value,
        })
    }

    /// Draws random cells until a free one is found, then falls back to a row-major scan.
    fn find_free_cell(&mut self, occupied: &HashSet<Position>) -> Result<Position, FoodError> {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let cell = IVec2::new(
                self.rng.random_range(0..self.grid.width()) as i32,
                self.rng.random_range(0..self.grid.height()) as i32,
            );
            let position = self.grid.to_pixel(cell);
            if !occupied.contains(&position) {
                return Ok(position);
            }
        }

        warn!(attempts = MAX_SPAWN_ATTEMPTS, "Random food placement exhausted, scanning for a free cell");
        self.grid
            .cells()
            .find(|position| !occupied.contains(position))
            .ok_or(FoodError::NoFreeCell)
    }
}
