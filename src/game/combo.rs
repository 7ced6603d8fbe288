//! Ordered 1 → 5 combo tracking.

use smallvec::SmallVec;
use tracing::debug;

use crate::constants::FOOD_COUNT;
use crate::game::food::FoodNumber;

/// Progress through the current ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboState {
    /// Numbers eaten in order so far, oldest first.
    pub current_sequence: SmallVec<[FoodNumber; FOOD_COUNT]>,
    pub expected_next: FoodNumber,
    pub combo_progress: u8,
    pub total_combos: u32,
    pub is_combo_active: bool,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            current_sequence: SmallVec::new(),
            expected_next: FoodNumber::MIN,
            combo_progress: 0,
            total_combos: 0,
            is_combo_active: false,
        }
    }
}

/// What registering a consumption did to the combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboUpdate {
    /// A new sequence began with a 1.
    Started,
    /// The expected number was eaten; `progress` foods are in the sequence now.
    Advanced { progress: u8 },
    /// The 5 completed the sequence.
    Completed { total_combos: u32 },
    /// An out-of-order number ended an active sequence.
    Broken { progress: u8 },
    /// An out-of-order number was eaten with no sequence running.
    Ignored,
}

/// Tracks ordered consumption of foods 1 through 5.
#[derive(Debug, Clone, Default)]
pub struct ComboTracker {
    state: ComboState,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ComboState {
        &self.state
    }

    /// Feeds one consumed number into the tracker.
    ///
    /// Interrupting a sequence awards nothing for the part already eaten.
    pub fn register(&mut self, number: FoodNumber) -> ComboUpdate {
        let state = &mut self.state;

        if number == state.expected_next {
            state.current_sequence.push(number);
            state.combo_progress += 1;

            if number == FoodNumber::MAX && state.combo_progress as usize == FOOD_COUNT {
                state.total_combos += 1;
                let total_combos = state.total_combos;
                self.clear();
                debug!(total_combos, "Ordered combo completed");
                return ComboUpdate::Completed { total_combos };
            }

            state.expected_next = number.successor();
            state.is_combo_active = true;
            return if state.combo_progress == 1 {
                ComboUpdate::Started
            } else {
                ComboUpdate::Advanced {
                    progress: state.combo_progress,
                }
            };
        }

        let progress = state.combo_progress;
        let was_active = state.is_combo_active;

        if number == FoodNumber::MIN {
            // An out-of-order 1 can only happen mid-sequence, and it starts a fresh one.
            state.current_sequence.clear();
            state.current_sequence.push(number);
            state.combo_progress = 1;
            state.expected_next = number.successor();
            state.is_combo_active = true;
            debug!(progress, "Combo restarted by a 1");
            return ComboUpdate::Started;
        }

        self.clear();
        if was_active {
            debug!(progress, number = %number, "Combo broken");
            ComboUpdate::Broken { progress }
        } else {
            ComboUpdate::Ignored
        }
    }

    /// Drops the running sequence, keeping the completed-combo count.
    fn clear(&mut self) {
        let state = &mut self.state;
        state.current_sequence.clear();
        state.expected_next = FoodNumber::MIN;
        state.combo_progress = 0;
        state.is_combo_active = false;
    }

    /// Forgets everything, including completed combos.
    pub fn reset(&mut self) {
        self.state = ComboState::default();
    }
}
