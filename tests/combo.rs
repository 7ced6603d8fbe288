use pretty_assertions::assert_eq;
use snake::game::combo::{ComboTracker, ComboUpdate};
use snake::game::food::FoodNumber;
use speculoos::prelude::*;

fn number(n: u8) -> FoodNumber {
    FoodNumber::new(n).expect("food number in range")
}

fn feed(tracker: &mut ComboTracker, numbers: &[u8]) -> Vec<ComboUpdate> {
    numbers.iter().map(|&n| tracker.register(number(n))).collect()
}

#[test]
fn test_fresh_tracker_expects_one() {
    let tracker = ComboTracker::new();
    let state = tracker.state();

    assert_eq!(state.expected_next, number(1));
    assert_eq!(state.combo_progress, 0);
    assert_eq!(state.total_combos, 0);
    assert_that(&state.is_combo_active).is_false();
    assert_that(&state.current_sequence.is_empty()).is_true();
}

#[test]
fn test_in_order_run_completes_combo() {
    let mut tracker = ComboTracker::new();

    let updates = feed(&mut tracker, &[1, 2, 3, 4, 5]);

    assert_eq!(
        updates,
        vec![
            ComboUpdate::Started,
            ComboUpdate::Advanced { progress: 2 },
            ComboUpdate::Advanced { progress: 3 },
            ComboUpdate::Advanced { progress: 4 },
            ComboUpdate::Completed { total_combos: 1 },
        ]
    );

    let state = tracker.state();
    assert_eq!(state.total_combos, 1);
    assert_eq!(state.combo_progress, 0);
    assert_eq!(state.expected_next, number(1));
    assert_that(&state.is_combo_active).is_false();
}

#[test]
fn test_progress_tracks_sequence() {
    let mut tracker = ComboTracker::new();
    feed(&mut tracker, &[1, 2, 3]);

    let state = tracker.state();
    assert_eq!(state.current_sequence.to_vec(), vec![number(1), number(2), number(3)]);
    assert_eq!(state.combo_progress, 3);
    assert_eq!(state.expected_next, number(4));
    assert_that(&state.is_combo_active).is_true();
}

#[test]
fn test_out_of_order_breaks_combo() {
    let mut tracker = ComboTracker::new();

    let updates = feed(&mut tracker, &[1, 3, 2]);

    assert_eq!(
        updates,
        vec![ComboUpdate::Started, ComboUpdate::Broken { progress: 1 }, ComboUpdate::Ignored]
    );
    let state = tracker.state();
    assert_eq!(state.total_combos, 0);
    assert_eq!(state.combo_progress, 0);
    assert_eq!(state.expected_next, number(1));
    assert_that(&state.is_combo_active).is_false();
}

#[test]
fn test_eating_one_mid_sequence_restarts() {
    let mut tracker = ComboTracker::new();

    let updates = feed(&mut tracker, &[1, 2, 1]);

    assert_eq!(updates[2], ComboUpdate::Started);
    let state = tracker.state();
    assert_eq!(state.current_sequence.to_vec(), vec![number(1)]);
    assert_eq!(state.combo_progress, 1);
    assert_eq!(state.expected_next, number(2));
}

#[test]
fn test_five_without_sequence_is_ignored() {
    let mut tracker = ComboTracker::new();

    assert_eq!(tracker.register(number(5)), ComboUpdate::Ignored);
    assert_eq!(tracker.state().total_combos, 0);
}

#[test]
fn test_combos_accumulate_and_reset() {
    let mut tracker = ComboTracker::new();

    feed(&mut tracker, &[1, 2, 3, 4, 5, 1, 2, 3, 4, 5]);
    assert_eq!(tracker.state().total_combos, 2);

    // A broken sequence keeps completed combos
    feed(&mut tracker, &[1, 2, 4]);
    assert_eq!(tracker.state().total_combos, 2);

    tracker.reset();
    assert_eq!(tracker.state().total_combos, 0);
}

#[test]
fn test_expected_next_follows_sequence() {
    let mut tracker = ComboTracker::new();
    let numbers = [1, 2, 5, 1, 2, 3, 3, 1, 4, 1, 2, 3, 4, 5, 2];

    for n in numbers {
        tracker.register(number(n));
        let state = tracker.state();
        let expected = state.current_sequence.last().map_or(number(1), |last| last.successor());

        assert_eq!(state.expected_next, expected);
        assert_eq!(state.combo_progress as usize, state.current_sequence.len());
        assert_eq!(state.is_combo_active, state.combo_progress > 0);
    }
}
