use std::time::Duration;

use pretty_assertions::assert_eq;
use snake::constants::scoring::{COMBO_WINDOW, MICRO_COMBO_BONUS, SCORE_HISTORY_SIZE};
use snake::game::score::{FoodScore, ScoreEventKind, ScoreLedger};
use snake::map::grid::Position;
use speculoos::prelude::*;

fn ledger() -> ScoreLedger {
    ScoreLedger::new(COMBO_WINDOW, MICRO_COMBO_BONUS)
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_single_food_has_no_bonus() {
    let mut ledger = ledger();

    let score = ledger.record_food(10, ms(0), Some(Position::new(40, 40)));

    assert_eq!(score, FoodScore { base: 10, streak: 1, bonus: 0 });
    assert_eq!(ledger.total(), 10);
    assert_eq!(ledger.combo_count(), 1);
    assert_eq!(ledger.history().len(), 1);
}

#[test]
fn test_foods_within_window_build_streak() {
    let mut ledger = ledger();

    ledger.record_food(10, ms(0), None);
    let second = ledger.record_food(10, ms(500), None);
    let third = ledger.record_food(10, ms(1000), None);

    assert_eq!(ledger.combo_count(), 3);
    assert_eq!(second.bonus, MICRO_COMBO_BONUS);
    assert_eq!(third.bonus, MICRO_COMBO_BONUS * 2);
    assert_eq!(ledger.total(), 30 + 5 + 10);
}

#[test]
fn test_gap_beyond_window_restarts_streak() {
    let mut ledger = ledger();

    ledger.record_food(10, ms(0), None);
    let late = ledger.record_food(10, ms(2500), None);

    assert_eq!(ledger.combo_count(), 1);
    assert_eq!(late.streak, 1);
    assert_eq!(late.bonus, 0);
    assert_eq!(ledger.total(), 20);
}

#[test]
fn test_gap_equal_to_window_continues_streak() {
    let mut ledger = ledger();

    ledger.record_food(10, ms(0), None);
    ledger.record_food(10, ms(2000), None);

    assert_eq!(ledger.combo_count(), 2);
}

#[test]
fn test_expire_ends_streak_after_window() {
    let mut ledger = ledger();
    ledger.record_food(10, ms(0), None);
    ledger.record_food(10, ms(300), None);

    ledger.expire(ms(2000));
    assert_eq!(ledger.combo_count(), 2);

    ledger.expire(ms(2301));
    assert_eq!(ledger.combo_count(), 0);

    // The next food starts over
    let score = ledger.record_food(10, ms(2400), None);
    assert_eq!(score.streak, 1);
}

#[test]
fn test_combo_bonus_is_recorded() {
    let mut ledger = ledger();
    ledger.record_food(10, ms(0), None);
    ledger.record_combo(100, ms(0), None);

    assert_eq!(ledger.total(), 110);
    let kinds: Vec<ScoreEventKind> = ledger.history().map(|event| event.kind).collect();
    assert_eq!(kinds, vec![ScoreEventKind::Food, ScoreEventKind::Combo]);
}

#[test]
fn test_history_is_capped_but_total_is_not() {
    let mut ledger = ledger();

    for i in 0..(SCORE_HISTORY_SIZE as u64 + 100) {
        // Spaced beyond the window so no bonus events are added
        ledger.record_food(10, ms(i * 3000), None);
    }

    assert_eq!(ledger.history().len(), SCORE_HISTORY_SIZE);
    assert_eq!(ledger.total(), (SCORE_HISTORY_SIZE as u64 + 100) * 10);

    let oldest = ledger.history().next().expect("history is full");
    assert_eq!(oldest.timestamp, ms(100 * 3000));

    let stats = ledger.statistics();
    assert_eq!(stats.event_count, SCORE_HISTORY_SIZE);
    assert_eq!(stats.total_score, ledger.total());
}

#[test]
fn test_statistics_breakdown() {
    let mut ledger = ledger();
    ledger.record_food(10, ms(0), None);
    ledger.record_food(10, ms(500), None);
    ledger.record_food(10, ms(900), None);
    ledger.record_combo(100, ms(900), None);
    ledger.record_food(10, ms(9000), None);

    let stats = ledger.statistics();

    assert_eq!(stats.foods_eaten, 4);
    assert_eq!(stats.points_for(ScoreEventKind::Food), 40);
    assert_eq!(stats.points_for(ScoreEventKind::Bonus), 5 + 10);
    assert_eq!(stats.points_for(ScoreEventKind::Combo), 100);
    assert_eq!(stats.total_score, 155);
    assert_eq!(stats.longest_streak, 3);
    assert_that(&stats.highest_event.map(|event| event.kind)).is_some().is_equal_to(ScoreEventKind::Combo);
}

#[test]
fn test_empty_statistics() {
    let stats = ledger().statistics();

    assert_eq!(stats.total_score, 0);
    assert_eq!(stats.event_count, 0);
    assert_eq!(stats.points_for(ScoreEventKind::Food), 0);
    assert_that(&stats.highest_event).is_none();
}

#[test]
fn test_reset_clears_everything() {
    let mut ledger = ledger();
    ledger.record_food(10, ms(0), None);
    ledger.record_food(10, ms(100), None);

    ledger.reset();

    assert_eq!(ledger.total(), 0);
    assert_eq!(ledger.combo_count(), 0);
    assert_eq!(ledger.history().len(), 0);
    assert_eq!(ledger.record_food(10, ms(200), None).streak, 1);
}
