//! Integration tests for full game sessions
//!
//! Plays whole games through the session controller:
//! - Score and streak progression
//! - Lives running out and the delayed end screen
//! - Accuracy and trend figures over session and all-time views

use std::sync::Arc;
use std::time::{Duration, Instant};

use forge_drill::catalog::RecipeCatalog;
use forge_drill::core::config::QuizConfig;
use forge_drill::history::{HistoryStore, HistoryView, MemoryStorage};
use forge_drill::round::{AdvanceAction, PickOutcome, ScriptedPicker};
use forge_drill::session::{Screen, SessionController};

/// Controller whose every question is Red Buff (Recurve Bow + Recurve Bow)
fn setup() -> (SessionController, HistoryStore) {
    let catalog = Arc::new(RecipeCatalog::with_defaults().expect("default catalog"));
    let red_buff = catalog
        .recipes()
        .iter()
        .position(|r| r.result == "red_buff")
        .expect("red_buff recipe");
    let config = QuizConfig::default();
    let history = HistoryStore::load(Box::new(MemoryStorage::new()), &catalog, &config);
    let controller = SessionController::new(catalog, Box::new(ScriptedPicker::new(vec![red_buff])), config);
    (controller, history)
}

fn answer(controller: &mut SessionController, history: &mut HistoryStore, correct: bool, now: Instant) -> PickOutcome {
    let (a, b) = if correct { ("bow", "bow") } else { ("bow", "sword") };
    controller.pick(history, a, now);
    controller.pick(history, b, now)
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn test_streak_bonus_sequence() {
    let (mut controller, mut history) = setup();
    let now = Instant::now();
    controller.start(&mut history);

    let mut scores = Vec::new();
    for _ in 0..3 {
        match answer(&mut controller, &mut history, true, now) {
            PickOutcome::Verified(v) => scores.push(v.points),
            other => panic!("expected a verdict, got {:?}", other),
        }
        controller.skip();
    }
    assert_eq!(scores, vec![100, 110, 120]);
    assert_eq!(controller.player().score, 330);
    assert_eq!(controller.player().streak, 3);

    answer(&mut controller, &mut history, false, now);
    let player = controller.player();
    assert_eq!(player.streak, 0);
    assert_eq!(player.best_streak, 3);
    assert_eq!(player.lives, 2);
    assert_eq!(player.score, 330);
}

#[test]
fn test_red_buff_example() {
    let (mut controller, mut history) = setup();
    let now = Instant::now();
    controller.start(&mut history);

    let round = controller.engine().round().expect("question on screen");
    assert_eq!(round.target().name, "Red Buff");

    match answer(&mut controller, &mut history, true, now) {
        PickOutcome::Verified(v) => {
            assert!(v.is_correct);
            assert_eq!(v.entry.target.id, "red_buff");
            assert_eq!(v.scheduled, AdvanceAction::NextQuestion);
        }
        other => panic!("expected a verdict, got {:?}", other),
    }
    assert_eq!(history.session().newest().unwrap().target.name, "Red Buff");
}

// ============================================================================
// Lives and the end screen
// ============================================================================

#[test]
fn test_last_life_ends_game_after_skip() {
    let (mut controller, mut history) = setup();
    let now = Instant::now();
    controller.start(&mut history);

    for _ in 0..2 {
        answer(&mut controller, &mut history, false, now);
        assert_eq!(controller.skip(), Some(AdvanceAction::NextQuestion));
    }
    match answer(&mut controller, &mut history, false, now) {
        PickOutcome::Verified(v) => assert_eq!(v.scheduled, AdvanceAction::EndGame),
        other => panic!("expected a verdict, got {:?}", other),
    }
    assert_eq!(controller.player().lives, 0);
    assert_eq!(controller.screen(), Screen::Game);

    assert_eq!(controller.skip(), Some(AdvanceAction::EndGame));
    assert_eq!(controller.screen(), Screen::End);

    // Nothing is armed once the game is over
    assert_eq!(controller.tick(now + Duration::from_secs(30)), None);
    assert_eq!(controller.pick(&mut history, "bow", now), PickOutcome::Ignored);
}

#[test]
fn test_end_screen_after_deadline() {
    let (mut controller, mut history) = setup();
    let now = Instant::now();
    controller.start(&mut history);

    let mut t = now;
    for _ in 0..3 {
        answer(&mut controller, &mut history, false, t);
        t += Duration::from_millis(5000);
        controller.tick(t);
    }
    assert_eq!(controller.screen(), Screen::End);
    assert_eq!(history.session().len(), 3);
}

#[test]
fn test_retry_starts_fresh_game() {
    let (mut controller, mut history) = setup();
    let now = Instant::now();
    controller.start(&mut history);
    answer(&mut controller, &mut history, true, now);
    controller.skip();
    for _ in 0..3 {
        answer(&mut controller, &mut history, false, now);
        controller.skip();
    }
    assert_eq!(controller.screen(), Screen::End);

    controller.start(&mut history);
    assert_eq!(controller.screen(), Screen::Game);
    assert_eq!(controller.player().lives, 3);
    assert_eq!(controller.player().score, 0);
    assert!(history.session().is_empty());
    assert_eq!(history.all_time().len(), 4);
}

// ============================================================================
// Analytics
// ============================================================================

#[test]
fn test_trend_needs_two_answers() {
    let (mut controller, mut history) = setup();
    let now = Instant::now();
    controller.start(&mut history);

    answer(&mut controller, &mut history, true, now);
    assert!(controller.trend(&history).is_empty());
    assert!((controller.accuracy(&history) - 100.0).abs() < 1e-4);

    controller.skip();
    answer(&mut controller, &mut history, false, now);
    let trend = controller.trend(&history);
    assert_eq!(trend.len(), 2);
    assert!((trend[0] - 1.0).abs() < 1e-4);
    assert!((trend[1] - 0.5).abs() < 1e-4);
}

#[test]
fn test_trend_capped_at_fifty_points() {
    let (mut controller, mut history) = setup();
    let now = Instant::now();
    controller.start(&mut history);

    for _ in 0..60 {
        answer(&mut controller, &mut history, true, now);
        controller.skip();
    }
    assert_eq!(history.session().len(), 60);
    let trend = controller.trend(&history);
    assert_eq!(trend.len(), 50);
    assert!(trend.iter().all(|v| (*v - 1.0).abs() < 1e-4));
}

#[test]
fn test_views_diverge_across_games() {
    let (mut controller, mut history) = setup();
    let now = Instant::now();
    controller.start(&mut history);
    answer(&mut controller, &mut history, true, now);
    controller.skip();
    answer(&mut controller, &mut history, false, now);
    controller.skip();

    controller.start(&mut history);
    answer(&mut controller, &mut history, false, now);

    assert!((controller.accuracy(&history) - 0.0).abs() < 1e-4);
    controller.set_view(HistoryView::AllTime);
    let summary = controller.summary(&history);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.correct, 1);
}
