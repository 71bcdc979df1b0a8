//! Session controller - binds the round engine to screens and history
//!
//! The controller owns the per-game state (player stats, the round engine,
//! the current screen). The history store lives longer than any game and
//! is passed in by the caller.

use std::sync::Arc;
use std::time::Instant;

use crate::analytics::{self, Summary};
use crate::catalog::RecipeCatalog;
use crate::core::config::QuizConfig;
use crate::core::types::SessionId;
use crate::history::{HistoryStore, HistoryView};
use crate::round::{AdvanceAction, PickOutcome, RecipePicker, RoundEngine};
use crate::session::player::PlayerState;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Game,
    End,
}

pub struct SessionController {
    config: QuizConfig,
    screen: Screen,
    player: PlayerState,
    engine: RoundEngine,
    /// History log shown in the stats panel
    view: HistoryView,
    session_id: Option<SessionId>,
}

impl SessionController {
    pub fn new(catalog: Arc<RecipeCatalog>, picker: Box<dyn RecipePicker>, config: QuizConfig) -> Self {
        let engine = RoundEngine::new(catalog, picker, &config);
        Self {
            player: PlayerState::from_config(&config),
            config,
            screen: Screen::Menu,
            engine,
            view: HistoryView::Session,
            session_id: None,
        }
    }

    /// Begin a new game: fresh stats, empty session log, first question
    pub fn start(&mut self, history: &mut HistoryStore) {
        let session_id = SessionId::new();
        tracing::info!(session = %session_id, "Starting game");

        self.session_id = Some(session_id);
        self.player = PlayerState::from_config(&self.config);
        history.clear_session();
        self.screen = Screen::Game;
        self.engine.generate_question();
    }

    /// Forward a component pick while a game is on screen
    pub fn pick(&mut self, history: &mut HistoryStore, component: &str, now: Instant) -> PickOutcome {
        if self.screen != Screen::Game {
            return PickOutcome::Ignored;
        }
        self.engine.pick(component, &mut self.player, history, now)
    }

    pub fn unpick(&mut self, slot: usize) -> bool {
        self.screen == Screen::Game && self.engine.unpick(slot)
    }

    /// Skip the reveal delay
    pub fn skip(&mut self) -> Option<AdvanceAction> {
        if self.screen != Screen::Game {
            return None;
        }
        let action = self.engine.skip()?;
        self.apply(action);
        Some(action)
    }

    /// Drive the reveal timer; call from the event loop
    pub fn tick(&mut self, now: Instant) -> Option<AdvanceAction> {
        let action = self.engine.poll(now)?;
        self.apply(action);
        Some(action)
    }

    fn apply(&mut self, action: AdvanceAction) {
        if action == AdvanceAction::EndGame {
            tracing::info!(
                session = ?self.session_id,
                score = self.player.score,
                best_streak = self.player.best_streak,
                "Game over"
            );
            self.screen = Screen::End;
        }
    }

    /// Leave the game, cancelling any armed advance
    pub fn quit_to_menu(&mut self) {
        self.engine.cancel_pending();
        self.screen = Screen::Menu;
    }

    /// Cancel outstanding timers before the process exits
    pub fn teardown(&mut self) {
        if self.engine.cancel_pending() {
            tracing::debug!("Cancelled advance on teardown");
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
    }

    pub fn set_view(&mut self, view: HistoryView) {
        self.view = view;
    }

    pub fn view(&self) -> HistoryView {
        self.view
    }

    /// Percent correct over the displayed view, 0 when empty
    pub fn accuracy(&self, history: &HistoryStore) -> f32 {
        analytics::accuracy(history.view(self.view))
    }

    pub fn summary(&self, history: &HistoryStore) -> Summary {
        Summary::of(history.view(self.view))
    }

    /// Moving-average trend over the displayed view
    pub fn trend(&self, history: &HistoryStore) -> Vec<f32> {
        analytics::moving_accuracy(
            history.view(self.view),
            self.config.trend_window,
            self.config.trend_cap,
        )
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::small_catalog;
    use crate::history::MemoryStorage;
    use crate::round::ScriptedPicker;
    use std::time::Duration;

    fn setup() -> (SessionController, HistoryStore) {
        let catalog = Arc::new(small_catalog());
        let config = QuizConfig::default();
        let history = HistoryStore::load(Box::new(MemoryStorage::new()), &catalog, &config);
        // Always ask for red_buff
        let controller = SessionController::new(catalog, Box::new(ScriptedPicker::new(vec![2])), config);
        (controller, history)
    }

    #[test]
    fn test_menu_ignores_picks() {
        let (mut controller, mut history) = setup();
        assert_eq!(controller.screen(), Screen::Menu);
        assert_eq!(controller.pick(&mut history, "bow", Instant::now()), PickOutcome::Ignored);
        assert!(history.all_time().is_empty());
    }

    #[test]
    fn test_start_resets_player_and_session_log() {
        let (mut controller, mut history) = setup();
        let now = Instant::now();
        controller.start(&mut history);
        controller.pick(&mut history, "bow", now);
        controller.pick(&mut history, "bow", now);
        assert_eq!(controller.player().score, 100);

        controller.start(&mut history);
        assert_eq!(controller.screen(), Screen::Game);
        assert_eq!(*controller.player(), PlayerState::default());
        assert!(history.session().is_empty());
        assert_eq!(history.all_time().len(), 1);
    }

    #[test]
    fn test_game_over_after_timer() {
        let (mut controller, mut history) = setup();
        let now = Instant::now();
        controller.start(&mut history);

        for _ in 0..3 {
            controller.pick(&mut history, "sword", now);
            controller.pick(&mut history, "sword", now);
            controller.tick(now + Duration::from_millis(5000));
        }
        assert_eq!(controller.player().lives, 0);
        assert_eq!(controller.screen(), Screen::End);
    }

    #[test]
    fn test_end_screen_waits_for_delay() {
        let (mut controller, mut history) = setup();
        let now = Instant::now();
        controller.start(&mut history);

        for _ in 0..2 {
            controller.pick(&mut history, "sword", now);
            controller.pick(&mut history, "sword", now);
            controller.skip();
        }
        controller.pick(&mut history, "sword", now);
        controller.pick(&mut history, "sword", now);

        assert_eq!(controller.screen(), Screen::Game);
        assert_eq!(controller.tick(now + Duration::from_millis(100)), None);
        assert_eq!(controller.screen(), Screen::Game);
        assert_eq!(controller.skip(), Some(AdvanceAction::EndGame));
        assert_eq!(controller.screen(), Screen::End);
    }

    #[test]
    fn test_accuracy_follows_view() {
        let (mut controller, mut history) = setup();
        let now = Instant::now();
        assert_eq!(controller.accuracy(&history), 0.0);

        controller.start(&mut history);
        controller.pick(&mut history, "bow", now);
        controller.pick(&mut history, "bow", now);
        controller.skip();
        controller.pick(&mut history, "bow", now);
        controller.pick(&mut history, "sword", now);
        assert!((controller.accuracy(&history) - 50.0).abs() < 1e-4);
        assert_eq!(controller.trend(&history).len(), 2);

        // New game: session view empties, all-time keeps both answers
        controller.start(&mut history);
        assert_eq!(controller.accuracy(&history), 0.0);
        controller.toggle_view();
        assert_eq!(controller.view(), HistoryView::AllTime);
        assert_eq!(controller.summary(&history).total, 2);
    }

    #[test]
    fn test_quit_to_menu_cancels_timer() {
        let (mut controller, mut history) = setup();
        let now = Instant::now();
        controller.start(&mut history);
        controller.pick(&mut history, "bow", now);
        controller.pick(&mut history, "bow", now);
        controller.quit_to_menu();
        assert!(controller.engine().pending().is_none());
        assert_eq!(controller.tick(now + Duration::from_secs(10)), None);
        assert_eq!(controller.screen(), Screen::Menu);
    }
}
