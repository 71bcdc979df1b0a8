//! Application state: key handling and coach plumbing

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::coach::{self, CoachFeedback};
use crate::history::HistoryStore;
use crate::round::{AdvanceAction, PickOutcome, Verdict};
use crate::session::{Screen, SessionController};
use crate::ui::state::{GameUI, LogCategory};
use crate::ui::Theme;

/// How long to wait for terminal input before ticking timers
const INPUT_POLL: Duration = Duration::from_millis(100);

pub struct App {
    pub history: HistoryStore,
    pub controller: SessionController,
    pub ui: GameUI,
    pub theme: Theme,
    pub running: bool,
    runtime: Handle,
    coach_tx: UnboundedSender<(u64, CoachFeedback)>,
    coach_rx: UnboundedReceiver<(u64, CoachFeedback)>,
}

impl App {
    pub fn new(history: HistoryStore, controller: SessionController, runtime: Handle) -> Self {
        let (coach_tx, coach_rx) = mpsc::unbounded_channel();
        Self {
            history,
            controller,
            ui: GameUI::new(),
            theme: Theme::default(),
            running: true,
            runtime,
            coach_tx,
            coach_rx,
        }
    }

    /// Wait briefly for a key press and dispatch it
    pub fn handle_input(&mut self) -> std::io::Result<()> {
        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code, Instant::now());
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) {
        match self.controller.screen() {
            Screen::Menu => match code {
                KeyCode::Enter | KeyCode::Char(' ') => self.start_game(),
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                _ => {}
            },
            Screen::End => match code {
                KeyCode::Enter => self.start_game(),
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                _ => {}
            },
            Screen::Game => match code {
                KeyCode::Char(c @ '1'..='9') => self.pick_slot(c as usize - '1' as usize, now),
                KeyCode::Char('z') => {
                    self.controller.unpick(0);
                }
                KeyCode::Char('x') => {
                    self.controller.unpick(1);
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    let before = self.controller.engine().round_number();
                    if let Some(action) = self.controller.skip() {
                        self.after_advance(action, before);
                    }
                }
                KeyCode::Tab => self.controller.toggle_view(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.controller.quit_to_menu();
                    self.ui.reset_round();
                }
                _ => {}
            },
        }
    }

    /// Deliver coach feedback and fire due timers
    pub fn tick(&mut self, now: Instant) {
        while let Ok((round, feedback)) = self.coach_rx.try_recv() {
            if !self.ui.deliver_feedback(round, feedback) {
                tracing::trace!(round, "Discarded stale coach feedback");
            }
        }

        let before = self.controller.engine().round_number();
        if let Some(action) = self.controller.tick(now) {
            self.after_advance(action, before);
        }
    }

    /// Cancel outstanding timers before exit
    pub fn shutdown(&mut self) {
        self.controller.teardown();
        self.running = false;
    }

    fn start_game(&mut self) {
        self.controller.start(&mut self.history);
        self.ui.reset_round();
        let round = self.controller.engine().round_number();
        self.ui.log(round, "New game".to_string(), LogCategory::System);
    }

    fn pick_slot(&mut self, index: usize, now: Instant) {
        let Some(component) = self
            .controller
            .engine()
            .catalog()
            .components()
            .nth(index)
            .map(|item| item.id.clone())
        else {
            return;
        };

        if let PickOutcome::Verified(verdict) = self.controller.pick(&mut self.history, &component, now) {
            self.on_verdict(verdict);
        }
    }

    fn on_verdict(&mut self, verdict: Verdict) {
        let round = self.controller.engine().round_number();
        let name = verdict.entry.target.name.clone();
        let (message, category) = if verdict.is_correct {
            (format!("{} +{}", name, verdict.points), LogCategory::Correct)
        } else {
            (format!("{} missed", name), LogCategory::Wrong)
        };
        self.ui.log(round, message, category);
        self.ui.awaiting_feedback = Some(round);

        let tx = self.coach_tx.clone();
        let streak = self.controller.player().streak;
        let latency = self.controller.config().coach_latency();
        let is_correct = verdict.is_correct;
        self.runtime.spawn(async move {
            let feedback = coach::coach_feedback(&name, is_correct, streak, latency).await;
            // Receiver is gone once the app shuts down
            let _ = tx.send((round, feedback));
        });
    }

    fn after_advance(&mut self, action: AdvanceAction, before: u64) {
        match action {
            AdvanceAction::NextQuestion => {
                if self.controller.engine().round_number() != before {
                    self.ui.reset_round();
                }
            }
            AdvanceAction::EndGame => {
                let score = self.controller.player().score;
                self.ui.log(before, format!("Game over, score {}", score), LogCategory::System);
            }
        }
    }
}
