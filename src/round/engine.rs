//! Round engine - question generation, picks, verdicts and auto-advance
//!
//! Per round: collecting -> (second pick) -> revealed with an advance
//! armed -> (skip or deadline) -> next question, or the end of the game
//! when lives run out. The verdict, the history entry and the armed
//! advance are produced inside a single `pick` call, so no input can land
//! between the second pick and the reveal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::{Item, Recipe, RecipeCatalog};
use crate::core::config::QuizConfig;
use crate::core::types::now_millis;
use crate::history::{HistoryEntry, HistoryStore};
use crate::round::picker::RecipePicker;
use crate::round::selection::Selection;
use crate::round::timer::{AdvanceAction, PendingAdvance};
use crate::session::player::PlayerState;

/// The question currently on screen
#[derive(Debug, Clone)]
pub struct Round {
    recipe: Recipe,
    target: Item,
    selection: Selection,
    revealed: bool,
    last_wrong: bool,
}

impl Round {
    /// The recipe being asked for (shown to the player after a wrong answer)
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Completed item the player must build
    pub fn target(&self) -> &Item {
        &self.target
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn last_answer_wrong(&self) -> bool {
        self.last_wrong
    }

    /// Compare the full selection with the recipe as multisets and reveal
    fn verify(&mut self) -> bool {
        let is_correct = self.recipe.matches(self.selection.ids());
        self.revealed = true;
        self.last_wrong = !is_correct;
        is_correct
    }
}

/// Result of verifying a full selection
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub is_correct: bool,
    /// Points added to the score (0 when wrong)
    pub points: u32,
    /// The history entry written for this answer
    pub entry: HistoryEntry,
    /// Follow-up armed for when the reveal delay elapses
    pub scheduled: AdvanceAction,
}

/// What a pick did
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// Pick rejected: round revealed, slots full, or not a component
    Ignored,
    /// Pick stored; more picks needed
    Selected,
    /// Second pick stored and the answer verified
    Verified(Verdict),
}

pub struct RoundEngine {
    catalog: Arc<RecipeCatalog>,
    picker: Box<dyn RecipePicker>,
    round: Option<Round>,
    pending: Option<PendingAdvance>,
    /// Questions generated so far
    round_number: u64,
    advance_delay: Duration,
    base_points: u32,
    streak_bonus: u32,
}

impl RoundEngine {
    pub fn new(catalog: Arc<RecipeCatalog>, picker: Box<dyn RecipePicker>, config: &QuizConfig) -> Self {
        Self {
            catalog,
            picker,
            round: None,
            pending: None,
            round_number: 0,
            advance_delay: config.advance_delay(),
            base_points: config.base_points,
            streak_bonus: config.streak_bonus,
        }
    }

    /// Start a new round with a uniformly chosen recipe
    ///
    /// Cancels any armed advance and clears the selection and flags. If no
    /// round can be built the current round and its advance are left alone
    /// and `false` is returned.
    pub fn generate_question(&mut self) -> bool {
        let recipes = self.catalog.recipes();
        if recipes.is_empty() {
            tracing::error!("Catalog has no recipes");
            return false;
        }
        let index = self.picker.pick_index(recipes.len()) % recipes.len();
        let recipe = recipes[index].clone();

        // Validated catalogs always resolve their results
        let Some(target) = self.catalog.item(&recipe.result).cloned() else {
            tracing::error!(result = %recipe.result, "Recipe result missing from catalog");
            return false;
        };

        self.cancel_pending();
        self.round_number += 1;
        tracing::debug!(round = self.round_number, target = %target.id, "New question");

        self.round = Some(Round {
            recipe,
            target,
            selection: Selection::new(),
            revealed: false,
            last_wrong: false,
        });
        true
    }

    /// Add a component to the selection; the second pick verifies the answer
    pub fn pick(
        &mut self,
        component: &str,
        player: &mut PlayerState,
        history: &mut HistoryStore,
        now: Instant,
    ) -> PickOutcome {
        let is_component = self.catalog.item(component).is_some_and(Item::is_component);

        let Some(round) = self.round.as_mut() else {
            return PickOutcome::Ignored;
        };
        if round.revealed || !is_component || !round.selection.push(component) {
            return PickOutcome::Ignored;
        }
        if !round.selection.is_full() {
            return PickOutcome::Selected;
        }

        let is_correct = round.verify();
        let target = round.target.clone();
        PickOutcome::Verified(self.settle(is_correct, target, player, history, now))
    }

    /// Remove the pick in a slot; ignored once revealed
    pub fn unpick(&mut self, slot: usize) -> bool {
        match self.round.as_mut() {
            Some(round) if !round.revealed => round.selection.remove(slot).is_some(),
            _ => false,
        }
    }

    /// Apply a verdict: player stats, history entry, then the armed advance
    fn settle(
        &mut self,
        is_correct: bool,
        target: Item,
        player: &mut PlayerState,
        history: &mut HistoryStore,
        now: Instant,
    ) -> Verdict {
        let (points, scheduled) = if is_correct {
            let points = player.record_correct(self.base_points, self.streak_bonus);
            (points, AdvanceAction::NextQuestion)
        } else {
            player.record_wrong();
            let action = if player.is_out_of_lives() {
                AdvanceAction::EndGame
            } else {
                AdvanceAction::NextQuestion
            };
            (0, action)
        };

        let entry = history.record(target, is_correct, now_millis());

        tracing::info!(
            round = self.round_number,
            target = %entry.target.id,
            correct = is_correct,
            score = player.score,
            streak = player.streak,
            lives = player.lives,
            "Answer verified"
        );

        self.arm(scheduled, now);

        Verdict {
            is_correct,
            points,
            entry,
            scheduled,
        }
    }

    /// Replace any armed advance with a new one
    fn arm(&mut self, action: AdvanceAction, now: Instant) {
        self.cancel_pending();
        self.pending = Some(PendingAdvance::new(action, now, self.advance_delay));
    }

    /// Drop the armed advance, if any; returns whether one was armed
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                tracing::debug!(action = ?pending.action, "Cancelled pending advance");
                true
            }
            None => false,
        }
    }

    /// Fire the armed advance once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<AdvanceAction> {
        if !self.pending.is_some_and(|p| p.is_due(now)) {
            return None;
        }
        let pending = self.pending.take()?;
        self.run(pending)
    }

    /// Fire the armed advance immediately
    ///
    /// No-op unless the round is revealed and an advance is armed.
    pub fn skip(&mut self) -> Option<AdvanceAction> {
        if !self.is_revealed() {
            return None;
        }
        let pending = self.pending.take()?;
        tracing::debug!(action = ?pending.action, "Skipped reveal delay");
        self.run(pending)
    }

    fn run(&mut self, pending: PendingAdvance) -> Option<AdvanceAction> {
        if pending.action == AdvanceAction::NextQuestion && !self.generate_question() {
            // Keep the reveal on screen with its advance still armed
            self.pending = Some(pending);
            return None;
        }
        Some(pending.action)
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn is_revealed(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.revealed)
    }

    /// Recipe behind the current question
    pub fn correct_recipe(&self) -> Option<&Recipe> {
        self.round.as_ref().map(|r| &r.recipe)
    }

    pub fn pending(&self) -> Option<&PendingAdvance> {
        self.pending.as_ref()
    }

    pub fn round_number(&self) -> u64 {
        self.round_number
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }
}
