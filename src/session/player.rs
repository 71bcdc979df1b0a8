//! Per-game player statistics

use crate::core::config::QuizConfig;

/// Score, streak and lives for the game in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub score: u32,
    /// Consecutive correct answers
    pub streak: u32,
    /// Longest streak seen this game
    pub best_streak: u32,
    pub lives: u32,
}

impl PlayerState {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            streak: 0,
            best_streak: 0,
            lives: starting_lives,
        }
    }

    pub fn from_config(config: &QuizConfig) -> Self {
        Self::new(config.starting_lives)
    }

    /// Apply a correct answer; returns the points awarded
    ///
    /// The bonus uses the streak before this answer.
    pub fn record_correct(&mut self, base_points: u32, streak_bonus: u32) -> u32 {
        let points = base_points.saturating_add(streak_bonus.saturating_mul(self.streak));
        self.score = self.score.saturating_add(points);
        self.streak = self.streak.saturating_add(1);
        self.best_streak = self.best_streak.max(self.streak);
        points
    }

    /// Apply a wrong answer: streak resets, one life lost (floored at zero)
    pub fn record_wrong(&mut self) {
        self.streak = 0;
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::from_config(&QuizConfig::default())
    }
}
