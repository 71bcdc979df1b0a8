//! Quiz configuration with documented constants
//!
//! All tuning numbers are collected here. Every field has a default, so a
//! TOML override file only needs to name the values it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};

/// Configuration for the round engine, history store and analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    // === PLAYER ===
    /// Lives at the start of every game
    pub starting_lives: u32,

    /// Points for a correct answer before the streak bonus
    pub base_points: u32,

    /// Extra points per answer already in the streak
    ///
    /// A correct answer scores `base_points + streak_bonus * streak_before`,
    /// so the default sequence for a fresh streak is 100, 210, 330, ...
    pub streak_bonus: u32,

    // === ROUND TIMING ===
    /// Delay between reveal and the automatic follow-up action (ms)
    ///
    /// Applies to both the next question and the end-screen transition.
    pub advance_delay_ms: u64,

    /// Artificial latency of the coach collaborator (ms)
    pub coach_latency_ms: u64,

    // === HISTORY ===
    /// Maximum entries kept in the all-time log
    pub history_cap: usize,

    /// Storage slot holding the persisted all-time log
    pub storage_key: String,

    // === TREND ===
    /// Trailing window for the moving-average accuracy
    pub trend_window: usize,

    /// Most recent entries considered for the trend chart
    pub trend_cap: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            base_points: 100,
            streak_bonus: 10,

            advance_delay_ms: 5000,
            coach_latency_ms: 400,

            history_cap: 500,
            storage_key: "forge_quiz_history".into(),

            trend_window: 5,
            trend_cap: 50,
        }
    }
}

impl QuizConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn coach_latency(&self) -> Duration {
        Duration::from_millis(self.coach_latency_ms)
    }

    /// Load overrides from a TOML file and validate the result
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse overrides from a TOML string and validate the result
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: QuizConfig = toml::from_str(content)?;
        config.validate().map_err(ForgeError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.starting_lives == 0 {
            return Err("starting_lives must be at least 1".into());
        }

        if self.history_cap == 0 {
            return Err("history_cap must be at least 1".into());
        }

        if self.trend_window == 0 {
            return Err("trend_window must be at least 1".into());
        }

        // A window wider than the chart would never slide
        if self.trend_window > self.trend_cap {
            return Err(format!(
                "trend_window ({}) should be <= trend_cap ({})",
                self.trend_window, self.trend_cap
            ));
        }

        if self.storage_key.trim().is_empty() {
            return Err("storage_key must not be empty".into());
        }

        Ok(())
    }
}
