//! Match configuration.
//!
//! Defaults reproduce the standard rules: 6-card hands, 6 VP for winning a
//! battle on the board, first to 12 VP wins the match. Embedders may load a
//! `MatchConfig` from any serde format; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{CATALOGUE_SIZE, HAND_SIZE};

/// Victory points that end the match.
pub const VICTORY_THRESHOLD: u32 = 12;

/// Victory points for winning a majority of theaters.
pub const BATTLE_AWARD: u32 = 6;

/// When a battle's manual theater scoring counts as complete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringCompleteness {
    /// Both seats have submitted a total for every theater.
    #[default]
    BothSubmitted,
    /// Every theater has at least one non-zero total. A 0-0 theater is
    /// treated as not yet scored, so a genuine 0-0 tie never completes.
    NonZeroTotals,
}

/// Tunable match rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub victory_threshold: u32,
    pub hand_size: usize,
    pub battle_award: u32,
    pub completeness: ScoringCompleteness,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            victory_threshold: VICTORY_THRESHOLD,
            hand_size: HAND_SIZE,
            battle_award: BATTLE_AWARD,
            completeness: ScoringCompleteness::default(),
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_victory_threshold(mut self, threshold: u32) -> Self {
        self.victory_threshold = threshold;
        self
    }

    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    pub fn with_battle_award(mut self, award: u32) -> Self {
        self.battle_award = award;
        self
    }

    pub fn with_completeness(mut self, completeness: ScoringCompleteness) -> Self {
        self.completeness = completeness;
        self
    }

    /// Check the values are playable with the fixed catalogue.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::EmptyHand);
        }
        if self.hand_size > CATALOGUE_SIZE / 2 {
            return Err(ConfigError::HandsExceedCatalogue {
                hand_size: self.hand_size,
                catalogue: CATALOGUE_SIZE,
            });
        }
        if self.victory_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }
}
