//! Action representation: one variant per match operation.
//!
//! An external transport can decode requests into `Action` values and hand
//! them to `MatchService::apply`, which dispatches to the matching rule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::error::MatchError;
use super::player::PlayerId;
use crate::cards::{CardId, TheaterType};

/// What to do with a card already played into a theater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManipulateAction {
    /// Toggle face-up / face-down in place.
    Flip,
    /// Move the card to the trash.
    Destroy,
    /// Move the card back to its owner's hand.
    Return,
}

impl ManipulateAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ManipulateAction::Flip => "flip",
            ManipulateAction::Destroy => "destroy",
            ManipulateAction::Return => "return",
        }
    }
}

impl std::fmt::Display for ManipulateAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManipulateAction {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flip" => Ok(ManipulateAction::Flip),
            "destroy" => Ok(ManipulateAction::Destroy),
            "return" => Ok(ManipulateAction::Return),
            _ => Err(MatchError::InvalidAction(s.to_string())),
        }
    }
}

/// A complete match operation with its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    PlayCard {
        player: PlayerId,
        card: CardId,
        theater: TheaterType,
        face_up: bool,
    },
    EndTurn {
        player: PlayerId,
    },
    DrawCard {
        player: PlayerId,
    },
    ManipulateCard {
        player: PlayerId,
        theater: TheaterType,
        /// `None` targets the most recently played card in the theater.
        card: Option<CardId>,
        action: ManipulateAction,
    },
    DestroyCard {
        player: PlayerId,
        card: CardId,
    },
    Withdraw {
        player: PlayerId,
    },
    /// Totals keyed by theater. Theaters left out keep any earlier value.
    UpdateTheaterScores {
        player: PlayerId,
        scores: BTreeMap<TheaterType, u32>,
    },
    StartNextBattle,
    StartNextGame,
}

impl Action {
    /// Operation name used in logs and `InvalidState` errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::PlayCard { .. } => "play card",
            Action::EndTurn { .. } => "end turn",
            Action::DrawCard { .. } => "draw card",
            Action::ManipulateCard { .. } => "manipulate card",
            Action::DestroyCard { .. } => "destroy card",
            Action::Withdraw { .. } => "withdraw",
            Action::UpdateTheaterScores { .. } => "update theater scores",
            Action::StartNextBattle => "start next battle",
            Action::StartNextGame => "start next game",
        }
    }

    /// The acting player, for player actions.
    #[must_use]
    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            Action::PlayCard { player, .. }
            | Action::EndTurn { player }
            | Action::DrawCard { player }
            | Action::ManipulateCard { player, .. }
            | Action::DestroyCard { player, .. }
            | Action::Withdraw { player }
            | Action::UpdateTheaterScores { player, .. } => Some(player),
            Action::StartNextBattle | Action::StartNextGame => None,
        }
    }
}
