//! Error types surfaced by match operations.
//!
//! Every failed operation leaves the match record unchanged.

use thiserror::Error;

use super::player::PlayerId;
use super::state::{MatchId, Phase};
use crate::cards::{CardId, TheaterType};

/// Invalid `MatchConfig` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("hand size must be at least 1")]
    EmptyHand,

    #[error("two hands of {hand_size} do not fit in a catalogue of {catalogue} cards")]
    HandsExceedCatalogue { hand_size: usize, catalogue: usize },

    #[error("victory threshold must be at least 1")]
    ZeroThreshold,
}

/// Failure of a single match operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("match not found: {0}")]
    NotFound(MatchId),

    #[error("{operation} is not allowed during phase {phase}")]
    InvalidState { operation: &'static str, phase: Phase },

    #[error("not your turn: {0}")]
    NotYourTurn(PlayerId),

    #[error("player {0} is not part of this match")]
    UnknownPlayer(PlayerId),

    #[error("{card} is not in the hand of {player}")]
    CardNotInHand { player: PlayerId, card: CardId },

    #[error("no cards in the {0} theater")]
    EmptyTheater(TheaterType),

    #[error("{card} is not in the {theater} theater")]
    CardNotInTheater { theater: TheaterType, card: CardId },

    #[error("{card} is not the top of its owner's stack in the {theater} theater")]
    NotTopOfStack { theater: TheaterType, card: CardId },

    #[error("no cards left in the deck")]
    DeckEmpty,

    #[error("invalid manipulate action: {0:?}")]
    InvalidAction(String),

    #[error("the match is over")]
    MatchOver,

    #[error("need {needed} cards to deal, only {available} available")]
    NotEnoughCards { needed: usize, available: usize },

    #[error("both participants use the identifier {0}")]
    DuplicateParticipant(PlayerId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MatchError {
    pub(crate) fn invalid_state(operation: &'static str, phase: Phase) -> Self {
        Self::InvalidState { operation, phase }
    }
}
