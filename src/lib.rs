//! # theater-duel
//!
//! Rules engine for a two-player theater-control card game with hidden
//! information.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: Every operation checks phase, turn owner
//!    and card location before touching state. A rejected operation leaves
//!    the match exactly as it was.
//!
//! 2. **One record per match**: `Match` holds the complete authoritative
//!    state, including face-down card identities. What a participant may
//!    see is derived on demand (`Match::view_for`).
//!
//! 3. **Configuration Over Constants**: Victory threshold, hand size,
//!    battle award and the scoring completeness rule live in `MatchConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Hands, deck, trash and theaters use
//!   `im` vectors, so the store can mutate a draft copy and commit it only
//!   on success.
//!
//! - **Deterministic RNG**: Shuffles and the first-player coin flip draw
//!   from a `RandomSource`. `GameRng` is seedable for reproducible matches.
//!
//! ## Modules
//!
//! - `core`: Players, seats, match state, actions, errors, RNG, configuration
//! - `cards`: The 18-card catalogue, shuffling and dealing
//! - `zones`: Theaters, played cards and theater order
//! - `rules`: The match state machine and battle scoring
//! - `store`: Match storage with atomic per-match updates
//! - `service`: `MatchService`, the entry point for embedders

pub mod cards;
pub mod core;
pub mod rules;
pub mod service;
pub mod store;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, BattleOutcome, CardLocation, ConfigError, GameRng, GameRngState, ManipulateAction,
    Match, MatchConfig, MatchError, MatchId, MatchResult, MatchView, OpponentView, OwnView,
    Participant, Phase, Player, PlayerId, RandomSource, ScoringCompleteness, Seat, SeatMap,
    TheaterScore, VisibleCard, BATTLE_AWARD, VICTORY_THRESHOLD,
};

pub use crate::cards::{Card, CardId, TheaterType, CATALOGUE, HAND_SIZE};

pub use crate::zones::{PlayedCard, Theater, TheaterMap, TheaterOrder};

pub use crate::rules::{withdrawal_payout, MatchRules};

pub use crate::store::{InMemoryMatchStore, MatchStore};

pub use crate::service::MatchService;
