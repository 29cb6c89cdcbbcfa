//! Core match types: players, state, actions, errors, RNG, configuration.
//!
//! Everything the rules operate on lives here. The rules themselves are in
//! `crate::rules`; storage and the service facade sit on top.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;
pub mod view;

pub use action::{Action, ManipulateAction};
pub use config::{MatchConfig, ScoringCompleteness, BATTLE_AWARD, VICTORY_THRESHOLD};
pub use error::{ConfigError, MatchError};
pub use player::{Participant, PlayerId, Seat, SeatMap};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use state::{
    BattleOutcome, CardLocation, Match, MatchId, MatchResult, Phase, Player, TheaterScore,
};
pub use view::{MatchView, OpponentView, OwnView, VisibleCard};
