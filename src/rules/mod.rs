//! Match rules.
//!
//! - `engine`: phase and turn gating for every operation
//! - `lifecycle`: creating a match, the next battle, rematches
//! - `scoring`: withdrawal payouts and majority-of-theaters resolution

pub mod engine;
pub mod lifecycle;
pub mod scoring;

pub use engine::MatchRules;
pub use scoring::{is_complete, resolve_battle, withdrawal_payout};
