//! Card model: catalogue, identifiers, shuffling and dealing.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for catalogue cards (1..=18)
//! - `TheaterType`: Air, Land or Sea
//! - `Card`: Immutable catalogue entry
//! - `Deal`: Two hands plus the remaining draw pile
//!
//! This module does not depend on the match state machine.

pub mod deck;
pub mod definition;
pub mod registry;

pub use deck::{deal, shuffle, shuffled, Deal, HAND_SIZE};
pub use definition::{Card, CardId, TheaterType};
pub use registry::{all_cards, card, CATALOGUE, CATALOGUE_SIZE};
