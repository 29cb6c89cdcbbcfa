//! Shuffling and dealing.

use crate::core::error::MatchError;
use crate::core::rng::RandomSource;

use super::definition::Card;

/// Cards dealt to each player at the start of a battle.
pub const HAND_SIZE: usize = 6;

/// Shuffle cards in place with the injected source.
pub fn shuffle(cards: &mut [Card], rng: &mut dyn RandomSource) {
    rng.shuffle_cards(cards);
}

/// Return a shuffled copy of `cards`.
#[must_use]
pub fn shuffled(cards: &[Card], rng: &mut dyn RandomSource) -> Vec<Card> {
    let mut out = cards.to_vec();
    shuffle(&mut out, rng);
    out
}

/// Result of splitting a shuffled deck into two hands and a draw pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub first_hand: Vec<Card>,
    pub second_hand: Vec<Card>,
    /// Undealt cards; index 0 is drawn first.
    pub deck: Vec<Card>,
}

/// Split a shuffled deck: first `hand_size` cards to seat one, the next
/// `hand_size` to seat two, the rest stays as the draw pile.
pub fn deal(mut shuffled: Vec<Card>, hand_size: usize) -> Result<Deal, MatchError> {
    if hand_size > shuffled.len() / 2 {
        return Err(MatchError::NotEnoughCards {
            needed: hand_size.saturating_mul(2),
            available: shuffled.len(),
        });
    }

    let deck = shuffled.split_off(hand_size * 2);
    let second_hand = shuffled.split_off(hand_size);

    Ok(Deal {
        first_hand: shuffled,
        second_hand,
        deck,
    })
}
