//! Theaters: the three shared zones cards are played into.
//!
//! Each theater keeps its played cards in play order. Both players stack
//! into the same sequence, so "top of stack" is always asked per owner:
//! the most recently played card that belongs to a given player.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::{Card, CardId, TheaterType};
use crate::core::error::MatchError;
use crate::core::player::PlayerId;

/// A card placed into a theater.
///
/// Face-down cards keep their true identity here; hiding them is a
/// presentation concern (see `MatchView`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card: Card,
    pub face_up: bool,
    pub owner: PlayerId,
}

impl PlayedCard {
    #[must_use]
    pub fn new(card: Card, face_up: bool, owner: PlayerId) -> Self {
        Self { card, face_up, owner }
    }
}

/// One theater and its played cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theater {
    pub kind: TheaterType,
    cards: Vector<PlayedCard>,
}

impl Theater {
    /// Create an empty theater.
    #[must_use]
    pub fn new(kind: TheaterType) -> Self {
        Self {
            kind,
            cards: Vector::new(),
        }
    }

    /// Played cards, oldest first.
    #[must_use]
    pub fn cards(&self) -> &Vector<PlayedCard> {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Most recently played card, regardless of owner.
    #[must_use]
    pub fn top(&self) -> Option<&PlayedCard> {
        self.cards.back()
    }

    /// Most recently played card belonging to `owner`.
    #[must_use]
    pub fn top_of(&self, owner: &PlayerId) -> Option<&PlayedCard> {
        self.cards.iter().rev().find(|pc| &pc.owner == owner)
    }

    /// Place a card on top of the theater.
    pub fn push(&mut self, played: PlayedCard) {
        self.cards.push_back(played);
    }

    /// Resolve a manipulation target to its index.
    ///
    /// With `card` set, the card must be the top of its owner's stack: no
    /// later card in this theater may belong to the same owner. Without
    /// `card`, the target is the most recently played card.
    pub fn resolve_target(&self, card: Option<CardId>) -> Result<usize, MatchError> {
        if self.cards.is_empty() {
            return Err(MatchError::EmptyTheater(self.kind));
        }

        let Some(card_id) = card else {
            return Ok(self.cards.len() - 1);
        };

        let index = (0..self.cards.len())
            .rev()
            .find(|&i| self.cards[i].card.id == card_id)
            .ok_or(MatchError::CardNotInTheater {
                theater: self.kind,
                card: card_id,
            })?;

        let owner = &self.cards[index].owner;
        let covered = (index + 1..self.cards.len()).any(|i| &self.cards[i].owner == owner);
        if covered {
            return Err(MatchError::NotTopOfStack {
                theater: self.kind,
                card: card_id,
            });
        }

        Ok(index)
    }

    /// Toggle orientation of the card at `index`.
    pub(crate) fn flip(&mut self, index: usize) {
        if let Some(played) = self.cards.get_mut(index) {
            played.face_up = !played.face_up;
        }
    }

    /// Remove and return the card at `index`.
    pub(crate) fn remove(&mut self, index: usize) -> PlayedCard {
        self.cards.remove(index)
    }

    /// Sum of `owner`'s face-up strengths in this theater.
    #[must_use]
    pub fn face_up_strength(&self, owner: &PlayerId) -> u32 {
        self.cards
            .iter()
            .filter(|pc| pc.face_up && &pc.owner == owner)
            .map(|pc| u32::from(pc.card.strength))
            .sum()
    }
}

/// Per-theater data storage indexed by `TheaterType`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TheaterMap<T> {
    data: [T; 3],
}

impl<T> TheaterMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(TheaterType) -> T) -> Self {
        Self {
            data: TheaterType::ALL.map(factory),
        }
    }

    #[must_use]
    pub fn get(&self, theater: TheaterType) -> &T {
        &self.data[theater.index()]
    }

    pub fn get_mut(&mut self, theater: TheaterType) -> &mut T {
        &mut self.data[theater.index()]
    }

    /// Iterate in canonical theater order.
    pub fn iter(&self) -> impl Iterator<Item = (TheaterType, &T)> {
        TheaterType::ALL.into_iter().zip(self.data.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Default> Default for TheaterMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<TheaterType> for TheaterMap<T> {
    type Output = T;

    fn index(&self, theater: TheaterType) -> &Self::Output {
        self.get(theater)
    }
}

impl<T> IndexMut<TheaterType> for TheaterMap<T> {
    fn index_mut(&mut self, theater: TheaterType) -> &mut Self::Output {
        self.get_mut(theater)
    }
}

/// Display sequence of the three theaters.
///
/// Rotates between battles; it never affects legality or scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TheaterOrder([TheaterType; 3]);

impl TheaterOrder {
    /// Air, Land, Sea.
    #[must_use]
    pub const fn canonical() -> Self {
        Self(TheaterType::ALL)
    }

    /// Move the last theater to the front.
    #[must_use]
    pub fn rotated(self) -> Self {
        let mut order = self.0;
        order.rotate_right(1);
        Self(order)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TheaterType] {
        &self.0
    }
}

impl Default for TheaterOrder {
    fn default() -> Self {
        Self::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card;

    fn played(id: u8, owner: &str) -> PlayedCard {
        PlayedCard::new(card(CardId::new(id)).unwrap(), true, PlayerId::new(owner))
    }

    fn land_with(cards: &[(u8, &str)]) -> Theater {
        let mut theater = Theater::new(TheaterType::Land);
        for &(id, owner) in cards {
            theater.push(played(id, owner));
        }
        theater
    }

    #[test]
    fn test_empty_theater_has_no_target() {
        let theater = Theater::new(TheaterType::Air);
        assert_eq!(
            theater.resolve_target(None),
            Err(MatchError::EmptyTheater(TheaterType::Air))
        );
        assert_eq!(
            theater.resolve_target(Some(CardId::new(1))),
            Err(MatchError::EmptyTheater(TheaterType::Air))
        );
    }

    #[test]
    fn test_implicit_target_is_last_played() {
        let theater = land_with(&[(7, "a"), (8, "b"), (9, "a")]);
        assert_eq!(theater.resolve_target(None), Ok(2));
        assert_eq!(theater.top().map(|pc| pc.card.id), Some(CardId::new(9)));
    }

    #[test]
    fn test_top_of_owner_stack() {
        // a:7, b:8, a:9, b:10 -> a's top is 9, b's top is 10
        let theater = land_with(&[(7, "a"), (8, "b"), (9, "a"), (10, "b")]);

        assert_eq!(theater.resolve_target(Some(CardId::new(9))), Ok(2));
        assert_eq!(theater.resolve_target(Some(CardId::new(10))), Ok(3));
        assert_eq!(
            theater.resolve_target(Some(CardId::new(7))),
            Err(MatchError::NotTopOfStack {
                theater: TheaterType::Land,
                card: CardId::new(7),
            })
        );
        assert_eq!(
            theater.resolve_target(Some(CardId::new(8))),
            Err(MatchError::NotTopOfStack {
                theater: TheaterType::Land,
                card: CardId::new(8),
            })
        );
        assert_eq!(theater.top_of(&PlayerId::new("a")).map(|pc| pc.card.id), Some(CardId::new(9)));
    }

    #[test]
    fn test_covered_only_by_opponent_is_still_top() {
        let theater = land_with(&[(7, "a"), (8, "b"), (10, "b")]);
        assert_eq!(theater.resolve_target(Some(CardId::new(7))), Ok(0));
    }

    #[test]
    fn test_unknown_card_in_theater() {
        let theater = land_with(&[(7, "a")]);
        assert_eq!(
            theater.resolve_target(Some(CardId::new(3))),
            Err(MatchError::CardNotInTheater {
                theater: TheaterType::Land,
                card: CardId::new(3),
            })
        );
    }

    #[test]
    fn test_flip_and_remove() {
        let mut theater = land_with(&[(7, "a"), (8, "b")]);
        theater.flip(0);
        assert!(!theater.cards()[0].face_up);
        theater.flip(0);
        assert!(theater.cards()[0].face_up);

        let removed = theater.remove(0);
        assert_eq!(removed.card.id, CardId::new(7));
        assert_eq!(theater.len(), 1);
    }

    #[test]
    fn test_face_up_strength() {
        let mut theater = land_with(&[(11, "a"), (8, "b"), (12, "a")]);
        assert_eq!(theater.face_up_strength(&PlayerId::new("a")), 11);
        theater.flip(2);
        assert_eq!(theater.face_up_strength(&PlayerId::new("a")), 5);
        assert_eq!(theater.face_up_strength(&PlayerId::new("b")), 2);
    }

    #[test]
    fn test_theater_order_rotation() {
        let order = TheaterOrder::canonical();
        assert_eq!(order.as_slice(), &[TheaterType::Air, TheaterType::Land, TheaterType::Sea]);

        let once = order.rotated();
        assert_eq!(once.as_slice(), &[TheaterType::Sea, TheaterType::Air, TheaterType::Land]);

        assert_eq!(once.rotated().rotated(), order);
    }

    #[test]
    fn test_theater_map_indexing() {
        let mut map: TheaterMap<u32> = TheaterMap::default();
        map[TheaterType::Sea] = 4;
        assert_eq!(map[TheaterType::Sea], 4);
        assert_eq!(map[TheaterType::Air], 0);

        let kinds: Vec<_> = TheaterMap::new(Theater::new)
            .iter()
            .map(|(t, th)| (t, th.kind))
            .collect();
        assert!(kinds.iter().all(|(t, k)| t == k));
    }
}
