//! Per-player view of a match.
//!
//! The authoritative `Match` always holds true card values. A `MatchView`
//! is what one participant may see: their own hand, the opponent's hand
//! size, and the identity of face-down cards only when they own them.
//! The opponent's submitted theater totals stay hidden until the battle
//! outcome is recorded.

use serde::{Deserialize, Serialize};

use super::error::MatchError;
use super::player::{PlayerId, Seat};
use super::state::{BattleOutcome, Match, MatchId, Phase, TheaterScore};
use crate::cards::Card;
use crate::zones::{TheaterMap, TheaterOrder};

/// A played card as seen by the viewer. `card` is `None` when hidden.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleCard {
    pub card: Option<Card>,
    pub face_up: bool,
    pub owner: PlayerId,
}

/// The viewer's own player state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnView {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub score: u32,
}

/// What the viewer knows about the opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub score: u32,
}

/// A match as one participant sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub phase: Phase,
    pub battle_number: u32,
    pub theater_order: TheaterOrder,
    pub you: OwnView,
    pub opponent: OpponentView,
    pub deck_size: usize,
    pub trash: Vec<Card>,
    pub theaters: TheaterMap<Vec<VisibleCard>>,
    pub current_player: PlayerId,
    pub first_player: PlayerId,
    pub withdrew: Option<PlayerId>,
    pub theater_scores: Option<TheaterMap<TheaterScore>>,
    pub outcome: Option<BattleOutcome>,
}

impl MatchView {
    #[must_use]
    pub fn is_your_turn(&self) -> bool {
        self.current_player == self.you.id
    }
}

impl Match {
    /// Build the view for one participant.
    pub fn view_for(&self, viewer: &PlayerId) -> Result<MatchView, MatchError> {
        let seat = self.require_seat(viewer)?;
        let own = self.player(seat);
        let opponent = self.player(seat.other());

        let theaters = TheaterMap::new(|kind| {
            self.theaters[kind]
                .cards()
                .iter()
                .map(|pc| VisibleCard {
                    card: (pc.face_up || &pc.owner == viewer).then_some(pc.card),
                    face_up: pc.face_up,
                    owner: pc.owner.clone(),
                })
                .collect()
        });

        Ok(MatchView {
            id: self.id.clone(),
            phase: self.phase,
            battle_number: self.battle_number,
            theater_order: self.theater_order,
            you: OwnView {
                id: own.id.clone(),
                name: own.name.clone(),
                hand: own.hand.iter().copied().collect(),
                score: own.score,
            },
            opponent: OpponentView {
                id: opponent.id.clone(),
                name: opponent.name.clone(),
                hand_size: opponent.hand.len(),
                score: opponent.score,
            },
            deck_size: self.deck.len(),
            trash: self.trash.iter().copied().collect(),
            theaters,
            current_player: self.current_player_id().clone(),
            first_player: self.first_player_id().clone(),
            withdrew: self.withdrew_player_id().cloned(),
            theater_scores: self.visible_scores(seat),
            outcome: self.outcome.clone(),
        })
    }

    fn visible_scores(&self, viewer: Seat) -> Option<TheaterMap<TheaterScore>> {
        let scores = self.theater_scores.as_ref()?;
        if self.outcome.is_some() {
            return Some(scores.clone());
        }
        Some(TheaterMap::new(|kind| {
            let mut score = scores[kind].clone();
            score.totals[viewer.other()] = None;
            score
        }))
    }

    /// Views for both seats.
    pub fn views(&self) -> Result<[MatchView; 2], MatchError> {
        Ok([
            self.view_for(&self.player(Seat::One).id)?,
            self.view_for(&self.player(Seat::Two).id)?,
        ])
    }
}
