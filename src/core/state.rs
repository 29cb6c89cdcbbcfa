//! Match state: the root aggregate mutated by the rules.
//!
//! ## Match
//!
//! Complete authoritative state of one match between two participants:
//! - Both players (identity, hand, victory points)
//! - Draw pile, trash, theaters
//! - Phase, turn owner, battle number, first player of the battle
//! - Withdrawal marker and submitted theater totals while scoring
//!
//! Every catalogue card is in exactly one place at all times: a hand, the
//! deck, the trash or a theater. `Match::is_conserved` checks this.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::MatchError;
use super::player::{Participant, PlayerId, Seat, SeatMap};
use crate::cards::{Card, CardId, TheaterType, CATALOGUE};
use crate::zones::{Theater, TheaterMap, TheaterOrder};

/// Match identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Match phase. Determines which operations are legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Room-level state before both participants are present. A `Match`
    /// is only created once both are paired, so it never holds this phase.
    #[serde(rename = "waiting")]
    WaitingForPlayers,
    #[serde(rename = "playing")]
    Playing,
    #[serde(rename = "scoring")]
    Scoring,
    #[serde(rename = "game_over")]
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::WaitingForPlayers => "waiting",
            Phase::Playing => "playing",
            Phase::Scoring => "scoring",
            Phase::GameOver => "game_over",
        };
        f.write_str(name)
    }
}

/// A participant's in-match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cards held but not yet played. Order carries no meaning.
    pub hand: Vector<Card>,
    /// Victory points, carried across battles until a rematch.
    pub score: u32,
}

impl Player {
    #[must_use]
    pub fn new(participant: Participant, hand: Vector<Card>) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            hand,
            score: 0,
        }
    }

    /// Position of a card in the hand.
    #[must_use]
    pub fn hand_position(&self, card: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card)
    }

    #[must_use]
    pub fn holds(&self, card: CardId) -> bool {
        self.hand_position(card).is_some()
    }
}

/// Theater totals submitted by each seat during scoring.
///
/// `None` means the seat has not submitted a total for this theater yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheaterScore {
    pub totals: SeatMap<Option<u32>>,
}

impl TheaterScore {
    /// A score pair with both totals already submitted.
    #[must_use]
    pub fn submitted(one: u32, two: u32) -> Self {
        Self {
            totals: SeatMap::from_pair(Some(one), Some(two)),
        }
    }

    /// Submitted total for a seat, zero if not submitted.
    #[must_use]
    pub fn total(&self, seat: Seat) -> u32 {
        self.totals[seat].unwrap_or(0)
    }

    #[must_use]
    pub fn is_submitted(&self, seat: Seat) -> bool {
        self.totals[seat].is_some()
    }

    /// Seat with the strictly higher total. Ties have no winner.
    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        let (one, two) = (self.total(Seat::One), self.total(Seat::Two));
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Seat::One),
            std::cmp::Ordering::Less => Some(Seat::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// How the current battle concluded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// A player withdrew; the opponent received `awarded` VP.
    Withdrawal {
        withdrew: Seat,
        cards_remaining: usize,
        awarded: u32,
    },
    /// Manual theater scoring completed.
    Scored {
        theaters_won: SeatMap<u8>,
        winner: Option<Seat>,
        awarded: u32,
    },
}

impl BattleOutcome {
    /// Seat that gained victory points from this battle, if any.
    #[must_use]
    pub fn beneficiary(&self) -> Option<Seat> {
        match self {
            BattleOutcome::Withdrawal { withdrew, .. } => Some(withdrew.other()),
            BattleOutcome::Scored { winner, .. } => *winner,
        }
    }

    #[must_use]
    pub fn awarded(&self) -> u32 {
        match self {
            BattleOutcome::Withdrawal { awarded, .. } | BattleOutcome::Scored { awarded, .. } => {
                *awarded
            }
        }
    }
}

/// Result of a concluded match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Winner(Seat),
    Draw,
}

/// Where a card currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardLocation {
    Hand(Seat),
    Deck,
    Trash,
    Theater(TheaterType),
}

/// The root aggregate for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub players: SeatMap<Player>,
    /// Undealt cards; the front is drawn first.
    pub deck: Vector<Card>,
    pub trash: Vector<Card>,
    pub theater_order: TheaterOrder,
    pub theaters: TheaterMap<Theater>,
    pub current_player: Seat,
    pub phase: Phase,
    /// Starts at 1, increments every battle, resets on rematch.
    pub battle_number: u32,
    /// Seat that went first in the current battle.
    pub first_player: Seat,
    pub withdrew: Option<Seat>,
    /// Present only while the battle is being scored manually.
    pub theater_scores: Option<TheaterMap<TheaterScore>>,
    pub outcome: Option<BattleOutcome>,
}

impl Match {
    // === Participants ===

    /// Seat occupied by `player`, if they are a participant.
    #[must_use]
    pub fn seat_of(&self, player: &PlayerId) -> Option<Seat> {
        self.players.iter().find(|(_, p)| &p.id == player).map(|(seat, _)| seat)
    }

    /// Seat occupied by `player`, or `UnknownPlayer`.
    pub fn require_seat(&self, player: &PlayerId) -> Result<Seat, MatchError> {
        self.seat_of(player)
            .ok_or_else(|| MatchError::UnknownPlayer(player.clone()))
    }

    #[must_use]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat]
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat]
    }

    #[must_use]
    pub fn current_player_id(&self) -> &PlayerId {
        &self.players[self.current_player].id
    }

    #[must_use]
    pub fn first_player_id(&self) -> &PlayerId {
        &self.players[self.first_player].id
    }

    #[must_use]
    pub fn withdrew_player_id(&self) -> Option<&PlayerId> {
        self.withdrew.map(|seat| &self.players[seat].id)
    }

    #[must_use]
    pub fn score(&self, seat: Seat) -> u32 {
        self.players[seat].score
    }

    // === Progress ===

    /// Both hands are empty.
    #[must_use]
    pub fn hands_empty(&self) -> bool {
        self.players.iter().all(|(_, p)| p.hand.is_empty())
    }

    /// Either score has reached `threshold`.
    #[must_use]
    pub fn threshold_reached(&self, threshold: u32) -> bool {
        self.players.iter().any(|(_, p)| p.score >= threshold)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Winner of a concluded match. `None` while the match is still running.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        if !self.is_over() {
            return None;
        }
        let (one, two) = (self.score(Seat::One), self.score(Seat::Two));
        Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => MatchResult::Winner(Seat::One),
            std::cmp::Ordering::Less => MatchResult::Winner(Seat::Two),
            std::cmp::Ordering::Equal => MatchResult::Draw,
        })
    }

    // === Card accounting ===

    /// Every card in the match with its location.
    #[must_use]
    pub fn card_census(&self) -> Vec<(CardId, CardLocation)> {
        let mut census = Vec::with_capacity(CATALOGUE.len());
        for (seat, player) in self.players.iter() {
            census.extend(player.hand.iter().map(|c| (c.id, CardLocation::Hand(seat))));
        }
        census.extend(self.deck.iter().map(|c| (c.id, CardLocation::Deck)));
        census.extend(self.trash.iter().map(|c| (c.id, CardLocation::Trash)));
        for (kind, theater) in self.theaters.iter() {
            census.extend(
                theater
                    .cards()
                    .iter()
                    .map(|pc| (pc.card.id, CardLocation::Theater(kind))),
            );
        }
        census
    }

    /// Where a card currently is.
    #[must_use]
    pub fn locate(&self, card: CardId) -> Option<CardLocation> {
        self.card_census()
            .into_iter()
            .find(|(id, _)| *id == card)
            .map(|(_, location)| location)
    }

    /// Every catalogue card appears exactly once.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        let mut ids: Vec<CardId> = self.card_census().into_iter().map(|(id, _)| id).collect();
        ids.sort();
        ids.len() == CATALOGUE.len() && ids.iter().zip(CATALOGUE.iter()).all(|(id, c)| *id == c.id)
    }
}
