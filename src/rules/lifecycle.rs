//! Match lifecycle: creation, the next battle and rematches.
//!
//! Every battle starts from a freshly shuffled full catalogue. Cards from
//! the previous battle's theaters and trash are not carried forward.

use im::Vector;
use tracing::info;

use crate::cards::{all_cards, deal, shuffled, Deal};
use crate::core::error::MatchError;
use crate::core::player::{Participant, Seat, SeatMap};
use crate::core::rng::RandomSource;
use crate::core::state::{Match, MatchId, Phase, Player};
use crate::zones::{Theater, TheaterMap, TheaterOrder};

use super::engine::{require_phase, MatchRules};

impl MatchRules {
    /// Pair two participants into a fresh match.
    ///
    /// The first player is a coin flip, taken before the shuffle.
    pub fn new_match(
        &self,
        id: MatchId,
        one: Participant,
        two: Participant,
        rng: &mut dyn RandomSource,
    ) -> Result<Match, MatchError> {
        if one.id == two.id {
            return Err(MatchError::DuplicateParticipant(one.id));
        }

        let first_player = if rng.coin_flip() { Seat::Two } else { Seat::One };
        let Deal {
            first_hand,
            second_hand,
            deck,
        } = self.fresh_deal(rng)?;

        let m = Match {
            id,
            players: SeatMap::from_pair(
                Player::new(one, first_hand.into_iter().collect()),
                Player::new(two, second_hand.into_iter().collect()),
            ),
            deck: deck.into_iter().collect(),
            trash: Vector::new(),
            theater_order: TheaterOrder::canonical(),
            theaters: TheaterMap::new(Theater::new),
            current_player: first_player,
            phase: Phase::Playing,
            battle_number: 1,
            first_player,
            withdrew: None,
            theater_scores: None,
            outcome: None,
        };

        info!(
            match_id = %m.id,
            first_player = %m.first_player_id(),
            "Match created"
        );
        Ok(m)
    }

    /// Scoring -> Playing. Scores carry over.
    pub fn start_next_battle(
        &self,
        m: &mut Match,
        rng: &mut dyn RandomSource,
    ) -> Result<(), MatchError> {
        if m.phase == Phase::GameOver {
            return Err(MatchError::MatchOver);
        }
        require_phase(m, "start next battle", Phase::Scoring)?;

        let dealt = self.fresh_deal(rng)?;
        m.theater_order = m.theater_order.rotated();
        m.battle_number += 1;
        let next_first = m.first_player.other();
        reset_battle(m, next_first, dealt);

        info!(
            match_id = %m.id,
            battle = m.battle_number,
            first_player = %m.first_player_id(),
            "Next battle started"
        );
        Ok(())
    }

    /// GameOver -> Playing with both scores reset.
    pub fn start_next_game(
        &self,
        m: &mut Match,
        rng: &mut dyn RandomSource,
    ) -> Result<(), MatchError> {
        require_phase(m, "start next game", Phase::GameOver)?;

        let dealt = self.fresh_deal(rng)?;
        for seat in Seat::BOTH {
            m.player_mut(seat).score = 0;
        }
        m.theater_order = TheaterOrder::canonical();
        m.battle_number = 1;
        let next_first = m.first_player.other();
        reset_battle(m, next_first, dealt);

        info!(
            match_id = %m.id,
            first_player = %m.first_player_id(),
            "Rematch started"
        );
        Ok(())
    }

    fn fresh_deal(&self, rng: &mut dyn RandomSource) -> Result<Deal, MatchError> {
        deal(shuffled(&all_cards(), rng), self.config().hand_size)
    }
}

/// Clear battle-scoped state and install a new deal.
fn reset_battle(m: &mut Match, first_player: Seat, dealt: Deal) {
    m.players[Seat::One].hand = dealt.first_hand.into_iter().collect();
    m.players[Seat::Two].hand = dealt.second_hand.into_iter().collect();
    m.deck = dealt.deck.into_iter().collect();
    m.trash = Vector::new();
    m.theaters = TheaterMap::new(Theater::new);
    m.first_player = first_player;
    m.current_player = first_player;
    m.phase = Phase::Playing;
    m.withdrew = None;
    m.theater_scores = None;
    m.outcome = None;
}
