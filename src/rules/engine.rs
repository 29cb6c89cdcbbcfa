//! The match state machine.
//!
//! `MatchRules` validates each operation against the phase and turn owner,
//! then mutates the match. Every check runs before the first mutation, so
//! a rejected operation leaves the match untouched.
//!
//! | From     | Trigger                          | To                    |
//! |----------|----------------------------------|-----------------------|
//! | Playing  | both hands empty after play/destroy | Scoring            |
//! | Playing  | withdraw                         | Scoring or GameOver   |
//! | Scoring  | theater totals complete          | Scoring or GameOver   |
//! | Scoring  | start next battle                | Playing               |
//! | GameOver | start next game                  | Playing               |

use std::collections::BTreeMap;

use tracing::info;

use crate::cards::{CardId, TheaterType};
use crate::core::action::{Action, ManipulateAction};
use crate::core::config::MatchConfig;
use crate::core::error::MatchError;
use crate::core::player::{PlayerId, Seat};
use crate::core::rng::RandomSource;
use crate::core::state::{BattleOutcome, Match, Phase};
use crate::zones::{PlayedCard, TheaterMap};

use super::scoring::{is_complete, resolve_battle, withdrawal_payout};

/// Rules engine for one configuration of the game.
#[derive(Clone, Debug, Default)]
pub struct MatchRules {
    config: MatchConfig,
}

impl MatchRules {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Apply any action. Lifecycle actions draw on `rng` for the new deal.
    pub fn apply(
        &self,
        m: &mut Match,
        action: &Action,
        rng: &mut dyn RandomSource,
    ) -> Result<(), MatchError> {
        match action {
            Action::PlayCard {
                player,
                card,
                theater,
                face_up,
            } => self.play_card(m, player, *card, *theater, *face_up),
            Action::EndTurn { player } => self.end_turn(m, player),
            Action::DrawCard { player } => self.draw_card(m, player),
            Action::ManipulateCard {
                player,
                theater,
                card,
                action,
            } => self.manipulate_card(m, player, *theater, *card, *action),
            Action::DestroyCard { player, card } => self.destroy_card(m, player, *card),
            Action::Withdraw { player } => self.withdraw(m, player),
            Action::UpdateTheaterScores { player, scores } => {
                self.update_theater_scores(m, player, scores)
            }
            Action::StartNextBattle => self.start_next_battle(m, rng),
            Action::StartNextGame => self.start_next_game(m, rng),
        }
    }

    // === Turn actions ===

    /// Play a card from hand into a theater. Does not end the turn.
    pub fn play_card(
        &self,
        m: &mut Match,
        player: &PlayerId,
        card: CardId,
        theater: TheaterType,
        face_up: bool,
    ) -> Result<(), MatchError> {
        let seat = require_turn(m, "play card", player)?;
        let index = require_in_hand(m, seat, card)?;

        let card = m.player_mut(seat).hand.remove(index);
        m.theaters[theater].push(PlayedCard::new(card, face_up, player.clone()));

        self.check_battle_end(m);
        Ok(())
    }

    /// Pass the turn to the other participant.
    pub fn end_turn(&self, m: &mut Match, player: &PlayerId) -> Result<(), MatchError> {
        let seat = require_turn(m, "end turn", player)?;
        m.current_player = seat.other();
        Ok(())
    }

    /// Move the front card of the deck into the player's hand.
    pub fn draw_card(&self, m: &mut Match, player: &PlayerId) -> Result<(), MatchError> {
        let seat = require_turn(m, "draw card", player)?;
        let card = m.deck.pop_front().ok_or(MatchError::DeckEmpty)?;
        m.player_mut(seat).hand.push_back(card);
        Ok(())
    }

    /// Flip, destroy or return a played card.
    ///
    /// With `card` set the target must be the top of its owner's stack in
    /// that theater; without it the most recently played card is targeted.
    pub fn manipulate_card(
        &self,
        m: &mut Match,
        player: &PlayerId,
        theater: TheaterType,
        card: Option<CardId>,
        action: ManipulateAction,
    ) -> Result<(), MatchError> {
        require_turn(m, "manipulate card", player)?;
        let index = m.theaters[theater].resolve_target(card)?;

        match action {
            ManipulateAction::Flip => m.theaters[theater].flip(index),
            ManipulateAction::Destroy => {
                let played = m.theaters[theater].remove(index);
                m.trash.push_back(played.card);
            }
            ManipulateAction::Return => {
                let owner = m.require_seat(&m.theaters[theater].cards()[index].owner)?;
                let played = m.theaters[theater].remove(index);
                m.player_mut(owner).hand.push_back(played.card);
            }
        }
        Ok(())
    }

    /// Discard a card straight from hand to the trash.
    pub fn destroy_card(
        &self,
        m: &mut Match,
        player: &PlayerId,
        card: CardId,
    ) -> Result<(), MatchError> {
        let seat = require_turn(m, "destroy card", player)?;
        let index = require_in_hand(m, seat, card)?;

        let card = m.player_mut(seat).hand.remove(index);
        m.trash.push_back(card);

        self.check_battle_end(m);
        Ok(())
    }

    // === Battle conclusion ===

    /// Concede the current battle. The opponent is paid from the
    /// withdrawal table. Either participant may withdraw at any point of
    /// the battle, not only on their turn.
    pub fn withdraw(&self, m: &mut Match, player: &PlayerId) -> Result<(), MatchError> {
        require_phase(m, "withdraw", Phase::Playing)?;
        let seat = m.require_seat(player)?;

        let cards_remaining = m.player(seat).hand.len();
        let awarded = withdrawal_payout(seat == m.first_player, cards_remaining);

        m.withdrew = Some(seat);
        m.phase = Phase::Scoring;
        m.player_mut(seat.other()).score += awarded;
        m.outcome = Some(BattleOutcome::Withdrawal {
            withdrew: seat,
            cards_remaining,
            awarded,
        });

        info!(
            match_id = %m.id,
            battle = m.battle_number,
            withdrew = %player,
            cards_remaining,
            awarded,
            "Player withdrew from battle"
        );

        self.check_match_end(m);
        Ok(())
    }

    /// Record one player's theater totals.
    ///
    /// Once the totals are complete the battle is resolved and the winner,
    /// if any, receives the battle award. After a withdrawal, or once the
    /// battle is resolved, further submissions are accepted and ignored.
    pub fn update_theater_scores(
        &self,
        m: &mut Match,
        player: &PlayerId,
        scores: &BTreeMap<TheaterType, u32>,
    ) -> Result<(), MatchError> {
        require_phase(m, "update theater scores", Phase::Scoring)?;
        let seat = m.require_seat(player)?;

        if m.withdrew.is_some() || m.outcome.is_some() {
            return Ok(());
        }

        let totals = m.theater_scores.get_or_insert_with(TheaterMap::default);
        for (&theater, &total) in scores {
            totals[theater].totals[seat] = Some(total);
        }

        if !is_complete(totals, self.config.completeness) {
            return Ok(());
        }

        let outcome = resolve_battle(totals, self.config.battle_award);
        if let Some(winner) = outcome.beneficiary() {
            m.player_mut(winner).score += outcome.awarded();
        }

        info!(
            match_id = %m.id,
            battle = m.battle_number,
            winner = ?outcome.beneficiary(),
            awarded = outcome.awarded(),
            "Battle scored"
        );

        m.outcome = Some(outcome);
        self.check_match_end(m);
        Ok(())
    }

    /// Playing -> Scoring once both hands are empty.
    fn check_battle_end(&self, m: &mut Match) {
        if m.phase == Phase::Playing && m.hands_empty() {
            m.phase = Phase::Scoring;
            m.theater_scores = Some(TheaterMap::default());
            info!(match_id = %m.id, battle = m.battle_number, "All cards played, scoring battle");
        }
    }

    /// Scoring -> GameOver once either score reaches the threshold.
    fn check_match_end(&self, m: &mut Match) {
        if m.threshold_reached(self.config.victory_threshold) {
            m.phase = Phase::GameOver;
            info!(
                match_id = %m.id,
                scores = ?(m.score(Seat::One), m.score(Seat::Two)),
                "Match over"
            );
        }
    }
}

pub(super) fn require_phase(
    m: &Match,
    operation: &'static str,
    phase: Phase,
) -> Result<(), MatchError> {
    if m.phase != phase {
        return Err(MatchError::invalid_state(operation, m.phase));
    }
    Ok(())
}

/// Phase must be Playing and `player` must hold the turn.
fn require_turn(m: &Match, operation: &'static str, player: &PlayerId) -> Result<Seat, MatchError> {
    require_phase(m, operation, Phase::Playing)?;
    match m.seat_of(player) {
        Some(seat) if seat == m.current_player => Ok(seat),
        _ => Err(MatchError::NotYourTurn(player.clone())),
    }
}

fn require_in_hand(m: &Match, seat: Seat, card: CardId) -> Result<usize, MatchError> {
    m.player(seat)
        .hand_position(card)
        .ok_or_else(|| MatchError::CardNotInHand {
            player: m.player(seat).id.clone(),
            card,
        })
}
