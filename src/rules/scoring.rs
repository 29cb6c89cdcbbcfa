//! Battle scoring: withdrawal payouts and majority-of-theaters resolution.

use crate::core::config::ScoringCompleteness;
use crate::core::player::{Seat, SeatMap};
use crate::core::state::{BattleOutcome, TheaterScore};
use crate::zones::TheaterMap;

/// Victory points awarded to the opponent of a withdrawing player.
///
/// | withdrawer      | 2 VP | 3 VP   | 4 VP | 6 VP   |
/// |-----------------|------|--------|------|--------|
/// | went first      | ≥ 4  | 2 or 3 | 1    | 0      |
/// | went second     | ≥ 5  | 3 or 4 | 2    | 0 or 1 |
///
/// The second player's row is shifted by one card: at any equivalent turn
/// they have played one card fewer.
#[must_use]
pub fn withdrawal_payout(went_first: bool, cards_remaining: usize) -> u32 {
    if went_first {
        match cards_remaining {
            0 => 6,
            1 => 4,
            2 | 3 => 3,
            _ => 2,
        }
    } else {
        match cards_remaining {
            0 | 1 => 6,
            2 => 4,
            3 | 4 => 3,
            _ => 2,
        }
    }
}

/// Whether submitted totals are enough to resolve the battle.
#[must_use]
pub fn is_complete(scores: &TheaterMap<TheaterScore>, rule: ScoringCompleteness) -> bool {
    scores.values().all(|score| match rule {
        ScoringCompleteness::BothSubmitted => {
            Seat::BOTH.iter().all(|&seat| score.is_submitted(seat))
        }
        ScoringCompleteness::NonZeroTotals => {
            Seat::BOTH.iter().any(|&seat| score.total(seat) > 0)
        }
    })
}

/// Decide the battle from complete theater totals.
///
/// Each theater goes to the strictly higher total; ties go to nobody. The
/// seat winning at least two theaters receives `award`. Without a majority
/// nobody scores.
#[must_use]
pub fn resolve_battle(scores: &TheaterMap<TheaterScore>, award: u32) -> BattleOutcome {
    let mut theaters_won: SeatMap<u8> = SeatMap::with_value(0);
    for score in scores.values() {
        if let Some(seat) = score.winner() {
            theaters_won[seat] += 1;
        }
    }

    let winner = Seat::BOTH.into_iter().find(|&seat| theaters_won[seat] >= 2);

    BattleOutcome::Scored {
        theaters_won,
        winner,
        awarded: if winner.is_some() { award } else { 0 },
    }
}
