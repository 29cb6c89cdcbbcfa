//! Property tests over arbitrary operation sequences.
//!
//! Random actions, legal or not, are thrown at a match. Whatever happens,
//! every catalogue card stays in exactly one place and rejected actions
//! change nothing.

mod common;

use proptest::prelude::*;

use theater_duel::cards::{all_cards, shuffled};
use theater_duel::{
    Action, CardId, GameRng, ManipulateAction, Match, MatchId, MatchRules, Participant, Phase, Seat,
    TheaterType, CATALOGUE,
};

/// Raw material for one action; interpreted against the live match.
#[derive(Clone, Debug)]
struct Step {
    kind: u8,
    seat: bool,
    card: u8,
    theater: u8,
    flag: bool,
    totals: [u32; 3],
}

fn step() -> impl Strategy<Value = Step> {
    (0u8..12, any::<bool>(), 1u8..=18, 0u8..3, any::<bool>(), [0u32..8, 0u32..8, 0u32..8]).prop_map(
        |(kind, seat, card, theater, flag, totals)| Step {
            kind,
            seat,
            card,
            theater,
            flag,
            totals,
        },
    )
}

fn to_action(m: &Match, step: &Step) -> Action {
    let seat = if step.seat { Seat::One } else { Seat::Two };
    let player = m.player(seat).id.clone();
    let theater = TheaterType::ALL[step.theater as usize];
    let card = CardId::new(step.card);

    match step.kind {
        // Weighted towards plays so battles actually finish.
        0..=2 => Action::PlayCard {
            player,
            card: m.player(seat).hand.front().map_or(card, |c| c.id),
            theater,
            face_up: step.flag,
        },
        3 => Action::PlayCard {
            player,
            card,
            theater,
            face_up: step.flag,
        },
        4 => Action::EndTurn { player },
        5 => Action::DrawCard { player },
        6 => Action::ManipulateCard {
            player,
            theater,
            card: step.flag.then_some(card),
            action: [ManipulateAction::Flip, ManipulateAction::Destroy, ManipulateAction::Return]
                [step.card as usize % 3],
        },
        7 => Action::DestroyCard { player, card },
        8 => Action::Withdraw { player },
        9 => Action::UpdateTheaterScores {
            player,
            scores: TheaterType::ALL.into_iter().zip(step.totals).collect(),
        },
        10 => Action::StartNextBattle,
        _ => Action::StartNextGame,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: Card conservation and atomic rejection
    /// After every action the catalogue is intact, a rejected action leaves
    /// the match untouched, and scores only drop on a rematch.
    #[test]
    fn prop_actions_conserve_cards(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..200),
    ) {
        common::init_logging();
        let rules = MatchRules::default();
        let mut rng = GameRng::new(seed);
        let mut m = rules
            .new_match(
                MatchId::new("prop"),
                Participant::new("p1", "One"),
                Participant::new("p2", "Two"),
                &mut rng,
            )
            .unwrap();

        for step in &steps {
            let action = to_action(&m, step);
            let before = m.clone();

            match rules.apply(&mut m, &action, &mut rng) {
                Ok(()) => {
                    if !matches!(action, Action::StartNextGame) {
                        for seat in Seat::BOTH {
                            prop_assert!(m.score(seat) >= before.score(seat));
                        }
                    }
                }
                Err(error) => {
                    prop_assert_eq!(&m, &before, "{} changed state: {}", action.name(), error)
                }
            }

            prop_assert!(m.is_conserved(), "cards lost after {:?}", action);
            prop_assert!(m.battle_number >= 1);
            prop_assert_ne!(m.phase, Phase::WaitingForPlayers);
            if m.phase == Phase::GameOver {
                prop_assert!(m.threshold_reached(rules.config().victory_threshold));
            }
        }
    }

    /// Property: Shuffle is a permutation of the catalogue
    #[test]
    fn prop_shuffle_is_permutation(seed in any::<u64>()) {
        let mut cards = shuffled(&all_cards(), &mut GameRng::new(seed));
        prop_assert_eq!(cards.len(), CATALOGUE.len());

        cards.sort_by_key(|c| c.id);
        prop_assert_eq!(cards, CATALOGUE.to_vec());
    }
}
