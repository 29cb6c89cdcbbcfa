//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use theater_duel::{Match, MatchConfig, MatchService, Participant, PlayerId, Seat};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per process.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Seeded in-memory service with default rules.
pub fn service(seed: u64) -> MatchService {
    init_logging();
    MatchService::seeded(MatchConfig::default(), seed).unwrap()
}

/// Create a match between "alice" and "bob".
pub fn new_match(service: &MatchService) -> Match {
    service
        .create_match(Participant::new("alice", "Alice"), Participant::new("bob", "Bob"))
        .unwrap()
}

pub fn id_of(m: &Match, seat: Seat) -> PlayerId {
    m.player(seat).id.clone()
}

/// Play every card face up into its own theater, alternating turns, until
/// both hands are empty.
pub fn play_out_battle(service: &MatchService, m: &Match) -> Match {
    let mut m = m.clone();
    for _ in 0..2 {
        let seat = m.current_player;
        let player = id_of(&m, seat);
        let hand: Vec<_> = m.player(seat).hand.iter().copied().collect();
        for card in hand {
            m = service.play_card(&m.id, &player, card.id, card.theater, true).unwrap();
        }
        if m.phase == theater_duel::Phase::Playing {
            m = service.end_turn(&m.id, &player).unwrap();
        }
    }
    m
}

/// Both seats submit the same totals, `(seat one, seat two)` per theater
/// in Air, Land, Sea order.
pub fn submit_scores(service: &MatchService, m: &Match, totals: [(u32, u32); 3]) -> Match {
    use theater_duel::TheaterType::{Air, Land, Sea};

    let mut latest = m.clone();
    for seat in Seat::BOTH {
        let pick = |pair: (u32, u32)| if seat == Seat::One { pair.0 } else { pair.1 };
        let scores = BTreeMap::from([
            (Air, pick(totals[0])),
            (Land, pick(totals[1])),
            (Sea, pick(totals[2])),
        ]);
        latest = service
            .update_theater_scores(&m.id, &id_of(m, seat), &scores)
            .unwrap();
    }
    latest
}
