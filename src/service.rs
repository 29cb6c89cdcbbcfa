//! Match service: the entry point embedders call.
//!
//! `MatchService` ties the rules to a `MatchStore` and a shared random
//! source. Every operation loads the match, applies one rule and commits
//! the result atomically; a rejected operation changes nothing.
//!
//! ## Locking
//!
//! The store serializes operations on one match. Operations that deal
//! cards also take the service's RNG lock, always after the match lock.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::cards::{CardId, TheaterType};
use crate::core::action::{Action, ManipulateAction};
use crate::core::config::MatchConfig;
use crate::core::error::MatchError;
use crate::core::player::{Participant, PlayerId};
use crate::core::rng::{GameRng, RandomSource};
use crate::core::state::{Match, MatchId};
use crate::core::view::MatchView;
use crate::rules::MatchRules;
use crate::store::{InMemoryMatchStore, MatchStore};

/// Rules, storage and randomness for a set of matches.
pub struct MatchService<S = InMemoryMatchStore, R = GameRng> {
    rules: MatchRules,
    store: S,
    rng: Mutex<R>,
}

impl MatchService {
    /// In-memory service seeded from OS entropy.
    pub fn in_memory(config: MatchConfig) -> Result<Self, MatchError> {
        Self::new(config, InMemoryMatchStore::new(), GameRng::from_entropy())
    }

    /// In-memory service with a fixed seed, for reproducible matches.
    pub fn seeded(config: MatchConfig, seed: u64) -> Result<Self, MatchError> {
        Self::new(config, InMemoryMatchStore::new(), GameRng::new(seed))
    }
}

impl<S: MatchStore, R: RandomSource> MatchService<S, R> {
    /// Build a service. Fails if `config` is not playable.
    pub fn new(config: MatchConfig, store: S, rng: R) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            rules: MatchRules::new(config),
            store,
            rng: Mutex::new(rng),
        })
    }

    #[must_use]
    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // === Lifecycle ===

    /// Pair two participants into a new match under a fresh id.
    pub fn create_match(&self, one: Participant, two: Participant) -> Result<Match, MatchError> {
        let m = {
            let mut rng = self.rng.lock();
            self.rules.new_match(MatchId::generate(), one, two, &mut *rng)?
        };
        self.store.insert(m.clone());
        Ok(m)
    }

    pub fn get_match(&self, id: &MatchId) -> Result<Match, MatchError> {
        self.store.load(id)
    }

    /// The match as `viewer` may see it.
    pub fn view_for(&self, id: &MatchId, viewer: &PlayerId) -> Result<MatchView, MatchError> {
        self.store.load(id)?.view_for(viewer)
    }

    /// Discard a match, typically once its room closes.
    pub fn remove_match(&self, id: &MatchId) -> Option<Match> {
        self.store.remove(id)
    }

    pub fn start_next_battle(&self, id: &MatchId) -> Result<Match, MatchError> {
        self.run(id, "start next battle", None, |rules, m| {
            let mut rng = self.rng.lock();
            rules.start_next_battle(m, &mut *rng)
        })
    }

    pub fn start_next_game(&self, id: &MatchId) -> Result<Match, MatchError> {
        self.run(id, "start next game", None, |rules, m| {
            let mut rng = self.rng.lock();
            rules.start_next_game(m, &mut *rng)
        })
    }

    // === Player actions ===

    pub fn play_card(
        &self,
        id: &MatchId,
        player: &PlayerId,
        card: CardId,
        theater: TheaterType,
        face_up: bool,
    ) -> Result<Match, MatchError> {
        self.run(id, "play card", Some(player), |rules, m| {
            rules.play_card(m, player, card, theater, face_up)
        })
    }

    pub fn end_turn(&self, id: &MatchId, player: &PlayerId) -> Result<Match, MatchError> {
        self.run(id, "end turn", Some(player), |rules, m| rules.end_turn(m, player))
    }

    pub fn draw_card(&self, id: &MatchId, player: &PlayerId) -> Result<Match, MatchError> {
        self.run(id, "draw card", Some(player), |rules, m| rules.draw_card(m, player))
    }

    pub fn manipulate_card(
        &self,
        id: &MatchId,
        player: &PlayerId,
        theater: TheaterType,
        card: Option<CardId>,
        action: ManipulateAction,
    ) -> Result<Match, MatchError> {
        self.run(id, "manipulate card", Some(player), |rules, m| {
            rules.manipulate_card(m, player, theater, card, action)
        })
    }

    pub fn destroy_card(
        &self,
        id: &MatchId,
        player: &PlayerId,
        card: CardId,
    ) -> Result<Match, MatchError> {
        self.run(id, "destroy card", Some(player), |rules, m| {
            rules.destroy_card(m, player, card)
        })
    }

    pub fn withdraw(&self, id: &MatchId, player: &PlayerId) -> Result<Match, MatchError> {
        self.run(id, "withdraw", Some(player), |rules, m| rules.withdraw(m, player))
    }

    pub fn update_theater_scores(
        &self,
        id: &MatchId,
        player: &PlayerId,
        scores: &BTreeMap<TheaterType, u32>,
    ) -> Result<Match, MatchError> {
        self.run(id, "update theater scores", Some(player), |rules, m| {
            rules.update_theater_scores(m, player, scores)
        })
    }

    /// Dispatch a decoded action to the matching operation.
    pub fn apply(&self, id: &MatchId, action: &Action) -> Result<Match, MatchError> {
        match action {
            Action::PlayCard {
                player,
                card,
                theater,
                face_up,
            } => self.play_card(id, player, *card, *theater, *face_up),
            Action::EndTurn { player } => self.end_turn(id, player),
            Action::DrawCard { player } => self.draw_card(id, player),
            Action::ManipulateCard {
                player,
                theater,
                card,
                action,
            } => self.manipulate_card(id, player, *theater, *card, *action),
            Action::DestroyCard { player, card } => self.destroy_card(id, player, *card),
            Action::Withdraw { player } => self.withdraw(id, player),
            Action::UpdateTheaterScores { player, scores } => {
                self.update_theater_scores(id, player, scores)
            }
            Action::StartNextBattle => self.start_next_battle(id),
            Action::StartNextGame => self.start_next_game(id),
        }
    }

    fn run<F>(
        &self,
        id: &MatchId,
        operation: &'static str,
        player: Option<&PlayerId>,
        mut f: F,
    ) -> Result<Match, MatchError>
    where
        F: FnMut(&MatchRules, &mut Match) -> Result<(), MatchError>,
    {
        let result = self.store.update(id, &mut |m| f(&self.rules, m));
        match &result {
            Ok(m) => debug!(
                match_id = %id,
                player = ?player.map(PlayerId::as_str),
                operation,
                phase = %m.phase,
                "Action applied"
            ),
            Err(error) => debug!(
                match_id = %id,
                player = ?player.map(PlayerId::as_str),
                operation,
                %error,
                "Action rejected"
            ),
        }
        result
    }
}
