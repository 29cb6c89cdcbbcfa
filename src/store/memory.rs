//! In-process match store.

use std::hash::BuildHasherDefault;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHasher;

use super::MatchStore;
use crate::core::error::MatchError;
use crate::core::state::{Match, MatchId};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Matches held in memory.
///
/// The map is sharded, so unrelated matches never contend. Each record
/// sits behind its own mutex, which serializes actions on one match.
#[derive(Default)]
pub struct InMemoryMatchStore {
    matches: DashMap<MatchId, Arc<Mutex<Match>>, FxBuildHasher>,
}

impl InMemoryMatchStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of every stored match, in no particular order.
    #[must_use]
    pub fn ids(&self) -> Vec<MatchId> {
        self.matches.iter().map(|entry| entry.key().clone()).collect()
    }

    fn record(&self, id: &MatchId) -> Result<Arc<Mutex<Match>>, MatchError> {
        // Clone the Arc so the shard guard is released before locking.
        self.matches
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| MatchError::NotFound(id.clone()))
    }
}

impl MatchStore for InMemoryMatchStore {
    fn insert(&self, m: Match) {
        self.matches.insert(m.id.clone(), Arc::new(Mutex::new(m)));
    }

    fn load(&self, id: &MatchId) -> Result<Match, MatchError> {
        let record = self.record(id)?;
        let snapshot = record.lock().clone();
        Ok(snapshot)
    }

    fn update(
        &self,
        id: &MatchId,
        f: &mut dyn FnMut(&mut Match) -> Result<(), MatchError>,
    ) -> Result<Match, MatchError> {
        let record = self.record(id)?;
        let mut stored = record.lock();

        // Work on a copy; im vectors make this cheap.
        let mut draft = stored.clone();
        f(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }

    fn remove(&self, id: &MatchId) -> Option<Match> {
        self.matches
            .remove(id)
            .map(|(_, record)| record.lock().clone())
    }

    fn len(&self) -> usize {
        self.matches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::{Participant, Seat};
    use crate::core::rng::GameRng;
    use crate::core::state::Phase;
    use crate::rules::MatchRules;

    fn stored_match(store: &InMemoryMatchStore, id: &str) -> MatchId {
        let m = MatchRules::default()
            .new_match(
                MatchId::new(id),
                Participant::new("p1", "One"),
                Participant::new("p2", "Two"),
                &mut GameRng::new(3),
            )
            .unwrap();
        let id = m.id.clone();
        store.insert(m);
        id
    }

    #[test]
    fn test_insert_load_remove() {
        let store = InMemoryMatchStore::new();
        assert!(store.is_empty());

        let id = stored_match(&store, "m-1");
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(&id).unwrap().id, id);
        assert_eq!(store.ids(), vec![id.clone()]);

        assert!(store.remove(&id).is_some());
        assert_eq!(store.load(&id), Err(MatchError::NotFound(id.clone())));
        assert!(store.remove(&id).is_none());
    }

    #[test]
    fn test_update_commits_on_success() {
        let store = InMemoryMatchStore::new();
        let id = stored_match(&store, "m-1");

        let updated = store
            .update(&id, &mut |m| {
                m.player_mut(Seat::One).score = 4;
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.score(Seat::One), 4);
        assert_eq!(store.load(&id).unwrap().score(Seat::One), 4);
    }

    #[test]
    fn test_update_discards_on_failure() {
        let store = InMemoryMatchStore::new();
        let id = stored_match(&store, "m-1");
        let before = store.load(&id).unwrap();

        let result = store.update(&id, &mut |m| {
            m.phase = Phase::GameOver;
            m.player_mut(Seat::Two).score = 99;
            Err(MatchError::DeckEmpty)
        });

        assert_eq!(result, Err(MatchError::DeckEmpty));
        assert_eq!(store.load(&id).unwrap(), before);
    }

    #[test]
    fn test_update_missing_match() {
        let store = InMemoryMatchStore::new();
        let id = MatchId::new("ghost");
        let result = store.update(&id, &mut |_| Ok(()));
        assert_eq!(result, Err(MatchError::NotFound(id)));
    }

    #[test]
    fn test_concurrent_updates_serialize() {
        let store = Arc::new(InMemoryMatchStore::new());
        let id = stored_match(&store, "m-1");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = id.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store
                            .update(&id, &mut |m| {
                                m.player_mut(Seat::One).score += 1;
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.load(&id).unwrap().score(Seat::One), 800);
    }
}
