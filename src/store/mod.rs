//! Match storage.
//!
//! The rules operate on a plain `Match`. A `MatchStore` owns the matches
//! and serializes mutations per match: `update` runs a closure against the
//! stored record and commits the result only when the closure succeeds.

pub mod memory;

pub use memory::InMemoryMatchStore;

use crate::core::error::MatchError;
use crate::core::state::{Match, MatchId};

/// Keyed storage for matches.
///
/// Implementations must apply `update` atomically per match: two updates
/// on the same id never interleave, and a failed update leaves the stored
/// match unchanged.
pub trait MatchStore: Send + Sync {
    /// Store a match under its own id, replacing any previous record.
    fn insert(&self, m: Match);

    /// Snapshot of a stored match.
    fn load(&self, id: &MatchId) -> Result<Match, MatchError>;

    /// Mutate a stored match. Returns the committed state.
    fn update(
        &self,
        id: &MatchId,
        f: &mut dyn FnMut(&mut Match) -> Result<(), MatchError>,
    ) -> Result<Match, MatchError>;

    /// Discard a match. Returns the removed record, if there was one.
    fn remove(&self, id: &MatchId) -> Option<Match>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
