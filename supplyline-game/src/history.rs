//! Append-only play history, replayed at game end for reporting.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::decision::Decision;
use crate::result::StageResult;
use crate::stage::Stage;

/// One completed turn: the stage, the decision as submitted, and the result
/// exactly as the calculator produced it. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub stage: Stage,
    pub decision: Decision,
    pub result: StageResult,
}

/// Ordered log of completed turns; insertion order is play order.
///
/// A full playthrough has exactly five entries, so the backing store is
/// inline-sized for five.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HistoryLog {
    entries: SmallVec<[HistoryEntry; 5]>,
}

impl HistoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The full log, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether stage ids appear in canonical play order with no duplicates.
    /// Holds for every log the session produces; exposed for test assertions
    /// and for collaborators that re-ingest persisted logs.
    #[must_use]
    pub fn is_canonical_order(&self) -> bool {
        self.entries.len() <= Stage::PLAY_ORDER.len()
            && self
                .entries
                .iter()
                .zip(Stage::PLAY_ORDER)
                .all(|(entry, expected)| entry.stage == expected)
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
