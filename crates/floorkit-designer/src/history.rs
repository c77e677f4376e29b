//! Linear undo/redo over whole-document snapshots.
//!
//! Every entry is a deep copy of the plan. The cursor points at the
//! snapshot matching the editor's current document; undo and redo move it
//! and hand back a copy of the snapshot they land on.

use chrono::{DateTime, Utc};
use floorkit_core::PlanDocument;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// An immutable copy of the document taken at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub document: PlanDocument,
    pub timestamp: DateTime<Utc>,
}

impl HistorySnapshot {
    fn capture(document: &PlanDocument) -> Self {
        Self {
            document: document.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded snapshot history with a cursor.
#[derive(Debug, Clone)]
pub struct PlanHistory {
    entries: Vec<HistorySnapshot>,
    cursor: usize,
    capacity: usize,
}

impl PlanHistory {
    /// Creates a history seeded with `initial` as its only snapshot.
    pub fn new(initial: &PlanDocument, capacity: usize) -> Self {
        Self {
            entries: vec![HistorySnapshot::capture(initial)],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Records a snapshot of `document`.
    ///
    /// Entries after the cursor are discarded first. A document equal to the
    /// snapshot under the cursor is not recorded again. When the history is
    /// over capacity the oldest entry is evicted.
    ///
    /// # Returns
    ///
    /// `true` if a new snapshot was appended.
    pub fn push(&mut self, document: &PlanDocument) -> bool {
        self.entries.truncate(self.cursor + 1);
        if self
            .entries
            .get(self.cursor)
            .is_some_and(|s| s.document == *document)
        {
            return false;
        }

        self.entries.push(HistorySnapshot::capture(document));
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;

        tracing::debug!(
            "History push: {} snapshots, cursor {}",
            self.entries.len(),
            self.cursor
        );
        true
    }

    /// Steps back one snapshot.
    pub fn undo(&mut self) -> Option<PlanDocument> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].document.clone())
    }

    /// Steps forward one snapshot.
    pub fn redo(&mut self) -> Option<PlanDocument> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].document.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Drops all snapshots and starts over from `document`.
    pub fn reset(&mut self, document: &PlanDocument) {
        self.entries.clear();
        self.entries.push(HistorySnapshot::capture(document));
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.entries.get(self.cursor)
    }

    pub fn snapshots(&self) -> &[HistorySnapshot] {
        &self.entries
    }
}
