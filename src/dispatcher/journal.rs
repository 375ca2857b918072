//! In-memory record of dispatcher activity.
//!
//! The journal is a bounded diagnostics trail. It is serializable for
//! inspection but is never used to rebuild a dispatcher.

use crate::core::CommandId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Default number of entries retained by a journal.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 256;

/// What the dispatcher did with a command.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalAction {
    Invoked,
    Forbidden,
    Undone,
    Redone,
}

/// Record of a single dispatcher operation.
#[derive(Clone, Debug, Serialize)]
pub struct JournalEntry {
    /// The command the operation applied to (the original, not its inverse)
    pub command: CommandId,
    pub description: String,
    pub action: JournalAction,
    /// When the operation happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of dispatcher operations, oldest first.
#[derive(Clone, Debug, Serialize)]
pub struct Journal {
    entries: VecDeque<JournalEntry>,
    #[serde(skip)]
    capacity: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl Journal {
    /// Create a journal keeping at most `capacity` entries (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an entry, evicting the oldest one when full.
    pub fn record(&mut self, entry: JournalEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Count entries with the given action.
    pub fn count(&self, action: JournalAction) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
