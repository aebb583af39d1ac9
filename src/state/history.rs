//! Sent-message history with recall.

use std::collections::VecDeque;

/// Destination for submitted input lines.
pub trait HistoryStore {
    /// Record a submitted, non-empty line.
    fn push(&mut self, entry: String);
}

impl HistoryStore for Vec<String> {
    fn push(&mut self, entry: String) {
        Vec::push(self, entry);
    }
}

/// Bounded history of sent messages, oldest evicted first.
///
/// A recall cursor walks the entries from newest to oldest with
/// [`previous`](Self::previous) and back with [`next_entry`](Self::next_entry).
/// Pushing a new entry resets the cursor.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: Option<usize>,
}

impl CommandHistory {
    /// Create a history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: None,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Whether the recall cursor is on an entry.
    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Step the cursor one entry older and return that entry.
    ///
    /// Stays on the oldest entry once reached. Returns `None` only when the
    /// history is empty.
    pub fn previous(&mut self) -> Option<&str> {
        let last = self.entries.len().checked_sub(1)?;
        let index = match self.cursor {
            None => last,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step the cursor one entry newer and return that entry.
    ///
    /// Moving past the newest entry leaves browsing mode and returns `None`.
    pub fn next_entry(&mut self) -> Option<&str> {
        let index = self.cursor? + 1;
        if index < self.entries.len() {
            self.cursor = Some(index);
            self.entries.get(index).map(String::as_str)
        } else {
            self.cursor = None;
            None
        }
    }

    /// Leave browsing mode without changing the entries.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }
}

impl HistoryStore for CommandHistory {
    fn push(&mut self, entry: String) {
        self.cursor = None;
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }
}
