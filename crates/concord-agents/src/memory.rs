//! Bounded first-in-first-out event memory.
//!
//! Each agent carries at most [`MEMORY_CAPACITY`] entries. Pushing past the
//! limit evicts the oldest entry. Only the most recent [`PROMPT_WINDOW`]
//! entries are ever rendered into a prompt.

use std::collections::VecDeque;

/// Maximum entries retained per agent.
pub const MEMORY_CAPACITY: usize = 10;

/// Entries exposed to the action generator.
pub const PROMPT_WINDOW: usize = 5;

/// A bounded log of event strings, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLog {
    entries: VecDeque<String>,
}

impl MemoryLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MEMORY_CAPACITY),
        }
    }

    /// Append an entry, evicting the oldest when full.
    pub fn push(&mut self, entry: impl Into<String>) {
        if self.entries.len() >= MEMORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
    }

    /// Up to `count` most recent entries, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).map(String::as_str)
    }

    /// Every retained entry, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been remembered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
