//! In-memory session history, newest first.

use std::collections::VecDeque;

use crate::models::HistoryItem;

#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    items: VecDeque<HistoryItem>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front. No deduplication, no bound.
    pub fn append(&mut self, item: HistoryItem) {
        self.items.push_front(item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read-only access by display position (0 = most recent).
    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.items.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Newest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryItem> + ExactSizeIterator {
        self.items.iter()
    }

    /// Oldest first
    pub fn iter_chronological(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter().rev()
    }
}
