//! Bounded record of past critiques and the layouts they produced.

use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One critique together with the layout produced in response to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Iteration that produced this entry (0-based).
    pub iteration: usize,
    pub critique: String,
    pub layout: Layout,
}

/// Ring buffer of the most recent [`FeedbackEntry`] values.
///
/// A capacity of zero retains nothing. When full, the oldest entry is
/// evicted first.
#[derive(Debug, Clone, Default)]
pub struct FeedbackHistory {
    entries: VecDeque<FeedbackEntry>,
    capacity: usize,
}

impl FeedbackHistory {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::new(), capacity }
    }

    /// History that never retains anything.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn push(&mut self, entry: FeedbackEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &FeedbackEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&FeedbackEntry> {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(iteration: usize) -> FeedbackEntry {
        FeedbackEntry { iteration, critique: format!("critique {iteration}"), layout: Layout::default() }
    }

    #[test]
    fn test_disabled_history_keeps_nothing() {
        let mut history = FeedbackHistory::disabled();
        history.push(entry(0));
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_oldest_entries_evicted_first() {
        let mut history = FeedbackHistory::new(3);
        for i in 0..5 {
            history.push(entry(i));
        }

        assert_eq!(history.len(), 3);
        let kept: Vec<_> = history.iter().map(|e| e.iteration).collect();
        assert_eq!(kept, vec![2, 3, 4]);
        assert_eq!(history.latest().map(|e| e.iteration), Some(4));
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut history = FeedbackHistory::new(usize::MAX);
        history.push(entry(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), usize::MAX);
    }

    #[test]
    fn test_below_capacity_keeps_everything_in_order() {
        let mut history = FeedbackHistory::new(10);
        history.push(entry(0));
        history.push(entry(1));
        let kept: Vec<_> = history.iter().map(|e| e.critique.as_str()).collect();
        assert_eq!(kept, vec!["critique 0", "critique 1"]);
    }
}
