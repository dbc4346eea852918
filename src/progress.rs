//! Completed-level tracking
//!
//! In memory only; it lives as long as the session.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    completed: BTreeSet<u32>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion. Returns true the first time a level is completed.
    pub fn complete(&mut self, level_id: u32) -> bool {
        self.completed.insert(level_id)
    }

    pub fn is_completed(&self, level_id: u32) -> bool {
        self.completed.contains(&level_id)
    }

    pub fn completed(&self) -> impl Iterator<Item = u32> + '_ {
        self.completed.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// Mark every id as completed
    pub fn complete_all(&mut self, ids: impl IntoIterator<Item = u32>) {
        self.completed.extend(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_is_idempotent() {
        let mut progress = Progress::new();
        assert!(progress.is_empty());
        assert!(progress.complete(2));
        assert!(!progress.complete(2));
        assert_eq!(progress.len(), 1);
        assert!(progress.is_completed(2));
        assert!(!progress.is_completed(1));
    }

    #[test]
    fn test_complete_all() {
        let mut progress = Progress::new();
        progress.complete(3);
        progress.complete_all([1, 2, 3, 4, 5]);
        assert_eq!(progress.completed().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }
}
