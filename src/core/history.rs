//=========================================================================
// History Log
//=========================================================================
//
// Fixed-capacity log of recently superseded screens.
//
// Architecture:
//   push() → VecDeque (oldest at front, newest at back)
//              ↓ len > capacity
//            pop_front() (oldest evicted)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

//=== HistoryLog ==========================================================

/// Bounded, ordered log. Pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryLog<T> {
    /// Creates an empty log that retains at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "History capacity must be positive");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, returning the evicted oldest entry if the log was full.
    pub fn push(&mut self, entry: T) -> Option<T> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Least recently pushed entry still retained.
    pub fn oldest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Most recently pushed entry.
    pub fn newest(&self) -> Option<&T> {
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

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_log_is_empty() {
        let log: HistoryLog<&str> = HistoryLog::new(3);
        assert!(log.is_empty());
        assert_eq!(log.oldest(), None);
        assert_eq!(log.newest(), None);
        assert_eq!(log.capacity(), 3);
    }

    #[test]
    #[should_panic(expected = "History capacity must be positive")]
    fn zero_capacity_panics() {
        HistoryLog::<u8>::new(0);
    }

    #[test]
    fn push_evicts_oldest_past_capacity() {
        let mut log = HistoryLog::new(2);
        assert_eq!(log.push("a"), None);
        assert_eq!(log.push("b"), None);
        assert_eq!(log.push("c"), Some("a"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.oldest(), Some(&"b"));
        assert_eq!(log.newest(), Some(&"c"));
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut log = HistoryLog::new(4);
        log.push(1);
        log.push(2);
        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.capacity(), 4);
    }
}
