//! Recency List Module
//!
//! Orders cached keys from least to most recently used.

use std::collections::VecDeque;

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Least recently used
/// - Back = Most recently used
///
/// Promotion is a linear scan, which is fine for the modest item counts a
/// byte-bounded cache holds.
#[derive(Debug, Default, Clone)]
pub struct RecencyList {
    /// Keys by access time, oldest first
    order: VecDeque<String>,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Promote ==
    /// Marks a key as most recently used.
    ///
    /// Any earlier occurrence is removed first, so a key appears at most once.
    pub fn promote(&mut self, key: &str) {
        if let Some(index) = self.order.iter().position(|k| k == key) {
            self.order.remove(index);
        }
        self.order.push_back(key.to_string());
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek ==
    /// Returns the least recently used key without removing it.
    pub fn oldest(&self) -> Option<&str> {
        self.order.front().map(String::as_str)
    }

    /// Returns the most recently used key.
    pub fn newest(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
