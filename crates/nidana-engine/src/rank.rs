//! Ranking and de-duplication helpers shared by the matcher and suggester.

use std::collections::HashSet;

/// Sort `items` by `key`, highest first, and keep at most `limit`.
///
/// The sort is stable: items with equal keys keep their input order.
pub fn top_by_key<T, F>(mut items: Vec<T>, limit: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> u32,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items.truncate(limit);
    items
}

/// An insertion-ordered set of strings.
#[derive(Debug, Default)]
pub struct FirstSeen {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl FirstSeen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless already present. Returns true if it was new.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.order.push(value.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The values in first-inserted order, truncated to `limit`.
    pub fn into_vec(mut self, limit: usize) -> Vec<String> {
        self.order.truncate(limit);
        self.order
    }
}
