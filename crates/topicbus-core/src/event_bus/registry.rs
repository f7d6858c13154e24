//! Topic registry.
//!
//! Maps topic names to ordered handler sequences. A topic is present if and
//! only if its sequence is non-empty: every mutating method restores that
//! invariant before returning, so callers never observe an empty entry.
//!
//! Each sequence lives behind its own shared handle. Removing an entry shrinks
//! the sequence in place; removing a topic detaches the handle from the map
//! without touching its contents, so a holder of the handle keeps seeing the
//! sequence as it was when the topic went away.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to one topic's sequence
pub type SharedSequence<H> = Arc<Mutex<Vec<H>>>;

/// Keyed collection of per-topic handler sequences
#[derive(Debug)]
pub struct TopicRegistry<H> {
    topics: HashMap<String, SharedSequence<H>>,
}

impl<H> TopicRegistry<H> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
        }
    }

    /// Append entries to a topic, in iteration order
    ///
    /// Creates the topic on first use. An empty iterator leaves the registry
    /// untouched. Returns the number of entries appended.
    pub fn append<I>(&mut self, topic: &str, entries: I) -> usize
    where
        I: IntoIterator<Item = H>,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return 0;
        }

        let mut sequence = self.topics.entry(topic.to_string()).or_default().lock();
        let before = sequence.len();
        sequence.extend(entries);
        sequence.len() - before
    }

    /// Detach a topic and all of its entries
    ///
    /// Returns the detached handle, or `None` if the topic was unknown.
    pub fn remove_topic(&mut self, topic: &str) -> Option<SharedSequence<H>> {
        self.topics.remove(topic)
    }

    /// Remove the first entry of `topic` matching `predicate`
    ///
    /// Later matches are left in place. Drops the topic when its last entry
    /// goes. Returns the removed entry.
    pub fn remove_first<P>(&mut self, topic: &str, predicate: P) -> Option<H>
    where
        P: FnMut(&H) -> bool,
    {
        let (removed, emptied) = {
            let mut sequence = self.topics.get(topic)?.lock();
            let index = sequence.iter().position(predicate)?;
            let removed = sequence.remove(index);
            (removed, sequence.is_empty())
        };

        if emptied {
            self.topics.remove(topic);
        }

        Some(removed)
    }

    /// Remove every topic
    pub fn clear(&mut self) {
        self.topics.clear();
    }

    /// Shared handle to a topic's sequence
    pub fn sequence(&self, topic: &str) -> Option<SharedSequence<H>> {
        self.topics.get(topic).cloned()
    }

    /// Whether a topic has at least one entry
    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Number of entries registered for a topic
    pub fn len_of(&self, topic: &str) -> usize {
        self.topics
            .get(topic)
            .map_or(0, |sequence| sequence.lock().len())
    }

    /// Number of topics with at least one entry
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Whether the registry has no topics
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Topic names, sorted
    pub fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.topics.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<H: Clone> TopicRegistry<H> {
    /// Copy of a topic's sequence
    pub fn snapshot(&self, topic: &str) -> Option<Vec<H>> {
        self.topics.get(topic).map(|sequence| sequence.lock().clone())
    }
}

impl<H> Default for TopicRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut registry = TopicRegistry::new();
        assert_eq!(registry.append("a", [1, 2]), 2);
        assert_eq!(registry.append("a", [3]), 1);

        assert_eq!(registry.snapshot("a"), Some(vec![1, 2, 3]));
        assert_eq!(registry.len_of("a"), 3);
    }

    #[test]
    fn test_append_empty_does_not_create_topic() {
        let mut registry: TopicRegistry<u32> = TopicRegistry::new();
        assert_eq!(registry.append("a", Vec::new()), 0);

        assert!(!registry.contains("a"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_first_only_removes_one() {
        let mut registry = TopicRegistry::new();
        registry.append("a", [7, 8, 7]);

        assert_eq!(registry.remove_first("a", |v| *v == 7), Some(7));
        assert_eq!(registry.snapshot("a"), Some(vec![8, 7]));
    }

    #[test]
    fn test_remove_first_compacts_empty_topic() {
        let mut registry = TopicRegistry::new();
        registry.append("a", [1]);

        assert_eq!(registry.remove_first("a", |v| *v == 1), Some(1));
        assert!(!registry.contains("a"));
        assert_eq!(registry.topic_count(), 0);
    }

    #[test]
    fn test_remove_first_no_match() {
        let mut registry = TopicRegistry::new();
        registry.append("a", [1, 2]);

        assert_eq!(registry.remove_first("a", |v| *v == 9), None);
        assert_eq!(registry.remove_first("missing", |_| true), None);
        assert_eq!(registry.snapshot("a"), Some(vec![1, 2]));
    }

    #[test]
    fn test_remove_topic_and_clear() {
        let mut registry = TopicRegistry::new();
        registry.append("a", [1]);
        registry.append("b", [2]);

        let detached = registry.remove_topic("a").unwrap();
        assert_eq!(*detached.lock(), vec![1]);
        assert!(registry.remove_topic("a").is_none());
        assert_eq!(registry.topics(), vec!["b".to_string()]);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handle_tracks_in_place_removal() {
        let mut registry = TopicRegistry::new();
        registry.append("a", ["x", "y", "z"]);
        let handle = registry.sequence("a").unwrap();

        registry.remove_first("a", |v| *v == "x");
        assert_eq!(*handle.lock(), vec!["y", "z"]);

        registry.append("a", ["w"]);
        assert_eq!(*handle.lock(), vec!["y", "z", "w"]);
    }

    #[test]
    fn test_detached_handle_survives_topic_replacement() {
        let mut registry = TopicRegistry::new();
        registry.append("a", ["x", "y"]);
        let handle = registry.sequence("a").unwrap();

        registry.remove_topic("a");
        registry.append("a", ["new"]);

        assert_eq!(*handle.lock(), vec!["x", "y"]);
        assert_eq!(registry.snapshot("a"), Some(vec!["new"]));
        assert!(registry.sequence("b").is_none());
    }
}
