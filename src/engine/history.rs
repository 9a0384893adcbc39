//! Rating aggregation over a user's pick history.
//!
//! Buckets are plain sets over every entry. A drink rated 2 and later 5 sits in
//! both the low and the top bucket.

use std::collections::HashSet;

use crate::engine::constants::{HIGH_RATING_MIN, LOW_RATING_MAX, TOP_RATING};
use crate::models::HistoryEntry;

/// Number of distinct drinks in the history.
pub fn unique_item_count(history: &[HistoryEntry]) -> usize {
    history
        .iter()
        .map(|entry| entry.drink_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Drinks rated 1 or 2 at least once.
pub fn low_rated_ids(history: &[HistoryEntry]) -> HashSet<&str> {
    ids_where(history, |rating| (1..=LOW_RATING_MAX).contains(&rating))
}

/// Drinks rated 4 or higher at least once.
pub fn high_rated_ids(history: &[HistoryEntry]) -> HashSet<&str> {
    ids_where(history, |rating| rating >= HIGH_RATING_MIN)
}

/// Drinks rated 5 at least once.
pub fn top_rated_ids(history: &[HistoryEntry]) -> HashSet<&str> {
    ids_where(history, |rating| rating == TOP_RATING)
}

fn ids_where(history: &[HistoryEntry], keep: impl Fn(u8) -> bool) -> HashSet<&str> {
    history
        .iter()
        .filter(|entry| keep(entry.rating))
        .map(|entry| entry.drink_id.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, rating: u8) -> HistoryEntry {
        HistoryEntry::new(id, rating).unwrap()
    }

    #[test]
    fn test_unique_item_count_ignores_repeats() {
        let history = vec![entry("a", 3), entry("a", 4), entry("b", 1)];
        assert_eq!(unique_item_count(&history), 2);
        assert_eq!(unique_item_count(&[]), 0);
    }

    #[test]
    fn test_buckets() {
        let history = vec![
            entry("a", 1),
            entry("b", 2),
            entry("c", 3),
            entry("d", 4),
            entry("e", 5),
        ];
        assert_eq!(low_rated_ids(&history), HashSet::from(["a", "b"]));
        assert_eq!(high_rated_ids(&history), HashSet::from(["d", "e"]));
        assert_eq!(top_rated_ids(&history), HashSet::from(["e"]));
    }

    #[test]
    fn test_changed_rating_lands_in_both_buckets() {
        let history = vec![entry("a", 2), entry("a", 5)];
        assert!(low_rated_ids(&history).contains("a"));
        assert!(top_rated_ids(&history).contains("a"));
        assert!(high_rated_ids(&history).contains("a"));
    }
}
