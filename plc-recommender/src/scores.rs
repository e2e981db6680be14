//! Per-query score accumulation

use std::collections::HashMap;
use std::hash::Hash;

/// Accumulated scores keyed by song or tag id
///
/// Every `add` creates the entry, even for a zero contribution, so items seen
/// by any pass take part in the ranking.
#[derive(Debug, Clone)]
pub struct ScoreTable<K> {
    scores: HashMap<K, f64>,
}

impl<K: Eq + Hash + Ord + Clone> ScoreTable<K> {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    pub fn add(&mut self, key: K, amount: f64) {
        *self.scores.entry(key).or_insert(0.0) += amount;
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.scores.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries by descending score, ascending id on ties
    pub fn into_ranked(self) -> Vec<(K, f64)> {
        let mut ranked: Vec<(K, f64)> = self.scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

impl<K: Eq + Hash + Ord + Clone> Default for ScoreTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// First `n` ids of a ranked list
pub fn top_ids<K: Clone>(ranked: &[(K, f64)], n: usize) -> Vec<K> {
    ranked.iter().take(n).map(|(id, _)| id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_and_ranks() {
        let mut table = ScoreTable::new();
        table.add(3u32, 1.0);
        table.add(1u32, 2.5);
        table.add(3u32, 2.0);
        table.add(2u32, 0.0);

        assert_eq!(table.get(&3), Some(3.0));
        assert_eq!(table.len(), 3);

        let ranked = table.into_ranked();
        assert_eq!(ranked, vec![(3, 3.0), (1, 2.5), (2, 0.0)]);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let mut table = ScoreTable::new();
        for tag in ["pop", "ballad", "indie"] {
            table.add(tag.to_string(), 1.0);
        }
        let ids = top_ids(&table.into_ranked(), 10);
        assert_eq!(ids, vec!["ballad", "indie", "pop"]);
    }

    #[test]
    fn test_negative_scores_rank_last() {
        let mut table = ScoreTable::new();
        table.add(1u32, -4.0);
        table.add(2u32, 0.5);
        assert_eq!(top_ids(&table.into_ranked(), 1), vec![2]);
    }
}
