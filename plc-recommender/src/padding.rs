//! Popularity padding for short candidate lists

use std::collections::HashSet;
use std::hash::Hash;
use tracing::warn;

/// Items of `items` not present in `seen`, order preserved
pub fn remove_seen<T: Eq + Hash + Clone>(seen: &[T], items: &[T]) -> Vec<T> {
    let seen: HashSet<&T> = seen.iter().collect();
    items.iter().filter(|item| !seen.contains(item)).cloned().collect()
}

/// Fills candidate lists from a global popularity ranking
///
/// `popular` is the configured popularity list; `reserve` is the full corpus
/// ranking, consulted only when `popular` cannot reach the target because the
/// candidates or exclusions already used it up.
pub struct PopularityPadder<'a, T> {
    popular: &'a [T],
    reserve: &'a [T],
}

impl<'a, T: Eq + Hash + Clone> PopularityPadder<'a, T> {
    pub fn new(popular: &'a [T], reserve: &'a [T]) -> Self {
        Self { popular, reserve }
    }

    /// Append popular items until `items` reaches `target`
    ///
    /// Items already present or listed in `excluded` are skipped. Lists that
    /// already reach the target are returned unchanged (no truncation).
    pub fn pad(&self, mut items: Vec<T>, target: usize, excluded: &HashSet<T>) -> Vec<T> {
        if items.len() >= target {
            return items;
        }

        let mut present: HashSet<T> = items.iter().cloned().collect();
        let mut fill_from = |source: &[T], items: &mut Vec<T>| {
            for candidate in source {
                if items.len() >= target {
                    break;
                }
                if excluded.contains(candidate) || present.contains(candidate) {
                    continue;
                }
                present.insert(candidate.clone());
                items.push(candidate.clone());
            }
        };

        fill_from(self.popular, &mut items);
        if items.len() < target {
            warn!(
                "Popularity list exhausted at {} of {} items, padding from full ranking",
                items.len(),
                target
            );
            fill_from(self.reserve, &mut items);
        }
        items
    }
}
