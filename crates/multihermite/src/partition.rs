//! Enumeration of multi-indices with a fixed photon number.
//!
//! The recursion fills the tensor one photon-number level at a time, so it
//! repeatedly needs "all multi-indices under the cutoff that sum to `p`".
//! The same levels are requested again by the gradient sweep, hence the
//! cache.

use std::collections::HashMap;
use std::sync::Arc;

use crate::multi_index::MultiIndex;

/// All multi-indices `k` with `sum(k) == photons` and `0 <= k_j < cutoff[j]`.
///
/// Indices are produced in lexicographic order. Each coordinate is bounded
/// by `min(photons, cutoff[j] - 1)` before the sum is checked, and branches
/// that cannot reach `photons` are pruned.
///
/// An empty cutoff admits only the empty multi-index at zero photons.
pub fn partition(photons: usize, cutoff: &[usize]) -> Vec<MultiIndex> {
    if cutoff.contains(&0) {
        return Vec::new();
    }
    let bounds: Vec<usize> = cutoff.iter().map(|&c| photons.min(c - 1)).collect();

    // suffix[j] = largest photon number reachable with coordinates j..n
    let mut suffix = vec![0usize; bounds.len() + 1];
    for j in (0..bounds.len()).rev() {
        suffix[j] = suffix[j + 1] + bounds[j];
    }

    let mut out = Vec::new();
    let mut current = vec![0usize; bounds.len()];
    collect_partitions(0, photons, &bounds, &suffix, &mut current, &mut out);
    out
}

fn collect_partitions(
    pos: usize,
    remaining: usize,
    bounds: &[usize],
    suffix: &[usize],
    current: &mut MultiIndex,
    out: &mut Vec<MultiIndex>,
) {
    if pos == bounds.len() {
        if remaining == 0 {
            out.push(current.clone());
        }
        return;
    }
    if remaining > suffix[pos] {
        return;
    }
    for v in 0..=bounds[pos].min(remaining) {
        current[pos] = v;
        collect_partitions(pos + 1, remaining - v, bounds, suffix, current, out);
    }
    current[pos] = 0;
}

/// Memoized [`partition`], keyed by cutoff vector value and photon number.
///
/// Results are shared as `Arc<[MultiIndex]>` so a caller can iterate a level
/// while mutating its own tensors.
#[derive(Debug, Default)]
pub struct PartitionCache {
    /// cutoff -> photons -> multi-indices
    cache: HashMap<Vec<usize>, HashMap<usize, Arc<[MultiIndex]>>>,
    /// Number of actual enumerations
    num_evals: usize,
    /// Number of cache hits
    num_cache_hits: usize,
}

impl PartitionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Multi-indices at `photons` under `cutoff`, enumerating on first request
    pub fn get(&mut self, photons: usize, cutoff: &[usize]) -> Arc<[MultiIndex]> {
        if let Some(level) = self.cache.get(cutoff).and_then(|m| m.get(&photons)) {
            self.num_cache_hits += 1;
            return Arc::clone(level);
        }

        self.num_evals += 1;
        let level: Arc<[MultiIndex]> = partition(photons, cutoff).into();
        self.cache
            .entry(cutoff.to_vec())
            .or_default()
            .insert(photons, Arc::clone(&level));
        level
    }

    /// Get the number of actual enumerations
    pub fn num_evals(&self) -> usize {
        self.num_evals
    }

    /// Get the number of cache hits
    pub fn num_cache_hits(&self) -> usize {
        self.num_cache_hits
    }

    /// Get the cache hit ratio
    pub fn cache_hit_ratio(&self) -> f64 {
        let total = self.num_evals + self.num_cache_hits;
        if total == 0 {
            0.0
        } else {
            self.num_cache_hits as f64 / total as f64
        }
    }

    /// Get the number of cached levels
    pub fn cache_size(&self) -> usize {
        self.cache.values().map(HashMap::len).sum()
    }

    /// Check if a level is cached
    pub fn is_cached(&self, photons: usize, cutoff: &[usize]) -> bool {
        self.cache
            .get(cutoff)
            .is_some_and(|m| m.contains_key(&photons))
    }

    /// Clear the cache
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
