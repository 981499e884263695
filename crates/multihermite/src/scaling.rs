//! Table of square roots of small integers.
//!
//! Every recursion step divides by `sqrt(k_i)` and weights neighbours by
//! `sqrt(k_l)`, with `k` never exceeding the largest cutoff. The table is
//! computed once per process and only ever grows.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

/// Entries allocated when the process-wide table is first touched.
pub const INITIAL_LEN: usize = 1000;

static GLOBAL: OnceLock<ScalingTable> = OnceLock::new();

/// Append-only table with entry `i` equal to `sqrt(i)`.
///
/// Readers receive immutable `Arc<[f64]>` snapshots, so a run keeps using the
/// snapshot it started with while another thread grows the table.
#[derive(Debug)]
pub struct ScalingTable {
    table: RwLock<Arc<[f64]>>,
}

fn sqrt_range(start: usize, end: usize) -> impl Iterator<Item = f64> {
    (start..end).map(|i| (i as f64).sqrt())
}

impl Default for ScalingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::with_len(0)
    }

    /// Create a table holding `sqrt(0)..sqrt(len - 1)`
    pub fn with_len(len: usize) -> Self {
        Self {
            table: RwLock::new(sqrt_range(0, len).collect()),
        }
    }

    /// Process-wide table shared by all runs.
    pub fn global() -> &'static ScalingTable {
        GLOBAL.get_or_init(|| Self::with_len(INITIAL_LEN))
    }

    /// Number of entries currently available
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns true if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current contents without growing
    pub fn snapshot(&self) -> Arc<[f64]> {
        Arc::clone(&self.table.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Snapshot holding at least `len` entries, growing the table if needed.
    pub fn ensure(&self, len: usize) -> Arc<[f64]> {
        {
            let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
            if table.len() >= len {
                return Arc::clone(&table);
            }
        }

        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        // another writer may have grown it in the meantime
        if table.len() < len {
            let old = table.len();
            debug!(from = old, to = len, "growing sqrt scaling table");
            let grown: Arc<[f64]> = table.iter().copied().chain(sqrt_range(old, len)).collect();
            *table = grown;
        }
        Arc::clone(&table)
    }
}
