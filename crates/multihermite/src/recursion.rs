//! Recursive filling of the multidimensional Hermite tensor.
//!
//! With `G_k = H_k / sqrt(prod_j k_j!)`, every entry is obtained from entries
//! one and two photons below it:
//!
//! ```text
//! G_{k} = ( y_i G_{k - e_i} - sum_l sqrt((k - e_i)_l) R_{il} G_{k - e_i - e_l} ) / sqrt(k_i)
//! ```
//!
//! where `i` is the first positive coordinate of `k`. Sweeping photon-number
//! levels in increasing order guarantees every right-hand side entry is
//! already final when it is read.

use tracing::{debug, trace};

use crate::cutoff::{max_photons, Cutoff};
use crate::error::{HermiteError, Result};
use crate::matrix::Matrix;
use crate::multi_index::{decrement_at, first_positive, removable};
use crate::partition::PartitionCache;
use crate::scalar::HermiteScalar;
use crate::scaling::ScalingTable;
use crate::tensor::DenseTensor;

/// Runs the value and gradient sweeps.
///
/// The engine owns a [`PartitionCache`], so a gradient sweep following a
/// value sweep over the same cutoff reuses every enumerated level. Square
/// roots come from the process-wide [`ScalingTable`].
#[derive(Debug, Default)]
pub struct HermiteEngine {
    partitions: PartitionCache,
}

impl HermiteEngine {
    /// Create an engine with an empty partition cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition cache shared by the sweeps of this engine
    pub fn partitions(&self) -> &PartitionCache {
        &self.partitions
    }

    /// Drop all cached partitions
    pub fn clear_cache(&mut self) {
        self.partitions.clear_cache();
    }

    /// Renormalized Hermite tensor `C * G_k^{(R)}(y)` for all `k` under `cutoff`.
    ///
    /// The entry at the all-zero multi-index is `c`; the shape of the result
    /// is the resolved cutoff vector. Shapes are checked before anything is
    /// allocated.
    pub fn fill<T: HermiteScalar>(
        &mut self,
        r: &Matrix<T>,
        y: &[T],
        cutoff: &Cutoff,
        c: T,
    ) -> Result<DenseTensor<T>> {
        let n = check_shapes(r, y)?;
        let cutoff = cutoff.resolve(n)?;
        let mut array = DenseTensor::zeros(&cutoff)?;
        array[vec![0; n]] = c;

        let top = max_photons(&cutoff);
        let sqrt = ScalingTable::global().ensure(max_cutoff(&cutoff));
        debug!(modes = n, cutoff = ?cutoff, max_photons = top, "filling Hermite tensor");

        self.sweep(&cutoff, |idx| fill_entry(&mut array, idx, r, y, &sqrt));

        debug!(
            evals = self.partitions.num_evals(),
            cache_hits = self.partitions.num_cache_hits(),
            "Hermite tensor filled"
        );
        Ok(array)
    }

    /// Visit every multi-index of `cutoff` level by level, from one photon up.
    ///
    /// Level `p` is complete before level `p + 1` starts.
    pub(crate) fn sweep(&mut self, cutoff: &[usize], mut visit: impl FnMut(&[usize])) {
        for photons in 1..=max_photons(cutoff) {
            let level = self.partitions.get(photons, cutoff);
            trace!(photons, entries = level.len(), "photon level");
            for idx in level.iter() {
                visit(idx);
            }
        }
    }
}

/// One recursion step: compute `array[idx]` from lower photon levels.
fn fill_entry<T: HermiteScalar>(
    array: &mut DenseTensor<T>,
    idx: &[usize],
    r: &Matrix<T>,
    y: &[T],
    sqrt: &[f64],
) {
    // only the all-zero index has no positive coordinate, and it is never swept
    let Some(i) = first_positive(idx) else {
        return;
    };
    let ki = decrement_at(idx, i);
    let mut u = y[i] * array[&ki];
    for (l, kl) in removable(&ki) {
        u -= r[[i, l]].scale(sqrt[ki[l]]) * array[&kl];
    }
    array[idx] = u.unscale(sqrt[idx[i]]);
}

/// Number of modes, after checking `r` is square and matches `y`.
pub(crate) fn check_shapes<T>(r: &Matrix<T>, y: &[T]) -> Result<usize> {
    if !r.is_square() {
        return Err(HermiteError::shape_mismatch(format!(
            "matrix R must be square, got {}x{}",
            r.nrows(),
            r.ncols()
        )));
    }
    let n = r.nrows();
    if y.len() != n {
        return Err(HermiteError::shape_mismatch(format!(
            "the matrix R and vector y have incompatible dimensions ({n}x{n} vs {})",
            y.len()
        )));
    }
    Ok(n)
}

/// Entries of the scaling table a sweep over `cutoff` reads.
pub(crate) fn max_cutoff(cutoff: &[usize]) -> usize {
    cutoff.iter().copied().max().unwrap_or(1)
}

/// Renormalized Hermite tensor with a fresh engine.
///
/// See [`HermiteEngine::fill`].
pub fn hermite_multidimensional_recursive<T: HermiteScalar>(
    r: &Matrix<T>,
    y: &[T],
    cutoff: impl Into<Cutoff>,
    c: T,
) -> Result<DenseTensor<T>> {
    HermiteEngine::new().fill(r, y, &cutoff.into(), c)
}
