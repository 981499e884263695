//! Gradients of the renormalized Hermite tensor.
//!
//! Differentiating the value recursion entry by entry gives a recursion of
//! the same shape for the derivatives, driven by the already completed value
//! tensor. The `R` and `y` derivatives are taken along the all-ones
//! directions: `d_r[k]` is `d/dt G_k(R + tJ, y)` and `d_y[k]` is
//! `d/dt G_k(R, y + t1)` at `t = 0`, i.e. the sums of the partial
//! derivatives over every entry of `R` and `y`.

use tracing::debug;

use crate::cutoff::{max_photons, Cutoff};
use crate::error::{HermiteError, Result};
use crate::matrix::Matrix;
use crate::multi_index::{decrement_at, first_positive, removable};
use crate::recursion::{check_shapes, max_cutoff, HermiteEngine};
use crate::scalar::HermiteScalar;
use crate::scaling::ScalingTable;
use crate::tensor::DenseTensor;

/// Gradients of every tensor entry with respect to `C`, `R` and `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteGradients<T> {
    /// Derivative with respect to the vacuum constant `C`
    pub d_c: DenseTensor<T>,
    /// Derivative with respect to `R` (all-ones direction)
    pub d_r: DenseTensor<T>,
    /// Derivative with respect to `y` (all-ones direction)
    pub d_y: DenseTensor<T>,
}

impl HermiteEngine {
    /// Gradients of a tensor produced by [`HermiteEngine::fill`].
    ///
    /// `array` must be the complete output of `fill` for the same `r`, `y`,
    /// `cutoff` and `c`; it is only read. A tensor whose shape does not match
    /// the resolved cutoff is rejected before any allocation.
    pub fn fill_gradients<T: HermiteScalar>(
        &mut self,
        array: &DenseTensor<T>,
        r: &Matrix<T>,
        y: &[T],
        cutoff: &Cutoff,
        c: T,
    ) -> Result<HermiteGradients<T>> {
        let n = check_shapes(r, y)?;
        let cutoff = cutoff.resolve(n)?;
        if array.shape() != cutoff.as_slice() {
            return Err(HermiteError::precondition(format!(
                "value tensor has shape {:?} but the cutoff is {cutoff:?}",
                array.shape()
            )));
        }
        if c == T::zero() {
            return Err(HermiteError::invalid_input(
                "cannot differentiate with respect to a zero constant C",
            ));
        }

        let d_c = array.map(|&v| v / c);
        let mut d_r = DenseTensor::zeros(&cutoff)?;
        let mut d_y = DenseTensor::zeros(&cutoff)?;

        let sqrt = ScalingTable::global().ensure(max_cutoff(&cutoff));
        debug!(
            modes = n,
            cutoff = ?cutoff,
            max_photons = max_photons(&cutoff),
            "filling Hermite gradients"
        );

        self.sweep(&cutoff, |idx| {
            fill_gradient_entry(&mut d_r, &mut d_y, array, idx, r, y, &sqrt)
        });

        debug!(
            evals = self.partitions().num_evals(),
            cache_hits = self.partitions().num_cache_hits(),
            "Hermite gradients filled"
        );
        Ok(HermiteGradients { d_c, d_r, d_y })
    }
}

/// One gradient step: compute `d_r[idx]` and `d_y[idx]` from lower levels.
fn fill_gradient_entry<T: HermiteScalar>(
    d_r: &mut DenseTensor<T>,
    d_y: &mut DenseTensor<T>,
    array: &DenseTensor<T>,
    idx: &[usize],
    r: &Matrix<T>,
    y: &[T],
    sqrt: &[f64],
) {
    let Some(i) = first_positive(idx) else {
        return;
    };
    let ki = decrement_at(idx, i);
    let mut dy = y[i] * d_y[&ki] + array[&ki];
    let mut dr = y[i] * d_r[&ki];
    for (l, kl) in removable(&ki) {
        let s = sqrt[ki[l]];
        dy -= (d_y[&kl] * r[[i, l]]).scale(s);
        dr -= (r[[i, l]] * d_r[&kl] + array[&kl]).scale(s);
    }
    d_r[idx] = dr.unscale(sqrt[idx[i]]);
    d_y[idx] = dy.unscale(sqrt[idx[i]]);
}

/// Gradients with a fresh engine.
///
/// See [`HermiteEngine::fill_gradients`].
pub fn grad_hermite_multidimensional_recursive<T: HermiteScalar>(
    array: &DenseTensor<T>,
    r: &Matrix<T>,
    cutoff: impl Into<Cutoff>,
    y: &[T],
    c: T,
) -> Result<HermiteGradients<T>> {
    HermiteEngine::new().fill_gradients(array, r, y, &cutoff.into(), c)
}
