//! Input checks run before any tensor is allocated.

use num_complex::Complex64;

use crate::error::{HermiteError, Result};
use crate::matrix::Matrix;
use crate::scalar::HermiteScalar;

/// Imaginary parts below this are treated as zero by [`real_if_close`].
pub const REAL_TOLERANCE: f64 = 100.0 * f64::EPSILON;

/// Check that `a` is a square, NaN-free, symmetric matrix, in that order.
///
/// Symmetry is tested entrywise as `|a_ij - a_ji| <= atol + rtol * |a_ji|`.
pub fn input_validation<T: HermiteScalar>(a: &Matrix<T>, rtol: f64, atol: f64) -> Result<()> {
    if !a.is_square() {
        return Err(HermiteError::shape_mismatch(format!(
            "matrix must be square, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    if a.as_slice().iter().any(|x| x.is_nan()) {
        return Err(HermiteError::invalid_input("matrix must not contain NaNs"));
    }
    if !is_symmetric(a, rtol, atol) {
        return Err(HermiteError::invalid_input("matrix must be symmetric"));
    }
    Ok(())
}

/// Entrywise closeness of `a` and its transpose.
pub fn is_symmetric<T: HermiteScalar>(a: &Matrix<T>, rtol: f64, atol: f64) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.nrows();
    (0..n).all(|i| {
        (0..n).all(|j| {
            let (x, xt) = (a[[i, j]], a[[j, i]]);
            (x - xt).abs_val() <= atol + rtol * xt.abs_val()
        })
    })
}

/// Real parts of `values` if every imaginary part is negligible.
pub fn real_if_close(values: &[Complex64]) -> Option<Vec<f64>> {
    values
        .iter()
        .all(|z| z.im.abs() < REAL_TOLERANCE)
        .then(|| values.iter().map(|z| z.re).collect())
}
