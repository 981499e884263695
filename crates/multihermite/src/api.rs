//! User-facing entry points with real/complex dispatch.

use num_complex::Complex64;
use tracing::debug;

use crate::cutoff::Cutoff;
use crate::error::{HermiteError, Result};
use crate::gradient::HermiteGradients;
use crate::matrix::Matrix;
use crate::options::HermiteOptions;
use crate::recursion::{max_cutoff, HermiteEngine};
use crate::scalar::HermiteScalar;
use crate::scaling::ScalingTable;
use crate::tensor::DenseTensor;
use crate::validation::{input_validation, real_if_close};

/// Hermite tensor with a dynamically chosen element type.
///
/// The real variant is produced when `R` and `y` are real within
/// [`REAL_TOLERANCE`](crate::validation::REAL_TOLERANCE).
#[derive(Debug, Clone, PartialEq)]
pub enum HermiteTensor {
    /// Real tensor (f64)
    Real(DenseTensor<f64>),
    /// Complex tensor (Complex64)
    Complex(DenseTensor<Complex64>),
}

impl HermiteTensor {
    /// Check if this tensor is real.
    pub fn is_real(&self) -> bool {
        matches!(self, HermiteTensor::Real(_))
    }

    /// Shape of the tensor
    pub fn shape(&self) -> &[usize] {
        match self {
            HermiteTensor::Real(t) => t.shape(),
            HermiteTensor::Complex(t) => t.shape(),
        }
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        match self {
            HermiteTensor::Real(t) => t.len(),
            HermiteTensor::Complex(t) => t.len(),
        }
    }

    /// Returns true if the tensor has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry at `idx` as a complex number
    pub fn get(&self, idx: &[usize]) -> Option<Complex64> {
        match self {
            HermiteTensor::Real(t) => t.get(idx).map(|&x| Complex64::new(x, 0.0)),
            HermiteTensor::Complex(t) => t.get(idx).copied(),
        }
    }

    /// Borrow the real tensor, if real
    pub fn as_real(&self) -> Option<&DenseTensor<f64>> {
        match self {
            HermiteTensor::Real(t) => Some(t),
            HermiteTensor::Complex(_) => None,
        }
    }

    /// Borrow the complex tensor, if complex
    pub fn as_complex(&self) -> Option<&DenseTensor<Complex64>> {
        match self {
            HermiteTensor::Real(_) => None,
            HermiteTensor::Complex(t) => Some(t),
        }
    }

    /// Complex copy of the tensor
    pub fn to_complex(&self) -> DenseTensor<Complex64> {
        match self {
            HermiteTensor::Real(t) => t.map(|&x| Complex64::new(x, 0.0)),
            HermiteTensor::Complex(t) => t.clone(),
        }
    }

    fn flatten(self) -> Self {
        match self {
            HermiteTensor::Real(t) => HermiteTensor::Real(t.flatten()),
            HermiteTensor::Complex(t) => HermiteTensor::Complex(t.flatten()),
        }
    }
}

/// Gradients with a dynamically chosen element type.
#[derive(Debug, Clone, PartialEq)]
pub enum HermiteGradientTensors {
    /// Real gradients (f64)
    Real(HermiteGradients<f64>),
    /// Complex gradients (Complex64)
    Complex(HermiteGradients<Complex64>),
}

impl HermiteGradientTensors {
    /// Check if the gradients are real.
    pub fn is_real(&self) -> bool {
        matches!(self, HermiteGradientTensors::Real(_))
    }

    /// Complex copies of `(d_c, d_r, d_y)`
    pub fn to_complex(&self) -> HermiteGradients<Complex64> {
        match self {
            HermiteGradientTensors::Real(g) => {
                let lift = |t: &DenseTensor<f64>| t.map(|&x| Complex64::new(x, 0.0));
                HermiteGradients {
                    d_c: lift(&g.d_c),
                    d_r: lift(&g.d_r),
                    d_y: lift(&g.d_y),
                }
            }
            HermiteGradientTensors::Complex(g) => g.clone(),
        }
    }
}

/// Multidimensional Hermite polynomials `H_k^{(R)}(y)` for all `k` under `cutoff`.
///
/// With `R = (1)` these are the probabilists' Hermite polynomials `He_k(y)`,
/// with `R = (2)` the physicists' `H_k(y)`. A missing `y` is the zero
/// vector. Unless `options.modified` is set, a present `y` is first mapped
/// to `R y` and `R` is validated again with the default tolerances. The
/// real recursion runs when `R` and `y` are real up to rounding, the
/// complex one otherwise.
///
/// # Example
/// ```
/// use multihermite::{hermite_multidimensional, HermiteOptions, Matrix};
/// use num_complex::Complex64;
///
/// let r = Matrix::from_rows(vec![vec![Complex64::new(1.0, 0.0)]]).unwrap();
/// let y = [Complex64::new(0.5, 0.0)];
/// let h = hermite_multidimensional(&r, 4usize, Some(&y[..]), &HermiteOptions::default()).unwrap();
///
/// // He_2(0.5) = 0.5^2 - 1
/// let he2 = h.get(&[2]).unwrap();
/// assert!((he2.re - (-0.75)).abs() < 1e-12);
/// ```
pub fn hermite_multidimensional(
    r: &Matrix<Complex64>,
    cutoff: impl Into<Cutoff>,
    y: Option<&[Complex64]>,
    options: &HermiteOptions,
) -> Result<HermiteTensor> {
    let cutoff = cutoff.into();
    if options.validate {
        input_validation(r, options.rtol, options.atol)?;
    } else if !r.is_square() {
        return Err(HermiteError::shape_mismatch(format!(
            "matrix R must be square, got {}x{}",
            r.nrows(),
            r.ncols()
        )));
    }
    let n = r.nrows();

    if let (false, Some(y)) = (options.modified, y) {
        if y.len() == n {
            debug!(modes = n, "mapping y to R y");
            let ym = r.matvec(y)?;
            let defaults = HermiteOptions::default();
            let modified = options
                .clone()
                .with_modified(true)
                .with_tolerances(defaults.rtol, defaults.atol);
            return hermite_multidimensional(r, cutoff, Some(ym.as_slice()), &modified);
        }
    }

    let y = y.map_or_else(|| vec![Complex64::new(0.0, 0.0); n], <[Complex64]>::to_vec);
    if y.len() != n {
        return Err(HermiteError::shape_mismatch(format!(
            "the matrix R and vector y have incompatible dimensions ({n}x{n} vs {})",
            y.len()
        )));
    }
    let cutoff_vec = cutoff.resolve(n)?;

    let mut engine = HermiteEngine::new();
    let values = match (real_if_close(r.as_slice()), real_if_close(&y)) {
        (Some(r_re), Some(y_re)) => {
            debug!(modes = n, "dispatching to real recursion");
            let r_re = Matrix::from_row_major(n, n, r_re)?;
            let t = engine.fill(&r_re, &y_re, &cutoff, 1.0)?;
            HermiteTensor::Real(finish(t, &cutoff_vec, options.renorm))
        }
        _ => {
            debug!(modes = n, "dispatching to complex recursion");
            let t = engine.fill(r, &y, &cutoff, Complex64::new(1.0, 0.0))?;
            HermiteTensor::Complex(finish(t, &cutoff_vec, options.renorm))
        }
    };

    Ok(if options.make_tensor {
        values
    } else {
        values.flatten()
    })
}

/// Undo the per-entry `1 / sqrt(prod_j k_j!)` scaling unless `renorm` is set.
fn finish<T: HermiteScalar>(t: DenseTensor<T>, cutoff: &[usize], renorm: bool) -> DenseTensor<T> {
    if renorm {
        return t;
    }
    let sqrt = ScalingTable::global().ensure(max_cutoff(cutoff));
    // sqrt_factorial[k] = sqrt(k!)
    let mut sqrt_factorial = vec![1.0; max_cutoff(cutoff)];
    for k in 1..sqrt_factorial.len() {
        sqrt_factorial[k] = sqrt_factorial[k - 1] * sqrt[k];
    }
    t.map_indexed(|idx, &v| v.scale(idx.iter().map(|&k| sqrt_factorial[k]).product()))
}

/// Gradients of a tensor returned by the renormalized recursion.
///
/// `array` must come from the recursion with the same `r`, `cutoff`, `y`
/// and `c` (for instance [`hermite_multidimensional_recursive`] or
/// [`hermite_multidimensional`] with `renorm` and `modified` set). Real
/// gradients are produced when `array` is real and `r`, `y` and `c` are
/// real up to rounding; otherwise everything is promoted to complex.
///
/// [`hermite_multidimensional_recursive`]: crate::hermite_multidimensional_recursive
pub fn grad_hermite_multidimensional(
    array: &HermiteTensor,
    r: &Matrix<Complex64>,
    cutoff: impl Into<Cutoff>,
    y: &[Complex64],
    c: Complex64,
) -> Result<HermiteGradientTensors> {
    let cutoff = cutoff.into();
    let mut engine = HermiteEngine::new();

    if let HermiteTensor::Real(values) = array {
        if let (Some(r_re), Some(y_re), Some(c_re)) = (
            real_if_close(r.as_slice()),
            real_if_close(y),
            real_if_close(&[c]),
        ) {
            let r_re = Matrix::from_row_major(r.nrows(), r.ncols(), r_re)?;
            let grads = engine.fill_gradients(values, &r_re, &y_re, &cutoff, c_re[0])?;
            return Ok(HermiteGradientTensors::Real(grads));
        }
    }

    let values = array.to_complex();
    let grads = engine.fill_gradients(&values, r, y, &cutoff, c)?;
    Ok(HermiteGradientTensors::Complex(grads))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_real_inputs_dispatch_real() {
        let r = Matrix::from_rows(vec![vec![c(1.0)]]).unwrap();
        let h = hermite_multidimensional(&r, 5usize, None, &HermiteOptions::default()).unwrap();
        assert!(h.is_real());
        assert_eq!(h.shape(), &[5]);
    }

    #[test]
    fn test_complex_inputs_dispatch_complex() {
        let r = Matrix::from_rows(vec![vec![Complex64::new(1.0, 0.5)]]).unwrap();
        let h = hermite_multidimensional(&r, 3usize, None, &HermiteOptions::default()).unwrap();
        assert!(!h.is_real());
        assert!(h.as_complex().is_some());
        assert!(h.as_real().is_none());
    }

    #[test]
    fn test_probabilists_hermite_at_zero() {
        // He_k(0) = 1, 0, -1, 0, 3
        let r = Matrix::from_rows(vec![vec![c(1.0)]]).unwrap();
        let h = hermite_multidimensional(&r, 5usize, None, &HermiteOptions::default()).unwrap();
        let t = h.as_real().unwrap();
        let expected = [1.0, 0.0, -1.0, 0.0, 3.0];
        for (k, e) in expected.iter().enumerate() {
            assert_relative_eq!(t[[k]], *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_renorm_divides_by_sqrt_factorial() {
        let r = Matrix::from_rows(vec![vec![c(1.0)]]).unwrap();
        let opts = HermiteOptions::default().with_renorm(true);
        let h = hermite_multidimensional(&r, 5usize, None, &opts).unwrap();
        let t = h.as_real().unwrap();
        assert_relative_eq!(t[[4]], 3.0 / 24f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_flat_output() {
        let r = Matrix::from_rows(vec![vec![c(0.5), c(0.1)], vec![c(0.1), c(0.3)]]).unwrap();
        let opts = HermiteOptions::default().with_make_tensor(false);
        let flat = hermite_multidimensional(&r, 3usize, None, &opts).unwrap();
        let full = hermite_multidimensional(&r, 3usize, None, &HermiteOptions::default()).unwrap();
        assert_eq!(flat.shape(), &[9]);
        assert_eq!(flat.get(&[5]), full.get(&[1, 2]));
    }

    #[test]
    fn test_incompatible_y() {
        let r = Matrix::from_rows(vec![vec![c(1.0), c(0.0)], vec![c(0.0), c(1.0)]]).unwrap();
        let y = [c(1.0)];
        let err = hermite_multidimensional(&r, 3usize, Some(&y[..]), &HermiteOptions::default())
            .unwrap_err();
        assert!(matches!(err, HermiteError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let r = Matrix::from_rows(vec![vec![c(1.0), c(0.2)], vec![c(0.0), c(1.0)]]).unwrap();
        assert!(hermite_multidimensional(&r, 3usize, None, &HermiteOptions::default()).is_err());
        let opts = HermiteOptions::default().with_validation(false);
        assert!(hermite_multidimensional(&r, 3usize, None, &opts).is_ok());
    }

    #[test]
    fn test_grad_real_dispatch() {
        let r = Matrix::from_rows(vec![vec![c(0.5), c(0.1)], vec![c(0.1), c(0.3)]]).unwrap();
        let y = [c(0.2), c(-0.1)];
        let opts = HermiteOptions::default().with_renorm(true).with_modified(true);
        let h = hermite_multidimensional(&r, 3usize, Some(&y[..]), &opts).unwrap();
        let g = grad_hermite_multidimensional(&h, &r, 3usize, &y, c(1.0)).unwrap();
        assert!(g.is_real());
        let gc = g.to_complex();
        assert_relative_eq!(gc.d_y[[1, 0]].re, 1.0);

        let hc = HermiteTensor::Complex(h.to_complex());
        let g2 = grad_hermite_multidimensional(&hc, &r, 3usize, &y, c(1.0)).unwrap();
        assert!(!g2.is_real());
        assert_eq!(g2.to_complex().d_r.shape(), &[3, 3]);
    }
}
