//! Multidimensional Hermite polynomials and their gradients.
//!
//! For an `n x n` matrix `R` and a vector `y` of length `n`, this crate
//! fills the dense tensor of multidimensional Hermite polynomials
//! `H_k^{(R)}(y)` for every multi-index `0 <= k_j < cutoff_j`, together with
//! the gradients of every entry with respect to the vacuum constant, `R`
//! and `y`. These tensors evaluate batches of hafnians and loop hafnians,
//! which is how Gaussian boson sampling amplitudes are computed.
//!
//! # Main entry points
//!
//! - [`hermite_multidimensional`]: validated, real/complex dispatched
//!   polynomials with optional renormalization and change of basis
//! - [`hermite_multidimensional_recursive`]: the raw renormalized recursion
//!   `C * H_k / sqrt(prod_j k_j!)`
//! - [`grad_hermite_multidimensional_recursive`]: gradients of a tensor
//!   produced by the recursion
//! - [`HermiteEngine`]: runs both sweeps while sharing enumerated
//!   photon-number levels
//!
//! # Example
//!
//! ```
//! use multihermite::{
//!     grad_hermite_multidimensional_recursive, hermite_multidimensional_recursive, Matrix,
//! };
//!
//! let r = Matrix::from_rows(vec![vec![0.5, 0.1], vec![0.1, 0.3]]).unwrap();
//! let y = [0.2, -0.1];
//!
//! let g = hermite_multidimensional_recursive(&r, &y, 4usize, 1.0).unwrap();
//! assert_eq!(g.shape(), &[4, 4]);
//! assert!((g[[1, 0]] - 0.2_f64).abs() < 1e-15);
//!
//! let grads = grad_hermite_multidimensional_recursive(&g, &r, 4usize, &y, 1.0).unwrap();
//! assert_eq!(grads.d_r.shape(), &[4, 4]);
//! ```

/// Generate f64 and Complex64 test variants from a generic test function.
#[cfg(test)]
macro_rules! scalar_tests {
    ($name:ident, $test_fn:ident) => {
        paste::paste! {
            #[test]
            fn [<$name _f64>]() {
                $test_fn::<f64>();
            }

            #[test]
            fn [<$name _c64>]() {
                $test_fn::<num_complex::Complex64>();
            }
        }
    };
}

pub mod api;
pub mod cutoff;
pub mod error;
pub mod gradient;
pub mod matrix;
pub mod multi_index;
pub mod options;
pub mod partition;
pub mod recursion;
pub mod scalar;
pub mod scaling;
pub mod tensor;
pub mod validation;

pub use api::{
    grad_hermite_multidimensional, hermite_multidimensional, HermiteGradientTensors,
    HermiteTensor,
};
pub use cutoff::Cutoff;
pub use error::{HermiteError, Result};
pub use gradient::{grad_hermite_multidimensional_recursive, HermiteGradients};
pub use matrix::Matrix;
pub use multi_index::{decrement_at, removable, LocalIndex, MultiIndex};
pub use options::HermiteOptions;
pub use partition::{partition, PartitionCache};
pub use recursion::{hermite_multidimensional_recursive, HermiteEngine};
pub use scalar::HermiteScalar;
pub use scaling::ScalingTable;
pub use tensor::DenseTensor;
