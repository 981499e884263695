//! Scalar trait shared by the real and complex recursion paths.

use num_complex::Complex64;
use num_traits::{Float, One, Zero};

/// Element type of Hermite tensors.
///
/// The recursion only needs ring arithmetic plus a way to lift the `f64`
/// square-root scaling factors into the element type.
pub trait HermiteScalar:
    Copy
    + Zero
    + One
    + std::ops::Sub<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::SubAssign
    + std::fmt::Debug
    + PartialEq
    + Send
    + Sync
    + 'static
{
    /// Lift a real number into the element type.
    fn from_f64(val: f64) -> Self;

    /// Modulus as f64.
    fn abs_val(self) -> f64;

    fn is_nan(self) -> bool;

    /// Multiply by a real factor.
    fn scale(self, factor: f64) -> Self;

    /// Divide by a real divisor.
    fn unscale(self, divisor: f64) -> Self;
}

impl HermiteScalar for f64 {
    #[inline]
    fn from_f64(val: f64) -> Self {
        val
    }

    #[inline]
    fn abs_val(self) -> f64 {
        Float::abs(self)
    }

    #[inline]
    fn is_nan(self) -> bool {
        Float::is_nan(self)
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    #[inline]
    fn unscale(self, divisor: f64) -> Self {
        self / divisor
    }
}

impl HermiteScalar for Complex64 {
    #[inline]
    fn from_f64(val: f64) -> Self {
        Complex64::new(val, 0.0)
    }

    #[inline]
    fn abs_val(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    // real factors scale both parts without a complex multiply
    #[inline]
    fn scale(self, factor: f64) -> Self {
        Complex64::new(self.re * factor, self.im * factor)
    }

    #[inline]
    fn unscale(self, divisor: f64) -> Self {
        Complex64::new(self.re / divisor, self.im / divisor)
    }
}
