//! Options for the public Hermite entry points.

/// Options for [`hermite_multidimensional`](crate::hermite_multidimensional).
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteOptions {
    /// Return `H_k / sqrt(prod_j k_j!)` instead of `H_k`
    pub renorm: bool,
    /// Return an n-dimensional tensor; `false` returns a flat rank-1 tensor
    pub make_tensor: bool,
    /// Treat `y` as already transformed (`y <- R y` is skipped)
    pub modified: bool,
    /// Relative tolerance of the symmetry check
    pub rtol: f64,
    /// Absolute tolerance of the symmetry check
    pub atol: f64,
    /// Run the NaN/symmetry checks on `R`
    pub validate: bool,
}

impl Default for HermiteOptions {
    fn default() -> Self {
        Self {
            renorm: false,
            make_tensor: true,
            modified: false,
            rtol: 1e-5,
            atol: 1e-8,
            validate: true,
        }
    }
}

impl HermiteOptions {
    /// Set renormalization.
    pub fn with_renorm(mut self, renorm: bool) -> Self {
        self.renorm = renorm;
        self
    }

    /// Set whether an n-dimensional tensor is returned.
    pub fn with_make_tensor(mut self, make_tensor: bool) -> Self {
        self.make_tensor = make_tensor;
        self
    }

    /// Set whether `y` is already in the modified basis.
    pub fn with_modified(mut self, modified: bool) -> Self {
        self.modified = modified;
        self
    }

    /// Set symmetry tolerances.
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }

    /// Enable or disable input validation.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = HermiteOptions::default();
        assert!(!o.renorm);
        assert!(o.make_tensor);
        assert!(!o.modified);
        assert_eq!(o.rtol, 1e-5);
        assert_eq!(o.atol, 1e-8);
        assert!(o.validate);
    }

    #[test]
    fn test_builder() {
        let o = HermiteOptions::default()
            .with_renorm(true)
            .with_make_tensor(false)
            .with_modified(true)
            .with_tolerances(1e-3, 1e-6)
            .with_validation(false);
        assert!(o.renorm && !o.make_tensor && o.modified && !o.validate);
        assert_eq!((o.rtol, o.atol), (1e-3, 1e-6));
    }
}
