//! Per-mode cutoffs of a Hermite tensor.

use crate::error::{HermiteError, Result};

/// Exclusive upper bound on each multi-index coordinate.
///
/// A uniform cutoff is broadcast to every mode when resolved against the
/// number of modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cutoff {
    /// Same cutoff for every mode
    Uniform(usize),
    /// One cutoff per mode
    PerMode(Vec<usize>),
}

impl Cutoff {
    /// Cutoff vector for `modes` modes.
    ///
    /// Fails if a per-mode cutoff has the wrong length, or if any entry is
    /// zero (a zero cutoff admits no multi-index at all).
    pub fn resolve(&self, modes: usize) -> Result<Vec<usize>> {
        let cutoff = match self {
            Cutoff::Uniform(c) => vec![*c; modes],
            Cutoff::PerMode(cs) => {
                if cs.len() != modes {
                    return Err(HermiteError::shape_mismatch(format!(
                        "cutoff vector has {} entries but there are {modes} modes",
                        cs.len()
                    )));
                }
                cs.clone()
            }
        };
        if let Some(j) = cutoff.iter().position(|&c| c == 0) {
            return Err(HermiteError::invalid_input(format!(
                "cutoff for mode {j} must be positive"
            )));
        }
        Ok(cutoff)
    }
}

impl From<usize> for Cutoff {
    fn from(c: usize) -> Self {
        Cutoff::Uniform(c)
    }
}

impl From<Vec<usize>> for Cutoff {
    fn from(cs: Vec<usize>) -> Self {
        Cutoff::PerMode(cs)
    }
}

impl From<&[usize]> for Cutoff {
    fn from(cs: &[usize]) -> Self {
        Cutoff::PerMode(cs.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Cutoff {
    fn from(cs: [usize; N]) -> Self {
        Cutoff::PerMode(cs.to_vec())
    }
}

/// Largest photon number any multi-index under `cutoff` can carry.
pub fn max_photons(cutoff: &[usize]) -> usize {
    cutoff.iter().map(|&c| c.saturating_sub(1)).sum()
}
