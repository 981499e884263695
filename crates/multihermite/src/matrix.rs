//! Row-major square-or-rectangular matrix used for the parameter matrix `R`.

use std::ops::{Index, IndexMut};

use num_traits::Zero;

use crate::error::{HermiteError, Result};
use crate::scalar::HermiteScalar;

/// Simple 2D matrix backed by Vec
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T> Matrix<T> {
    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns true if the matrix has as many rows as columns
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Row-major view of the entries
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Apply `f` to every entry.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Create a matrix from row-major data.
    pub fn from_row_major(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != nrows * ncols {
            return Err(HermiteError::shape_mismatch(format!(
                "{} elements cannot form a {nrows}x{ncols} matrix",
                data.len()
            )));
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Create a matrix from a list of rows.
    ///
    /// All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(HermiteError::shape_mismatch(format!(
                "row {i} has {} entries, expected {ncols}",
                row.len()
            )));
        }
        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            nrows,
            ncols,
        })
    }
}

impl<T: Clone> Matrix<T> {
    /// Create a new matrix from dimensions and initial value
    pub fn from_elem(nrows: usize, ncols: usize, elem: T) -> Self {
        Self {
            data: vec![elem; nrows * ncols],
            nrows,
            ncols,
        }
    }
}

impl<T: Clone + Zero> Matrix<T> {
    /// Create a zeros matrix
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }
}

impl<T: HermiteScalar> Matrix<T> {
    /// Create a diagonal matrix
    pub fn from_diag(diag: &[T]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            m[[i, i]] = d;
        }
        m
    }

    /// Matrix-vector product `self · v`.
    pub fn matvec(&self, v: &[T]) -> Result<Vec<T>> {
        if v.len() != self.ncols {
            return Err(HermiteError::shape_mismatch(format!(
                "cannot multiply {}x{} matrix by vector of length {}",
                self.nrows,
                self.ncols,
                v.len()
            )));
        }
        if self.ncols == 0 {
            return Ok(vec![T::zero(); self.nrows]);
        }
        Ok(self
            .data
            .chunks_exact(self.ncols)
            .map(|row| {
                row.iter()
                    .zip(v)
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect())
    }
}

impl<T> Index<[usize; 2]> for Matrix<T> {
    type Output = T;

    fn index(&self, idx: [usize; 2]) -> &Self::Output {
        &self.data[idx[0] * self.ncols + idx[1]]
    }
}

impl<T> IndexMut<[usize; 2]> for Matrix<T> {
    fn index_mut(&mut self, idx: [usize; 2]) -> &mut Self::Output {
        &mut self.data[idx[0] * self.ncols + idx[1]]
    }
}
