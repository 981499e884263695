//! Dense n-dimensional tensor indexed by multi-indices.

use std::ops::{Index, IndexMut};

use num_traits::Zero;

use crate::error::{HermiteError, Result};
use crate::multi_index::MultiIndex;

/// A dense tensor stored as a flat row-major Vec with shape information.
///
/// A rank-0 tensor (empty shape) holds exactly one element.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTensor<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

/// Number of elements of a tensor with the given shape, or `None` on overflow.
pub(crate) fn checked_len(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for k in (0..shape.len().saturating_sub(1)).rev() {
        strides[k] = strides[k + 1] * shape[k + 1];
    }
    strides
}

impl<T: Clone> DenseTensor<T> {
    /// Create a tensor with every entry set to `elem`.
    pub fn from_elem(shape: &[usize], elem: T) -> Result<Self> {
        let len = checked_len(shape).ok_or_else(|| {
            HermiteError::invalid_input(format!("tensor of shape {shape:?} is too large"))
        })?;
        Ok(Self {
            data: vec![elem; len],
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
        })
    }

    /// Create from flat row-major data with shape
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        if checked_len(shape) != Some(data.len()) {
            return Err(HermiteError::shape_mismatch(format!(
                "{} elements cannot form a tensor of shape {shape:?}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
        })
    }

    /// Apply `f` to every entry, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> DenseTensor<U> {
        DenseTensor {
            data: self.data.iter().map(f).collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }

    /// Apply `f` to every `(multi-index, entry)` pair, keeping the shape.
    pub fn map_indexed<U>(&self, mut f: impl FnMut(&[usize], &T) -> U) -> DenseTensor<U> {
        DenseTensor {
            data: self.iter_indexed().map(|(idx, v)| f(&idx, v)).collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }
}

impl<T: Clone + Zero> DenseTensor<T> {
    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::from_elem(shape, T::zero())
    }
}

impl<T> DenseTensor<T> {
    /// Shape of the tensor
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the tensor has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major view of the entries
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Flat offset of a multi-index.
    ///
    /// # Panics
    /// Panics if `idx` has the wrong length or a coordinate is out of range.
    pub fn offset(&self, idx: &[usize]) -> usize {
        assert_eq!(
            idx.len(),
            self.shape.len(),
            "multi-index {idx:?} does not match tensor shape {:?}",
            self.shape
        );
        idx.iter()
            .zip(&self.shape)
            .zip(&self.strides)
            .map(|((&k, &d), &s)| {
                assert!(k < d, "multi-index {idx:?} out of bounds for shape {:?}", self.shape);
                k * s
            })
            .sum()
    }

    /// Multi-index of a flat row-major offset.
    pub fn unravel(&self, mut offset: usize) -> MultiIndex {
        self.strides
            .iter()
            .map(|&s| {
                let k = offset / s;
                offset %= s;
                k
            })
            .collect()
    }

    /// Checked element access
    pub fn get(&self, idx: &[usize]) -> Option<&T> {
        if idx.len() != self.shape.len() || idx.iter().zip(&self.shape).any(|(&k, &d)| k >= d) {
            return None;
        }
        self.data.get(self.offset(idx))
    }

    /// Iterate over `(multi-index, value)` pairs in row-major order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (MultiIndex, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(offset, v)| (self.unravel(offset), v))
    }

    /// Reinterpret the data with a new shape of equal size.
    pub fn reshape(self, shape: &[usize]) -> Result<Self> {
        if checked_len(shape) != Some(self.data.len()) {
            return Err(HermiteError::shape_mismatch(format!(
                "cannot reshape tensor of shape {:?} into {shape:?}",
                self.shape
            )));
        }
        Ok(Self {
            data: self.data,
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
        })
    }

    /// Rank-1 view of all entries in row-major order.
    pub fn flatten(self) -> Self {
        let len = self.data.len();
        Self {
            data: self.data,
            shape: vec![len],
            strides: vec![1],
        }
    }
}

impl<T, I: AsRef<[usize]>> Index<I> for DenseTensor<T> {
    type Output = T;

    fn index(&self, idx: I) -> &Self::Output {
        &self.data[self.offset(idx.as_ref())]
    }
}

impl<T, I: AsRef<[usize]>> IndexMut<I> for DenseTensor<T> {
    fn index_mut(&mut self, idx: I) -> &mut Self::Output {
        let offset = self.offset(idx.as_ref());
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_and_shape() {
        let t: DenseTensor<f64> = DenseTensor::zeros(&[2, 3, 4]).unwrap();
        assert_eq!(t.shape(), &[2, 3, 4]);
        assert_eq!(t.ndim(), 3);
        assert_eq!(t.len(), 24);
        assert!(t.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_rank0_tensor_has_one_element() {
        let mut t: DenseTensor<f64> = DenseTensor::zeros(&[]).unwrap();
        assert_eq!(t.len(), 1);
        t[[0usize; 0]] = 3.0;
        assert_eq!(t.as_slice(), &[3.0]);
    }

    #[test]
    fn test_row_major_layout() {
        let mut t: DenseTensor<f64> = DenseTensor::zeros(&[2, 3]).unwrap();
        t[[1, 2]] = 5.0;
        t[vec![0, 1]] = 1.0;
        assert_eq!(t.offset(&[1, 2]), 5);
        assert_eq!(t.as_slice()[5], 5.0);
        assert_eq!(t.as_slice()[1], 1.0);
        assert_eq!(t.unravel(5), vec![1, 2]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let t: DenseTensor<f64> = DenseTensor::zeros(&[2, 2]).unwrap();
        assert!(t.get(&[2, 0]).is_none());
        assert!(t.get(&[0]).is_none());
        assert_eq!(t.get(&[1, 1]), Some(&0.0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let t: DenseTensor<f64> = DenseTensor::zeros(&[2, 2]).unwrap();
        let _value: f64 = t[[0, 2]];
    }

    #[test]
    fn test_reshape_and_flatten() {
        let t = DenseTensor::from_vec((0..6).map(f64::from).collect(), &[2, 3]).unwrap();
        let r = t.clone().reshape(&[3, 2]).unwrap();
        assert_eq!(r[[2, 1]], 5.0);
        assert!(t.clone().reshape(&[4, 2]).is_err());
        let f = t.flatten();
        assert_eq!(f.shape(), &[6]);
        assert_eq!(f[[4]], 4.0);
    }

    #[test]
    fn test_iter_indexed() {
        let t = DenseTensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let items: Vec<_> = t.iter_indexed().map(|(k, &v)| (k, v)).collect();
        assert_eq!(items[2], (vec![1, 0], 3));
    }

    #[test]
    fn test_map_indexed() {
        let t = DenseTensor::from_vec(vec![1.0, 1.0, 1.0, 1.0], &[2, 2]).unwrap();
        let m = t.map_indexed(|idx, &v| v * (idx[0] * 10 + idx[1]) as f64);
        assert_eq!(m.as_slice(), &[0.0, 1.0, 10.0, 11.0]);
    }

    #[test]
    fn test_overflowing_shape_rejected() {
        let err = DenseTensor::<f64>::zeros(&[usize::MAX, 2]).unwrap_err();
        assert!(matches!(err, HermiteError::InvalidInput { .. }));
    }
}
