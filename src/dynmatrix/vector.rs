use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::Scalar;

use super::DynMatrix;

/// Runtime-length vector with single-index access `v[i]`.
///
/// Stored as a 1×N `DynMatrix`, so the elements are contiguous in either
/// layout. Decompositions return singular values and symmetric
/// eigenvalues as `DynVector`s; [`to_column`](Self::to_column) turns one
/// into a right-hand side.
///
/// ```
/// use numeris_dense::DynVector;
///
/// let v = DynVector::from_slice(&[3.0_f64, 0.0, 4.0]);
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.norm(), 5.0);
/// assert_eq!(v.to_column().shape(), (3, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynVector<T> {
    pub(crate) inner: DynMatrix<T>,
}

impl<T: Scalar> DynVector<T> {
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: DynMatrix::from_vec(1, data.len(), data),
        }
    }

    /// Dot product. Panics on a length mismatch.
    pub fn dot(&self, rhs: &Self) -> T {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        self.as_slice()
            .iter()
            .zip(rhs.as_slice())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Copy into an `n x 1` column matrix, the right-hand-side shape the
    /// solvers take.
    pub fn to_column(&self) -> DynMatrix<T> {
        DynMatrix::from_slice(self.len(), 1, self.as_slice())
    }
}

impl<T> DynVector<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.ncols() == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.inner.as_mut_slice()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.inner.as_slice().iter()
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for DynVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.as_slice()[i]
    }
}

impl<T> IndexMut<usize> for DynVector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.as_mut_slice()[i]
    }
}

// ── Conversions ─────────────────────────────────────────────────────

/// Unwraps to the `1 x n` row matrix the vector is stored as.
impl<T: Scalar> From<DynVector<T>> for DynMatrix<T> {
    fn from(v: DynVector<T>) -> Self {
        v.inner
    }
}

impl<T: Scalar> From<Vec<T>> for DynVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_agree() {
        let a = DynVector::from_slice(&[0.5_f64, -1.0]);
        let b = DynVector::from_vec(alloc::vec![0.5_f64, -1.0]);
        let c: DynVector<f64> = alloc::vec![0.5, -1.0].into();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(DynVector::<f64>::from_slice(&[]).is_empty());
    }

    #[test]
    fn index_mut_writes_through() {
        let mut v = DynVector::from_vec(alloc::vec![0.0_f64; 3]);
        v[1] = 42.0;
        assert_eq!(v.as_slice(), &[0.0, 42.0, 0.0]);
    }

    #[test]
    fn dot_product() {
        let a = DynVector::from_slice(&[2.0_f64, -1.0, 0.5, 4.0]);
        let b = DynVector::from_slice(&[1.0_f64, 3.0, 2.0, 0.25]);
        assert_eq!(a.dot(&b), 1.0);
    }

    #[test]
    #[should_panic(expected = "vector length mismatch")]
    fn dot_length_mismatch() {
        let a = DynVector::from_slice(&[1.0_f64, 2.0]);
        let b = DynVector::from_slice(&[1.0_f64]);
        let _ = a.dot(&b);
    }

    #[test]
    fn to_column() {
        let v = DynVector::from_slice(&[1.0_f64, 2.0, 3.0]);
        let c = v.to_column();
        assert_eq!(c.shape(), (3, 1));
        assert_eq!(c[(2, 0)], 3.0);
    }

    #[test]
    fn into_row_matrix() {
        let v = DynVector::from_slice(&[1.0_f64, 2.0, 3.0]);
        let m: DynMatrix<f64> = v.into();
        assert_eq!(m.shape(), (1, 3));
        assert_eq!(m[(0, 1)], 2.0);
    }
}
