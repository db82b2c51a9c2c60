use crate::traits::Scalar;

use super::vector::DynVector;
use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    fn diagonal(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.nrows.min(self.ncols)).map(move |i| self[(i, i)])
    }

    /// Sum of the main diagonal (rectangular matrices use the leading square).
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        self.diagonal().fold(T::zero(), |acc, d| acc + d)
    }

    /// Main diagonal as a vector of length `min(nrows, ncols)`.
    pub fn diag(&self) -> DynVector<T> {
        DynVector::from_vec(self.diagonal().collect())
    }

    /// Square matrix with `v` on the diagonal.
    ///
    /// ```
    /// use numeris_dense::{DynMatrix, DynVector};
    /// let m = DynMatrix::from_diag(&DynVector::from_slice(&[2.0_f64, 3.0]));
    /// assert_eq!(m.diag().as_slice(), &[2.0, 3.0]);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_diag(v: &DynVector<T>) -> Self {
        let n = v.len();
        Self::from_fn(n, n, |i, j| if i == j { v[i] } else { T::zero() })
    }

    /// Exact symmetry test; `false` for non-square input.
    pub fn is_symmetric(&self) -> bool {
        self.is_square()
            && (0..self.ncols).all(|j| (0..j).all(|i| self[(i, j)] == self[(j, i)]))
    }
}
