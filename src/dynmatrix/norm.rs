use crate::traits::FloatScalar;

use super::vector::DynVector;
use super::DynMatrix;

impl<T: FloatScalar> DynVector<T> {
    /// Euclidean length, `sqrt(v·v)`.
    ///
    /// ```
    /// use numeris_dense::DynVector;
    /// let v = DynVector::from_slice(&[6.0_f64, 8.0]);
    /// assert_eq!(v.norm(), 10.0);
    /// ```
    pub fn norm(&self) -> T {
        self.dot(self).sqrt()
    }
}

impl<T: FloatScalar> DynMatrix<T> {
    /// `sqrt(Σ aᵢⱼ²)`.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[2.0_f64, 0.0, 1.0, 2.0]);
    /// assert_eq!(m.frobenius_norm(), 3.0);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        self.data.iter().map(|&x| x * x).fold(T::zero(), |acc, x| acc + x).sqrt()
    }

    /// Largest absolute row sum; zero for an empty matrix.
    pub fn norm_inf(&self) -> T {
        (0..self.nrows)
            .map(|i| (0..self.ncols).fold(T::zero(), |acc, j| acc + self[(i, j)].abs()))
            .fold(T::zero(), T::max)
    }
}
