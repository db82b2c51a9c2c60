use alloc::vec::Vec;

use num_complex::Complex;

use super::{DynMatrix, DynVector};
use crate::linalg::{
    self, CholeskyDecomposition, EigenSettings, LinalgError, LstsqSettings, LuDecomposition,
    QrDecomposition, SvdDecomposition, SvdSettings, SymmetricEigen,
};
use crate::traits::FloatScalar;

// ── Convenience methods on DynMatrix ────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::new(self)
    }

    /// Cholesky decomposition (`A = L·Lᵗ`).
    pub fn cholesky(&self) -> Result<CholeskyDecomposition<T>, LinalgError> {
        CholeskyDecomposition::new(self)
    }

    /// QR decomposition using Householder reflections.
    pub fn qr(&self) -> Result<QrDecomposition<T>, LinalgError> {
        QrDecomposition::new(self)
    }

    /// Solve `A·X = B` for `X` via LU decomposition.
    pub fn solve(&self, b: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
        linalg::solve(self, b)
    }

    /// Solve `A·x = b` for a single right-hand side.
    ///
    /// ```
    /// use numeris_dense::{DynMatrix, DynVector};
    /// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
    /// let b = DynVector::from_slice(&[4.0_f64, 11.0]);
    /// let x = a.solve_vec(&b).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve_vec(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        self.lu()?.solve_vec(b)
    }

    /// Matrix inverse via LU decomposition.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let a_inv = a.inverse().unwrap();
    /// let id = &a * &a_inv;
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!((id[(0, 1)]).abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        linalg::inverse(self)
    }

    /// Determinant via LU. Fails only for a non-square matrix.
    pub fn det(&self) -> Result<T, LinalgError> {
        linalg::determinant(self)
    }

    /// Eigenvalues of a general square matrix (unshifted QR iteration).
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// use numeris_dense::linalg::EigenSettings;
    /// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 0.0, 1.0, 3.0]);
    /// let ev = a.eigenvalues(&EigenSettings::default()).unwrap();
    /// let sum = ev[0] + ev[1];
    /// assert!((sum.re - a.trace()).abs() < 1e-9);
    /// assert!(sum.im.abs() < 1e-12);
    /// ```
    pub fn eigenvalues(&self, settings: &EigenSettings<T>) -> Result<Vec<Complex<T>>, LinalgError> {
        linalg::eigenvalues(self, settings)
    }

    /// Symmetric eigendecomposition (Jacobi rotations).
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// use numeris_dense::linalg::EigenSettings;
    /// let a = DynMatrix::from_rows(2, 2, &[5.0_f64, 2.0, 2.0, 2.0]);
    /// let eig = a.eig_symmetric(&EigenSettings::default()).unwrap();
    /// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-10);
    /// assert!((eig.eigenvalues()[1] - 6.0).abs() < 1e-10);
    /// ```
    pub fn eig_symmetric(&self, settings: &EigenSettings<T>) -> Result<SymmetricEigen<T>, LinalgError> {
        SymmetricEigen::new(self, settings)
    }

    /// Singular value decomposition of any `m x n` matrix.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// use numeris_dense::linalg::SvdSettings;
    /// let a = DynMatrix::from_rows(3, 2, &[
    ///     3.0_f64, 0.0,
    ///     0.0, 4.0,
    ///     0.0, 0.0,
    /// ]);
    /// let svd = a.svd(&SvdSettings::default()).unwrap();
    /// assert!((svd.s()[0] - 4.0).abs() < 1e-10);
    /// assert!((svd.s()[1] - 3.0).abs() < 1e-10);
    /// ```
    pub fn svd(&self, settings: &SvdSettings<T>) -> Result<SvdDecomposition<T>, LinalgError> {
        SvdDecomposition::new(self, settings)
    }

    /// Least-squares solve of `A·X ≈ B`.
    pub fn lstsq(&self, b: &DynMatrix<T>, settings: &LstsqSettings<T>) -> Result<DynMatrix<T>, LinalgError> {
        linalg::linear_lstsq(self, b, settings)
    }

    /// Moore–Penrose pseudo-inverse.
    pub fn pseudoinverse(&self, settings: &LstsqSettings<T>) -> Result<DynMatrix<T>, LinalgError> {
        linalg::pseudoinverse(self, settings)
    }
}
