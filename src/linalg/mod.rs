//! Dense factorizations, eigen-solvers and the solvers built on them.
//!
//! Every routine takes its input by shared reference and returns a fresh
//! result struct or matrix. Tolerances and iteration budgets are explicit
//! settings arguments (see [`EigenSettings`], [`SvdSettings`],
//! [`LstsqSettings`]).
//!
//! ```
//! use numeris_dense::DynMatrix;
//! use numeris_dense::linalg;
//!
//! let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 2.0, 2.0, 3.0]);
//! let b = DynMatrix::from_rows(2, 1, &[2.0_f64, 1.0]);
//!
//! let x = linalg::solve(&a, &b).unwrap();
//! assert!(((&a * &x) - &b).frobenius_norm() < 1e-12);
//!
//! let chol = linalg::cholesky_decomposition(&a).unwrap();
//! let y = linalg::solve_cholesky(&chol, &b).unwrap();
//! assert!(x.max_abs_diff(&y) < 1e-12);
//! ```

pub(crate) mod cholesky;
pub(crate) mod eigen;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod solve;
pub(crate) mod svd;
pub(crate) mod symmetric_eigen;
pub(crate) mod triangular;

pub use cholesky::{cholesky_decomposition, cholesky_in_place, solve_cholesky, CholeskyDecomposition};
pub use eigen::eigenvalues;
pub use lu::{lu_decomposition, lu_in_place, solve_lu, LuDecomposition};
pub use qr::{qr_decomposition, QrDecomposition};
pub use solve::{determinant, inverse, linear_lstsq, pseudoinverse, solve};
pub use svd::{diag_svd, svd_decomposition, SvdDecomposition};
pub use symmetric_eigen::{eigen_symmetric, SymmetricEigen};
pub use triangular::{
    back_substitute, forward_substitute, solve_triangular, solve_triangular_vec, substitute,
    TriangularSolve,
};

use crate::traits::MatrixRef;

/// Errors from linear algebra operations.
///
/// Iterative algorithms never fail on exhausting their budget, so there is
/// no convergence variant.
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::LinalgError;
///
/// let singular = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(singular.inverse().unwrap_err(), LinalgError::Singular);
///
/// let not_pd = DynMatrix::from_rows(2, 2, &[1.0_f64, 5.0, 5.0, 1.0]);
/// assert_eq!(not_pd.cholesky().unwrap_err(), LinalgError::NotPositiveDefinite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand dimensions do not fit the operation.
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// Zero or near-zero diagonal met during a triangular solve.
    Singular,
    /// Negative or negligible Cholesky radicand.
    NotPositiveDefinite,
    /// Negligible Householder reflector norm.
    LinearlyDependentColumns,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::ShapeMismatch { expected, got } => write!(
                f,
                "shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::NotPositiveDefinite => write!(f, "matrix is not positive definite"),
            LinalgError::LinearlyDependentColumns => {
                write!(f, "matrix columns are linearly dependent")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Settings for the iterative eigen-solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenSettings<T> {
    /// Iteration budget (default: 1000). QR sweeps for [`eigenvalues`],
    /// Jacobi sweeps of `n(n-1)/2` rotations for [`eigen_symmetric`].
    pub max_iter: usize,
    /// Convergence threshold on off-diagonal magnitudes (default: 1e-6).
    pub tol: T,
}

impl Default for EigenSettings<f64> {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tol: 1e-6,
        }
    }
}

impl Default for EigenSettings<f32> {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tol: 1e-6,
        }
    }
}

/// Settings for [`svd_decomposition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdSettings<T> {
    /// Return square `U` (m×m) and `V` (n×n) instead of the reduced
    /// m×k and n×k factors (default: false).
    pub full_matrices: bool,
    /// Jacobi convergence threshold on the Gram matrix (default: 1e-6).
    pub tol: T,
}

impl Default for SvdSettings<f64> {
    fn default() -> Self {
        Self {
            full_matrices: false,
            tol: 1e-6,
        }
    }
}

impl Default for SvdSettings<f32> {
    fn default() -> Self {
        Self {
            full_matrices: false,
            tol: 1e-6,
        }
    }
}

/// Settings for [`linear_lstsq`] and [`pseudoinverse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LstsqSettings<T> {
    /// Jacobi threshold used by the SVD fallback (default: 1e-12 for f64,
    /// 1e-6 for f32).
    pub tol: T,
    /// Singular values at or below `rcond * s_max` are treated as zero
    /// (default: 1e-7 for f64, 1e-3 for f32).
    pub rcond: T,
}

impl Default for LstsqSettings<f64> {
    fn default() -> Self {
        Self {
            tol: 1e-12,
            rcond: 1e-7,
        }
    }
}

impl Default for LstsqSettings<f32> {
    fn default() -> Self {
        Self {
            tol: 1e-6,
            rcond: 1e-3,
        }
    }
}

/// `Ok(n)` for an `n x n` matrix, `ShapeMismatch` otherwise.
pub(crate) fn ensure_square<T>(a: &impl MatrixRef<T>) -> Result<usize, LinalgError> {
    let (m, n) = (a.nrows(), a.ncols());
    if m != n {
        return Err(LinalgError::ShapeMismatch {
            expected: (m, m),
            got: (m, n),
        });
    }
    Ok(n)
}

/// `Ok(())` when `b` has `rows` rows.
pub(crate) fn ensure_rows<T>(b: &impl MatrixRef<T>, rows: usize) -> Result<(), LinalgError> {
    if b.nrows() != rows {
        return Err(LinalgError::ShapeMismatch {
            expected: (rows, b.ncols()),
            got: (b.nrows(), b.ncols()),
        });
    }
    Ok(())
}
