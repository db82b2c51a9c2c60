use tracing::{debug, trace};

use crate::dynmatrix::DynMatrix;
use crate::linalg::{
    ensure_rows, CholeskyDecomposition, LinalgError, LstsqSettings, LuDecomposition,
    SvdDecomposition, SvdSettings,
};
use crate::traits::{FloatScalar, MatrixMut};

/// Solve `A·X = B` for square `A` through LU with partial pivoting.
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::solve;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
/// let b = DynMatrix::from_rows(2, 1, &[3.0_f64, 5.0]);
/// let x = solve(&a, &b).unwrap();
/// assert!((x[(0, 0)] - 0.8).abs() < 1e-12);
/// assert!((x[(1, 0)] - 1.4).abs() < 1e-12);
/// ```
pub fn solve<T: FloatScalar>(a: &DynMatrix<T>, b: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
    LuDecomposition::new(a)?.solve(b)
}

/// Inverse of a square non-singular matrix.
pub fn inverse<T: FloatScalar>(a: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
    LuDecomposition::new(a)?.inverse()
}

/// Determinant of a square matrix: product of U's diagonal times the
/// permutation sign. A singular matrix gives (near) zero, not an error.
pub fn determinant<T: FloatScalar>(a: &DynMatrix<T>) -> Result<T, LinalgError> {
    Ok(LuDecomposition::new(a)?.det())
}

/// Least-squares solution of `A·X ≈ B`, minimizing `‖A·x - b‖` per column.
///
/// Tall and square systems first try Cholesky on the normal equations
/// `AᵗA·x = Aᵗb`. That fast path rejects Gram pivots below
/// `sqrt(sqrt(ε)·max diag(AᵗA))`, so a rank-deficient `A` reports
/// `NotPositiveDefinite` and the solve falls back to the SVD. Wide systems go
/// straight to the SVD. On the SVD path singular values `<= rcond·s_max`
/// contribute nothing, which yields the minimum-norm (Moore–Penrose)
/// solution.
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::{linear_lstsq, LstsqSettings};
///
/// // fit y = c0 + c1*x to (0,1), (1,2), (2,4)
/// let a = DynMatrix::from_rows(3, 2, &[1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0]);
/// let b = DynMatrix::from_rows(3, 1, &[1.0_f64, 2.0, 4.0]);
/// let x = linear_lstsq(&a, &b, &LstsqSettings::default()).unwrap();
/// assert!((x[(0, 0)] - 5.0 / 6.0).abs() < 1e-10);
/// assert!((x[(1, 0)] - 1.5).abs() < 1e-10);
/// ```
pub fn linear_lstsq<T: FloatScalar>(
    a: &DynMatrix<T>,
    b: &DynMatrix<T>,
    settings: &LstsqSettings<T>,
) -> Result<DynMatrix<T>, LinalgError> {
    let (m, n) = a.shape();
    ensure_rows(b, m)?;

    if m >= n {
        let gram = a.tr_mul(a);
        let max_diag = (0..n).fold(T::zero(), |acc, i| acc.max(gram[(i, i)]));
        let floor = (max_diag * T::epsilon().sqrt()).sqrt().max(T::epsilon());
        match CholeskyDecomposition::with_pivot_floor(&gram, floor) {
            Ok(chol) => {
                trace!(m, n, "lstsq solved through normal equations");
                return chol.solve(&a.tr_mul(b));
            }
            Err(LinalgError::NotPositiveDefinite) => {
                debug!(m, n, "normal equations not positive definite; falling back to SVD");
            }
            Err(e) => return Err(e),
        }
    }

    lstsq_svd(a, b, settings)
}

/// `X = V·S⁺·Uᵗ·B` with singular values `<= rcond·s_max` dropped.
fn lstsq_svd<T: FloatScalar>(
    a: &DynMatrix<T>,
    b: &DynMatrix<T>,
    settings: &LstsqSettings<T>,
) -> Result<DynMatrix<T>, LinalgError> {
    let svd = SvdDecomposition::new(
        a,
        &SvdSettings {
            full_matrices: false,
            tol: settings.tol,
        },
    )?;
    let s = svd.s();
    let s_max = s.iter().fold(T::zero(), |acc, &x| acc.max(x));
    let cutoff = settings.rcond * s_max;

    let mut utb = svd.u().tr_mul(b);
    for j in 0..utb.ncols() {
        for (c, &si) in utb.col_as_mut_slice(j, 0).iter_mut().zip(s.iter()) {
            *c = if si > cutoff { *c / si } else { T::zero() };
        }
    }
    trace!(rank = s.iter().filter(|&&si| si > cutoff).count(), "lstsq solved through SVD");
    Ok(svd.v() * &utb)
}

/// Moore–Penrose pseudo-inverse, `linear_lstsq(A, I)`.
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::{pseudoinverse, LstsqSettings};
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// let p = pseudoinverse(&a, &LstsqSettings::default()).unwrap();
/// let apa = &(&a * &p) * &a;
/// assert!(apa.max_abs_diff(&a) < 1e-6);
/// ```
pub fn pseudoinverse<T: FloatScalar>(
    a: &DynMatrix<T>,
    settings: &LstsqSettings<T>,
) -> Result<DynMatrix<T>, LinalgError> {
    linear_lstsq(a, &DynMatrix::eye(a.nrows(), T::zero()), settings)
}
