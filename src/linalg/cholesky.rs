use crate::dynmatrix::{DynMatrix, DynVector};
use crate::linalg::{ensure_rows, ensure_square, substitute, LinalgError, TriangularSolve};
use crate::traits::{FloatScalar, MatrixMut};

/// Cholesky decomposition in place: A = L * L^T.
///
/// Only the lower triangle of `a` is read. On return the lower triangle
/// (including diagonal) contains L and the strict upper triangle is zero.
///
/// Fails with `NotPositiveDefinite` if a radicand is negative or a diagonal
/// entry of L is at or below `pivot_floor`. Pass `T::epsilon()` for the
/// plain test; a larger floor rejects numerically rank-deficient input.
/// A non-square `a` is a `ShapeMismatch`.
pub fn cholesky_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    pivot_floor: T,
) -> Result<(), LinalgError> {
    let n = ensure_square(&*a)?;

    for j in 0..n {
        // a[j.., j] -= L[j, k] * L[j.., k] for every finished column k
        for k in 0..j {
            let ljk = *a.get(j, k);
            if ljk == T::zero() {
                continue;
            }
            for i in j..n {
                let v = *a.get(i, j) - ljk * *a.get(i, k);
                *a.get_mut(i, j) = v;
            }
        }

        let radicand = *a.get(j, j);
        if !(radicand >= T::zero()) {
            return Err(LinalgError::NotPositiveDefinite);
        }
        let ljj = radicand.sqrt();
        if ljj <= pivot_floor {
            return Err(LinalgError::NotPositiveDefinite);
        }
        *a.get_mut(j, j) = ljj;

        let inv_ljj = T::one() / ljj;
        for x in a.col_as_mut_slice(j, j + 1).iter_mut() {
            *x = *x * inv_ljj;
        }
    }

    for j in 1..n {
        for i in 0..j {
            *a.get_mut(i, j) = T::zero();
        }
    }

    Ok(())
}

/// Cholesky decomposition `A = L·Lᵗ` of a symmetric positive-definite matrix.
///
/// # Example
///
/// ```
/// use numeris_dense::{DynMatrix, DynVector};
///
/// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 2.0, 2.0, 3.0]);
/// let chol = a.cholesky().unwrap();
///
/// let b = DynVector::from_slice(&[8.0_f64, 7.0]);
/// let x = chol.solve_vec(&b).unwrap(); // solve Ax = b
/// assert!((4.0 * x[0] + 2.0 * x[1] - 8.0).abs() < 1e-12);
///
/// assert!((chol.det() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CholeskyDecomposition<T> {
    l: DynMatrix<T>,
}

impl<T: FloatScalar> CholeskyDecomposition<T> {
    /// Decompose a symmetric positive-definite matrix (lower triangle read).
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        Self::with_pivot_floor(a, T::epsilon())
    }

    pub(crate) fn with_pivot_floor(a: &DynMatrix<T>, pivot_floor: T) -> Result<Self, LinalgError> {
        ensure_square(a)?;
        let mut l = a.clone();
        cholesky_in_place(&mut l, pivot_floor)?;
        Ok(Self { l })
    }

    /// Lower triangular factor L, zeros above the diagonal.
    #[inline]
    pub fn l(&self) -> &DynMatrix<T> {
        &self.l
    }

    /// Solve `A·X = B`: forward with L, then backward with Lᵗ.
    pub fn solve(&self, b: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
        ensure_rows(b, self.l.nrows())?;
        let mut x = b.clone();
        for j in 0..x.ncols() {
            self.solve_in_place(x.col_as_mut_slice(j, 0))?;
        }
        Ok(x)
    }

    /// Solve `A·x = b` for a vector right-hand side.
    pub fn solve_vec(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        let n = self.l.nrows();
        if b.len() != n {
            return Err(LinalgError::ShapeMismatch {
                expected: (n, 1),
                got: (b.len(), 1),
            });
        }
        let mut x = b.clone();
        self.solve_in_place(x.as_mut_slice())?;
        Ok(x)
    }

    fn solve_in_place(&self, b: &mut [T]) -> Result<(), LinalgError> {
        substitute(&self.l, TriangularSolve::lower(), b)?;
        substitute(&self.l, TriangularSolve::lower().transposed(), b)
    }

    /// Determinant: det(A) = (Π L[i,i])².
    pub fn det(&self) -> T {
        let n = self.l.nrows();
        let mut prod = T::one();
        for i in 0..n {
            prod = prod * self.l[(i, i)];
        }
        prod * prod
    }

    /// Log-determinant: ln(det(A)) = 2 · Σ ln(L[i,i]).
    ///
    /// Does not overflow where `det()` would.
    pub fn ln_det(&self) -> T {
        let n = self.l.nrows();
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self.l[(i, i)].ln();
        }
        T::two() * sum
    }

    /// Matrix inverse using the factorization.
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.solve(&DynMatrix::eye(self.l.nrows(), T::zero()))
    }
}

/// Factor a symmetric positive-definite matrix as `A = L·Lᵗ`.
pub fn cholesky_decomposition<T: FloatScalar>(
    a: &DynMatrix<T>,
) -> Result<CholeskyDecomposition<T>, LinalgError> {
    CholeskyDecomposition::new(a)
}

/// Solve `A·X = B` from an existing Cholesky factorization.
pub fn solve_cholesky<T: FloatScalar>(
    chol: &CholeskyDecomposition<T>,
    b: &DynMatrix<T>,
) -> Result<DynMatrix<T>, LinalgError> {
    chol.solve(b)
}
