use crate::dynmatrix::{DynMatrix, DynVector};
use crate::linalg::{ensure_rows, ensure_square, LinalgError};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Which triangle of the coefficient matrix to use, and how.
///
/// ```
/// use numeris_dense::linalg::TriangularSolve;
///
/// let mode = TriangularSolve::lower().unit().transposed();
/// assert!(mode.lower && mode.unit_diagonal && mode.transpose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangularSolve {
    /// Read the lower triangle (otherwise the upper one).
    pub lower: bool,
    /// Treat the diagonal as all ones without reading it.
    pub unit_diagonal: bool,
    /// Solve `Aᵗ·x = b` instead of `A·x = b`.
    pub transpose: bool,
}

impl TriangularSolve {
    pub const fn lower() -> Self {
        Self {
            lower: true,
            unit_diagonal: false,
            transpose: false,
        }
    }

    pub const fn upper() -> Self {
        Self {
            lower: false,
            unit_diagonal: false,
            transpose: false,
        }
    }

    pub const fn unit(self) -> Self {
        Self {
            unit_diagonal: true,
            ..self
        }
    }

    pub const fn transposed(self) -> Self {
        Self {
            transpose: true,
            ..self
        }
    }
}

/// Solve a triangular system in place: `b` is overwritten with `x`.
///
/// Only the triangle selected by `mode` is read. Substitution runs forward
/// when the effective matrix is lower triangular (lower, or upper
/// transposed) and backward otherwise.
///
/// Returns `ShapeMismatch` if `a` is not square or `b` has the wrong length,
/// and `Singular` if a non-unit diagonal entry has magnitude `<= ε`.
pub fn substitute<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    mode: TriangularSolve,
    b: &mut [T],
) -> Result<(), LinalgError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(LinalgError::ShapeMismatch {
            expected: (n, n),
            got: (n, a.ncols()),
        });
    }
    if b.len() != n {
        return Err(LinalgError::ShapeMismatch {
            expected: (n, 1),
            got: (b.len(), 1),
        });
    }

    let coeff = |i: usize, j: usize| {
        if mode.transpose {
            *a.get(j, i)
        } else {
            *a.get(i, j)
        }
    };
    let pivot = |i: usize, sum: T| {
        if mode.unit_diagonal {
            return Ok(sum);
        }
        let d = *a.get(i, i);
        if d.abs() <= T::epsilon() {
            return Err(LinalgError::Singular);
        }
        Ok(sum / d)
    };

    if mode.lower != mode.transpose {
        for i in 0..n {
            let mut sum = b[i];
            for j in 0..i {
                sum = sum - coeff(i, j) * b[j];
            }
            b[i] = pivot(i, sum)?;
        }
    } else {
        for i in (0..n).rev() {
            let mut sum = b[i];
            for j in (i + 1)..n {
                sum = sum - coeff(i, j) * b[j];
            }
            b[i] = pivot(i, sum)?;
        }
    }
    Ok(())
}

/// Forward substitution `L·x = b` on the lower triangle of `l`, in place.
pub fn forward_substitute<T: FloatScalar>(
    l: &impl MatrixRef<T>,
    unit_diagonal: bool,
    b: &mut [T],
) -> Result<(), LinalgError> {
    let mode = TriangularSolve {
        unit_diagonal,
        ..TriangularSolve::lower()
    };
    substitute(l, mode, b)
}

/// Back substitution `U·x = b` on the upper triangle of `u`, in place.
pub fn back_substitute<T: FloatScalar>(
    u: &impl MatrixRef<T>,
    unit_diagonal: bool,
    b: &mut [T],
) -> Result<(), LinalgError> {
    let mode = TriangularSolve {
        unit_diagonal,
        ..TriangularSolve::upper()
    };
    substitute(u, mode, b)
}

/// Solve a triangular system for every column of `b`.
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::{solve_triangular, TriangularSolve};
///
/// let l = DynMatrix::from_rows(2, 2, &[2.0_f64, 0.0, 1.0, 4.0]);
/// let b = DynMatrix::from_rows(2, 1, &[2.0_f64, 9.0]);
/// let x = solve_triangular(&l, &b, TriangularSolve::lower()).unwrap();
/// assert!((x[(0, 0)] - 1.0).abs() < 1e-12);
/// assert!((x[(1, 0)] - 2.0).abs() < 1e-12);
/// ```
pub fn solve_triangular<T: FloatScalar>(
    a: &DynMatrix<T>,
    b: &DynMatrix<T>,
    mode: TriangularSolve,
) -> Result<DynMatrix<T>, LinalgError> {
    let n = ensure_square(a)?;
    ensure_rows(b, n)?;
    let mut x = b.clone();
    for j in 0..x.ncols() {
        substitute(a, mode, x.col_as_mut_slice(j, 0))?;
    }
    Ok(x)
}

/// Vector right-hand side form of [`solve_triangular`].
pub fn solve_triangular_vec<T: FloatScalar>(
    a: &DynMatrix<T>,
    b: &DynVector<T>,
    mode: TriangularSolve,
) -> Result<DynVector<T>, LinalgError> {
    let n = ensure_square(a)?;
    if b.len() != n {
        return Err(LinalgError::ShapeMismatch {
            expected: (n, 1),
            got: (b.len(), 1),
        });
    }
    let mut x = b.clone();
    substitute(a, mode, x.as_mut_slice())?;
    Ok(x)
}
