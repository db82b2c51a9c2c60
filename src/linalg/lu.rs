use alloc::vec::Vec;

use crate::dynmatrix::{DynMatrix, DynVector};
use crate::linalg::{back_substitute, ensure_rows, ensure_square, forward_substitute, LinalgError};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Perform LU decomposition with partial pivoting, in place.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `perm[i]` is the original row placed at position `i`. Returns the
/// permutation sign (`1` for an even number of swaps, `-1` otherwise).
///
/// A column whose best pivot has magnitude `<= ε` is left untouched for
/// that step; the resulting zero on U's diagonal is reported later by the
/// triangular solve. A non-square `a` or a `perm` of the wrong length is a
/// `ShapeMismatch`.
pub fn lu_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    perm: &mut [usize],
) -> Result<i8, LinalgError> {
    let n = ensure_square(&*a)?;
    if perm.len() != n {
        return Err(LinalgError::ShapeMismatch {
            expected: (n, 1),
            got: (perm.len(), 1),
        });
    }

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }

    let mut sign = 1;
    let mut pivot_col: Vec<T> = Vec::with_capacity(n);

    for col in 0..n {
        // Partial pivoting: largest magnitude in a[col.., col]
        let mut max_row = col;
        let mut max_val = T::zero();
        for (offset, x) in a.col_as_slice(col, col).iter().enumerate() {
            if x.abs() > max_val {
                max_val = x.abs();
                max_row = col + offset;
            }
        }

        if max_val <= T::epsilon() {
            continue;
        }

        if max_row != col {
            perm.swap(col, max_row);
            for j in 0..n {
                let tmp = *a.get(col, j);
                *a.get_mut(col, j) = *a.get(max_row, j);
                *a.get_mut(max_row, j) = tmp;
            }
            sign = -sign;
        }

        // Scale sub-column by 1/pivot: these are the L multipliers.
        let inv_pivot = T::one() / *a.get(col, col);
        for x in a.col_as_mut_slice(col, col + 1).iter_mut() {
            *x = *x * inv_pivot;
        }

        // Rank-1 update: a[col+1.., j] -= a[col, j] * a[col+1.., col]
        pivot_col.clear();
        pivot_col.extend_from_slice(a.col_as_slice(col, col + 1));
        for j in (col + 1)..n {
            let factor = *a.get(col, j);
            if factor == T::zero() {
                continue;
            }
            for (x, &l) in a.col_as_mut_slice(j, col + 1).iter_mut().zip(&pivot_col) {
                *x = *x - factor * l;
            }
        }
    }

    Ok(sign)
}

/// Solve `A·x = b` in place from a packed LU and its permutation.
///
/// `b` holds the right-hand side on entry and `x` on return.
pub fn lu_solve_in_place<T: FloatScalar>(
    lu: &impl MatrixRef<T>,
    perm: &[usize],
    b: &mut [T],
) -> Result<(), LinalgError> {
    let permuted: Vec<T> = perm.iter().map(|&p| b[p]).collect();
    b.copy_from_slice(&permuted);
    forward_substitute(lu, true, b)?;
    back_substitute(lu, false, b)
}

/// LU decomposition `P·A = L·U` of a square matrix.
///
/// Factoring never fails on a singular matrix; [`solve`](Self::solve) and
/// [`inverse`](Self::inverse) report `Singular`, and [`det`](Self::det)
/// returns (near) zero.
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::LuDecomposition;
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// let lu = LuDecomposition::new(&a).unwrap();
/// assert!((lu.det() - (-2.0)).abs() < 1e-12);
///
/// let pa = &lu.permutation_matrix() * &a;
/// let l_u = &lu.l() * &lu.u();
/// assert!(pa.max_abs_diff(&l_u) < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    lu: DynMatrix<T>,
    perm: Vec<usize>,
    sign: i8,
}

impl<T: FloatScalar> LuDecomposition<T> {
    /// Factor a square matrix. Returns `ShapeMismatch` if `a` is not square.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let n = ensure_square(a)?;
        let mut lu = a.clone();
        let mut perm = alloc::vec![0; n];
        let sign = lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm, sign })
    }

    /// The packed L/U matrix.
    #[inline]
    pub fn combined(&self) -> &DynMatrix<T> {
        &self.lu
    }

    /// Row permutation: `(P·b)[i] = b[perm[i]]`.
    #[inline]
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Permutation parity, `1` or `-1`.
    #[inline]
    pub fn sign(&self) -> i8 {
        self.sign
    }

    /// Unit lower-triangular factor L.
    pub fn l(&self) -> DynMatrix<T> {
        let n = self.lu.nrows();
        DynMatrix::from_fn(n, n, |i, j| {
            if i == j {
                T::one()
            } else if i > j {
                self.lu[(i, j)]
            } else {
                T::zero()
            }
        })
    }

    /// Upper-triangular factor U.
    pub fn u(&self) -> DynMatrix<T> {
        let n = self.lu.nrows();
        DynMatrix::from_fn(n, n, |i, j| if i <= j { self.lu[(i, j)] } else { T::zero() })
    }

    /// Permutation matrix P with `P·A = L·U`.
    pub fn permutation_matrix(&self) -> DynMatrix<T> {
        let n = self.perm.len();
        let mut p = DynMatrix::zeros(n, n, T::zero());
        for (i, &src) in self.perm.iter().enumerate() {
            p[(i, src)] = T::one();
        }
        p
    }

    /// Solve `A·X = B` for every column of `b`.
    pub fn solve(&self, b: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
        ensure_rows(b, self.lu.nrows())?;
        let mut x = b.clone();
        for j in 0..x.ncols() {
            lu_solve_in_place(&self.lu, &self.perm, x.col_as_mut_slice(j, 0))?;
        }
        Ok(x)
    }

    /// Solve `A·x = b` for a vector right-hand side.
    pub fn solve_vec(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        let n = self.lu.nrows();
        if b.len() != n {
            return Err(LinalgError::ShapeMismatch {
                expected: (n, 1),
                got: (b.len(), 1),
            });
        }
        let mut x = b.clone();
        lu_solve_in_place(&self.lu, &self.perm, x.as_mut_slice())?;
        Ok(x)
    }

    /// Determinant: product of U's diagonal times the permutation sign.
    pub fn det(&self) -> T {
        let n = self.lu.nrows();
        let mut d = T::one();
        for i in 0..n {
            d = d * self.lu[(i, i)];
        }
        if self.sign < 0 {
            -d
        } else {
            d
        }
    }

    /// Matrix inverse via `n` solves against the identity.
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.solve(&DynMatrix::eye(self.lu.nrows(), T::zero()))
    }
}

/// Factor a square matrix as `P·A = L·U`.
pub fn lu_decomposition<T: FloatScalar>(a: &DynMatrix<T>) -> Result<LuDecomposition<T>, LinalgError> {
    LuDecomposition::new(a)
}

/// Solve `A·X = B` from an existing LU factorization.
///
/// The factorization may be reused for any number of right-hand sides.
pub fn solve_lu<T: FloatScalar>(
    lu: &LuDecomposition<T>,
    b: &DynMatrix<T>,
) -> Result<DynMatrix<T>, LinalgError> {
    lu.solve(b)
}
