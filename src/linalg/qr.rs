use alloc::vec::Vec;

use crate::dynmatrix::{DynMatrix, DynVector};
use crate::linalg::{back_substitute, ensure_rows, LinalgError};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Householder QR with an explicitly accumulated `m x m` Q.
///
/// For each column `k` a reflector `H = I - 2vvᵗ/‖v‖²` zeros `r[k+1.., k]`.
/// The leading entry of `v` takes the sign of the pivot so the two
/// magnitudes add instead of cancelling.
///
/// A sub-column whose norm is `<= m·ε·max(‖A‖_F, 1)` marks a dependent
/// column. With `strict` this is an error; otherwise the reflector is
/// skipped (identity) and the factorization carries on.
pub(crate) fn householder_qr<T: FloatScalar>(
    a: &DynMatrix<T>,
    strict: bool,
) -> Result<(DynMatrix<T>, DynMatrix<T>), LinalgError> {
    let (m, n) = a.shape();
    let threshold = T::lit(m as f64) * T::epsilon() * a.frobenius_norm().max(T::one());

    let mut r = a.clone();
    let mut q = DynMatrix::eye(m, T::zero());
    let mut v: Vec<T> = Vec::with_capacity(m);
    let mut qv: Vec<T> = alloc::vec![T::zero(); m];

    for k in 0..n.min(m) {
        let norm = r
            .col_as_slice(k, k)
            .iter()
            .fold(T::zero(), |acc, &x| acc + x * x)
            .sqrt();

        if norm <= threshold {
            if strict {
                return Err(LinalgError::LinearlyDependentColumns);
            }
            continue;
        }
        if k + 1 == m {
            break;
        }

        let x0 = r[(k, k)];
        let sigma = if x0 < T::zero() { -T::one() } else { T::one() };

        v.clear();
        v.extend_from_slice(r.col_as_slice(k, k));
        v[0] = x0 + sigma * norm;
        let vv = v.iter().fold(T::zero(), |acc, &x| acc + x * x);
        let scale = T::two() / vv;

        // R ← H·R on the trailing block
        for j in (k + 1)..n {
            let col = r.col_as_mut_slice(j, k);
            let s = col.iter().zip(&v).fold(T::zero(), |acc, (&c, &vi)| acc + c * vi);
            let f = scale * s;
            for (c, &vi) in col.iter_mut().zip(&v) {
                *c = *c - f * vi;
            }
        }
        {
            let col = r.col_as_mut_slice(k, k);
            col[0] = -sigma * norm;
            for c in col[1..].iter_mut() {
                *c = T::zero();
            }
        }

        // Q ← Q·H: rank-one update with qv = Q[.., k..]·v
        for x in qv.iter_mut() {
            *x = T::zero();
        }
        for (l, &vl) in v.iter().enumerate() {
            for (acc, &qil) in qv.iter_mut().zip(q.col_as_slice(k + l, 0)) {
                *acc = *acc + qil * vl;
            }
        }
        for (l, &vl) in v.iter().enumerate() {
            let f = scale * vl;
            for (qil, &acc) in q.col_as_mut_slice(k + l, 0).iter_mut().zip(&qv) {
                *qil = *qil - f * acc;
            }
        }
    }

    for j in 0..n {
        for i in (j + 1)..m {
            r[(i, j)] = T::zero();
        }
    }

    Ok((q, r))
}

/// QR decomposition `A = Q·R` of an `m x n` matrix with `m >= n`.
///
/// Q is square (`m x m`) and orthonormal, R is `m x n` with exact zeros
/// below the diagonal.
///
/// # Example
///
/// ```
/// use numeris_dense::DynMatrix;
///
/// // Least-squares fit: y = c0 + c1*x to points (0,1), (1,2), (2,4)
/// let a = DynMatrix::from_rows(3, 2, &[1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0]);
/// let b = DynMatrix::from_rows(3, 1, &[1.0_f64, 2.0, 4.0]);
/// let x = a.qr().unwrap().solve(&b).unwrap();
/// assert!((x[(0, 0)] - 5.0 / 6.0).abs() < 1e-10);
/// assert!((x[(1, 0)] - 3.0 / 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    q: DynMatrix<T>,
    r: DynMatrix<T>,
}

impl<T: FloatScalar> QrDecomposition<T> {
    /// Decompose a matrix.
    ///
    /// Returns `ShapeMismatch` when `rows < cols` and
    /// `LinearlyDependentColumns` for a rank-deficient leading block.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let (m, n) = a.shape();
        if m < n {
            return Err(LinalgError::ShapeMismatch {
                expected: (n, n),
                got: (m, n),
            });
        }
        let (q, r) = householder_qr(a, true)?;
        Ok(Self { q, r })
    }

    /// Orthonormal factor Q (`m x m`).
    #[inline]
    pub fn q(&self) -> &DynMatrix<T> {
        &self.q
    }

    /// Triangular-topped factor R (`m x n`).
    #[inline]
    pub fn r(&self) -> &DynMatrix<T> {
        &self.r
    }

    /// Leading `n` columns of Q.
    pub fn q_thin(&self) -> DynMatrix<T> {
        self.q.left_cols(self.r.ncols())
    }

    /// Upper-triangular top `n x n` block of R.
    pub fn r_square(&self) -> DynMatrix<T> {
        let n = self.r.ncols();
        DynMatrix::from_fn(n, n, |i, j| self.r[(i, j)])
    }

    /// Least-squares solve: minimizes `‖A·x - b‖` column by column via
    /// `R·x = (Qᵗ·b)[..n]`.
    pub fn solve(&self, b: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
        let (m, n) = self.r.shape();
        ensure_rows(b, m)?;
        let qtb = self.q.tr_mul(b);
        let r_top = self.r_square();
        let mut x = DynMatrix::zeros(n, b.ncols(), T::zero());
        for j in 0..b.ncols() {
            let col = x.col_as_mut_slice(j, 0);
            col.copy_from_slice(&qtb.col_as_slice(j, 0)[..n]);
            back_substitute(&r_top, false, col)?;
        }
        Ok(x)
    }

    /// Vector right-hand side form of [`solve`](Self::solve).
    pub fn solve_vec(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        let x = self.solve(&b.to_column())?;
        Ok(DynVector::from_slice(x.as_slice()))
    }

    /// Product of `|R[i,i]|`; equals `|det(A)|` for square A.
    pub fn det_abs(&self) -> T {
        let n = self.r.ncols();
        let mut d = T::one();
        for i in 0..n {
            d = d * self.r[(i, i)].abs();
        }
        d
    }
}

/// Factor `A = Q·R` (requires `rows >= cols` and independent columns).
pub fn qr_decomposition<T: FloatScalar>(a: &DynMatrix<T>) -> Result<QrDecomposition<T>, LinalgError> {
    QrDecomposition::new(a)
}
