use alloc::vec::Vec;

use crate::dynmatrix::{DynMatrix, DynVector};
use crate::linalg::symmetric_eigen::{jacobi_eigen, sort_eigen_with_vecs};
use crate::linalg::{LinalgError, SvdSettings};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Jacobi sweep budget for the Gram eigen-problem.
const GRAM_SWEEPS: usize = 1000;

/// Remove from `w` its components along the columns `cols` of `basis`
/// (two passes of modified Gram–Schmidt) and return the residual norm.
fn project_out<T: FloatScalar>(w: &mut [T], basis: &DynMatrix<T>, cols: &[usize]) -> T {
    for _ in 0..2 {
        for &j in cols {
            let u = basis.col_as_slice(j, 0);
            let proj = u.iter().zip(w.iter()).fold(T::zero(), |acc, (&a, &b)| acc + a * b);
            for (wi, &ui) in w.iter_mut().zip(u) {
                *wi = *wi - proj * ui;
            }
        }
    }
    w.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()
}

/// SVD of a matrix with `rows >= cols` through its Gram matrix `XᵗX`.
///
/// Returns `(long, s, short)` with `X ≈ long·diag(s)·shortᵗ`: `short` holds
/// the eigenvectors of `XᵗX` (descending eigenvalue order) and column `j` of
/// `long` is `X·short[:, j] / s[j]`, which keeps `long·diag(s) = X·short`
/// exact. Columns with `s[j] <= sqrt(ε)·s[0]` are below what the Gram matrix
/// resolves; they, and every column when `orthonormalize` is set, are
/// instead made orthogonal to the columns before them. Columns whose
/// singular value is `<= ε` are left zero.
fn gram_svd<T: FloatScalar>(
    x: &DynMatrix<T>,
    tol: T,
    orthonormalize: bool,
) -> (DynMatrix<T>, Vec<T>, DynMatrix<T>) {
    let k = x.ncols();
    let gram = x.tr_mul(x);
    let (mut values, mut short) = jacobi_eigen(&gram, tol, GRAM_SWEEPS);
    sort_eigen_with_vecs(&mut values, &mut short);
    values.reverse();
    for i in 0..k / 2 {
        short.swap_cols(i, k - 1 - i);
    }

    let s: Vec<T> = values.iter().map(|&l| l.max(T::zero()).sqrt()).collect();
    let resolved = s.first().map_or(T::zero(), |&s0| s0 * T::epsilon().sqrt());
    let mut long = x * &short;
    let mut kept: Vec<usize> = Vec::with_capacity(k);
    let mut w: Vec<T> = Vec::with_capacity(x.nrows());
    for (j, &sj) in s.iter().enumerate() {
        if sj <= T::epsilon() {
            long.col_as_mut_slice(j, 0).fill(T::zero());
            continue;
        }
        w.clear();
        w.extend(long.col_as_slice(j, 0).iter().map(|&c| c / sj));
        let norm = if orthonormalize || sj <= resolved {
            project_out(&mut w, &long, &kept)
        } else {
            T::one()
        };
        let col = long.col_as_mut_slice(j, 0);
        if norm <= T::epsilon() {
            col.fill(T::zero());
            continue;
        }
        for (c, &wi) in col.iter_mut().zip(&w) {
            *c = wi / norm;
        }
        kept.push(j);
    }
    (long, s, short)
}

/// Extend the nonzero orthonormal columns of `basis` to an orthonormal
/// basis of `R^rows`, returning a square matrix.
///
/// Existing nonzero columns keep their positions; zero columns and the new
/// trailing columns are filled with the standard basis vector that has the
/// largest residual after projection.
fn complete_basis<T: FloatScalar>(basis: &DynMatrix<T>) -> DynMatrix<T> {
    let m = basis.nrows();
    let mut out = DynMatrix::zeros(m, m, T::zero());
    let mut kept: Vec<usize> = Vec::with_capacity(m);
    for j in 0..basis.ncols() {
        let col = basis.col_as_slice(j, 0);
        if col.iter().any(|&c| c != T::zero()) {
            out.set_col(j, col);
            kept.push(j);
        }
    }

    let mut w: Vec<T> = alloc::vec![T::zero(); m];
    let mut best_w = w.clone();
    for slot in 0..m {
        if kept.contains(&slot) {
            continue;
        }
        let mut best = T::zero();
        for e in 0..m {
            for (i, wi) in w.iter_mut().enumerate() {
                *wi = if i == e { T::one() } else { T::zero() };
            }
            let norm = project_out(&mut w, &out, &kept);
            if norm > best {
                best = norm;
                best_w.copy_from_slice(&w);
            }
        }
        let inv = T::one() / best;
        for (o, &b) in out.col_as_mut_slice(slot, 0).iter_mut().zip(&best_w) {
            *o = b * inv;
        }
        kept.push(slot);
    }
    out
}

/// Singular value decomposition `A = U·diag(S)·Vᵗ`.
///
/// Computed from the symmetric eigen-decomposition of the smaller Gram
/// matrix (`AᵗA` or `AAᵗ`), so singular values below roughly
/// `sqrt(ε)·s_max` are not resolved accurately.
///
/// In reduced mode the long factor is `A·V` scaled by `1/s`, so
/// `U·diag(S)·Vᵗ` rebuilds `A` to round-off while `UᵗU` departs from `I` by
/// about `tol / (sᵢ·sⱼ)`. Full mode orthonormalizes U (or V for wide input)
/// instead, which moves that error into the reconstruction.
///
/// # Example
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::{diag_svd, SvdSettings};
///
/// let a = DynMatrix::from_rows(3, 2, &[1.0_f64, 0.0, 0.0, 2.0, 0.0, 0.0]);
/// let svd = a.svd(&SvdSettings::default()).unwrap();
/// assert!((svd.s()[0] - 2.0).abs() < 1e-10);
/// assert!((svd.s()[1] - 1.0).abs() < 1e-10);
///
/// let sigma = diag_svd(svd.s(), 2, 2);
/// let rebuilt = &(svd.u() * &sigma) * &svd.vt();
/// assert!(rebuilt.max_abs_diff(&a) < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct SvdDecomposition<T> {
    u: DynMatrix<T>,
    s: DynVector<T>,
    v: DynMatrix<T>,
}

impl<T: FloatScalar> SvdDecomposition<T> {
    /// Decompose any `m x n` matrix.
    ///
    /// Reduced mode gives U `m x k` and V `n x k` with `k = min(m, n)`;
    /// `settings.full_matrices` gives square U and V.
    pub fn new(a: &DynMatrix<T>, settings: &SvdSettings<T>) -> Result<Self, LinalgError> {
        let (m, n) = a.shape();
        let full = settings.full_matrices;
        let (mut u, s, mut v) = if n <= m {
            gram_svd(a, settings.tol, full)
        } else {
            let (v, s, u) = gram_svd(&a.transpose(), settings.tol, full);
            (u, s, v)
        };
        if settings.full_matrices {
            u = complete_basis(&u);
            v = complete_basis(&v);
        }
        Ok(Self {
            u,
            s: DynVector::from_vec(s),
            v,
        })
    }

    /// Left singular vectors U (columns).
    #[inline]
    pub fn u(&self) -> &DynMatrix<T> {
        &self.u
    }

    /// Singular values, descending and non-negative.
    #[inline]
    pub fn s(&self) -> &DynVector<T> {
        &self.s
    }

    /// Right singular vectors V (columns).
    #[inline]
    pub fn v(&self) -> &DynMatrix<T> {
        &self.v
    }

    /// `Vᵗ`; rows are the right singular vectors.
    pub fn vt(&self) -> DynMatrix<T> {
        self.v.transpose()
    }

    /// Numerical rank: number of singular values above `tol`.
    pub fn rank(&self, tol: T) -> usize {
        self.s.iter().filter(|&&s| s > tol).count()
    }

    /// Condition number: σ_max / σ_min.
    ///
    /// Returns infinity if the smallest singular value is zero.
    pub fn condition_number(&self) -> T {
        let k = self.s.len();
        if k == 0 {
            return T::one();
        }
        let s_max = self.s[0];
        let s_min = self.s[k - 1];
        if s_min == T::zero() {
            T::infinity()
        } else {
            s_max / s_min
        }
    }

    /// `U·diag(S)·Vᵗ`.
    pub fn reconstruct(&self) -> DynMatrix<T> {
        let sigma = diag_svd(&self.s, self.u.ncols(), self.v.ncols());
        &(&self.u * &sigma) * &self.vt()
    }
}

/// Singular value decomposition with explicit settings.
pub fn svd_decomposition<T: FloatScalar>(
    a: &DynMatrix<T>,
    settings: &SvdSettings<T>,
) -> Result<SvdDecomposition<T>, LinalgError> {
    SvdDecomposition::new(a, settings)
}

/// `m x n` matrix with `s` on the leading diagonal, the middle factor of
/// `U·Σ·Vᵗ`.
///
/// ```
/// use numeris_dense::DynVector;
/// use numeris_dense::linalg::diag_svd;
///
/// let sigma = diag_svd(&DynVector::from_slice(&[3.0_f64, 1.0]), 3, 2);
/// assert_eq!(sigma.shape(), (3, 2));
/// assert_eq!(sigma[(0, 0)], 3.0);
/// assert_eq!(sigma[(1, 1)], 1.0);
/// assert_eq!(sigma[(2, 1)], 0.0);
/// ```
pub fn diag_svd<T: FloatScalar>(s: &DynVector<T>, m: usize, n: usize) -> DynMatrix<T> {
    assert!(
        s.len() <= m.min(n),
        "{} singular values do not fit a {}x{} matrix",
        s.len(),
        m,
        n
    );
    let mut out = DynMatrix::zeros(m, n, T::zero());
    for (i, &si) in s.iter().enumerate() {
        out[(i, i)] = si;
    }
    out
}
