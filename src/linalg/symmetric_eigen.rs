use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::dynmatrix::{DynMatrix, DynVector};
use crate::linalg::{ensure_square, EigenSettings, LinalgError};
use crate::traits::{FloatScalar, MatrixMut};

/// Greedy Jacobi eigen-solver on the lower triangle of `a`.
///
/// Each step zeros the largest off-diagonal entry `a_pq` with the rotation
/// `t = sign(δ) / (|δ| + sqrt(1 + δ²))`, `δ = (a_qq - a_pp) / (2 a_pq)`,
/// and accumulates it into V. Stops once the largest off-diagonal is
/// `<= tol` (or at round-off level, `ε·‖A‖_F`), or after
/// `max_iter · n(n-1)/2` rotations.
///
/// Returns the unsorted eigenvalues and V (eigenvectors as columns).
pub(crate) fn jacobi_eigen<T: FloatScalar>(
    a: &DynMatrix<T>,
    tol: T,
    max_iter: usize,
) -> (Vec<T>, DynMatrix<T>) {
    let n = a.nrows();
    let mut w = DynMatrix::from_fn(n, n, |i, j| if i >= j { a[(i, j)] } else { a[(j, i)] });
    let mut v = DynMatrix::eye(n, T::zero());

    let floor = T::epsilon() * w.frobenius_norm();
    let budget = max_iter.saturating_mul(n * n.saturating_sub(1) / 2);
    let mut rotations = 0usize;

    loop {
        let mut p = 0;
        let mut q = 0;
        let mut off = T::zero();
        for j in 0..n {
            for i in (j + 1)..n {
                if w[(i, j)].abs() > off {
                    off = w[(i, j)].abs();
                    p = j;
                    q = i;
                }
            }
        }

        if off <= tol || off <= floor {
            trace!(n, rotations, "Jacobi converged");
            break;
        }
        if rotations >= budget {
            debug!(
                n,
                rotations,
                off_diagonal = ?off,
                "Jacobi hit its rotation budget; using current approximation"
            );
            break;
        }

        let apq = w[(p, q)];
        let delta = (w[(q, q)] - w[(p, p)]) / (T::two() * apq);
        let sign = if delta < T::zero() { -T::one() } else { T::one() };
        let t = sign / (delta.abs() + (T::one() + delta * delta).sqrt());
        let c = T::one() / (T::one() + t * t).sqrt();
        let s = t * c;

        w[(p, p)] = w[(p, p)] - t * apq;
        w[(q, q)] = w[(q, q)] + t * apq;
        w[(p, q)] = T::zero();
        w[(q, p)] = T::zero();

        for r in 0..n {
            if r != p && r != q {
                let arp = w[(r, p)];
                let arq = w[(r, q)];
                let new_rp = c * arp - s * arq;
                let new_rq = s * arp + c * arq;
                w[(r, p)] = new_rp;
                w[(p, r)] = new_rp;
                w[(r, q)] = new_rq;
                w[(q, r)] = new_rq;
            }
            let vrp = v[(r, p)];
            let vrq = v[(r, q)];
            v[(r, p)] = c * vrp - s * vrq;
            v[(r, q)] = s * vrp + c * vrq;
        }

        rotations += 1;
    }

    let values = (0..n).map(|i| w[(i, i)]).collect();
    (values, v)
}

/// Sort eigenvalues ascending and permute eigenvector columns.
pub(crate) fn sort_eigen_with_vecs<T: FloatScalar>(values: &mut [T], vecs: &mut DynMatrix<T>) {
    let n = values.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in (i + 1)..n {
            if values[j] < values[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            values.swap(i, min_idx);
            vecs.swap_cols(i, min_idx);
        }
    }
}

/// Symmetric eigen-decomposition `A = V·diag(D)·Vᵗ` by Jacobi rotations.
///
/// Only the lower triangle of the input is read. Eigenvalues are sorted in
/// ascending order; the columns of V are the matching orthonormal
/// eigenvectors.
///
/// # Example
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::{EigenSettings, SymmetricEigen};
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, -1.0, -1.0, 2.0]);
/// let eig = SymmetricEigen::new(&a, &EigenSettings::default()).unwrap();
/// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-10);
/// assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-10);
///
/// // Verify A * v ≈ λ * v for first eigenpair
/// let q = eig.eigenvectors();
/// for i in 0..2 {
///     let av = a[(i, 0)] * q[(0, 0)] + a[(i, 1)] * q[(1, 0)];
///     assert!((av - eig.eigenvalues()[0] * q[(i, 0)]).abs() < 1e-10);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T> {
    eigenvalues: DynVector<T>,
    eigenvectors: DynMatrix<T>,
}

impl<T: FloatScalar> SymmetricEigen<T> {
    /// Decompose a symmetric matrix. Exhausting `settings.max_iter` sweeps
    /// is not an error.
    pub fn new(a: &DynMatrix<T>, settings: &EigenSettings<T>) -> Result<Self, LinalgError> {
        ensure_square(a)?;
        let (mut values, mut vecs) = jacobi_eigen(a, settings.tol, settings.max_iter);
        sort_eigen_with_vecs(&mut values, &mut vecs);
        Ok(Self {
            eigenvalues: DynVector::from_vec(values),
            eigenvectors: vecs,
        })
    }

    /// Eigenvalues, ascending.
    #[inline]
    pub fn eigenvalues(&self) -> &DynVector<T> {
        &self.eigenvalues
    }

    /// Orthonormal eigenvectors as columns, in eigenvalue order.
    #[inline]
    pub fn eigenvectors(&self) -> &DynMatrix<T> {
        &self.eigenvectors
    }

    /// `V·diag(D)·Vᵗ`.
    pub fn reconstruct(&self) -> DynMatrix<T> {
        let mut vd = self.eigenvectors.clone();
        for (j, &d) in self.eigenvalues.iter().enumerate() {
            for x in vd.col_as_mut_slice(j, 0) {
                *x = *x * d;
            }
        }
        &vd * &self.eigenvectors.transpose()
    }
}

/// Eigenvalues and orthonormal eigenvectors of a symmetric matrix.
pub fn eigen_symmetric<T: FloatScalar>(
    a: &DynMatrix<T>,
    settings: &EigenSettings<T>,
) -> Result<SymmetricEigen<T>, LinalgError> {
    SymmetricEigen::new(a, settings)
}
