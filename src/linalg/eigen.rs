use alloc::vec::Vec;

use num_complex::Complex;
use tracing::{debug, trace};

use crate::dynmatrix::DynMatrix;
use crate::linalg::qr::householder_qr;
use crate::linalg::{ensure_square, EigenSettings, LinalgError};
use crate::traits::FloatScalar;

/// Whether `b` is quasi upper triangular at tolerance `tol`: nothing below
/// the sub-diagonal, and no two adjacent sub-diagonal entries both live
/// (which would leave a block larger than 2×2).
fn is_quasi_triangular<T: FloatScalar>(b: &DynMatrix<T>, tol: T) -> bool {
    let n = b.nrows();
    for j in 0..n {
        for i in (j + 2)..n {
            if b[(i, j)].abs() > tol {
                return false;
            }
        }
    }
    for i in 1..n.saturating_sub(1) {
        if b[(i, i - 1)].abs() > tol && b[(i + 1, i)].abs() > tol {
            return false;
        }
    }
    true
}

/// Roots of `λ² - tr·λ + det` for the 2×2 block starting at `(i, i)`.
fn block_eigenvalues<T: FloatScalar>(b: &DynMatrix<T>, i: usize) -> [Complex<T>; 2] {
    let (p, q) = (b[(i, i)], b[(i, i + 1)]);
    let (r, s) = (b[(i + 1, i)], b[(i + 1, i + 1)]);
    let half_tr = (p + s) / T::two();
    let det = p * s - q * r;
    let disc = half_tr * half_tr - det;
    if disc < T::zero() {
        let im = (-disc).sqrt();
        [Complex::new(half_tr, im), Complex::new(half_tr, -im)]
    } else {
        let root = disc.sqrt();
        [
            Complex::new(half_tr + root, T::zero()),
            Complex::new(half_tr - root, T::zero()),
        ]
    }
}

/// Eigenvalues of a general square matrix by unshifted QR iteration.
///
/// Repeats `B ← R·Q` (with `B = Q·R`) until `B` is quasi upper triangular
/// at `settings.tol`, or `settings.max_iter` sweeps have run. Running out of
/// sweeps is not an error: eigenvalues are read from the last iterate.
///
/// A 1×1 diagonal block gives a real eigenvalue; a 2×2 block with a live
/// sub-diagonal gives a complex-conjugate pair (or two reals when its
/// discriminant is non-negative). The order is that of the diagonal.
///
/// There are no shifts or deflation, so convergence is linear in the ratio
/// of neighbouring eigenvalue magnitudes and can stall when they are close.
///
/// ```
/// use numeris_dense::DynMatrix;
/// use numeris_dense::linalg::{eigenvalues, EigenSettings};
///
/// // rotation by 90 degrees: eigenvalues ±i
/// let a = DynMatrix::from_rows(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
/// let ev = eigenvalues(&a, &EigenSettings::default()).unwrap();
/// assert!((ev[0].re).abs() < 1e-12);
/// assert!((ev[0].im.abs() - 1.0).abs() < 1e-12);
/// assert!((ev[1] - ev[0].conj()).norm() < 1e-12);
/// ```
pub fn eigenvalues<T: FloatScalar>(
    a: &DynMatrix<T>,
    settings: &EigenSettings<T>,
) -> Result<Vec<Complex<T>>, LinalgError> {
    let n = ensure_square(a)?;
    let tol = settings.tol;

    let mut b = a.clone();
    let mut converged = is_quasi_triangular(&b, tol);
    let mut iter = 0;
    while !converged && iter < settings.max_iter {
        let (q, r) = householder_qr(&b, false)?;
        b = &r * &q;
        iter += 1;
        converged = is_quasi_triangular(&b, tol);
    }

    if converged {
        trace!(n, iter, "QR eigenvalue iteration converged");
    } else {
        debug!(
            n,
            max_iter = settings.max_iter,
            "QR eigenvalue iteration hit its sweep budget; using last iterate"
        );
    }

    let mut values = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if i + 1 < n && b[(i + 1, i)].abs() > tol {
            values.extend_from_slice(&block_eigenvalues(&b, i));
            i += 2;
        } else {
            values.push(Complex::new(b[(i, i)], T::zero()));
            i += 1;
        }
    }
    Ok(values)
}
