use numeris_dense::linalg::{
    self, diag_svd, EigenSettings, LinalgError, LstsqSettings, SvdSettings, TriangularSolve,
};
use numeris_dense::{DynMatrix, DynVector};

const TOL: f64 = 1e-9;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
}

fn assert_mat_near(a: &DynMatrix<f64>, b: &DynMatrix<f64>, tol: f64, msg: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape", msg);
    let diff = a.max_abs_diff(b);
    assert!(diff < tol, "{}: max abs diff {}", msg, diff);
}

/// Deterministic entries in [-1, 1) from a 64-bit LCG.
fn pseudo_random(m: usize, n: usize, seed: u64) -> DynMatrix<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let data = (0..m * n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
        })
        .collect();
    DynMatrix::from_vec(m, n, data)
}

fn spd(n: usize, seed: u64) -> DynMatrix<f64> {
    let b = pseudo_random(n, n, seed);
    &b.tr_mul(&b) + &DynMatrix::eye(n, 0.0)
}

fn symmetric(n: usize, seed: u64) -> DynMatrix<f64> {
    let b = pseudo_random(n, n, seed);
    &b + &b.transpose()
}

fn tight_eigen() -> EigenSettings<f64> {
    EigenSettings {
        max_iter: 200,
        tol: 1e-14,
    }
}

fn tight_svd(full_matrices: bool) -> SvdSettings<f64> {
    SvdSettings {
        full_matrices,
        tol: 1e-14,
    }
}

fn eye(n: usize) -> DynMatrix<f64> {
    DynMatrix::eye(n, 0.0)
}

// ── LU ──────────────────────────────────────────────────────────────

#[test]
fn lu_factors_permuted_input() {
    for (n, seed) in [(1, 1), (3, 2), (6, 3), (10, 4)] {
        let a = pseudo_random(n, n, seed);
        let lu = linalg::lu_decomposition(&a).unwrap();
        let pa = &lu.permutation_matrix() * &a;
        assert_mat_near(&pa, &(&lu.l() * &lu.u()), TOL, "P·A = L·U");

        let b = pseudo_random(n, 2, seed + 100);
        let x = linalg::solve_lu(&lu, &b).unwrap();
        assert_mat_near(&(&a * &x), &b, 1e-8, "A·x = b");
    }
}

#[test]
fn lu_permutation_is_a_permutation() {
    let a = pseudo_random(7, 7, 11);
    let lu = a.lu().unwrap();
    let mut seen = [false; 7];
    for &p in lu.permutation() {
        assert!(!seen[p]);
        seen[p] = true;
    }
    assert!(lu.sign() == 1 || lu.sign() == -1);
}

#[test]
fn determinant_matches_lu_diagonal_and_sign() {
    let a = pseudo_random(5, 5, 21);
    let lu = a.lu().unwrap();
    let u = lu.u();
    let mut prod = lu.sign() as f64;
    for i in 0..5 {
        prod *= u[(i, i)];
    }
    assert_near(linalg::determinant(&a).unwrap(), prod, 1e-12, "det");

    let mut swapped = a.clone();
    swapped.swap_rows(1, 4);
    assert_near(
        linalg::determinant(&swapped).unwrap(),
        -prod,
        1e-12,
        "det after row swap",
    );
}

#[test]
fn determinant_of_product() {
    let a = pseudo_random(4, 4, 31);
    let b = pseudo_random(4, 4, 32);
    let dab = (&a * &b).det().unwrap();
    assert_near(dab, a.det().unwrap() * b.det().unwrap(), 1e-10, "det(AB)");
}

#[test]
fn singular_paths_report_singular() {
    let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    assert_eq!(a.inverse().unwrap_err(), LinalgError::Singular);
    assert!(a.det().unwrap().abs() < 1e-12);
}

#[test]
fn non_square_inputs_rejected() {
    let a = pseudo_random(3, 4, 41);
    for result in [
        linalg::lu_decomposition(&a).map(|_| ()),
        linalg::cholesky_decomposition(&a).map(|_| ()),
        linalg::eigen_symmetric(&a, &EigenSettings::default()).map(|_| ()),
        linalg::eigenvalues(&a, &EigenSettings::default()).map(|_| ()),
        linalg::inverse(&a).map(|_| ()),
    ] {
        assert!(matches!(result, Err(LinalgError::ShapeMismatch { .. })));
    }
}

// ── Triangular ──────────────────────────────────────────────────────

#[test]
fn triangular_modes_agree_with_dense_solve() {
    let full = pseudo_random(5, 5, 51);
    let lower = DynMatrix::from_fn(5, 5, |i, j| {
        if i == j {
            3.0 + full[(i, j)]
        } else if i > j {
            full[(i, j)]
        } else {
            0.0
        }
    });
    let b = pseudo_random(5, 3, 52);

    let x = linalg::solve_triangular(&lower, &b, TriangularSolve::lower()).unwrap();
    assert_mat_near(&(&lower * &x), &b, TOL, "L·x = b");

    let x = linalg::solve_triangular(&lower, &b, TriangularSolve::lower().transposed()).unwrap();
    assert_mat_near(&(&lower.transpose() * &x), &b, TOL, "Lᵗ·x = b");

    let upper = lower.transpose();
    let x = linalg::solve_triangular(&upper, &b, TriangularSolve::upper()).unwrap();
    assert_mat_near(&(&upper * &x), &b, TOL, "U·x = b");

    let bv = DynVector::from_slice(&[1.0_f64, -1.0, 2.0, 0.5, 0.0]);
    let xv = linalg::solve_triangular_vec(&upper, &bv, TriangularSolve::upper()).unwrap();
    let xm = linalg::solve_triangular(&upper, &bv.to_column(), TriangularSolve::upper()).unwrap();
    assert_eq!(xv.as_slice(), xm.as_slice());
}

// ── Cholesky ────────────────────────────────────────────────────────

#[test]
fn cholesky_reconstructs_spd() {
    for (n, seed) in [(1, 61), (4, 62), (8, 63)] {
        let a = spd(n, seed);
        let chol = a.cholesky().unwrap();
        let l = chol.l();
        for i in 0..n {
            assert!(l[(i, i)] > 0.0);
            for j in (i + 1)..n {
                assert_eq!(l[(i, j)], 0.0);
            }
        }
        assert_mat_near(&(l * &l.transpose()), &a, TOL, "A = L·Lᵗ");
        assert_near(chol.det(), a.det().unwrap(), 1e-8 * chol.det().abs(), "det");
        assert_near(chol.ln_det(), chol.det().ln(), 1e-10, "ln det");
    }
}

#[test]
fn cholesky_and_lu_solutions_agree() {
    let a = spd(6, 71);
    let b = pseudo_random(6, 2, 72);
    let x_chol = linalg::solve_cholesky(&a.cholesky().unwrap(), &b).unwrap();
    let x_lu = linalg::solve(&a, &b).unwrap();
    assert_mat_near(&x_chol, &x_lu, 1e-10, "solutions");
}

#[test]
fn cholesky_rejects_indefinite() {
    let mut a = spd(4, 81);
    a[(3, 3)] = -1.0;
    assert_eq!(a.cholesky().unwrap_err(), LinalgError::NotPositiveDefinite);
}

// ── QR ──────────────────────────────────────────────────────────────

#[test]
fn qr_orthonormal_and_reconstructs() {
    for (m, n, seed) in [(3, 3, 91), (6, 4, 92), (9, 2, 93), (5, 1, 94)] {
        let a = pseudo_random(m, n, seed);
        let qr = a.qr().unwrap();
        let q = qr.q();
        assert_mat_near(&q.tr_mul(q), &eye(m), TOL, "QᵗQ = I");
        assert_mat_near(&(q * qr.r()), &a, TOL, "A = QR");
        for j in 0..n {
            for i in (j + 1)..m {
                assert_eq!(qr.r()[(i, j)], 0.0);
            }
        }
    }
}

#[test]
fn qr_det_abs_matches_lu() {
    let a = pseudo_random(5, 5, 101);
    let qr = a.qr().unwrap();
    assert_near(qr.det_abs(), a.det().unwrap().abs(), 1e-10, "|det|");
}

// ── Symmetric eigen ─────────────────────────────────────────────────

#[test]
fn symmetric_eigen_properties() {
    for (n, seed) in [(2, 111), (5, 112), (9, 113)] {
        let a = symmetric(n, seed);
        let eig = a.eig_symmetric(&tight_eigen()).unwrap();
        let v = eig.eigenvectors();
        assert_mat_near(&v.tr_mul(v), &eye(n), TOL, "VᵗV = I");
        assert_mat_near(&eig.reconstruct(), &a, 1e-8, "A = V·D·Vᵗ");

        let d = eig.eigenvalues();
        for i in 1..n {
            assert!(d[i - 1] <= d[i], "ascending");
        }
        let sum: f64 = d.iter().sum();
        assert_near(sum, a.trace(), 1e-9, "trace");
    }
}

#[test]
fn symmetric_eigenvalues_match_general_solver() {
    let a = DynMatrix::from_rows(
        4,
        4,
        &[
            6.0_f64, 2.0, 1.0, 0.0, //
            2.0, 5.0, 0.0, 1.0, //
            1.0, 0.0, 3.0, 1.0, //
            0.0, 1.0, 1.0, 1.0,
        ],
    );
    let sym = linalg::eigen_symmetric(&a, &tight_eigen()).unwrap();
    let general = linalg::eigenvalues(
        &a,
        &EigenSettings {
            max_iter: 10_000,
            tol: 1e-12,
        },
    )
    .unwrap();
    let mut re: Vec<f64> = general.iter().map(|z| z.re).collect();
    re.sort_by(|x, y| x.partial_cmp(y).unwrap());
    for (x, y) in re.iter().zip(sym.eigenvalues().iter()) {
        assert_near(*x, *y, 1e-6, "eigenvalue");
    }
}

// ── General eigenvalues ─────────────────────────────────────────────

#[test]
fn general_eigenvalues_of_similarity_transform() {
    let s = DynMatrix::from_rows(
        4,
        4,
        &[
            1.0_f64, 0.5, 0.0, 0.2, //
            0.0, 1.0, 0.3, 0.0, //
            0.1, 0.0, 1.0, 0.4, //
            0.0, 0.2, 0.0, 1.0,
        ],
    );
    let d = DynMatrix::from_diag(&DynVector::from_slice(&[1.0_f64, -2.0, 3.0, 5.0]));
    let a = &(&s * &d) * &s.inverse().unwrap();

    let settings = EigenSettings {
        max_iter: 1000,
        tol: 1e-11,
    };
    let ev = a.eigenvalues(&settings).unwrap();
    assert_eq!(ev.len(), 4);
    let mut re: Vec<f64> = ev.iter().map(|z| z.re).collect();
    re.sort_by(|x, y| x.partial_cmp(y).unwrap());
    for (got, want) in re.iter().zip([-2.0, 1.0, 3.0, 5.0]) {
        assert_near(*got, want, 1e-7, "eigenvalue");
    }
    assert!(ev.iter().all(|z| z.im == 0.0));
}

#[test]
fn general_eigenvalues_sum_and_product() {
    let a = DynMatrix::from_rows(3, 3, &[0.0_f64, -4.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 6.0]);
    let ev = a.eigenvalues(&EigenSettings::default()).unwrap();
    let sum = ev.iter().fold(numeris_dense::Complex::new(0.0, 0.0), |acc, z| acc + z);
    let prod = ev.iter().fold(numeris_dense::Complex::new(1.0, 0.0), |acc, z| acc * z);
    assert_near(sum.re, a.trace(), 1e-9, "trace");
    assert_near(sum.im, 0.0, 1e-9, "imag trace");
    assert_near(prod.re, a.det().unwrap(), 1e-8, "det");
    // one conjugate pair ±2i
    assert_eq!(ev.iter().filter(|z| z.im.abs() > 1.0).count(), 2);
}

// ── SVD ─────────────────────────────────────────────────────────────

fn check_svd(a: &DynMatrix<f64>, full: bool) {
    let (m, n) = a.shape();
    let svd = a.svd(&tight_svd(full)).unwrap();
    let (u, s, v) = (svd.u(), svd.s(), svd.v());
    let k = m.min(n);
    assert_eq!(s.len(), k);
    if full {
        assert_eq!(u.shape(), (m, m));
        assert_eq!(v.shape(), (n, n));
    } else {
        assert_eq!(u.shape(), (m, k));
        assert_eq!(v.shape(), (n, k));
    }
    for i in 0..k {
        assert!(s[i] >= 0.0);
        if i > 0 {
            assert!(s[i - 1] >= s[i], "descending");
        }
    }
    assert_mat_near(&u.tr_mul(u), &eye(u.ncols()), 1e-8, "UᵗU = I");
    assert_mat_near(&v.tr_mul(v), &eye(v.ncols()), 1e-8, "VᵗV = I");

    let sigma = diag_svd(s, u.ncols(), v.ncols());
    assert_mat_near(&(&(u * &sigma) * &svd.vt()), a, 1e-8, "A = U·Σ·Vᵗ");
}

#[test]
fn svd_tall_square_wide() {
    for (m, n, seed) in [(6, 3, 131), (4, 4, 132), (2, 5, 133), (1, 3, 134), (3, 1, 135)] {
        let a = pseudo_random(m, n, seed);
        check_svd(&a, false);
        check_svd(&a, true);
    }
}

#[test]
fn svd_singular_values_match_symmetric_eigen() {
    let a = pseudo_random(5, 3, 141);
    let svd = linalg::svd_decomposition(&a, &tight_svd(false)).unwrap();
    let eig = linalg::eigen_symmetric(&a.tr_mul(&a), &tight_eigen()).unwrap();
    for i in 0..3 {
        let lambda = eig.eigenvalues()[2 - i];
        assert_near(svd.s()[i], lambda.sqrt(), 1e-9, "σ² = λ(AᵗA)");
    }
    assert_near(svd.s()[0], svd.condition_number() * svd.s()[2], 1e-9, "cond");
}

#[test]
fn svd_rank_of_outer_product() {
    let u = pseudo_random(4, 1, 151);
    let v = pseudo_random(1, 3, 152);
    let a = &u * &v;
    let svd = a.svd(&tight_svd(true)).unwrap();
    assert_eq!(svd.rank(1e-6), 1);
    assert_mat_near(&svd.reconstruct(), &a, 1e-6, "rank-1 reconstruction");
}

// ── Least squares and pseudo-inverse ────────────────────────────────

fn check_moore_penrose(a: &DynMatrix<f64>, tol: f64) {
    let p = a.pseudoinverse(&LstsqSettings::default()).unwrap();
    assert_eq!(p.shape(), (a.ncols(), a.nrows()));
    let ap = a * &p;
    let pa = &p * a;
    assert_mat_near(&(&ap * a), a, tol, "A·P·A = A");
    assert_mat_near(&(&pa * &p), &p, tol, "P·A·P = P");
    assert_mat_near(&ap.transpose(), &ap, tol, "(A·P)ᵗ = A·P");
    assert_mat_near(&pa.transpose(), &pa, tol, "(P·A)ᵗ = P·A");
}

#[test]
fn pseudoinverse_moore_penrose_full_rank() {
    check_moore_penrose(&pseudo_random(5, 3, 161), 1e-9);
    check_moore_penrose(&pseudo_random(4, 4, 162), 1e-9);
    check_moore_penrose(&pseudo_random(2, 5, 163), 1e-8);
}

#[test]
fn pseudoinverse_moore_penrose_rank_deficient() {
    let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 0.0, 1.0]);
    check_moore_penrose(&a, 1e-6);
    check_moore_penrose(&DynMatrix::zeros(2, 3, 0.0), 1e-12);
}

#[test]
fn lstsq_residual_orthogonal_to_columns() {
    let a = pseudo_random(8, 3, 171);
    let b = pseudo_random(8, 2, 172);
    let x = a.lstsq(&b, &LstsqSettings::default()).unwrap();
    let resid = &(&a * &x) - &b;
    assert!(a.tr_mul(&resid).max_abs() < 1e-9);
}

#[test]
fn lstsq_f32() {
    let a = DynMatrix::from_rows(3, 2, &[1.0_f32, 0.0, 1.0, 1.0, 1.0, 2.0]);
    let b = DynMatrix::from_rows(3, 1, &[1.0_f32, 2.0, 4.0]);
    let x = linalg::linear_lstsq(&a, &b, &LstsqSettings::default()).unwrap();
    assert!((x[(0, 0)] - 5.0 / 6.0).abs() < 1e-4);
    assert!((x[(1, 0)] - 1.5).abs() < 1e-4);
}

#[test]
fn matrix_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DynMatrix<f64>>();
    assert_send_sync::<linalg::SvdDecomposition<f32>>();
}
