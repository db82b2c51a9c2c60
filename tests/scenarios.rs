use numeris_dense::linalg::{self, LinalgError};
use numeris_dense::{DynMatrix, DynVector};

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() < tol, "{}: {} vs {}", msg, a, b);
}

// ── 4x4 determinant and inverse ─────────────────────────────────────

fn det_fixture() -> DynMatrix<f64> {
    DynMatrix::from_rows(
        4,
        4,
        &[
            7.0_f64, 3.0, 1.0, 5.0, //
            1.0, 5.0, 2.0, 2.0, //
            -2.0, 1.0, 0.0, -1.0, //
            5.0, 2.0, 4.0, 0.0,
        ],
    )
}

#[test]
fn determinant_is_63() {
    let a = det_fixture();
    assert_near(linalg::determinant(&a).unwrap(), 63.0, 1e-10, "det");
    assert_near(a.lu().unwrap().det(), 63.0, 1e-10, "lu det");
    assert_near(a.qr().unwrap().det_abs(), 63.0, 1e-9, "qr |det|");
}

#[test]
fn inverse_times_a_is_identity() {
    let a = det_fixture();
    let inv = linalg::inverse(&a).unwrap();
    let eye = DynMatrix::eye(4, 0.0);
    assert!((&inv * &a).max_abs_diff(&eye) < 1e-12);
    assert!((&a * &inv).max_abs_diff(&eye) < 1e-12);
    // det(A⁻¹) = 1 / det(A)
    assert_near(inv.det().unwrap(), 1.0 / 63.0, 1e-12, "det of inverse");
}

// ── 4x4 LU solve ────────────────────────────────────────────────────

fn solve_fixture() -> (DynMatrix<f64>, DynMatrix<f64>) {
    let a = DynMatrix::from_rows(
        4,
        4,
        &[
            2.0_f64, 0.0, -3.0, 5.0, //
            5.0, 4.0, 2.0, 0.0, //
            -2.0, 1.0, 8.0, 3.0, //
            7.0, 0.0, 5.0, 2.0,
        ],
    );
    let b = DynMatrix::from_rows(4, 1, &[0.0_f64, 3.0, 5.0, 1.0]);
    (a, b)
}

#[test]
fn solve_lu_known_solution() {
    let (a, b) = solve_fixture();
    let lu = linalg::lu_decomposition(&a).unwrap();
    let x = linalg::solve_lu(&lu, &b).unwrap();
    let expected = [-0.2, 0.81935, 0.36129, 0.29677];
    for (i, &e) in expected.iter().enumerate() {
        assert_near(x[(i, 0)], e, 1e-5, "x");
    }
    // exact: (-31, 127, 56, 46) / 155
    assert_near(x[(1, 0)], 127.0 / 155.0, 1e-12, "x1 exact");
    assert!((&a * &x).max_abs_diff(&b) < 1e-12);
}

#[test]
fn solve_paths_agree() {
    let (a, b) = solve_fixture();
    let x_lu = linalg::solve(&a, &b).unwrap();
    let x_qr = a.qr().unwrap().solve(&b).unwrap();
    let x_ls = a.lstsq(&b, &Default::default()).unwrap();
    let x_vec = a
        .solve_vec(&DynVector::from_slice(&[0.0_f64, 3.0, 5.0, 1.0]))
        .unwrap();
    assert!(x_lu.max_abs_diff(&x_qr) < 1e-10);
    assert!(x_lu.max_abs_diff(&x_ls) < 1e-8);
    assert_eq!(x_vec.as_slice(), x_lu.as_slice());
}

#[test]
fn factorization_reused_for_many_rhs() {
    let (a, _) = solve_fixture();
    let lu = a.lu().unwrap();
    let eye = DynMatrix::eye(4, 0.0);
    let inv = linalg::solve_lu(&lu, &eye).unwrap();
    assert!(inv.max_abs_diff(&lu.inverse().unwrap()) < 1e-14);
}

#[test]
fn rhs_shape_mismatch() {
    let (a, _) = solve_fixture();
    let b = DynMatrix::zeros(3, 1, 0.0);
    assert_eq!(
        linalg::solve(&a, &b).unwrap_err(),
        LinalgError::ShapeMismatch {
            expected: (4, 1),
            got: (3, 1),
        }
    );
}

#[cfg(feature = "std")]
#[test]
fn errors_display() {
    assert_eq!(LinalgError::Singular.to_string(), "matrix is singular");
    let e = LinalgError::ShapeMismatch {
        expected: (4, 4),
        got: (3, 4),
    };
    assert_eq!(e.to_string(), "shape mismatch: expected 4x4, got 3x4");
    let boxed: Box<dyn std::error::Error> = Box::new(LinalgError::NotPositiveDefinite);
    assert_eq!(boxed.to_string(), "matrix is not positive definite");
}
