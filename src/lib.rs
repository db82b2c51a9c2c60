//! # numeris-dense
//!
//! Pure-Rust dense linear algebra over `f32` / `f64`, no-std compatible
//! (heap allocation through `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use numeris_dense::{DynMatrix, DynVector};
//!
//! // Solve a linear system Ax = b
//! let a = DynMatrix::from_rows(3, 3, &[
//!     2.0_f64, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let b = DynVector::from_slice(&[8.0_f64, -11.0, -3.0]);
//! let x = a.solve_vec(&b).unwrap(); // x = [2, 3, -1]
//! assert!((x[0] - 2.0).abs() < 1e-12);
//! assert!((x[1] - 3.0).abs() < 1e-12);
//! assert!((x[2] + 1.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`]: Heap-allocated `DynMatrix<T>` with runtime dimensions and
//!   column-major storage, plus the [`DynVector<T>`] newtype. Arithmetic,
//!   transpose, norms and convenience methods that forward to [`linalg`]:
//!   `a.lu()`, `a.qr()`, `a.svd(..)`, `a.solve(&b)`, `a.det()`.
//!
//! - [`linalg`]: Triangular solves, LU (partial pivoting), Cholesky
//!   (`A = L·Lᵗ`), Householder QR, general eigenvalues (QR iteration),
//!   symmetric eigendecomposition (Jacobi rotations), SVD, least squares and
//!   the pseudo-inverse. All failures are reported as [`LinalgError`].
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by every decomposition
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for in-place kernels
//!
//! ## Logging
//!
//! Iterative solvers and the least-squares fallback emit `tracing` events at
//! `debug` / `trace` level. Install any `tracing` subscriber to see them.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm, `std::error::Error` for [`LinalgError`] |
//! | `libm`    | no       | Pure-Rust software float fallback for `no_std` targets |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod linalg;
pub mod traits;

pub use dynmatrix::{DynMatrix, DynMatrixf32, DynMatrixf64, DynVector, DynVectorf32, DynVectorf64};
pub use linalg::{
    CholeskyDecomposition, EigenSettings, LinalgError, LstsqSettings, LuDecomposition,
    QrDecomposition, SvdDecomposition, SvdSettings, SymmetricEigen,
};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
