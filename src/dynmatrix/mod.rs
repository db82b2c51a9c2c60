pub mod aliases;
mod linalg;
mod norm;
mod ops;
mod square;
mod util;
mod vector;

pub use aliases::*;
pub use vector::DynVector;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Dynamically-sized heap-allocated matrix.
///
/// Column-major `Vec<T>` storage. Dimensions are set at runtime. Implements
/// [`MatrixRef`] and [`MatrixMut`], so all generic linalg free functions work
/// with `DynMatrix` out of the box.
///
/// # Examples
///
/// ```
/// use numeris_dense::DynMatrix;
///
/// let a = DynMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// assert_eq!(a.shape(), (2, 3));
/// assert_eq!(a[(1, 2)], 6.0);
///
/// // storage is column by column
/// assert_eq!(a.as_slice()[..2], [1.0, 4.0]);
///
/// let ata = a.tr_mul(&a);
/// assert_eq!(ata.shape(), (3, 3));
/// assert!(ata.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

fn check_len(len: usize, nrows: usize, ncols: usize) {
    assert!(
        len == nrows * ncols,
        "slice length {len} does not match {nrows}x{ncols} matrix"
    );
}

impl<T: Scalar> DynMatrix<T> {
    /// All-zero `nrows x ncols` matrix. `_zero` only pins the element type.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let m = DynMatrix::zeros(2, 3, 0.0_f64);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.as_slice().iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(nrows: usize, ncols: usize, _zero: T) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// `n x n` identity. `_zero` only pins the element type.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let i4 = DynMatrix::eye(4, 0.0_f32);
    /// assert_eq!(i4.trace(), 4.0);
    /// assert_eq!(i4[(3, 0)], 0.0);
    /// ```
    pub fn eye(n: usize, _zero: T) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// Build from column-major data; panics on a length mismatch.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// // columns [1, 2, 3] and [4, 5, 6]
    /// let m = DynMatrix::from_slice(3, 2, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(2, 0)], 3.0);
    /// assert_eq!(m[(0, 1)], 4.0);
    /// ```
    pub fn from_slice(nrows: usize, ncols: usize, slice: &[T]) -> Self {
        Self::from_vec(nrows, ncols, slice.to_vec())
    }

    /// Build from row-major data, the order matrices are usually written in.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 3, &[
    ///     1.0_f64, 2.0, 3.0,
    ///     4.0, 5.0, 6.0,
    /// ]);
    /// assert_eq!(m.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        check_len(row_major.len(), nrows, ncols);
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }

    /// Take ownership of column-major data; panics on a length mismatch.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        check_len(data.len(), nrows, ncols);
        Self { data, nrows, ncols }
    }
}

impl<T> DynMatrix<T> {
    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        col * self.nrows + row
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Raw storage, one column after another.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Element `(i, j)` is `f(i, j)`.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let hilbert = DynMatrix::from_fn(3, 3, |i, j| 1.0_f64 / (i + j + 1) as f64);
    /// assert_eq!(hilbert[(1, 2)], 0.25);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let data = (0..ncols)
            .flat_map(|j| (0..nrows).map(move |i| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Self { data, nrows, ncols }
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for DynMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self[(row, col)]
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        let end = self.offset(0, col + 1);
        &self.data[self.offset(row_start, col)..end]
    }
}

impl<T> MatrixMut<T> for DynMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self[(row, col)]
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let (start, end) = (self.offset(row_start, col), self.offset(0, col + 1));
        &mut self.data[start..end]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.nrows, "row {row} out of range");
        &self.data[self.offset(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.nrows, "row {row} out of range");
        let k = self.offset(row, col);
        &mut self.data[k]
    }
}
