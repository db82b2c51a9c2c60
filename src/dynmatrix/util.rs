use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};

use super::vector::DynVector;
use super::DynMatrix;

// ── Row / column swaps ──────────────────────────────────────────────

impl<T> DynMatrix<T> {
    /// Exchange rows `a` and `b`, one element per column.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let mut m = DynMatrix::from_rows(3, 1, &[1.0_f64, 2.0, 3.0]);
    /// m.swap_rows(0, 2);
    /// assert_eq!(m.as_slice(), &[3.0, 2.0, 1.0]);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b || self.nrows == 0 {
            return;
        }
        for col in self.data.chunks_exact_mut(self.nrows) {
            col.swap(a, b);
        }
    }

    /// Exchange columns `a` and `b` as whole storage runs.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let m = self.nrows;
        let (lo, hi) = (a.min(b), a.max(b));
        let (left, right) = self.data.split_at_mut(hi * m);
        left[lo * m..(lo + 1) * m].swap_with_slice(&mut right[..m]);
    }
}

// ── Row and column copies ───────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> DynVector<T> {
        DynVector::from_vec((0..self.ncols).map(|j| self[(i, j)]).collect())
    }

    /// Copy of column `j`, a contiguous run of the storage.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let m = DynMatrix::from_rows(3, 2, &[1.0_f64, 4.0, 2.0, 5.0, 3.0, 6.0]);
    /// assert_eq!(m.col(1).as_slice(), &[4.0, 5.0, 6.0]);
    /// ```
    pub fn col(&self, j: usize) -> DynVector<T> {
        DynVector::from_slice(self.col_as_slice(j, 0))
    }

    /// Overwrite column `j`; panics unless `v.len() == nrows`.
    pub fn set_col(&mut self, j: usize, v: &[T]) {
        assert!(v.len() == self.nrows, "vector length mismatch");
        self.col_as_mut_slice(j, 0).copy_from_slice(v);
    }

    /// Copy of the leading `ncols` columns.
    pub fn left_cols(&self, ncols: usize) -> Self {
        assert!(ncols <= self.ncols, "column count out of range");
        DynMatrix::from_slice(self.nrows, ncols, &self.data[..self.nrows * ncols])
    }
}

impl<T: FloatScalar> DynMatrix<T> {
    /// Largest element-wise absolute difference.
    ///
    /// Panics on a shape mismatch.
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let a = DynMatrix::from_rows(1, 2, &[1.0_f64, 2.0]);
    /// let b = DynMatrix::from_rows(1, 2, &[1.5_f64, 1.0]);
    /// assert_eq!(a.max_abs_diff(&b), 1.0);
    /// ```
    pub fn max_abs_diff(&self, rhs: &Self) -> T {
        assert!(self.shape() == rhs.shape(), "dimension mismatch");
        self.data
            .iter()
            .zip(&rhs.data)
            .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs()))
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc.max(x.abs()))
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// One bracketed line per row, columns right-aligned to their widest entry.
impl<T: fmt::Display> fmt::Display for DynMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let cells: Vec<String> = self.data.iter().map(|x| x.to_string()).collect();
        let widths: Vec<usize> = cells
            .chunks(m.max(1))
            .map(|col| col.iter().map(|c| c.chars().count()).max().unwrap_or(0))
            .collect();
        for i in 0..m {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str("[")?;
            for (j, &w) in widths.iter().enumerate() {
                let sep = if j == 0 { "" } else { "  " };
                write!(f, "{sep}{:>w$}", cells[j * m + i])?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
