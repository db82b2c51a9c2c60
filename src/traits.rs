use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Element type of a [`crate::DynMatrix`]: anything `Copy` with ring
/// arithmetic. The container and its operators need nothing more.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Real floating-point element.
///
/// Required by every decomposition and solver (`sqrt`, `abs`, `epsilon`,
/// ordered comparisons). Blanket-implemented for `f32` and `f64`.
pub trait FloatScalar: Scalar + Float {
    /// Convert a literal constant into `Self`.
    ///
    /// Used for settings defaults and small algorithm constants; every
    /// finite `f64` is representable (possibly rounded) in any float type.
    #[inline]
    fn lit(x: f64) -> Self {
        <Self as num_traits::NumCast>::from(x).unwrap_or_else(Self::nan)
    }

    /// The constant `2`.
    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

/// Column-major read access.
///
/// Algorithms in [`crate::linalg`] are written against this trait so they
/// work on any column-major container, not only [`crate::DynMatrix`].
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Contiguous slice `m[row_start..nrows, col]`.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];
}

/// Write access for the in-place factorization kernels (`lu_in_place`,
/// `cholesky_in_place`).
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Contiguous mutable slice `m[row_start..nrows, col]`.
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}
