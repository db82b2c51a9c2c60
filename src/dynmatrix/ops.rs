use alloc::vec;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::traits::Scalar;

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    fn assert_same_shape(&self, rhs: &Self, op: char) {
        assert!(
            self.shape() == rhs.shape(),
            "dimension mismatch: {}x{} {op} {}x{}",
            self.nrows,
            self.ncols,
            rhs.nrows,
            rhs.ncols,
        );
    }

    fn zip_in_place(&mut self, rhs: &Self, op: char, f: impl Fn(T, T) -> T) {
        self.assert_same_shape(rhs, op);
        for (a, &b) in self.data.iter_mut().zip(&rhs.data) {
            *a = f(*a, b);
        }
    }

    pub(crate) fn map(&self, f: impl Fn(T) -> T) -> Self {
        DynMatrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

/// Owned and mixed operand forms, all routed to the `&a op &b` impl.
macro_rules! forward_owned_binop {
    ($($tr:ident :: $method:ident),*) => {
        $(
            impl<T: Scalar> $tr for DynMatrix<T> {
                type Output = DynMatrix<T>;
                fn $method(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
                    $tr::$method(&self, &rhs)
                }
            }

            impl<T: Scalar> $tr<&DynMatrix<T>> for DynMatrix<T> {
                type Output = DynMatrix<T>;
                fn $method(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
                    $tr::$method(&self, rhs)
                }
            }

            impl<T: Scalar> $tr<DynMatrix<T>> for &DynMatrix<T> {
                type Output = DynMatrix<T>;
                fn $method(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
                    $tr::$method(self, &rhs)
                }
            }
        )*
    };
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul);

// ── Element-wise addition / subtraction ─────────────────────────────

impl<T: Scalar> Add<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn add(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        let mut out = self.clone();
        out.zip_in_place(rhs, '+', |a, b| a + b);
        out
    }
}

impl<T: Scalar> Sub<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn sub(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        let mut out = self.clone();
        out.zip_in_place(rhs, '-', |a, b| a - b);
        out
    }
}

impl<T: Scalar> AddAssign<&DynMatrix<T>> for DynMatrix<T> {
    fn add_assign(&mut self, rhs: &DynMatrix<T>) {
        self.zip_in_place(rhs, '+', |a, b| a + b);
    }
}

impl<T: Scalar> SubAssign<&DynMatrix<T>> for DynMatrix<T> {
    fn sub_assign(&mut self, rhs: &DynMatrix<T>) {
        self.zip_in_place(rhs, '-', |a, b| a - b);
    }
}

impl<T: Scalar> Neg for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn neg(self) -> DynMatrix<T> {
        self.map(|x| T::zero() - x)
    }
}

impl<T: Scalar> Neg for DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn neg(self) -> DynMatrix<T> {
        -&self
    }
}

// ── Matrix product ──────────────────────────────────────────────────

impl<T: Scalar> Mul<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert!(
            self.ncols == rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows,
            self.ncols,
            rhs.nrows,
            rhs.ncols,
        );
        let m = self.nrows;
        let mut data = vec![T::zero(); m * rhs.ncols];
        let out_cols = data.chunks_exact_mut(m.max(1));
        let b_cols = rhs.data.chunks_exact(rhs.nrows.max(1));
        // out[:, j] = sum_k a[:, k] * b[k, j], one axpy per nonzero b[k, j]
        for (out, b_col) in out_cols.zip(b_cols) {
            for (a_col, &b_kj) in self.data.chunks_exact(m.max(1)).zip(b_col) {
                if b_kj == T::zero() {
                    continue;
                }
                for (o, &a) in out.iter_mut().zip(a_col) {
                    *o = *o + a * b_kj;
                }
            }
        }
        DynMatrix {
            data,
            nrows: m,
            ncols: rhs.ncols,
        }
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: Scalar> Mul<T> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: T) -> DynMatrix<T> {
        self.map(|x| x * rhs)
    }
}

impl<T: Scalar> Mul<T> for DynMatrix<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        &self * rhs
    }
}

impl<T: Scalar> MulAssign<T> for DynMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.data.iter_mut().for_each(|x| *x = *x * rhs);
    }
}

impl<T: Scalar> Div<T> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn div(self, rhs: T) -> DynMatrix<T> {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar> Div<T> for DynMatrix<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        &self / rhs
    }
}

macro_rules! impl_scalar_mul_dyn {
    ($($t:ty),*) => {
        $(
            impl Mul<DynMatrix<$t>> for $t {
                type Output = DynMatrix<$t>;
                fn mul(self, rhs: DynMatrix<$t>) -> DynMatrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&DynMatrix<$t>> for $t {
                type Output = DynMatrix<$t>;
                fn mul(self, rhs: &DynMatrix<$t>) -> DynMatrix<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul_dyn!(f32, f64);

impl<T: Copy> DynMatrix<T> {
    /// Transpose: (M×N) → (N×M).
    ///
    /// ```
    /// use numeris_dense::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t.ncols(), 2);
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }
}

impl<T: Scalar> DynMatrix<T> {
    /// `selfᵗ · rhs` without materialising the transpose.
    ///
    /// Used to form Gram matrices and normal equations.
    pub fn tr_mul(&self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.nrows, rhs.nrows,
            "dimension mismatch: ({}x{})ᵗ * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        DynMatrix::from_fn(self.ncols, rhs.ncols, |i, j| {
            let a = &self.data[i * m..(i + 1) * m];
            let b = &rhs.data[j * m..(j + 1) * m];
            a.iter()
                .zip(b.iter())
                .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
        })
    }
}
