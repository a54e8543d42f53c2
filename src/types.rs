//! Error types, scalar bounds and the operator traits used by the range finder.

use crate::random_matrix::RandomMatrix;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix2};
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

pub use ndarray_linalg::{c32, c64, Scalar};

#[derive(Error, Debug)]
pub enum RandEigError {
    /// A dense factorization (QR, SVD, triangular solve, eigensolve) failed.
    #[error("Linear algebra backend error: {0}")]
    Linalg(#[from] LinalgError),
    /// The requested target rank cannot be satisfied by the input matrix.
    #[error("Invalid target rank {rank} for a matrix with minimum dimension {dim}")]
    InvalidRank { rank: usize, dim: usize },
    /// The input matrix contains NaN or infinite entries.
    #[error("Input matrix contains non-finite entries")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, RandEigError>;

/// The scalar types supported by this crate.
///
/// Implemented exactly for `f32`, `f64`, `c32` and `c64` through their
/// [`RandomMatrix`] implementations. The adjoint used throughout the crate is
/// [`Scalar::conj`] composed with transposition, which degenerates to the
/// plain transpose for the real types.
pub trait ScalarType: RandomMatrix {}

impl<A: RandomMatrix> ScalarType for A {}

/// Matrix-Vector Product Trait
///
/// Interface for operators that provide matrix-vector products.
pub trait MatVec {
    type A: ScalarType;

    // Return the number of rows of the operator.
    fn nrows(&self) -> usize;

    // Return the number of columns of the operator.
    fn ncols(&self) -> usize;

    // Return the matrix vector product of an operator with a vector.
    fn matvec(&self, vec: ArrayView1<Self::A>) -> Array1<Self::A>;
}

/// Matrix-Matrix Product Trait
///
/// Application of a linear operator $A$ to a matrix $X$ representing multiple
/// columns. The default implementation applies [`MatVec::matvec`] column by
/// column; dense matrix implementors should override it with a single product.
pub trait MatMat: MatVec {
    // Return the matrix-matrix product of an operator with a matrix.
    fn matmat(&self, mat: ArrayView2<Self::A>) -> Array2<Self::A> {
        let mut output = Array2::<Self::A>::zeros((self.nrows(), mat.ncols()));

        for (index, col) in mat.axis_iter(Axis(1)).enumerate() {
            output
                .index_axis_mut(Axis(1), index)
                .assign(&self.matvec(col));
        }

        output
    }
}

/// Product of the conjugate adjoint of an operator with a vector
///
/// If the operator is a matrix this is the action $A^Hx$, where $A^H$ is the
/// complex conjugate transpose of $A$.
pub trait ConjMatVec: MatVec {
    // If `self` is a linear operator return the product of the adjoint of
    // `self` with a vector.
    fn conj_matvec(&self, vec: ArrayView1<Self::A>) -> Array1<Self::A>;
}

/// Action of the conjugate adjoint of an operator on a matrix
///
/// If the operator is a matrix this is the action $A^HX$. The default
/// implementation is based on [`ConjMatVec::conj_matvec`].
pub trait ConjMatMat: MatMat + ConjMatVec {
    // Return the product of the adjoint of `self` with a given matrix.
    fn conj_matmat(&self, mat: ArrayView2<Self::A>) -> Array2<Self::A> {
        let mut output = Array2::<Self::A>::zeros((self.ncols(), mat.ncols()));

        for (index, col) in mat.axis_iter(Axis(1)).enumerate() {
            output
                .index_axis_mut(Axis(1), index)
                .assign(&self.conj_matvec(col));
        }

        output
    }
}

impl<A, S> MatVec for ArrayBase<S, Ix2>
where
    A: ScalarType,
    S: Data<Elem = A>,
{
    type A = A;

    fn nrows(&self) -> usize {
        self.nrows()
    }

    fn ncols(&self) -> usize {
        self.ncols()
    }

    fn matvec(&self, vec: ArrayView1<Self::A>) -> Array1<Self::A> {
        self.dot(&vec)
    }
}

impl<A, S> ConjMatVec for ArrayBase<S, Ix2>
where
    A: ScalarType,
    S: Data<Elem = A>,
{
    fn conj_matvec(&self, vec: ArrayView1<Self::A>) -> Array1<Self::A> {
        vec.map(|item| item.conj())
            .dot(self)
            .map(|item| item.conj())
    }
}

impl<A, S> MatMat for ArrayBase<S, Ix2>
where
    A: ScalarType,
    S: Data<Elem = A>,
{
    fn matmat(&self, mat: ArrayView2<Self::A>) -> Array2<Self::A> {
        self.dot(&mat)
    }
}

impl<A, S> ConjMatMat for ArrayBase<S, Ix2>
where
    A: ScalarType,
    S: Data<Elem = A>,
{
    fn conj_matmat(&self, mat: ArrayView2<Self::A>) -> Array2<Self::A> {
        self.t().map(|item| item.conj()).dot(&mat)
    }
}
