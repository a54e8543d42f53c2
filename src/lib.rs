//! Randomized low rank approximation of dense matrices.
//!
//! This crate implements the sketch-and-refine pipeline of Halko, Martinsson
//! and Tropp for matrices whose spectrum decays quickly: a randomized range
//! finder builds an orthonormal basis for the dominant column space of a
//! matrix, and projection onto that basis reduces eigendecomposition or
//! factorization to a small problem that dense LAPACK routines solve cheaply.
//!
//! Entry points:
//!
//! * [`randomized_eigh`]: approximate eigenpairs of a Hermitian matrix.
//! * [`randomized_eigh_nystroem`]: approximate eigenpairs of a positive
//!   semi-definite matrix via the Nyström method with a sketched basis.
//! * [`randomized_eigh_nystroem_col`]: Nyström eigenpairs from uniformly
//!   sampled columns, without sketching or power iteration.
//! * [`randomized_qb`]: a two factor decomposition $A\approx QB$ of a general
//!   rectangular matrix.
//!
//! All routines are implemented for `f32`, `f64`, `c32` and `c64` matrices.
//! The quality of the approximation is controlled by the caller through the
//! oversampling parameter `p` and the number of power iterations `q`; the
//! routines make no attempt to choose these automatically.

pub mod eigh;
pub mod helpers;
pub mod nystroem;
pub mod prelude;
pub mod qb;
pub mod random_matrix;
pub mod random_sampling;
pub mod types;

/// Distribution from which the elements of a random test matrix are drawn.
///
/// For complex scalar types the real and imaginary parts are drawn
/// independently from the same distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleDistribution {
    /// Elements uniformly distributed on $[-1, 1]$.
    Uniform,
    /// Standard normally distributed elements.
    Normal,
}

pub use eigh::{randomized_eigh, Eig};
pub use helpers::RelDiff;
pub use nystroem::{randomized_eigh_nystroem, randomized_eigh_nystroem_col};
pub use qb::{randomized_qb, QB};
pub use random_matrix::RandomMatrix;
pub use random_sampling::sample_range;
pub use types::{ConjMatMat, ConjMatVec, MatMat, MatVec, RandEigError, Result, ScalarType};
