//! Collect all traits and other exports here.

pub use crate::eigh::{randomized_eigh, Eig};
pub use crate::helpers::{adjoint, symmetrize, RelDiff};
pub use crate::nystroem::{randomized_eigh_nystroem, randomized_eigh_nystroem_col};
pub use crate::qb::{randomized_qb, QB};
pub use crate::random_matrix::RandomMatrix;
pub use crate::random_sampling::sample_range;
pub use crate::types::{ConjMatMat, ConjMatVec, MatMat, MatVec, RandEigError, Result, ScalarType};
pub use crate::SampleDistribution;
