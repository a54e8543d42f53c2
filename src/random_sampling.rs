//! Randomized sampling of the range of a linear operator.
//!
//! The routine in this module is the shared first stage of every
//! decomposition in this crate. It draws a random test matrix, applies the
//! operator to it and orthonormalizes the result, so that the returned basis
//! $Q$ approximates the dominant range of the operator. For slowly decaying
//! spectra the approximation is sharpened through power (subspace)
//! iterations, which alternate applications of the operator and its adjoint.
//!
//! Each half step of the power iteration is re-orthonormalized through an
//! economic QR decomposition. Without this, repeated multiplication by the
//! operator drives all sketch columns towards the single dominant direction
//! and the sketch numerically collapses to rank one.

use crate::random_matrix::RandomMatrix;
use crate::types::{ConjMatMat, Result};
use crate::SampleDistribution;
use ndarray::Array2;
use ndarray_linalg::QR;
use rand::Rng;

/// Randomly sample the range of an operator.
///
/// Returns a matrix with `width` orthonormal columns that approximates the
/// dominant range of `op`. The caller chooses `width` as target rank plus
/// oversampling; a typical oversampling is 5 to 20 columns.
///
/// # Arguments
///
/// * `op`: The operator for which to sample the range.
/// * `width`: Number of columns of the sampled basis.
/// * `n_iter`: Number of power iteration steps. For `n_iter = 0` the basis is
///   a plain orthonormalized sketch.
/// * `sdist`: The distribution of the random test matrix.
/// * `rng`: The random number generator.
pub fn sample_range<Op: ConjMatMat, R: Rng>(
    op: &Op,
    width: usize,
    n_iter: usize,
    sdist: SampleDistribution,
    rng: &mut R,
) -> Result<Array2<Op::A>> {
    let n = op.ncols();

    let omega = Op::A::random_sample((n, width), sdist, rng);
    let mut sample = op.matmat(omega.view());

    for _ in 0..n_iter {
        let (q, _) = sample.qr()?;
        let (z, _) = op.conj_matmat(q.view()).qr()?;
        sample = op.matmat(z.view());
    }

    let (q, _) = sample.qr()?;
    Ok(q)
}
