//! Randomized Nyström eigendecomposition of positive semi-definite matrices.
//!
//! Both routines in this module project the input onto a small set of
//! directions, then attempt a Cholesky factorization of the projected core.
//! When the core is numerically positive definite the eigenpairs are
//! recovered from a triangular solve followed by an SVD, which is cheaper and
//! better conditioned than diagonalizing the core directly. Real inputs
//! frequently violate strict positive definiteness at the margin, so a failed
//! Cholesky factorization is treated as a recoverable condition: it is logged
//! and the routine falls back to a direct Hermitian eigendecomposition.
//!
//! [`randomized_eigh_nystroem`] draws its directions from the randomized
//! range finder. [`randomized_eigh_nystroem_col`] instead samples columns of
//! the input uniformly without replacement and needs neither a sketch nor
//! power iterations.

use crate::eigh::{lift_eigh, Eig};
use crate::helpers::{adjoint, symmetrize};
use crate::random_sampling::sample_range;
use crate::types::{RandEigError, Result, ScalarType};
use crate::SampleDistribution;
use ndarray::{s, Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_linalg::{Cholesky, Diag, JobSvd, SVDDCInto, SolveTriangular, UPLO};
use rand::Rng;

/// Approximate eigendecomposition of a PSD matrix via the Nyström method.
///
/// Computes `k` approximate eigenpairs of the positive semi-definite matrix
/// `a` from a randomized range basis of width `k + p`, refined by `n_iter`
/// power iteration steps. Typical parameters are `p = 10` and `n_iter = 2`.
/// If `a` is not positive semi-definite the result carries a weaker accuracy
/// guarantee than [`crate::randomized_eigh`].
///
/// # Arguments
///
/// * `a`: Positive semi-definite input matrix.
/// * `k`: Target rank, clamped to the matrix dimension.
/// * `p`: Oversampling parameter.
/// * `n_iter`: Number of power iteration steps.
/// * `sdist`: Distribution of the random test matrix.
/// * `rng`: The random number generator.
pub fn randomized_eigh_nystroem<A, S, R>(
    a: &ArrayBase<S, Ix2>,
    k: usize,
    p: usize,
    n_iter: usize,
    sdist: SampleDistribution,
    rng: &mut R,
) -> Result<Eig<A>>
where
    A: ScalarType,
    S: Data<Elem = A>,
    R: Rng,
{
    let (m, n) = a.dim();
    let k = k.min(m.min(n));

    let basis = sample_range(a, k + p, n_iter, sdist, rng)?;

    let b1 = a.dot(&basis);
    let b2 = symmetrize(adjoint(&basis).dot(&b1));

    match b2.cholesky(UPLO::Lower) {
        Ok(chol) => nystroem_factorize(&b1, chol, k),
        Err(_) => {
            log::warn!(
                "Cholesky factorization failed, projected matrix is not positive definite. \
                 Falling back to a direct eigendecomposition."
            );
            lift_eigh(b2, basis.view(), k)
        }
    }
}

/// Approximate eigendecomposition of a PSD matrix from sampled columns.
///
/// Selects `k + p` column indices uniformly at random without replacement and
/// computes a Nyström approximation from the sampled cross block
/// `A[:, idx]` and core block `A[idx, idx]`. No sketching and no power
/// iteration is performed; typical oversampling is `p = 0`.
///
/// Fails with [`RandEigError::InvalidRank`] if `k + p` exceeds the matrix
/// dimension, since that many distinct indices cannot be drawn.
///
/// # Arguments
///
/// * `a`: Positive semi-definite input matrix.
/// * `k`: Target rank, clamped to the matrix dimension.
/// * `p`: Oversampling parameter.
/// * `rng`: The random number generator.
pub fn randomized_eigh_nystroem_col<A, S, R>(
    a: &ArrayBase<S, Ix2>,
    k: usize,
    p: usize,
    rng: &mut R,
) -> Result<Eig<A>>
where
    A: ScalarType,
    S: Data<Elem = A>,
    R: Rng,
{
    let (m, n) = a.dim();
    let k = k.min(m.min(n));

    if k + p > n {
        return Err(RandEigError::InvalidRank {
            rank: k + p,
            dim: n,
        });
    }

    let mut indices = rand::seq::index::sample(rng, n, k + p).into_vec();
    indices.sort_unstable();

    let b1 = a.select(Axis(1), &indices);
    let b2 = symmetrize(b1.select(Axis(0), &indices));

    match b2.cholesky(UPLO::Lower) {
        Ok(chol) => nystroem_factorize(&b1, chol, k),
        Err(_) => {
            log::warn!(
                "Cholesky factorization failed, sampled matrix is not positive definite. \
                 Falling back to a direct singular value decomposition."
            );
            nystroem_extend(&b1, b2, k, n)
        }
    }
}

/// Shared Nyström fast path.
///
/// Given the cross block $B_1$ and the lower Cholesky factor $C$ of the core
/// block, solve $CF = B_1^H$ and compute the SVD of $F^H$. The eigenvalues of
/// the Nyström approximation are the squared singular values, since $F^H F$
/// reproduces the approximation by construction.
fn nystroem_factorize<A: ScalarType>(
    b1: &Array2<A>,
    chol: Array2<A>,
    k: usize,
) -> Result<Eig<A>> {
    let f = chol.solve_triangular(UPLO::Lower, Diag::NonUnit, &adjoint(b1))?;

    let (u, sigma, _) = adjoint(&f).svddc_into(JobSvd::Some)?;

    let values = sigma.slice(s![..k]).mapv(|item| item * item);
    let vectors = u.unwrap().slice_move(s![.., ..k]);

    Ok(Eig { values, vectors })
}

/// Fallback for the column sampled variant.
///
/// Diagonalizes the sampled core through its SVD and extends the small
/// eigenbasis back to the full row space via the cross block $B_1$. The
/// factors $\sqrt{k/n}$ and $n/k$ correct for the uniform sampling ratio.
fn nystroem_extend<A: ScalarType>(
    b1: &Array2<A>,
    b2: Array2<A>,
    k: usize,
    n: usize,
) -> Result<Eig<A>> {
    let (u, sigma, _) = b2.svddc_into(JobSvd::Some)?;

    // Truncate to the leading k pairs before the rescale; trailing singular
    // values of a rank deficient core vanish and must not be divided by.
    let mut u = u.unwrap().slice_move(s![.., ..k]);
    let sigma = sigma.slice_move(s![..k]);

    for (mut col, &sv) in u.axis_iter_mut(Axis(1)).zip(sigma.iter()) {
        col.map_inplace(|item| *item = *item / A::from_real(sv));
    }

    let scale = A::from_real(A::real((k as f64 / n as f64).sqrt()));
    let vectors = b1.dot(&u).mapv(|item| item * scale);

    let ratio = A::real(n as f64 / k as f64);
    let values = sigma.mapv(|item| {
        let scaled = item * ratio;
        scaled * scaled
    });

    Ok(Eig { values, vectors })
}
