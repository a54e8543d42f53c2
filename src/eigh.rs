//! Randomized eigendecomposition of Hermitian matrices.
//!
//! The input matrix is projected onto a sampled range basis, the small
//! projected core is symmetrized and diagonalized exactly, and the resulting
//! eigenvectors are lifted back to the original space. Eigenvalues are
//! returned in descending order and truncated to the target rank.

use crate::helpers::{adjoint, symmetrize};
use crate::random_sampling::sample_range;
use crate::types::{Result, ScalarType};
use crate::SampleDistribution;
use ndarray::{s, Array1, Array2, ArrayBase, ArrayView2, Data, Ix2};
use ndarray_linalg::{Eigh, Scalar, UPLO};
use rand::Rng;

/// Container for an approximate eigendecomposition.
///
/// `values[i]` is the eigenvalue associated with the column `vectors[:, i]`.
/// Eigenvalues are real for all supported scalar types and ordered
/// descending.
pub struct Eig<A: Scalar> {
    /// The eigenvalues
    pub values: Array1<A::Real>,
    /// The matrix of eigenvectors, one column per eigenvalue
    pub vectors: Array2<A>,
}

impl<A: Scalar> Eig<A> {
    /// Number of returned eigenpairs
    pub fn rank(&self) -> usize {
        self.values.len()
    }

    /// Reconstruct the rank-`k` approximation $V \Lambda V^H$.
    pub fn to_mat(&self) -> Array2<A> {
        let lambda = Array2::from_diag(&self.values.mapv(A::from_real));
        self.vectors.dot(&lambda).dot(&adjoint(&self.vectors))
    }
}

/// Approximate eigendecomposition of a Hermitian matrix.
///
/// Computes `k` approximate eigenpairs of the Hermitian matrix `a` from a
/// randomized range basis of width `k + p`, refined by `n_iter` power
/// iteration steps. Typical parameters are `p = 20` and `n_iter = 2` with a
/// normally distributed test matrix. The target rank is clamped to the
/// matrix dimension if it exceeds it.
///
/// # Arguments
///
/// * `a`: Hermitian input matrix.
/// * `k`: Target rank.
/// * `p`: Oversampling parameter.
/// * `n_iter`: Number of power iteration steps.
/// * `sdist`: Distribution of the random test matrix.
/// * `rng`: The random number generator.
pub fn randomized_eigh<A, S, R>(
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

    let core = symmetrize(adjoint(&basis).dot(&a.dot(&basis)));
    lift_eigh(core, basis.view(), k)
}

/// Diagonalize a symmetrized core matrix and lift the eigenvectors through
/// the range basis, truncating to the leading `k` pairs.
///
/// Shared by the plain randomized eigendecomposition and by the Nyström
/// fallback path.
pub(crate) fn lift_eigh<A: ScalarType>(
    core: Array2<A>,
    basis: ArrayView2<A>,
    k: usize,
) -> Result<Eig<A>> {
    let (values, vectors) = core.eigh(UPLO::Lower)?;

    // The eigensolver returns ascending order; flip before truncating.
    let values = values.slice(s![..;-1]).slice(s![..k]).to_owned();
    let vectors = vectors.slice(s![.., ..;-1]).to_owned();

    let lifted = basis.dot(&vectors);
    let vectors = lifted.slice_move(s![.., ..k]);

    Ok(Eig { values, vectors })
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::helpers::RelDiff;
    use crate::RandomMatrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    macro_rules! randomized_eigh_reconstruction_tests {
        ($($name:ident: $scalar:ty, $sdist:expr, $tol:expr,)*) => {
            $(
            #[test]
            fn $name() {
                let mut rng = StdRng::seed_from_u64(42);
                let factor = <$scalar>::random_gaussian((100, 10), &mut rng);
                let mat = factor.dot(&adjoint(&factor));

                let eig = randomized_eigh(
                    &mat, 10, 5, 2, $sdist, &mut rng,
                ).unwrap();

                assert_eq!(eig.rank(), 10);
                assert_eq!(eig.vectors.dim(), (100, 10));
                assert!(<$scalar>::rel_diff_fro(eig.to_mat().view(), mat.view()) < $tol);
            }
            )*
        };
    }

    randomized_eigh_reconstruction_tests! {
        test_randomized_eigh_f32: f32, crate::SampleDistribution::Normal, 1E-3,
        test_randomized_eigh_f64: f64, crate::SampleDistribution::Normal, 1E-8,
        test_randomized_eigh_c32: ndarray_linalg::c32, crate::SampleDistribution::Normal, 1E-3,
        test_randomized_eigh_c64: ndarray_linalg::c64, crate::SampleDistribution::Normal, 1E-8,
        test_randomized_eigh_uniform_f64: f64, crate::SampleDistribution::Uniform, 1E-8,
        test_randomized_eigh_uniform_c64: ndarray_linalg::c64, crate::SampleDistribution::Uniform, 1E-8,
    }

    #[test]
    fn test_eigenvalues_are_descending() {
        let mut rng = StdRng::seed_from_u64(5);
        let factor = f64::random_gaussian((60, 20), &mut rng);
        let mat = factor.dot(&factor.t());

        let eig = randomized_eigh(
            &mat, 15, 10, 2, crate::SampleDistribution::Normal, &mut rng,
        )
        .unwrap();

        let values: Vec<f64> = eig.values.iter().copied().collect();
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_rank_is_clamped_to_matrix_dimension() {
        let mut rng = StdRng::seed_from_u64(11);
        let factor = f64::random_gaussian((50, 50), &mut rng);
        let mat = factor.dot(&factor.t());

        let eig = randomized_eigh(
            &mat, 1000, 0, 1, crate::SampleDistribution::Normal, &mut rng,
        )
        .unwrap();

        assert_eq!(eig.rank(), 50);
        assert_eq!(eig.vectors.dim(), (50, 50));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let mut rng = StdRng::seed_from_u64(123);
        let factor = f64::random_gaussian((40, 8), &mut rng);
        let mat = factor.dot(&factor.t());

        let mut rng1 = StdRng::seed_from_u64(7);
        let first = randomized_eigh(
            &mat, 8, 4, 2, crate::SampleDistribution::Normal, &mut rng1,
        )
        .unwrap();

        let mut rng2 = StdRng::seed_from_u64(7);
        let second = randomized_eigh(
            &mat, 8, 4, 2, crate::SampleDistribution::Normal, &mut rng2,
        )
        .unwrap();

        assert_eq!(first.values, second.values);
        assert_eq!(first.vectors, second.vectors);
    }
}
