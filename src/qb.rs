//! Randomized QB decomposition of general rectangular matrices.
//!
//! The QB decomposition $A \approx QB$ with column-orthonormal $Q$ and small
//! $B = Q^H A$ is the rawest product of the range finder: no symmetry is
//! assumed and no spectral structure is imposed on $B$. Higher level
//! factorizations (randomized SVD, LU, interpolative decompositions) are
//! derived from it by their own post-processing.

use crate::helpers::adjoint;
use crate::random_sampling::sample_range;
use crate::types::{RandEigError, Result, ScalarType};
use crate::SampleDistribution;
use ndarray::{Array2, ArrayBase, Data, Ix2};
use ndarray_linalg::Scalar;
use num::Float;
use rand::Rng;

/// Container for a QB decomposition.
pub struct QB<A: Scalar> {
    /// Orthonormal basis matrix, shape `(m, k + p)`
    pub q: Array2<A>,
    /// Projected matrix, shape `(k + p, n)`
    pub b: Array2<A>,
}

impl<A: Scalar> QB<A> {
    /// Reconstruct the low-rank approximation $QB$.
    pub fn to_mat(&self) -> Array2<A> {
        self.q.dot(&self.b)
    }
}

/// Randomized QB decomposition.
///
/// Factorizes the `(m, n)` input as $A \approx QB$ with a column-orthonormal
/// $Q$ of shape `(m, k + p)` and $B = Q^H A$ of shape `(k + p, n)`. Typical
/// parameters are `p = 10` and `n_iter = 1` with a normally distributed test
/// matrix; for a full-width factorization choose `k = min(m, n)`.
///
/// Fails with [`RandEigError::NonFinite`] if the input contains NaN or
/// infinite entries and with [`RandEigError::InvalidRank`] unless
/// `1 <= k <= min(m, n)`.
///
/// # Arguments
///
/// * `a`: The input matrix.
/// * `k`: Target rank.
/// * `p`: Oversampling parameter.
/// * `n_iter`: Number of power iteration steps.
/// * `sdist`: Distribution of the random test matrix.
/// * `rng`: The random number generator.
pub fn randomized_qb<A, S, R>(
    a: &ArrayBase<S, Ix2>,
    k: usize,
    p: usize,
    n_iter: usize,
    sdist: SampleDistribution,
    rng: &mut R,
) -> Result<QB<A>>
where
    A: ScalarType,
    S: Data<Elem = A>,
    R: Rng,
{
    let (m, n) = a.dim();

    if a.iter()
        .any(|item| !item.re().is_finite() || !item.im().is_finite())
    {
        return Err(RandEigError::NonFinite);
    }

    if k < 1 || k > m.min(n) {
        return Err(RandEigError::InvalidRank {
            rank: k,
            dim: m.min(n),
        });
    }

    let q = sample_range(a, k + p, n_iter, sdist, rng)?;
    let b = adjoint(&q).dot(a);

    Ok(QB { q, b })
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::helpers::RelDiff;
    use crate::RandomMatrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    macro_rules! qb_reconstruction_tests {
        ($($name:ident: $scalar:ty, $dim:expr, $tol:expr,)*) => {
            $(
            #[test]
            fn $name() {
                let m = $dim.0;
                let n = $dim.1;

                let mut rng = StdRng::seed_from_u64(61);
                let mat = <$scalar>::random_approximate_low_rank_matrix(
                    (m, n), 1.0, 1E-10, &mut rng,
                );

                let qb = randomized_qb(
                    &mat, 30, 10, 1, crate::SampleDistribution::Normal, &mut rng,
                ).unwrap();

                assert_eq!(qb.q.dim(), (m, 40));
                assert_eq!(qb.b.dim(), (40, n));
                assert!(<$scalar>::rel_diff_fro(qb.to_mat().view(), mat.view()) < $tol);
            }
            )*
        };
    }

    qb_reconstruction_tests! {
        test_qb_reconstruction_f32_thin: f32, (100, 50), 1E-4,
        test_qb_reconstruction_c32_thin: ndarray_linalg::c32, (100, 50), 1E-4,
        test_qb_reconstruction_f64_thin: f64, (100, 50), 1E-4,
        test_qb_reconstruction_c64_thin: ndarray_linalg::c64, (100, 50), 1E-4,
        test_qb_reconstruction_f32_thick: f32, (50, 100), 1E-4,
        test_qb_reconstruction_c32_thick: ndarray_linalg::c32, (50, 100), 1E-4,
        test_qb_reconstruction_f64_thick: f64, (50, 100), 1E-4,
        test_qb_reconstruction_c64_thick: ndarray_linalg::c64, (50, 100), 1E-4,
    }

    #[test]
    fn test_qb_basis_is_orthonormal() {
        let mut rng = StdRng::seed_from_u64(67);
        let mat = f64::random_approximate_low_rank_matrix((80, 60), 1.0, 1E-8, &mut rng);

        let qb = randomized_qb(
            &mat, 20, 10, 1, crate::SampleDistribution::Normal, &mut rng,
        )
        .unwrap();

        let qtq = adjoint(&qb.q).dot(&qb.q);
        for ((i, j), &val) in qtq.indexed_iter() {
            if i == j {
                assert!((val - 1.0).abs() < 1E-10);
            } else {
                assert!(val.abs() < 1E-10);
            }
        }
    }

    #[test]
    fn test_qb_with_uniform_distribution() {
        let mut rng = StdRng::seed_from_u64(71);
        let mat = f64::random_approximate_low_rank_matrix((60, 40), 1.0, 1E-10, &mut rng);

        let qb = randomized_qb(
            &mat, 20, 10, 1, crate::SampleDistribution::Uniform, &mut rng,
        )
        .unwrap();

        assert!(f64::rel_diff_fro(qb.to_mat().view(), mat.view()) < 1E-4);
    }

    #[test]
    fn test_qb_rejects_zero_rank() {
        let mut rng = StdRng::seed_from_u64(73);
        let mat = f64::random_gaussian((20, 20), &mut rng);

        let result = randomized_qb(
            &mat, 0, 10, 1, crate::SampleDistribution::Normal, &mut rng,
        );

        assert!(matches!(
            result,
            Err(RandEigError::InvalidRank { rank: 0, dim: 20 })
        ));
    }

    #[test]
    fn test_qb_rejects_rank_above_matrix_dimension() {
        let mut rng = StdRng::seed_from_u64(79);
        let mat = f64::random_gaussian((30, 20), &mut rng);

        let result = randomized_qb(
            &mat, 21, 0, 1, crate::SampleDistribution::Normal, &mut rng,
        );

        assert!(matches!(
            result,
            Err(RandEigError::InvalidRank { rank: 21, dim: 20 })
        ));
    }

    #[test]
    fn test_qb_rejects_non_finite_input() {
        let mut rng = StdRng::seed_from_u64(83);
        let mut mat = f64::random_gaussian((20, 20), &mut rng);
        mat[[3, 4]] = f64::NAN;

        let result = randomized_qb(
            &mat, 5, 5, 1, crate::SampleDistribution::Normal, &mut rng,
        );

        assert!(matches!(result, Err(RandEigError::NonFinite)));
    }
}
