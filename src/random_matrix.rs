//! Generation of random test matrices for the four supported scalar types.

use crate::SampleDistribution;
use ndarray::Array2;
use ndarray_linalg::{JobSvd, Lapack, SVDDCInto, Scalar};
use num::complex::Complex;
use num::traits::cast::cast;
use num::Float;
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal};

pub trait RandomMatrix
where
    Self: Scalar + Lapack,
{
    /// Generate a random Gaussian matrix.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Self>;

    /// Generate a random matrix with elements uniformly distributed on $[-1, 1]$.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_uniform<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Self>;

    /// Generate a random test matrix from the given sampling distribution.
    fn random_sample<R: Rng>(
        dimension: (usize, usize),
        sdist: SampleDistribution,
        rng: &mut R,
    ) -> Array2<Self> {
        match sdist {
            SampleDistribution::Normal => Self::random_gaussian(dimension, rng),
            SampleDistribution::Uniform => Self::random_uniform(dimension, rng),
        }
    }

    /// Generate a random matrix with orthogonal rows or columns.
    ///
    /// This function creates a normally distributed (m, n) random matrix,
    /// orthogonalizes it and returns the resulting orthogonal matrix.
    ///
    /// If m > n then the returned matrix has orthogonal columns. If n > m
    /// the returned matrix has orthogonalized rows.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_orthogonal_matrix<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Self> {
        let mut m = dimension.0;
        let mut n = dimension.1;

        // Always ensure that we factorize a long and skinny matrix
        if dimension.1 > dimension.0 {
            std::mem::swap(&mut m, &mut n);
        }

        let mat = Self::random_gaussian((m, n), rng);

        let (u, _, _) = mat
            .svddc_into(JobSvd::Some)
            .expect("`random_orthogonal_matrix`: SVD computation failed.");

        // If we originally had more columns than rows, conjugate transpose again.
        if dimension.1 > dimension.0 {
            u.unwrap().t().map(|item| item.conj())
        } else {
            u.unwrap()
        }
    }

    /// Generate a random approximate low-rank matrix.
    ///
    /// This function generates a random approximate low-rank matrix
    /// with singular values logarithmically distributed between
    /// `sigma_max` and `sigma_min`.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `sigma_max`: Maximum singular value.
    /// * `sigma_min`: Minimum singular value.
    /// * `rng`: The random number generator to use.
    fn random_approximate_low_rank_matrix<R: Rng>(
        dimension: (usize, usize),
        sigma_max: f64,
        sigma_min: f64,
        rng: &mut R,
    ) -> Array2<Self> {
        use ndarray::Array;

        assert!(
            sigma_min < sigma_max,
            "`sigma_min` must be smaller than `sigma_max`"
        );
        assert!(sigma_min > 0.0, "`sigma_min` must be positive.");

        let min_dim = std::cmp::min(dimension.0, dimension.1);

        let u = Self::random_orthogonal_matrix((dimension.0, min_dim), rng);
        let vt = Self::random_orthogonal_matrix((min_dim, dimension.1), rng);
        let singvals = Array::geomspace(sigma_min, sigma_max, min_dim)
            .unwrap()
            .map(|&item| cast::<f64, Self>(item).unwrap());
        let sigma = Array2::from_diag(&singvals);
        u.dot(&sigma.dot(&vt))
    }
}

impl RandomMatrix for f64 {
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<f64> {
        let normal = Normal::new(0.0, 1.0).unwrap();
        random_real::<f64, _, R>(dimension, normal, rng)
    }

    fn random_uniform<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<f64> {
        random_real::<f64, _, R>(dimension, Uniform::new_inclusive(-1.0, 1.0), rng)
    }
}

impl RandomMatrix for f32 {
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<f32> {
        let normal = Normal::new(0.0, 1.0).unwrap();
        random_real::<f32, _, R>(dimension, normal, rng)
    }

    fn random_uniform<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<f32> {
        random_real::<f32, _, R>(dimension, Uniform::new_inclusive(-1.0, 1.0), rng)
    }
}

impl RandomMatrix for Complex<f64> {
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Complex<f64>> {
        let normal = Normal::new(0.0, 1.0).unwrap();
        random_complex::<f64, _, R>(dimension, normal, rng)
    }

    fn random_uniform<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Complex<f64>> {
        random_complex::<f64, _, R>(dimension, Uniform::new_inclusive(-1.0, 1.0), rng)
    }
}

impl RandomMatrix for Complex<f32> {
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Complex<f32>> {
        let normal = Normal::new(0.0, 1.0).unwrap();
        random_complex::<f32, _, R>(dimension, normal, rng)
    }

    fn random_uniform<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Complex<f32>> {
        random_complex::<f32, _, R>(dimension, Uniform::new_inclusive(-1.0, 1.0), rng)
    }
}

fn random_real<T: Float, D: Distribution<f64>, R: Rng>(
    dimension: (usize, usize),
    distribution: D,
    rng: &mut R,
) -> Array2<T> {
    let mut mat = Array2::<T>::zeros(dimension);
    mat.map_inplace(|item| *item = cast::<f64, T>(distribution.sample(rng)).unwrap());
    mat
}

fn random_complex<T: Float, D: Distribution<f64>, R: Rng>(
    dimension: (usize, usize),
    distribution: D,
    rng: &mut R,
) -> Array2<Complex<T>> {
    let mut mat = Array2::<Complex<T>>::zeros(dimension);
    mat.map_inplace(|item| {
        let re = cast::<f64, T>(distribution.sample(rng)).unwrap();
        let im = cast::<f64, T>(distribution.sample(rng)).unwrap();
        *item = Complex::new(re, im);
    });
    mat
}
