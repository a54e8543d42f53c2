//! Small numerical helpers shared by the decomposition routines.

use ndarray::{Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix2};
use ndarray_linalg::Norm;
use ndarray_linalg::OperationNorm;
use ndarray_linalg::{c32, c64, Scalar};

/// Return the conjugate transpose $M^H$ of a matrix.
///
/// For the real scalar types [`Scalar::conj`] is the identity, so this is the
/// plain transpose. The element type of the input selects the correct adjoint
/// once per call; no further branching on realness is needed anywhere else.
pub fn adjoint<A, S>(mat: &ArrayBase<S, Ix2>) -> Array2<A>
where
    A: Scalar,
    S: Data<Elem = A>,
{
    mat.t().map(|item| item.conj())
}

/// Replace a nominally Hermitian matrix by $(M + M^H)/2$.
///
/// Projection and round-off leave the core matrices slightly asymmetric;
/// the Hermitian eigensolver and the Cholesky factorization both require the
/// symmetrized form.
pub fn symmetrize<A: Scalar>(mat: Array2<A>) -> Array2<A> {
    let half = A::from_real(A::real(0.5));
    let adj = adjoint(&mat);
    (mat + &adj).mapv(|item| item * half)
}

pub trait RelDiff {
    type A: Scalar;

    /// Return the relative Frobenius norm difference of `first` and `second`.
    fn rel_diff_fro(
        first: ArrayView2<Self::A>,
        second: ArrayView2<Self::A>,
    ) -> <<Self as RelDiff>::A as Scalar>::Real;

    /// Return the relative l2 vector norm difference of `first` and `second`.
    fn rel_diff_l2(
        first: ArrayView1<Self::A>,
        second: ArrayView1<Self::A>,
    ) -> <<Self as RelDiff>::A as Scalar>::Real;
}

macro_rules! rel_diff_impl {
    ($scalar:ty) => {
        impl RelDiff for $scalar {
            type A = $scalar;
            fn rel_diff_fro(
                first: ArrayView2<Self::A>,
                second: ArrayView2<Self::A>,
            ) -> <<Self as RelDiff>::A as Scalar>::Real {
                let diff = first.to_owned() - &second;
                diff.opnorm_fro().unwrap() / second.opnorm_fro().unwrap()
            }

            fn rel_diff_l2(
                first: ArrayView1<Self::A>,
                second: ArrayView1<Self::A>,
            ) -> <<Self as RelDiff>::A as Scalar>::Real {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }
        }
    };
}

rel_diff_impl!(f32);
rel_diff_impl!(f64);
rel_diff_impl!(c32);
rel_diff_impl!(c64);
