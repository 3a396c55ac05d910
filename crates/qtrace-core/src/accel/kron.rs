//! Functions to perform the Kronecker product and fused Kronecker-add operations.

use faer::MatMut;
use faer::MatRef;

use crate::Entry;

/// The inner kernel for the Kronecker product. Each element of `dst` is
/// looked up exactly once; `ACCUMULATE` selects between `=` and `+=`.
#[inline(always)]
fn kron_kernel<C: Entry, const ACCUMULATE: bool>(
    mut dst: MatMut<'_, C>,
    lhs: MatRef<'_, C>,
    rhs: MatRef<'_, C>,
) {
    let rhs_rows = rhs.nrows();
    let rhs_cols = rhs.ncols();

    for lhs_j in 0..lhs.ncols() {
        for lhs_i in 0..lhs.nrows() {
            let lhs_val = lhs[(lhs_i, lhs_j)];

            for rhs_j in 0..rhs_cols {
                for rhs_i in 0..rhs_rows {
                    let prod = lhs_val * rhs[(rhs_i, rhs_j)];
                    let dst_val = &mut dst[(lhs_i * rhs_rows + rhs_i, lhs_j * rhs_cols + rhs_j)];
                    if ACCUMULATE {
                        *dst_val += prod;
                    } else {
                        *dst_val = prod;
                    }
                }
            }
        }
    }
}

#[track_caller]
fn assert_kron_shape<C>(lhs: MatRef<'_, C>, rhs: MatRef<'_, C>, dst: &MatMut<'_, C>) {
    // Also guards against overflow in the expected dimensions.
    assert!(Some(dst.nrows()) == lhs.nrows().checked_mul(rhs.nrows()));
    assert!(Some(dst.ncols()) == lhs.ncols().checked_mul(rhs.ncols()));
}

/// Kronecker product of two matrices.
///
/// The Kronecker product of two matrices `A` and `B` is a block matrix
/// `C` with the following structure:
///
/// ```text
/// C = [ a00 * B, a01 * B, ..., a0n * B ]
///     [ a10 * B, a11 * B, ..., a1n * B ]
///     [ ...    , ...    , ..., ...     ]
///     [ am0 * B, am1 * B, ..., amn * B ]
/// ```
/// where `a_ij` is the element at position `(i, j)` of `A`.
///
/// # Panics
///
/// * If `dst` does not have the correct dimensions. The dimensions
///   of `dst` must be `nrows(A) * nrows(B)` by `ncols(A) * ncols(B)`.
///
/// # Example
/// ```
/// use faer::{mat, Mat};
/// use qtrace_core::accel::kron;
///
/// let a = mat![
///     [1.0, 2.0],
///     [3.0, 4.0],
/// ];
/// let b = mat![
///     [0.0, 5.0],
///     [6.0, 7.0],
/// ];
/// let c = mat![
///     [0.0 , 5.0 , 0.0 , 10.0],
///     [6.0 , 7.0 , 12.0, 14.0],
///     [0.0 , 15.0, 0.0 , 20.0],
///     [18.0, 21.0, 24.0, 28.0],
/// ];
///
/// let mut dst = Mat::<f64>::zeros(4, 4);
/// kron(a.as_ref(), b.as_ref(), dst.as_mut());
/// assert_eq!(dst, c);
/// ```
#[track_caller]
pub fn kron<C: Entry>(lhs: MatRef<'_, C>, rhs: MatRef<'_, C>, dst: MatMut<'_, C>) {
    assert_kron_shape(lhs, rhs, &dst);
    kron_kernel::<C, false>(dst, lhs, rhs);
}

/// Computes the Kronecker product of two matrices and adds the result to a destination matrix.
///
/// For `A` ∈ M(R_a, C_a), `B` ∈ M(R_b, C_b), `C` ∈ M(R_a * R_b, C_a * C_b), this function mutates `C`
/// such C_{i * R_b + k , j * C_b + l} -> C_{i * R_b + k , j * C_b + l} + A_{i, j} * B_{k, l}.
///
/// # Panics
///
/// * If `dst.nrows()` doesn't match `lhs.nrows()` times `rhs.nrows()`
/// * If `dst.ncols()` doesn't match `lhs.ncols()` times `rhs.ncols()`
/// * If an overflow occurs when calculating the expected dimensions.
#[track_caller]
pub fn kron_add<C: Entry>(lhs: MatRef<'_, C>, rhs: MatRef<'_, C>, dst: MatMut<'_, C>) {
    assert_kron_shape(lhs, rhs, &dst);
    kron_kernel::<C, true>(dst, lhs, rhs);
}

/// Allocating Kronecker product of two matrices.
///
/// # Example
/// ```
/// use faer::mat;
/// use qtrace_core::accel::kron_new;
///
/// let id = mat![[1.0, 0.0], [0.0, 1.0]];
/// let x = mat![[0.0, 1.0], [1.0, 0.0]];
/// let ix = kron_new(id.as_ref(), x.as_ref());
/// assert_eq!(ix[(0, 1)], 1.0);
/// assert_eq!(ix[(2, 3)], 1.0);
/// assert_eq!(ix[(0, 3)], 0.0);
/// ```
pub fn kron_new<C: Entry>(lhs: MatRef<'_, C>, rhs: MatRef<'_, C>) -> faer::Mat<C> {
    let mut dst = faer::Mat::from_fn(lhs.nrows() * rhs.nrows(), lhs.ncols() * rhs.ncols(), |_, _| {
        C::zero()
    });
    kron_kernel::<C, false>(dst.as_mut(), lhs, rhs);
    dst
}
