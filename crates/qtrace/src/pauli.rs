//! Conversion between the standard and the Hilbert–Schmidt representation
//! of a two-qubit state.
//!
//! Any two-qubit density matrix can be written as
//! `ρ = ¼ Σ_ij T_ij σ_i ⊗ σ_j` with `σ_0 = I` and `σ_1..3` the Pauli
//! matrices. The real `4x4` matrix `T` is the Hilbert–Schmidt (or
//! correlation) representation of `ρ`.

use faer::{Mat, MatRef};
use log::debug;
use num_traits::{One, Zero};

use qtrace_core::accel::{kron, kron_add};
use qtrace_core::{ComplexScalar, QtraceError, RealScalar, Result, TraceOptions};

const STD_TO_HS: &str = "std_to_hs";
const HS_TO_STD: &str = "hs_to_std";

/// The single-qubit operator basis `[I, X, Y, Z]`.
///
/// Build one table and share it by reference (or behind an `Arc`) between
/// every conversion that needs it; it is never mutated after construction.
///
/// # Examples
///
/// ```
/// use qtrace::PauliBasis;
///
/// let basis = PauliBasis::<f64>::new();
/// let z = basis.get(3);
/// assert_eq!(z[(1, 1)].re, -1.0);
/// ```
#[derive(Clone, Debug)]
pub struct PauliBasis<R: RealScalar> {
    ops: [Mat<R::C>; 4],
}

impl<R: RealScalar> PauliBasis<R> {
    /// Construct the operator table.
    pub fn new() -> Self {
        let zero = R::zero();
        let one = R::one();
        let entries = [
            [(one, zero), (zero, zero), (zero, zero), (one, zero)],
            [(zero, zero), (one, zero), (one, zero), (zero, zero)],
            [(zero, zero), (zero, -one), (zero, one), (zero, zero)],
            [(one, zero), (zero, zero), (zero, zero), (-one, zero)],
        ];
        let ops = entries.map(|op| {
            Mat::from_fn(2, 2, |i, j| {
                let (re, im) = op[2 * i + j];
                R::C::from_parts(re, im)
            })
        });
        Self { ops }
    }

    /// The `index`-th operator: 0 is the identity, 1..=3 are X, Y and Z.
    ///
    /// # Panics
    ///
    /// If `index > 3`.
    #[inline(always)]
    #[track_caller]
    pub fn get(&self, index: usize) -> MatRef<'_, R::C> {
        self.ops[index].as_ref()
    }

    /// The two-qubit product operator `σ_i ⊗ σ_j`.
    pub fn product(&self, i: usize, j: usize) -> Mat<R::C> {
        let mut dst = Mat::from_fn(4, 4, |_, _| R::C::zero());
        kron(self.get(i), self.get(j), dst.as_mut());
        dst
    }
}

impl<R: RealScalar> Default for PauliBasis<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_two_qubit<T>(m: MatRef<'_, T>, op: &'static str) -> Result<()> {
    if m.nrows() == 0 || m.ncols() == 0 {
        return Err(QtraceError::ZeroSize { op });
    }
    if m.nrows() != m.ncols() {
        return Err(QtraceError::MatrixNotSquare {
            op,
            nrows: m.nrows(),
            ncols: m.ncols(),
        });
    }
    if m.nrows() != 4 {
        return Err(QtraceError::NotQubitSubsystem {
            op,
            nrows: m.nrows(),
            ncols: m.ncols(),
        });
    }
    Ok(())
}

/// Hilbert–Schmidt representation `T_ij = Re tr((σ_i ⊗ σ_j) ρ)` of a
/// two-qubit state.
///
/// Preconditions are checked per [`TraceOptions::default`]; see
/// [`std_to_hs_with`] to choose.
///
/// # Errors
///
/// * [`QtraceError::ZeroSize`] if `rho` is empty.
/// * [`QtraceError::MatrixNotSquare`] if `rho` is not square.
/// * [`QtraceError::NotQubitSubsystem`] if `rho` is not `4x4`.
///
/// # Examples
///
/// ```
/// use faer::Mat;
/// use qtrace::{std_to_hs, PauliBasis};
/// use qtrace_core::c64;
///
/// let basis = PauliBasis::<f64>::new();
/// let mixed = Mat::from_fn(4, 4, |i, j| if i == j { c64::new(0.25, 0.0) } else { c64::new(0.0, 0.0) });
/// let t = std_to_hs(&basis, mixed.as_ref()).unwrap();
/// assert!((t[(0, 0)] - 1.0).abs() < 1e-12);
/// assert!(t[(1, 1)].abs() < 1e-12);
/// ```
pub fn std_to_hs<R: RealScalar>(basis: &PauliBasis<R>, rho: MatRef<'_, R::C>) -> Result<Mat<R>> {
    std_to_hs_with(basis, rho, &TraceOptions::default())
}

/// [`std_to_hs`] with explicit [`TraceOptions`]; only `validate` applies.
///
/// # Panics
///
/// If validation is off and `rho` is smaller than `4x4`.
pub fn std_to_hs_with<R: RealScalar>(
    basis: &PauliBasis<R>,
    rho: MatRef<'_, R::C>,
    options: &TraceOptions,
) -> Result<Mat<R>> {
    if options.validates() {
        check_two_qubit(rho, STD_TO_HS).inspect_err(|e| debug!("{e}"))?;
    }

    let mut ret = Mat::from_fn(4, 4, |_, _| R::zero());
    for j in 0..4 {
        for i in 0..4 {
            let sigma = basis.product(i, j);
            // tr(σ ρ) without forming the product.
            let mut trace = R::C::zero();
            for a in 0..4 {
                for b in 0..4 {
                    trace += sigma[(a, b)] * rho[(b, a)];
                }
            }
            ret[(i, j)] = trace.real();
        }
    }
    Ok(ret)
}

/// Standard representation `ρ = ¼ Σ_ij T_ij σ_i ⊗ σ_j` of a two-qubit
/// state given in the Hilbert–Schmidt representation.
///
/// Preconditions are checked per [`TraceOptions::default`]; see
/// [`hs_to_std_with`] to choose.
///
/// # Errors
///
/// * [`QtraceError::ZeroSize`] if `t` is empty.
/// * [`QtraceError::MatrixNotSquare`] if `t` is not square.
/// * [`QtraceError::NotQubitSubsystem`] if `t` is not `4x4`.
pub fn hs_to_std<R: RealScalar>(basis: &PauliBasis<R>, t: MatRef<'_, R>) -> Result<Mat<R::C>> {
    hs_to_std_with(basis, t, &TraceOptions::default())
}

/// [`hs_to_std`] with explicit [`TraceOptions`]; only `validate` applies.
///
/// # Panics
///
/// If validation is off and `t` is smaller than `4x4`.
pub fn hs_to_std_with<R: RealScalar>(
    basis: &PauliBasis<R>,
    t: MatRef<'_, R>,
    options: &TraceOptions,
) -> Result<Mat<R::C>> {
    if options.validates() {
        check_two_qubit(t, HS_TO_STD).inspect_err(|e| debug!("{e}"))?;
    }

    let two = R::one() + R::one();
    let quarter = (two * two).recip();

    let mut ret = Mat::from_fn(4, 4, |_, _| R::C::zero());
    for j in 0..4 {
        for i in 0..4 {
            let coef = R::C::from_real(t[(i, j)] * quarter);
            let sigma_i = basis.get(i);
            let scaled = Mat::from_fn(2, 2, |a, b| coef * sigma_i[(a, b)]);
            kron_add(scaled.as_ref(), basis.get(j), ret.as_mut());
        }
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtrace_core::{c64, Ket};

    #[test]
    fn test_basis_is_hermitian_and_involutory() {
        let basis = PauliBasis::<f64>::new();
        for k in 0..4 {
            let s = basis.get(k);
            for i in 0..2 {
                for j in 0..2 {
                    assert_eq!(s[(i, j)], s[(j, i)].conj());
                    let sq: c64 = (0..2).map(|m| s[(i, m)] * s[(m, j)]).sum();
                    let id = if i == j { 1.0 } else { 0.0 };
                    assert_eq!(sq, c64::new(id, 0.0));
                }
            }
        }
    }

    #[test]
    fn test_maximally_mixed() {
        let basis = PauliBasis::<f64>::new();
        let rho = Mat::from_fn(4, 4, |i, j| {
            if i == j { c64::new(0.25, 0.0) } else { c64::new(0.0, 0.0) }
        });
        let t = std_to_hs(&basis, rho.as_ref()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == 0 && j == 0 { 1.0 } else { 0.0 };
                assert!(t[(i, j)].is_close(expected));
            }
        }
    }

    #[test]
    fn test_singlet_correlations() {
        // (|01⟩ - |10⟩)/√2 has T = diag(1, -1, -1, -1).
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let zero = c64::new(0.0, 0.0);
        let psi: Ket<f64> = Ket::new([2, 2], vec![zero, c64::new(s, 0.0), c64::new(-s, 0.0), zero]);
        let basis = PauliBasis::<f64>::new();
        let t = std_to_hs(&basis, psi.density_matrix().as_ref()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = match (i, j) {
                    (0, 0) => 1.0,
                    (a, b) if a == b => -1.0,
                    _ => 0.0,
                };
                assert!(t[(i, j)].is_close(expected), "T[{i}, {j}] = {}", t[(i, j)]);
            }
        }
    }

    #[test]
    fn test_round_trip() {
        let basis = PauliBasis::<f64>::new();
        let psi: Ket<f64> = Ket::random([2, 2]);
        let rho = psi.density_matrix();
        let t = std_to_hs(&basis, rho.as_ref()).unwrap();
        let back = hs_to_std(&basis, t.as_ref()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert!((back[(i, j)] - rho[(i, j)]).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_shape_errors() {
        let basis = PauliBasis::<f64>::new();
        let checked = TraceOptions::new().validate(true);
        let empty = Mat::<c64>::zeros(0, 0);
        assert_eq!(
            std_to_hs_with(&basis, empty.as_ref(), &checked),
            Err(QtraceError::ZeroSize { op: "std_to_hs" })
        );
        let wide = Mat::<f64>::zeros(4, 2);
        assert_eq!(
            hs_to_std_with(&basis, wide.as_ref(), &checked),
            Err(QtraceError::MatrixNotSquare { op: "hs_to_std", nrows: 4, ncols: 2 })
        );
        let qutrit = Mat::<c64>::zeros(3, 3);
        assert_eq!(
            std_to_hs_with(&basis, qutrit.as_ref(), &checked),
            Err(QtraceError::NotQubitSubsystem { op: "std_to_hs", nrows: 3, ncols: 3 })
        );
    }

    #[test]
    fn test_unchecked_valid_input() {
        let basis = PauliBasis::<f64>::new();
        let unchecked = TraceOptions::new().validate(false);
        let rho = Ket::<f64>::random([2, 2]).density_matrix();

        let t = std_to_hs_with(&basis, rho.as_ref(), &unchecked).unwrap();
        assert_eq!(t, std_to_hs_with(&basis, rho.as_ref(), &TraceOptions::new()).unwrap());

        let back = hs_to_std_with(&basis, t.as_ref(), &unchecked).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert!((back[(i, j)] - rho[(i, j)]).norm() < 1e-12);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_unchecked_undersized_input_panics() {
        let basis = PauliBasis::<f64>::new();
        let unchecked = TraceOptions::new().validate(false);
        let small = Mat::<c64>::zeros(2, 2);
        let _ = std_to_hs_with(&basis, small.as_ref(), &unchecked);
    }
}
