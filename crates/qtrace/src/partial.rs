//! Partial trace entry points.

use faer::Mat;
use log::debug;

use qtrace_core::{Entry, QtraceError, Radices, Result, StateRef, TraceOptions};

use crate::odometer::accumulate;
use crate::resolve::{check_request, TraceLayout};

const PARTIAL_TRACE: &str = "partial_trace";
const PARTIAL_TRACE_UNIFORM: &str = "partial_trace_uniform";

/// Trace out subsystems of a state on a mixed-dimension composite system.
///
/// `dims` lists the dimension of every subsystem in tensor-product order,
/// the first being the most significant. `trace_out` holds the 1-based
/// indices of the subsystems to sum over, in any order. The result is the
/// reduced density matrix on the remaining subsystems, kept in their
/// original order.
///
/// A pure state may be given as a column; its entries stand in for the
/// density matrix `|ψ⟩⟨ψ|` without forming it. Tracing out nothing returns
/// a density matrix unchanged (and `|ψ⟩⟨ψ|` for a pure state); tracing out
/// everything returns the `1x1` total trace.
///
/// Preconditions are checked per [`TraceOptions::default`]; see
/// [`partial_trace_with`] to choose.
///
/// # Errors
///
/// See [`check_request`].
///
/// # Examples
///
/// ```
/// use faer::Col;
/// use qtrace::partial_trace;
/// use qtrace_core::c64;
///
/// // (|00⟩ + |11⟩) / √2
/// let amp = c64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
/// let bell = Col::from_fn(4, |i| if i == 0 || i == 3 { amp } else { c64::new(0.0, 0.0) });
///
/// let rho = partial_trace(&bell, &[2], &[2, 2]).unwrap();
/// assert!((rho[(0, 0)].re - 0.5).abs() < 1e-12);
/// assert!((rho[(1, 1)].re - 0.5).abs() < 1e-12);
/// assert!(rho[(0, 1)].norm() < 1e-12);
/// ```
pub fn partial_trace<'a, T, S>(state: S, trace_out: &[usize], dims: &[usize]) -> Result<Mat<T>>
where
    T: Entry,
    S: Into<StateRef<'a, T>>,
{
    trace_impl(state.into(), trace_out, dims, &TraceOptions::default(), PARTIAL_TRACE)
}

/// [`partial_trace`] with explicit [`TraceOptions`].
///
/// # Examples
///
/// ```
/// use faer::Mat;
/// use qtrace::partial_trace_with;
/// use qtrace_core::TraceOptions;
///
/// let rho = Mat::<f64>::identity(6, 6);
/// let opts = TraceOptions::default().validate(false);
/// let reduced = partial_trace_with(&rho, &[1], &[2, 3], &opts).unwrap();
/// assert_eq!(reduced, Mat::from_fn(3, 3, |i, j| if i == j { 2.0 } else { 0.0 }));
/// ```
pub fn partial_trace_with<'a, T, S>(
    state: S,
    trace_out: &[usize],
    dims: &[usize],
    options: &TraceOptions,
) -> Result<Mat<T>>
where
    T: Entry,
    S: Into<StateRef<'a, T>>,
{
    trace_impl(state.into(), trace_out, dims, options, PARTIAL_TRACE)
}

/// Trace out subsystems of a state made of `n` equal subsystems of dimension `dim`.
///
/// The subsystem count is inferred as `round(ln(rows) / ln(dim))`. The
/// inferred system is not compared against the state here; a state whose
/// size is not a power of `dim` fails the general check with
/// [`QtraceError::DimsMismatchMatrix`].
///
/// # Errors
///
/// [`QtraceError::InvalidDims`] if `dim` is zero or one, regardless of
/// whether validation is enabled, otherwise as [`partial_trace`].
///
/// # Examples
///
/// ```
/// use faer::Mat;
/// use qtrace::partial_trace_uniform;
///
/// let rho = Mat::<f64>::identity(9, 9);
/// let reduced = partial_trace_uniform(&rho, &[2], 3).unwrap();
/// assert_eq!(reduced.nrows(), 3);
/// ```
pub fn partial_trace_uniform<'a, T, S>(state: S, trace_out: &[usize], dim: usize) -> Result<Mat<T>>
where
    T: Entry,
    S: Into<StateRef<'a, T>>,
{
    uniform_impl(state.into(), trace_out, dim, &TraceOptions::default())
}

/// [`partial_trace_uniform`] with explicit [`TraceOptions`].
pub fn partial_trace_uniform_with<'a, T, S>(
    state: S,
    trace_out: &[usize],
    dim: usize,
    options: &TraceOptions,
) -> Result<Mat<T>>
where
    T: Entry,
    S: Into<StateRef<'a, T>>,
{
    uniform_impl(state.into(), trace_out, dim, options)
}

/// [`partial_trace_uniform`] on a register of qubits.
pub fn partial_trace_qubits<'a, T, S>(state: S, trace_out: &[usize]) -> Result<Mat<T>>
where
    T: Entry,
    S: Into<StateRef<'a, T>>,
{
    uniform_impl(state.into(), trace_out, 2, &TraceOptions::default())
}

fn uniform_impl<T: Entry>(
    state: StateRef<'_, T>,
    trace_out: &[usize],
    dim: usize,
    options: &TraceOptions,
) -> Result<Mat<T>> {
    // ln(1) = 0, so a unit dimension cannot be inferred from the size either.
    if dim < 2 {
        let err = QtraceError::InvalidDims {
            op: PARTIAL_TRACE_UNIFORM,
            dims: vec![dim],
        };
        debug!("{err}");
        return Err(err);
    }

    // An empty state gives a count of zero; the general check reports it.
    let count = ((state.nrows() as f64).ln() / (dim as f64).ln()).round() as usize;
    let dims = Radices::uniform(dim, count);

    trace_impl(state, trace_out, &dims, options, PARTIAL_TRACE_UNIFORM)
}

fn trace_impl<T: Entry>(
    state: StateRef<'_, T>,
    trace_out: &[usize],
    dims: &[usize],
    options: &TraceOptions,
    op: &'static str,
) -> Result<Mat<T>> {
    if options.validates() {
        check_request(&state, trace_out, dims, op).inspect_err(|e| debug!("{e}"))?;
    }

    let layout = TraceLayout::new(dims, trace_out, options.collapses());

    let reduced = match state {
        StateRef::Density(rho) => accumulate(&layout, |i, j| rho[(i, j)]),
        StateRef::Pure(psi) => accumulate(&layout, |i, j| psi[i] * psi[j].conjugate()),
    };

    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::{Col, Mat};
    use qtrace_core::{c64, ComplexScalar, Ket, QuditSystem};

    fn assert_close(actual: &Mat<c64>, expected: &Mat<c64>) {
        assert_eq!((actual.nrows(), actual.ncols()), (expected.nrows(), expected.ncols()));
        for i in 0..actual.nrows() {
            for j in 0..actual.ncols() {
                assert!(
                    ComplexScalar::is_close(actual[(i, j)], expected[(i, j)]),
                    "mismatch at ({i}, {j}): {} vs {}",
                    actual[(i, j)],
                    expected[(i, j)]
                );
            }
        }
    }

    fn c(re: f64) -> c64 {
        c64::new(re, 0.0)
    }

    fn checked() -> TraceOptions {
        TraceOptions::new().validate(true)
    }

    #[test]
    fn test_bell_state_reduces_to_maximally_mixed() {
        let amp = c(std::f64::consts::FRAC_1_SQRT_2);
        let bell = Col::from_fn(4, |i| if i == 0 || i == 3 { amp } else { c(0.0) });

        let reduced = partial_trace(&bell, &[2], &[2, 2]).unwrap();
        let expected = Mat::from_fn(2, 2, |i, j| if i == j { c(0.5) } else { c(0.0) });
        assert_close(&reduced, &expected);
    }

    #[test]
    fn test_product_state_keeps_middle_qubit() {
        let psi: Ket<f64> = Ket::from_digits([2, 2, 2], &[0, 1, 0]);

        let reduced = partial_trace(&psi, &[1, 3], &[2, 2, 2]).unwrap();
        let expected = Mat::from_fn(2, 2, |i, j| if i == 1 && j == 1 { c(1.0) } else { c(0.0) });
        assert_close(&reduced, &expected);
    }

    #[test]
    fn test_empty_trace_out_is_identity() {
        let rho = Mat::from_fn(6, 6, |i, j| c64::new(i as f64, j as f64));
        let reduced = partial_trace(&rho, &[], &[3, 2]).unwrap();
        assert_close(&reduced, &rho);
    }

    #[test]
    fn test_empty_trace_out_of_pure_state_is_projector() {
        let psi: Ket<f64> = Ket::random([2, 3]);
        let reduced = partial_trace(&psi, &[], &[2, 3]).unwrap();
        assert_close(&reduced, &psi.density_matrix());
    }

    #[test]
    fn test_full_trace_is_total_trace() {
        let rho = Mat::from_fn(6, 6, |i, j| c64::new((i * 6 + j) as f64, 1.0));
        let reduced = partial_trace(&rho, &[2, 1], &[2, 3]).unwrap();
        let trace: c64 = (0..6).map(|i| rho[(i, i)]).sum();
        assert_close(&reduced, &Mat::from_fn(1, 1, |_, _| trace));
    }

    #[test]
    fn test_unit_dimension_is_noop() {
        let rho = Mat::from_fn(3, 3, |i, j| c64::new(i as f64, j as f64));
        let reduced = partial_trace(&rho, &[2], &[3, 1]).unwrap();
        assert_close(&reduced, &rho);
    }

    #[test]
    fn test_real_entries() {
        let rho = Mat::<f64>::identity(8, 8);
        let reduced = partial_trace(&rho, &[1, 3], &[2, 2, 2]).unwrap();
        assert_eq!(reduced, Mat::from_fn(2, 2, |i, j| if i == j { 4.0 } else { 0.0 }));
    }

    #[test]
    fn test_order_invariance() {
        let psi: Ket<f64> = Ket::random([2, 3, 2]);
        let a = partial_trace(&psi, &[3, 1], &[2, 3, 2]).unwrap();
        let b = partial_trace(&psi, &[1, 3], &[2, 3, 2]).unwrap();
        assert_close(&a, &b);
    }

    #[test]
    fn test_dims_mismatch() {
        let psi = Col::<c64>::zeros(7);
        assert_eq!(
            partial_trace_with(&psi, &[1], &[2, 3], &checked()),
            Err(QtraceError::DimsMismatchMatrix { op: "partial_trace", expected: 6, actual: 7 })
        );
    }

    #[test]
    fn test_duplicate_subsystem() {
        let rho = Mat::<c64>::identity(4, 4);
        assert!(matches!(
            partial_trace_with(&rho, &[1, 1], &[2, 2], &checked()),
            Err(QtraceError::InvalidSubsystem { op: "partial_trace", .. })
        ));
    }

    #[test]
    fn test_non_square_matrix() {
        let rho = Mat::<c64>::zeros(4, 2);
        assert!(matches!(
            partial_trace_with(&rho, &[1], &[2, 2], &checked()),
            Err(QtraceError::MatrixNotSquareOrVector { .. })
        ));
    }

    #[test]
    fn test_uniform_matches_general() {
        let psi: Ket<f64> = Ket::random([3, 3, 3]);
        let general = partial_trace(&psi, &[2], &[3, 3, 3]).unwrap();
        let uniform = partial_trace_uniform(&psi, &[2], 3).unwrap();
        assert_close(&general, &uniform);
    }

    #[test]
    fn test_qubits_default() {
        let psi: Ket<f64> = Ket::random([2, 2, 2, 2]);
        let general = partial_trace(&psi, &[1, 4], &[2, 2, 2, 2]).unwrap();
        let qubits = partial_trace_qubits(&psi, &[1, 4]).unwrap();
        assert_close(&general, &qubits);
        assert_eq!(qubits.nrows(), 4);
    }

    #[test]
    fn test_uniform_zero_dim() {
        let rho = Mat::<c64>::identity(4, 4);
        assert_eq!(
            partial_trace_uniform(&rho, &[1], 0),
            Err(QtraceError::InvalidDims { op: "partial_trace_uniform", dims: vec![0] })
        );
        let unchecked = TraceOptions::default().validate(false);
        assert!(partial_trace_uniform_with(&rho, &[1], 1, &unchecked).is_err());
    }

    #[test]
    fn test_uniform_size_not_a_power() {
        let rho = Mat::<c64>::identity(6, 6);
        assert_eq!(
            partial_trace_uniform_with(&rho, &[1], 2, &checked()),
            Err(QtraceError::DimsMismatchMatrix {
                op: "partial_trace_uniform",
                expected: 8,
                actual: 6
            })
        );
    }

    #[test]
    fn test_scalar_matrix_is_read_as_density() {
        let rho = Mat::from_fn(1, 1, |_, _| c64::new(0.0, 2.0));
        let reduced = partial_trace(&rho, &[1], &[1]).unwrap();
        assert_eq!(reduced, Mat::from_fn(1, 1, |_, _| c64::new(0.0, 2.0)));

        let psi = Col::from_fn(1, |_| c64::new(0.0, 2.0));
        let reduced = partial_trace(&psi, &[1], &[1]).unwrap();
        assert_eq!(reduced, Mat::from_fn(1, 1, |_, _| c(4.0)));
    }

    #[test]
    fn test_uniform_empty_state() {
        let rho = Mat::<c64>::zeros(0, 0);
        assert_eq!(
            partial_trace_uniform_with(&rho, &[], 2, &checked()),
            Err(QtraceError::ZeroSize { op: "partial_trace_uniform" })
        );
    }

    #[test]
    fn test_unchecked_valid_input() {
        let psi: Ket<f64> = Ket::random([2, 3]);
        let opts = TraceOptions::default().validate(false);
        let checked = partial_trace(&psi, &[1], &psi.radices()).unwrap();
        let unchecked = partial_trace_with(&psi, &[1], &psi.radices(), &opts).unwrap();
        assert_close(&checked, &unchecked);
    }
}
