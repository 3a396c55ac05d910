//! Validation and normalization of a partial-trace request.

use log::trace;

use qtrace_core::{QtraceError, QuditSystem, Radices, Result, StateRef};

/// The resolved shape of a partial trace.
///
/// Produced from a dimension list and a 1-based list of subsystems to trace
/// out. After optional collapsing of adjacent traced subsystems it records,
/// per logical subsystem, its dimension, whether it is traced, and the
/// place values needed to turn digit vectors into flat indices of the input
/// and of the reduced output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceLayout {
    dims: Radices,
    traced: Vec<bool>,
    keep: Vec<usize>,
    strides: Vec<usize>,
    reduced_strides: Vec<usize>,
    trace_dim: usize,
    keep_dim: usize,
}

impl TraceLayout {
    /// Resolve `trace_out` against `dims` without checking preconditions.
    ///
    /// The order of `trace_out` is irrelevant. With `collapse`, every run of
    /// consecutive traced subsystems becomes one subsystem whose dimension
    /// is the product of the run.
    ///
    /// # Panics
    ///
    /// If an entry of `trace_out` is zero or larger than `dims.len()`. Use
    /// [`check_request`] first for untrusted input.
    #[track_caller]
    pub fn new(dims: &[usize], trace_out: &[usize], collapse: bool) -> Self {
        let mut traced = vec![false; dims.len()];
        for &sys in trace_out {
            traced[sys - 1] = true;
        }

        let (dims, traced) = if collapse {
            collapse_traced(dims, &traced)
        } else {
            (Radices::from(dims), traced)
        };

        let keep: Vec<usize> = (0..dims.len()).filter(|&i| !traced[i]).collect();
        let reduced = dims.select(&keep);

        let trace_dim: usize = dims
            .iter()
            .zip(&traced)
            .filter(|(_, t)| **t)
            .map(|(d, _)| *d)
            .product();
        let keep_dim: usize = reduced.iter().product();

        let layout = TraceLayout {
            strides: dims.place_values(),
            reduced_strides: reduced.place_values(),
            dims,
            traced,
            keep,
            trace_dim,
            keep_dim,
        };

        trace!(
            "partial trace layout: dims {}, traced {:?}, trace_dim {}, keep_dim {}",
            layout.dims,
            layout.traced_subsystems(),
            layout.trace_dim,
            layout.keep_dim,
        );

        layout
    }

    /// Dimensions of the logical subsystems, after any collapsing.
    #[inline(always)]
    pub fn dims(&self) -> &Radices {
        &self.dims
    }

    /// Number of logical subsystems.
    #[inline(always)]
    pub fn num_subsystems(&self) -> usize {
        self.dims.len()
    }

    /// Whether logical subsystem `i` (0-based) is traced out.
    #[inline(always)]
    pub fn is_traced(&self, i: usize) -> bool {
        self.traced[i]
    }

    /// Sorted 1-based indices of the traced logical subsystems.
    pub fn traced_subsystems(&self) -> Vec<usize> {
        (0..self.traced.len())
            .filter(|&i| self.traced[i])
            .map(|i| i + 1)
            .collect()
    }

    /// 0-based positions of the kept logical subsystems, in order.
    #[inline(always)]
    pub fn keep(&self) -> &[usize] {
        &self.keep
    }

    /// Dimensions of the kept subsystems; the radices of the output.
    pub fn reduced_dims(&self) -> Radices {
        self.dims.select(&self.keep)
    }

    /// Place value of every logical subsystem in the input index.
    #[inline(always)]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Place value of every kept subsystem in the output index.
    #[inline(always)]
    pub fn reduced_strides(&self) -> &[usize] {
        &self.reduced_strides
    }

    /// Product of the traced dimensions.
    #[inline(always)]
    pub fn trace_dim(&self) -> usize {
        self.trace_dim
    }

    /// Side length of the reduced output matrix.
    #[inline(always)]
    pub fn keep_dim(&self) -> usize {
        self.keep_dim
    }
}

/// Merge each run of adjacent traced subsystems into one subsystem.
fn collapse_traced(dims: &[usize], traced: &[bool]) -> (Radices, Vec<bool>) {
    let mut new_dims: Vec<usize> = Vec::with_capacity(dims.len());
    let mut new_traced: Vec<bool> = Vec::with_capacity(dims.len());

    for (&dim, &is_traced) in dims.iter().zip(traced) {
        if is_traced && new_traced.last() == Some(&true) {
            if let Some(last) = new_dims.last_mut() {
                *last *= dim;
            }
        } else {
            new_dims.push(dim);
            new_traced.push(is_traced);
        }
    }

    (Radices::from(new_dims), new_traced)
}

/// Check every precondition of a partial trace.
///
/// # Errors
///
/// * [`QtraceError::ZeroSize`] if the state has no elements.
/// * [`QtraceError::MatrixNotSquareOrVector`] for a non-square matrix.
/// * [`QtraceError::InvalidDims`] if `dims` is empty or contains a zero.
/// * [`QtraceError::DimsMismatchMatrix`] if `dims` does not multiply out to
///   the row count of the state.
/// * [`QtraceError::InvalidSubsystem`] if `trace_out` is longer than
///   `dims`, contains an index outside `1..=dims.len()`, or repeats one.
pub fn check_request<T>(
    state: &StateRef<'_, T>,
    trace_out: &[usize],
    dims: &[usize],
    op: &'static str,
) -> Result<()> {
    state.check(op)?;

    let radices = Radices::from(dims);
    radices.check(op)?;

    let rows = state.nrows();
    match radices.checked_dimension() {
        Some(dim) if dim == rows => {}
        expected => {
            return Err(QtraceError::DimsMismatchMatrix {
                op,
                expected: expected.unwrap_or(usize::MAX),
                actual: rows,
            });
        }
    }

    check_subsystems(trace_out, radices.num_qudits(), op)
}

fn check_subsystems(trace_out: &[usize], num_subsystems: usize, op: &'static str) -> Result<()> {
    let mut sorted = trace_out.to_vec();
    sorted.sort_unstable();

    let out_of_range = sorted
        .first()
        .is_some_and(|&s| s == 0)
        || sorted.last().is_some_and(|&s| s > num_subsystems);
    let duplicated = sorted.windows(2).any(|w| w[0] == w[1]);

    if trace_out.len() > num_subsystems || out_of_range || duplicated {
        return Err(QtraceError::InvalidSubsystem {
            op,
            subsystems: trace_out.to_vec(),
            num_subsystems,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::{Col, Mat};
    use qtrace_core::c64;

    #[test]
    fn test_layout_single_traced() {
        let layout = TraceLayout::new(&[2, 3, 4], &[2], true);
        assert_eq!(layout.dims(), &Radices::new([2, 3, 4]));
        assert_eq!(layout.keep(), &[0, 2]);
        assert_eq!(layout.reduced_dims(), Radices::new([2, 4]));
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert_eq!(layout.reduced_strides(), &[4, 1]);
        assert_eq!(layout.trace_dim(), 3);
        assert_eq!(layout.keep_dim(), 8);
    }

    #[test]
    fn test_collapse_adjacent_run() {
        let layout = TraceLayout::new(&[2, 3, 4, 5, 2], &[4, 2, 3], true);
        assert_eq!(layout.dims(), &Radices::new([2, 60, 2]));
        assert_eq!(layout.traced_subsystems(), vec![2]);
        assert_eq!(layout.keep(), &[0, 2]);
        assert_eq!(layout.trace_dim(), 60);
        assert_eq!(layout.keep_dim(), 4);
    }

    #[test]
    fn test_collapse_leaves_separated_subsystems() {
        let layout = TraceLayout::new(&[2, 3, 4], &[3, 1], true);
        assert_eq!(layout.dims(), &Radices::new([2, 3, 4]));
        assert_eq!(layout.traced_subsystems(), vec![1, 3]);
    }

    #[test]
    fn test_collapse_disabled() {
        let layout = TraceLayout::new(&[2, 2, 2], &[1, 2], false);
        assert_eq!(layout.num_subsystems(), 3);
        assert_eq!(layout.traced_subsystems(), vec![1, 2]);
        assert_eq!(layout.trace_dim(), 4);
        assert_eq!(layout.keep_dim(), 2);
    }

    #[test]
    fn test_trace_everything() {
        let layout = TraceLayout::new(&[2, 3], &[1, 2], true);
        assert_eq!(layout.dims(), &Radices::new([6]));
        assert!(layout.keep().is_empty());
        assert_eq!(layout.keep_dim(), 1);
        assert_eq!(layout.trace_dim(), 6);
    }

    #[test]
    fn test_trace_nothing() {
        let layout = TraceLayout::new(&[2, 3], &[], true);
        assert_eq!(layout.keep(), &[0, 1]);
        assert_eq!(layout.trace_dim(), 1);
        assert_eq!(layout.keep_dim(), 6);
    }

    #[test]
    fn test_check_request_accepts_valid() {
        let rho = Mat::<c64>::zeros(6, 6);
        let state = StateRef::from(&rho);
        assert!(check_request(&state, &[2, 1], &[2, 3], "op").is_ok());
        assert!(check_request(&state, &[], &[2, 3], "op").is_ok());
    }

    #[test]
    fn test_check_request_dims_mismatch() {
        let psi = Col::<c64>::zeros(7);
        let state = StateRef::from(&psi);
        assert_eq!(
            check_request(&state, &[1], &[2, 3], "op"),
            Err(QtraceError::DimsMismatchMatrix { op: "op", expected: 6, actual: 7 })
        );
    }

    #[test]
    fn test_check_request_invalid_dims() {
        let rho = Mat::<c64>::zeros(4, 4);
        let state = StateRef::from(&rho);
        assert!(matches!(
            check_request(&state, &[1], &[], "op"),
            Err(QtraceError::InvalidDims { .. })
        ));
        assert!(matches!(
            check_request(&state, &[1], &[4, 0], "op"),
            Err(QtraceError::InvalidDims { .. })
        ));
    }

    #[test]
    fn test_check_request_invalid_subsystems() {
        let rho = Mat::<c64>::zeros(4, 4);
        let state = StateRef::from(&rho);
        for bad in [&[1, 1][..], &[0][..], &[3][..], &[1, 2, 1][..]] {
            assert!(matches!(
                check_request(&state, bad, &[2, 2], "op"),
                Err(QtraceError::InvalidSubsystem { .. })
            ));
        }
    }

    #[test]
    fn test_check_request_overflowing_dims() {
        let rho = Mat::<c64>::zeros(4, 4);
        let state = StateRef::from(&rho);
        assert_eq!(
            check_request(&state, &[], &[usize::MAX, 2], "op"),
            Err(QtraceError::DimsMismatchMatrix { op: "op", expected: usize::MAX, actual: 4 })
        );
    }
}
