#![warn(missing_docs)]

//! Partial traces of quantum states on mixed-dimension composite systems.
//!
//! A state is either a density matrix or a pure state vector over a system
//! of `n` subsystems with dimensions `d_1, ..., d_n`. Tracing out a subset
//! of the subsystems yields the reduced density matrix on the rest. The
//! computation walks only the index pairs that survive the trace, so a pure
//! state is reduced without ever forming `|ψ⟩⟨ψ|`.
//!
//! ```
//! use faer::Mat;
//! use qtrace::partial_trace;
//!
//! // I_2 ⊗ I_3 traced over the qutrit is 3 * I_2.
//! let rho = Mat::<f64>::identity(6, 6);
//! let reduced = partial_trace(&rho, &[2], &[2, 3]).unwrap();
//! assert_eq!(reduced, Mat::from_fn(2, 2, |i, j| if i == j { 3.0 } else { 0.0 }));
//! ```

mod odometer;
mod partial;
mod pauli;
mod resolve;

pub use odometer::Odometer;
pub use partial::partial_trace;
pub use partial::partial_trace_qubits;
pub use partial::partial_trace_uniform;
pub use partial::partial_trace_uniform_with;
pub use partial::partial_trace_with;
pub use pauli::hs_to_std;
pub use pauli::hs_to_std_with;
pub use pauli::std_to_hs;
pub use pauli::std_to_hs_with;
pub use pauli::PauliBasis;
pub use resolve::check_request;
pub use resolve::TraceLayout;

pub use qtrace_core::QtraceError;
pub use qtrace_core::Result;
pub use qtrace_core::StateRef;
pub use qtrace_core::TraceOptions;

use faer::Mat;
use qtrace_core::{Ket, QuditSystem, RealScalar};

/// A state that knows its own subsystem dimensions and can be reduced.
pub trait PartialTrace {
    /// Entry type of the reduced density matrix.
    type Output;

    /// Trace out the given 1-based subsystems.
    ///
    /// # Errors
    ///
    /// As [`partial_trace`].
    fn partial_trace(&self, trace_out: &[usize]) -> Result<Mat<Self::Output>>;
}

impl<R: RealScalar> PartialTrace for Ket<R> {
    type Output = R::C;

    /// # Examples
    ///
    /// ```
    /// use qtrace::PartialTrace;
    /// use qtrace_core::Ket;
    ///
    /// let psi: Ket<f64> = Ket::from_digits([2, 3], &[1, 2]);
    /// let rho = psi.partial_trace(&[1]).unwrap();
    /// assert!((rho[(2, 2)].re - 1.0).abs() < 1e-12);
    /// ```
    fn partial_trace(&self, trace_out: &[usize]) -> Result<Mat<R::C>> {
        let dims = self.radices();
        partial::partial_trace(self, trace_out, &dims)
    }
}
