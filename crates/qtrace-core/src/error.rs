//! Error types shared by every qtrace operation.

use thiserror::Error;

/// Result type for qtrace operations.
pub type Result<T> = std::result::Result<T, QtraceError>;

/// Precondition failures reported by qtrace operations.
///
/// Every variant records the name of the operation that rejected its input,
/// so a failure deep inside a delegating call still names the entry point
/// the caller used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QtraceError {
    /// The state has no elements.
    #[error("{op}: state has zero size")]
    ZeroSize {
        /// Name of the rejecting operation.
        op: &'static str,
    },

    /// The state is a matrix with more than one column that is not square.
    #[error("{op}: state is neither a square matrix nor a column vector ({nrows}x{ncols})")]
    MatrixNotSquareOrVector {
        /// Name of the rejecting operation.
        op: &'static str,
        /// Number of rows in the rejected state.
        nrows: usize,
        /// Number of columns in the rejected state.
        ncols: usize,
    },

    /// The matrix is not square.
    #[error("{op}: matrix is not square ({nrows}x{ncols})")]
    MatrixNotSquare {
        /// Name of the rejecting operation.
        op: &'static str,
        /// Number of rows in the rejected matrix.
        nrows: usize,
        /// Number of columns in the rejected matrix.
        ncols: usize,
    },

    /// The dimension list is empty or contains a zero.
    #[error("{op}: invalid subsystem dimensions {dims:?}")]
    InvalidDims {
        /// Name of the rejecting operation.
        op: &'static str,
        /// The rejected dimensions.
        dims: Vec<usize>,
    },

    /// The product of the dimension list does not match the state.
    #[error("{op}: subsystem dimensions describe a space of size {expected}, state has {actual} rows")]
    DimsMismatchMatrix {
        /// Name of the rejecting operation.
        op: &'static str,
        /// Product of the subsystem dimensions, saturated at `usize::MAX`.
        expected: usize,
        /// Row count of the state.
        actual: usize,
    },

    /// A subsystem index is out of range or duplicated.
    #[error("{op}: invalid subsystems {subsystems:?} for a system of {num_subsystems} subsystems")]
    InvalidSubsystem {
        /// Name of the rejecting operation.
        op: &'static str,
        /// The rejected 1-based subsystem list.
        subsystems: Vec<usize>,
        /// Number of subsystems in the dimension list.
        num_subsystems: usize,
    },

    /// The operation is only defined for a pair of qubits.
    #[error("{op}: expected a two-qubit (4x4) matrix, got {nrows}x{ncols}")]
    NotQubitSubsystem {
        /// Name of the rejecting operation.
        op: &'static str,
        /// Number of rows in the rejected matrix.
        nrows: usize,
        /// Number of columns in the rejected matrix.
        ncols: usize,
    },
}

impl QtraceError {
    /// Name of the operation that reported this error.
    pub fn op(&self) -> &'static str {
        match self {
            QtraceError::ZeroSize { op }
            | QtraceError::MatrixNotSquareOrVector { op, .. }
            | QtraceError::MatrixNotSquare { op, .. }
            | QtraceError::InvalidDims { op, .. }
            | QtraceError::DimsMismatchMatrix { op, .. }
            | QtraceError::InvalidSubsystem { op, .. }
            | QtraceError::NotQubitSubsystem { op, .. } => *op,
        }
    }
}
