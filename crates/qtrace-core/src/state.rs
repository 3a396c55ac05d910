use faer::{Col, ColRef, Mat, MatRef};

use crate::{QtraceError, Result};

/// A borrowed view of a quantum state.
///
/// A state is either a density operator stored as a square matrix or a pure
/// state stored as a column of amplitudes `|ψ⟩`. For a pure state the
/// product `ψ_i · conj(ψ_j)` stands in for the density-matrix entry
/// `ρ_ij`, so the outer product never has to be formed.
///
/// Converting a matrix with a single column and more than one row yields
/// [`StateRef::Pure`]; a `1x1` matrix stays a density operator.
///
/// # Examples
///
/// ```
/// use faer::{Col, Mat};
/// use qtrace_core::{c64, StateRef};
///
/// let rho = Mat::<c64>::identity(4, 4);
/// assert!(!StateRef::from(&rho).is_pure());
///
/// let psi = Col::<c64>::zeros(4);
/// assert!(StateRef::from(&psi).is_pure());
/// ```
#[derive(Clone, Copy, Debug)]
pub enum StateRef<'a, T> {
    /// A density operator.
    Density(MatRef<'a, T>),

    /// A pure state vector.
    Pure(ColRef<'a, T>),
}

impl<'a, T> StateRef<'a, T> {
    /// Number of rows, the dimension of the underlying Hilbert space.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        match self {
            StateRef::Density(m) => m.nrows(),
            StateRef::Pure(v) => v.nrows(),
        }
    }

    /// Number of columns; one for a pure state.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        match self {
            StateRef::Density(m) => m.ncols(),
            StateRef::Pure(_) => 1,
        }
    }

    /// Total number of stored elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nrows() * self.ncols()
    }

    /// Returns true if the state stores no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for a pure state vector.
    #[inline(always)]
    pub fn is_pure(&self) -> bool {
        matches!(self, StateRef::Pure(_))
    }

    /// Verify the state is non-empty and, if a matrix, square.
    ///
    /// # Errors
    ///
    /// * [`QtraceError::ZeroSize`] if the state has no elements.
    /// * [`QtraceError::MatrixNotSquareOrVector`] for a non-square matrix.
    pub fn check(&self, op: &'static str) -> Result<()> {
        if self.is_empty() {
            return Err(QtraceError::ZeroSize { op });
        }
        if let StateRef::Density(m) = self {
            if m.nrows() != m.ncols() {
                return Err(QtraceError::MatrixNotSquareOrVector {
                    op,
                    nrows: m.nrows(),
                    ncols: m.ncols(),
                });
            }
        }
        Ok(())
    }
}

impl<'a, T> From<MatRef<'a, T>> for StateRef<'a, T> {
    fn from(value: MatRef<'a, T>) -> Self {
        if value.ncols() == 1 && value.nrows() > 1 {
            StateRef::Pure(value.col(0))
        } else {
            StateRef::Density(value)
        }
    }
}

impl<'a, T> From<&'a Mat<T>> for StateRef<'a, T> {
    fn from(value: &'a Mat<T>) -> Self {
        value.as_ref().into()
    }
}

impl<'a, T> From<ColRef<'a, T>> for StateRef<'a, T> {
    fn from(value: ColRef<'a, T>) -> Self {
        StateRef::Pure(value)
    }
}

impl<'a, T> From<&'a Col<T>> for StateRef<'a, T> {
    fn from(value: &'a Col<T>) -> Self {
        StateRef::Pure(value.as_ref())
    }
}
