use crate::Radices;

/// A data structure consisting of or operating on a specified number of
/// finite-dimensional subsystems.
///
/// Each subsystem has a well-defined radix, the number of basis states, and
/// these radices are represented collectively by the [`Radices`] object.
/// Mixed-radix systems where different subsystems have differing
/// dimensions are allowed.
pub trait QuditSystem {
    /// Returns the radices of the subsystems.
    fn radices(&self) -> Radices;

    /// Returns the number of subsystems.
    #[inline(always)]
    fn num_qudits(&self) -> usize {
        self.radices().len()
    }

    /// Returns the total dimension, the product of all radices.
    #[inline(always)]
    fn dimension(&self) -> usize {
        self.radices().iter().product()
    }
}
