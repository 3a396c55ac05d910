use crate::ComplexScalar;
use crate::Entry;
use crate::QuditSystem;
use crate::Radices;
use crate::RealScalar;
use crate::StateRef;
use faer::{Col, ColRef, Mat};
use num_traits::{One, Zero};

/// Represents a pure quantum state vector as a Ket.
///
/// The radices give the dimension of each subsystem, so a Ket knows how to
/// split itself when subsystems are traced out.
#[derive(Clone, Debug)]
pub struct Ket<R: RealScalar> {
    radices: Radices,
    vector: Col<R::C>,
}

impl<R: RealScalar> Ket<R> {
    /// Create a new Ket.
    ///
    /// # Arguments
    ///
    /// * `radices` - The radices of the composite system.
    /// * `amplitudes` - The amplitude of each computational basis state.
    ///
    /// # Panics
    ///
    /// Panics if the number of amplitudes does not match the dimension of
    /// the radices.
    ///
    /// # Example
    ///
    /// ```
    /// use qtrace_core::Ket;
    /// use qtrace_core::c64;
    /// let zero_state: Ket<f64> = Ket::new([2, 2], vec![
    ///     c64::new(1.0, 0.0), c64::new(0.0, 0.0), c64::new(0.0, 0.0), c64::new(0.0, 0.0)
    /// ]);
    /// ```
    #[track_caller]
    pub fn new<T: Into<Radices>>(radices: T, amplitudes: Vec<R::C>) -> Self {
        let radices = radices.into();
        assert_eq!(
            radices.dimension(),
            amplitudes.len(),
            "Radices {} do not match {} amplitudes",
            radices,
            amplitudes.len()
        );
        Self {
            radices,
            vector: Col::from_fn(amplitudes.len(), |i| amplitudes[i]),
        }
    }

    /// Create the all-zeros computational basis state |0...0⟩.
    ///
    /// # Example
    ///
    /// ```
    /// use qtrace_core::Ket;
    /// let zero_state: Ket<f64> = Ket::zero([2, 2]);
    /// ```
    pub fn zero<T: Into<Radices>>(radices: T) -> Self {
        Self::basis(radices, 0)
    }

    /// Create a computational basis state |i⟩.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds for the given radices.
    ///
    /// # Example
    ///
    /// ```
    /// use qtrace_core::Ket;
    /// let state: Ket<f64> = Ket::basis([2, 2], 3); // |11⟩ state
    /// ```
    #[track_caller]
    pub fn basis<T: Into<Radices>>(radices: T, index: usize) -> Self {
        let radices = radices.into();
        let dimension = radices.dimension();
        assert!(index < dimension, "Index {} out of bounds for dimension {}", index, dimension);

        let mut vector = Col::from_fn(dimension, |_| R::C::zero());
        vector[index] = R::C::one();

        Self { radices, vector }
    }

    /// Create the basis state whose subsystem `k` is in level `digits[k]`.
    ///
    /// # Example
    ///
    /// ```
    /// use qtrace_core::Ket;
    /// let state: Ket<f64> = Ket::from_digits([2, 3], &[1, 2]);
    /// assert!((state.probability_at(5) - 1.0).abs() < 1e-12);
    /// ```
    #[track_caller]
    pub fn from_digits<T: Into<Radices>>(radices: T, digits: &[usize]) -> Self {
        let radices = radices.into();
        let index = radices.compress(digits);
        Self::basis(radices, index)
    }

    /// Create a uniform superposition state (all amplitudes equal).
    ///
    /// # Example
    ///
    /// ```
    /// use qtrace_core::Ket;
    /// let uniform_state: Ket<f64> = Ket::uniform([2, 2]);
    /// assert!(uniform_state.is_pure_state());
    /// ```
    pub fn uniform<T: Into<Radices>>(radices: T) -> Self {
        let radices = radices.into();
        let dimension = radices.dimension();
        let count = R::from_usize(dimension).unwrap_or_else(R::one);
        let amplitude = R::C::from_real(count.sqrt().recip());

        Self {
            radices,
            vector: Col::from_fn(dimension, |_| amplitude),
        }
    }

    /// Create a normalized state with normally distributed amplitudes.
    pub fn random<T: Into<Radices>>(radices: T) -> Self {
        let radices = radices.into();
        let dimension = radices.dimension();
        let raw: Vec<R::C> = (0..dimension).map(|_| R::C::standard_random()).collect();
        let norm = raw.iter().map(|z| z.norm_squared()).sum::<R>().sqrt();
        let scale = R::C::from_real(norm.recip());

        Self {
            radices,
            vector: Col::from_fn(dimension, |i| raw[i] * scale),
        }
    }

    /// Check if this is a normalized pure quantum state.
    ///
    /// # Example
    ///
    /// ```
    /// use qtrace_core::Ket;
    /// let basis_state: Ket<f64> = Ket::basis([2, 2], 0);
    /// assert!(basis_state.is_pure_state());
    /// ```
    pub fn is_pure_state(&self) -> bool {
        let norm_squared: R = self.probabilities().into_iter().sum();
        R::one().is_close_with_tolerance(norm_squared, R::epsilon().sqrt(), R::epsilon())
    }

    /// Get the probabilities for all computational basis states.
    ///
    /// Returns a vector where each element is |amplitude|² for the corresponding basis state.
    pub fn probabilities(&self) -> Vec<R> {
        self.vector.iter().map(|&z| z.norm_squared()).collect()
    }

    /// Get the probability of measuring the state in a specific computational basis state.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[track_caller]
    pub fn probability_at(&self, index: usize) -> R {
        assert!(index < self.vector.nrows(), "Index {} out of bounds", index);
        self.vector[index].norm_squared()
    }

    /// Compute the tensor product with another quantum state.
    ///
    /// Creates a new state |ψ⟩ ⊗ |φ⟩ whose radices are the concatenation of
    /// both inputs' radices.
    ///
    /// # Example
    ///
    /// ```
    /// use qtrace_core::Ket;
    /// let qubit1: Ket<f64> = Ket::basis([2], 0); // |0⟩
    /// let qubit2: Ket<f64> = Ket::basis([2], 1); // |1⟩
    /// let combined = qubit1.tensor_product(&qubit2); // |01⟩
    /// assert!((combined.probability_at(1) - 1.0).abs() < 1e-12);
    /// ```
    pub fn tensor_product(&self, other: &Self) -> Self {
        let other_dim = other.vector.nrows();
        let new_dim = self.vector.nrows() * other_dim;

        Self {
            radices: self.radices.concat(&other.radices),
            vector: Col::from_fn(new_dim, |idx| {
                self.vector[idx / other_dim] * other.vector[idx % other_dim]
            }),
        }
    }

    /// The density operator |ψ⟩⟨ψ| of this state.
    pub fn density_matrix(&self) -> Mat<R::C> {
        let dim = self.vector.nrows();
        Mat::from_fn(dim, dim, |i, j| self.vector[i] * self.vector[j].conjugate())
    }

    /// A borrowed view of the amplitudes.
    #[inline(always)]
    pub fn as_col(&self) -> ColRef<'_, R::C> {
        self.vector.as_ref()
    }
}

impl<R: RealScalar> QuditSystem for Ket<R> {
    fn radices(&self) -> Radices {
        self.radices.clone()
    }

    fn dimension(&self) -> usize {
        self.vector.nrows()
    }
}

impl<'a, R: RealScalar> From<&'a Ket<R>> for StateRef<'a, R::C> {
    fn from(value: &'a Ket<R>) -> Self {
        StateRef::Pure(value.as_col())
    }
}
