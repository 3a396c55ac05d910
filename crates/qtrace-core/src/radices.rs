use crate::{QtraceError, QuditSystem, Result};

/// The dimension of each subsystem in a composite quantum system.
///
/// This object represents the radix -- sometimes called the base, level
/// or ditness -- of each subsystem of a tensor-product Hilbert space, and
/// doubles as a mixed-radix number system for flat basis indices. A qubit
/// is a two-level subsystem, a qutrit a three-level one. Two qutrits
/// together are represented by the [3, 3] radices object.
///
/// Unlike a gate register, a partial trace may meet trivial subsystems, so
/// a radix of 1 is allowed. A radix of 0 describes no space at all; such
/// radices can be built but are rejected by [`Radices::check`].
///
/// ## Ordering and Endianness
///
/// Indices are counted left to right, for example a [2, 3] radices is
/// interpreted as a qubit as the first subsystem and a qutrit as the second
/// one. Ordering is big-endian, so the qubit in the previous example is the
/// most significant digit and the qutrit the least significant digit. For
/// example, in the same system, a state |10> is the decimal number 3.
#[derive(Hash, PartialEq, Eq, Clone, Default)]
pub struct Radices(Vec<usize>);

impl Radices {
    /// Constructs a Radices object from the given input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::Radices;
    /// let three_qubits = Radices::new([2; 3]);
    /// let qubit_qutrit = Radices::new([2, 3]);
    /// ```
    pub fn new<T: Into<Radices>>(radices: T) -> Self {
        radices.into()
    }

    /// `count` subsystems, each of dimension `radix`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::Radices;
    /// assert_eq!(Radices::uniform(3, 2), Radices::new([3, 3]));
    /// ```
    pub fn uniform(radix: usize, count: usize) -> Self {
        Radices(vec![radix; count])
    }

    /// Verify these radices describe a non-empty space.
    ///
    /// # Errors
    ///
    /// [`QtraceError::InvalidDims`] naming `op` if there are no radices or
    /// any radix is zero.
    pub fn check(&self, op: &'static str) -> Result<()> {
        if self.is_empty() || self.iter().any(|&r| r == 0) {
            return Err(QtraceError::InvalidDims {
                op,
                dims: self.0.clone(),
            });
        }
        Ok(())
    }

    /// The dimension of the described space, or `None` on overflow.
    pub fn checked_dimension(&self) -> Option<usize> {
        self.iter().try_fold(1usize, |acm, &r| acm.checked_mul(r))
    }

    /// Construct the expanded form of an index in this numbering system.
    ///
    /// # Returns
    ///
    /// A vector of coefficients for each subsystem. Note that the
    /// coefficients are in big-endian order, that is, the first
    /// coefficient is for the most significant subsystem.
    ///
    /// # Panics
    ///
    /// If `index` is too large for this system, that is, if it is greater
    /// than the product of the radices.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::Radices;
    /// let hybrid_system = Radices::new([2, 3]);
    /// assert_eq!(hybrid_system.expand(3), vec![1, 0]);
    ///
    /// let four_qubits = Radices::new([2, 2, 2, 2]);
    /// assert_eq!(four_qubits.expand(7), vec![0, 1, 1, 1]);
    ///
    /// let hybrid_system = Radices::new([3, 2, 3]);
    /// assert_eq!(hybrid_system.expand(17), vec![2, 1, 2]);
    /// ```
    ///
    /// # See Also
    ///
    /// * [`Radices::compress`] - The inverse of this function.
    /// * [`Radices::place_values`] - The place values for each position in the expansion.
    #[track_caller]
    pub fn expand(&self, mut index: usize) -> Vec<usize> {
        if index >= self.dimension() {
            panic!(
                "Provided index {} is too large for this system with radices: {}",
                index, self
            );
        }

        let mut expansion = vec![0; self.len()];

        for (idx, &radix) in self.iter().enumerate().rev() {
            expansion[idx] = index % radix;
            index /= radix;
        }

        expansion
    }

    /// Destruct an expanded form of an index back into its base 10 number.
    ///
    /// # Panics
    ///
    /// If `expansion` has a mismatch in length or radices.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::Radices;
    /// let hybrid_system = Radices::new([2, 3]);
    /// assert_eq!(hybrid_system.compress(&[1, 0]), 3);
    ///
    /// let hybrid_system = Radices::new([3, 2, 3]);
    /// assert_eq!(hybrid_system.compress(&[2, 1, 2]), 17);
    /// ```
    #[track_caller]
    pub fn compress(&self, expansion: &[usize]) -> usize {
        if self.len() != expansion.len() {
            panic!("Invalid expansion: incorrect number of subsystems.")
        }

        if expansion.iter().zip(self.iter()).any(|(coef, radix)| coef >= radix) {
            panic!("Invalid expansion: mismatch in radices.")
        }

        expansion
            .iter()
            .zip(self.place_values())
            .map(|(coef, place)| coef * place)
            .sum()
    }

    /// Calculate the value for each expansion position in this numbering system.
    ///
    /// The last position has place value one; every other position is the
    /// product of the radices to its right.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::Radices;
    /// let two_qubits = Radices::new([2, 2]);
    /// assert_eq!(two_qubits.place_values(), vec![2, 1]);
    ///
    /// let hybrid_system = Radices::new([3, 2, 3]);
    /// assert_eq!(hybrid_system.place_values(), vec![6, 3, 1]);
    /// ```
    pub fn place_values(&self) -> Vec<usize> {
        let mut place_values = vec![0; self.len()];
        let mut acm = 1;
        for (idx, &r) in self.iter().enumerate().rev() {
            place_values[idx] = acm;
            acm *= r;
        }
        place_values
    }

    /// The radices at the given 0-based positions, in the order given.
    ///
    /// # Panics
    ///
    /// If any position is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::Radices;
    /// let hybrid_system = Radices::new([3, 2, 4]);
    /// assert_eq!(hybrid_system.select(&[0, 2]), Radices::new([3, 4]));
    /// ```
    #[track_caller]
    pub fn select(&self, positions: &[usize]) -> Radices {
        positions.iter().map(|&p| self[p]).collect()
    }

    /// Concatenates two Radices objects into a new object.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::Radices;
    /// let two_qubits = Radices::new([2, 2]);
    /// let two_qutrits = Radices::new([3, 3]);
    /// assert_eq!(two_qubits.concat(&two_qutrits), Radices::new([2, 2, 3, 3]));
    /// ```
    #[inline(always)]
    pub fn concat(&self, other: &Radices) -> Radices {
        self.iter().chain(other.iter()).copied().collect()
    }

    /// Returns the number of subsystems.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true is the system is empty, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl QuditSystem for Radices {
    #[inline(always)]
    fn radices(&self) -> Radices {
        self.clone()
    }

    /// Returns the dimension of a system described by these radices.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::{QuditSystem, Radices};
    /// assert_eq!(Radices::new([2, 2]).dimension(), 4);
    /// assert_eq!(Radices::new([3, 2, 3]).dimension(), 18);
    /// ```
    #[inline(always)]
    fn dimension(&self) -> usize {
        self.iter().product()
    }

    #[inline(always)]
    fn num_qudits(&self) -> usize {
        self.len()
    }
}

impl core::iter::FromIterator<usize> for Radices {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Radices(iter.into_iter().collect())
    }
}

impl core::ops::Deref for Radices {
    type Target = [usize];

    #[inline(always)]
    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Radices {
    #[inline(always)]
    fn from(value: Vec<usize>) -> Self {
        Radices(value)
    }
}

impl From<&[usize]> for Radices {
    #[inline(always)]
    fn from(value: &[usize]) -> Self {
        Radices(value.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Radices {
    #[inline(always)]
    fn from(value: [usize; N]) -> Self {
        Radices(value.to_vec())
    }
}

impl<const N: usize> From<&[usize; N]> for Radices {
    #[inline(always)]
    fn from(value: &[usize; N]) -> Self {
        Radices(value.to_vec())
    }
}

impl From<Radices> for Vec<usize> {
    fn from(value: Radices) -> Self {
        value.0
    }
}

impl core::fmt::Debug for Radices {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> std::fmt::Result {
        <Radices as core::fmt::Display>::fmt(self, f)
    }
}

impl core::fmt::Display for Radices {
    /// Formats the radices as a string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qtrace_core::Radices;
    /// assert_eq!(format!("{}", Radices::new([2, 3])), "[2, 3]");
    /// assert_eq!(format!("{}", Radices::default()), "[]");
    /// ```
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, r) in self.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", r)?;
            } else {
                write!(f, ", {}", r)?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
pub mod strategies {
    use proptest::prelude::*;

    use super::*;

    impl Arbitrary for Radices {
        type Parameters = (core::ops::Range<usize>, core::ops::Range<usize>);
        type Strategy = BoxedStrategy<Self>;

        /// Generate a random Radices object.
        ///
        /// By default, the number of radices is chosen randomly between
        /// 1 and 4, and the radices themselves are chosen randomly
        /// between 1 and 4.
        fn arbitrary() -> Self::Strategy {
            Self::arbitrary_with((1..5, 1..5))
        }

        /// Generate a random Radices object with the given parameters.
        ///
        /// # Arguments
        ///
        /// * `args` - A tuple of ranges. The first range is for the radices
        ///   themselves, the second for the number of radices.
        fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
            prop::collection::vec(args.0, args.1)
                .prop_map(Radices::from)
                .boxed()
        }
    }
}
