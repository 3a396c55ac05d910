use crate::c32;
use crate::c64;

use faer_traits::ComplexField;
use faer_traits::RealField;
use num_complex::ComplexFloat;
use num_traits::ConstOne;
use num_traits::ConstZero;
use num_traits::Float;
use num_traits::FloatConst;
use num_traits::FromPrimitive;
use num_traits::NumAssign;
use num_traits::NumOps;
use num_traits::ToPrimitive;
use rand_distr::{Distribution, StandardNormal};

/// A matrix element the partial trace can accumulate.
///
/// Implemented for the real types `f32`, `f64` and the complex types
/// [`c32`], [`c64`]. The only operation beyond field arithmetic is
/// conjugation, which is the identity on real numbers.
pub trait Entry:
    Clone
    + Copy
    + Sync
    + Send
    + Sized
    + PartialEq
    + Default
    + std::fmt::Debug
    + NumAssign
    + ComplexField
    + 'static
{
    /// The complex conjugate of this value.
    fn conjugate(self) -> Self;
}

impl Entry for f32 {
    #[inline(always)]
    fn conjugate(self) -> Self {
        self
    }
}

impl Entry for f64 {
    #[inline(always)]
    fn conjugate(self) -> Self {
        self
    }
}

impl Entry for c32 {
    #[inline(always)]
    fn conjugate(self) -> Self {
        c32::new(self.re, -self.im)
    }
}

impl Entry for c64 {
    #[inline(always)]
    fn conjugate(self) -> Self {
        c64::new(self.re, -self.im)
    }
}

/// A generic real number within the qtrace library.
pub trait RealScalar:
    Entry
    + std::fmt::Display
    + std::iter::Sum
    + Float
    + FloatConst
    + FromPrimitive
    + ToPrimitive
    + RealField
    + ConstOne
    + ConstZero
{
    /// The complex number type associated with this real number.
    type C: ComplexScalar<R = Self>;

    /// Generate a random value from the standard normal distribution (mean=0, std=1)
    fn standard_random() -> Self;

    /// Check if two values are close using default tolerances
    fn is_close(self, other: Self) -> bool;

    /// Check if two values are close with custom tolerances
    /// Uses the formula: abs(a - b) <= (atol + rtol * abs(b))
    fn is_close_with_tolerance(self, other: Self, rtol: Self, atol: Self) -> bool {
        (self - other).abs() <= (atol + rtol * other.abs())
    }
}

impl RealScalar for f32 {
    type C = c32;

    fn standard_random() -> Self {
        let mut rng = rand::rng();
        StandardNormal.sample(&mut rng)
    }

    fn is_close(self, other: Self) -> bool {
        self.is_close_with_tolerance(other, 1e-5, 1e-6)
    }
}

impl RealScalar for f64 {
    type C = c64;

    fn standard_random() -> Self {
        let mut rng = rand::rng();
        StandardNormal.sample(&mut rng)
    }

    fn is_close(self, other: Self) -> bool {
        self.is_close_with_tolerance(other, 1e-9, 1e-12)
    }
}

/// A generic complex number within the qtrace library.
pub trait ComplexScalar:
    Entry
    + std::fmt::Display
    + std::iter::Sum
    + NumOps<Self::R>
    + ConstOne
    + ConstZero
    + ComplexField<Real = Self::R>
    + ComplexFloat<Real = Self::R>
{
    /// The real number type associated with this complex number.
    type R: RealScalar<C = Self>;

    /// Create a complex number from real and imaginary parts
    fn from_parts(real: Self::R, imag: Self::R) -> Self;

    /// Create a complex number from just the real part (imaginary = 0)
    fn from_real(real: Self::R) -> Self;

    /// The real component of the complex number.
    fn real(&self) -> Self::R;

    /// The imaginary component of the complex number.
    fn imag(&self) -> Self::R;

    /// Generate a random complex number with both real and imaginary parts from standard normal
    fn standard_random() -> Self {
        Self::from_parts(Self::R::standard_random(), Self::R::standard_random())
    }

    /// Calculate the squared norm (|z|²) of the complex number
    #[inline(always)]
    fn norm_squared(self) -> Self::R {
        self.real() * self.real() + self.imag() * self.imag()
    }

    /// Check if two values are close, component-wise, using default tolerances
    fn is_close(self, other: Self) -> bool {
        self.real().is_close(other.real()) && self.imag().is_close(other.imag())
    }
}

impl ComplexScalar for c32 {
    type R = f32;

    #[inline(always)]
    fn from_parts(real: f32, imag: f32) -> Self {
        c32::new(real, imag)
    }

    #[inline(always)]
    fn from_real(real: f32) -> Self {
        c32::new(real, 0.0)
    }

    #[inline(always)]
    fn real(&self) -> Self::R {
        self.re
    }

    #[inline(always)]
    fn imag(&self) -> Self::R {
        self.im
    }
}

impl ComplexScalar for c64 {
    type R = f64;

    #[inline(always)]
    fn from_parts(real: f64, imag: f64) -> Self {
        c64::new(real, imag)
    }

    #[inline(always)]
    fn from_real(real: f64) -> Self {
        c64::new(real, 0.0)
    }

    #[inline(always)]
    fn real(&self) -> Self::R {
        self.re
    }

    #[inline(always)]
    fn imag(&self) -> Self::R {
        self.im
    }
}
