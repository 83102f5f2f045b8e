//! The arithmetic used for transition probabilities (or rates).
//!
//! Algorithms in this crate never touch the concrete number type directly. Instead, they
//! go through [`ValueAlgebra`], which is implemented for `f64` (with a fixed comparison
//! tolerance) and for exact rationals ([`BigRational`]).
//!
//! The tolerance of the `f64` implementation is a known source of non-determinism for
//! ill-conditioned models: two signatures that differ by less than [`F64_TOLERANCE`] are
//! considered equal, and this relation is not transitive.

use num::BigRational;
use std::fmt::Debug;

/// Absolute tolerance used when comparing `f64` probabilities.
pub const F64_TOLERANCE: f64 = 1e-12;

/// Operations required from the probability type of a Markov chain.
///
/// Ordering is taken from [`PartialOrd`]. Equality of probabilities should always be tested
/// through [`ValueAlgebra::approx_eq`] and never through [`PartialEq`].
pub trait ValueAlgebra: Clone + Debug + PartialOrd {
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    fn is_zero(&self) -> bool;

    fn is_one(&self) -> bool;

    fn add(&self, other: &Self) -> Self;

    fn subtract(&self, other: &Self) -> Self;

    fn multiply(&self, other: &Self) -> Self;

    /// Only used to normalise rates during uniformisation. The divisor is never zero.
    fn divide(&self, other: &Self) -> Self;

    /// Tolerance-aware equality (exact for exact number types).
    fn approx_eq(&self, other: &Self) -> bool;

    /// Lossy conversion used for logging.
    fn to_f64(&self) -> f64;

    /// True if the value is strictly above zero (and not just numerical noise).
    fn is_positive(&self) -> bool {
        !self.is_zero() && *self > Self::zero()
    }

    /// The smaller of the two values (`self` on ties).
    fn min_of(&self, other: &Self) -> Self {
        if other < self {
            other.clone()
        } else {
            self.clone()
        }
    }
}

impl ValueAlgebra for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn is_zero(&self) -> bool {
        self.abs() <= F64_TOLERANCE
    }

    fn is_one(&self) -> bool {
        (self - 1.0).abs() <= F64_TOLERANCE
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn subtract(&self, other: &Self) -> Self {
        self - other
    }

    fn multiply(&self, other: &Self) -> Self {
        self * other
    }

    fn divide(&self, other: &Self) -> Self {
        self / other
    }

    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() <= F64_TOLERANCE
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

impl ValueAlgebra for BigRational {
    fn zero() -> Self {
        <BigRational as num::Zero>::zero()
    }

    fn one() -> Self {
        <BigRational as num::One>::one()
    }

    fn is_zero(&self) -> bool {
        num::Zero::is_zero(self)
    }

    fn is_one(&self) -> bool {
        num::One::is_one(self)
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn subtract(&self, other: &Self) -> Self {
        self - other
    }

    fn multiply(&self, other: &Self) -> Self {
        self * other
    }

    fn divide(&self, other: &Self) -> Self {
        self / other
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn to_f64(&self) -> f64 {
        num::ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }
}
