// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Arithmetic under three overflow policies.
//!
//! Every operation computes the exact result in an `i128` intermediate first,
//! then narrows it:
//! - `wrapping_*` truncates two's-complement (the operators `+ - * /` do this),
//! - `checked_*` fails with [`FixedError::Overflow`],
//! - `saturating_*` clamps to `MIN`/`MAX`.
//!
//! Division by zero is never wrapped or clamped: every named division reports
//! [`FixedError::DivideByZero`], and the `/` operator panics like integer
//! division does.
//!
//! Multiplication rounds half up at the fractional boundary; division truncates
//! toward zero.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::FixedError;
use crate::fixed::FixedPoint;
use crate::kind::{Kind, SignedKind};

impl<K: Kind> FixedPoint<K> {
    fn mul_wide(self, rhs: Self) -> i128 {
        let product = self.wide() * rhs.wide();
        (product + (1_i128 << (K::FRAC_BITS - 1))) >> K::FRAC_BITS
    }

    fn div_wide(self, rhs: Self) -> Result<i128, FixedError> {
        if rhs.is_zero() {
            return Err(FixedError::DivideByZero);
        }
        Ok((self.wide() << K::FRAC_BITS) / rhs.wide())
    }

    fn checked(wide: i128) -> Result<Self, FixedError> {
        K::try_narrow(wide)
            .map(Self::from_raw)
            .ok_or(FixedError::Overflow { kind: K::NAME })
    }

    /// `self + rhs`, wrapping on overflow.
    pub fn wrapping_add(self, rhs: Self) -> Self {
        Self::from_wide_wrapping(self.wide() + rhs.wide())
    }

    /// `self - rhs`, wrapping on overflow.
    pub fn wrapping_sub(self, rhs: Self) -> Self {
        Self::from_wide_wrapping(self.wide() - rhs.wide())
    }

    /// `self * rhs`, wrapping on overflow.
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        Self::from_wide_wrapping(self.mul_wide(rhs))
    }

    /// `self / rhs`, wrapping on overflow.
    pub fn wrapping_div(self, rhs: Self) -> Result<Self, FixedError> {
        self.div_wide(rhs).map(Self::from_wide_wrapping)
    }

    /// `self + rhs`, failing on overflow.
    pub fn checked_add(self, rhs: Self) -> Result<Self, FixedError> {
        Self::checked(self.wide() + rhs.wide())
    }

    /// `self - rhs`, failing on overflow.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, FixedError> {
        Self::checked(self.wide() - rhs.wide())
    }

    /// `self * rhs`, failing on overflow.
    pub fn checked_mul(self, rhs: Self) -> Result<Self, FixedError> {
        Self::checked(self.mul_wide(rhs))
    }

    /// `self / rhs`, failing on overflow. A zero divisor reports
    /// `DivideByZero` before any overflow classification.
    pub fn checked_div(self, rhs: Self) -> Result<Self, FixedError> {
        self.div_wide(rhs).and_then(Self::checked)
    }

    /// `self + rhs`, clamped to `[MIN, MAX]`.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self::from_wide_saturating(self.wide() + rhs.wide())
    }

    /// `self - rhs`, clamped to `[MIN, MAX]`.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self::from_wide_saturating(self.wide() - rhs.wide())
    }

    /// `self * rhs`, clamped to `[MIN, MAX]`.
    pub fn saturating_mul(self, rhs: Self) -> Self {
        Self::from_wide_saturating(self.mul_wide(rhs))
    }

    /// `self / rhs`, clamped to `[MIN, MAX]`. A zero divisor is still an error.
    pub fn saturating_div(self, rhs: Self) -> Result<Self, FixedError> {
        self.div_wide(rhs).map(Self::from_wide_saturating)
    }

    /// Linear interpolation from `self` to `to` by `fraction / F::MAX`.
    ///
    /// Exact at both ends: a zero fraction returns `self`, `F::MAX` returns
    /// `to`. The intermediate is exact, so no step can overflow.
    pub fn lerp<F: LerpFraction>(self, to: Self, fraction: F) -> Self {
        let delta = to.wide() - self.wide();
        // |delta * fraction / MAX| <= |delta|, so the sum stays in [self, to].
        Self::from_wide_wrapping(self.wide() + delta * fraction.wide() / F::MAX_WIDE)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Unsigned integers usable as an interpolation fraction in `[0, MAX]`.
pub trait LerpFraction: Copy + sealed::Sealed {
    /// The fraction that stands for `1.0`.
    const MAX_WIDE: i128;

    /// Widens the fraction.
    fn wide(self) -> i128;
}

macro_rules! lerp_fraction {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        #[allow(clippy::cast_lossless)]
        impl LerpFraction for $t {
            const MAX_WIDE: i128 = <$t>::MAX as i128;

            fn wide(self) -> i128 {
                i128::from(self)
            }
        }
    )*};
}

lerp_fraction!(u8, u16, u32);

impl<K: Kind> Add for FixedPoint<K> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl<K: Kind> Sub for FixedPoint<K> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl<K: Kind> Mul for FixedPoint<K> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
}

impl<K: Kind> Div for FixedPoint<K> {
    type Output = Self;

    /// Wrapping division; panics on a zero divisor, as integer `/` does.
    fn div(self, rhs: Self) -> Self {
        Self::from_wide_wrapping((self.wide() << K::FRAC_BITS) / rhs.wide())
    }
}

impl<K: SignedKind> Neg for FixedPoint<K> {
    type Output = Self;

    /// Wrapping negation; `-MIN == MIN`.
    fn neg(self) -> Self {
        Self::from_wide_wrapping(-self.wide())
    }
}

impl<K: Kind> AddAssign for FixedPoint<K> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<K: Kind> SubAssign for FixedPoint<K> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<K: Kind> MulAssign for FixedPoint<K> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<K: Kind> DivAssign for FixedPoint<K> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}
