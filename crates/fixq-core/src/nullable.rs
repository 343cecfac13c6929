// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Absence-propagating arithmetic over optional fixed-point values.
//!
//! The operator truth table is deliberately not the usual "absent absorbs
//! everything" algebra:
//!
//! | op      | `a ∘ ∅` | `∅ ∘ b` | `∅ ∘ ∅` |
//! |---------|---------|---------|---------|
//! | `+`     | `a`     | `b`     | `∅`     |
//! | `-`     | `a`     | `∅`     | `∅`     |
//! | `*`     | `∅`     | `∅`     | `∅`     |
//! | `/`     | `∅`     | `∅`     | `∅`     |
//!
//! Present operands use the wrapping operators. `/` by zero yields `∅`.
//! Lifted ordering comparisons involving `∅` are false; two `∅` compare equal.

use core::cmp::Ordering;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::fixed::FixedPoint;
use crate::kind::{Kind, SignedKind};

/// An optional fixed-point value with the arithmetic table above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NullableFixed<K: Kind>(pub Option<FixedPoint<K>>);

impl<K: Kind> NullableFixed<K> {
    /// The absent value.
    pub const NULL: Self = Self(None);

    /// Wraps a present value.
    pub const fn some(value: FixedPoint<K>) -> Self {
        Self(Some(value))
    }

    /// Returns the wrapped option.
    pub fn get(self) -> Option<FixedPoint<K>> {
        self.0
    }

    /// `true` when no value is present.
    pub fn is_null(self) -> bool {
        self.0.is_none()
    }
}

impl<K: Kind> From<FixedPoint<K>> for NullableFixed<K> {
    fn from(value: FixedPoint<K>) -> Self {
        Self(Some(value))
    }
}

impl<K: Kind> From<Option<FixedPoint<K>>> for NullableFixed<K> {
    fn from(value: Option<FixedPoint<K>>) -> Self {
        Self(value)
    }
}

impl<K: Kind> From<NullableFixed<K>> for Option<FixedPoint<K>> {
    fn from(value: NullableFixed<K>) -> Self {
        value.0
    }
}

impl<K: Kind> Add for NullableFixed<K> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self.0, rhs.0) {
            (Some(a), Some(b)) => Self(Some(a + b)),
            (Some(a), None) => Self(Some(a)),
            (None, Some(b)) => Self(Some(b)),
            (None, None) => Self(None),
        }
    }
}

impl<K: Kind> Sub for NullableFixed<K> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match (self.0, rhs.0) {
            (Some(a), Some(b)) => Self(Some(a - b)),
            (Some(a), None) => Self(Some(a)),
            (None, _) => Self(None),
        }
    }
}

impl<K: Kind> Mul for NullableFixed<K> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0.zip(rhs.0).map(|(a, b)| a * b))
    }
}

impl<K: Kind> Div for NullableFixed<K> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self(FixedPoint::nullable_divide(self.0, rhs.0))
    }
}

impl<K: SignedKind> Neg for NullableFixed<K> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.map(Neg::neg))
    }
}

impl<K: Kind> NullableFixed<K> {
    /// Lifted comparison: `None` unless both sides are present.
    ///
    /// This is intentionally not `PartialOrd`: two absent values are equal
    /// under `==` but unordered here.
    pub fn lifted_cmp(self, other: Self) -> Option<Ordering> {
        let (a, b) = self.0.zip(other.0)?;
        Some(a.cmp(&b))
    }

    /// Lifted `<`; false when either side is absent.
    pub fn lt(self, other: Self) -> bool {
        self.lifted_cmp(other) == Some(Ordering::Less)
    }

    /// Lifted `<=`; false when either side is absent.
    pub fn le(self, other: Self) -> bool {
        matches!(self.lifted_cmp(other), Some(Ordering::Less | Ordering::Equal))
    }

    /// Lifted `>`; false when either side is absent.
    pub fn gt(self, other: Self) -> bool {
        self.lifted_cmp(other) == Some(Ordering::Greater)
    }

    /// Lifted `>=`; false when either side is absent.
    pub fn ge(self, other: Self) -> bool {
        matches!(self.lifted_cmp(other), Some(Ordering::Greater | Ordering::Equal))
    }
}

impl<K: Kind> FixedPoint<K> {
    /// `dividend / divisor`, or `None` when an operand is absent or the
    /// divisor is zero.
    pub fn nullable_divide(dividend: Option<Self>, divisor: Option<Self>) -> Option<Self> {
        let (a, b) = dividend.zip(divisor)?;
        a.wrapping_div(b).ok()
    }

    /// Argument-order variant of [`FixedPoint::nullable_divide`]: the divisor
    /// comes first.
    pub fn nullable_divide_by(divisor: Option<Self>, dividend: Option<Self>) -> Option<Self> {
        Self::nullable_divide(dividend, divisor)
    }
}
