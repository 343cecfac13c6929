// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The fixed-point value type and its raw-bits layer.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::kind::{Kind, SignedKind, I16F16, U16F16, U8F8};

/// Fixed-point scalar parametrized by its representation [`Kind`].
///
/// The only stored field is the raw integer:
///
/// ```text
/// real_value = raw / 2^K::FRAC_BITS
/// ```
///
/// Every bit pattern is a valid value; there is no NaN or infinity encoding.
/// Equality and ordering are those of the raw integer, which coincide with the
/// real-number ordering for both signed and unsigned storage.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct FixedPoint<K: Kind> {
    raw: K::Raw,
    _kind: PhantomData<K>,
}

/// Signed Q16.16 fixed-point (`i32` storage).
pub type Fix16 = FixedPoint<I16F16>;
/// Unsigned Q16.16 fixed-point (`u32` storage).
pub type UFix16 = FixedPoint<U16F16>;
/// Unsigned Q8.8 fixed-point (`u16` storage).
pub type UFix8 = FixedPoint<U8F8>;

impl<K: Kind> FixedPoint<K> {
    /// `0`.
    pub const ZERO: Self = Self::from_raw(K::ZERO_RAW);
    /// `1` (raw `2^F`).
    pub const ONE: Self = Self::from_raw(K::ONE_RAW);
    /// Smallest positive step (raw `1`).
    pub const EPSILON: Self = Self::from_raw(K::EPSILON_RAW);
    /// Most negative representable value (zero for unsigned kinds).
    pub const MIN: Self = Self::from_raw(K::MIN_RAW);
    /// Most positive representable value.
    pub const MAX: Self = Self::from_raw(K::MAX_RAW);
    /// π at this kind's precision.
    pub const PI: Self = Self::from_raw(K::PI_RAW);
    /// Euler's number at this kind's precision.
    pub const E: Self = Self::from_raw(K::E_RAW);
    /// 4/π at this kind's precision.
    pub const FOUR_DIV_PI: Self = Self::from_raw(K::FOUR_DIV_PI_RAW);
    /// 4/π² at this kind's precision.
    pub const FOUR_DIV_PI2: Self = Self::from_raw(K::FOUR_DIV_PI2_RAW);
    /// π/4 at this kind's precision.
    pub const PI_DIV_FOUR: Self = Self::from_raw(K::PI_DIV_FOUR_RAW);
    /// 3π/4 at this kind's precision.
    pub const THREE_PI_DIV_FOUR: Self = Self::from_raw(K::THREE_PI_DIV_FOUR_RAW);

    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = K::FRAC_BITS;

    /// Constructs a value directly from its bit pattern.
    ///
    /// This is an exact conversion (no scaling or rounding); `raw` is
    /// interpreted as `real_value = raw / 2^F`.
    #[must_use]
    pub const fn from_raw(raw: K::Raw) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// Returns the underlying raw storage value.
    pub fn raw(self) -> K::Raw {
        self.raw
    }

    /// Name of the kind (`Fix16`, `UFix16`, `UFix8`).
    pub const fn type_name() -> &'static str {
        K::NAME
    }

    pub(crate) fn wide(self) -> i128 {
        K::widen(self.raw)
    }

    pub(crate) fn from_wide_wrapping(wide: i128) -> Self {
        Self::from_raw(K::wrap(wide))
    }

    pub(crate) fn from_wide_saturating(wide: i128) -> Self {
        Self::from_raw(K::saturate(wide))
    }

    /// Returns `true` when the value is exactly zero.
    pub fn is_zero(self) -> bool {
        self.raw == K::ZERO_RAW
    }

    /// Returns `true` when the value is strictly below zero.
    pub fn is_negative(self) -> bool {
        self.wide() < 0
    }

    /// Tolerance comparison: `|self - other| <= delta`.
    ///
    /// With `delta == ZERO` this degrades to bitwise equality. The difference is
    /// computed exactly, so it never wraps.
    pub fn equals_within(self, other: Self, delta: Self) -> bool {
        (self.wide() - other.wide()).abs() <= delta.wide()
    }
}

impl<K: SignedKind> FixedPoint<K> {
    /// `-1`.
    pub const NEG_ONE: Self = Self::from_raw(K::NEG_ONE_RAW);

    /// Absolute value; `MIN.abs()` wraps to `MIN`.
    pub fn abs(self) -> Self {
        Self::from_wide_wrapping(self.wide().abs())
    }
}

impl<K: Kind> Hash for FixedPoint<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
        K::HASH_TAG.hash(state);
    }
}

impl<K: Kind> fmt::Debug for FixedPoint<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self} raw={:#x})", K::NAME, self.raw)
    }
}

#[cfg(feature = "serde")]
impl<K: Kind> serde::Serialize for FixedPoint<K>
where
    K::Raw: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.raw.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, K: Kind> serde::Deserialize<'de> for FixedPoint<K>
where
    K::Raw: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <K::Raw as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from_raw)
    }
}
