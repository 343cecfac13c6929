// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conversions between fixed-point kinds and primitive numeric types.
//!
//! Semantics:
//! - Integer sources scale exactly (`raw = value << F`).
//! - Float and decimal sources round to nearest, ties-to-even, computed from
//!   the exact source encoding (no floating-point arithmetic while scaling).
//! - Out-of-range sources saturate in [`FixedPoint::from_num`] and fail with
//!   [`FixedError::Overflow`] in [`FixedPoint::checked_from_num`]. `NaN`
//!   saturates to zero and is rejected by the checked path.
//! - Integer targets truncate toward zero, then saturate (or fail) at the
//!   target's own bounds.
//! - Cross-kind conversions saturate; they never reinterpret bits.

use core::str::FromStr;

use half::f16;
use rust_decimal::Decimal;

use crate::error::FixedError;
use crate::fixed::{Fix16, FixedPoint, UFix16, UFix8};
use crate::kind::Kind;
use crate::q32;

/// A source value scaled by `2^F`, before it is narrowed into a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaled {
    /// The scaled value, already rounded to an integer.
    Exact(i128),
    /// Larger than any representable value (includes `+∞`).
    Above,
    /// Smaller than any representable value (includes `-∞`).
    Below,
    /// The source was NaN.
    NotANumber,
}

mod sealed {
    pub trait Sealed {}
}

/// Types that can be converted into any fixed-point kind.
pub trait ToFixed: Copy + sealed::Sealed {
    /// Scales `self` by `2^frac_bits`, rounding to an integer.
    fn scaled(self, frac_bits: u32) -> Scaled;
}

/// Types that a fixed-point value can be converted into.
pub trait FromFixed: Sized + sealed::Sealed {
    /// Type name used in overflow errors.
    const NAME: &'static str;

    /// Converts `raw / 2^frac_bits`, clamping to the target's bounds.
    fn saturating_from_fixed(raw: i128, frac_bits: u32) -> Self;

    /// Converts `raw / 2^frac_bits`, or `None` if it does not fit.
    fn checked_from_fixed(raw: i128, frac_bits: u32) -> Option<Self>;
}

/// Integer part of `raw / 2^frac_bits`, truncated toward zero.
fn integer_part(raw: i128, frac_bits: u32) -> i128 {
    raw / (1_i128 << frac_bits)
}

/// Moves `raw` from `from` fractional bits to `to`, truncating toward zero.
fn rescale(raw: i128, from: u32, to: u32) -> i128 {
    if to >= from {
        raw << (to - from)
    } else {
        raw / (1_i128 << (from - to))
    }
}

macro_rules! integer_conversions {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl ToFixed for $t {
            fn scaled(self, frac_bits: u32) -> Scaled {
                Scaled::Exact(i128::from(self) << frac_bits)
            }
        }

        impl FromFixed for $t {
            const NAME: &'static str = stringify!($t);

            fn saturating_from_fixed(raw: i128, frac_bits: u32) -> Self {
                let int = integer_part(raw, frac_bits);
                <$t>::try_from(int).unwrap_or(if int < 0 { <$t>::MIN } else { <$t>::MAX })
            }

            fn checked_from_fixed(raw: i128, frac_bits: u32) -> Option<Self> {
                <$t>::try_from(integer_part(raw, frac_bits)).ok()
            }
        }
    )*};
}

integer_conversions!(i8, i16, i32, i64, u8, u16, u32, u64);

impl sealed::Sealed for bool {}

impl ToFixed for bool {
    fn scaled(self, frac_bits: u32) -> Scaled {
        Scaled::Exact(i128::from(self) << frac_bits)
    }
}

impl FromFixed for bool {
    const NAME: &'static str = "bool";

    fn saturating_from_fixed(raw: i128, _frac_bits: u32) -> Self {
        raw != 0
    }

    fn checked_from_fixed(raw: i128, _frac_bits: u32) -> Option<Self> {
        Some(raw != 0)
    }
}

/// `raw / 2^frac_bits` as `f64`. Exact: every kind's raw fits in 53 bits.
#[allow(clippy::cast_precision_loss)]
fn exact_f64(raw: i128, frac_bits: u32) -> f64 {
    raw as f64 / f64::from(1_u32 << frac_bits)
}

impl sealed::Sealed for f64 {}

impl ToFixed for f64 {
    fn scaled(self, frac_bits: u32) -> Scaled {
        q32::scale_f64(self, frac_bits)
    }
}

impl FromFixed for f64 {
    const NAME: &'static str = "f64";

    fn saturating_from_fixed(raw: i128, frac_bits: u32) -> Self {
        exact_f64(raw, frac_bits)
    }

    fn checked_from_fixed(raw: i128, frac_bits: u32) -> Option<Self> {
        Some(exact_f64(raw, frac_bits))
    }
}

impl sealed::Sealed for f32 {}

impl ToFixed for f32 {
    fn scaled(self, frac_bits: u32) -> Scaled {
        q32::scale_f64(f64::from(self), frac_bits)
    }
}

impl FromFixed for f32 {
    const NAME: &'static str = "f32";

    // One rounding (integer -> f32), then an exact power-of-two scale.
    #[allow(clippy::cast_precision_loss)]
    fn saturating_from_fixed(raw: i128, frac_bits: u32) -> Self {
        raw as f32 / (1_u32 << frac_bits) as f32
    }

    fn checked_from_fixed(raw: i128, frac_bits: u32) -> Option<Self> {
        Some(Self::saturating_from_fixed(raw, frac_bits))
    }
}

impl sealed::Sealed for f16 {}

impl ToFixed for f16 {
    fn scaled(self, frac_bits: u32) -> Scaled {
        q32::scale_f64(self.to_f64(), frac_bits)
    }
}

impl FromFixed for f16 {
    const NAME: &'static str = "f16";

    fn saturating_from_fixed(raw: i128, frac_bits: u32) -> Self {
        Self::checked_from_fixed(raw, frac_bits).unwrap_or(if raw < 0 {
            f16::MIN
        } else {
            f16::MAX
        })
    }

    fn checked_from_fixed(raw: i128, frac_bits: u32) -> Option<Self> {
        let h = f16::from_f64(exact_f64(raw, frac_bits));
        if h.is_infinite() {
            None
        } else {
            Some(h)
        }
    }
}

impl sealed::Sealed for Decimal {}

impl ToFixed for Decimal {
    /// `mantissa * 2^F / 10^scale`, rounded ties-to-even in integer space.
    fn scaled(self, frac_bits: u32) -> Scaled {
        let numerator = self.mantissa().unsigned_abs() << frac_bits;
        let denominator = 10_u128.pow(self.scale());

        let q = numerator / denominator;
        let r = numerator % denominator;
        let twice_r = r * 2;
        let rounded = if twice_r > denominator || (twice_r == denominator && (q & 1) == 1) {
            q + 1
        } else {
            q
        };

        // |mantissa| < 2^96 and F <= 16, so the quotient fits comfortably.
        match i128::try_from(rounded) {
            Ok(v) if self.is_sign_negative() => Scaled::Exact(-v),
            Ok(v) => Scaled::Exact(v),
            Err(_) if self.is_sign_negative() => Scaled::Below,
            Err(_) => Scaled::Above,
        }
    }
}

impl FromFixed for Decimal {
    const NAME: &'static str = "Decimal";

    fn saturating_from_fixed(raw: i128, frac_bits: u32) -> Self {
        Self::checked_from_fixed(raw, frac_bits).unwrap_or(if raw < 0 {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    }

    /// Exact: `raw / 2^F == raw * 5^F / 10^F`.
    fn checked_from_fixed(raw: i128, frac_bits: u32) -> Option<Self> {
        Decimal::try_from_i128_with_scale(raw * 5_i128.pow(frac_bits), frac_bits)
            .ok()
            .map(|d| d.normalize())
    }
}

impl<K: Kind> sealed::Sealed for FixedPoint<K> {}

impl<K: Kind> ToFixed for FixedPoint<K> {
    fn scaled(self, frac_bits: u32) -> Scaled {
        Scaled::Exact(rescale(self.wide(), K::FRAC_BITS, frac_bits))
    }
}

impl<K: Kind> FromFixed for FixedPoint<K> {
    const NAME: &'static str = K::NAME;

    fn saturating_from_fixed(raw: i128, frac_bits: u32) -> Self {
        Self::from_wide_saturating(rescale(raw, frac_bits, K::FRAC_BITS))
    }

    fn checked_from_fixed(raw: i128, frac_bits: u32) -> Option<Self> {
        K::try_narrow(rescale(raw, frac_bits, K::FRAC_BITS)).map(Self::from_raw)
    }
}

impl<K: Kind> FixedPoint<K> {
    /// Converts any supported numeric value, saturating at `MIN`/`MAX`.
    ///
    /// `NaN` becomes `ZERO`; `±∞` and huge magnitudes saturate.
    pub fn from_num<T: ToFixed>(value: T) -> Self {
        match value.scaled(K::FRAC_BITS) {
            Scaled::Exact(wide) => Self::from_wide_saturating(wide),
            Scaled::Above => Self::MAX,
            Scaled::Below => Self::MIN,
            Scaled::NotANumber => Self::ZERO,
        }
    }

    /// Converts any supported numeric value, failing when it does not fit.
    pub fn checked_from_num<T: ToFixed>(value: T) -> Result<Self, FixedError> {
        let overflow = FixedError::Overflow { kind: K::NAME };
        match value.scaled(K::FRAC_BITS) {
            Scaled::Exact(wide) => K::try_narrow(wide).map(Self::from_raw).ok_or(overflow),
            Scaled::Above | Scaled::Below => Err(overflow),
            Scaled::NotANumber => Err(FixedError::NotANumber { kind: K::NAME }),
        }
    }

    /// Converts to a primitive (or another kind), saturating at its bounds.
    ///
    /// Integer targets truncate toward zero.
    pub fn to_num<T: FromFixed>(self) -> T {
        T::saturating_from_fixed(self.wide(), K::FRAC_BITS)
    }

    /// Converts to a primitive (or another kind), failing when it does not fit.
    pub fn checked_to_num<T: FromFixed>(self) -> Result<T, FixedError> {
        T::checked_from_fixed(self.wide(), K::FRAC_BITS).ok_or(FixedError::Overflow { kind: T::NAME })
    }

    /// Saturating conversion to another kind.
    ///
    /// Out-of-range values clamp (a tiny negative `Fix16` becomes `UFix8::MIN`);
    /// fractional bits that the target cannot hold are truncated toward zero.
    pub fn convert<K2: Kind>(self) -> FixedPoint<K2> {
        FixedPoint::<K2>::from_num(self)
    }

    /// Returns the value as `f64` (exact).
    pub fn to_f64(self) -> f64 {
        exact_f64(self.wide(), K::FRAC_BITS)
    }
}

impl<K: Kind> FromStr for FixedPoint<K> {
    type Err = FixedError;

    /// Parses decimal text (`"2.5"`, `"-0.003570556640625"`, `"1e3"`) exactly,
    /// then converts with [`FixedPoint::checked_from_num`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parsed = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|e| FixedError::Parse(format!("{text:?}: {e}")))?;
        Self::checked_from_num(parsed)
    }
}

macro_rules! lossless_from {
    ($fixed:ty: $($src:ty),* $(,)?) => {$(
        impl From<$src> for $fixed {
            fn from(value: $src) -> Self {
                Self::from_num(value)
            }
        }
    )*};
}

lossless_from!(Fix16: bool, i8, u8, i16);
lossless_from!(UFix16: bool, u8, u16);
lossless_from!(UFix8: bool, u8);

impl<K: Kind> From<FixedPoint<K>> for f64 {
    fn from(value: FixedPoint<K>) -> Self {
        value.to_f64()
    }
}

impl<K: Kind> From<FixedPoint<K>> for Decimal {
    fn from(value: FixedPoint<K>) -> Self {
        value.to_num()
    }
}

impl From<UFix8> for f32 {
    fn from(value: UFix8) -> Self {
        value.to_num()
    }
}
