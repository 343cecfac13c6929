// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Representation kinds: storage width, fractional bits and signedness.
//!
//! A [`Kind`] is a zero-sized marker that parametrizes
//! [`FixedPoint`](crate::FixedPoint). All shared algorithms (arithmetic,
//! conversions, transcendentals, formatting) are written once against this
//! trait and instantiated for the three concrete kinds below, so the variants
//! cannot drift apart.

use core::fmt;
use core::hash::Hash;

use crate::dispatch::Value;
use crate::fixed::FixedPoint;
use crate::q32;

mod sealed {
    pub trait Sealed {}
}

/// Describes one fixed-point representation.
///
/// This trait is sealed; the crate provides [`I16F16`], [`U16F16`] and [`U8F8`].
pub trait Kind:
    Copy + fmt::Debug + Default + Eq + Ord + Hash + Send + Sync + 'static + sealed::Sealed
{
    /// Storage integer; every bit pattern is a valid value.
    type Raw: Copy
        + fmt::Debug
        + fmt::Display
        + fmt::LowerHex
        + fmt::UpperHex
        + Default
        + Eq
        + Ord
        + Hash
        + Send
        + Sync
        + 'static;

    /// Public type name (`Fix16`, `UFix16`, `UFix8`).
    const NAME: &'static str;
    /// Number of fractional bits `F`; `real_value = raw / 2^F`.
    const FRAC_BITS: u32;
    /// Whether the storage integer is two's-complement signed.
    const SIGNED: bool;
    /// Discriminator mixed into `Hash` so equal raws of different kinds differ.
    const HASH_TAG: i32;
    /// Custom numeric type code reported by `type_code()`.
    const TYPE_CODE: u8;

    /// Smallest raw value, widened.
    const MIN_WIDE: i128;
    /// Largest raw value, widened.
    const MAX_WIDE: i128;

    /// Raw encoding of the most negative value.
    const MIN_RAW: Self::Raw;
    /// Raw encoding of the most positive value.
    const MAX_RAW: Self::Raw;
    /// Raw encoding of `0`.
    const ZERO_RAW: Self::Raw;
    /// Raw encoding of `1` (`2^F`).
    const ONE_RAW: Self::Raw;
    /// Raw encoding of the smallest positive step.
    const EPSILON_RAW: Self::Raw;
    /// Raw encoding of π.
    const PI_RAW: Self::Raw;
    /// Raw encoding of e.
    const E_RAW: Self::Raw;
    /// Raw encoding of 4/π.
    const FOUR_DIV_PI_RAW: Self::Raw;
    /// Raw encoding of 4/π².
    const FOUR_DIV_PI2_RAW: Self::Raw;
    /// Raw encoding of π/4.
    const PI_DIV_FOUR_RAW: Self::Raw;
    /// Raw encoding of 3π/4.
    const THREE_PI_DIV_FOUR_RAW: Self::Raw;

    /// Widens a raw value losslessly.
    fn widen(raw: Self::Raw) -> i128;

    /// Narrows with two's-complement truncation.
    fn wrap(wide: i128) -> Self::Raw;

    /// Narrows if the value is in range.
    fn try_narrow(wide: i128) -> Option<Self::Raw>;

    /// Narrows by clamping to `[MIN_RAW, MAX_RAW]`.
    fn saturate(wide: i128) -> Self::Raw {
        if wide < Self::MIN_WIDE {
            Self::MIN_RAW
        } else if wide > Self::MAX_WIDE {
            Self::MAX_RAW
        } else {
            Self::wrap(wide)
        }
    }

    /// Boxes a value of this kind into the dynamic [`Value`] union.
    #[doc(hidden)]
    fn boxed(value: FixedPoint<Self>) -> Value;

    /// Extracts a value of this kind from the dynamic [`Value`] union.
    #[doc(hidden)]
    fn unbox(value: &Value) -> Option<FixedPoint<Self>>;
}

/// Kinds backed by a two's-complement signed integer.
pub trait SignedKind: Kind {
    /// Raw encoding of `-1`.
    const NEG_ONE_RAW: Self::Raw;
}

macro_rules! fixed_kind {
    (
        $(#[$meta:meta])*
        $kind:ident {
            raw: $raw:ty,
            frac: $frac:expr,
            signed: $signed:expr,
            name: $name:expr,
            hash_tag: $tag:expr,
            type_code: $code:expr,
            variant: $variant:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $kind;

        impl sealed::Sealed for $kind {}

        // Constant narrowing below is checked by the unit tests in this module.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        impl Kind for $kind {
            type Raw = $raw;

            const NAME: &'static str = $name;
            const FRAC_BITS: u32 = $frac;
            const SIGNED: bool = $signed;
            const HASH_TAG: i32 = $tag;
            const TYPE_CODE: u8 = $code;

            const MIN_WIDE: i128 = <$raw>::MIN as i128;
            const MAX_WIDE: i128 = <$raw>::MAX as i128;

            const MIN_RAW: $raw = <$raw>::MIN;
            const MAX_RAW: $raw = <$raw>::MAX;
            const ZERO_RAW: $raw = 0;
            const ONE_RAW: $raw = 1 << $frac;
            const EPSILON_RAW: $raw = 1;
            const PI_RAW: $raw = q32::narrow_const(q32::PI, $frac) as $raw;
            const E_RAW: $raw = q32::narrow_const(q32::E, $frac) as $raw;
            const FOUR_DIV_PI_RAW: $raw = q32::narrow_const(q32::FOUR_DIV_PI, $frac) as $raw;
            const FOUR_DIV_PI2_RAW: $raw = q32::narrow_const(q32::FOUR_DIV_PI2, $frac) as $raw;
            const PI_DIV_FOUR_RAW: $raw = q32::narrow_const(q32::PI_DIV_FOUR, $frac) as $raw;
            const THREE_PI_DIV_FOUR_RAW: $raw =
                q32::narrow_const(q32::THREE_PI_DIV_FOUR, $frac) as $raw;

            fn widen(raw: $raw) -> i128 {
                i128::from(raw)
            }

            fn wrap(wide: i128) -> $raw {
                wide as $raw
            }

            fn try_narrow(wide: i128) -> Option<$raw> {
                <$raw>::try_from(wide).ok()
            }

            fn boxed(value: FixedPoint<Self>) -> Value {
                Value::$variant(value)
            }

            fn unbox(value: &Value) -> Option<FixedPoint<Self>> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

fixed_kind! {
    /// Signed Q16.16: `i32` storage, 16 fractional bits.
    I16F16 {
        raw: i32,
        frac: 16,
        signed: true,
        name: "Fix16",
        hash_tag: 2,
        type_code: 100,
        variant: Fix16,
    }
}

fixed_kind! {
    /// Unsigned Q16.16: `u32` storage, 16 fractional bits.
    U16F16 {
        raw: u32,
        frac: 16,
        signed: false,
        name: "UFix16",
        hash_tag: 3,
        type_code: 101,
        variant: UFix16,
    }
}

fixed_kind! {
    /// Unsigned Q8.8: `u16` storage, 8 fractional bits.
    U8F8 {
        raw: u16,
        frac: 8,
        signed: false,
        name: "UFix8",
        hash_tag: 4,
        type_code: 102,
        variant: UFix8,
    }
}

impl SignedKind for I16F16 {
    const NEG_ONE_RAW: i32 = -(1 << 16);
}
