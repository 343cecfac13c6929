// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Q32.32 working format shared by the transcendental kernels and the
//! compile-time constant tables.
//!
//! Every public kind carries at most 16 fractional bits, so widening an input
//! into Q32.32 is exact and the kernels round exactly once, when the result is
//! narrowed back to the caller's kind. Values are `i64`/`i128` integers scaled
//! by `2^32`: `real_value = raw / 2^32`.

use crate::convert::Scaled;

/// Number of fractional bits in the working format.
pub(crate) const FRAC_BITS: u32 = 32;

/// `1.0` in Q32.32.
pub(crate) const ONE: i64 = 1_i64 << FRAC_BITS;

/// π in Q32.32.
pub(crate) const PI: i64 = 13_493_037_705;
/// e in Q32.32.
pub(crate) const E: i64 = 11_674_931_555;
/// 4/π in Q32.32.
pub(crate) const FOUR_DIV_PI: i64 = 5_468_522_205;
/// 4/π² in Q32.32.
pub(crate) const FOUR_DIV_PI2: i64 = 1_740_684_681;
/// π/4 in Q32.32.
pub(crate) const PI_DIV_FOUR: i64 = 3_373_259_426;
/// 3π/4 in Q32.32.
pub(crate) const THREE_PI_DIV_FOUR: i64 = 10_119_778_278;
/// π/2 in Q32.32.
pub(crate) const FRAC_PI_2: i64 = 6_746_518_852;
/// 3π/2 in Q32.32.
pub(crate) const THREE_FRAC_PI_2: i64 = 20_239_556_557;
/// 2π in Q32.32.
pub(crate) const TAU: i64 = 26_986_075_409;
/// ln 2 in Q32.32.
pub(crate) const LN2: i64 = 2_977_044_472;

/// Narrows a non-negative Q32.32 constant to `frac_bits` fractional bits,
/// rounding half up. Used to derive every kind's constant table at compile
/// time from the master values above.
pub(crate) const fn narrow_const(value: i64, frac_bits: u32) -> i64 {
    let shift = FRAC_BITS - frac_bits;
    (value + (1_i64 << (shift - 1))) >> shift
}

/// Widens a raw value with `frac_bits` fractional bits into Q32.32 (exact).
pub(crate) fn widen(raw: i128, frac_bits: u32) -> i128 {
    raw << (FRAC_BITS - frac_bits)
}

/// Narrows a Q32.32 value to `frac_bits` fractional bits, rounding half up.
pub(crate) fn narrow(value: i128, frac_bits: u32) -> i128 {
    let shift = FRAC_BITS - frac_bits;
    (value + (1_i128 << (shift - 1))) >> shift
}

/// Q32.32 multiply, rounding half up.
pub(crate) fn mul(a: i128, b: i128) -> i128 {
    (a * b + (1_i128 << (FRAC_BITS - 1))) >> FRAC_BITS
}

/// Q32.32 divide, truncating toward zero. `b` must be non-zero.
pub(crate) fn div(a: i128, b: i128) -> i128 {
    (a << FRAC_BITS) / b
}

/// Shifts `value` right by `shift`, rounding to nearest with ties-to-even.
fn round_shift_right_u64(value: u64, shift: u32) -> u64 {
    if shift == 0 {
        return value;
    }
    if shift >= 64 {
        return 0;
    }

    let q = value >> shift;
    let mask = (1_u64 << shift) - 1;
    let r = value & mask;
    let half = 1_u64 << (shift - 1);

    if r > half || (r == half && (q & 1) == 1) {
        q + 1
    } else {
        q
    }
}

/// Integer square root of `n`, rounded to nearest.
///
/// Digit-by-digit (binary restoring) method; never touches floating point.
pub(crate) fn isqrt_round(n: u128) -> u128 {
    if n < 2 {
        return n;
    }

    let mut rem = n;
    let mut root = 0_u128;
    // Highest power of four not exceeding `n`.
    let mut bit = 1_u128 << ((127 - n.leading_zeros()) & !1);

    while bit != 0 {
        if rem >= root + bit {
            rem -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }

    // `rem = n - root^2`; round up when n > root^2 + root, i.e. past root + 0.5.
    if rem > root {
        root + 1
    } else {
        root
    }
}

/// Scales an `f64` by `2^frac_bits` straight from its IEEE-754 encoding.
///
/// Semantics:
/// - `NaN` reports [`Scaled::NotANumber`].
/// - `+∞`/`-∞` report [`Scaled::Above`]/[`Scaled::Below`].
/// - Finite values round to nearest with ties-to-even at the fractional boundary.
///
/// `f32` and `f16` sources widen to `f64` exactly before calling this.
pub(crate) fn scale_f64(value: f64, frac_bits: u32) -> Scaled {
    if value.is_nan() {
        return Scaled::NotANumber;
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            Scaled::Above
        } else {
            Scaled::Below
        };
    }

    let bits = value.to_bits();
    let sign = (bits >> 63) != 0;
    // Masking yields a value in 0..=2047.
    #[allow(clippy::cast_possible_truncation)]
    let exp = ((bits >> 52) & 0x7ff) as i32;
    let mant = bits & ((1_u64 << 52) - 1);

    if exp == 0 && mant == 0 {
        return Scaled::Exact(0);
    }

    let mantissa: u64 = if exp == 0 {
        // subnormal: exponent is fixed at -1022, no implicit 1.
        mant
    } else {
        // normal: implicit leading 1.
        (1_u64 << 52) | mant
    };

    // value = mantissa * 2^(unbiased - 52)
    // scaled = mantissa * 2^(unbiased - 52 + frac_bits)
    let unbiased = if exp == 0 { -1022 } else { exp - 1023 };
    #[allow(clippy::cast_possible_wrap)]
    let shift = unbiased - 52 + frac_bits as i32;

    let abs_raw: i128 = if shift >= 0 {
        let shift_u = shift.unsigned_abs();
        // mantissa is 53 bits; anything past 2^120 is far outside every kind.
        if shift_u > 67 {
            return if sign { Scaled::Below } else { Scaled::Above };
        }
        i128::from(mantissa) << shift_u
    } else {
        i128::from(round_shift_right_u64(mantissa, shift.unsigned_abs()))
    };

    Scaled::Exact(if sign { -abs_raw } else { abs_raw })
}
