// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Deterministic trigonometry over fixed-point radians.
//!
//! Nothing here touches floating point. Inputs are widened exactly into the
//! Q32.32 working format, evaluated with integer polynomials, and narrowed
//! once with round-half-up.
//!
//! Strategy for `sin`/`cos`:
//! - range-reduce `|x|` to `[0, TAU)` with an integer remainder
//! - split into quadrants by comparison against π/2, π, 3π/2
//! - evaluate an odd Taylor polynomial on the quarter wave
//! - apply quadrant symmetries, then the sign of `x` for sine
//!
//! `atan2` folds the plane into octants around `PI_DIV_FOUR` /
//! `THREE_PI_DIV_FOUR` and evaluates an odd minimax polynomial for `atan` on
//! `[-1, 1]`. `asin`/`acos` are built on `atan2` and `sqrt`.
//!
//! On unsigned kinds, negative results saturate to zero.

use crate::fixed::FixedPoint;
use crate::kind::Kind;
use crate::q32;

/// Taylor denominators for `sin` on the quarter wave, innermost first:
/// `a·(1 - a²/6·(1 - a²/20·(1 - a²/42·(1 - a²/72·(1 - a²/110)))))`.
const SIN_TAYLOR_DIVISORS: [i128; 5] = [110, 72, 42, 20, 6];

/// `atan(r) = r·P(r²)` on `[-1, 1]`, coefficients in Q32.32, highest degree
/// first (Abramowitz & Stegun 4.4.49; |error| < 2e-8).
const ATAN_COEFFS: [i128; 9] = [
    12_310_346,
    -69_431_310,
    184_295_388,
    -323_366_542,
    457_683_051,
    -610_267_584,
    858_716_470,
    -1_431_647_689,
    4_294_967_296,
];

/// `sin(a)` for `a` in `[0, π/2]`, Q32.32.
fn sin_qtr(a: i128) -> i128 {
    let one = i128::from(q32::ONE);
    let a2 = q32::mul(a, a);
    let mut acc = one;
    for d in SIN_TAYLOR_DIVISORS {
        acc = one - q32::mul(a2, acc) / d;
    }
    q32::mul(a, acc)
}

/// `(sin, cos)` of a Q32.32 angle.
fn sin_cos_q32(angle: i128) -> (i128, i128) {
    let frac_pi_2 = i128::from(q32::FRAC_PI_2);
    let pi = i128::from(q32::PI);
    let three_frac_pi_2 = i128::from(q32::THREE_FRAC_PI_2);

    // Reduce |angle| and reapply the sign so sin(-x) is exactly -sin(x).
    let negative = angle < 0;
    let r = angle.abs() % i128::from(q32::TAU);

    let (quadrant, a) = if r < frac_pi_2 {
        (0_u8, r)
    } else if r < pi {
        (1_u8, r - frac_pi_2)
    } else if r < three_frac_pi_2 {
        (2_u8, r - pi)
    } else {
        (3_u8, r - three_frac_pi_2)
    };

    let s = sin_qtr(a);
    let c = sin_qtr(frac_pi_2 - a);

    let (s, c) = match quadrant {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        // 3
        _ => (-c, s),
    };

    (if negative { -s } else { s }, c)
}

/// `atan(r)` for `r` in `[-1, 1]`, Q32.32.
fn atan_unit(r: i128) -> i128 {
    let r2 = q32::mul(r, r);
    let mut acc = 0_i128;
    for c in ATAN_COEFFS {
        acc = q32::mul(acc, r2) + c;
    }
    q32::mul(acc, r)
}

/// `atan2(y, x)` on Q32.32 inputs; `atan2(0, 0) == 0`.
fn atan2_q32(y: i128, x: i128) -> i128 {
    if x == 0 && y == 0 {
        return 0;
    }

    let abs_y = y.abs();
    let angle = if x >= 0 {
        let r = q32::div(x - abs_y, x + abs_y);
        i128::from(q32::PI_DIV_FOUR) - atan_unit(r)
    } else {
        let r = q32::div(x + abs_y, abs_y - x);
        i128::from(q32::THREE_PI_DIV_FOUR) - atan_unit(r)
    };

    if y < 0 {
        -angle
    } else {
        angle
    }
}

impl<K: Kind> FixedPoint<K> {
    fn q32(self) -> i128 {
        q32::widen(self.wide(), K::FRAC_BITS)
    }

    fn from_q32(value: i128) -> Self {
        Self::from_wide_saturating(q32::narrow(value, K::FRAC_BITS))
    }

    /// Narrows the magnitude and reapplies the sign, so odd functions stay
    /// odd after rounding.
    fn from_q32_odd(value: i128) -> Self {
        let magnitude = q32::narrow(value.abs(), K::FRAC_BITS);
        Self::from_wide_saturating(if value < 0 { -magnitude } else { magnitude })
    }

    /// Sine of `self` radians. `sin(-x) == -sin(x)` holds bit for bit.
    pub fn sin(self) -> Self {
        Self::from_q32_odd(sin_cos_q32(self.q32()).0)
    }

    /// Cosine of `self` radians.
    pub fn cos(self) -> Self {
        Self::from_q32(sin_cos_q32(self.q32()).1)
    }

    /// Sine and cosine of `self` radians with a shared range reduction.
    pub fn sin_cos(self) -> (Self, Self) {
        let (s, c) = sin_cos_q32(self.q32());
        (Self::from_q32_odd(s), Self::from_q32(c))
    }

    /// Tangent of `self` radians.
    ///
    /// Returns `None` where `|cos|` is below one step of this kind (odd
    /// multiples of π/2). The quotient is taken in Q32.32 and rounded once;
    /// results past `MIN`/`MAX` saturate.
    pub fn tan(self) -> Option<Self> {
        let (s, c) = sin_cos_q32(self.q32());
        if c.abs() < 1_i128 << (q32::FRAC_BITS - K::FRAC_BITS) {
            return None;
        }
        Some(Self::from_q32(q32::div(s, c)))
    }

    /// Arctangent of `self`, in `(-π/2, π/2)`.
    pub fn atan(self) -> Self {
        Self::from_q32(atan2_q32(self.q32(), i128::from(q32::ONE)))
    }

    /// Four-quadrant arctangent of `self / x` (`self` is `y`), in `[-π, π]`.
    ///
    /// Defined everywhere; `atan2(0, 0)` is zero.
    pub fn atan2(self, x: Self) -> Self {
        Self::from_q32(atan2_q32(self.q32(), x.q32()))
    }

    /// Arcsine of `self`, or `None` outside `[-1, 1]`.
    pub fn asin(self) -> Option<Self> {
        asin_q32(self.q32()).map(Self::from_q32)
    }

    /// Arccosine of `self`, or `None` outside `[-1, 1]`.
    pub fn acos(self) -> Option<Self> {
        asin_q32(self.q32()).map(|a| Self::from_q32(i128::from(q32::FRAC_PI_2) - a))
    }
}

/// `asin(x) = atan2(x, sqrt(1 - x²))`, Q32.32; `None` outside `[-1, 1]`.
fn asin_q32(x: i128) -> Option<i128> {
    let one = i128::from(q32::ONE);
    if x.abs() > one {
        return None;
    }
    let rest = one - q32::mul(x, x);
    // sqrt in Q32.32: isqrt(v << 32). `rest` is in [0, 1], so v << 32 <= 2^64.
    #[allow(clippy::cast_possible_wrap)]
    let cos = q32::isqrt_round(rest.unsigned_abs() << q32::FRAC_BITS) as i128;
    Some(atan2_q32(x, cos))
}
